use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A latitude/longitude pair in degrees, stored as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords(pub f64, pub f64);

impl Coords {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        Coords(latitude, longitude).validate()
    }

    /// Map clicks can land on a repeated copy of the world, so the longitude is
    /// wrapped back into -180..=180 before validating.
    pub fn wrapped(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        let wrapped = if longitude.is_finite() && !(-180.0..=180.0).contains(&longitude) {
            (longitude + 180.0).rem_euclid(360.0) - 180.0
        } else {
            longitude
        };
        Self::new(latitude, wrapped)
    }

    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }

    pub fn validate(self) -> Result<Self, ValidationError> {
        let Coords(latitude, longitude) = self;
        let lat_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let lng_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);

        if lat_ok && lng_ok {
            Ok(self)
        } else {
            Err(ValidationError::CoordinatesOutOfRange { latitude, longitude })
        }
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
