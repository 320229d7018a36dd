use thiserror::Error;

use crate::{geolocation::GeolocationError, workout::Field};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} must be a number")]
    NotFinite(Field),
    #[error("{0} must be a positive number")]
    NotPositive(Field),
    #[error("{0} cannot be negative")]
    Negative(Field),
    #[error("{0} must be a whole number")]
    NotWhole(Field),
    #[error("coordinates ({latitude}, {longitude}) are outside the valid range")]
    CoordinatesOutOfRange { latitude: f64, longitude: f64 },
    #[error("unknown workout kind `{0}`")]
    UnknownKind(String),
    #[error("no point has been selected on the map")]
    NoPointSelected,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("storage is unavailable: {0}")]
    Unavailable(String),
    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },
    #[error("failed to remove `{key}`: {reason}")]
    Remove { key: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid tracker configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Everything that can go wrong while the tracker runs. None of these end the
/// session; the `Display` text is what the user gets to see.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackerError {
    #[error("Couldn't fetch your location: {0}")]
    GeolocationUnavailable(#[from] GeolocationError),
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
    #[error("Saved workouts could not be read: {0}")]
    PersistenceRead(String),
    #[error("Workouts could not be saved: {0}")]
    PersistenceWrite(#[from] StoreError),
}
