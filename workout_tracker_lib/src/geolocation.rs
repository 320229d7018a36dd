use thiserror::Error;

use crate::coords::Coords;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("geolocation is not supported")]
    Unsupported,
    #[error("permission was denied")]
    PermissionDenied,
    #[error("position is unavailable")]
    PositionUnavailable,
    #[error("the request timed out")]
    Timeout,
    #[error("{0}")]
    Other(String),
}

impl GeolocationError {
    /// Maps the numeric codes of a browser `GeolocationPositionError`.
    pub fn from_code(code: u16, message: impl Into<String>) -> Self {
        match code {
            1 => GeolocationError::PermissionDenied,
            2 => GeolocationError::PositionUnavailable,
            3 => GeolocationError::Timeout,
            _ => GeolocationError::Other(message.into()),
        }
    }
}

pub type PositionCallback = Box<dyn FnOnce(Result<Coords, GeolocationError>)>;

/// Source of the user's current position. The answer arrives later through
/// `respond`, exactly once.
pub trait Geolocator {
    fn current_position(&self, respond: PositionCallback);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_browser_codes() {
        assert_eq!(GeolocationError::from_code(1, ""), GeolocationError::PermissionDenied);
        assert_eq!(GeolocationError::from_code(3, ""), GeolocationError::Timeout);
        assert_eq!(
            GeolocationError::from_code(9, "odd"),
            GeolocationError::Other("odd".into())
        );
    }
}
