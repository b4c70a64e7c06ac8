//! Error types for the motion playback engine.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Device lacks the sensor hardware a feature needs
    #[error("Sensor unavailable: {0}")]
    SensorUnavailable(String),

    /// User or platform refused access to a sensor
    #[error("Authorization denied: {0}")]
    AuthorizationDenied(String),

    /// Sample contained non-finite or missing values
    #[error("Malformed sample: {0}")]
    MalformedSample(String),

    /// Player collaborator rejected a command
    #[error("Player error: {0}")]
    Player(String),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Replay trace could not be parsed or run
    #[error("Trace error: {0}")]
    TraceError(String),

    /// Generic I/O error with description
    #[error("I/O error: {0}")]
    IoError(String),
}

impl Error {
    /// Whether the error only disables a sensor-driven feature.
    ///
    /// Playback keeps running when this returns `true`.
    #[must_use]
    pub const fn is_degraded_mode(&self) -> bool {
        matches!(self, Self::SensorUnavailable(_) | Self::AuthorizationDenied(_))
    }
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degraded_mode_classification() {
        assert!(Error::SensorUnavailable("gyro".into()).is_degraded_mode());
        assert!(Error::AuthorizationDenied("location".into()).is_degraded_mode());
        assert!(!Error::Player("offline".into()).is_degraded_mode());
        assert!(!Error::MalformedSample("nan".into()).is_degraded_mode());
    }

    #[test]
    fn test_error_display() {
        let err = Error::AuthorizationDenied("while in use refused".into());
        assert_eq!(err.to_string(), "Authorization denied: while in use refused");
    }
}
