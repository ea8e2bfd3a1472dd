//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur while loading tracks or filtering points.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Track source is not well-formed XML or not a GPX document
    #[error("Invalid track source: {0}")]
    Parse(String),

    /// Track source parsed but held no track points
    #[error("Track source contains no track points")]
    EmptyTrack,

    /// Argument outside its allowed domain (radius, stride, chunk size)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Reading the track source failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error code for integration with trailside-core error handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Malformed track source
    Parse = 10001,
    /// Track without points
    EmptyTrack = 10002,
    /// Invalid argument
    InvalidArgument = 10003,
    /// I/O failure
    Io = 10004,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::Parse(_) => GeoErrorCode::Parse,
            GeoError::EmptyTrack => GeoErrorCode::EmptyTrack,
            GeoError::InvalidArgument(_) => GeoErrorCode::InvalidArgument,
            GeoError::Io(_) => GeoErrorCode::Io,
        }
    }

    /// True for both flavors of track parse failure.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, GeoError::Parse(_) | GeoError::EmptyTrack)
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        GeoError::InvalidArgument(message.into())
    }
}
