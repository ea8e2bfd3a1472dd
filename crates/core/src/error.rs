//! Application errors with context and recovery suggestions
//!
//! This module provides structured error types with:
//! - Error codes grouped by category
//! - Recovery suggestions
//! - Conversion from the library crates' errors
//! - Serializable error reports and process exit codes

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use trailside_geo::GeoError;
use trailside_points::PointsError;

/// Error codes for programmatic error handling
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // General errors (1xxx)
    Internal = 1001,

    // IO errors (2xxx)
    IoError = 2000,
    FileNotFound = 2001,
    PermissionDenied = 2002,

    // Configuration errors (3xxx)
    ConfigError = 3000,
    ConfigNotFound = 3001,
    ConfigParseError = 3002,
    ConfigValidationError = 3003,
    InvalidConfigValue = 3004,

    // Validation errors (4xxx)
    ValidationError = 4000,
    InvalidArgument = 4001,

    // Input data errors (5xxx)
    TrackParseError = 5001,
    EmptyTrack = 5002,
    PointSourceError = 5003,
    MissingColumn = 5004,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a human-readable category
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            1 => "General",
            2 => "IO",
            3 => "Configuration",
            4 => "Validation",
            5 => "Data",
            _ => "Unknown",
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self.code() / 1000 {
            3 => exit_codes::CONFIG_ERROR,
            4 => exit_codes::VALIDATION_ERROR,
            5 => exit_codes::DATA_ERROR,
            _ => exit_codes::FAILURE,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Main error type with rich context
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context
    pub context: Option<String>,
    /// Recovery suggestion
    pub suggestion: Option<String>,
    /// Source error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, "\n  Context: {}", ctx)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a recovery suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        self.code.exit_code()
    }

    /// Convert to a serializable report
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code,
            code_str: self.code.to_string(),
            category: self.code.category().to_string(),
            message: self.message.clone(),
            context: self.context.clone(),
            suggestion: self.suggestion.clone(),
            source: self.source.as_ref().map(|e| e.to_string()),
        }
    }

    // Convenience constructors

    /// Explicitly requested configuration file does not exist
    pub fn config_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create a trailside.toml file or use --config to specify a path")
    }

    /// Configuration value outside its allowed range
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigValidationError, message)
    }

    /// Invalid user-supplied value
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// Required input was not supplied
    pub fn missing_input(what: &str, flag: &str) -> Self {
        Self::new(ErrorCode::ValidationError, format!("No {} given", what))
            .with_suggestion(format!("Pass {} or set it in trailside.toml", flag))
    }
}

/// Serializable error report for logging and JSON output
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub code_str: String,
    pub category: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes for CLI commands
#[allow(missing_docs)]
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const VALIDATION_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const DATA_ERROR: i32 = 4;
}

// Implement From for common error types

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::IoError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorCode::Internal, format!("JSON error: {}", err)).with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {}", err))
            .with_source(err)
    }
}

impl From<GeoError> for Error {
    fn from(err: GeoError) -> Self {
        match err {
            GeoError::Io(io) => Error::from(io),
            GeoError::Parse(_) => Error::new(ErrorCode::TrackParseError, err.to_string())
                .with_suggestion("Check that the route file is a GPX document with <trkpt> elements")
                .with_source(err),
            GeoError::EmptyTrack => Error::new(ErrorCode::EmptyTrack, err.to_string())
                .with_suggestion("The route file must contain at least one track point")
                .with_source(err),
            GeoError::InvalidArgument(_) => {
                Error::new(ErrorCode::InvalidArgument, err.to_string()).with_source(err)
            }
        }
    }
}

impl From<PointsError> for Error {
    fn from(err: PointsError) -> Self {
        match err {
            PointsError::Io(io) => Error::from(io),
            PointsError::MissingColumn(_) => Error::new(ErrorCode::MissingColumn, err.to_string())
                .with_suggestion("Set the column names under [points] or choose a --preset")
                .with_source(err),
            PointsError::UnknownEncoding(_) => {
                Error::new(ErrorCode::InvalidArgument, err.to_string())
                    .with_suggestion("Use a WHATWG encoding label such as utf-8 or euc-kr")
                    .with_source(err)
            }
            PointsError::Csv(_) => {
                Error::new(ErrorCode::PointSourceError, err.to_string()).with_source(err)
            }
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Attach context to the error, if any
    fn context(self, context: impl Into<String>) -> Result<T>;
    /// Attach a recovery suggestion to the error, if any
    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }

    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_suggestion(suggestion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::FileNotFound.to_string(), "E2001");
        assert_eq!(ErrorCode::TrackParseError.to_string(), "E5001");
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::IoError.category(), "IO");
        assert_eq!(ErrorCode::InvalidArgument.category(), "Validation");
        assert_eq!(ErrorCode::MissingColumn.category(), "Data");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ErrorCode::ConfigParseError.exit_code(), exit_codes::CONFIG_ERROR);
        assert_eq!(ErrorCode::InvalidArgument.exit_code(), exit_codes::VALIDATION_ERROR);
        assert_eq!(ErrorCode::EmptyTrack.exit_code(), exit_codes::DATA_ERROR);
        assert_eq!(ErrorCode::IoError.exit_code(), exit_codes::FAILURE);
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::config_not_found("/path/to/trailside.toml").with_context("--config");

        assert_eq!(err.code, ErrorCode::ConfigNotFound);
        assert!(err.context.is_some());
        assert!(err.suggestion.is_some());
    }

    #[test]
    fn test_from_geo_error() {
        let err: Error = GeoError::EmptyTrack.into();
        assert_eq!(err.code, ErrorCode::EmptyTrack);

        let err: Error = GeoError::Parse("unexpected end of document".into()).into();
        assert_eq!(err.code, ErrorCode::TrackParseError);
        assert!(err.source.is_some());

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = GeoError::Io(io).into();
        assert_eq!(err.code, ErrorCode::FileNotFound);
    }

    #[test]
    fn test_from_points_error() {
        let err: Error = PointsError::MissingColumn("lat".into()).into();
        assert_eq!(err.code, ErrorCode::MissingColumn);
        assert_eq!(err.exit_code(), exit_codes::DATA_ERROR);

        let err: Error = PointsError::UnknownEncoding("morse".into()).into();
        assert_eq!(err.exit_code(), exit_codes::VALIDATION_ERROR);
        assert!(err.suggestion.is_some());
    }

    #[test]
    fn test_result_ext_context() {
        let result: std::result::Result<(), GeoError> = Err(GeoError::EmptyTrack);
        let err = result.context("Loading route.gpx").unwrap_err();
        assert_eq!(err.context.as_deref(), Some("Loading route.gpx"));
    }

    #[test]
    fn test_error_report_serialization() {
        let err = Error::validation("radius must be positive").with_context("--radius -5");

        let report = err.to_report();
        let json = serde_json::to_string(&report).unwrap();

        assert!(json.contains("E4000"));
        assert!(json.contains("Validation"));
    }
}
