//! Error types for the points crate.

use thiserror::Error;

/// Result type alias for point source operations.
pub type Result<T> = std::result::Result<T, PointsError>;

/// Errors raised while reading a point source.
///
/// Individual malformed rows are not errors; they are dropped and counted.
#[derive(Debug, Error)]
pub enum PointsError {
    /// The source header lacks a column the mapping requires
    #[error("Required column '{0}' not found in point source header")]
    MissingColumn(String),

    /// The configured encoding label is not one the decoder knows
    #[error("Unknown point source encoding '{0}'")]
    UnknownEncoding(String),

    /// CSV decoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Opening or reading the source failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
