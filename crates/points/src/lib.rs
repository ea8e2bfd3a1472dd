//! Point-of-interest sources for Trailside.
//!
//! Turns external tabular rows into [`PointOfInterest`] records:
//! - Column mapping from source headers to label/latitude/longitude/attributes
//! - Numeric coercion with range checks
//! - Silent-by-contract dropping of incomplete rows (logged at debug level)
//! - CSV reading
//!
//! Rows that survive normalization always carry a valid coordinate, so the
//! proximity filter never sees malformed input.
//!
//! # Example
//!
//! ```
//! use trailside_points::{read_csv, ColumnMapping};
//!
//! let data = "label,lat,lon,hours\nGate 3,37.5012,127.0021,24h\nBroken,,127.0,\n";
//! let mapping = ColumnMapping::default().with_attributes(["hours"]);
//!
//! let outcome = read_csv(data.as_bytes(), &mapping).unwrap();
//! assert_eq!(outcome.points.len(), 1);
//! assert_eq!(outcome.dropped, 1);
//! assert_eq!(outcome.points[0].attribute("hours"), Some("24h"));
//! ```

mod csv_source;
mod error;
mod mapping;
mod normalize;

pub use csv_source::{read_csv, read_csv_file};
pub use error::{PointsError, Result};
pub use mapping::ColumnMapping;
pub use normalize::{normalize, normalize_row, DropReason, Normalized, RawRow};

pub use trailside_geo::PointOfInterest;
