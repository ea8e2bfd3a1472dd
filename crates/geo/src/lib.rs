//! Route-proximity filtering for Trailside.
//!
//! This crate provides:
//! - Haversine distance calculations
//! - GPX track loading and down-sampling
//! - Radius filtering of points of interest against a track
//! - Batch filtering with optional parallelism
//! - A content-keyed cache for repeated filter calls
//!
//! # Example
//!
//! ```
//! use trailside_geo::{filter_nearby, Coordinate, PointOfInterest};
//!
//! let track = vec![Coordinate::new(37.5000, 127.0000), Coordinate::new(37.5010, 127.0010)];
//! let points = vec![
//!     PointOfInterest::new("near", Coordinate::new(37.5001, 127.0001)),
//!     PointOfInterest::new("far", Coordinate::new(37.6000, 127.1000)),
//! ];
//!
//! let result = filter_nearby(&points, &track, 40.0).unwrap();
//! assert_eq!(result.len(), 1);
//! assert_eq!(result.points()[0].label, "near");
//! ```

mod haversine;
mod proximity;
mod track;
mod error;
pub mod batch;
pub mod cache;

use std::collections::BTreeMap;

pub use haversine::{distance, distance_km, EARTH_RADIUS_KM, EARTH_RADIUS_M};
pub use proximity::{filter_nearby, is_near, validate_radius, FilterResult};
pub use track::{load_track, load_track_file, load_track_str, TailPolicy, Track};
pub use batch::filter_nearby_parallel;
pub use cache::{CacheStats, FilterCache, FilterCacheConfig};
pub use error::{GeoError, GeoErrorCode, Result};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true if both values are finite and inside the valid ranges.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(&self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// A labeled location with free-text attributes (opening hours, accessibility, ...).
///
/// Attributes are kept in a sorted map so that equal records always hash
/// and serialize the same way.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointOfInterest {
    /// Display label, e.g. a street address
    pub label: String,
    /// Where the point is
    pub location: Coordinate,
    /// Additional columns carried through to presentation
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl PointOfInterest {
    /// Creates a point without attributes.
    pub fn new(label: impl Into<String>, location: Coordinate) -> Self {
        Self {
            label: label.into(),
            location,
            attributes: BTreeMap::new(),
        }
    }

    /// Adds an attribute, replacing any previous value under the same key.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Looks up an attribute by column name.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}
