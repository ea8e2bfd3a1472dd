//! Radius filtering of points against track vertices.
//!
//! A point is kept when at least one track vertex lies within the radius.
//! Distance to the path is approximated by distance to its vertices; no
//! projection onto segments is performed, so a sparse (down-sampled) track
//! can miss points that sit between two far-apart vertices.

use crate::{distance, Coordinate, GeoError, PointOfInterest, Result};
use serde::Serialize;
use tracing::{debug, instrument};

/// Points that passed the radius filter, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterResult {
    points: Vec<PointOfInterest>,
    radius_m: f64,
    track_vertices: usize,
}

impl FilterResult {
    pub(crate) fn new(points: Vec<PointOfInterest>, radius_m: f64, track_vertices: usize) -> Self {
        Self {
            points,
            radius_m,
            track_vertices,
        }
    }

    /// Matching points in input order.
    pub fn points(&self) -> &[PointOfInterest] {
        &self.points
    }

    /// Number of matches.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when nothing matched. This is a valid outcome, not an error.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Radius the filter ran with, in meters.
    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    /// Number of track vertices the points were tested against.
    pub fn track_vertices(&self) -> usize {
        self.track_vertices
    }

    /// The first `limit` matches, for display caps.
    pub fn truncated(&self, limit: usize) -> &[PointOfInterest] {
        &self.points[..self.points.len().min(limit)]
    }

    /// Iterates over the matches.
    pub fn iter(&self) -> std::slice::Iter<'_, PointOfInterest> {
        self.points.iter()
    }

    /// Consumes the result, returning the matches.
    pub fn into_points(self) -> Vec<PointOfInterest> {
        self.points
    }
}

impl<'a> IntoIterator for &'a FilterResult {
    type Item = &'a PointOfInterest;
    type IntoIter = std::slice::Iter<'a, PointOfInterest>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Rejects radii that cannot describe a filter: zero, negative, NaN, infinite.
pub fn validate_radius(radius_m: f64) -> Result<()> {
    if radius_m.is_finite() && radius_m > 0.0 {
        Ok(())
    } else {
        Err(GeoError::invalid_argument(format!(
            "radius must be a positive number of meters, got {}",
            radius_m
        )))
    }
}

/// True if some vertex of `track` is within `radius_m` of `location` (inclusive).
///
/// Stops at the first vertex in range.
#[inline]
pub fn is_near(location: &Coordinate, track: &[Coordinate], radius_m: f64) -> bool {
    track.iter().any(|vertex| distance(location, vertex) <= radius_m)
}

/// Returns the points within `radius_m` meters of at least one track vertex.
///
/// Output keeps the input order. An empty track or an empty point list gives
/// an empty result. A radius that is not a positive finite number is rejected
/// with [`GeoError::InvalidArgument`] before any work is done.
///
/// # Example
/// ```
/// use trailside_geo::{filter_nearby, Coordinate, PointOfInterest};
///
/// let track = [Coordinate::new(37.5, 127.0)];
/// let points = [PointOfInterest::new("start", Coordinate::new(37.5, 127.0))];
///
/// assert_eq!(filter_nearby(&points, &track, 1.0).unwrap().len(), 1);
/// assert!(filter_nearby(&points, &track, 0.0).is_err());
/// ```
#[instrument(skip_all, fields(points = points.len(), vertices = track.len(), radius_m = radius_m))]
pub fn filter_nearby(
    points: &[PointOfInterest],
    track: &[Coordinate],
    radius_m: f64,
) -> Result<FilterResult> {
    validate_radius(radius_m)?;

    let matches: Vec<PointOfInterest> = filter_slice(points, track, radius_m);

    debug!(matched = matches.len(), "Proximity filter finished");

    Ok(FilterResult::new(matches, radius_m, track.len()))
}

/// Filtering without validation; shared with the chunked variant.
pub(crate) fn filter_slice(
    points: &[PointOfInterest],
    track: &[Coordinate],
    radius_m: f64,
) -> Vec<PointOfInterest> {
    points
        .iter()
        .filter(|point| is_near(&point.location, track, radius_m))
        .cloned()
        .collect()
}
