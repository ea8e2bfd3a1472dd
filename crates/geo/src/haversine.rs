//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes.

use crate::Coordinate;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculates the great-circle distance between two coordinates in meters.
///
/// The result is symmetric in its arguments and zero for identical points.
///
/// # Example
/// ```
/// use trailside_geo::{distance, Coordinate};
///
/// let city_hall = Coordinate::new(37.5663, 126.9779);
/// let gwanghwamun = Coordinate::new(37.5759, 126.9768);
///
/// let meters = distance(&city_hall, &gwanghwamun);
/// assert!((meters - 1072.0).abs() < 10.0);
/// ```
#[inline]
pub fn distance(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_M)
}

/// Calculates the great-circle distance between two coordinates in kilometers.
#[inline]
pub fn distance_km(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_KM)
}

/// Internal function that calculates distance with a custom radius.
#[inline]
fn haversine_distance_with_radius(from: &Coordinate, to: &Coordinate, radius: f64) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    // rounding can push `a` just past 1.0 for antipodal pairs
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    radius * c
}
