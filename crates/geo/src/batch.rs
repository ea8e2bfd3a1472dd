//! Batch filtering with optional parallelism.
//!
//! The point list is split into fixed-size chunks, each chunk is filtered on
//! its own, and the partial results are concatenated in chunk order. The
//! output is therefore identical to [`filter_nearby`](crate::filter_nearby).

use crate::proximity::filter_slice;
use crate::{validate_radius, Coordinate, FilterResult, GeoError, PointOfInterest, Result};
use tracing::{debug, instrument};

/// Points per chunk when no explicit size is given.
pub const DEFAULT_CHUNK_SIZE: usize = 256;

/// Filters points against a track, spreading chunks over the rayon pool.
///
/// Without the `parallel` feature the chunks run sequentially.
///
/// # Example
/// ```
/// use trailside_geo::{filter_nearby, filter_nearby_parallel, Coordinate, PointOfInterest};
///
/// let track = vec![Coordinate::new(37.5, 127.0), Coordinate::new(37.51, 127.01)];
/// let points: Vec<_> = (0..1000)
///     .map(|i| PointOfInterest::new(i.to_string(), Coordinate::new(37.5 + i as f64 * 1e-5, 127.0)))
///     .collect();
///
/// let parallel = filter_nearby_parallel(&points, &track, 100.0).unwrap();
/// let sequential = filter_nearby(&points, &track, 100.0).unwrap();
/// assert_eq!(parallel, sequential);
/// ```
pub fn filter_nearby_parallel(
    points: &[PointOfInterest],
    track: &[Coordinate],
    radius_m: f64,
) -> Result<FilterResult> {
    filter_nearby_chunked(points, track, radius_m, DEFAULT_CHUNK_SIZE)
}

/// Filters points in chunks of `chunk_size`, merging results in input order.
#[instrument(skip_all, fields(points = points.len(), vertices = track.len(), chunk_size = chunk_size))]
pub fn filter_nearby_chunked(
    points: &[PointOfInterest],
    track: &[Coordinate],
    radius_m: f64,
    chunk_size: usize,
) -> Result<FilterResult> {
    validate_radius(radius_m)?;
    if chunk_size == 0 {
        return Err(GeoError::invalid_argument("chunk size must be at least 1"));
    }

    #[cfg(feature = "parallel")]
    let partials: Vec<Vec<PointOfInterest>> = {
        use rayon::prelude::*;
        points
            .par_chunks(chunk_size)
            .map(|chunk| filter_slice(chunk, track, radius_m))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let partials: Vec<Vec<PointOfInterest>> = points
        .chunks(chunk_size)
        .map(|chunk| filter_slice(chunk, track, radius_m))
        .collect();

    let chunks = partials.len();
    let matches: Vec<PointOfInterest> = partials.into_iter().flatten().collect();

    debug!(chunks, matched = matches.len(), "Chunked proximity filter finished");

    Ok(FilterResult::new(matches, radius_m, track.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter_nearby;

    fn scattered_points(count: usize) -> Vec<PointOfInterest> {
        (0..count)
            .map(|i| {
                // Grid around the course start, some in range, most not
                let lat = 37.49 + (i as f64 * 0.0007) % 0.03;
                let lon = 126.99 + (i as f64 * 0.0011) % 0.03;
                PointOfInterest::new(format!("restroom-{}", i), Coordinate::new(lat, lon))
            })
            .collect()
    }

    fn course() -> Vec<Coordinate> {
        (0..50)
            .map(|i| Coordinate::new(37.5 + i as f64 * 0.0002, 127.0 + i as f64 * 0.0002))
            .collect()
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let points = scattered_points(2000);
        let track = course();

        let sequential = filter_nearby(&points, &track, 150.0).unwrap();
        let parallel = filter_nearby_parallel(&points, &track, 150.0).unwrap();

        assert!(!sequential.is_empty());
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_uneven_chunks_preserve_order() {
        let points = scattered_points(101);
        let track = course();

        let expected = filter_nearby(&points, &track, 300.0).unwrap();
        for chunk_size in [1, 7, 100, 101, 500] {
            let result = filter_nearby_chunked(&points, &track, 300.0, chunk_size).unwrap();
            assert_eq!(result, expected, "chunk size {}", chunk_size);
        }
    }

    #[test]
    fn test_rejects_bad_arguments() {
        let points = scattered_points(3);
        assert!(matches!(
            filter_nearby_chunked(&points, &course(), 10.0, 0),
            Err(GeoError::InvalidArgument(_))
        ));
        assert!(matches!(
            filter_nearby_parallel(&points, &course(), -5.0),
            Err(GeoError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(filter_nearby_parallel(&[], &course(), 10.0).unwrap().is_empty());
        assert!(filter_nearby_parallel(&scattered_points(10), &[], 10.0).unwrap().is_empty());
    }
}
