//! Content-keyed cache for filter results.
//!
//! Filtering is a pure function of (points, track, radius). The cache keys
//! each call by a SHA-256 digest of all three *values*, so any change to a
//! label, attribute, coordinate or the radius produces a different key and
//! a stale result can never be served.
//!
//! # Example
//!
//! ```
//! use trailside_geo::{Coordinate, FilterCache, PointOfInterest};
//!
//! let cache = FilterCache::default();
//! let track = vec![Coordinate::new(37.5, 127.0)];
//! let points = vec![PointOfInterest::new("gate 1", Coordinate::new(37.5, 127.0))];
//!
//! let first = cache.get_or_compute(&points, &track, 40.0).unwrap();
//! let second = cache.get_or_compute(&points, &track, 40.0).unwrap();
//! assert_eq!(first, second);
//! assert_eq!(cache.stats().hits, 1);
//! ```

use crate::{filter_nearby, filter_nearby_parallel, Coordinate, FilterResult, PointOfInterest, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{debug, trace};

/// Cache configuration
#[derive(Debug, Clone)]
pub struct FilterCacheConfig {
    /// Maximum number of results kept; the oldest entry is evicted first (0 = unlimited)
    pub max_entries: usize,
    /// Compute misses with the chunked parallel filter
    pub parallel: bool,
}

impl Default for FilterCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 16,
            parallel: false,
        }
    }
}

/// Cache counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

#[derive(Default)]
struct Entries {
    results: HashMap<String, Arc<FilterResult>>,
    insertion_order: VecDeque<String>,
}

/// Memoizes [`filter_nearby`] by content digest of its inputs.
pub struct FilterCache {
    config: FilterCacheConfig,
    entries: RwLock<Entries>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for FilterCache {
    fn default() -> Self {
        Self::new(FilterCacheConfig::default())
    }
}

impl FilterCache {
    /// Create a new cache instance
    pub fn new(config: FilterCacheConfig) -> Self {
        Self {
            config,
            entries: RwLock::new(Entries::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the cached result for these inputs, computing it on a miss.
    ///
    /// Invalid arguments are reported as errors and never cached.
    pub fn get_or_compute(
        &self,
        points: &[PointOfInterest],
        track: &[Coordinate],
        radius_m: f64,
    ) -> Result<Arc<FilterResult>> {
        let key = cache_key(points, track, radius_m);

        if let Some(hit) = self.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(key = %&key[..12], "Filter cache hit");
            return Ok(hit);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let result = if self.config.parallel {
            filter_nearby_parallel(points, track, radius_m)?
        } else {
            filter_nearby(points, track, radius_m)?
        };
        let result = Arc::new(result);

        self.insert(key, Arc::clone(&result));
        Ok(result)
    }

    /// Looks up a result by key.
    pub fn get(&self, key: &str) -> Option<Arc<FilterResult>> {
        // A poisoned lock only means a writer panicked; treat as a miss.
        let guard = self.entries.read().ok()?;
        guard.results.get(key).cloned()
    }

    fn insert(&self, key: String, result: Arc<FilterResult>) {
        let Ok(mut guard) = self.entries.write() else {
            return;
        };

        if guard.results.insert(key.clone(), result).is_none() {
            guard.insertion_order.push_back(key);
        }

        if self.config.max_entries > 0 {
            while guard.results.len() > self.config.max_entries {
                let Some(oldest) = guard.insertion_order.pop_front() else {
                    break;
                };
                guard.results.remove(&oldest);
                debug!(key = %&oldest[..12], "Evicted filter result");
            }
        }
    }

    /// Drops every cached result.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.entries.write() {
            guard.results.clear();
            guard.insertion_order.clear();
        }
    }

    /// Number of cached results.
    pub fn len(&self) -> usize {
        self.entries.read().map(|g| g.results.len()).unwrap_or(0)
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current hit/miss counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}

/// Hex SHA-256 digest of the filter inputs.
///
/// Strings are length-prefixed and floats hashed by bit pattern, so distinct
/// inputs cannot collide by concatenation.
pub fn cache_key(points: &[PointOfInterest], track: &[Coordinate], radius_m: f64) -> String {
    let mut hasher = Sha256::new();

    hasher.update(b"points");
    hasher.update((points.len() as u64).to_le_bytes());
    for point in points {
        hash_str(&mut hasher, &point.label);
        hash_coordinate(&mut hasher, &point.location);
        hasher.update((point.attributes.len() as u64).to_le_bytes());
        for (key, value) in &point.attributes {
            hash_str(&mut hasher, key);
            hash_str(&mut hasher, value);
        }
    }

    hasher.update(b"track");
    hasher.update((track.len() as u64).to_le_bytes());
    for vertex in track {
        hash_coordinate(&mut hasher, vertex);
    }

    hasher.update(b"radius");
    hasher.update(radius_m.to_bits().to_le_bytes());

    hex::encode(hasher.finalize())
}

fn hash_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

fn hash_coordinate(hasher: &mut Sha256, coordinate: &Coordinate) {
    hasher.update(coordinate.latitude.to_bits().to_le_bytes());
    hasher.update(coordinate.longitude.to_bits().to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeoError;

    fn track() -> Vec<Coordinate> {
        vec![Coordinate::new(37.500, 127.000), Coordinate::new(37.501, 127.001)]
    }

    fn points() -> Vec<PointOfInterest> {
        vec![
            PointOfInterest::new("a", Coordinate::new(37.5001, 127.0001)).with_attribute("hours", "24h"),
            PointOfInterest::new("b", Coordinate::new(37.6000, 127.1000)),
        ]
    }

    #[test]
    fn test_hit_after_miss() {
        let cache = FilterCache::default();
        let first = cache.get_or_compute(&points(), &track(), 40.0).unwrap();
        let second = cache.get_or_compute(&points(), &track(), 40.0).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1, entries: 1 });
    }

    #[test]
    fn test_value_change_invalidates() {
        let cache = FilterCache::default();
        let base = cache.get_or_compute(&points(), &track(), 40.0).unwrap();
        assert_eq!(base.len(), 1);

        // radius change
        let wider = cache.get_or_compute(&points(), &track(), 20_000.0).unwrap();
        assert_eq!(wider.len(), 2);

        // track change
        let mut moved = track();
        moved[0] = Coordinate::new(37.6, 127.1);
        moved[1] = Coordinate::new(37.6, 127.1);
        let on_b = cache.get_or_compute(&points(), &moved, 40.0).unwrap();
        assert_eq!(on_b.points()[0].label, "b");

        // attribute change only
        let mut edited = points();
        edited[0].attributes.insert("hours".into(), "09:00-18:00".into());
        let reopened = cache.get_or_compute(&edited, &track(), 40.0).unwrap();
        assert_eq!(reopened.points()[0].attribute("hours"), Some("09:00-18:00"));

        assert_eq!(cache.stats().misses, 4);
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_key_distinguishes_label_boundaries() {
        let loc = Coordinate::new(37.5, 127.0);
        let ab = vec![PointOfInterest::new("ab", loc), PointOfInterest::new("c", loc)];
        let a_bc = vec![PointOfInterest::new("a", loc), PointOfInterest::new("bc", loc)];
        assert_ne!(cache_key(&ab, &track(), 40.0), cache_key(&a_bc, &track(), 40.0));
        assert_eq!(cache_key(&ab, &track(), 40.0), cache_key(&ab.clone(), &track(), 40.0));
    }

    #[test]
    fn test_eviction_oldest_first() {
        let cache = FilterCache::new(FilterCacheConfig { max_entries: 2, parallel: false });
        for radius in [10.0, 20.0, 30.0] {
            cache.get_or_compute(&points(), &track(), radius).unwrap();
        }
        assert_eq!(cache.len(), 2);
        assert!(cache.get(&cache_key(&points(), &track(), 10.0)).is_none());
        assert!(cache.get(&cache_key(&points(), &track(), 30.0)).is_some());
    }

    #[test]
    fn test_invalid_radius_not_cached() {
        let cache = FilterCache::default();
        let err = cache.get_or_compute(&points(), &track(), 0.0).unwrap_err();
        assert!(matches!(err, GeoError::InvalidArgument(_)));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear() {
        let cache = FilterCache::new(FilterCacheConfig { max_entries: 0, parallel: true });
        cache.get_or_compute(&points(), &track(), 40.0).unwrap();
        cache.clear();
        assert!(cache.is_empty());
        cache.get_or_compute(&points(), &track(), 40.0).unwrap();
        assert_eq!(cache.stats().misses, 2);
    }
}
