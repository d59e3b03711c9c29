//! Expiring cache in front of an oracle.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::error::OracleError;
use crate::models::Point;

use super::{DistanceOracle, TravelMatrix};

/// Storage for oracle results, keyed by [`cache_key`].
///
/// Implementations must be safe to share between concurrent engine calls.
/// An entry is either present and complete or absent; readers never see a
/// partially written matrix.
pub trait MatrixCache: Send + Sync {
    /// Returns the cached matrix, if present and fresh.
    fn get(&self, key: &str) -> Option<TravelMatrix>;

    /// Stores a matrix, replacing any previous entry.
    fn set(&self, key: String, matrix: TravelMatrix);

    /// Returns `true` if a fresh entry exists.
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Builds a stable key from the ordered point list and traffic mode.
///
/// # Examples
///
/// ```
/// use u_tour::distance::cache_key;
/// use u_tour::models::Point;
///
/// let pts = [Point::new(1.0, 2.0), Point::new(3.0, 4.0)];
/// assert_eq!(cache_key(&pts, false), "1.000000,2.000000|3.000000,4.000000#static");
/// assert_ne!(cache_key(&pts, false), cache_key(&pts, true));
/// ```
pub fn cache_key(points: &[Point], traffic_aware: bool) -> String {
    let coords: Vec<String> = points.iter().map(Point::cache_key).collect();
    let mode = if traffic_aware { "traffic" } else { "static" };
    format!("{}#{}", coords.join("|"), mode)
}

/// In-memory [`MatrixCache`] with a fixed time-to-live.
///
/// Expired entries count as misses. A stale hit is dropped on lookup, and
/// every `set` sweeps out whatever else has expired, so the map holds at
/// most the entries written within one `ttl`.
#[derive(Debug)]
pub struct TtlCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, TravelMatrix)>>,
}

impl TtlCache {
    /// Creates an empty cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Entry lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drops every expired entry.
    pub fn purge_expired(&self) {
        let ttl = self.ttl;
        self.lock()
            .retain(|_, (stored, _)| stored.elapsed() < ttl);
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, (Instant, TravelMatrix)>> {
        // entries are replaced whole, so a poisoned map is still consistent
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MatrixCache for TtlCache {
    fn get(&self, key: &str) -> Option<TravelMatrix> {
        let mut entries = self.lock();
        let (stored, matrix) = entries.get(key)?;
        if stored.elapsed() < self.ttl {
            return Some(matrix.clone());
        }
        entries.remove(key);
        None
    }

    fn set(&self, key: String, matrix: TravelMatrix) {
        let ttl = self.ttl;
        let mut entries = self.lock();
        entries.retain(|_, (stored, _)| stored.elapsed() < ttl);
        entries.insert(key, (Instant::now(), matrix));
    }
}

/// An oracle that consults a [`MatrixCache`] before its inner oracle.
///
/// Failed oracle calls are never cached.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_tour::distance::{CachedOracle, DistanceOracle, TableOracle, TravelMatrix, TtlCache};
/// use u_tour::models::Point;
///
/// let pts = vec![Point::new(0.0, 0.0), Point::new(0.0, 1.0)];
/// let table = TableOracle::new(pts.clone(), TravelMatrix::new(2)).unwrap();
/// let cached = CachedOracle::new(&table, TtlCache::new(Duration::from_secs(300)));
///
/// cached.matrix(&pts, false).unwrap();
/// cached.matrix(&pts, false).unwrap();
/// assert_eq!(table.calls(), 1);
/// ```
#[derive(Debug)]
pub struct CachedOracle<O, C> {
    inner: O,
    cache: C,
}

impl<O: DistanceOracle, C: MatrixCache> CachedOracle<O, C> {
    pub fn new(inner: O, cache: C) -> Self {
        Self { inner, cache }
    }

    /// The underlying cache.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// The wrapped oracle.
    pub fn inner(&self) -> &O {
        &self.inner
    }
}

impl<O: DistanceOracle, C: MatrixCache> DistanceOracle for CachedOracle<O, C> {
    fn matrix(&self, points: &[Point], traffic_aware: bool) -> Result<TravelMatrix, OracleError> {
        let key = cache_key(points, traffic_aware);
        if let Some(hit) = self.cache.get(&key) {
            log::debug!("oracle.cache: hit points={}", points.len());
            return Ok(hit);
        }
        log::debug!("oracle.cache: miss points={}", points.len());
        let matrix = self.inner.matrix(points, traffic_aware)?;
        self.cache.set(key, matrix.clone());
        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::TableOracle;

    fn table() -> (Vec<Point>, TableOracle) {
        let pts: Vec<Point> = (0..3).map(|i| Point::new(1.0, i as f64)).collect();
        let oracle = TableOracle::new(pts.clone(), TravelMatrix::new(3)).expect("sized");
        (pts, oracle)
    }

    #[test]
    fn test_ttl_cache_set_get() {
        let cache = TtlCache::new(Duration::from_secs(60));
        assert!(cache.is_empty());
        assert!(!cache.has("k"));
        cache.set("k".into(), TravelMatrix::new(2));
        assert!(cache.has("k"));
        assert_eq!(cache.get("k").map(|m| m.size()), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_ttl_cache_expires() {
        let cache = TtlCache::new(Duration::ZERO);
        cache.set("k".into(), TravelMatrix::new(2));
        assert_eq!(cache.len(), 1);
        assert!(cache.get("k").is_none());
        // stale lookup drops the entry
        assert!(cache.is_empty());
    }

    #[test]
    fn test_purge_expired() {
        let cache = TtlCache::new(Duration::ZERO);
        cache.set("a".into(), TravelMatrix::new(2));
        cache.purge_expired();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_set_sweeps_expired_entries() {
        let cache = TtlCache::new(Duration::ZERO);
        for i in 0..50 {
            cache.set(format!("key-{i}"), TravelMatrix::new(2));
            assert_eq!(cache.len(), 1);
        }
    }

    #[test]
    fn test_set_keeps_fresh_entries() {
        let cache = TtlCache::new(Duration::from_secs(60));
        for i in 0..5 {
            cache.set(format!("key-{i}"), TravelMatrix::new(2));
        }
        assert_eq!(cache.len(), 5);
    }

    #[test]
    fn test_cached_oracle_bounded_under_distinct_requests() {
        let pts: Vec<Point> = (0..8).map(|i| Point::new(1.0, i as f64)).collect();
        let oracle = TableOracle::new(pts.clone(), TravelMatrix::new(8)).expect("sized");
        let cached = CachedOracle::new(&oracle, TtlCache::new(Duration::ZERO));
        for i in 0..pts.len() {
            for j in 0..pts.len() {
                if i != j {
                    cached.matrix(&[pts[i].clone(), pts[j].clone()], false).expect("matrix");
                }
            }
        }
        assert_eq!(oracle.calls(), 56);
        assert!(cached.cache().len() <= 1);
    }

    #[test]
    fn test_cache_key_depends_on_order() {
        let (pts, _) = table();
        let reversed: Vec<Point> = pts.iter().rev().cloned().collect();
        assert_ne!(cache_key(&pts, false), cache_key(&reversed, false));
    }

    #[test]
    fn test_cached_oracle_hits() {
        let (pts, oracle) = table();
        let cached = CachedOracle::new(&oracle, TtlCache::new(Duration::from_secs(60)));
        cached.matrix(&pts, false).expect("matrix");
        cached.matrix(&pts, false).expect("matrix");
        assert_eq!(oracle.calls(), 1);
        // different mode is a separate entry
        cached.matrix(&pts, true).expect("matrix");
        assert_eq!(oracle.calls(), 2);
        assert_eq!(cached.cache().len(), 2);
    }

    #[test]
    fn test_cached_oracle_does_not_store_failures() {
        let (_, oracle) = table();
        let cached = CachedOracle::new(&oracle, TtlCache::new(Duration::from_secs(60)));
        let unknown = [Point::new(50.0, 50.0)];
        assert!(cached.matrix(&unknown, false).is_err());
        assert!(cached.matrix(&unknown, false).is_err());
        assert_eq!(oracle.calls(), 2);
        assert!(cached.cache().is_empty());
    }

    #[test]
    fn test_expired_entry_recomputed() {
        let (pts, oracle) = table();
        let cached = CachedOracle::new(&oracle, TtlCache::new(Duration::ZERO));
        cached.matrix(&pts, false).expect("matrix");
        cached.matrix(&pts, false).expect("matrix");
        assert_eq!(oracle.calls(), 2);
    }
}
