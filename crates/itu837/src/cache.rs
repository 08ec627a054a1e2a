//! Memoization of query results.
//!
//! Queries are pure functions of (version, operation, points), so results
//! are kept for the lifetime of the cache without eviction. Keys compare
//! coordinates bit-for-bit after longitude wrapping.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use serde::Serialize;
use tracing::{debug, trace};

use crate::values::{OutputShape, PreparedQuery, Values};
use crate::version::ModelVersion;

/// Which query produced a cached result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryOp {
    Probability,
    /// Rainfall rate at an exceedance percentage, stored as raw bits.
    Rate { p_bits: u64 },
}

impl QueryOp {
    pub fn rate(p: f64) -> Self {
        Self::Rate { p_bits: p.to_bits() }
    }
}

/// Cache key for a single query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    version: ModelVersion,
    op: QueryOp,
    lats: Vec<u64>,
    lons: Vec<u64>,
    shape: OutputShape,
}

impl QueryKey {
    pub fn new(version: ModelVersion, op: QueryOp, query: &PreparedQuery) -> Self {
        Self {
            version,
            op,
            lats: query.lats.iter().map(|x| x.to_bits()).collect(),
            lons: query.lons.iter().map(|x| x.to_bits()).collect(),
            shape: query.shape.clone(),
        }
    }

    pub fn version(&self) -> ModelVersion {
        self.version
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

impl CacheStats {
    /// Calculate the cache hit rate (0.0 - 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Thread-safe result cache.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: RwLock<HashMap<QueryKey, Values>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached result, counting the hit or miss.
    pub fn get(&self, key: &QueryKey) -> Option<Values> {
        let found = self
            .entries
            .read()
            .ok()
            .and_then(|entries| entries.get(key).cloned());

        match found {
            Some(values) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                trace!(version = %key.version, op = ?key.op, "Query cache hit");
                Some(values)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store a result unless another caller stored one first.
    ///
    /// Returns the value held by the cache afterwards.
    pub fn insert(&self, key: QueryKey, values: Values) -> Values {
        let Ok(mut entries) = self.entries.write() else {
            return values;
        };
        entries.entry(key).or_insert(values).clone()
    }

    /// Return the cached result for `key`, computing it on a miss.
    ///
    /// Errors are returned to the caller and never cached.
    pub fn get_or_try_insert<E>(
        &self,
        key: QueryKey,
        compute: impl FnOnce() -> Result<Values, E>,
    ) -> Result<Values, E> {
        if let Some(values) = self.get(&key) {
            return Ok(values);
        }
        let values = compute()?;
        Ok(self.insert(key, values))
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    /// Remove all entries; counters are kept.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            let removed = entries.len();
            entries.clear();
            debug!(removed, "Cleared query cache");
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(lats: Vec<f64>, lons: Vec<f64>) -> PreparedQuery {
        PreparedQuery::new(&lats.into(), &lons.into()).unwrap()
    }

    #[test]
    fn test_get_or_insert() {
        let cache = QueryCache::new();
        let key = QueryKey::new(ModelVersion::V6, QueryOp::Probability, &query(vec![1.0], vec![2.0]));

        let first: Result<Values, ()> =
            cache.get_or_try_insert(key.clone(), || Ok(Values::Sequence(vec![0.5])));
        assert_eq!(first.unwrap(), Values::Sequence(vec![0.5]));

        let second: Result<Values, ()> =
            cache.get_or_try_insert(key, || panic!("computed twice"));
        assert_eq!(second.unwrap(), Values::Sequence(vec![0.5]));

        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses, stats.entries), (1, 1, 1));
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn test_errors_not_cached() {
        let cache = QueryCache::new();
        let key = QueryKey::new(ModelVersion::V6, QueryOp::Probability, &query(vec![1.0], vec![2.0]));

        let result: Result<Values, &str> = cache.get_or_try_insert(key, || Err("boom"));
        assert!(result.is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_keys_distinguish_version_and_op() {
        let q = query(vec![1.0, 2.0], vec![3.0, 4.0]);
        let base = QueryKey::new(ModelVersion::V6, QueryOp::Probability, &q);

        assert_ne!(base, QueryKey::new(ModelVersion::V5, QueryOp::Probability, &q));
        assert_ne!(base, QueryKey::new(ModelVersion::V6, QueryOp::rate(0.01), &q));
        assert_ne!(
            QueryKey::new(ModelVersion::V6, QueryOp::rate(0.01), &q),
            QueryKey::new(ModelVersion::V6, QueryOp::rate(0.1), &q)
        );
    }

    #[test]
    fn test_wrapped_longitudes_share_key() {
        let a = query(vec![10.0], vec![370.0]);
        let b = query(vec![10.0], vec![10.0]);
        assert_eq!(
            QueryKey::new(ModelVersion::V6, QueryOp::Probability, &a),
            QueryKey::new(ModelVersion::V6, QueryOp::Probability, &b)
        );
    }

    #[test]
    fn test_clear() {
        let cache = QueryCache::new();
        let key = QueryKey::new(ModelVersion::V6, QueryOp::Probability, &query(vec![1.0], vec![2.0]));
        cache.insert(key, Values::Scalar(1.0));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
