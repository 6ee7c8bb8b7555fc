//! In-memory index cache keyed by collection fingerprint.
//!
//! A fingerprint is the SHA-256 of the serialized records and configuration,
//! so any change to either yields a different key and a fresh build. Entries
//! are evicted oldest-first once `capacity` is reached.

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::index::RecipeIndex;
use crate::recipe::Recipe;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Cache hit/miss counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Shared index cache
pub struct IndexCache {
    capacity: usize,
    entries: RwLock<VecDeque<(String, Arc<RecipeIndex>)>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl IndexCache {
    /// Create a cache holding at most `capacity` indexes.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: RwLock::new(VecDeque::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the cached index for this collection, building it on a miss.
    pub fn get_or_build(
        &self,
        records: &[Recipe],
        config: &SearchConfig,
    ) -> Result<Arc<RecipeIndex>> {
        let key = fingerprint(records, config)?;

        {
            let guard = self.entries.read().map_err(|_| {
                SearchError::Internal("Failed to acquire cache read lock".to_string())
            })?;
            if let Some((_, index)) = guard.iter().find(|(k, _)| *k == key) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(fingerprint = %&key[..12], "Index cache hit");
                return Ok(Arc::clone(index));
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let index = Arc::new(RecipeIndex::build(records, config)?);

        let mut guard = self
            .entries
            .write()
            .map_err(|_| SearchError::Internal("Failed to acquire cache write lock".to_string()))?;
        if !guard.iter().any(|(k, _)| *k == key) {
            while guard.len() >= self.capacity {
                guard.pop_front();
            }
            guard.push_back((key.clone(), Arc::clone(&index)));
        }
        debug!(fingerprint = %&key[..12], entries = guard.len(), "Index cache miss");

        Ok(index)
    }

    /// Drop every cached index.
    pub fn clear(&self) -> Result<()> {
        self.entries
            .write()
            .map_err(|_| SearchError::Internal("Failed to acquire cache write lock".to_string()))?
            .clear();
        Ok(())
    }

    /// Current counters.
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.read().map(|guard| guard.len()).unwrap_or(0);
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries,
        }
    }
}

/// Hex SHA-256 over the records and the configuration they are indexed with.
pub fn fingerprint(records: &[Recipe], config: &SearchConfig) -> Result<String> {
    let mut hasher = Sha256::new();
    hasher.update(serde_json::to_vec(config)?);
    hasher.update(serde_json::to_vec(records)?);
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Recipe> {
        vec![
            Recipe::new(1, "Falafel", "Crispy chickpea fritters"),
            Recipe::new(2, "Hummus", "Smooth chickpea dip"),
        ]
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let config = SearchConfig::default();
        let a = fingerprint(&records(), &config).unwrap();
        let b = fingerprint(&records(), &config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_fingerprint_changes_with_records() {
        let config = SearchConfig::default();
        let mut changed = records();
        changed[1].tags.push("dip".to_string());
        assert_ne!(
            fingerprint(&records(), &config).unwrap(),
            fingerprint(&changed, &config).unwrap()
        );
    }

    #[test]
    fn test_fingerprint_changes_with_config() {
        let mut config = SearchConfig::default();
        let before = fingerprint(&records(), &config).unwrap();
        config.matching.threshold = 0.2;
        assert_ne!(before, fingerprint(&records(), &config).unwrap());
    }

    #[test]
    fn test_hit_and_miss() {
        let cache = IndexCache::new(4);
        let config = SearchConfig::default();

        let first = cache.get_or_build(&records(), &config).unwrap();
        let second = cache.get_or_build(&records(), &config).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn test_mutation_forces_rebuild() {
        let cache = IndexCache::new(4);
        let config = SearchConfig::default();
        let mut records = records();

        let before = cache.get_or_build(&records, &config).unwrap();
        records.push(Recipe::new(3, "Tabbouleh", "Parsley salad"));
        let after = cache.get_or_build(&records, &config).unwrap();

        assert_eq!(before.len(), 2);
        assert_eq!(after.len(), 3);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_eviction() {
        let cache = IndexCache::new(1);
        let config = SearchConfig::default();
        let first = records();
        let second = vec![Recipe::new(9, "Pho", "Beef noodle soup")];

        cache.get_or_build(&first, &config).unwrap();
        cache.get_or_build(&second, &config).unwrap();
        cache.get_or_build(&first, &config).unwrap();

        let stats = cache.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.misses, 3);
    }

    #[test]
    fn test_clear() {
        let cache = IndexCache::new(2);
        cache.get_or_build(&records(), &SearchConfig::default()).unwrap();
        cache.clear().unwrap();
        assert_eq!(cache.stats().entries, 0);
    }
}
