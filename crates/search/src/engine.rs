//! Caller-facing search entry points.

use crate::cache::{CacheStats, IndexCache};
use crate::config::SearchConfig;
use crate::error::Result;
use crate::filter::{filter_by_score, into_recipes};
use crate::index::RecipeIndex;
use crate::query::ScoredMatch;
use crate::recipe::Recipe;
use crate::suggest::{suggest, MIN_SUGGESTION_QUERY_CHARS};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Per-call search options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    /// Maximum number of results (configured default when `None`)
    #[serde(default)]
    pub limit: Option<usize>,
    /// Highest accepted score; lower scores are better
    #[serde(default)]
    pub min_score: Option<f64>,
}

impl SearchOptions {
    /// Options with every value defaulted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of results.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Drop results scoring worse than `min_score`.
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = Some(min_score);
        self
    }
}

/// Search front end holding a configuration and an optional index cache.
///
/// Without a cache every call builds a fresh index from the records it is
/// given. With one, unchanged collections reuse their index; results are
/// identical either way.
pub struct SearchEngine {
    config: SearchConfig,
    cache: Option<IndexCache>,
}

impl SearchEngine {
    /// Create an engine. The cache is enabled by `config.cache.enabled`.
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let cache = config
            .cache
            .enabled
            .then(|| IndexCache::new(config.cache.capacity));
        Ok(Self { config, cache })
    }

    /// Engine with default configuration and no cache.
    pub fn with_defaults() -> Self {
        Self {
            config: SearchConfig::default(),
            cache: None,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Cache counters, if caching is enabled.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(IndexCache::stats)
    }

    /// Build (or fetch) the index for a collection.
    pub fn index(&self, records: &[Recipe]) -> Result<Arc<RecipeIndex>> {
        match &self.cache {
            Some(cache) => cache.get_or_build(records, &self.config),
            None => Ok(Arc::new(RecipeIndex::build(records, &self.config)?)),
        }
    }

    /// Ranked, filtered matches with scores and match locations.
    ///
    /// A blank query yields no matches here; [`SearchEngine::search`] is the
    /// call that passes the whole collection through.
    pub fn search_scored(
        &self,
        records: &[Recipe],
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<ScoredMatch>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let index = self.index(records)?;
        let limit = options.limit.unwrap_or(self.config.defaults.limit);
        let matches = index.search(query, limit)?;
        Ok(filter_by_score(matches, options.min_score))
    }

    /// Records matching `query`, best first.
    ///
    /// A blank query returns every record in its original order.
    #[instrument(skip(self, records), fields(records = records.len()))]
    pub fn search(
        &self,
        records: &[Recipe],
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<Recipe>> {
        if query.trim().is_empty() {
            debug!("Blank query, returning full collection");
            return Ok(records.to_vec());
        }

        let matches = self.search_scored(records, query, options)?;
        Ok(into_recipes(records, &matches))
    }

    /// Autocomplete strings for `query` (configured default limit when `None`).
    #[instrument(skip(self, records), fields(records = records.len()))]
    pub fn suggest(
        &self,
        records: &[Recipe],
        query: &str,
        limit: Option<usize>,
    ) -> Result<Vec<String>> {
        if query.trim().chars().count() < MIN_SUGGESTION_QUERY_CHARS {
            return Ok(Vec::new());
        }
        let index = self.index(records)?;
        suggest(&index, query, limit.unwrap_or(self.config.defaults.suggestion_limit))
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Recipe> {
        vec![
            Recipe::new(1, "Mushroom Risotto", "Creamy arborio rice with porcini"),
            Recipe::new(2, "Wild Rice Salad", "Nutty grains and herbs"),
            Recipe::new(3, "Rice Pudding", "Baked with nutmeg"),
        ]
    }

    #[test]
    fn test_blank_query_passes_through() {
        let engine = SearchEngine::with_defaults();
        let records = records();
        assert_eq!(engine.search(&records, "", &SearchOptions::new()).unwrap(), records);
        let limited = SearchOptions::new().with_limit(1);
        assert_eq!(engine.search(&records, " \t", &limited).unwrap(), records);
    }

    #[test]
    fn test_blank_query_skips_validation() {
        let engine = SearchEngine::with_defaults();
        let broken = vec![Recipe::new(1, "", "")];
        assert_eq!(engine.search(&broken, "", &SearchOptions::new()).unwrap(), broken);
    }

    #[test]
    fn test_invalid_record_propagates() {
        let engine = SearchEngine::with_defaults();
        let broken = vec![Recipe::new(1, "", "")];
        assert!(engine.search(&broken, "rice", &SearchOptions::new()).is_err());
    }

    #[test]
    fn test_default_limit_from_config() {
        let mut config = SearchConfig::default();
        config.defaults.limit = 1;
        let engine = SearchEngine::new(config).unwrap();
        assert_eq!(engine.search(&records(), "rice", &SearchOptions::new()).unwrap().len(), 1);
    }

    #[test]
    fn test_cached_engine_matches_uncached() {
        let mut config = SearchConfig::default();
        config.cache.enabled = true;
        let cached = SearchEngine::new(config).unwrap();
        let plain = SearchEngine::with_defaults();
        let records = records();

        for query in ["rice", "nutmeg", "risoto", "herbs"] {
            let expected = plain.search(&records, query, &SearchOptions::new()).unwrap();
            assert_eq!(cached.search(&records, query, &SearchOptions::new()).unwrap(), expected);
            assert_eq!(cached.search(&records, query, &SearchOptions::new()).unwrap(), expected);
        }

        let stats = cached.cache_stats().unwrap();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 7);
    }

    #[test]
    fn test_suggest_short_query() {
        let engine = SearchEngine::with_defaults();
        assert!(engine.suggest(&records(), "r", None).unwrap().is_empty());
    }

    #[test]
    fn test_scored_matches_respect_cutoff() {
        let engine = SearchEngine::with_defaults();
        let options = SearchOptions::new().with_min_score(0.3);
        for m in engine.search_scored(&records(), "rice", &options).unwrap() {
            assert!(m.score <= 0.3);
        }
    }

    #[test]
    fn test_search_projects_scored_matches() {
        let engine = SearchEngine::with_defaults();
        let records = records();
        let options = SearchOptions::new().with_limit(2).with_min_score(0.3);

        let scored = engine.search_scored(&records, "rice", &options).unwrap();
        let hits = engine.search(&records, "rice", &options).unwrap();
        let expected: Vec<Recipe> = scored.iter().map(|m| records[m.index].clone()).collect();
        assert!(!hits.is_empty());
        assert_eq!(hits, expected);
    }
}
