//! Search configuration.
//!
//! Every value has a default, so an empty or partial TOML file is valid:
//!
//! ```toml
//! [weights]
//! title = 0.5
//!
//! [matching]
//! threshold = 0.25
//! extended = true
//! ```

use crate::error::{Result, SearchError};
use crate::normalize::FieldKey;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of results returned by a search.
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

/// Default number of autocomplete suggestions.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Root configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SearchConfig {
    #[serde(default)]
    pub weights: FieldWeights,

    #[serde(default)]
    pub matching: MatchOptions,

    #[serde(default)]
    pub defaults: QueryDefaults,

    #[serde(default)]
    pub cache: CacheConfig,
}

impl SearchConfig {
    /// Load configuration from an explicit path, a well-known file, or defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map(Path::to_path_buf).or_else(find_config_file);

        let config = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => Self::default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| SearchError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges and the relative ordering of field weights.
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;

        let m = &self.matching;
        if !(0.0..=1.0).contains(&m.threshold) {
            return Err(SearchError::Config(format!(
                "matching.threshold must be within 0.0..=1.0, got {}",
                m.threshold
            )));
        }
        if m.min_match_char_length == 0 {
            return Err(SearchError::Config(
                "matching.min_match_char_length must be at least 1".to_string(),
            ));
        }
        if self.defaults.limit == 0 || self.defaults.suggestion_limit == 0 {
            return Err(SearchError::Config("defaults limits must be positive".to_string()));
        }
        if self.cache.enabled && self.cache.capacity == 0 {
            return Err(SearchError::Config(
                "cache.capacity must be positive when the cache is enabled".to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-field relevance weights.
///
/// Weights are relative: they are divided by their sum when an index is
/// built. The ordering title ≥ description ≥ ingredients ≥ tags ≥ category is
/// enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldWeights {
    #[serde(default = "default_title_weight")]
    pub title: f64,

    #[serde(default = "default_description_weight")]
    pub description: f64,

    #[serde(default = "default_ingredients_weight")]
    pub ingredients: f64,

    #[serde(default = "default_tags_weight")]
    pub tags: f64,

    #[serde(default = "default_category_weight")]
    pub category: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            title: default_title_weight(),
            description: default_description_weight(),
            ingredients: default_ingredients_weight(),
            tags: default_tags_weight(),
            category: default_category_weight(),
        }
    }
}

impl FieldWeights {
    /// Raw weight of a field.
    pub fn get(&self, key: FieldKey) -> f64 {
        match key {
            FieldKey::Title => self.title,
            FieldKey::Description => self.description,
            FieldKey::Ingredients => self.ingredients,
            FieldKey::Tags => self.tags,
            FieldKey::Category => self.category,
        }
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        FieldKey::ALL.iter().map(|key| self.get(*key)).sum()
    }

    /// Weight of a field divided by the total.
    pub fn normalized(&self, key: FieldKey) -> f64 {
        self.get(key) / self.total()
    }

    fn validate(&self) -> Result<()> {
        for key in FieldKey::ALL {
            let weight = self.get(key);
            if !weight.is_finite() || weight < 0.0 {
                return Err(SearchError::Config(format!(
                    "weights.{} must be a non-negative number, got {}",
                    key, weight
                )));
            }
        }
        if self.total() <= 0.0 {
            return Err(SearchError::Config(
                "at least one field weight must be positive".to_string(),
            ));
        }
        for pair in FieldKey::ALL.windows(2) {
            if self.get(pair[0]) < self.get(pair[1]) {
                return Err(SearchError::Config(format!(
                    "weights.{} ({}) must not be lower than weights.{} ({})",
                    pair[0],
                    self.get(pair[0]),
                    pair[1],
                    self.get(pair[1])
                )));
            }
        }
        Ok(())
    }
}

fn default_title_weight() -> f64 {
    0.40
}

fn default_description_weight() -> f64 {
    0.30
}

fn default_ingredients_weight() -> f64 {
    0.15
}

fn default_tags_weight() -> f64 {
    0.10
}

fn default_category_weight() -> f64 {
    0.05
}

/// Fuzzy matching tolerances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Highest accepted dissimilarity (0 = exact, 1 = anything)
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// How far from `location` a match may travel before it is fully penalized
    #[serde(default = "default_distance")]
    pub distance: usize,

    /// Expected match position, used only when `ignore_location` is off
    #[serde(default)]
    pub location: usize,

    /// Shortest matched run that counts
    #[serde(default = "default_min_match_char_length")]
    pub min_match_char_length: usize,

    /// Score matches regardless of where they sit in the field
    #[serde(default = "default_true")]
    pub ignore_location: bool,

    /// Keep scanning the whole field after a good match
    #[serde(default = "default_true")]
    pub find_all_matches: bool,

    /// Parse `=`, `'`, `!`, `^`, `$` and `|` operators in queries
    #[serde(default)]
    pub extended: bool,

    /// Weigh fields by weight alone; when off, short fields count for more
    #[serde(default = "default_true")]
    pub ignore_field_norm: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            distance: default_distance(),
            location: 0,
            min_match_char_length: default_min_match_char_length(),
            ignore_location: true,
            find_all_matches: true,
            extended: false,
            ignore_field_norm: true,
        }
    }
}

fn default_threshold() -> f64 {
    0.3
}

fn default_distance() -> usize {
    100
}

fn default_min_match_char_length() -> usize {
    2
}

fn default_true() -> bool {
    true
}

/// Limits applied when the caller does not give one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDefaults {
    #[serde(default = "default_limit")]
    pub limit: usize,

    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            suggestion_limit: default_suggestion_limit(),
        }
    }
}

fn default_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

fn default_suggestion_limit() -> usize {
    DEFAULT_SUGGESTION_LIMIT
}

/// Index cache settings for [`crate::SearchEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Reuse built indexes for unchanged collections
    #[serde(default)]
    pub enabled: bool,

    /// Number of indexes kept before the oldest is evicted
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            capacity: default_cache_capacity(),
        }
    }
}

fn default_cache_capacity() -> usize {
    8
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = [".pantry.toml", "pantry.toml", ".config/pantry.toml"];

    candidates
        .into_iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<SearchConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SearchError::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;

    toml::from_str(&content).map_err(|e| {
        SearchError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
    })
}
