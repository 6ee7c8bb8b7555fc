//! In-memory fuzzy recipe search for Pantry.
//!
//! This crate provides:
//! - Field normalization of recipe records into lowercase search documents
//! - A weighted multi-field fuzzy index (Bitap matching, optional field-length norms)
//! - Ranked queries with score cutoffs and an optional extended syntax
//! - Autocomplete suggestions from titles, tags and categories
//! - An opt-in index cache keyed by collection fingerprint
//!
//! # Example
//!
//! ```
//! use pantry_search::{get_search_suggestions, search_recipes, Recipe, SearchOptions};
//!
//! let recipes = vec![
//!     Recipe::new(1, "Chocolate Chip Cookies", "Chewy and buttery"),
//!     Recipe::new(2, "Fudgy Brownies", "Dense squares of dark chocolate"),
//! ];
//!
//! let hits = search_recipes(&recipes, "chocolate", &SearchOptions::new().with_limit(10)).unwrap();
//! assert_eq!(hits[0].title, "Chocolate Chip Cookies");
//!
//! let suggestions = get_search_suggestions(&recipes, "choc", 5).unwrap();
//! assert_eq!(suggestions, vec!["Chocolate Chip Cookies"]);
//! ```

pub mod cache;
pub mod config;
mod engine;
pub mod error;
pub mod extended;
pub mod filter;
pub mod fuzzy;
pub mod index;
pub mod normalize;
pub mod query;
mod recipe;
pub mod source;
pub mod suggest;

#[cfg(feature = "wasm")]
mod wasm;

pub use cache::{CacheStats, IndexCache};
pub use config::{SearchConfig, DEFAULT_SEARCH_LIMIT, DEFAULT_SUGGESTION_LIMIT};
pub use engine::{SearchEngine, SearchOptions};
pub use error::{Result, SearchError};
pub use index::RecipeIndex;
pub use normalize::{FieldKey, SearchDocument};
pub use query::{FieldMatch, ScoredMatch};
pub use recipe::{Ingredient, Recipe, RecipeId, StructuredIngredient};
pub use source::{JsonFileSource, RecipeSource, VecSource};

/// Search `records` with the default configuration, rebuilding the index.
///
/// A blank query returns `records` unchanged and in order.
pub fn search_recipes(
    records: &[Recipe],
    query: &str,
    options: &SearchOptions,
) -> Result<Vec<Recipe>> {
    SearchEngine::with_defaults().search(records, query, options)
}

/// Autocomplete suggestions with the default configuration.
///
/// Queries shorter than two characters give no suggestions.
pub fn get_search_suggestions(
    records: &[Recipe],
    query: &str,
    limit: usize,
) -> Result<Vec<String>> {
    SearchEngine::with_defaults().suggest(records, query, Some(limit))
}
