//! WASM bindings for recipe search.

use crate::{Recipe, SearchEngine, SearchOptions};
use wasm_bindgen::prelude::*;

/// Search a JSON array of recipes.
///
/// # Arguments
/// * `records_json` - JSON array of recipe records
/// * `query` - Search query
/// * `options_json` - `{"limit": 10, "minScore": 0.1}`; empty string for defaults
///
/// # Returns
/// JSON array of matching recipes, best first. Invalid input yields `[]`.
#[wasm_bindgen]
pub fn search_recipes_json(records_json: &str, query: &str, options_json: &str) -> String {
    let Ok(records) = serde_json::from_str::<Vec<Recipe>>(records_json) else {
        return "[]".to_string();
    };
    let options = if options_json.trim().is_empty() {
        SearchOptions::default()
    } else {
        serde_json::from_str(options_json).unwrap_or_default()
    };

    SearchEngine::with_defaults()
        .search(&records, query, &options)
        .ok()
        .and_then(|hits| serde_json::to_string(&hits).ok())
        .unwrap_or_else(|| "[]".to_string())
}

/// Autocomplete suggestions as a JSON array of strings.
#[wasm_bindgen]
pub fn search_suggestions_json(records_json: &str, query: &str, limit: usize) -> String {
    let Ok(records) = serde_json::from_str::<Vec<Recipe>>(records_json) else {
        return "[]".to_string();
    };

    SearchEngine::with_defaults()
        .suggest(&records, query, Some(limit))
        .ok()
        .and_then(|suggestions| serde_json::to_string(&suggestions).ok())
        .unwrap_or_else(|| "[]".to_string())
}
