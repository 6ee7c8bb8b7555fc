//! Autocomplete suggestions drawn from the best matches.

use crate::error::Result;
use crate::index::RecipeIndex;
use std::collections::HashSet;
use tracing::debug;

/// Shortest trimmed query that produces suggestions.
pub const MIN_SUGGESTION_QUERY_CHARS: usize = 2;

/// Matches fetched per requested suggestion, to survive deduplication.
const OVERFETCH_FACTOR: usize = 2;

/// Titles, tags and categories of the top matches that contain the query.
///
/// Values keep their original casing; the first occurrence of a string wins
/// and at most `limit` strings are returned.
pub fn suggest(index: &RecipeIndex, query: &str, limit: usize) -> Result<Vec<String>> {
    let query = query.trim();
    if query.chars().count() < MIN_SUGGESTION_QUERY_CHARS || limit == 0 {
        return Ok(Vec::new());
    }

    let needle = query.to_lowercase();
    let matches = index.search(query, limit.saturating_mul(OVERFETCH_FACTOR))?;

    let mut seen = HashSet::new();
    let mut suggestions = Vec::new();

    for m in &matches {
        let Some(document) = index.document(m.index) else {
            continue;
        };
        let recipe = &document.recipe;

        let title = document
            .title_lower
            .contains(&needle)
            .then_some(&recipe.title);
        let tags = recipe.tags.iter().filter(|tag| tag.to_lowercase().contains(&needle));
        let categories = recipe
            .categories
            .iter()
            .filter(|category| category.to_lowercase().contains(&needle));

        for candidate in title.into_iter().chain(tags).chain(categories) {
            if seen.insert(candidate.as_str()) {
                suggestions.push(candidate.clone());
            }
        }
    }

    suggestions.truncate(limit);
    debug!(matches = matches.len(), suggestions = suggestions.len(), "Suggestions extracted");
    Ok(suggestions)
}
