//! Post-query filtering and projection back to records.

use crate::query::ScoredMatch;
use crate::recipe::Recipe;

/// Drop matches scoring worse (higher) than `max_score`. `None` keeps all.
pub fn filter_by_score(matches: Vec<ScoredMatch>, max_score: Option<f64>) -> Vec<ScoredMatch> {
    match max_score {
        Some(cutoff) => matches.into_iter().filter(|m| m.score <= cutoff).collect(),
        None => matches,
    }
}

/// Records for ranked matches, in ranked order.
///
/// `records` must be the collection the matches were ranked over.
pub fn into_recipes(records: &[Recipe], matches: &[ScoredMatch]) -> Vec<Recipe> {
    matches
        .iter()
        .filter_map(|m| records.get(m.index))
        .cloned()
        .collect()
}
