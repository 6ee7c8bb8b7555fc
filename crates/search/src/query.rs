//! Query execution and ranking.

use crate::config::MatchOptions;
use crate::error::Result;
use crate::extended::ExtendedPattern;
use crate::fuzzy::{BitapPattern, Matcher};
use crate::index::{IndexEntry, RecipeIndex};
use crate::normalize::FieldKey;
use serde::Serialize;
use tracing::{debug, instrument};

/// Where a query hit inside one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMatch {
    /// Field that matched
    pub field: FieldKey,
    /// Field-level score (lower is better)
    pub score: f64,
    /// Inclusive character ranges within the lowercased field text
    pub indices: Vec<(usize, usize)>,
}

/// A ranked hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMatch {
    /// Position of the record in the indexed collection
    pub index: usize,
    /// Combined relevance score (0 = perfect, lower is better)
    pub score: f64,
    /// Per-field details, in field weight order
    pub matches: Vec<FieldMatch>,
}

/// Compile a query into the matcher configured by `options`.
pub fn compile(query: &str, options: &MatchOptions) -> Result<Box<dyn Matcher>> {
    if options.extended {
        Ok(Box::new(ExtendedPattern::parse(query, options)?))
    } else {
        Ok(Box::new(BitapPattern::new(query, options)))
    }
}

impl RecipeIndex {
    /// Rank documents against `query`, best first, keeping at most `limit`.
    ///
    /// The query is trimmed; a blank query matches nothing. Ties keep
    /// collection order.
    #[instrument(skip(self), fields(documents = self.len()))]
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<ScoredMatch>> {
        let query = query.trim();
        if query.is_empty() || limit == 0 || self.is_empty() {
            return Ok(Vec::new());
        }

        let matcher = compile(query, &self.config.matching)?;
        let matcher = matcher.as_ref();
        let use_norm = !self.config.matching.ignore_field_norm;

        #[cfg(feature = "parallel")]
        let mut results: Vec<ScoredMatch> = {
            use rayon::prelude::*;
            self.entries
                .par_iter()
                .enumerate()
                .filter_map(|(index, entry)| {
                    score_entry(index, entry, matcher, &self.weights, use_norm)
                })
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let mut results: Vec<ScoredMatch> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                score_entry(index, entry, matcher, &self.weights, use_norm)
            })
            .collect();

        let total = results.len();
        results.sort_by(|a, b| a.score.total_cmp(&b.score).then(a.index.cmp(&b.index)));
        results.truncate(limit);

        debug!(matched = total, returned = results.len(), "Query ranked");
        Ok(results)
    }
}

/// Score one document: the product over matched fields of `score ^ weight`,
/// or `score ^ (weight * norm)` with `use_norm`. Unmatched documents yield
/// `None`.
fn score_entry(
    index: usize,
    entry: &IndexEntry,
    matcher: &dyn Matcher,
    weights: &[f64],
    use_norm: bool,
) -> Option<ScoredMatch> {
    let mut matches = Vec::new();
    let mut total = 1.0_f64;

    for key in FieldKey::ALL {
        let Some(norm) = entry.norms[key as usize] else {
            continue;
        };

        let result = matcher.search(entry.document.field(key));
        if !result.is_match {
            continue;
        }

        let weight = weights[key as usize];
        let base = if result.score == 0.0 && weight > 0.0 {
            f64::EPSILON
        } else {
            result.score
        };
        let exponent = if use_norm { weight * norm } else { weight };
        total *= base.powf(exponent);

        matches.push(FieldMatch {
            field: key,
            score: result.score,
            indices: result.indices,
        });
    }

    (!matches.is_empty()).then_some(ScoredMatch {
        index,
        score: total,
        matches,
    })
}
