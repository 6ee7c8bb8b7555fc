//! Index construction.

use crate::config::SearchConfig;
use crate::error::Result;
use crate::normalize::{FieldKey, SearchDocument};
use crate::recipe::Recipe;
use tracing::{debug, instrument};

/// Number of indexed fields per document.
pub const FIELD_COUNT: usize = FieldKey::ALL.len();

/// One indexed document with the length norm of each non-blank field.
#[derive(Debug, Clone)]
pub(crate) struct IndexEntry {
    pub(crate) document: SearchDocument,
    /// `None` for blank fields, which are never matched
    pub(crate) norms: [Option<f64>; FIELD_COUNT],
}

/// An immutable fuzzy index over a snapshot of a recipe collection.
///
/// Documents are copied at build time, so later changes to the source
/// collection are not observed. Rebuild to pick them up.
#[derive(Debug, Clone)]
pub struct RecipeIndex {
    pub(crate) entries: Vec<IndexEntry>,
    pub(crate) weights: [f64; FIELD_COUNT],
    pub(crate) config: SearchConfig,
}

impl RecipeIndex {
    /// Normalize and index every record.
    ///
    /// An empty collection gives an empty index. A record without a title or
    /// description fails the whole build.
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn build(records: &[Recipe], config: &SearchConfig) -> Result<Self> {
        config.validate()?;

        let documents = normalize_all(records)?;
        let entries: Vec<IndexEntry> = documents
            .into_iter()
            .map(|document| {
                let norms = FieldKey::ALL.map(|key| field_norm(document.field(key)));
                IndexEntry { document, norms }
            })
            .collect();

        let weights = FieldKey::ALL.map(|key| config.weights.normalized(key));

        debug!(documents = entries.len(), "Built recipe index");

        Ok(Self {
            entries,
            weights,
            config: config.clone(),
        })
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no documents.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Document at a collection position.
    pub fn document(&self, index: usize) -> Option<&SearchDocument> {
        self.entries.get(index).map(|entry| &entry.document)
    }

    /// All documents in collection order.
    pub fn documents(&self) -> impl Iterator<Item = &SearchDocument> {
        self.entries.iter().map(|entry| &entry.document)
    }

    /// Configuration the index was built with.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Normalized weight of a field.
    pub fn weight(&self, key: FieldKey) -> f64 {
        self.weights[key as usize]
    }

    /// How many documents have a non-blank value for each field.
    pub fn field_coverage(&self) -> [(FieldKey, usize); FIELD_COUNT] {
        FieldKey::ALL.map(|key| {
            let count = self
                .entries
                .iter()
                .filter(|entry| entry.norms[key as usize].is_some())
                .count();
            (key, count)
        })
    }
}

fn normalize_all(records: &[Recipe]) -> Result<Vec<SearchDocument>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        records.par_iter().map(SearchDocument::from_recipe).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        records.iter().map(SearchDocument::from_recipe).collect()
    }
}

/// Field-length norm: `1 / sqrt(word_count)`, rounded to three decimals.
/// Blank fields are not indexed.
pub fn field_norm(text: &str) -> Option<f64> {
    let tokens = text.split_whitespace().count();
    if tokens == 0 {
        return None;
    }
    let norm = 1.0 / (tokens as f64).sqrt();
    Some((norm * 1000.0).round() / 1000.0)
}
