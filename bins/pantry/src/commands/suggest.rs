//! Suggest command - autocomplete from titles, tags and categories

use super::{load_config, load_recipes};
use anyhow::{Context, Result};
use pantry_cli::output::{self, Status};
use pantry_search::SearchEngine;
use std::path::Path;

/// Print suggestions for a partial query
pub fn run(
    config: Option<&Path>,
    file: &Path,
    query: &str,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let engine = SearchEngine::new(load_config(config)?).context("Invalid search configuration")?;
    let records = load_recipes(file)?;

    pantry_telemetry::metrics().increment("suggestions");
    let suggestions = {
        pantry_telemetry::timed_span!("suggest_ms");
        engine.suggest(&records, query, limit)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
    } else if suggestions.is_empty() {
        Status::info("No suggestions");
    } else {
        output::print_suggestions(&suggestions);
    }

    Ok(())
}
