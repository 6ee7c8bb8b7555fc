//! Search command - rank recipes against a query

use super::{load_config, load_recipes};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use pantry_cli::output::{self, Status};
use pantry_search::filter::into_recipes;
use pantry_search::{Recipe, ScoredMatch, SearchEngine, SearchOptions};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Options from the command line.
pub struct Flags {
    pub limit: Option<usize>,
    pub min_score: Option<f64>,
    pub extended: bool,
    pub json: bool,
    pub scores: bool,
}

#[derive(Serialize)]
struct JsonHit<'a> {
    recipe: &'a Recipe,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matches: Option<&'a ScoredMatch>,
}

/// Run a search and print the ranked results
pub fn run(config: Option<&Path>, file: &Path, query: &str, flags: Flags) -> Result<()> {
    let mut config = load_config(config)?;
    if flags.extended {
        config.matching.extended = true;
    }
    let options = SearchOptions {
        limit: flags.limit,
        min_score: flags.min_score,
    };

    let engine = SearchEngine::new(config).context("Invalid search configuration")?;
    let records = load_recipes(file)?;

    pantry_telemetry::metrics().increment("searches");
    let (recipes, matches) = {
        pantry_telemetry::timed_span!("search_ms", query = %query);

        if query.trim().is_empty() {
            (engine.search(&records, query, &options)?, Vec::new())
        } else {
            let matches = engine.search_scored(&records, query, &options)?;
            (into_recipes(&records, &matches), matches)
        }
    };
    debug!(hits = recipes.len(), "Search finished");

    let scored: Vec<Option<&ScoredMatch>> = (0..recipes.len()).map(|i| matches.get(i)).collect();

    if flags.json {
        let hits: Vec<JsonHit> = recipes
            .iter()
            .zip(scored.iter().copied())
            .map(|(recipe, m)| JsonHit {
                recipe,
                score: m.filter(|_| flags.scores).map(|m| m.score),
                matches: m.filter(|_| flags.scores),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    if recipes.is_empty() {
        Status::info(&format!("No recipes match {}", query.bold()));
        return Ok(());
    }

    let hits: Vec<(Recipe, Option<&ScoredMatch>)> = recipes.into_iter().zip(scored).collect();
    output::print_hits(&hits, flags.scores);
    println!();
    Status::success(&format!(
        "{} of {}",
        output::format_count(hits.len(), "match", "matches"),
        output::format_count(records.len(), "recipe", "recipes")
    ));

    Ok(())
}
