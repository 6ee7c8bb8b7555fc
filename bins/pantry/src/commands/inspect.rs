//! Inspect command - summarize how a collection indexes

use super::{load_config, load_recipes};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use pantry_cli::output::{self, Status};
use pantry_search::cache::fingerprint;
use pantry_search::RecipeIndex;
use pantry_telemetry::Timer;
use std::path::Path;

/// Print record count, fingerprint and per-field coverage
pub fn run(config: Option<&Path>, file: &Path, json: bool) -> Result<()> {
    let config = load_config(config)?;
    let records = load_recipes(file)?;

    let timer = Timer::start("build_ms");
    let index = RecipeIndex::build(&records, &config).context("Failed to index recipes")?;
    let build_time = timer.stop();
    let fingerprint = fingerprint(&records, &config)?;
    let coverage = index.field_coverage();

    if json {
        let fields: serde_json::Map<String, serde_json::Value> = coverage
            .iter()
            .map(|(key, count)| {
                (
                    key.to_string(),
                    serde_json::json!({ "indexed": count, "weight": index.weight(*key) }),
                )
            })
            .collect();
        let summary = serde_json::json!({
            "records": index.len(),
            "fingerprint": fingerprint,
            "build_ms": build_time.as_secs_f64() * 1000.0,
            "fields": fields,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    Status::header(&format!("Index of {}", file.display()));
    println!("  Records:     {}", index.len());
    println!("  Fingerprint: {}", fingerprint.dimmed());
    println!("  Built in:    {}", output::format_duration(build_time));
    println!();
    for (key, count) in coverage {
        println!(
            "  {:<12} {:>6}  weight {:.2}",
            key.as_str(),
            output::format_count(count, "doc", "docs"),
            index.weight(key)
        );
    }

    Ok(())
}
