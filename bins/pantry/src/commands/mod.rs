//! CLI command implementations

pub mod inspect;
pub mod search;
pub mod suggest;

use anyhow::{Context, Result};
use pantry_search::{JsonFileSource, Recipe, RecipeSource, SearchConfig};
use std::path::Path;

/// Load configuration from `--config`, a well-known file, or defaults.
pub fn load_config(path: Option<&Path>) -> Result<SearchConfig> {
    SearchConfig::load(path).context("Failed to load search configuration")
}

/// Read the recipe export at `file`.
pub fn load_recipes(file: &Path) -> Result<Vec<Recipe>> {
    let _timer = pantry_telemetry::Timer::start("load_ms");
    let recipes = JsonFileSource::new(file)
        .load_recipes()
        .with_context(|| format!("Failed to read recipes from {}", file.display()))?;
    pantry_telemetry::metrics().increment_by("recipes_loaded", recipes.len() as u64);
    Ok(recipes)
}
