//! Where recipe collections come from.
//!
//! The engine never fetches records itself; callers load a snapshot through a
//! [`RecipeSource`] and pass it to the search functions.

use crate::error::Result;
use crate::recipe::Recipe;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Supplies the full current recipe collection.
pub trait RecipeSource {
    /// Load every recipe.
    fn load_recipes(&self) -> Result<Vec<Recipe>>;
}

/// Serves a fixed in-memory collection.
#[derive(Debug, Clone, Default)]
pub struct VecSource {
    recipes: Vec<Recipe>,
}

impl VecSource {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }
}

impl RecipeSource for VecSource {
    fn load_recipes(&self) -> Result<Vec<Recipe>> {
        Ok(self.recipes.clone())
    }
}

/// Reads a JSON export: either a bare array or `{"recipes": [...]}`.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Export {
    List(Vec<Recipe>),
    Wrapped { recipes: Vec<Recipe> },
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecipeSource for JsonFileSource {
    fn load_recipes(&self) -> Result<Vec<Recipe>> {
        let content = std::fs::read_to_string(&self.path)?;
        let recipes = match serde_json::from_str(&content)? {
            Export::List(recipes) | Export::Wrapped { recipes } => recipes,
        };
        debug!(path = %self.path.display(), count = recipes.len(), "Loaded recipes");
        Ok(recipes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use std::io::Write;

    #[test]
    fn test_vec_source() {
        let source = VecSource::new(vec![Recipe::new(1, "Dal", "Lentils")]);
        assert_eq!(source.load_recipes().unwrap().len(), 1);
    }

    #[test]
    fn test_json_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 1, "title": "Dal", "description": "Lentils", "tags": ["indian"]}}]"#
        )
        .unwrap();

        let recipes = JsonFileSource::new(file.path()).load_recipes().unwrap();
        assert_eq!(recipes[0].tags, vec!["indian"]);
    }

    #[test]
    fn test_json_wrapped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"recipes": [{{"id": "a", "title": "Dal", "description": "Lentils"}}]}}"#
        )
        .unwrap();

        let recipes = JsonFileSource::new(file.path()).load_recipes().unwrap();
        assert_eq!(recipes.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = JsonFileSource::new("/nonexistent/recipes.json").load_recipes().unwrap_err();
        assert!(matches!(err, SearchError::Io(_)));
    }

    #[test]
    fn test_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = JsonFileSource::new(file.path()).load_recipes().unwrap_err();
        assert!(matches!(err, SearchError::Json(_)));
    }
}
