//! Recipe records as handed over by the data layer.
//!
//! Records are consumed read-only. Optional fields are deserialized leniently:
//! a `tags` value that is not a list, or a `prologue` that is not a string,
//! degrades to an empty value instead of failing the whole collection.
//! Fields this crate does not know about are kept in [`Recipe::extra`] so a
//! record survives a trip through the engine unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Stable record identifier (numeric primary key or opaque string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeId {
    /// Numeric identifier
    Number(i64),
    /// String identifier (UUID, slug-like key)
    Text(String),
}

impl Default for RecipeId {
    fn default() -> Self {
        RecipeId::Text(String::new())
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipeId::Number(n) => write!(f, "{}", n),
            RecipeId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RecipeId {
    fn from(value: i64) -> Self {
        RecipeId::Number(value)
    }
}

impl From<i32> for RecipeId {
    fn from(value: i32) -> Self {
        RecipeId::Number(i64::from(value))
    }
}

impl From<&str> for RecipeId {
    fn from(value: &str) -> Self {
        RecipeId::Text(value.to_string())
    }
}

/// Structured ingredient entry (`{"name": "flour", "amount": "200g"}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredIngredient {
    /// Ingredient name, the only part that is searched
    pub name: String,
    /// Quantities, units, notes
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// An ingredient line in either of the shapes the data layer produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ingredient {
    /// Plain text line
    Name(String),
    /// Object with a `name` field
    Structured(StructuredIngredient),
    /// Anything else; searched as empty text
    Other(Value),
}

impl Ingredient {
    /// Text used for searching.
    pub fn name(&self) -> &str {
        match self {
            Ingredient::Name(name) => name,
            Ingredient::Structured(entry) => &entry.name,
            Ingredient::Other(_) => "",
        }
    }
}

impl From<&str> for Ingredient {
    fn from(value: &str) -> Self {
        Ingredient::Name(value.to_string())
    }
}

/// A recipe record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Stable identifier
    #[serde(default)]
    pub id: RecipeId,
    /// URL-safe slug
    #[serde(default)]
    pub slug: String,
    /// Title (mandatory)
    #[serde(default)]
    pub title: String,
    /// Description (mandatory)
    #[serde(default)]
    pub description: String,
    /// Free-text introduction shown above the recipe
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub prologue: Option<String>,
    /// Ingredient lines
    #[serde(default, deserialize_with = "lenient_ingredients")]
    pub ingredients: Vec<Ingredient>,
    /// Tags
    #[serde(default, deserialize_with = "lenient_strings")]
    pub tags: Vec<String>,
    /// Categories
    #[serde(default, deserialize_with = "lenient_strings")]
    pub categories: Vec<String>,
    /// Dietary labels (vegan, gluten-free, ...)
    #[serde(default, deserialize_with = "lenient_strings")]
    pub dietary_types: Vec<String>,
    /// Every other field of the record, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Recipe {
    /// Create a record with the mandatory fields set.
    pub fn new(
        id: impl Into<RecipeId>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let title = title.into();
        Self {
            id: id.into(),
            slug: slugify(&title),
            title,
            description: description.into(),
            ..Self::default()
        }
    }

    /// Set the prologue.
    pub fn with_prologue(mut self, prologue: impl Into<String>) -> Self {
        self.prologue = Some(prologue.into());
        self
    }

    /// Set the ingredient list.
    pub fn with_ingredients<I, T>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Ingredient>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    /// Set the tags.
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the categories.
    pub fn with_categories<I, T>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Set the dietary labels.
    pub fn with_dietary_types<I, T>(mut self, dietary_types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.dietary_types = dietary_types.into_iter().map(Into::into).collect();
        self
    }
}

fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Value::String(s) if !s.is_empty() => vec![s],
        _ => Vec::new(),
    })
}

fn lenient_ingredients<'de, D>(deserializer: D) -> Result<Vec<Ingredient>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(serde::de::Error::custom))
            .collect(),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_mixed_ingredients() {
        let recipe: Recipe = serde_json::from_value(json!({
            "id": 7,
            "slug": "pancakes",
            "title": "Pancakes",
            "description": "Fluffy",
            "ingredients": ["flour", {"name": "milk", "amount": "300ml"}, 12],
            "tags": ["breakfast"],
            "categories": ["Brunch"],
            "dietaryTypes": ["vegetarian"]
        }))
        .unwrap();

        assert_eq!(recipe.id, RecipeId::Number(7));
        let names: Vec<&str> = recipe.ingredients.iter().map(Ingredient::name).collect();
        assert_eq!(names, vec!["flour", "milk", ""]);
        assert_eq!(recipe.dietary_types, vec!["vegetarian"]);
    }

    #[test]
    fn test_malformed_optional_fields_degrade() {
        let recipe: Recipe = serde_json::from_value(json!({
            "id": "abc",
            "title": "Soup",
            "description": "Warm",
            "prologue": 5,
            "ingredients": null,
            "tags": [1, "winter"],
            "categories": "Soups"
        }))
        .unwrap();

        assert!(recipe.prologue.is_none());
        assert!(recipe.ingredients.is_empty());
        assert_eq!(recipe.tags, vec!["winter"]);
        assert_eq!(recipe.categories, vec!["Soups"]);
        assert!(recipe.dietary_types.is_empty());
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let input = json!({
            "id": 1,
            "slug": "toast",
            "title": "Toast",
            "description": "Bread, heated",
            "imageUrl": "https://cdn.example/toast.jpg",
            "published": true
        });
        let recipe: Recipe = serde_json::from_value(input).unwrap();
        assert_eq!(recipe.extra.get("published"), Some(&json!(true)));

        let back = serde_json::to_value(&recipe).unwrap();
        assert_eq!(back["imageUrl"], json!("https://cdn.example/toast.jpg"));
        let again: Recipe = serde_json::from_value(back).unwrap();
        assert_eq!(again, recipe);
    }

    #[test]
    fn test_builder_slug() {
        let recipe = Recipe::new(1, "Chocolate Chip Cookies!", "Chewy");
        assert_eq!(recipe.slug, "chocolate-chip-cookies");
    }
}
