//! Field normalization.
//!
//! Projects a [`Recipe`] into a flat, lowercased [`SearchDocument`]. This is the
//! only place that knows about ingredient shapes; everything downstream sees
//! plain text.

use crate::error::{Result, SearchError};
use crate::recipe::Recipe;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The indexed fields of a document, strongest relevance signal first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    /// Lowercased title
    Title,
    /// Lowercased description
    Description,
    /// Flattened ingredient names
    Ingredients,
    /// Joined tags
    Tags,
    /// Joined categories
    Category,
}

impl FieldKey {
    /// All indexed fields in weight order.
    pub const ALL: [FieldKey; 5] = [
        FieldKey::Title,
        FieldKey::Description,
        FieldKey::Ingredients,
        FieldKey::Tags,
        FieldKey::Category,
    ];

    /// Field name as it appears in match metadata and config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Title => "title",
            FieldKey::Description => "description",
            FieldKey::Ingredients => "ingredients",
            FieldKey::Tags => "tags",
            FieldKey::Category => "category",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recipe plus its derived search fields. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchDocument {
    /// Copy of the original record
    pub recipe: Recipe,
    /// Every searchable field, space-joined and lowercased
    pub searchable_text: String,
    /// Lowercased title
    pub title_lower: String,
    /// Lowercased description
    pub description_lower: String,
    /// Ingredient names, space-joined and lowercased
    pub ingredients_text: String,
    /// Tags, space-joined and lowercased
    pub tags_text: String,
    /// Categories, space-joined and lowercased
    pub category_text: String,
}

impl SearchDocument {
    /// Normalize a record.
    ///
    /// Fails only when the record breaks the data-layer contract by leaving
    /// `title` or `description` empty.
    pub fn from_recipe(recipe: &Recipe) -> Result<Self> {
        if recipe.title.trim().is_empty() {
            return Err(SearchError::InvalidRecord {
                id: recipe.id.to_string(),
                field: "title",
            });
        }
        if recipe.description.trim().is_empty() {
            return Err(SearchError::InvalidRecord {
                id: recipe.id.to_string(),
                field: "description",
            });
        }

        let ingredients = recipe
            .ingredients
            .iter()
            .map(|ingredient| ingredient.name())
            .collect::<Vec<_>>()
            .join(" ");
        let tags = recipe.tags.join(" ");
        let categories = recipe.categories.join(" ");

        let searchable_text = [
            recipe.title.as_str(),
            recipe.description.as_str(),
            recipe.prologue.as_deref().unwrap_or(""),
            ingredients.as_str(),
            tags.as_str(),
            categories.as_str(),
            recipe.dietary_types.join(" ").as_str(),
        ]
        .join(" ")
        .to_lowercase();

        Ok(Self {
            recipe: recipe.clone(),
            searchable_text,
            title_lower: recipe.title.to_lowercase(),
            description_lower: recipe.description.to_lowercase(),
            ingredients_text: ingredients.to_lowercase(),
            tags_text: tags.to_lowercase(),
            category_text: categories.to_lowercase(),
        })
    }

    /// Text of an indexed field.
    pub fn field(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Title => &self.title_lower,
            FieldKey::Description => &self.description_lower,
            FieldKey::Ingredients => &self.ingredients_text,
            FieldKey::Tags => &self.tags_text,
            FieldKey::Category => &self.category_text,
        }
    }

    /// Drop the derived fields and hand back the original record.
    pub fn into_recipe(self) -> Recipe {
        self.recipe
    }
}
