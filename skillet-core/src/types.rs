//! The normalized recipe shape shared by both relays.

use serde::{Deserialize, Serialize};

/// A recipe as extracted from a webpage or generated from ingredients.
///
/// This is a transient DTO: it is returned to the caller and only persisted
/// when the client explicitly saves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecipe {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub method: Vec<String>,
}

/// Model output before normalization. Every field is optional; unknown keys
/// are ignored, wrong-typed values are a deserialization error.
#[derive(Debug, Deserialize)]
struct ModelRecipe {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    ingredients: Option<Vec<String>>,
    #[serde(default)]
    method: Option<Vec<String>>,
}

impl ExtractedRecipe {
    /// Parse a model's JSON reply and normalize it: missing `title` /
    /// `description` fall back to the given defaults, missing arrays become
    /// empty. Present arrays are passed through unmutated.
    pub fn from_model_json(
        content: &str,
        default_title: &str,
        default_description: &str,
    ) -> Result<Self, serde_json::Error> {
        let raw: ModelRecipe = serde_json::from_str(content)?;

        Ok(Self {
            title: raw
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| default_title.to_string()),
            description: raw
                .description
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| default_description.to_string()),
            ingredients: raw.ingredients.unwrap_or_default(),
            method: raw.method.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_reply_passes_through() {
        let recipe = ExtractedRecipe::from_model_json(
            r#"{"title":"Spicy Chicken Rice","description":"Hot","ingredients":["chicken","rice","chili"],"method":["Cook rice","Add chicken","Add chili"]}"#,
            "",
            "",
        )
        .unwrap();

        assert_eq!(recipe.title, "Spicy Chicken Rice");
        assert_eq!(recipe.ingredients, vec!["chicken", "rice", "chili"]);
        assert_eq!(recipe.method, vec!["Cook rice", "Add chicken", "Add chili"]);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let recipe = ExtractedRecipe::from_model_json("{}", "Delicious Recipe", "A tasty dish")
            .unwrap();

        assert_eq!(recipe.title, "Delicious Recipe");
        assert_eq!(recipe.description, "A tasty dish");
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.method.is_empty());
    }

    #[test]
    fn test_missing_arrays_become_empty_not_null() {
        let recipe =
            ExtractedRecipe::from_model_json(r#"{"title":"Toast"}"#, "", "").unwrap();

        assert_eq!(recipe.ingredients, Vec::<String>::new());
        assert_eq!(recipe.method, Vec::<String>::new());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let recipe = ExtractedRecipe::from_model_json(
            r#"{"title":"Soup","servings":4,"notes":"n/a"}"#,
            "",
            "",
        )
        .unwrap();

        assert_eq!(recipe.title, "Soup");
    }

    #[test]
    fn test_wrong_typed_field_is_rejected() {
        assert!(ExtractedRecipe::from_model_json(r#"{"ingredients":"flour"}"#, "", "").is_err());
        assert!(ExtractedRecipe::from_model_json("not json", "", "").is_err());
    }

    #[test]
    fn test_empty_strings_fall_back_to_defaults() {
        let recipe = ExtractedRecipe::from_model_json(
            r#"{"title":"","description":""}"#,
            "Delicious Recipe",
            "A tasty dish made with your ingredients",
        )
        .unwrap();

        assert_eq!(recipe.title, "Delicious Recipe");
        assert_eq!(recipe.description, "A tasty dish made with your ingredients");
    }
}
