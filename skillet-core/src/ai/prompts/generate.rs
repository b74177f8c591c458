//! Generation prompt: invent a recipe from an ingredient list.

/// System instruction for recipe generation.
pub const GENERATE_SYSTEM_PROMPT: &str = "You are a professional chef and recipe creator. Create practical, delicious recipes based on available ingredients. Always return valid JSON format.";

/// Render the generation prompt from an ingredient list and optional
/// free-text preferences.
pub fn render_generate_prompt(ingredients: &[String], preferences: Option<&str>) -> String {
    let ingredients_list = ingredients.join(", ");

    let preferences_line = preferences
        .map(|p| format!("Additional preferences: {}", p))
        .unwrap_or_default();

    format!(
        r#"Create a delicious recipe using these ingredients: {ingredients_list}

{preferences_line}

Please provide:
1. A creative recipe title
2. A short description (1-2 sentences)
3. Complete list of ingredients with quantities (including the mentioned ingredients)
4. Step-by-step cooking instructions

Return the response in JSON format with these keys:
{{
  "title": "Recipe name",
  "description": "Short description",
  "ingredients": ["ingredient 1 with quantity", "ingredient 2 with quantity", ...],
  "method": ["Step 1", "Step 2", ...]
}}

Make it practical, tasty, and easy to follow!"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_with_preferences() {
        let prompt = render_generate_prompt(
            &["chicken".to_string(), "rice".to_string()],
            Some("spicy"),
        );

        assert!(prompt.contains("using these ingredients: chicken, rice"));
        assert!(prompt.contains("Additional preferences: spicy"));
        assert!(prompt.contains("\"method\": [\"Step 1\", \"Step 2\", ...]"));
    }

    #[test]
    fn test_render_without_preferences() {
        let prompt = render_generate_prompt(&["eggs".to_string()], None);

        assert!(prompt.contains("using these ingredients: eggs"));
        assert!(!prompt.contains("Additional preferences"));
    }
}
