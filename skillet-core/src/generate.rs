//! Generation relay: invent a recipe from a list of ingredients.

use crate::ai::prompts::generate::{render_generate_prompt, GENERATE_SYSTEM_PROMPT};
use crate::ai::{AiClient, ChatMessage, ChatRequest};
use crate::error::RelayError;
use crate::types::ExtractedRecipe;

/// Sampling temperature for generation. Higher than extraction: variation
/// is desirable here.
const GENERATE_TEMPERATURE: f32 = 0.8;

/// Fallback title when the model omits one.
const DEFAULT_TITLE: &str = "Delicious Recipe";

/// Fallback description when the model omits one.
const DEFAULT_DESCRIPTION: &str = "A tasty dish made with your ingredients";

/// Generate a recipe from `ingredients`, honoring optional free-text
/// `preferences`. One gateway call; nothing is persisted.
pub async fn generate_recipe(
    ai: &dyn AiClient,
    ingredients: &[String],
    preferences: Option<&str>,
) -> Result<ExtractedRecipe, RelayError> {
    if ingredients.is_empty() {
        return Err(RelayError::InvalidInput("Ingredients are required"));
    }

    let request = ChatRequest {
        messages: vec![
            ChatMessage::system(GENERATE_SYSTEM_PROMPT),
            ChatMessage::user(render_generate_prompt(ingredients, preferences)),
        ],
        temperature: Some(GENERATE_TEMPERATURE),
        max_tokens: None,
        json_response: true,
    };

    let response = ai.complete(request).await?;

    tracing::debug!(ingredient_count = ingredients.len(), "generation reply received");

    ExtractedRecipe::from_model_json(&response.content, DEFAULT_TITLE, DEFAULT_DESCRIPTION)
        .map_err(|e| RelayError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::FakeAiClient;
    use crate::error::AiError;

    fn ingredients(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_provider_reply_passes_through_verbatim() {
        let ai = FakeAiClient::with_default_response(
            r#"{"title":"Spicy Chicken Rice","ingredients":["chicken","rice","chili"],"method":["Cook rice","Add chicken","Add chili"]}"#,
        );

        let recipe = generate_recipe(&ai, &ingredients(&["chicken", "rice"]), Some("spicy"))
            .await
            .unwrap();

        assert_eq!(recipe.title, "Spicy Chicken Rice");
        assert_eq!(recipe.ingredients, vec!["chicken", "rice", "chili"]);
        assert_eq!(recipe.method, vec!["Cook rice", "Add chicken", "Add chili"]);
    }

    #[tokio::test]
    async fn test_empty_ingredients_is_invalid_input() {
        let ai = FakeAiClient::with_default_response("{}");

        let err = generate_recipe(&ai, &[], None).await.unwrap_err();

        assert!(matches!(
            err,
            RelayError::InvalidInput("Ingredients are required")
        ));
        assert_eq!(ai.request_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_fields_use_generation_defaults() {
        let ai = FakeAiClient::with_default_response("{}");

        let recipe = generate_recipe(&ai, &ingredients(&["eggs"]), None)
            .await
            .unwrap();

        assert_eq!(recipe.title, "Delicious Recipe");
        assert_eq!(recipe.description, "A tasty dish made with your ingredients");
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.method.is_empty());
    }

    #[tokio::test]
    async fn test_prompt_includes_ingredients_and_preferences() {
        let ai = FakeAiClient::with_default_response("{}");

        generate_recipe(&ai, &ingredients(&["chicken", "rice"]), Some("spicy"))
            .await
            .unwrap();

        let request = &ai.requests()[0];
        assert_eq!(request.messages[0].content, GENERATE_SYSTEM_PROMPT);
        assert!(request.messages[1]
            .content
            .contains("using these ingredients: chicken, rice"));
        assert!(request.messages[1].content.contains("Additional preferences: spicy"));
        assert!(request.json_response);
        assert_eq!(request.temperature, Some(0.8));
    }

    #[tokio::test]
    async fn test_gateway_error_propagates_unchanged() {
        let ai = FakeAiClient::with_api_error(500, "upstream exploded");

        let err = generate_recipe(&ai, &ingredients(&["eggs"]), None)
            .await
            .unwrap_err();

        match err {
            RelayError::Gateway(AiError::Api { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "upstream exploded");
            }
            other => panic!("expected Gateway, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_reply_is_malformed_response() {
        let ai = FakeAiClient::with_default_response("Here is your recipe: ...");

        let err = generate_recipe(&ai, &ingredients(&["eggs"]), None)
            .await
            .unwrap_err();

        assert!(matches!(err, RelayError::MalformedResponse(_)));
    }
}
