use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use super::{api_key_not_configured, relay_error_response, AiState, ExtractedRecipeResponse};
use crate::api::ErrorResponse;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GenerateRecipeRequest {
    /// Ingredients the recipe must be built around.
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Optional free-text preferences (e.g. "spicy", "vegetarian").
    #[serde(default)]
    pub preferences: Option<String>,
}

/// Generate a recipe from a list of ingredients
///
/// Builds a generation prompt and relays it to the LLM gateway. Stateless:
/// nothing is persisted until the client explicitly saves the result.
#[utoipa::path(
    post,
    path = "/api/ai/generate-recipe",
    tag = "ai",
    request_body = GenerateRecipeRequest,
    responses(
        (status = 200, description = "Generated recipe", body = ExtractedRecipeResponse),
        (status = 400, description = "Ingredients are required", body = ErrorResponse),
        (status = 500, description = "Upstream or configuration failure", body = ErrorResponse)
    )
)]
pub async fn generate_recipe(
    State(state): State<AiState>,
    Json(request): Json<GenerateRecipeRequest>,
) -> impl IntoResponse {
    let ai = match &state.ai {
        Some(ai) => ai,
        None => return api_key_not_configured(),
    };

    match skillet_core::generate_recipe(
        ai.as_ref(),
        &request.ingredients,
        request.preferences.as_deref(),
    )
    .await
    {
        Ok(recipe) => (
            StatusCode::OK,
            Json(ExtractedRecipeResponse::from(recipe)),
        )
            .into_response(),
        Err(e) => relay_error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use crate::api::ai::test_support::{body_json, test_router};
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use skillet_core::ai::FakeAiClient;
    use skillet_core::MockSourceClient;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/generate-recipe")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_provider_reply_is_returned_verbatim() {
        let ai = Arc::new(FakeAiClient::with_default_response(
            r#"{"title":"Spicy Chicken Rice","ingredients":["chicken","rice","chili"],"method":["Cook rice","Add chicken","Add chili"]}"#,
        ));
        let app = test_router(MockSourceClient::new(), Some(ai));

        let response = app
            .oneshot(post_json(
                r#"{"ingredients":["chicken","rice"],"preferences":"spicy"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["title"], "Spicy Chicken Rice");
        assert_eq!(
            json["ingredients"],
            serde_json::json!(["chicken", "rice", "chili"])
        );
        assert_eq!(
            json["method"],
            serde_json::json!(["Cook rice", "Add chicken", "Add chili"])
        );
        // Normalization fills description without touching provider arrays.
        assert_eq!(json["description"], "A tasty dish made with your ingredients");
    }

    #[tokio::test]
    async fn test_missing_ingredients_is_400() {
        let app = test_router(
            MockSourceClient::new(),
            Some(Arc::new(FakeAiClient::with_default_response("{}"))),
        );

        let response = app.oneshot(post_json("{}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Ingredients are required");
    }

    #[tokio::test]
    async fn test_empty_ingredients_is_400() {
        let app = test_router(
            MockSourceClient::new(),
            Some(Arc::new(FakeAiClient::with_default_response("{}"))),
        );

        let response = app
            .oneshot(post_json(r#"{"ingredients":[]}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Ingredients are required");
    }

    #[tokio::test]
    async fn test_missing_api_key_is_500_without_provider_call() {
        let ai = Arc::new(FakeAiClient::with_default_response("{}"));
        let app = test_router(MockSourceClient::new(), None);

        let response = app
            .oneshot(post_json(r#"{"ingredients":["eggs"]}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "OpenAI API key not configured");
        assert_eq!(ai.request_count(), 0);
    }

    #[tokio::test]
    async fn test_gateway_error_forwards_details() {
        let ai = Arc::new(FakeAiClient::with_api_error(500, "model overloaded"));
        let app = test_router(MockSourceClient::new(), Some(ai));

        let response = app
            .oneshot(post_json(r#"{"ingredients":["eggs"]}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "OpenAI API error");
        assert_eq!(json["details"], "model overloaded");
    }

    #[tokio::test]
    async fn test_malformed_provider_reply_is_500() {
        let ai = Arc::new(FakeAiClient::with_default_response("not json"));
        let app = test_router(MockSourceClient::new(), Some(ai));

        let response = app
            .oneshot(post_json(r#"{"ingredients":["eggs"]}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert!(json["error"]
            .as_str()
            .unwrap()
            .contains("Failed to parse model response"));
    }
}
