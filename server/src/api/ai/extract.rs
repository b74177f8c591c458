use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use super::{api_key_not_configured, relay_error_response, AiState, ExtractedRecipeResponse};
use crate::api::ErrorResponse;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ExtractRecipeRequest {
    /// URL of the webpage to extract a recipe from.
    #[serde(default)]
    pub url: Option<String>,
}

/// Extract a recipe from a webpage
///
/// Fetches the page, forwards its content to the LLM gateway, and returns
/// the normalized recipe. Stateless: nothing is persisted until the client
/// explicitly saves the result.
#[utoipa::path(
    post,
    path = "/api/ai/extract-recipe",
    tag = "ai",
    request_body = ExtractRecipeRequest,
    responses(
        (status = 200, description = "Extracted recipe", body = ExtractedRecipeResponse),
        (status = 400, description = "URL is required", body = ErrorResponse),
        (status = 500, description = "Upstream or configuration failure", body = ErrorResponse)
    )
)]
pub async fn extract_recipe(
    State(state): State<AiState>,
    Json(request): Json<ExtractRecipeRequest>,
) -> impl IntoResponse {
    let ai = match &state.ai {
        Some(ai) => ai,
        None => return api_key_not_configured(),
    };

    let url = request.url.unwrap_or_default();

    match skillet_core::extract_recipe(state.source.as_ref(), ai.as_ref(), &url).await {
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

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_success_returns_normalized_recipe() {
        let source = MockSourceClient::new().with_text("https://example.com/pie", "<html>pie</html>");
        let ai = Arc::new(FakeAiClient::with_default_response(
            r#"{"title":"Pie","description":"Good","ingredients":["apples"],"method":["Bake"]}"#,
        ));
        let app = test_router(source, Some(ai));

        let response = app
            .oneshot(post_json(
                "/extract-recipe",
                r#"{"url":"https://example.com/pie"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["title"], "Pie");
        assert_eq!(json["ingredients"], serde_json::json!(["apples"]));
        assert_eq!(json["method"], serde_json::json!(["Bake"]));
    }

    #[tokio::test]
    async fn test_missing_url_is_400() {
        let app = test_router(
            MockSourceClient::new(),
            Some(Arc::new(FakeAiClient::with_default_response("{}"))),
        );

        let response = app.oneshot(post_json("/extract-recipe", "{}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "URL is required");
    }

    #[tokio::test]
    async fn test_empty_url_is_400() {
        let app = test_router(
            MockSourceClient::new(),
            Some(Arc::new(FakeAiClient::with_default_response("{}"))),
        );

        let response = app
            .oneshot(post_json("/extract-recipe", r#"{"url":""}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "URL is required");
    }

    #[tokio::test]
    async fn test_missing_api_key_is_500_without_provider_call() {
        let ai = Arc::new(FakeAiClient::with_default_response("{}"));
        let app = test_router(MockSourceClient::new(), None);

        let response = app
            .oneshot(post_json(
                "/extract-recipe",
                r#"{"url":"https://example.com/pie"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "OpenAI API key not configured");
        assert_eq!(ai.request_count(), 0);
    }

    #[tokio::test]
    async fn test_source_fetch_failure_is_500_with_fetch_detail() {
        let source =
            MockSourceClient::new().with_status("https://example.com/nonexistent", 404);
        let app = test_router(
            source,
            Some(Arc::new(FakeAiClient::with_default_response("{}"))),
        );

        let response = app
            .oneshot(post_json(
                "/extract-recipe",
                r#"{"url":"https://example.com/nonexistent"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        let message = json["error"].as_str().unwrap();
        assert!(message.contains("Failed to fetch"));
        assert!(message.contains("404"));
    }

    #[tokio::test]
    async fn test_gateway_error_forwards_details() {
        let source = MockSourceClient::new().with_text("https://example.com/pie", "<html></html>");
        let ai = Arc::new(FakeAiClient::with_api_error(429, "quota exceeded"));
        let app = test_router(source, Some(ai));

        let response = app
            .oneshot(post_json(
                "/extract-recipe",
                r#"{"url":"https://example.com/pie"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "OpenAI API error");
        assert_eq!(json["details"], "quota exceeded");
    }

    #[tokio::test]
    async fn test_cors_preflight_is_answered() {
        let app = test_router(
            MockSourceClient::new(),
            Some(Arc::new(FakeAiClient::with_default_response("{}"))),
        )
        .layer(crate::cors::layer());

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/extract-recipe")
            .header(header::ORIGIN, "https://app.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(
                header::ACCESS_CONTROL_REQUEST_HEADERS,
                "authorization, x-client-info, apikey, content-type",
            )
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert!(response.status().is_success());
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
        let allowed = response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
            .unwrap()
            .to_str()
            .unwrap()
            .to_ascii_lowercase();
        for name in ["authorization", "x-client-info", "apikey", "content-type"] {
            assert!(allowed.contains(name), "missing allow-header {}", name);
        }
    }
}
