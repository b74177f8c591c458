pub mod extract;
pub mod generate;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use skillet_core::ai::AiClient;
use skillet_core::{AiError, ExtractedRecipe, RelayError, SourceClient};
use utoipa::{OpenApi, ToSchema};

use crate::api::ErrorResponse;

/// State for the relay endpoints.
///
/// `ai` is `None` when no provider credential was configured at startup;
/// the handlers answer 500 without attempting any outbound call.
#[derive(Clone)]
pub struct AiState {
    pub source: Arc<dyn SourceClient>,
    pub ai: Option<Arc<dyn AiClient>>,
}

/// Returns the router for the relay endpoints (mounted at /api/ai).
pub fn router(state: AiState) -> Router {
    Router::new()
        .route("/extract-recipe", post(extract::extract_recipe))
        .route("/generate-recipe", post(generate::generate_recipe))
        .with_state(state)
}

/// The normalized recipe shape both relays return.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ExtractedRecipeResponse {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub method: Vec<String>,
}

impl From<ExtractedRecipe> for ExtractedRecipeResponse {
    fn from(recipe: ExtractedRecipe) -> Self {
        Self {
            title: recipe.title,
            description: recipe.description,
            ingredients: recipe.ingredients,
            method: recipe.method,
        }
    }
}

/// 500 response for a missing provider credential.
pub(super) fn api_key_not_configured() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("OpenAI API key not configured")),
    )
        .into_response()
}

/// Translate a relay failure into its HTTP response. No local recovery, no
/// retry: every error maps directly onto a JSON error body.
pub(super) fn relay_error_response(err: RelayError) -> Response {
    match err {
        RelayError::InvalidInput(message) => {
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message))).into_response()
        }
        RelayError::Gateway(AiError::Api { status, body }) => {
            tracing::warn!(status, "provider call failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_details("OpenAI API error", body)),
            )
                .into_response()
        }
        other => {
            tracing::warn!(error = %other, "relay failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(other.to_string())),
            )
                .into_response()
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(extract::extract_recipe, generate::generate_recipe),
    components(schemas(
        extract::ExtractRecipeRequest,
        generate::GenerateRecipeRequest,
        ExtractedRecipeResponse,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use skillet_core::ai::FakeAiClient;
    use skillet_core::MockSourceClient;

    /// Router over fakes; `ai: None` models the missing-credential state.
    /// Takes the fake behind an `Arc` so tests can keep a handle for
    /// asserting on recorded requests.
    pub fn test_router(source: MockSourceClient, ai: Option<Arc<FakeAiClient>>) -> Router {
        router(AiState {
            source: Arc::new(source),
            ai: ai.map(|f| f as Arc<dyn AiClient>),
        })
    }

    pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}
