use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::models::{NewIngredientLine, NewMethodStep, NewRecipe};
use crate::schema::{ingredients, method_steps, recipes};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{validate_rating, validate_source_type};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub description: Option<String>,
    pub source_url: Option<String>,
    /// Star rating, 1-5.
    pub rating: Option<i32>,
    /// "extracted" or "generated". Defaults to "extracted".
    pub source_type: Option<String>,
    pub image_url: Option<String>,
    /// Ingredient lines, in display order.
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Method steps, in cooking order.
    #[serde(default)]
    pub method: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateRecipeResponse {
    pub id: Uuid,
}

/// Save an extracted or generated recipe
///
/// The only path that creates recipes: the relay endpoints never persist,
/// so a recipe exists exactly when a client explicitly saved one.
#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created successfully", body = CreateRecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<AppState>,
    Json(request): Json<CreateRecipeRequest>,
) -> impl IntoResponse {
    if request.title.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Title cannot be empty")),
        )
            .into_response();
    }

    if let Err(message) = validate_rating(request.rating) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(message)),
        )
            .into_response();
    }

    let source_type = request.source_type.as_deref().unwrap_or("extracted");
    if !validate_source_type(source_type) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Invalid source type")),
        )
            .into_response();
    }

    let mut conn = get_conn!(pool);

    // Recipe and children are created atomically; order positions are
    // 1-based insertion order.
    let result: Result<Uuid, diesel::result::Error> = conn.transaction(|conn| {
        let new_recipe = NewRecipe {
            user_id: user.id,
            title: &request.title,
            description: request.description.as_deref(),
            source_url: request.source_url.as_deref(),
            rating: request.rating,
            source_type,
            image_url: request.image_url.as_deref(),
        };

        let recipe_id: Uuid = diesel::insert_into(recipes::table)
            .values(&new_recipe)
            .returning(recipes::id)
            .get_result(conn)?;

        let lines: Vec<NewIngredientLine> = request
            .ingredients
            .iter()
            .enumerate()
            .map(|(index, text)| NewIngredientLine {
                recipe_id,
                ingredient_text: text,
                order_index: index as i32 + 1,
            })
            .collect();

        if !lines.is_empty() {
            diesel::insert_into(ingredients::table)
                .values(&lines)
                .execute(conn)?;
        }

        let steps: Vec<NewMethodStep> = request
            .method
            .iter()
            .enumerate()
            .map(|(index, text)| NewMethodStep {
                recipe_id,
                step_number: index as i32 + 1,
                step_description: text,
            })
            .collect();

        if !steps.is_empty() {
            diesel::insert_into(method_steps::table)
                .values(&steps)
                .execute(conn)?;
        }

        Ok(recipe_id)
    });

    match result {
        Ok(recipe_id) => (
            StatusCode::CREATED,
            Json(CreateRecipeResponse { id: recipe_id }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to create recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to create recipe")),
            )
                .into_response()
        }
    }
}
