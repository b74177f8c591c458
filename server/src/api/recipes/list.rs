use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::models::Recipe;
use crate::schema::recipes;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{load_children, RecipeDetails};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeDetails>,
}

/// List the user's recipes with their ingredients and method steps
///
/// The joined read view: newest first, children ordered by position.
#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    responses(
        (status = 200, description = "List of user's recipes", body = ListRecipesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_recipes(
    AuthUser(user): AuthUser,
    State(pool): State<AppState>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let rows: Vec<Recipe> = match recipes::table
        .filter(recipes::user_id.eq(user.id))
        .order(recipes::created_at.desc())
        .select(Recipe::as_select())
        .load(&mut conn)
    {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to fetch recipes: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to fetch recipes")),
            )
                .into_response();
        }
    };

    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

    let (mut lines_by_recipe, mut steps_by_recipe) = match load_children(&mut conn, &ids) {
        Ok(children) => children,
        Err(e) => {
            tracing::error!("Failed to fetch recipe details: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to fetch recipes")),
            )
                .into_response();
        }
    };

    let recipes = rows
        .into_iter()
        .map(|recipe| {
            let lines = lines_by_recipe.remove(&recipe.id).unwrap_or_default();
            let steps = steps_by_recipe.remove(&recipe.id).unwrap_or_default();
            RecipeDetails::assemble(recipe, lines, steps)
        })
        .collect();

    (StatusCode::OK, Json(ListRecipesResponse { recipes })).into_response()
}
