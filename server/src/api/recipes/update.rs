use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::schema::recipes;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::validate_rating;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateRecipeRequest {
    /// New star rating, 1-5.
    pub rating: Option<i32>,
    /// New image URL (e.g. /api/images/{id}).
    pub image_url: Option<String>,
}

#[derive(AsChangeset)]
#[diesel(table_name = recipes)]
struct RecipeChanges<'a> {
    rating: Option<i32>,
    image_url: Option<&'a str>,
}

/// Update a recipe's rating and/or image
///
/// Recipes are otherwise immutable after save; only these two fields can
/// change.
#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 204, description = "Recipe updated"),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRecipeRequest>,
) -> impl IntoResponse {
    if request.rating.is_none() && request.image_url.is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Nothing to update")),
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

    let mut conn = get_conn!(pool);

    let changes = RecipeChanges {
        rating: request.rating,
        image_url: request.image_url.as_deref(),
    };

    let updated = diesel::update(
        recipes::table
            .filter(recipes::id.eq(id))
            .filter(recipes::user_id.eq(user.id)),
    )
    .set(&changes)
    .execute(&mut conn);

    match updated {
        Ok(0) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Recipe not found")),
        )
            .into_response(),
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::error!("Failed to update recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to update recipe")),
            )
                .into_response()
        }
    }
}
