use crate::api::images::image_id_from_url;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::schema::{images, recipes};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use uuid::Uuid;

/// Delete a recipe
///
/// Ingredient lines and method steps cascade with the recipe. A stored
/// image is deleted first; if that fails the recipe is still deleted.
#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let image_url: Option<String> = match recipes::table
        .filter(recipes::id.eq(id))
        .filter(recipes::user_id.eq(user.id))
        .select(recipes::image_url)
        .first(&mut conn)
    {
        Ok(url) => url,
        Err(diesel::NotFound) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Recipe not found")),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to fetch recipe: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to delete recipe")),
            )
                .into_response();
        }
    };

    // Remove the stored image first; a failure here must not block the
    // recipe delete.
    if let Some(image_id) = image_url.as_deref().and_then(image_id_from_url) {
        if let Err(e) = diesel::delete(
            images::table
                .filter(images::id.eq(image_id))
                .filter(images::user_id.eq(user.id)),
        )
        .execute(&mut conn)
        {
            tracing::warn!(recipe_id = %id, "Failed to delete recipe image: {}", e);
        }
    }

    let deleted = diesel::delete(
        recipes::table
            .filter(recipes::id.eq(id))
            .filter(recipes::user_id.eq(user.id)),
    )
    .execute(&mut conn);

    match deleted {
        Ok(0) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Recipe not found")),
        )
            .into_response(),
        // Ingredient lines and method steps go with it (ON DELETE CASCADE).
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::error!("Failed to delete recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to delete recipe")),
            )
                .into_response()
        }
    }
}
