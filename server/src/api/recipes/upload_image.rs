use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::models::NewImage;
use crate::schema::{images, recipes};
use crate::AppState;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Maximum accepted image size in bytes (2 MB).
pub const MAX_IMAGE_SIZE: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UploadImageResponse {
    pub id: Uuid,
    /// URL the image is served from; store it on the recipe via
    /// PUT /api/recipes/{id}.
    pub url: String,
}

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadImageRequest {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Map a filename extension to the image content type we store.
pub(crate) fn content_type_for_ext(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

/// Storage key: `{user}/{recipe}/{timestamp}.{ext}`.
pub(crate) fn build_storage_key(user_id: Uuid, recipe_id: Uuid, millis: i64, ext: &str) -> String {
    format!("{}/{}/{}.{}", user_id, recipe_id, millis, ext)
}

/// Upload an image for a recipe
#[utoipa::path(
    post,
    path = "/api/recipes/{id}/image",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body(content_type = "multipart/form-data", content = UploadImageRequest),
    responses(
        (status = 201, description = "Image stored", body = UploadImageResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_image(
    AuthUser(user): AuthUser,
    State(pool): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    // Get the file from multipart
    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("No file provided")),
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!("Multipart read error: {}", e);
            return (
                e.status(),
                Json(ErrorResponse::new(format!(
                    "Failed to read multipart data: {}",
                    e.body_text()
                ))),
            )
                .into_response();
        }
    };

    let ext = field
        .file_name()
        .and_then(|name| name.rsplit('.').next())
        .map(|e| e.to_ascii_lowercase());

    let (ext, content_type) = match ext {
        Some(ext) => match content_type_for_ext(&ext) {
            Some(ct) => (ext, ct),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new(
                        "Unsupported image type. Use jpg, jpeg, png, webp or gif",
                    )),
                )
                    .into_response()
            }
        },
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("No file name provided")),
            )
                .into_response()
        }
    };

    let data = match field.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Field read error: {}", e);
            return (
                e.status(),
                Json(ErrorResponse::new(format!(
                    "Failed to read file data: {}",
                    e.body_text()
                ))),
            )
                .into_response();
        }
    };

    if data.len() > MAX_IMAGE_SIZE {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(format!(
                "File too large. Maximum size is {} bytes",
                MAX_IMAGE_SIZE
            ))),
        )
            .into_response();
    }

    let mut conn = get_conn!(pool);

    // The recipe must exist and belong to the caller
    let recipe_exists: bool = match recipes::table
        .filter(recipes::id.eq(id))
        .filter(recipes::user_id.eq(user.id))
        .select(diesel::dsl::count_star().gt(0))
        .first(&mut conn)
    {
        Ok(exists) => exists,
        Err(e) => {
            tracing::error!("Failed to check recipe: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to store image")),
            )
                .into_response();
        }
    };

    if !recipe_exists {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Recipe not found")),
        )
            .into_response();
    }

    let storage_key = build_storage_key(user.id, id, Utc::now().timestamp_millis(), &ext);

    let new_image = NewImage {
        user_id: user.id,
        recipe_id: id,
        storage_key: &storage_key,
        content_type,
        data: &data,
    };

    let image_id: Uuid = match diesel::insert_into(images::table)
        .values(&new_image)
        .returning(images::id)
        .get_result(&mut conn)
    {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to store image: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to store image")),
            )
                .into_response();
        }
    };

    (
        StatusCode::CREATED,
        Json(UploadImageResponse {
            id: image_id,
            url: format!("/api/images/{}", image_id),
        }),
    )
        .into_response()
}
