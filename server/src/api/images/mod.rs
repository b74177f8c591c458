pub mod get;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;
use uuid::Uuid;

/// Returns the router for /api/images endpoints (mounted at /api/images)
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(get::get_image))
}

/// Parse the image id out of an internal image URL
/// (`/api/images/{id}`). External URLs yield None.
pub fn image_id_from_url(url: &str) -> Option<Uuid> {
    url.strip_prefix("/api/images/")
        .and_then(|rest| Uuid::parse_str(rest).ok())
}

#[derive(OpenApi)]
#[openapi(paths(get::get_image))]
pub struct ApiDoc;
