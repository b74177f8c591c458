use crate::api::ErrorResponse;
use crate::models::User;
use crate::AppState;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
    Json,
};

use super::db::get_user_from_token;

/// Extractor that resolves the bearer token to the authenticated [`User`].
///
/// Routes behind [`super::require_auth`] can still fail here if the session
/// expires between the middleware check and the handler; the rejection is
/// the same 401 shape either way.
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse::new("Missing Authorization header")),
                )
            })?;

        match get_user_from_token(state, token).await {
            Some(user) => Ok(AuthUser(user)),
            None => Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Invalid or expired token")),
            )),
        }
    }
}
