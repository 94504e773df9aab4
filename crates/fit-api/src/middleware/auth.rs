//! Authenticated-user extractor for API routes

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use uuid::Uuid;

use fit_session::cookie::parse_cookie_header;
use fit_session::AuthStatus;
use fit_shared::constants::ACCESS_TOKEN_COOKIE;
use fit_shared::types::EntityId;

use crate::error::ApiError;
use crate::state::AppState;

/// The user behind the request's access-token cookie. API data routes
/// require real auth even when the navigation gate is configured open.
pub struct AuthUser(pub EntityId);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let verifier = state
            .verifier
            .as_ref()
            .ok_or_else(|| ApiError::Unauthorized("Auth is not configured".to_string()))?;

        let cookies = parts
            .headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(parse_cookie_header)
            .unwrap_or_default();

        match verifier.status(cookies.get(ACCESS_TOKEN_COOKIE).map(String::as_str)) {
            AuthStatus::Authenticated(sub) => {
                let user_id = Uuid::parse_str(&sub)
                    .map_err(|_| ApiError::Unauthorized("Malformed subject".to_string()))?;
                Ok(AuthUser(user_id))
            }
            AuthStatus::Stale => Err(ApiError::Unauthorized("Session expired".to_string())),
            AuthStatus::Absent => Err(ApiError::Unauthorized("Authentication required".to_string())),
        }
    }
}
