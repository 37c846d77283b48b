use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use crate::auth::repo::User;
use crate::error::ApiError;
use crate::state::AppState;

/// The auth gate: resolves the bearer token to its user row, or rejects
/// with 401 before the handler runs. Pure per-request lookup; nothing is
/// cached between requests.
#[derive(Debug)]
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".into()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization header".into()))?;

        let user = User::find_by_token(&state.db, token)
            .await?
            .ok_or_else(|| {
                warn!("bearer token matched no user");
                ApiError::Unauthorized("Invalid token".into())
            })?;

        Ok(AuthUser(user))
    }
}
