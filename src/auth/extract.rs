//! Request extractors that turn the session cookie into a [`User`].

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;

use crate::auth::session::token_from_cookie_header;
use crate::models::User;
use crate::state::AppState;
use crate::utils::error::AppError;

async fn session_user(parts: &Parts, state: &AppState) -> Result<Option<User>, AppError> {
    let Some(header) = parts.headers.get(COOKIE).and_then(|v| v.to_str().ok()) else {
        return Ok(None);
    };
    let Some(token) = token_from_cookie_header(header) else {
        return Ok(None);
    };
    let Some(session) = state.sessions.resolve(token) else {
        return Ok(None);
    };
    Ok(state.store.user(session.user_id).await?)
}

/// Extractor for routes that require a signed-in user. Rejects with 401
/// when the cookie is missing, expired or points at a deleted user.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match session_user(parts, state).await? {
            Some(user) => Ok(CurrentUser(user)),
            None => Err(AppError::Unauthorized(
                "Authentication required".to_string(),
            )),
        }
    }
}

/// Extractor for routes that behave differently for signed-in users but
/// never reject anonymous ones.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(session_user(parts, state).await?))
    }
}
