//! Registration, login, logout and session status.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio::task;
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::session::{clear_session_cookie, token_from_cookie_header};
use crate::auth::MaybeUser;
use crate::handlers::bad_json;
use crate::models::{NewUser, User};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{empty_envelope, envelope, success};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub is_organizer: bool,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
struct AuthStatus {
    authenticated: bool,
    user: Option<User>,
}

fn invalid_credentials() -> AppError {
    // One message for both a missing user and a wrong password, so the
    // endpoint does not confirm which usernames exist.
    AppError::Unauthorized("Invalid username or password".to_string())
}

fn presented_token(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(token_from_cookie_header)
}

async fn hash_on_blocking_pool(password: String) -> Result<String, AppError> {
    task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(format!("hashing task failed: {e}")))?
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))
}

async fn verify_on_blocking_pool(password: String, hash: String) -> Result<bool, AppError> {
    task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("hashing task failed: {e}")))
}

/// POST /api/users. Creates the account and signs it in.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload.map_err(bad_json)?;

    let username = payload.username.trim().to_string();
    let email = payload.email.trim().to_string();
    let full_name = payload.full_name.trim().to_string();
    if username.is_empty() || email.is_empty() || full_name.is_empty() || payload.password.is_empty()
    {
        return Err(AppError::ValidationError(
            "username, password, email and fullName are required".to_string(),
        ));
    }

    let password_hash = hash_on_blocking_pool(payload.password).await?;
    let user = state
        .store
        .create_user(NewUser {
            username,
            password_hash,
            email,
            full_name,
            is_organizer: payload.is_organizer,
            avatar_url: payload.avatar_url,
        })
        .await?;

    let session = state.sessions.create(user.id);
    let cookie = state.sessions.cookie(&session);
    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(envelope(user, "Registration successful")),
    )
        .into_response())
}

/// POST /api/auth/login.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload.map_err(bad_json)?;

    let Some(user) = state.store.user_by_username(payload.username.trim()).await? else {
        return Err(invalid_credentials());
    };
    if !verify_on_blocking_pool(payload.password, user.password_hash.clone()).await? {
        return Err(invalid_credentials());
    }

    // A successful login rotates the session: any token the client was
    // holding stops working once the new one is minted.
    if let Some(token) = presented_token(&headers) {
        state.sessions.revoke(token);
    }

    let session = state.sessions.create(user.id);
    let cookie = state.sessions.cookie(&session);
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(envelope(user, "Login successful")),
    )
        .into_response())
}

/// POST /api/auth/logout. Succeeds whether or not a session existed.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = presented_token(&headers) {
        state.sessions.revoke(token);
    }

    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(empty_envelope("Logged out")),
    )
        .into_response()
}

/// GET /api/auth/status. Never rejects; reports the signed-in user if any.
pub async fn status(MaybeUser(user): MaybeUser) -> Response {
    let payload = AuthStatus {
        authenticated: user.is_some(),
        user,
    };
    success(payload, "Authentication status").into_response()
}
