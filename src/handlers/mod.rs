use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::utils::error::AppError;
use crate::utils::response::success;

pub mod auth;
pub mod categories;
pub mod events;
pub mod purchases;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "boxoffice-api",
    };

    success(payload, "Health check successful").into_response()
}

/// Maps a malformed JSON body onto the standard validation error shape.
pub(crate) fn bad_json(rejection: JsonRejection) -> AppError {
    AppError::ValidationError(rejection.body_text())
}

pub(crate) fn bad_query(rejection: QueryRejection) -> AppError {
    AppError::ValidationError(rejection.body_text())
}

/// Non-numeric ids in the URL get the same envelope instead of axum's
/// plain-text rejection.
pub(crate) fn bad_path(rejection: PathRejection) -> AppError {
    AppError::ValidationError(rejection.body_text())
}
