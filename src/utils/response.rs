use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
    pub details: Option<Value>,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: ApiErrorBody,
}

/// Bare success envelope, for handlers that attach their own status or
/// headers (session cookies) around it.
pub fn envelope<T>(data: T, message: impl Into<String>) -> ApiResponse<T>
where
    T: Serialize,
{
    ApiResponse {
        success: true,
        data: Some(data),
        message: Some(message.into()),
    }
}

pub fn empty_envelope(message: impl Into<String>) -> ApiResponse<()> {
    ApiResponse {
        success: true,
        data: None,
        message: Some(message.into()),
    }
}

pub fn success<T>(data: T, message: impl Into<String>) -> impl IntoResponse
where
    T: Serialize,
{
    (StatusCode::OK, Json(envelope(data, message)))
}

pub fn created<T>(data: T, message: impl Into<String>) -> impl IntoResponse
where
    T: Serialize,
{
    (StatusCode::CREATED, Json(envelope(data, message)))
}

pub fn error(
    code: &str,
    message: impl Into<String>,
    details: Option<Value>,
    status: StatusCode,
) -> Response {
    let body = ApiErrorResponse {
        success: false,
        error: ApiErrorBody {
            code: code.to_string(),
            message: message.into(),
            details,
        },
    };

    (status, Json(body)).into_response()
}
