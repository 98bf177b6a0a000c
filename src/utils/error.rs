use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;
use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Insufficient inventory: {0}")]
    InsufficientInventory(String),

    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InsufficientInventory(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::InsufficientInventory(_) => "INSUFFICIENT_INVENTORY",
            AppError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::ValidationError(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::InsufficientInventory(msg) => {
                error!(error = ?self, message = %msg, "Request rejected");
            }
            AppError::Internal(detail) => {
                error!(error = ?self, detail = %detail, "Internal error");
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => AppError::NotFound(err.to_string()),
            StoreError::Conflict(message) => AppError::Conflict(message),
            StoreError::InsufficientInventory { .. } => {
                AppError::InsufficientInventory(err.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        self.log();

        // Internal details stay in the logs; clients get a fixed message.
        let public_message = match &self {
            AppError::ValidationError(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::InsufficientInventory(msg) => msg.clone(),
            AppError::Internal(_) => "An internal error occurred".to_string(),
        };

        error_response(code, public_message, None, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_maps_to_its_status_and_code() {
        let cases = [
            (AppError::ValidationError("x".into()), StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            (AppError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            (AppError::Forbidden("x".into()), StatusCode::FORBIDDEN, "FORBIDDEN"),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT, "CONFLICT"),
            (
                AppError::InsufficientInventory("x".into()),
                StatusCode::CONFLICT,
                "INSUFFICIENT_INVENTORY",
            ),
            (
                AppError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
            ),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_code(), status);
            assert_eq!(err.code(), code);
        }
    }

    #[test]
    fn store_errors_convert_with_their_messages() {
        let err: AppError = StoreError::NotFound {
            entity: "Ticket type",
            id: 9,
        }
        .into();
        assert!(matches!(&err, AppError::NotFound(msg) if msg == "Ticket type 9 not found"));

        let err: AppError = StoreError::InsufficientInventory {
            name: "VIP".into(),
            requested: 5,
            available: 2,
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert!(
            matches!(&err, AppError::InsufficientInventory(msg) if msg == "Not enough tickets available for VIP")
        );

        let err: AppError = StoreError::Conflict("Username already taken".into()).into();
        assert!(matches!(&err, AppError::Conflict(msg) if msg == "Username already taken"));
    }
}
