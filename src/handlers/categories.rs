use axum::extract::State;
use axum::response::{IntoResponse, Response};

use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::success;

/// GET /api/categories.
pub async fn list_categories(State(state): State<AppState>) -> Result<Response, AppError> {
    let categories = state.store.categories().await?;
    Ok(success(categories, "Categories retrieved").into_response())
}
