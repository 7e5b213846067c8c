//! Axum route handlers for previewing directive expansion.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::{AppError, AppJson};
use crate::expansion::expander::Expansion;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExpandRequest {
    pub content: String,
}

/// POST /api/expand
///
/// Resolves `##[...]` directives without publishing. Failed directives are
/// reported in `failed` and left in `content` as written.
pub async fn handle_expand(
    State(state): State<AppState>,
    AppJson(request): AppJson<ExpandRequest>,
) -> Result<Json<Expansion>, AppError> {
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }
    Ok(Json(state.expander.expand_detailed(&request.content).await))
}
