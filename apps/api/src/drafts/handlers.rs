//! Axum route handlers for the Drafts API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppJson};
use crate::models::draft::Draft;
use crate::models::platform::Platform;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SaveDraftRequest {
    pub content: String,
    #[serde(default)]
    pub platforms: Vec<Platform>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDraftRequest {
    pub content: Option<String>,
    pub platforms: Option<Vec<Platform>>,
}

#[derive(Debug, Serialize)]
pub struct DraftListResponse {
    pub drafts: Vec<Draft>,
}

#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub draft: Draft,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/drafts
pub async fn handle_list_drafts(State(state): State<AppState>) -> Json<DraftListResponse> {
    Json(DraftListResponse {
        drafts: state.drafts.list_drafts().await,
    })
}

/// GET /api/drafts/:id
pub async fn handle_get_draft(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DraftResponse>, AppError> {
    let draft = state.drafts.get_draft(&id).await?;
    Ok(Json(DraftResponse { draft }))
}

/// POST /api/drafts
pub async fn handle_save_draft(
    State(state): State<AppState>,
    AppJson(request): AppJson<SaveDraftRequest>,
) -> Result<Json<DraftResponse>, AppError> {
    let draft = state
        .drafts
        .save_draft(request.content, request.platforms)
        .await?;
    Ok(Json(DraftResponse { draft }))
}

/// PUT /api/drafts/:id
pub async fn handle_update_draft(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(request): AppJson<UpdateDraftRequest>,
) -> Result<Json<DraftResponse>, AppError> {
    let draft = state
        .drafts
        .update_draft(&id, request.content, request.platforms)
        .await?;
    Ok(Json(DraftResponse { draft }))
}

/// DELETE /api/drafts/:id
pub async fn handle_delete_draft(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.drafts.delete_draft(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
