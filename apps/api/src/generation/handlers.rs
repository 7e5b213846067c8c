//! Axum route handlers for standalone AI drafting.
//!
//! Unlike inline expansion, a failed generation here is a hard error: the
//! caller asked for text and there is nothing to fall back to.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{AppError, AppJson};
use crate::llm_client::{Attachment, Turn};
use crate::state::AppState;

/// Multipart field the upload endpoint reads.
pub const UPLOAD_FIELD: &str = "file";

/// Gemini caps inline request data at 20 MB.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
    /// Files returned by the upload endpoint, sent to the model ahead of the prompt.
    #[serde(default)]
    pub files: Vec<Attachment>,
    /// Earlier turns of the drafting conversation, oldest first.
    #[serde(default)]
    pub history: Vec<Turn>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub file: Attachment,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/gemini/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    AppJson(request): AppJson<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    if request.prompt.trim().is_empty() && request.files.is_empty() {
        return Err(AppError::Validation(
            "prompt or files are required".to_string(),
        ));
    }

    info!(
        "Generating draft ({} files, {} prior turns)",
        request.files.len(),
        request.history.len()
    );
    let content = state
        .generator
        .generate_with_files(&request.prompt, &request.files, &request.history)
        .await?;

    Ok(Json(GenerateResponse { content }))
}

/// POST /api/gemini/upload
///
/// Reads the `file` field and returns it base64-encoded, ready to be passed
/// back in `files` on the generate endpoint. Nothing is written to disk.
pub async fn handle_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let mut multipart = multipart?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let display_name = field.file_name().map(str::to_string);
        let mime_type = detect_mime_type(display_name.as_deref(), field.content_type());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        if bytes.is_empty() {
            return Err(AppError::Validation("uploaded file is empty".to_string()));
        }

        info!(
            "Accepted upload {:?} ({mime_type}, {} bytes)",
            display_name,
            bytes.len()
        );
        return Ok(Json(UploadResponse {
            file: Attachment {
                mime_type,
                data: BASE64_STANDARD.encode(&bytes),
                display_name,
            },
        }));
    }

    Err(AppError::Validation("no file was uploaded".to_string()))
}

/// Extension first, then the part's declared type.
fn detect_mime_type(file_name: Option<&str>, declared: Option<&str>) -> String {
    file_name
        .and_then(|name| mime_guess::from_path(name).first())
        .map(|mime| mime.to_string())
        .or_else(|| declared.map(str::to_string))
        .unwrap_or_else(|| "application/octet-stream".to_string())
}
