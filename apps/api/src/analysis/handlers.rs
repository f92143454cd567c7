//! Axum route handlers for the Resume Analysis API.

use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::analysis::{analyze_document, analyze_text};
use crate::errors::AppError;
use crate::extraction::extract_fields;
use crate::models::analysis::{AnalysisReport, ExtractionResult};
use crate::models::document::{MediaKind, RawDocument};
use crate::state::AppState;

/// Multipart field carrying the uploaded file.
pub const RESUME_FIELD: &str = "resume";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/analyze
///
/// Accepts a PDF or plain-text file in the `resume` multipart field and returns the
/// predicted category, recommended job, and extracted fields.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let document = read_resume_field(&mut multipart).await?;

    let classifier = state.classifier.clone();
    let pdf = state.pdf.clone();
    let report = run_blocking(move || analyze_document(&document, &classifier, pdf.as_ref()))
        .await??;

    Ok(Json(report))
}

/// POST /api/v1/resumes/analyze-text
///
/// Same analysis for a resume pasted inline as plain text.
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<AnalysisReport>, AppError> {
    let Json(request) = payload?;
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let classifier = state.classifier.clone();
    let report =
        run_blocking(move || analyze_text(&request.text, MediaKind::PlainText, &classifier))
            .await?;

    Ok(Json(report))
}

/// POST /api/v1/resumes/extract
///
/// Field extraction only. No model is consulted, and empty text is a valid (empty) resume.
pub async fn handle_extract(
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<ExtractionResult>, AppError> {
    let Json(request) = payload?;
    let extraction = run_blocking(move || extract_fields(&request.text)).await?;
    Ok(Json(extraction))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Finds the `resume` field and resolves its media kind before reading the payload.
async fn read_resume_field(multipart: &mut Multipart) -> Result<RawDocument, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let kind = MediaKind::resolve(content_type.as_deref(), file_name.as_deref())
            .ok_or_else(|| {
                AppError::UnsupportedMediaType(format!(
                    "Resume must be a PDF or plain-text file, got {}",
                    content_type.as_deref().unwrap_or("an undeclared type")
                ))
            })?;

        let payload = field.bytes().await.map_err(multipart_error)?;
        debug!("Received {kind:?} upload ({} bytes)", payload.len());
        return Ok(RawDocument::new(payload, kind));
    }

    Err(AppError::Validation(format!(
        "multipart field '{RESUME_FIELD}' is required"
    )))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(err.body_text())
    }
}

/// Runs CPU-bound analysis off the async executor.
async fn run_blocking<T, F>(task: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task).await.map_err(|e| {
        AppError::Internal(anyhow::anyhow!("spawn_blocking failed in analysis: {e}"))
    })
}
