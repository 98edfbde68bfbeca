//! Plan analysis HTTP handler.
//!
//! Accepts one floor-plan image as multipart form data, relays it to the
//! configured vision model once, and returns the critique with its parsed
//! scores.

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::{extract::State, Json};
use tracing::{error, warn};

use plancritic_core::{defaults, AnalysisRequest, AnalysisResponse};
use plancritic_inference::detect_image_mime;

use crate::{ApiError, AppState};

/// Parts collected from the upload form. Only the first occurrence of each
/// field name counts.
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<UploadedFile>,
    file_seen: bool,
    city: Option<String>,
    orientation: Option<String>,
}

#[derive(Debug)]
struct UploadedFile {
    bytes: Vec<u8>,
    content_type: Option<String>,
}

/// Analyze a floor-plan image.
///
/// # Multipart Fields
/// - `file`: plan image (required, must be a file part)
/// - `city`: project city (optional, defaults to تهران)
/// - `orientation`: `north` | `south` | `unknown` (optional, defaults to `unknown`)
///
/// # Returns
/// - 200 OK with `{text, scores}`; `scores` is null when no score line was found
/// - 400 Bad Request if `file` is missing or not a file
/// - 500 Internal Server Error on malformed form data or provider failure
#[utoipa::path(post, path = "/api/analyze", tag = "Analysis",
    responses(
        (status = 200, description = "Critique with optional scores", body = AnalysisResponse),
        (status = 400, description = "No file uploaded", body = crate::ErrorBody),
        (status = 500, description = "Form or provider failure", body = crate::ErrorBody),
    ))]
pub async fn analyze_plan(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let multipart = multipart.map_err(|e| {
        warn!(error = %e, "Rejected non-multipart analysis request");
        ApiError::Internal(e.body_text())
    })?;
    let form = read_form(multipart).await?;

    let file = form
        .file
        .ok_or_else(|| ApiError::BadRequest(defaults::MISSING_FILE_MESSAGE.to_string()))?;
    let mime_type = detect_image_mime(file.content_type.as_deref(), &file.bytes);
    let request = AnalysisRequest::new(file.bytes, mime_type, form.city, form.orientation);

    let result = state.analyzer.analyze(&request).await.map_err(|e| {
        error!(error = %e, "Plan analysis failed");
        ApiError::from(e)
    })?;

    Ok(Json(result))
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to read form data: {}", e)))?
    {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some(defaults::FIELD_FILE) if !form.file_seen => {
                form.file_seen = true;
                // A part without filename or content type is a plain text value.
                if field.file_name().is_none() && field.content_type().is_none() {
                    continue;
                }
                let content_type = field.content_type().map(|c| c.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Internal(format!("Failed to read file data: {}", e)))?;
                form.file = Some(UploadedFile {
                    bytes: bytes.to_vec(),
                    content_type,
                });
            }
            Some(defaults::FIELD_CITY) if form.city.is_none() => {
                form.city = Some(read_text(field).await?);
            }
            Some(defaults::FIELD_ORIENTATION) if form.orientation.is_none() => {
                form.orientation = Some(read_text(field).await?);
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to read form field: {}", e)))
}
