//! Axum route handlers for the Profile API.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{GeoLocation, ResumeProfile};
use crate::profile::pdf::extract_resume_text;
use crate::profile::{save_cover_letter, save_location, save_resume_text};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ResumeTextRequest {
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    pub cover_letter_text: String,
}

/// GET /api/v1/users/:user_id/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ResumeProfile>, AppError> {
    let profile = state
        .store
        .get_profile(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile for user {user_id} not found")))?;
    Ok(Json(profile))
}

/// PUT /api/v1/users/:user_id/profile/location
pub async fn handle_save_location(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(location): Json<GeoLocation>,
) -> Result<Json<ResumeProfile>, AppError> {
    Ok(Json(save_location(&state, user_id, location).await?))
}

/// PUT /api/v1/users/:user_id/profile/resume
pub async fn handle_save_resume(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<ResumeTextRequest>,
) -> Result<Json<ResumeProfile>, AppError> {
    Ok(Json(
        save_resume_text(&state, user_id, request.resume_text).await?,
    ))
}

/// PUT /api/v1/users/:user_id/profile/cover-letter
pub async fn handle_save_cover_letter(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<ResumeProfile>, AppError> {
    Ok(Json(
        save_cover_letter(&state, user_id, request.cover_letter_text).await?,
    ))
}

/// POST /api/v1/users/:user_id/profile/resume/pdf
///
/// Multipart upload with a `file` field. The extracted text replaces the resume.
pub async fn handle_upload_resume_pdf(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ResumeProfile>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        let text = extract_resume_text(data).await?;
        return Ok(Json(save_resume_text(&state, user_id, text).await?));
    }

    Err(AppError::Validation(
        "Multipart field 'file' is required".to_string(),
    ))
}
