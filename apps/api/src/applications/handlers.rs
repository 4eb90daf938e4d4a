//! Axum route handlers for the Applications API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::applications::{
    ensure_application, get_application_detail, save_cover_letter_draft, submit_application,
    update_status, ApplicationDetail,
};
use crate::errors::AppError;
use crate::models::application::{ApplicationStatus, JobApplication};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct StartApplicationRequest {
    pub source: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: ApplicationStatus,
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterDraftRequest {
    pub cover_letter: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub cover_letter: String,
    #[serde(default)]
    pub completed_checklist: Vec<String>,
}

/// GET /api/v1/users/:user_id/applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<JobApplication>>, AppError> {
    Ok(Json(state.store.list_applications(user_id).await?))
}

/// POST /api/v1/users/:user_id/jobs/:job_id/application
///
/// 201 with a new application, 200 with the existing one.
pub async fn handle_start_application(
    State(state): State<AppState>,
    Path((user_id, job_id)): Path<(Uuid, Uuid)>,
    request: Option<Json<StartApplicationRequest>>,
) -> Result<(StatusCode, Json<JobApplication>), AppError> {
    let source = request.and_then(|Json(r)| r.source);
    let (application, created) = ensure_application(&state, user_id, job_id, source).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(application)))
}

/// GET /api/v1/users/:user_id/applications/:id
pub async fn handle_get_application(
    State(state): State<AppState>,
    Path((user_id, application_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApplicationDetail>, AppError> {
    Ok(Json(
        get_application_detail(&state, user_id, application_id).await?,
    ))
}

/// PUT /api/v1/users/:user_id/applications/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path((user_id, application_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<StatusRequest>,
) -> Result<Json<JobApplication>, AppError> {
    Ok(Json(
        update_status(&state, user_id, application_id, request.status).await?,
    ))
}

/// PUT /api/v1/users/:user_id/applications/:id/cover-letter
pub async fn handle_save_cover_letter_draft(
    State(state): State<AppState>,
    Path((user_id, application_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<CoverLetterDraftRequest>,
) -> Result<Json<JobApplication>, AppError> {
    Ok(Json(
        save_cover_letter_draft(&state, user_id, application_id, request.cover_letter).await?,
    ))
}

/// POST /api/v1/users/:user_id/applications/:id/submit
pub async fn handle_submit_application(
    State(state): State<AppState>,
    Path((user_id, application_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<JobApplication>, AppError> {
    Ok(Json(
        submit_application(
            &state,
            user_id,
            application_id,
            request.cover_letter,
            &request.completed_checklist,
        )
        .await?,
    ))
}
