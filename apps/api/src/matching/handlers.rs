//! Axum route handlers for the Match API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::scorer::{MatchScore, MatchTier};
use crate::matching::{score_job, JobMatch};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScoreTextRequest {
    pub resume_text: String,
    pub job_text: String,
}

#[derive(Debug, Serialize)]
pub struct ScoreTextResponse {
    #[serde(flatten)]
    pub result: MatchScore,
    pub tier: MatchTier,
}

/// POST /api/v1/match
///
/// Scores arbitrary resume text against arbitrary job text. Nothing is stored.
pub async fn handle_score_text(
    State(state): State<AppState>,
    Json(request): Json<ScoreTextRequest>,
) -> Json<ScoreTextResponse> {
    let result = state
        .scorer
        .score(&request.resume_text, &request.job_text)
        .await;
    let tier = result.tier();
    Json(ScoreTextResponse { result, tier })
}

/// GET /api/v1/users/:user_id/jobs/:job_id/match
///
/// `null` when the user has no profile yet.
pub async fn handle_job_match(
    State(state): State<AppState>,
    Path((user_id, job_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Option<JobMatch>>, AppError> {
    let job = state
        .store
        .get_job(user_id, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let Some(profile) = state.store.get_profile(user_id).await? else {
        return Ok(Json(None));
    };

    Ok(Json(Some(score_job(&state, &profile, &job).await)))
}
