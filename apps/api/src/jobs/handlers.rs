//! Axum route handlers for the Jobs API.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::listing::{filter_jobs, sort_summaries, JobListQuery, JobSummary};
use crate::jobs::{add_job, delete_job, NewJobPosting};
use crate::matching::score_job;
use crate::models::job::JobPosting;
use crate::state::AppState;

/// POST /api/v1/users/:user_id/jobs
pub async fn handle_add_job(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<NewJobPosting>,
) -> Result<(StatusCode, Json<JobPosting>), AppError> {
    let job = add_job(&state, user_id, request).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/users/:user_id/jobs?q=&near_me=&sort=
///
/// Each row carries the match score (when a profile exists) and the
/// application status (when one was started).
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<JobListQuery>,
) -> Result<Json<Vec<JobSummary>>, AppError> {
    let jobs = state.store.list_jobs(user_id).await?;
    let profile = state.store.get_profile(user_id).await?;

    let location = match (&profile, query.near_me) {
        (Some(profile), true) => Some(profile.location.location_string()),
        _ => None,
    };
    let jobs = filter_jobs(jobs, query.q.as_deref(), location.as_deref());

    let statuses: HashMap<Uuid, _> = state
        .store
        .list_applications(user_id)
        .await?
        .into_iter()
        .map(|app| (app.job_id, app.status))
        .collect();

    let mut summaries = Vec::with_capacity(jobs.len());
    for job in jobs {
        let matched = match &profile {
            Some(profile) => Some(score_job(&state, profile, &job).await),
            None => None,
        };
        summaries.push(JobSummary {
            application_status: statuses.get(&job.id).copied(),
            match_score: matched.as_ref().map(|m| m.score),
            tier: matched.as_ref().map(|m| m.tier),
            job,
        });
    }

    sort_summaries(&mut summaries, query.sort);
    Ok(Json(summaries))
}

/// GET /api/v1/users/:user_id/jobs/:job_id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path((user_id, job_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<JobPosting>, AppError> {
    let job = state
        .store
        .get_job(user_id, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    Ok(Json(job))
}

/// DELETE /api/v1/users/:user_id/jobs/:job_id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path((user_id, job_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    delete_job(&state, user_id, job_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
