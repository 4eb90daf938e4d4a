// Job postings: creation with field validation, listing, deletion.

pub mod handlers;
pub mod listing;

use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::JobPosting;
use crate::state::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewJobPosting {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    pub description: String,
    pub requirements: Option<String>,
    pub application_url: Option<String>,
    pub contact_details: Option<String>,
}

/// Trims every field; blank optional fields become `None`.
fn build_posting(owner_id: Uuid, input: NewJobPosting) -> Result<JobPosting, AppError> {
    let title = input.title.trim().to_string();
    let company = input.company.trim().to_string();
    let description = input.description.trim().to_string();

    let mut missing = Vec::new();
    if title.is_empty() {
        missing.push("title");
    }
    if company.is_empty() {
        missing.push("company");
    }
    if description.is_empty() {
        missing.push("description");
    }
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Required fields missing: {}",
            missing.join(", ")
        )));
    }

    Ok(JobPosting {
        id: Uuid::new_v4(),
        owner_id,
        title,
        company,
        location: input.location.trim().to_string(),
        description,
        requirements: non_blank(input.requirements),
        application_url: non_blank(input.application_url),
        contact_details: non_blank(input.contact_details),
        date_posted: Utc::now(),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub async fn add_job(
    state: &AppState,
    owner_id: Uuid,
    input: NewJobPosting,
) -> Result<JobPosting, AppError> {
    let job = build_posting(owner_id, input)?;
    state.store.insert_job(&job).await?;
    info!(%owner_id, job_id = %job.id, title = %job.title, "job posting added");
    Ok(job)
}

/// Deletes the job and its applications; drops the cached score.
pub async fn delete_job(state: &AppState, owner_id: Uuid, job_id: Uuid) -> Result<(), AppError> {
    if !state.store.delete_job(owner_id, job_id).await? {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }
    state.match_cache.invalidate_job(owner_id, job_id).await;
    info!(%owner_id, %job_id, "job posting deleted");
    Ok(())
}
