// Job applications: one per (user, job), status tracking, cover letter drafts
// and the checklist-gated submit step.

pub mod handlers;

use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{ApplicationStatus, JobApplication};
use crate::state::AppState;

/// Application plus the cover letter the apply dialog should start from.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationDetail {
    #[serde(flatten)]
    pub application: JobApplication,
    pub status_label: &'static str,
    pub effective_cover_letter: String,
}

/// Returns the user's application for the job, creating it on first call.
/// The flag is true when a new application was created.
pub async fn ensure_application(
    state: &AppState,
    user_id: Uuid,
    job_id: Uuid,
    source: Option<String>,
) -> Result<(JobApplication, bool), AppError> {
    if state.store.get_job(user_id, job_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }

    let source = source
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let (application, created) = state
        .store
        .insert_application_if_absent(&JobApplication::new(user_id, job_id, source))
        .await?;
    if created {
        info!(%user_id, %job_id, application_id = %application.id, "application created");
    }
    Ok((application, created))
}

pub async fn get_application_detail(
    state: &AppState,
    user_id: Uuid,
    application_id: Uuid,
) -> Result<ApplicationDetail, AppError> {
    let application = load(state, user_id, application_id).await?;
    let profile = state.store.get_profile(user_id).await?;
    let effective_cover_letter = application
        .effective_cover_letter(profile.as_ref().map(|p| p.cover_letter_text.as_str()));

    Ok(ApplicationDetail {
        status_label: application.status.label(),
        application,
        effective_cover_letter,
    })
}

pub async fn update_status(
    state: &AppState,
    user_id: Uuid,
    application_id: Uuid,
    status: ApplicationStatus,
) -> Result<JobApplication, AppError> {
    let mut application = load(state, user_id, application_id).await?;
    let previous = application.status;
    application.status = status;
    application.updated_at = Utc::now();
    state.store.update_application(&application).await?;
    info!(%user_id, %application_id, from = %previous, to = %status, "application status changed");
    Ok(application)
}

/// Saves the custom cover letter without changing status.
pub async fn save_cover_letter_draft(
    state: &AppState,
    user_id: Uuid,
    application_id: Uuid,
    cover_letter: String,
) -> Result<JobApplication, AppError> {
    let mut application = load(state, user_id, application_id).await?;
    application.custom_cover_letter = Some(cover_letter);
    application.updated_at = Utc::now();
    state.store.update_application(&application).await?;
    Ok(application)
}

/// Saves the cover letter and marks the application as applied.
/// Every checklist item must be confirmed.
pub async fn submit_application(
    state: &AppState,
    user_id: Uuid,
    application_id: Uuid,
    cover_letter: String,
    completed_checklist: &[String],
) -> Result<JobApplication, AppError> {
    let mut application = load(state, user_id, application_id).await?;

    let missing = missing_checklist_items(&application.submission_checklist, completed_checklist);
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Complete all checklist items first: {}",
            missing.join(", ")
        )));
    }

    application.custom_cover_letter = Some(cover_letter);
    application.status = ApplicationStatus::Applied;
    application.updated_at = Utc::now();
    state.store.update_application(&application).await?;
    info!(%user_id, %application_id, "application marked as applied");
    Ok(application)
}

fn missing_checklist_items<'a>(checklist: &'a [String], completed: &[String]) -> Vec<&'a str> {
    checklist
        .iter()
        .filter(|item| !completed.contains(*item))
        .map(String::as_str)
        .collect()
}

async fn load(
    state: &AppState,
    user_id: Uuid,
    application_id: Uuid,
) -> Result<JobApplication, AppError> {
    state
        .store
        .get_application(user_id, application_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {application_id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::{add_job, NewJobPosting};
    use crate::models::profile::GeoLocation;
    use crate::profile::{save_cover_letter, save_location};

    async fn state_with_job() -> (AppState, Uuid, Uuid) {
        let state = AppState::in_memory();
        let user = Uuid::new_v4();
        let job = add_job(
            &state,
            user,
            NewJobPosting {
                title: "Rust Engineer".to_string(),
                company: "Ferris Labs".to_string(),
                description: "Write Rust".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        (state, user, job.id)
    }

    fn checklist() -> Vec<String> {
        vec![
            "Resume attached".to_string(),
            "Cover letter attached".to_string(),
        ]
    }

    #[tokio::test]
    async fn test_ensure_is_idempotent() {
        let (state, user, job) = state_with_job().await;
        let (first, created) = ensure_application(&state, user, job, None).await.unwrap();
        assert!(created);
        let (second, created) = ensure_application(&state, user, job, None).await.unwrap();
        assert!(!created);
        assert_eq!(first.id, second.id);
        assert_eq!(state.store.list_applications(user).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_ensure_creates_one_application() {
        let (state, user, job) = state_with_job().await;
        let (a, b) = tokio::join!(
            ensure_application(&state, user, job, None),
            ensure_application(&state, user, job, None),
        );
        let (a, a_created) = a.unwrap();
        let (b, b_created) = b.unwrap();
        assert_eq!(a.id, b.id);
        assert!(a_created ^ b_created);
        assert_eq!(state.store.list_applications(user).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ensure_unknown_job_is_not_found() {
        let (state, user, _) = state_with_job().await;
        let result = ensure_application(&state, user, Uuid::new_v4(), None).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_submit_requires_full_checklist() {
        let (state, user, job) = state_with_job().await;
        let (app, _) = ensure_application(&state, user, job, None).await.unwrap();

        let result = submit_application(
            &state,
            user,
            app.id,
            "Hello".to_string(),
            &["Resume attached".to_string()],
        )
        .await;
        match result {
            Err(AppError::Validation(msg)) => assert!(msg.contains("Cover letter attached")),
            other => panic!("expected validation error, got {other:?}"),
        }

        let stored = state.store.get_application(user, app.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ApplicationStatus::Pending);
        assert!(stored.custom_cover_letter.is_none());
    }

    #[tokio::test]
    async fn test_submit_marks_applied_and_saves_letter() {
        let (state, user, job) = state_with_job().await;
        let (app, _) = ensure_application(&state, user, job, None).await.unwrap();

        let submitted = submit_application(&state, user, app.id, "Hello".to_string(), &checklist())
            .await
            .unwrap();
        assert_eq!(submitted.status, ApplicationStatus::Applied);
        assert_eq!(submitted.custom_cover_letter.as_deref(), Some("Hello"));
    }

    #[tokio::test]
    async fn test_detail_falls_back_to_profile_cover_letter() {
        let (state, user, job) = state_with_job().await;
        save_location(
            &state,
            user,
            GeoLocation {
                city: "Oslo".to_string(),
                country: "Norway".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        save_cover_letter(&state, user, "Default letter".to_string())
            .await
            .unwrap();
        let (app, _) = ensure_application(&state, user, job, None).await.unwrap();

        let detail = get_application_detail(&state, user, app.id).await.unwrap();
        assert_eq!(detail.effective_cover_letter, "Default letter");
        assert_eq!(detail.status_label, "Draft");

        save_cover_letter_draft(&state, user, app.id, "Tailored".to_string())
            .await
            .unwrap();
        let detail = get_application_detail(&state, user, app.id).await.unwrap();
        assert_eq!(detail.effective_cover_letter, "Tailored");
    }

    #[tokio::test]
    async fn test_update_status() {
        let (state, user, job) = state_with_job().await;
        let (app, _) = ensure_application(&state, user, job, None).await.unwrap();
        let updated = update_status(&state, user, app.id, ApplicationStatus::Interviewing)
            .await
            .unwrap();
        assert_eq!(updated.status, ApplicationStatus::Interviewing);

        let other_user = Uuid::new_v4();
        let result = update_status(&state, other_user, app.id, ApplicationStatus::Offered).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_missing_checklist_items_keeps_order() {
        let list = checklist();
        let missing = missing_checklist_items(&list, &[]);
        assert_eq!(missing, vec!["Resume attached", "Cover letter attached"]);
        assert!(missing_checklist_items(&list, &list).is_empty());
    }
}
