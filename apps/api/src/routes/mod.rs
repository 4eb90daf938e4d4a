pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::applications::handlers as applications;
use crate::jobs::handlers as jobs;
use crate::matching::handlers as matching;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Match API
        .route("/api/v1/match", post(matching::handle_score_text))
        .route(
            "/api/v1/users/:user_id/jobs/:job_id/match",
            get(matching::handle_job_match),
        )
        // Profile API
        .route(
            "/api/v1/users/:user_id/profile",
            get(profile::handle_get_profile),
        )
        .route(
            "/api/v1/users/:user_id/profile/location",
            put(profile::handle_save_location),
        )
        .route(
            "/api/v1/users/:user_id/profile/resume",
            put(profile::handle_save_resume),
        )
        .route(
            "/api/v1/users/:user_id/profile/resume/pdf",
            post(profile::handle_upload_resume_pdf),
        )
        .route(
            "/api/v1/users/:user_id/profile/cover-letter",
            put(profile::handle_save_cover_letter),
        )
        // Jobs API
        .route(
            "/api/v1/users/:user_id/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_add_job),
        )
        .route(
            "/api/v1/users/:user_id/jobs/:job_id",
            get(jobs::handle_get_job).delete(jobs::handle_delete_job),
        )
        // Applications API
        .route(
            "/api/v1/users/:user_id/jobs/:job_id/application",
            post(applications::handle_start_application),
        )
        .route(
            "/api/v1/users/:user_id/applications",
            get(applications::handle_list_applications),
        )
        .route(
            "/api/v1/users/:user_id/applications/:application_id",
            get(applications::handle_get_application),
        )
        .route(
            "/api/v1/users/:user_id/applications/:application_id/status",
            put(applications::handle_update_status),
        )
        .route(
            "/api/v1/users/:user_id/applications/:application_id/cover-letter",
            put(applications::handle_save_cover_letter_draft),
        )
        .route(
            "/api/v1/users/:user_id/applications/:application_id/submit",
            post(applications::handle_submit_application),
        )
        .with_state(state)
}
