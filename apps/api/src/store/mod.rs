//! Persistence seam for profiles, job postings and applications.
//!
//! `InMemoryStore` backs tests and local runs without `DATABASE_URL`;
//! `PgStore` backs production.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::application::JobApplication;
use crate::models::job::JobPosting;
use crate::models::profile::ResumeProfile;

pub use memory::InMemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Every lookup is scoped to the owning user.
#[async_trait]
pub trait Store: Send + Sync {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<ResumeProfile>, StoreError>;
    async fn save_profile(&self, profile: &ResumeProfile) -> Result<(), StoreError>;

    /// Jobs owned by the user, in no particular order.
    async fn list_jobs(&self, owner_id: Uuid) -> Result<Vec<JobPosting>, StoreError>;
    async fn get_job(&self, owner_id: Uuid, job_id: Uuid)
        -> Result<Option<JobPosting>, StoreError>;
    async fn insert_job(&self, job: &JobPosting) -> Result<(), StoreError>;
    /// Removes the job and its applications. Returns false if nothing matched.
    async fn delete_job(&self, owner_id: Uuid, job_id: Uuid) -> Result<bool, StoreError>;

    async fn list_applications(&self, owner_id: Uuid)
        -> Result<Vec<JobApplication>, StoreError>;
    async fn get_application(
        &self,
        owner_id: Uuid,
        application_id: Uuid,
    ) -> Result<Option<JobApplication>, StoreError>;
    async fn find_application_for_job(
        &self,
        owner_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<JobApplication>, StoreError>;
    /// Inserts unless the owner already has an application for the same job.
    /// Returns the stored application and whether it was inserted.
    async fn insert_application_if_absent(
        &self,
        application: &JobApplication,
    ) -> Result<(JobApplication, bool), StoreError>;
    async fn update_application(&self, application: &JobApplication) -> Result<(), StoreError>;
}
