use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::models::application::JobApplication;
use crate::models::job::JobPosting;
use crate::models::profile::ResumeProfile;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    profiles: RwLock<HashMap<Uuid, ResumeProfile>>,
    jobs: RwLock<HashMap<Uuid, JobPosting>>,
    applications: RwLock<HashMap<Uuid, JobApplication>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<ResumeProfile>, StoreError> {
        Ok(self.profiles.read().await.get(&user_id).cloned())
    }

    async fn save_profile(&self, profile: &ResumeProfile) -> Result<(), StoreError> {
        self.profiles
            .write()
            .await
            .insert(profile.user_id, profile.clone());
        Ok(())
    }

    async fn list_jobs(&self, owner_id: Uuid) -> Result<Vec<JobPosting>, StoreError> {
        Ok(self
            .jobs
            .read()
            .await
            .values()
            .filter(|job| job.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn get_job(
        &self,
        owner_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<JobPosting>, StoreError> {
        Ok(self
            .jobs
            .read()
            .await
            .get(&job_id)
            .filter(|job| job.owner_id == owner_id)
            .cloned())
    }

    async fn insert_job(&self, job: &JobPosting) -> Result<(), StoreError> {
        self.jobs.write().await.insert(job.id, job.clone());
        Ok(())
    }

    async fn delete_job(&self, owner_id: Uuid, job_id: Uuid) -> Result<bool, StoreError> {
        let mut jobs = self.jobs.write().await;
        let owned = jobs
            .get(&job_id)
            .map(|job| job.owner_id == owner_id)
            .unwrap_or(false);
        if !owned {
            return Ok(false);
        }
        jobs.remove(&job_id);
        self.applications
            .write()
            .await
            .retain(|_, app| app.job_id != job_id);
        Ok(true)
    }

    async fn list_applications(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<JobApplication>, StoreError> {
        let mut apps: Vec<JobApplication> = self
            .applications
            .read()
            .await
            .values()
            .filter(|app| app.owner_id == owner_id)
            .cloned()
            .collect();
        apps.sort_by_key(|app| app.date_applied);
        Ok(apps)
    }

    async fn get_application(
        &self,
        owner_id: Uuid,
        application_id: Uuid,
    ) -> Result<Option<JobApplication>, StoreError> {
        Ok(self
            .applications
            .read()
            .await
            .get(&application_id)
            .filter(|app| app.owner_id == owner_id)
            .cloned())
    }

    async fn find_application_for_job(
        &self,
        owner_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<JobApplication>, StoreError> {
        Ok(self
            .applications
            .read()
            .await
            .values()
            .find(|app| app.owner_id == owner_id && app.job_id == job_id)
            .cloned())
    }

    async fn insert_application_if_absent(
        &self,
        application: &JobApplication,
    ) -> Result<(JobApplication, bool), StoreError> {
        // Check and insert under one write lock.
        let mut applications = self.applications.write().await;
        if let Some(existing) = applications
            .values()
            .find(|app| app.owner_id == application.owner_id && app.job_id == application.job_id)
        {
            return Ok((existing.clone(), false));
        }
        applications.insert(application.id, application.clone());
        Ok((application.clone(), true))
    }

    async fn update_application(&self, application: &JobApplication) -> Result<(), StoreError> {
        self.applications
            .write()
            .await
            .insert(application.id, application.clone());
        Ok(())
    }
}
