use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{Store, StoreError};
use crate::models::application::{ApplicationStatus, JobApplication};
use crate::models::job::JobPosting;
use crate::models::profile::ResumeProfile;

/// Postgres-backed store. Schema lives in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// `status` is TEXT in the database; parsed on the way out.
#[derive(Debug, FromRow)]
struct ApplicationRow {
    id: Uuid,
    owner_id: Uuid,
    job_id: Uuid,
    status: String,
    submission_checklist: Vec<String>,
    custom_cover_letter: Option<String>,
    application_source: Option<String>,
    date_applied: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ApplicationRow> for JobApplication {
    type Error = StoreError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<ApplicationStatus>()
            .map_err(|e| StoreError::Corrupt(format!("application {}: {e}", row.id)))?;
        Ok(JobApplication {
            id: row.id,
            owner_id: row.owner_id,
            job_id: row.job_id,
            status,
            submission_checklist: row.submission_checklist,
            custom_cover_letter: row.custom_cover_letter,
            application_source: row.application_source,
            date_applied: row.date_applied,
            updated_at: row.updated_at,
        })
    }
}

fn into_applications(rows: Vec<ApplicationRow>) -> Result<Vec<JobApplication>, StoreError> {
    rows.into_iter().map(JobApplication::try_from).collect()
}

#[async_trait]
impl Store for PgStore {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<ResumeProfile>, StoreError> {
        let profile = sqlx::query_as::<_, ResumeProfile>(
            "SELECT * FROM resume_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    async fn save_profile(&self, profile: &ResumeProfile) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO resume_profiles
                (user_id, resume_text, cover_letter_text, city, region, country, radius_km, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id) DO UPDATE SET
                resume_text = EXCLUDED.resume_text,
                cover_letter_text = EXCLUDED.cover_letter_text,
                city = EXCLUDED.city,
                region = EXCLUDED.region,
                country = EXCLUDED.country,
                radius_km = EXCLUDED.radius_km,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(profile.user_id)
        .bind(&profile.resume_text)
        .bind(&profile.cover_letter_text)
        .bind(&profile.location.city)
        .bind(&profile.location.region)
        .bind(&profile.location.country)
        .bind(profile.location.radius_km)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_jobs(&self, owner_id: Uuid) -> Result<Vec<JobPosting>, StoreError> {
        let jobs = sqlx::query_as::<_, JobPosting>(
            "SELECT * FROM job_postings WHERE owner_id = $1",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    async fn get_job(
        &self,
        owner_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<JobPosting>, StoreError> {
        let job = sqlx::query_as::<_, JobPosting>(
            "SELECT * FROM job_postings WHERE id = $1 AND owner_id = $2",
        )
        .bind(job_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(job)
    }

    async fn insert_job(&self, job: &JobPosting) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO job_postings
                (id, owner_id, title, company, location, description,
                 requirements, application_url, contact_details, date_posted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(job.id)
        .bind(job.owner_id)
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.location)
        .bind(&job.description)
        .bind(&job.requirements)
        .bind(&job.application_url)
        .bind(&job.contact_details)
        .bind(job.date_posted)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_job(&self, owner_id: Uuid, job_id: Uuid) -> Result<bool, StoreError> {
        // Applications go with it via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM job_postings WHERE id = $1 AND owner_id = $2")
            .bind(job_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_applications(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<JobApplication>, StoreError> {
        let rows = sqlx::query_as::<_, ApplicationRow>(
            "SELECT * FROM job_applications WHERE owner_id = $1 ORDER BY date_applied",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        into_applications(rows)
    }

    async fn get_application(
        &self,
        owner_id: Uuid,
        application_id: Uuid,
    ) -> Result<Option<JobApplication>, StoreError> {
        sqlx::query_as::<_, ApplicationRow>(
            "SELECT * FROM job_applications WHERE id = $1 AND owner_id = $2",
        )
        .bind(application_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?
        .map(JobApplication::try_from)
        .transpose()
    }

    async fn find_application_for_job(
        &self,
        owner_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<JobApplication>, StoreError> {
        sqlx::query_as::<_, ApplicationRow>(
            "SELECT * FROM job_applications WHERE job_id = $1 AND owner_id = $2",
        )
        .bind(job_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?
        .map(JobApplication::try_from)
        .transpose()
    }

    async fn insert_application_if_absent(
        &self,
        application: &JobApplication,
    ) -> Result<(JobApplication, bool), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO job_applications
                (id, owner_id, job_id, status, submission_checklist,
                 custom_cover_letter, application_source, date_applied, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (owner_id, job_id) DO NOTHING
            "#,
        )
        .bind(application.id)
        .bind(application.owner_id)
        .bind(application.job_id)
        .bind(application.status.as_str())
        .bind(&application.submission_checklist)
        .bind(&application.custom_cover_letter)
        .bind(&application.application_source)
        .bind(application.date_applied)
        .bind(application.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            return Ok((application.clone(), true));
        }

        let existing = self
            .find_application_for_job(application.owner_id, application.job_id)
            .await?
            .ok_or_else(|| {
                StoreError::Corrupt(format!(
                    "application for job {} conflicted but is missing",
                    application.job_id
                ))
            })?;
        Ok((existing, false))
    }

    async fn update_application(&self, application: &JobApplication) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE job_applications SET
                status = $1,
                submission_checklist = $2,
                custom_cover_letter = $3,
                updated_at = $4
            WHERE id = $5 AND owner_id = $6
            "#,
        )
        .bind(application.status.as_str())
        .bind(&application.submission_checklist)
        .bind(&application.custom_cover_letter)
        .bind(application.updated_at)
        .bind(application.id)
        .bind(application.owner_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
