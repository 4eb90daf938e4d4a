use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::matching::scorer::job_text;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPosting {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub requirements: Option<String>,
    pub application_url: Option<String>,
    pub contact_details: Option<String>,
    pub date_posted: DateTime<Utc>,
}

impl JobPosting {
    /// Text the match scorer reads: description, then requirements.
    pub fn job_text(&self) -> String {
        job_text(&self.description, self.requirements.as_deref())
    }
}
