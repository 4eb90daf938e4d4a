use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Items a user confirms before an application is marked as applied.
pub const DEFAULT_CHECKLIST: &[&str] = &["Resume attached", "Cover letter attached"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Applied,
    Interviewing,
    Offered,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Interviewing => "interviewing",
            ApplicationStatus::Offered => "offered",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// Display label. A pending application is still a draft.
    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Draft",
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Interviewing => "Interviewing",
            ApplicationStatus::Offered => "Offered",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown application status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ApplicationStatus::Pending),
            "applied" => Ok(ApplicationStatus::Applied),
            "interviewing" => Ok(ApplicationStatus::Interviewing),
            "offered" => Ok(ApplicationStatus::Offered),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub job_id: Uuid,
    pub status: ApplicationStatus,
    pub submission_checklist: Vec<String>,
    pub custom_cover_letter: Option<String>,
    /// Where the application was started, e.g. "manual" or "external_link".
    pub application_source: Option<String>,
    pub date_applied: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobApplication {
    pub fn new(owner_id: Uuid, job_id: Uuid, application_source: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            job_id,
            status: ApplicationStatus::Pending,
            submission_checklist: DEFAULT_CHECKLIST.iter().map(|s| s.to_string()).collect(),
            custom_cover_letter: None,
            application_source,
            date_applied: now,
            updated_at: now,
        }
    }

    /// Custom letter if one was saved, otherwise the profile default.
    pub fn effective_cover_letter(&self, profile_default: Option<&str>) -> String {
        self.custom_cover_letter
            .as_deref()
            .or(profile_default)
            .unwrap_or_default()
            .to_string()
    }
}
