// Resume ↔ job matching: tokenizer, scorer, per-user score cache, HTTP handlers.

pub mod cache;
pub mod handlers;
pub mod scorer;
pub mod tokenizer;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::models::job::JobPosting;
use crate::models::profile::ResumeProfile;
use crate::state::AppState;
use scorer::{MatchScore, MatchTier};

/// Match result for a stored job, as the job list and detail views show it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMatch {
    pub job_id: Uuid,
    pub score: u8,
    pub matched_keywords: Vec<String>,
    pub tier: MatchTier,
}

impl JobMatch {
    pub fn new(job_id: Uuid, result: MatchScore) -> Self {
        let tier = result.tier();
        Self {
            job_id,
            score: result.score,
            matched_keywords: result.matched_keywords,
            tier,
        }
    }
}

/// Scores the profile's resume against a job, reading through the match cache.
pub async fn score_job(state: &AppState, profile: &ResumeProfile, job: &JobPosting) -> JobMatch {
    if let Some(hit) = state
        .match_cache
        .get(profile.user_id, job.id, profile.updated_at)
        .await
    {
        debug!(user_id = %profile.user_id, job_id = %job.id, "match cache hit");
        return JobMatch::new(job.id, hit);
    }

    let result = state
        .scorer
        .score(&profile.resume_text, &job.job_text())
        .await;
    debug!(
        user_id = %profile.user_id,
        job_id = %job.id,
        score = result.score,
        backend = state.scorer.backend(),
        "match computed"
    );
    state
        .match_cache
        .insert(profile.user_id, job.id, profile.updated_at, result.clone())
        .await;

    JobMatch::new(job.id, result)
}
