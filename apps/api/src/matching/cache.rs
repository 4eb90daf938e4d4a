use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::matching::scorer::MatchScore;

/// Match scores keyed by (user_id, job_id), stamped with the `updated_at` of
/// the profile they were computed from.
///
/// A lookup only hits when the stamp equals the caller's profile version.
/// Callers still invalidate on mutation: a profile save drops every entry of
/// that user, a job delete drops one entry.
#[derive(Debug, Default)]
pub struct MatchCache {
    entries: RwLock<HashMap<(Uuid, Uuid), CachedScore>>,
}

#[derive(Debug, Clone)]
struct CachedScore {
    profile_version: DateTime<Utc>,
    score: MatchScore,
}

impl MatchCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(
        &self,
        user_id: Uuid,
        job_id: Uuid,
        profile_version: DateTime<Utc>,
    ) -> Option<MatchScore> {
        self.entries
            .read()
            .await
            .get(&(user_id, job_id))
            .filter(|entry| entry.profile_version == profile_version)
            .map(|entry| entry.score.clone())
    }

    /// Never replaces an entry computed from a newer profile.
    pub async fn insert(
        &self,
        user_id: Uuid,
        job_id: Uuid,
        profile_version: DateTime<Utc>,
        score: MatchScore,
    ) {
        let mut entries = self.entries.write().await;
        let newer_present = entries
            .get(&(user_id, job_id))
            .is_some_and(|entry| entry.profile_version > profile_version);
        if !newer_present {
            entries.insert(
                (user_id, job_id),
                CachedScore {
                    profile_version,
                    score,
                },
            );
        }
    }

    pub async fn invalidate_job(&self, user_id: Uuid, job_id: Uuid) {
        self.entries.write().await.remove(&(user_id, job_id));
    }

    pub async fn invalidate_user(&self, user_id: Uuid) {
        self.entries
            .write()
            .await
            .retain(|(owner, _), _| *owner != user_id);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
