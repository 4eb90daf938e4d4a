//! Search, location filter and ordering for the job list.

use serde::{Deserialize, Serialize};

use crate::matching::scorer::MatchTier;
use crate::models::application::ApplicationStatus;
use crate::models::job::JobPosting;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Date,
    Score,
}

#[derive(Debug, Default, Deserialize)]
pub struct JobListQuery {
    /// Case-insensitive substring on title, company or location.
    pub q: Option<String>,
    /// Keep only jobs located in the profile's location.
    #[serde(default)]
    pub near_me: bool,
    #[serde(default)]
    pub sort: SortBy,
}

/// One row of the job list.
#[derive(Debug, Clone, Serialize)]
pub struct JobSummary {
    #[serde(flatten)]
    pub job: JobPosting,
    pub match_score: Option<u8>,
    pub tier: Option<MatchTier>,
    pub application_status: Option<ApplicationStatus>,
}

pub fn matches_search(job: &JobPosting, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    [&job.title, &job.company, &job.location]
        .into_iter()
        .any(|field| field.to_lowercase().contains(&query))
}

pub fn matches_location(job: &JobPosting, location: &str) -> bool {
    job.location
        .to_lowercase()
        .contains(&location.trim().to_lowercase())
}

/// Applies the search query, then the location filter when one is given.
/// A blank location string disables the location filter.
pub fn filter_jobs(
    jobs: Vec<JobPosting>,
    query: Option<&str>,
    location: Option<&str>,
) -> Vec<JobPosting> {
    let location = location.filter(|l| !l.trim().is_empty());
    jobs.into_iter()
        .filter(|job| query.map_or(true, |q| matches_search(job, q)))
        .filter(|job| location.map_or(true, |l| matches_location(job, l)))
        .collect()
}

/// Date: newest first. Score: highest first, unscored last, ties newest first.
pub fn sort_summaries(summaries: &mut [JobSummary], sort: SortBy) {
    match sort {
        SortBy::Date => summaries.sort_by(|a, b| b.job.date_posted.cmp(&a.job.date_posted)),
        SortBy::Score => summaries.sort_by(|a, b| {
            b.match_score
                .cmp(&a.match_score)
                .then_with(|| b.job.date_posted.cmp(&a.job.date_posted))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn job(title: &str, company: &str, location: &str, age_days: i64) -> JobPosting {
        JobPosting {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: title.to_string(),
            company: company.to_string(),
            location: location.to_string(),
            description: "Build services".to_string(),
            requirements: None,
            application_url: None,
            contact_details: None,
            date_posted: Utc::now() - Duration::days(age_days),
        }
    }

    fn summary(job: JobPosting, score: Option<u8>) -> JobSummary {
        JobSummary {
            job,
            match_score: score,
            tier: score.map(MatchTier::from_score),
            application_status: None,
        }
    }

    #[test]
    fn test_search_matches_title_company_or_location() {
        let posting = job("Rust Engineer", "Ferris Labs", "Berlin, Germany", 0);
        assert!(matches_search(&posting, "rust"));
        assert!(matches_search(&posting, "FERRIS"));
        assert!(matches_search(&posting, "berlin"));
        assert!(matches_search(&posting, "  "));
        assert!(!matches_search(&posting, "python"));
    }

    #[test]
    fn test_filter_by_location_string() {
        let jobs = vec![
            job("A", "X", "Berlin, Berlin, Germany - Hybrid", 0),
            job("B", "Y", "Munich, Bavaria, Germany", 0),
        ];
        let filtered = filter_jobs(jobs, None, Some("Berlin, Berlin, Germany"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "A");
    }

    #[test]
    fn test_blank_location_disables_filter() {
        let jobs = vec![job("A", "X", "Berlin", 0), job("B", "Y", "Paris", 0)];
        assert_eq!(filter_jobs(jobs, None, Some("")).len(), 2);
    }

    #[test]
    fn test_sort_by_date_newest_first() {
        let mut rows = vec![
            summary(job("old", "X", "", 10), None),
            summary(job("new", "X", "", 1), None),
        ];
        sort_summaries(&mut rows, SortBy::Date);
        assert_eq!(rows[0].job.title, "new");
    }

    #[test]
    fn test_sort_by_score_unscored_last_and_ties_by_date() {
        let mut rows = vec![
            summary(job("unscored", "X", "", 0), None),
            summary(job("mid-old", "X", "", 9), Some(50)),
            summary(job("top", "X", "", 5), Some(90)),
            summary(job("mid-new", "X", "", 2), Some(50)),
        ];
        sort_summaries(&mut rows, SortBy::Score);
        let titles: Vec<&str> = rows.iter().map(|r| r.job.title.as_str()).collect();
        assert_eq!(titles, vec!["top", "mid-new", "mid-old", "unscored"]);
    }

    #[test]
    fn test_sort_by_deserializes_snake_case() {
        let sort: SortBy = serde_json::from_str(r#""score""#).unwrap();
        assert_eq!(sort, SortBy::Score);
        assert_eq!(SortBy::default(), SortBy::Date);
    }

    #[test]
    fn test_summary_serializes_flat_with_match_score() {
        let row = summary(job("Rust Engineer", "Ferris Labs", "Berlin", 0), Some(75));
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["title"], "Rust Engineer");
        assert_eq!(value["match_score"], 75);
        assert_eq!(value["tier"], "strong");
        assert!(value.get("score").is_none());
    }
}
