use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct GeoLocation {
    pub city: String,
    #[serde(default)]
    pub region: String,
    pub country: String,
    pub radius_km: Option<i64>,
}

impl GeoLocation {
    /// "City, Region, Country" with blank parts skipped.
    pub fn location_string(&self) -> String {
        [&self.city, &self.region, &self.country]
            .into_iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeProfile {
    pub user_id: Uuid,
    pub resume_text: String,
    pub cover_letter_text: String,
    #[sqlx(flatten)]
    pub location: GeoLocation,
    pub updated_at: DateTime<Utc>,
}

impl ResumeProfile {
    pub fn new(user_id: Uuid, location: GeoLocation) -> Self {
        Self {
            user_id,
            resume_text: String::new(),
            cover_letter_text: String::new(),
            location,
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_string_joins_all_parts() {
        let location = GeoLocation {
            city: "Berlin".to_string(),
            region: "Berlin".to_string(),
            country: "Germany".to_string(),
            radius_km: Some(25),
        };
        assert_eq!(location.location_string(), "Berlin, Berlin, Germany");
    }

    #[test]
    fn test_location_string_skips_blank_region() {
        let location = GeoLocation {
            city: "Lyon".to_string(),
            region: "  ".to_string(),
            country: "France".to_string(),
            radius_km: None,
        };
        assert_eq!(location.location_string(), "Lyon, France");
    }

    #[test]
    fn test_location_string_empty() {
        assert_eq!(GeoLocation::default().location_string(), "");
    }
}
