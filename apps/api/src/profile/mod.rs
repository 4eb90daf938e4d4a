// Resume profile: resume text, default cover letter and location.
// Every save invalidates the user's cached match scores.

pub mod handlers;
pub mod pdf;

use chrono::{Duration, Utc};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{GeoLocation, ResumeProfile};
use crate::state::AppState;

const LOCATION_FIRST: &str = "Set up your location before saving resume or cover letter";

/// Creates the profile on first use; otherwise replaces its location only.
pub async fn save_location(
    state: &AppState,
    user_id: Uuid,
    location: GeoLocation,
) -> Result<ResumeProfile, AppError> {
    let location = validate_location(location)?;

    let profile = match state.store.get_profile(user_id).await? {
        Some(mut existing) => {
            existing.location = location;
            touch(&mut existing);
            existing
        }
        None => ResumeProfile::new(user_id, location),
    };

    persist(state, &profile).await?;
    info!(%user_id, location = %profile.location.location_string(), "location saved");
    Ok(profile)
}

pub async fn save_resume_text(
    state: &AppState,
    user_id: Uuid,
    resume_text: String,
) -> Result<ResumeProfile, AppError> {
    let mut profile = require_profile(state, user_id).await?;
    profile.resume_text = resume_text;
    touch(&mut profile);

    persist(state, &profile).await?;
    info!(%user_id, chars = profile.resume_text.chars().count(), "resume saved");
    Ok(profile)
}

pub async fn save_cover_letter(
    state: &AppState,
    user_id: Uuid,
    cover_letter_text: String,
) -> Result<ResumeProfile, AppError> {
    let mut profile = require_profile(state, user_id).await?;
    profile.cover_letter_text = cover_letter_text;
    touch(&mut profile);

    persist(state, &profile).await?;
    info!(%user_id, "default cover letter saved");
    Ok(profile)
}

/// Bumps `updated_at`, strictly past the previous value: it versions cached
/// match scores.
fn touch(profile: &mut ResumeProfile) {
    profile.updated_at = Utc::now().max(profile.updated_at + Duration::microseconds(1));
}

async fn require_profile(state: &AppState, user_id: Uuid) -> Result<ResumeProfile, AppError> {
    state
        .store
        .get_profile(user_id)
        .await?
        .ok_or_else(|| AppError::Validation(LOCATION_FIRST.to_string()))
}

async fn persist(state: &AppState, profile: &ResumeProfile) -> Result<(), AppError> {
    state.store.save_profile(profile).await?;
    state.match_cache.invalidate_user(profile.user_id).await;
    Ok(())
}

/// Trims every part; city and country are required.
fn validate_location(location: GeoLocation) -> Result<GeoLocation, AppError> {
    let location = GeoLocation {
        city: location.city.trim().to_string(),
        region: location.region.trim().to_string(),
        country: location.country.trim().to_string(),
        radius_km: location.radius_km,
    };

    if location.city.is_empty() || location.country.is_empty() {
        return Err(AppError::Validation(
            "City and country are required".to_string(),
        ));
    }
    if matches!(location.radius_km, Some(r) if r < 0) {
        return Err(AppError::Validation(
            "radius_km cannot be negative".to_string(),
        ));
    }
    Ok(location)
}
