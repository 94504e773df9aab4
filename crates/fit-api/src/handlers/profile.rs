//! Profile handlers

use axum::{extract::State, Json};
use serde::Deserialize;

use fit_core::domain::{ActivityLevel, Profile, Sex};

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Stored profile - GET /api/v1/profile
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ApiResponse<Profile>>, ApiError> {
    let profile = state
        .profiles
        .find_by_user(&user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;
    Ok(Json(ApiResponse::success(profile)))
}

#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub sex: String,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub birth_date: Option<String>,
    pub activity_level: String,
}

/// Create or replace the profile - PUT /api/v1/profile
pub async fn put_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ProfileRequest>,
) -> Result<Json<ApiResponse<Profile>>, ApiError> {
    let sex = Sex::from_str(&payload.sex)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown sex: {}", payload.sex)))?;
    let activity_level = ActivityLevel::from_str(&payload.activity_level).ok_or_else(|| {
        ApiError::BadRequest(format!("Unknown activity level: {}", payload.activity_level))
    })?;

    let profile = Profile::new(
        user_id,
        sex,
        payload.weight_kg,
        payload.height_cm,
        payload.birth_date,
        activity_level,
    )
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let stored = state.profiles.upsert(&profile).await?;
    state.insights.mark_inputs_changed();
    Ok(Json(ApiResponse::success(stored)))
}
