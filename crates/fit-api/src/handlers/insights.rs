//! AI insights handler

use axum::{extract::State, Json};
use chrono::Local;
use serde::Serialize;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Serialize)]
pub struct InsightsResponse {
    pub text: String,
}

/// Insight text for the current dashboard - GET /api/v1/insights
pub async fn get_insights(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ApiResponse<InsightsResponse>>, ApiError> {
    if state.insights_limiter.check().is_err() {
        return Err(ApiError::TooManyRequests(
            "Insights rate limit reached, try again shortly".to_string(),
        ));
    }

    let today = Local::now().date_naive();
    let data = state.dashboard.dashboard(&user_id, today).await?;
    let text = state.insights.insights(&data).await?;
    Ok(Json(ApiResponse::success(InsightsResponse { text })))
}
