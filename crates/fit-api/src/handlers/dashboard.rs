//! Dashboard handler

use axum::{extract::State, Json};
use chrono::Local;

use fit_core::services::DashboardData;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Aggregated dashboard - GET /api/v1/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ApiResponse<DashboardData>>, ApiError> {
    let today = Local::now().date_naive();
    let data = state.dashboard.dashboard(&user_id, today).await?;
    Ok(Json(ApiResponse::success(data)))
}
