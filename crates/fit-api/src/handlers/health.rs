//! Health check handler

use axum::Json;
use serde::Serialize;

use crate::response::ApiResponse;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

/// Liveness probe - GET /health
pub async fn health_check() -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::success(HealthStatus { status: "ok" }))
}
