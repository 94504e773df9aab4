//! Log routes: chart and history views, plus the log lifecycle

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use fit_core::domain::{BurnLog, DatedValue, IntakeLog, Metric, WeightLog, WeightUnit};
use fit_core::repositories::LogStore;
use fit_core::services::views::{
    build_chart_view, build_history_view, ChartRange, HistoryFilter,
};
use fit_shared::constants::HISTORY_VISIBLE_FLOOR;
use fit_shared::types::EntityId;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    #[serde(default)]
    pub range: ChartRange,
}

/// Chart view - GET /api/v1/logs/{metric}/chart
pub async fn get_chart(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(metric): Path<String>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let metric = Metric::parse(&metric)?;
    let today = Local::now().date_naive();
    let view = match metric {
        Metric::Bodyweight => chart_of(&state.weight_logs, &user_id, query.range, today).await?,
        Metric::Calories => chart_of(&state.intake_logs, &user_id, query.range, today).await?,
        Metric::Burn => chart_of(&state.burn_logs, &user_id, query.range, today).await?,
    };
    Ok(Json(ApiResponse::success(view)))
}

async fn chart_of<T>(
    store: &Arc<dyn LogStore<T>>,
    user_id: &EntityId,
    range: ChartRange,
    today: NaiveDate,
) -> Result<Value, ApiError>
where
    T: DatedValue + Clone + Serialize,
{
    let rows = store.list_for_user(user_id).await?;
    let view = build_chart_view(&rows, range, today);
    serde_json::to_value(view).map_err(|e| ApiError::InternalError(e.to_string()))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub mode: Option<String>,
    pub date: Option<NaiveDate>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub visible: Option<usize>,
}

impl HistoryQuery {
    fn filter(&self) -> Result<HistoryFilter, ApiError> {
        match self.mode.as_deref() {
            Some("single") => {
                let date = self.date.ok_or_else(|| {
                    ApiError::BadRequest("Single mode requires a date".to_string())
                })?;
                Ok(HistoryFilter::Single { date })
            }
            Some("range") | None => Ok(HistoryFilter::Range {
                start: self.start,
                end: self.end,
            }),
            Some(other) => Err(ApiError::BadRequest(format!(
                "Unknown filter mode: {}",
                other
            ))),
        }
    }
}

/// History view - GET /api/v1/logs/{metric}/history
pub async fn get_history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(metric): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let metric = Metric::parse(&metric)?;
    let filter = query.filter()?;
    let visible = query.visible.unwrap_or(HISTORY_VISIBLE_FLOOR);
    let view = match metric {
        Metric::Bodyweight => history_of(&state.weight_logs, &user_id, &filter, visible).await?,
        Metric::Calories => history_of(&state.intake_logs, &user_id, &filter, visible).await?,
        Metric::Burn => history_of(&state.burn_logs, &user_id, &filter, visible).await?,
    };
    Ok(Json(ApiResponse::success(view)))
}

async fn history_of<T>(
    store: &Arc<dyn LogStore<T>>,
    user_id: &EntityId,
    filter: &HistoryFilter,
    visible: usize,
) -> Result<Value, ApiError>
where
    T: DatedValue + Clone + Serialize,
{
    let rows = store.list_for_user(user_id).await?;
    let view = build_history_view(&rows, filter, visible);
    serde_json::to_value(view).map_err(|e| ApiError::InternalError(e.to_string()))
}

#[derive(Debug, Deserialize)]
pub struct LogPayload {
    pub log_date: NaiveDate,
    pub value: f64,
    pub unit: Option<String>,
    pub source: Option<String>,
}

impl LogPayload {
    fn weight_unit(&self) -> Result<WeightUnit, ApiError> {
        match self.unit.as_deref() {
            None => Ok(WeightUnit::default()),
            Some(raw) => WeightUnit::from_str(raw)
                .ok_or_else(|| ApiError::BadRequest(format!("Unknown unit: {}", raw))),
        }
    }
}

/// Create a log entry - POST /api/v1/logs/{metric}
pub async fn create_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(metric): Path<String>,
    Json(payload): Json<LogPayload>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let metric = Metric::parse(&metric)?;
    let created = match metric {
        Metric::Bodyweight => {
            let log = WeightLog::new(user_id, payload.log_date, payload.value, payload.weight_unit()?)
                .map_err(|e| ApiError::BadRequest(e.to_string()))?;
            to_value(state.weight_logs.insert(&log).await?)?
        }
        Metric::Calories => {
            let log = IntakeLog::new(user_id, payload.log_date, payload.value)
                .map_err(|e| ApiError::BadRequest(e.to_string()))?;
            to_value(state.intake_logs.insert(&log).await?)?
        }
        Metric::Burn => {
            let log = BurnLog::new(user_id, payload.log_date, payload.value, payload.source.clone())
                .map_err(|e| ApiError::BadRequest(e.to_string()))?;
            to_value(state.burn_logs.insert(&log).await?)?
        }
    };
    state.insights.mark_inputs_changed();
    Ok(Json(ApiResponse::success(created)))
}

/// Edit a log entry - PUT /api/v1/logs/{metric}/{id}
pub async fn update_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path((metric, id)): Path<(String, Uuid)>,
    Json(payload): Json<LogPayload>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let metric = Metric::parse(&metric)?;
    let updated = match metric {
        Metric::Bodyweight => {
            let mut log =
                WeightLog::new(user_id, payload.log_date, payload.value, payload.weight_unit()?)
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
            log.id = id;
            to_value(state.weight_logs.update(&log).await?)?
        }
        Metric::Calories => {
            let mut log = IntakeLog::new(user_id, payload.log_date, payload.value)
                .map_err(|e| ApiError::BadRequest(e.to_string()))?;
            log.id = id;
            to_value(state.intake_logs.update(&log).await?)?
        }
        Metric::Burn => {
            let mut log =
                BurnLog::new(user_id, payload.log_date, payload.value, payload.source.clone())
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
            log.id = id;
            to_value(state.burn_logs.update(&log).await?)?
        }
    };
    state.insights.mark_inputs_changed();
    Ok(Json(ApiResponse::success(updated)))
}

/// Remove a log entry - DELETE /api/v1/logs/{metric}/{id}
pub async fn delete_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path((metric, id)): Path<(String, Uuid)>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let metric = Metric::parse(&metric)?;
    match metric {
        Metric::Bodyweight => state.weight_logs.delete(&id, &user_id).await?,
        Metric::Calories => state.intake_logs.delete(&id, &user_id).await?,
        Metric::Burn => state.burn_logs.delete(&id, &user_id).await?,
    }
    state.insights.mark_inputs_changed();
    Ok(Json(ApiResponse::success(())))
}

fn to_value<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::InternalError(e.to_string()))
}
