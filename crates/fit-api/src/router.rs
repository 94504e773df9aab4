//! Router assembly

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};

use crate::handlers::{dashboard, health, insights, logs, pages, profile};
use crate::middleware::session_gate;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/insights", get(insights::get_insights))
        .route(
            "/profile",
            get(profile::get_profile).put(profile::put_profile),
        )
        .route("/logs/{metric}", post(logs::create_log))
        .route("/logs/{metric}/chart", get(logs::get_chart))
        .route("/logs/{metric}/history", get(logs::get_history))
        .route(
            "/logs/{metric}/{id}",
            axum::routing::put(logs::update_log).delete(logs::delete_log),
        );

    let pages = Router::new()
        .route("/dashboard", get(pages::app_shell))
        .route("/bodyweight", get(pages::app_shell))
        .route("/calories", get(pages::app_shell))
        .route("/burn", get(pages::app_shell))
        .route("/insights", get(pages::app_shell))
        .route("/profile", get(pages::app_shell))
        .route("/login", get(pages::app_shell))
        .route("/signup", get(pages::app_shell))
        .route("/forgot-password", get(pages::app_shell));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api)
        .merge(pages)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            session_gate,
        ))
        .with_state(state)
}
