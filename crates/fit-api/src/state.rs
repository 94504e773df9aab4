//! Application state shared across handlers
//!
//! Everything here is constructed once at process start and injected; there
//! is no lazily-initialized global anywhere in the request path.

use std::num::NonZeroU32;
use std::sync::Arc;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};

use fit_core::domain::{BurnLog, IntakeLog, WeightLog};
use fit_core::repositories::{LogStore, ProfileRepository};
use fit_core::services::{DashboardService, InsightsProvider, InsightsService};
use fit_session::{RequestVersionTracker, SessionGate, TokenVerifier};
use fit_shared::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub gate: Arc<SessionGate>,
    pub verifier: Option<Arc<TokenVerifier>>,

    pub dashboard: Arc<DashboardService>,
    pub insights: Arc<InsightsService>,
    pub insights_limiter: Arc<DefaultDirectRateLimiter>,

    pub weight_logs: Arc<dyn LogStore<WeightLog>>,
    pub intake_logs: Arc<dyn LogStore<IntakeLog>>,
    pub burn_logs: Arc<dyn LogStore<BurnLog>>,
    pub profiles: Arc<dyn ProfileRepository>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        weight_logs: Arc<dyn LogStore<WeightLog>>,
        intake_logs: Arc<dyn LogStore<IntakeLog>>,
        burn_logs: Arc<dyn LogStore<BurnLog>>,
        profiles: Arc<dyn ProfileRepository>,
        insights_provider: Arc<dyn InsightsProvider>,
    ) -> Self {
        let secure_cookies = config.app.is_production();
        let gate = Arc::new(SessionGate::new(
            config.auth.jwt_secret.clone(),
            secure_cookies,
        ));
        let verifier = config
            .auth
            .jwt_secret
            .clone()
            .map(|secret| Arc::new(TokenVerifier::new(secret)));

        let tracker = Arc::new(RequestVersionTracker::new());
        let dashboard = Arc::new(DashboardService::new(
            weight_logs.clone(),
            intake_logs.clone(),
            burn_logs.clone(),
            profiles.clone(),
        ));
        let insights = Arc::new(InsightsService::new(insights_provider, tracker));

        let per_minute = NonZeroU32::new(config.insights.requests_per_minute.max(1))
            .unwrap_or(NonZeroU32::MIN);
        let insights_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)));

        Self {
            config,
            gate,
            verifier,
            dashboard,
            insights,
            insights_limiter,
            weight_logs,
            intake_logs,
            burn_logs,
            profiles,
        }
    }
}
