//! AI-assisted insights service

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use fit_session::RequestVersionTracker;

use crate::error::DomainError;
use crate::services::dashboard::DashboardData;

/// Completion backend for insight generation (port).
#[async_trait]
pub trait InsightsProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError>;
}

struct CachedInsight {
    version: u64,
    text: String,
}

/// Generates insight text from dashboard data, caching the last result.
///
/// Every generation captures the tracker version before the slow provider
/// call; a log mutation in the meantime advances the tracker and the late
/// result is served to its caller but never cached.
pub struct InsightsService {
    provider: Arc<dyn InsightsProvider>,
    tracker: Arc<RequestVersionTracker>,
    cache: Mutex<Option<CachedInsight>>,
}

impl InsightsService {
    pub fn new(provider: Arc<dyn InsightsProvider>, tracker: Arc<RequestVersionTracker>) -> Self {
        Self {
            provider,
            tracker,
            cache: Mutex::new(None),
        }
    }

    /// Stale out the cache after the underlying logs or profile changed.
    pub fn mark_inputs_changed(&self) {
        self.tracker.invalidate();
    }

    pub async fn insights(&self, data: &DashboardData) -> Result<String, DomainError> {
        let version = {
            let cache = self.cache.lock().await;
            if let Some(cached) = cache.as_ref() {
                if !self.tracker.is_stale(cached.version) {
                    debug!("serving cached insight");
                    return Ok(cached.text.clone());
                }
            }
            // A newer generation or an input change stales this one.
            self.tracker.next()
        };

        let prompt = build_prompt(data);
        let text = self.provider.complete(&prompt).await?;

        if self.tracker.is_stale(version) {
            info!("insight generation superseded, skipping cache store");
        } else {
            let mut cache = self.cache.lock().await;
            *cache = Some(CachedInsight {
                version,
                text: text.clone(),
            });
        }
        Ok(text)
    }
}

/// Deterministic prompt assembly from the dashboard numbers.
pub fn build_prompt(data: &DashboardData) -> String {
    let mut lines = vec![
        "You are a fitness coach. Based on the numbers below, give the user \
         two or three short, concrete observations about their training and diet."
            .to_string(),
    ];
    if let Some(bmr) = data.bmr {
        lines.push(format!("BMR: {:.0} kcal", bmr));
    }
    if let Some(maintenance) = data.maintenance {
        lines.push(format!("Maintenance: {:.0} kcal", maintenance));
    }
    if let Some(bmi) = data.bmi {
        lines.push(format!("BMI: {:.1}", bmi));
    }
    if let Some(latest) = &data.weight.latest {
        lines.push(format!("Latest bodyweight: {:.1} kg", latest.weight_kg));
    }
    if let Some(average) = data.intake.average {
        lines.push(format!("Average intake: {:.0} kcal", average));
    }
    if let Some(average) = data.burn.average {
        lines.push(format!("Average active burn: {:.0} kcal", average));
    }
    if let Some(net) = data.net_calories_today {
        lines.push(format!("Net calories today: {:.0} kcal", net));
    }
    lines.join("\n")
}
