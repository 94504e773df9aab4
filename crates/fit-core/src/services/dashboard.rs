//! Dashboard aggregation service

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use fit_shared::types::EntityId;

use crate::domain::{BurnLog, DatedValue, IntakeLog, Profile, WeightLog};
use crate::error::DomainError;
use crate::repositories::{LogStore, ProfileRepository};
use crate::services::energy::{
    bmi, bmi_category, bmr_from_profile, maintenance_from_profile, net_calories, total_burn,
    BmiCategory,
};
use crate::services::views::{summarize, Summary};

/// Everything the dashboard renders in one shape: profile-derived energy
/// numbers plus per-metric summaries.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub bmr: Option<f64>,
    pub maintenance: Option<f64>,
    pub bmi: Option<f64>,
    pub bmi_category: Option<BmiCategory>,

    pub weight: Summary<WeightLog>,
    pub intake: Summary<IntakeLog>,
    pub burn: Summary<BurnLog>,

    pub intake_today: Option<f64>,
    pub active_burn_today: Option<f64>,
    pub total_burn_today: Option<f64>,
    pub net_calories_today: Option<f64>,
}

pub struct DashboardService {
    weight_logs: Arc<dyn LogStore<WeightLog>>,
    intake_logs: Arc<dyn LogStore<IntakeLog>>,
    burn_logs: Arc<dyn LogStore<BurnLog>>,
    profiles: Arc<dyn ProfileRepository>,
}

impl DashboardService {
    pub fn new(
        weight_logs: Arc<dyn LogStore<WeightLog>>,
        intake_logs: Arc<dyn LogStore<IntakeLog>>,
        burn_logs: Arc<dyn LogStore<BurnLog>>,
        profiles: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self {
            weight_logs,
            intake_logs,
            burn_logs,
            profiles,
        }
    }

    /// Assemble the dashboard for a user as of the caller's local date.
    pub async fn dashboard(
        &self,
        user_id: &EntityId,
        today: NaiveDate,
    ) -> Result<DashboardData, DomainError> {
        debug!(%user_id, %today, "building dashboard");

        let profile = self.profiles.find_by_user(user_id).await?;
        let weight_rows = self.weight_logs.list_for_user(user_id).await?;
        let intake_rows = self.intake_logs.list_for_user(user_id).await?;
        let burn_rows = self.burn_logs.list_for_user(user_id).await?;

        let (bmr, maintenance, body_mass_index, category) = match &profile {
            Some(profile) => derive_energy(profile, today),
            None => (None, None, None, None),
        };

        let intake_today = sum_for_date(&intake_rows, today);
        let active_burn_today = sum_for_date(&burn_rows, today);
        let total_burn_today = total_burn(maintenance, active_burn_today);
        let net_calories_today = net_calories(intake_today, total_burn_today);

        Ok(DashboardData {
            bmr,
            maintenance,
            bmi: body_mass_index,
            bmi_category: category,
            weight: summarize(&weight_rows),
            intake: summarize(&intake_rows),
            burn: summarize(&burn_rows),
            intake_today,
            active_burn_today,
            total_burn_today,
            net_calories_today,
        })
    }
}

fn derive_energy(
    profile: &Profile,
    today: NaiveDate,
) -> (Option<f64>, Option<f64>, Option<f64>, Option<BmiCategory>) {
    let bmr = bmr_from_profile(profile, today);
    let maintenance = maintenance_from_profile(profile, today);
    let body_mass_index = bmi(profile.weight_kg, profile.height_cm);
    let category = body_mass_index.and_then(bmi_category);
    (bmr, maintenance, body_mass_index, category)
}

/// Sum of values logged on the given date; `None` when nothing was logged.
fn sum_for_date<T: DatedValue>(rows: &[T], date: NaiveDate) -> Option<f64> {
    let mut total = None;
    for row in rows.iter().filter(|row| row.log_date() == date) {
        *total.get_or_insert(0.0) += row.value();
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActivityLevel, Sex, WeightUnit};
    use async_trait::async_trait;
    use fit_shared::types::new_id;

    struct FakeStore<T>(Vec<T>);

    #[async_trait]
    impl<T: Clone + Send + Sync> LogStore<T> for FakeStore<T> {
        async fn list_for_user(&self, _user_id: &EntityId) -> Result<Vec<T>, DomainError> {
            Ok(self.0.clone())
        }

        async fn insert(&self, row: &T) -> Result<T, DomainError> {
            Ok(row.clone())
        }

        async fn update(&self, row: &T) -> Result<T, DomainError> {
            Ok(row.clone())
        }

        async fn delete(&self, _id: &EntityId, _user_id: &EntityId) -> Result<(), DomainError> {
            Ok(())
        }
    }

    struct FakeProfiles(Option<Profile>);

    #[async_trait]
    impl ProfileRepository for FakeProfiles {
        async fn find_by_user(&self, _user_id: &EntityId) -> Result<Option<Profile>, DomainError> {
            Ok(self.0.clone())
        }

        async fn upsert(&self, profile: &Profile) -> Result<Profile, DomainError> {
            Ok(profile.clone())
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn service(profile: Option<Profile>, intake: Vec<IntakeLog>, burn: Vec<BurnLog>) -> DashboardService {
        DashboardService::new(
            Arc::new(FakeStore(vec![WeightLog::new(
                new_id(),
                date("2026-02-16"),
                80.0,
                WeightUnit::Kg,
            )
            .unwrap()])),
            Arc::new(FakeStore(intake)),
            Arc::new(FakeStore(burn)),
            Arc::new(FakeProfiles(profile)),
        )
    }

    #[tokio::test]
    async fn test_dashboard_with_full_profile() {
        let user_id = new_id();
        let profile = Profile::new(
            user_id,
            Sex::Male,
            80.0,
            180.0,
            Some("1996-02-16".to_string()),
            ActivityLevel::Moderate,
        )
        .unwrap();
        let today = date("2026-02-16");
        let intake = vec![IntakeLog::new(user_id, today, 2500.0).unwrap()];
        let burn = vec![BurnLog::new(user_id, today, 400.0, None).unwrap()];

        let data = service(Some(profile), intake, burn)
            .dashboard(&user_id, today)
            .await
            .unwrap();

        assert_eq!(data.bmr, Some(1780.0));
        assert_close(data.maintenance.unwrap(), 2759.0);
        assert_eq!(data.bmi_category, Some(BmiCategory::Normal));
        assert_eq!(data.intake_today, Some(2500.0));
        assert_close(data.total_burn_today.unwrap(), 3159.0);
        assert_close(data.net_calories_today.unwrap(), -659.0);
        assert_eq!(data.weight.average, Some(80.0));
    }

    #[tokio::test]
    async fn test_dashboard_without_profile_or_logs() {
        let user_id = new_id();
        let data = service(None, Vec::new(), Vec::new())
            .dashboard(&user_id, date("2026-02-16"))
            .await
            .unwrap();

        assert_eq!(data.bmr, None);
        assert_eq!(data.net_calories_today, None);
        assert!(data.intake.latest.is_none());
    }
}
