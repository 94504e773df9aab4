//! Log row entities (bodyweight, calorie intake, calorie burn)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use fit_shared::types::{new_id, EntityId};

/// A row the view-derivation layer can chart and summarize.
pub trait DatedValue {
    fn log_date(&self) -> NaiveDate;
    fn value(&self) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    Kg,
    Lb,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lb => "lb",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "kg" => Some(WeightUnit::Kg),
            "lb" => Some(WeightUnit::Lb),
            _ => None,
        }
    }
}

impl Default for WeightUnit {
    fn default() -> Self {
        WeightUnit::Kg
    }
}

/// Bodyweight entry. One per user per date by convention; not enforced here.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WeightLog {
    pub id: EntityId,
    pub user_id: EntityId,
    pub log_date: NaiveDate,

    #[validate(range(min = 20.0, max = 500.0, message = "Weight out of range"))]
    pub weight_kg: f64,

    pub unit: WeightUnit,
    pub created_at: DateTime<Utc>,
}

impl WeightLog {
    pub fn new(
        user_id: EntityId,
        log_date: NaiveDate,
        weight_kg: f64,
        unit: WeightUnit,
    ) -> Result<Self, validator::ValidationErrors> {
        let log = Self {
            id: new_id(),
            user_id,
            log_date,
            weight_kg,
            unit,
            created_at: Utc::now(),
        };
        log.validate()?;
        Ok(log)
    }
}

impl DatedValue for WeightLog {
    fn log_date(&self) -> NaiveDate {
        self.log_date
    }

    fn value(&self) -> f64 {
        self.weight_kg
    }
}

/// Calorie intake entry.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IntakeLog {
    pub id: EntityId,
    pub user_id: EntityId,
    pub log_date: NaiveDate,

    #[validate(range(min = 0.0, max = 20000.0, message = "Calories out of range"))]
    pub calories: f64,

    pub created_at: DateTime<Utc>,
}

impl IntakeLog {
    pub fn new(
        user_id: EntityId,
        log_date: NaiveDate,
        calories: f64,
    ) -> Result<Self, validator::ValidationErrors> {
        let log = Self {
            id: new_id(),
            user_id,
            log_date,
            calories,
            created_at: Utc::now(),
        };
        log.validate()?;
        Ok(log)
    }
}

impl DatedValue for IntakeLog {
    fn log_date(&self) -> NaiveDate {
        self.log_date
    }

    fn value(&self) -> f64 {
        self.calories
    }
}

/// Active calorie burn entry, optionally tagged with its source (watch,
/// manual entry, imported workout).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BurnLog {
    pub id: EntityId,
    pub user_id: EntityId,
    pub log_date: NaiveDate,

    #[validate(range(min = 0.0, max = 20000.0, message = "Calories out of range"))]
    pub calories: f64,

    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl BurnLog {
    pub fn new(
        user_id: EntityId,
        log_date: NaiveDate,
        calories: f64,
        source: Option<String>,
    ) -> Result<Self, validator::ValidationErrors> {
        let log = Self {
            id: new_id(),
            user_id,
            log_date,
            calories,
            source,
            created_at: Utc::now(),
        };
        log.validate()?;
        Ok(log)
    }
}

impl DatedValue for BurnLog {
    fn log_date(&self) -> NaiveDate {
        self.log_date
    }

    fn value(&self) -> f64 {
        self.calories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fit_shared::types::new_id;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_create_weight_log() {
        let log = WeightLog::new(new_id(), date("2026-02-16"), 81.4, WeightUnit::Kg).unwrap();
        assert_eq!(log.value(), 81.4);
        assert_eq!(log.log_date(), date("2026-02-16"));
    }

    #[test]
    fn test_rejects_negative_calories() {
        assert!(IntakeLog::new(new_id(), date("2026-02-16"), -10.0).is_err());
        assert!(BurnLog::new(new_id(), date("2026-02-16"), -10.0, None).is_err());
    }
}
