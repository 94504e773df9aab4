//! User profile entity

use serde::{Deserialize, Serialize};
use validator::Validate;

use fit_shared::types::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "male" => Some(Sex::Male),
            "female" => Some(Sex::Female),
            _ => None,
        }
    }
}

/// Activity level used to scale BMR into maintenance calories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    VeryActive,
    ExtraActive,
}

impl ActivityLevel {
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtraActive => "extra_active",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "sedentary" => Some(ActivityLevel::Sedentary),
            "light" => Some(ActivityLevel::Light),
            "moderate" => Some(ActivityLevel::Moderate),
            "very_active" => Some(ActivityLevel::VeryActive),
            "extra_active" => Some(ActivityLevel::ExtraActive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Profile {
    pub user_id: EntityId,
    pub sex: Sex,

    #[validate(range(min = 20.0, max = 500.0, message = "Weight out of range"))]
    pub weight_kg: f64,

    #[validate(range(min = 50.0, max = 280.0, message = "Height out of range"))]
    pub height_cm: f64,

    /// ISO calendar date as stored by the backend; parse failures surface as
    /// unknown age downstream, never as errors.
    pub birth_date: Option<String>,

    pub activity_level: ActivityLevel,
}

impl Profile {
    pub fn new(
        user_id: EntityId,
        sex: Sex,
        weight_kg: f64,
        height_cm: f64,
        birth_date: Option<String>,
        activity_level: ActivityLevel,
    ) -> Result<Self, validator::ValidationErrors> {
        let profile = Self {
            user_id,
            sex,
            weight_kg,
            height_cm,
            birth_date,
            activity_level,
        };
        profile.validate()?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fit_shared::types::new_id;

    #[test]
    fn test_create_profile() {
        let profile = Profile::new(
            new_id(),
            Sex::Male,
            80.0,
            180.0,
            Some("1996-03-01".to_string()),
            ActivityLevel::Moderate,
        );
        assert!(profile.is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_weight() {
        let profile = Profile::new(new_id(), Sex::Female, 1000.0, 165.0, None, ActivityLevel::Light);
        assert!(profile.is_err());
    }

    #[test]
    fn test_activity_multipliers() {
        assert_eq!(ActivityLevel::Sedentary.multiplier(), 1.2);
        assert_eq!(ActivityLevel::ExtraActive.multiplier(), 1.9);
        assert_eq!(ActivityLevel::from_str("very_active"), Some(ActivityLevel::VeryActive));
        assert_eq!(ActivityLevel::from_str("bogus"), None);
    }
}
