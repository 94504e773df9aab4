//! Energy formula library
//!
//! Pure numeric functions. Invalid or missing inputs propagate as `None`
//! rather than errors; the component-level formulas assume the caller
//! already validated its numbers.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{ActivityLevel, Profile, Sex};

/// Basal metabolic rate per Mifflin-St Jeor.
pub fn bmr_mifflin_st_jeor(sex: Sex, weight_kg: f64, height_cm: f64, age_years: u32) -> f64 {
    let sex_offset = match sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years) + sex_offset
}

pub fn maintenance_calories(bmr: f64, activity_level: ActivityLevel) -> f64 {
    bmr * activity_level.multiplier()
}

/// Whole years on `reference`. `None` when the date fails to parse or lies
/// in the future. Day-equal counts as the birthday having passed.
pub fn age_years_on(birth_date: &str, reference: NaiveDate) -> Option<u32> {
    let birth = NaiveDate::parse_from_str(birth_date.trim(), "%Y-%m-%d").ok()?;
    if birth > reference {
        return None;
    }
    let mut age = reference.year() - birth.year();
    let had_birthday = (reference.month(), reference.day()) >= (birth.month(), birth.day());
    if !had_birthday {
        age -= 1;
    }
    u32::try_from(age).ok()
}

/// Age, then BMR, then maintenance, from a stored profile. Unknown age means
/// unknown maintenance.
pub fn maintenance_from_profile(profile: &Profile, reference: NaiveDate) -> Option<f64> {
    let bmr = bmr_from_profile(profile, reference)?;
    Some(maintenance_calories(bmr, profile.activity_level))
}

pub fn bmr_from_profile(profile: &Profile, reference: NaiveDate) -> Option<f64> {
    let birth_date = profile.birth_date.as_deref()?;
    let age = age_years_on(birth_date, reference)?;
    Some(bmr_mifflin_st_jeor(
        profile.sex,
        profile.weight_kg,
        profile.height_cm,
        age,
    ))
}

/// Body mass index; both inputs must be strictly positive.
pub fn bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if !(weight_kg > 0.0 && height_cm > 0.0) {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some(weight_kg / (height_m * height_m))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "underweight",
            BmiCategory::Normal => "normal",
            BmiCategory::Overweight => "overweight",
            BmiCategory::Obese => "obese",
        }
    }
}

pub fn bmi_category(bmi: f64) -> Option<BmiCategory> {
    if !bmi.is_finite() || bmi <= 0.0 {
        return None;
    }
    let category = if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    };
    Some(category)
}

/// Maintenance plus actively burned calories.
pub fn total_burn(maintenance: Option<f64>, active: Option<f64>) -> Option<f64> {
    let (maintenance, active) = (maintenance?, active?);
    if !maintenance.is_finite() || !active.is_finite() {
        return None;
    }
    Some(maintenance + active)
}

/// Calories in minus total burn.
pub fn net_calories(intake: Option<f64>, total_burn: Option<f64>) -> Option<f64> {
    Some(intake? - total_burn?)
}
