//! Tracked metric enumeration

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Bodyweight,
    Calories,
    Burn,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Bodyweight => "bodyweight",
            Metric::Calories => "calories",
            Metric::Burn => "burn",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "bodyweight" => Ok(Metric::Bodyweight),
            "calories" => Ok(Metric::Calories),
            "burn" => Ok(Metric::Burn),
            other => Err(DomainError::UnknownMetric(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for metric in [Metric::Bodyweight, Metric::Calories, Metric::Burn] {
            assert_eq!(Metric::parse(metric.as_str()).unwrap(), metric);
        }
        assert!(Metric::parse("steps").is_err());
    }
}
