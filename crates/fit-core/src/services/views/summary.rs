//! Latest-entry and average summaries

use serde::Serialize;

use crate::domain::DatedValue;

#[derive(Debug, Clone, Serialize)]
pub struct Summary<T> {
    /// First supplied row, i.e. the newest one.
    pub latest: Option<T>,
    pub average: Option<f64>,
}

pub fn summarize<T: DatedValue + Clone>(rows: &[T]) -> Summary<T> {
    let average = if rows.is_empty() {
        None
    } else {
        Some(rows.iter().map(DatedValue::value).sum::<f64>() / rows.len() as f64)
    };
    Summary {
        latest: rows.first().cloned(),
        average,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{WeightLog, WeightUnit};
    use chrono::NaiveDate;
    use fit_shared::types::new_id;

    fn log(date: &str, kg: f64) -> WeightLog {
        WeightLog::new(
            new_id(),
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            kg,
            WeightUnit::Kg,
        )
        .unwrap()
    }

    #[test]
    fn test_summary_of_rows() {
        let rows = vec![log("2026-02-16", 80.0), log("2026-02-12", 82.0)];
        let summary = summarize(&rows);
        assert_eq!(summary.latest.unwrap().weight_kg, 80.0);
        assert_eq!(summary.average, Some(81.0));
    }

    #[test]
    fn test_summary_empty() {
        let summary = summarize::<WeightLog>(&[]);
        assert!(summary.latest.is_none());
        assert!(summary.average.is_none());
    }
}
