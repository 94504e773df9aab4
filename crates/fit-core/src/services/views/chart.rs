//! Chart view derivation

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::DatedValue;

/// Lookback window for a chart, in local calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartRange {
    #[serde(rename = "biweekly")]
    Biweekly,
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "3m")]
    ThreeMonths,
    #[serde(rename = "6m")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
}

impl ChartRange {
    pub fn days(&self) -> i64 {
        match self {
            ChartRange::Biweekly => 14,
            ChartRange::OneMonth => 30,
            ChartRange::ThreeMonths => 90,
            ChartRange::SixMonths => 180,
            ChartRange::OneYear => 365,
        }
    }
}

impl Default for ChartRange {
    fn default() -> Self {
        ChartRange::Biweekly
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    /// Short month/day label for the axis, e.g. "Feb 16".
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartView {
    pub points: Vec<ChartPoint>,
    pub y_axis_max: f64,
}

/// Filter rows into the range window and order them oldest-first for
/// plotting. `today` is the caller's local calendar date, not UTC.
pub fn build_chart_view<T: DatedValue>(rows: &[T], range: ChartRange, today: NaiveDate) -> ChartView {
    let cutoff = today - Duration::days(range.days() - 1);
    let mut points: Vec<ChartPoint> = rows
        .iter()
        .filter(|row| row.log_date() >= cutoff)
        .map(|row| ChartPoint {
            date: row.log_date(),
            label: row.log_date().format("%b %-d").to_string(),
            value: row.value(),
        })
        .collect();
    points.sort_by_key(|point| point.date);

    let y_axis_max = if points.is_empty() {
        0.0
    } else {
        let max_value = points.iter().fold(0.0_f64, |acc, p| acc.max(p.value));
        (((max_value + 100.0) / 100.0).ceil() * 100.0).max(100.0)
    };

    ChartView { points, y_axis_max }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{WeightLog, WeightUnit};
    use fit_shared::types::new_id;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn log(d: &str, kg: f64) -> WeightLog {
        WeightLog::new(new_id(), date(d), kg, WeightUnit::Kg).unwrap()
    }

    #[test]
    fn test_biweekly_window_filters_and_sorts_ascending() {
        let rows = vec![
            log("2026-02-16", 80.0),
            log("2026-02-12", 81.0),
            log("2026-01-30", 83.0),
            log("2025-12-20", 85.0),
        ];
        let view = build_chart_view(&rows, ChartRange::Biweekly, date("2026-02-16"));
        let dates: Vec<NaiveDate> = view.points.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![date("2026-02-12"), date("2026-02-16")]);
    }

    #[test]
    fn test_point_labels() {
        let rows = vec![log("2026-02-16", 80.0)];
        let view = build_chart_view(&rows, ChartRange::OneMonth, date("2026-02-16"));
        assert_eq!(view.points[0].label, "Feb 16");
    }

    #[test]
    fn test_y_axis_max_rounds_up_to_hundreds() {
        let rows = vec![log("2026-02-16", 80.0), log("2026-02-15", 143.0)];
        let view = build_chart_view(&rows, ChartRange::Biweekly, date("2026-02-16"));
        // ceil((143 + 100) / 100) * 100
        assert_eq!(view.y_axis_max, 300.0);
    }

    #[test]
    fn test_y_axis_max_floor_and_empty() {
        let rows = vec![log("2026-02-16", 25.0)];
        let view = build_chart_view(&rows, ChartRange::Biweekly, date("2026-02-16"));
        assert_eq!(view.y_axis_max, 200.0);

        let empty = build_chart_view::<WeightLog>(&[], ChartRange::Biweekly, date("2026-02-16"));
        assert!(empty.points.is_empty());
        assert_eq!(empty.y_axis_max, 0.0);
    }

    #[test]
    fn test_year_range_keeps_older_rows() {
        let rows = vec![log("2026-02-16", 80.0), log("2025-12-20", 85.0)];
        let view = build_chart_view(&rows, ChartRange::OneYear, date("2026-02-16"));
        assert_eq!(view.points.len(), 2);
    }
}
