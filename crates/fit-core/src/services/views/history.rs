//! History view derivation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use fit_shared::constants::{HISTORY_PAGE_CAP, HISTORY_VISIBLE_FLOOR};

use crate::domain::DatedValue;

/// Either an exact single-date match or an inclusive date range; an empty
/// bound leaves that side open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum HistoryFilter {
    Single { date: NaiveDate },
    Range {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl HistoryFilter {
    /// Single mode always counts as filtering; range mode only once a bound
    /// is set.
    pub fn is_active(&self) -> bool {
        match self {
            HistoryFilter::Single { .. } => true,
            HistoryFilter::Range { start, end } => start.is_some() || end.is_some(),
        }
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            HistoryFilter::Single { date: wanted } => date == *wanted,
            HistoryFilter::Range { start, end } => {
                start.map_or(true, |s| date >= s) && end.map_or(true, |e| date <= e)
            }
        }
    }
}

impl Default for HistoryFilter {
    fn default() -> Self {
        HistoryFilter::Range {
            start: None,
            end: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryView<T> {
    pub entries: Vec<T>,
    /// More filtered entries exist beyond the visible slice.
    pub has_more: bool,
    /// The visible count sits above the floor, so collapsing is meaningful.
    pub can_collapse: bool,
    pub filter_active: bool,
}

pub fn build_history_view<T: DatedValue + Clone>(
    rows: &[T],
    filter: &HistoryFilter,
    visible_count: usize,
) -> HistoryView<T> {
    let capped: Vec<T> = rows
        .iter()
        .filter(|row| filter.matches(row.log_date()))
        .take(HISTORY_PAGE_CAP)
        .cloned()
        .collect();

    let has_more = capped.len() > visible_count;
    let entries: Vec<T> = capped.into_iter().take(visible_count).collect();

    HistoryView {
        entries,
        has_more,
        can_collapse: visible_count > HISTORY_VISIBLE_FLOOR,
        filter_active: filter.is_active(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IntakeLog;
    use fit_shared::types::new_id;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn log(d: &str) -> IntakeLog {
        IntakeLog::new(new_id(), date(d), 2000.0).unwrap()
    }

    #[test]
    fn test_single_mode_exact_match() {
        let rows = vec![log("2026-02-16"), log("2026-02-12"), log("2026-01-30")];
        let filter = HistoryFilter::Single {
            date: date("2026-02-12"),
        };
        let view = build_history_view(&rows, &filter, 5);
        assert_eq!(view.entries.len(), 1);
        assert_eq!(view.entries[0].log_date, date("2026-02-12"));
        assert!(view.filter_active);
    }

    #[test]
    fn test_range_mode_inclusive_bounds() {
        let rows = vec![
            log("2026-02-16"),
            log("2026-02-12"),
            log("2026-01-30"),
            log("2025-12-20"),
        ];
        let filter = HistoryFilter::Range {
            start: Some(date("2026-01-01")),
            end: Some(date("2026-02-16")),
        };
        let view = build_history_view(&rows, &filter, 10);
        assert_eq!(view.entries.len(), 3);
    }

    #[test]
    fn test_open_bounds_are_unbounded() {
        let rows = vec![log("2026-02-16"), log("2025-12-20")];
        let only_end = HistoryFilter::Range {
            start: None,
            end: Some(date("2026-01-01")),
        };
        let view = build_history_view(&rows, &only_end, 10);
        assert_eq!(view.entries.len(), 1);
        assert!(view.filter_active);
    }

    #[test]
    fn test_unfiltered_range_is_not_active() {
        let filter = HistoryFilter::default();
        let view = build_history_view(&[log("2026-02-16")], &filter, 5);
        assert!(!view.filter_active);
    }

    #[test]
    fn test_cap_and_visible_slice() {
        let rows: Vec<IntakeLog> = (1..=25)
            .map(|day| log(&format!("2026-01-{:02}", day)))
            .collect();
        let view = build_history_view(&rows, &HistoryFilter::default(), 5);
        assert_eq!(view.entries.len(), 5);
        assert!(view.has_more);
        assert!(!view.can_collapse);

        let expanded = build_history_view(&rows, &HistoryFilter::default(), 20);
        // Capped at 20 before slicing, so nothing lies beyond the slice.
        assert_eq!(expanded.entries.len(), 20);
        assert!(!expanded.has_more);
        assert!(expanded.can_collapse);
    }
}
