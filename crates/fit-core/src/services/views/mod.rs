//! View derivation layer
//!
//! Pure transformations from log rows (delivered newest-first by the data
//! layer) into the shapes the UI renders.

pub mod chart;
pub mod history;
pub mod summary;

pub use chart::{build_chart_view, ChartPoint, ChartRange, ChartView};
pub use history::{build_history_view, HistoryFilter, HistoryView};
pub use summary::{summarize, Summary};
