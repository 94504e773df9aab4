//! Domain services (derived metrics and aggregation)

pub mod dashboard;
pub mod energy;
pub mod insights;
pub mod views;

pub use dashboard::{DashboardData, DashboardService};
pub use insights::{InsightsProvider, InsightsService};
