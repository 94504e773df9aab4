//! # Fit Infrastructure
//!
//! Database and external-service implementations (adapters).

pub mod database;
pub mod insights;

pub use database::{create_pool, PgLogRepository, PgProfileRepository};
pub use insights::HttpInsightsProvider;
