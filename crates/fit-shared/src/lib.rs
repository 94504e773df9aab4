//! # Fit Shared
//!
//! Shared constants, types, configuration, and telemetry for the fittrack application.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;
pub mod types;

pub use error::AppError;
pub use types::*;
