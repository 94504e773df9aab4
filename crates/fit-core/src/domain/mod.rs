//! Domain entities for the fittrack application.

pub mod logs;
pub mod metric;
pub mod profile;

pub use logs::{BurnLog, DatedValue, IntakeLog, WeightLog, WeightUnit};
pub use metric::Metric;
pub use profile::{ActivityLevel, Profile, Sex};
