//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Profile not found")]
    ProfileNotFound,

    #[error("Log entry not found")]
    LogNotFound,

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Insights provider error: {0}")]
    InsightsError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}
