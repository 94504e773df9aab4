//! # Fit Core
//!
//! Domain entities, repository ports, and the derived-metrics services for
//! the fittrack application.

pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

pub use domain::*;
pub use error::DomainError;
