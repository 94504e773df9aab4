//! # Fit API
//!
//! HTTP handlers, session-gate middleware, DTOs, and the router.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::router;
pub use state::AppState;
