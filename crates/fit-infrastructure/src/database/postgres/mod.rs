//! PostgreSQL repository implementations

pub mod log_repo_impl;
pub mod profile_repo_impl;

pub use log_repo_impl::PgLogRepository;
pub use profile_repo_impl::PgProfileRepository;
