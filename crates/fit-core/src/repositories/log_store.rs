//! Log store trait (port)
//!
//! One generic port covers the three tracked metrics; the adapter picks the
//! table from the row type. Lists are returned newest-first, which the view
//! derivations rely on.

use async_trait::async_trait;

use fit_shared::types::EntityId;

use crate::error::DomainError;

#[async_trait]
pub trait LogStore<T>: Send + Sync {
    /// All rows for a user, newest log date first.
    async fn list_for_user(&self, user_id: &EntityId) -> Result<Vec<T>, DomainError>;

    async fn insert(&self, row: &T) -> Result<T, DomainError>;

    async fn update(&self, row: &T) -> Result<T, DomainError>;

    async fn delete(&self, id: &EntityId, user_id: &EntityId) -> Result<(), DomainError>;
}
