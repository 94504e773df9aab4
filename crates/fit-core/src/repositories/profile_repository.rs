//! Profile repository trait (port)

use async_trait::async_trait;

use fit_shared::types::EntityId;

use crate::domain::Profile;
use crate::error::DomainError;

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_user(&self, user_id: &EntityId) -> Result<Option<Profile>, DomainError>;

    async fn upsert(&self, profile: &Profile) -> Result<Profile, DomainError>;
}
