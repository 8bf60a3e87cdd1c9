//! Repository port traits for aggregate and catalog access.

use async_trait::async_trait;
use poderes_domain::{
    EffectBase, EffectBaseId, ModificationBase, ModificationBaseId, Peculiarity, PeculiarityId,
    Power, PowerArray, PowerArrayId, PowerId, UserId,
};

use super::error::RepoError;
use super::types::Page;

// =============================================================================
// Aggregate ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PowerRepo: Send + Sync {
    async fn get(&self, id: PowerId) -> Result<Option<Power>, RepoError>;
    /// Stable-ordered page of powers.
    async fn list(&self, page: Page) -> Result<Vec<Power>, RepoError>;
    async fn create(&self, power: &Power) -> Result<(), RepoError>;
    async fn update(&self, power: &Power) -> Result<(), RepoError>;
    async fn delete(&self, id: PowerId) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PowerArrayRepo: Send + Sync {
    async fn get(&self, id: PowerArrayId) -> Result<Option<PowerArray>, RepoError>;
    /// Stable-ordered page of arrays.
    async fn list(&self, page: Page) -> Result<Vec<PowerArray>, RepoError>;
    async fn create(&self, array: &PowerArray) -> Result<(), RepoError>;
    async fn update(&self, array: &PowerArray) -> Result<(), RepoError>;
    async fn delete(&self, id: PowerArrayId) -> Result<(), RepoError>;
}

// =============================================================================
// Catalog ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EffectBaseRepo: Send + Sync {
    async fn get(&self, id: EffectBaseId) -> Result<Option<EffectBase>, RepoError>;
    async fn create(&self, base: &EffectBase) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModificationBaseRepo: Send + Sync {
    async fn get(&self, id: ModificationBaseId) -> Result<Option<ModificationBase>, RepoError>;
    async fn create(&self, base: &ModificationBase) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PeculiarityRepo: Send + Sync {
    async fn get(&self, id: PeculiarityId) -> Result<Option<Peculiarity>, RepoError>;
    /// Stable-ordered page of a user's peculiarities.
    async fn list_for_user(
        &self,
        user_id: UserId,
        page: Page,
    ) -> Result<Vec<Peculiarity>, RepoError>;
    async fn create(&self, peculiarity: &Peculiarity) -> Result<(), RepoError>;
}
