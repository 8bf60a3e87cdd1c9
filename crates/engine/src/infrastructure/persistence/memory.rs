//! In-memory adapters for every repository port.
//!
//! Backed by `RwLock<Vec<_>>` so listings keep stable insertion order,
//! which the pagination contract requires. Used by the integration-style
//! tests; a database adapter would slot in behind the same ports.

use std::sync::RwLock;

use async_trait::async_trait;
use poderes_domain::{
    EffectBase, EffectBaseId, ModificationBase, ModificationBaseId, Peculiarity, PeculiarityId,
    Power, PowerArray, PowerArrayId, PowerId, UserId,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::infrastructure::ports::{
    EffectBaseRepo, ModificationBaseRepo, Page, PeculiarityRepo, PowerArrayRepo, PowerRepo,
    RepoError, PAGE_SIZE,
};

fn lock_err(operation: &'static str) -> RepoError {
    RepoError::storage(operation, "store lock poisoned")
}

/// Persist through the wire format, exactly like a database adapter
/// would: pending events and change-tracking diffs never reach the store.
fn to_stored<T: Serialize + DeserializeOwned>(value: &T) -> Result<T, RepoError> {
    let raw = serde_json::to_value(value).map_err(RepoError::serialization)?;
    serde_json::from_value(raw).map_err(RepoError::serialization)
}

fn page_of<T: Clone>(items: &[T], page: Page) -> Vec<T> {
    items
        .iter()
        .skip(page.offset())
        .take(PAGE_SIZE)
        .cloned()
        .collect()
}

// =============================================================================
// Powers
// =============================================================================

#[derive(Default)]
pub struct InMemoryPowerRepo {
    items: RwLock<Vec<Power>>,
}

impl InMemoryPowerRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored powers (test helper).
    pub fn len(&self) -> usize {
        self.items.read().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PowerRepo for InMemoryPowerRepo {
    async fn get(&self, id: PowerId) -> Result<Option<Power>, RepoError> {
        let items = self.items.read().map_err(|_| lock_err("get"))?;
        Ok(items.iter().find(|p| p.id() == id).cloned())
    }

    async fn list(&self, page: Page) -> Result<Vec<Power>, RepoError> {
        let items = self.items.read().map_err(|_| lock_err("list"))?;
        Ok(page_of(&items, page))
    }

    async fn create(&self, power: &Power) -> Result<(), RepoError> {
        let stored = to_stored(power)?;
        let mut items = self.items.write().map_err(|_| lock_err("create"))?;
        items.push(stored);
        Ok(())
    }

    async fn update(&self, power: &Power) -> Result<(), RepoError> {
        let stored = to_stored(power)?;
        let mut items = self.items.write().map_err(|_| lock_err("update"))?;
        let slot = items
            .iter_mut()
            .find(|p| p.id() == power.id())
            .ok_or_else(|| RepoError::not_found("Power", power.id()))?;
        *slot = stored;
        Ok(())
    }

    async fn delete(&self, id: PowerId) -> Result<(), RepoError> {
        let mut items = self.items.write().map_err(|_| lock_err("delete"))?;
        let index = items
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| RepoError::not_found("Power", id))?;
        items.remove(index);
        Ok(())
    }
}

// =============================================================================
// Power arrays
// =============================================================================

#[derive(Default)]
pub struct InMemoryPowerArrayRepo {
    items: RwLock<Vec<PowerArray>>,
}

impl InMemoryPowerArrayRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored arrays (test helper).
    pub fn len(&self) -> usize {
        self.items.read().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PowerArrayRepo for InMemoryPowerArrayRepo {
    async fn get(&self, id: PowerArrayId) -> Result<Option<PowerArray>, RepoError> {
        let items = self.items.read().map_err(|_| lock_err("get"))?;
        Ok(items.iter().find(|a| a.id() == id).cloned())
    }

    async fn list(&self, page: Page) -> Result<Vec<PowerArray>, RepoError> {
        let items = self.items.read().map_err(|_| lock_err("list"))?;
        Ok(page_of(&items, page))
    }

    async fn create(&self, array: &PowerArray) -> Result<(), RepoError> {
        let stored = to_stored(array)?;
        let mut items = self.items.write().map_err(|_| lock_err("create"))?;
        items.push(stored);
        Ok(())
    }

    async fn update(&self, array: &PowerArray) -> Result<(), RepoError> {
        let stored = to_stored(array)?;
        let mut items = self.items.write().map_err(|_| lock_err("update"))?;
        let slot = items
            .iter_mut()
            .find(|a| a.id() == array.id())
            .ok_or_else(|| RepoError::not_found("PowerArray", array.id()))?;
        *slot = stored;
        Ok(())
    }

    async fn delete(&self, id: PowerArrayId) -> Result<(), RepoError> {
        let mut items = self.items.write().map_err(|_| lock_err("delete"))?;
        let index = items
            .iter()
            .position(|a| a.id() == id)
            .ok_or_else(|| RepoError::not_found("PowerArray", id))?;
        items.remove(index);
        Ok(())
    }
}

// =============================================================================
// Catalog
// =============================================================================

#[derive(Default)]
pub struct InMemoryEffectBaseRepo {
    items: RwLock<Vec<EffectBase>>,
}

impl InMemoryEffectBaseRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EffectBaseRepo for InMemoryEffectBaseRepo {
    async fn get(&self, id: EffectBaseId) -> Result<Option<EffectBase>, RepoError> {
        let items = self.items.read().map_err(|_| lock_err("get"))?;
        Ok(items.iter().find(|b| b.id == id).cloned())
    }

    async fn create(&self, base: &EffectBase) -> Result<(), RepoError> {
        let mut items = self.items.write().map_err(|_| lock_err("create"))?;
        items.push(base.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryModificationBaseRepo {
    items: RwLock<Vec<ModificationBase>>,
}

impl InMemoryModificationBaseRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ModificationBaseRepo for InMemoryModificationBaseRepo {
    async fn get(&self, id: ModificationBaseId) -> Result<Option<ModificationBase>, RepoError> {
        let items = self.items.read().map_err(|_| lock_err("get"))?;
        Ok(items.iter().find(|b| b.id == id).cloned())
    }

    async fn create(&self, base: &ModificationBase) -> Result<(), RepoError> {
        let mut items = self.items.write().map_err(|_| lock_err("create"))?;
        items.push(base.clone());
        Ok(())
    }
}

// =============================================================================
// Peculiarities
// =============================================================================

#[derive(Default)]
pub struct InMemoryPeculiarityRepo {
    items: RwLock<Vec<Peculiarity>>,
}

impl InMemoryPeculiarityRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PeculiarityRepo for InMemoryPeculiarityRepo {
    async fn get(&self, id: PeculiarityId) -> Result<Option<Peculiarity>, RepoError> {
        let items = self.items.read().map_err(|_| lock_err("get"))?;
        Ok(items.iter().find(|p| p.id == id).cloned())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        page: Page,
    ) -> Result<Vec<Peculiarity>, RepoError> {
        let items = self.items.read().map_err(|_| lock_err("list_for_user"))?;
        let owned: Vec<Peculiarity> = items
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        Ok(page_of(&owned, page))
    }

    async fn create(&self, peculiarity: &Peculiarity) -> Result<(), RepoError> {
        let mut items = self.items.write().map_err(|_| lock_err("create"))?;
        items.push(peculiarity.clone());
        Ok(())
    }
}
