//! Ports: the contracts the use cases consume. Adapters implement them.

pub mod error;
pub mod repos;
pub mod types;

pub use error::RepoError;
pub use repos::{
    EffectBaseRepo, ModificationBaseRepo, PeculiarityRepo, PowerArrayRepo, PowerRepo,
};
pub use types::{Page, PAGE_SIZE};

#[cfg(test)]
pub use repos::{
    MockEffectBaseRepo, MockModificationBaseRepo, MockPeculiarityRepo, MockPowerArrayRepo,
    MockPowerRepo,
};
