//! Entities: identity-carrying records below the aggregate roots.

pub mod applied_effect;
pub mod effect_base;
pub mod modification_base;
pub mod peculiarity;

pub use applied_effect::{AppliedEffect, MAX_GRADE, MAX_MODIFICATIONS, MIN_GRADE};
pub use effect_base::{ConfigurationOption, EffectBase, InputRequirement};
pub use modification_base::ModificationBase;
pub use peculiarity::Peculiarity;
