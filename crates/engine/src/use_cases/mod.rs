//! Use cases: user-story orchestration over the aggregates and ports.
//!
//! Each family owns its error enum; the not-found variants are the typed
//! failure channel, everything else surfaces unconverted.

pub mod catalog;
pub mod peculiarity;
pub mod power;
pub mod power_array;

pub use catalog::{
    CatalogError, CreateEffectBase, CreateEffectBaseInput, CreateModificationBase,
    CreateModificationBaseInput,
};
pub use peculiarity::ListPeculiarities;
pub use power::{
    CreatePower, CreatePowerInput, DeletePower, EffectInput, GetPower, ListPowers,
    ModificationInput, PowerError, UpdatePower, UpdatePowerInput,
};
pub use power_array::{
    CreatePowerArray, CreatePowerArrayInput, DeletePowerArray, GetPowerArray, ListPowerArrays,
    PowerArrayError, UpdatePowerArray, UpdatePowerArrayInput,
};
