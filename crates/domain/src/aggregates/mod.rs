//! Aggregate roots. Each aggregate exclusively owns its nested value
//! objects and entity collections and re-validates its invariants on
//! every mutation.

pub mod power;
pub mod power_array;

pub use power::{Power, MAX_EFFECTS, MAX_GLOBAL_MODIFICATIONS};
pub use power_array::{PowerArray, PowerArrayKind, MAX_POWERS};
