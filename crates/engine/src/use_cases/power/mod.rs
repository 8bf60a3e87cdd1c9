//! Power use cases: create, update, get, list, delete.

mod composition;
pub mod create_power;
pub mod delete_power;
pub mod error;
pub mod get_power;
pub mod list_powers;
pub mod types;
pub mod update_power;

pub use create_power::{CreatePower, CreatePowerInput};
pub use delete_power::DeletePower;
pub use error::PowerError;
pub use get_power::GetPower;
pub use list_powers::ListPowers;
pub use types::{EffectInput, ModificationInput};
pub use update_power::{UpdatePower, UpdatePowerInput};
