//! Power array ("acervo") use cases.

pub mod create_power_array;
pub mod delete_power_array;
pub mod error;
pub mod get_power_array;
pub mod list_power_arrays;
mod resolve;
pub mod update_power_array;

pub use create_power_array::{CreatePowerArray, CreatePowerArrayInput};
pub use delete_power_array::DeletePowerArray;
pub use error::PowerArrayError;
pub use get_power_array::GetPowerArray;
pub use list_power_arrays::ListPowerArrays;
pub use update_power_array::{UpdatePowerArray, UpdatePowerArrayInput};
