//! Value objects: immutable, self-validating bundles owned by the
//! aggregates. Construction validates; every operation returns a new
//! instance.

pub mod alternative_cost;
pub mod applied_modification;
pub mod domain;
pub mod names;
pub mod power_cost;
pub mod power_parameters;

pub use alternative_cost::AlternativeCost;
pub use applied_modification::{AppliedModification, ModificationScope, CONFIGURATION_PARAM};
pub use domain::{Domain, DomainName};
pub use names::{ArrayName, Description, Note, PowerName};
pub use power_cost::{PowerCost, MAX_ESPACOS, MAX_PDA, MAX_PE};
pub use power_parameters::{PowerParameters, MAX_ACTION, MAX_DURATION, MAX_RANGE};
