//! The rules engine: pure, synchronous, deterministic computations over
//! already-validated domain objects and a read-only catalog snapshot.

pub mod array_cost;
pub mod cost;
pub mod parameter_scale;

pub use array_cost::{sum_member_costs, themed_array_cost, ArrayCostError};
pub use cost::{
    derive_parameters, effect_cost, global_fixed_delta, global_per_grade_delta, power_cost,
    Catalog, CostError,
};
pub use parameter_scale::{
    entry_name, modifier_for, most_restrictive, ParameterKind, PERMANENT_DURATION,
};
