//! Poderes Domain
//!
//! Pure domain layer for the power-composition rules engine: value
//! objects, catalog entities, the cost aggregator, and the `Power` /
//! `PowerArray` aggregates. Everything here is synchronous, deterministic
//! and free of I/O; orchestration against repositories lives in
//! `poderes-engine`.

extern crate self as poderes_domain;

pub mod aggregates;
pub mod common;
pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod rules;
pub mod value_objects;

// Re-export aggregates
pub use aggregates::{Power, PowerArray, PowerArrayKind, MAX_EFFECTS, MAX_GLOBAL_MODIFICATIONS, MAX_POWERS};

// Re-export entities
pub use entities::{
    AppliedEffect, ConfigurationOption, EffectBase, InputRequirement, ModificationBase,
    Peculiarity, MAX_GRADE, MAX_MODIFICATIONS, MIN_GRADE,
};

pub use error::DomainError;
pub use events::{DomainEvent, EventDispatcher, EventSource};

// Re-export ID types
pub use ids::{
    AppliedEffectId, EffectBaseId, ItemId, ModificationBaseId, PeculiarityId, PowerArrayId,
    PowerId, UserId,
};

// Re-export value objects
pub use value_objects::{
    AlternativeCost, AppliedModification, ArrayName, Description, Domain, DomainName,
    ModificationScope, Note, PowerCost, PowerName, PowerParameters,
};

// Re-export the rules engine entry points
pub use rules::{
    derive_parameters, effect_cost, modifier_for, most_restrictive, power_cost,
    sum_member_costs, themed_array_cost, ArrayCostError, Catalog, CostError, ParameterKind,
};

// Re-export change tracking
pub use common::WatchedList;
