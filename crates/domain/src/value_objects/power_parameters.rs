//! Manifestation parameters of a power.
//!
//! Action, range and duration are ordinals into the parameter scales
//! defined in `rules::parameter_scale`. Higher ordinals are less
//! restrictive (and usually costlier); the default triple describes the
//! baseline manifestation: standard action, touch range, instant duration.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Upper bound for the action ordinal
pub const MAX_ACTION: u8 = 5;

/// Upper bound for the range ordinal
pub const MAX_RANGE: u8 = 6;

/// Upper bound for the duration ordinal
pub const MAX_DURATION: u8 = 4;

/// How a power manifests: action required, reach and persistence
///
/// # Invariants
///
/// - `action <= 5`
/// - `range <= 6`
/// - `duration <= 4`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PowerParametersWire")]
#[serde(rename_all = "camelCase")]
pub struct PowerParameters {
    action: u8,
    range: u8,
    duration: u8,
}

impl PowerParameters {
    /// Create validated parameters.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if any ordinal is out of range.
    pub fn new(action: u8, range: u8, duration: u8) -> Result<Self, DomainError> {
        if action > MAX_ACTION {
            return Err(DomainError::validation(format!(
                "Action ordinal cannot exceed {}",
                MAX_ACTION
            )));
        }
        if range > MAX_RANGE {
            return Err(DomainError::validation(format!(
                "Range ordinal cannot exceed {}",
                MAX_RANGE
            )));
        }
        if duration > MAX_DURATION {
            return Err(DomainError::validation(format!(
                "Duration ordinal cannot exceed {}",
                MAX_DURATION
            )));
        }
        Ok(Self {
            action,
            range,
            duration,
        })
    }

    #[inline]
    pub fn action(&self) -> u8 {
        self.action
    }

    #[inline]
    pub fn range(&self) -> u8 {
        self.range
    }

    #[inline]
    pub fn duration(&self) -> u8 {
        self.duration
    }

    /// Returns a copy with a different action ordinal.
    pub fn with_action(self, action: u8) -> Result<Self, DomainError> {
        Self::new(action, self.range, self.duration)
    }

    /// Returns a copy with a different range ordinal.
    pub fn with_range(self, range: u8) -> Result<Self, DomainError> {
        Self::new(self.action, range, self.duration)
    }

    /// Returns a copy with a different duration ordinal.
    pub fn with_duration(self, duration: u8) -> Result<Self, DomainError> {
        Self::new(self.action, self.range, duration)
    }
}

impl Default for PowerParameters {
    /// Standard action, touch range, instant duration.
    fn default() -> Self {
        Self {
            action: 2,
            range: 1,
            duration: 0,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PowerParametersWire {
    action: u8,
    range: u8,
    duration: u8,
}

impl TryFrom<PowerParametersWire> for PowerParameters {
    type Error = DomainError;

    fn try_from(wire: PowerParametersWire) -> Result<Self, Self::Error> {
        Self::new(wire.action, wire.range, wire.duration)
    }
}
