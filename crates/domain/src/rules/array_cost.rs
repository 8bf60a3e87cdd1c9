//! Themed-array ("acervo") cost rule.
//!
//! The `PowerArray` aggregate only ever sums member costs field-wise.
//! Themed arrays price differently: the most expensive member (the
//! "principal") is paid in full and every additional member costs 1 PdA,
//! because an Alternado array has at most one member active at a time.
//! This stricter model is a named rule on its own; callers pick which of
//! the two computations they mean.

use thiserror::Error;

use crate::aggregates::{Power, PowerArrayKind};
use crate::rules::parameter_scale::PERMANENT_DURATION;
use crate::value_objects::PowerCost;

/// PdA surcharge per member beyond the principal
const EXTRA_MEMBER_PDA: u32 = 1;

/// Violation of the themed-array validation rules
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArrayCostError {
    /// Permanent powers cannot be swapped out, so they never join an array.
    #[error("Power '{name}' has permanent duration and cannot join an array")]
    PermanentDuration { name: String },
}

/// Price a themed array of powers.
///
/// Normal arrays stack, so they cost the plain field-wise sum. Alternado
/// and Dinamico arrays cost the principal member's PdA plus 1 PdA per
/// additional member; espaços always sum across members, and PE is
/// carried from the principal. On equal PdA the first-seen member is the
/// principal.
///
/// # Errors
///
/// Returns [`ArrayCostError::PermanentDuration`] if any member manifests
/// with permanent duration.
pub fn themed_array_cost(
    powers: &[Power],
    kind: PowerArrayKind,
) -> Result<PowerCost, ArrayCostError> {
    for power in powers {
        if power.parameters().duration() == PERMANENT_DURATION {
            return Err(ArrayCostError::PermanentDuration {
                name: power.name().as_str().to_string(),
            });
        }
    }

    match kind {
        PowerArrayKind::Normal => Ok(sum_member_costs(powers)),
        PowerArrayKind::Alternado | PowerArrayKind::Dinamico => {
            let Some(principal) = principal(powers) else {
                return Ok(PowerCost::zero());
            };

            let extras = (powers.len() as u32 - 1) * EXTRA_MEMBER_PDA;
            let espacos: i64 = powers
                .iter()
                .map(|p| i64::from(p.total_cost().espacos()))
                .sum();

            Ok(PowerCost::clamped(
                i64::from(principal.total_cost().pda()) + i64::from(extras),
                i64::from(principal.total_cost().pe()),
                espacos,
            ))
        }
    }
}

/// Field-wise sum of member costs - the generic rule the aggregate uses.
pub fn sum_member_costs(powers: &[Power]) -> PowerCost {
    powers
        .iter()
        .fold(PowerCost::zero(), |total, power| total.add(power.total_cost()))
}

/// The most expensive member by PdA; first-seen wins ties.
fn principal(powers: &[Power]) -> Option<&Power> {
    powers.iter().reduce(|best, candidate| {
        if candidate.total_cost().pda() > best.total_cost().pda() {
            candidate
        } else {
            best
        }
    })
}
