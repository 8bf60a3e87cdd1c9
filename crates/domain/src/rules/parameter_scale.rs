//! Parameter scales and transition pricing.
//!
//! Each parameter of a power (action, range, duration) is an ordinal into
//! a fixed scale. When a power manifests with a parameter different from
//! an effect's default, the difference is priced:
//!
//! - Action and range price linearly on an *effective cost*: most entries
//!   cost their own ordinal, but an entry may declare a cost-equivalent
//!   ordinal it is priced as (the Permanente action is priced as
//!   Estendida).
//! - Duration prices per step walked, and the steps are not uniform:
//!   later tiers are disproportionately expensive.
//!
//! All functions here are pure and total: out-of-table ordinals fall back
//! to identity cost rather than failing.

/// The three priced power parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    Action,
    Range,
    Duration,
}

/// Duration ordinal of the Permanente tier, disallowed inside themed arrays
pub const PERMANENT_DURATION: u8 = 4;

struct ScaleEntry {
    ordinal: u8,
    name: &'static str,
    /// Priced as this ordinal instead of its own, when declared.
    cost_equivalent: Option<i32>,
}

const ACTION_SCALE: &[ScaleEntry] = &[
    ScaleEntry { ordinal: 0, name: "Livre", cost_equivalent: None },
    ScaleEntry { ordinal: 1, name: "Reação", cost_equivalent: None },
    ScaleEntry { ordinal: 2, name: "Padrão", cost_equivalent: None },
    ScaleEntry { ordinal: 3, name: "Completa", cost_equivalent: None },
    ScaleEntry { ordinal: 4, name: "Estendida", cost_equivalent: None },
    // Always-on powers demand no action at play time; priced as Estendida.
    ScaleEntry { ordinal: 5, name: "Permanente", cost_equivalent: Some(4) },
];

const RANGE_SCALE: &[ScaleEntry] = &[
    ScaleEntry { ordinal: 0, name: "Pessoal", cost_equivalent: None },
    ScaleEntry { ordinal: 1, name: "Toque", cost_equivalent: None },
    ScaleEntry { ordinal: 2, name: "Curto", cost_equivalent: None },
    ScaleEntry { ordinal: 3, name: "Médio", cost_equivalent: None },
    ScaleEntry { ordinal: 4, name: "Longo", cost_equivalent: None },
    ScaleEntry { ordinal: 5, name: "Percepção", cost_equivalent: None },
    ScaleEntry { ordinal: 6, name: "Ilimitado", cost_equivalent: None },
];

const DURATION_SCALE: &[ScaleEntry] = &[
    ScaleEntry { ordinal: 0, name: "Instantânea", cost_equivalent: None },
    ScaleEntry { ordinal: 1, name: "Concentração", cost_equivalent: None },
    ScaleEntry { ordinal: 2, name: "Sustentada", cost_equivalent: None },
    ScaleEntry { ordinal: 3, name: "Ativada", cost_equivalent: None },
    ScaleEntry { ordinal: 4, name: "Permanente", cost_equivalent: None },
];

fn scale_for(kind: ParameterKind) -> &'static [ScaleEntry] {
    match kind {
        ParameterKind::Action => ACTION_SCALE,
        ParameterKind::Range => RANGE_SCALE,
        ParameterKind::Duration => DURATION_SCALE,
    }
}

/// Display name of a scale entry, if the ordinal is in the table.
pub fn entry_name(kind: ParameterKind, ordinal: u8) -> Option<&'static str> {
    scale_for(kind)
        .iter()
        .find(|entry| entry.ordinal == ordinal)
        .map(|entry| entry.name)
}

/// Ordinal an entry is priced as: its declared cost-equivalent when
/// present, else the raw ordinal. Out-of-table ordinals price as
/// themselves.
fn effective_cost(kind: ParameterKind, ordinal: u8) -> i32 {
    scale_for(kind)
        .iter()
        .find(|entry| entry.ordinal == ordinal)
        .and_then(|entry| entry.cost_equivalent)
        .unwrap_or(i32::from(ordinal))
}

/// Price of one step up between adjacent duration ordinals.
/// Steps not listed cost 1.
fn duration_step_cost(lower: u8) -> i32 {
    match lower {
        0 => 1, // Instantânea -> Concentração
        1 => 2, // Concentração -> Sustentada
        2 => 3, // Sustentada -> Ativada
        _ => 1,
    }
}

/// Cost delta of manifesting with `used_value` when the effect's default
/// is `default_value`.
///
/// Positive when the used value is less restrictive (costlier) than the
/// default, negative the other way around, zero when they match.
pub fn modifier_for(kind: ParameterKind, default_value: u8, used_value: u8) -> i32 {
    match kind {
        ParameterKind::Action | ParameterKind::Range => {
            effective_cost(kind, used_value) - effective_cost(kind, default_value)
        }
        ParameterKind::Duration => {
            if used_value >= default_value {
                (default_value..used_value).map(duration_step_cost).sum()
            } else {
                -(used_value..default_value)
                    .map(duration_step_cost)
                    .sum::<i32>()
            }
        }
    }
}

/// The most restrictive (lowest) ordinal of a list, or `None` when the
/// list is empty. Callers must treat `None` as "no effects present", not
/// as ordinal zero.
pub fn most_restrictive(values: &[u8]) -> Option<u8> {
    values.iter().copied().min()
}
