//! Point-cost value object shared by powers and arrays.
//!
//! A cost bundles the three point currencies of the game: PdA (power
//! points), PE (energy points) and espaços (slots). Instances are
//! immutable; every arithmetic operation returns a new value.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Upper bound for the PdA field
pub const MAX_PDA: u32 = 99_999;

/// Upper bound for the PE field
pub const MAX_PE: u32 = 999;

/// Upper bound for the espaços field
pub const MAX_ESPACOS: u32 = 999;

/// Immutable point-cost bundle
///
/// # Invariants
///
/// - `pda <= 99_999`
/// - `pe <= 999`
/// - `espacos <= 999`
///
/// Arithmetic never leaves this range: `add` saturates at the caps,
/// `subtract` floors at zero per field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PowerCostWire")]
#[serde(rename_all = "camelCase")]
pub struct PowerCost {
    pda: u32,
    pe: u32,
    espacos: u32,
}

impl PowerCost {
    /// Create a new validated cost.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if any field exceeds its cap.
    pub fn new(pda: u32, pe: u32, espacos: u32) -> Result<Self, DomainError> {
        if pda > MAX_PDA {
            return Err(DomainError::validation(format!(
                "PdA cost cannot exceed {}",
                MAX_PDA
            )));
        }
        if pe > MAX_PE {
            return Err(DomainError::validation(format!(
                "PE cost cannot exceed {}",
                MAX_PE
            )));
        }
        if espacos > MAX_ESPACOS {
            return Err(DomainError::validation(format!(
                "Espaços cost cannot exceed {}",
                MAX_ESPACOS
            )));
        }
        Ok(Self { pda, pe, espacos })
    }

    /// The zero cost.
    pub fn zero() -> Self {
        Self {
            pda: 0,
            pe: 0,
            espacos: 0,
        }
    }

    /// Build a cost from signed totals, clamping each field into its
    /// legal range. Used by the cost aggregator, where intermediate sums
    /// may be negative or exceed the caps.
    pub fn clamped(pda: i64, pe: i64, espacos: i64) -> Self {
        Self {
            pda: clamp_field(pda, MAX_PDA),
            pe: clamp_field(pe, MAX_PE),
            espacos: clamp_field(espacos, MAX_ESPACOS),
        }
    }

    #[inline]
    pub fn pda(&self) -> u32 {
        self.pda
    }

    #[inline]
    pub fn pe(&self) -> u32 {
        self.pe
    }

    #[inline]
    pub fn espacos(&self) -> u32 {
        self.espacos
    }

    pub fn is_zero(&self) -> bool {
        self.pda == 0 && self.pe == 0 && self.espacos == 0
    }

    /// Field-wise addition, saturating at each field's cap.
    pub fn add(self, other: Self) -> Self {
        Self {
            pda: (self.pda + other.pda).min(MAX_PDA),
            pe: (self.pe + other.pe).min(MAX_PE),
            espacos: (self.espacos + other.espacos).min(MAX_ESPACOS),
        }
    }

    /// Field-wise subtraction, floored at zero per field.
    pub fn subtract(self, other: Self) -> Self {
        Self {
            pda: self.pda.saturating_sub(other.pda),
            pe: self.pe.saturating_sub(other.pe),
            espacos: self.espacos.saturating_sub(other.espacos),
        }
    }

    /// Scalar multiplication, rounding each field to the nearest integer.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `factor` is negative.
    pub fn scale(self, factor: f64) -> Result<Self, DomainError> {
        if factor < 0.0 {
            return Err(DomainError::validation(
                "Cost scale factor cannot be negative",
            ));
        }
        Ok(Self::clamped(
            (f64::from(self.pda) * factor).round() as i64,
            (f64::from(self.pe) * factor).round() as i64,
            (f64::from(self.espacos) * factor).round() as i64,
        ))
    }
}

fn clamp_field(value: i64, max: u32) -> u32 {
    value.clamp(0, i64::from(max)) as u32
}

/// Raw wire shape; validation runs in `TryFrom` on deserialization.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PowerCostWire {
    pda: u32,
    pe: u32,
    espacos: u32,
}

impl TryFrom<PowerCostWire> for PowerCost {
    type Error = DomainError;

    fn try_from(wire: PowerCostWire) -> Result<Self, Self::Error> {
        Self::new(wire.pda, wire.pe, wire.espacos)
    }
}
