//! Alternative activation costs.
//!
//! Some powers are paid with something other than the standard point
//! budget: energy, vitality, an attribute, a consumed item or raw
//! material. Each kind carries the data it needs and nothing else.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::ItemId;

/// What a power burns on activation instead of (or on top of) its PdA cost
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all_fields = "camelCase")]
pub enum AlternativeCost {
    /// Energy points per activation
    Pe { quantity: u32 },
    /// Vitality points per activation
    Pv { quantity: u32 },
    /// Temporary attribute drain
    Atributo { quantity: u32, attribute: String },
    /// A specific item consumed on use
    Item { quantity: u32, item_id: ItemId },
    /// Loose material described in prose
    Material { quantity: u32, description: String },
}

impl AlternativeCost {
    /// Energy-point cost.
    pub fn pe(quantity: u32) -> Result<Self, DomainError> {
        Self::check_quantity(quantity)?;
        Ok(Self::Pe { quantity })
    }

    /// Vitality-point cost.
    pub fn pv(quantity: u32) -> Result<Self, DomainError> {
        Self::check_quantity(quantity)?;
        Ok(Self::Pv { quantity })
    }

    /// Attribute-drain cost.
    pub fn atributo(quantity: u32, attribute: impl Into<String>) -> Result<Self, DomainError> {
        Self::check_quantity(quantity)?;
        let attribute = attribute.into();
        if attribute.trim().is_empty() {
            return Err(DomainError::validation(
                "Attribute cost requires the attribute name",
            ));
        }
        Ok(Self::Atributo {
            quantity,
            attribute: attribute.trim().to_string(),
        })
    }

    /// Item-consumption cost.
    pub fn item(quantity: u32, item_id: ItemId) -> Result<Self, DomainError> {
        Self::check_quantity(quantity)?;
        Ok(Self::Item { quantity, item_id })
    }

    /// Material cost described in prose.
    pub fn material(quantity: u32, description: impl Into<String>) -> Result<Self, DomainError> {
        Self::check_quantity(quantity)?;
        let description = description.into();
        if description.trim().is_empty() {
            return Err(DomainError::validation(
                "Material cost requires a description",
            ));
        }
        Ok(Self::Material {
            quantity,
            description: description.trim().to_string(),
        })
    }

    /// How many units are consumed per activation.
    pub fn quantity(&self) -> u32 {
        match self {
            Self::Pe { quantity }
            | Self::Pv { quantity }
            | Self::Atributo { quantity, .. }
            | Self::Item { quantity, .. }
            | Self::Material { quantity, .. } => *quantity,
        }
    }

    fn check_quantity(quantity: u32) -> Result<(), DomainError> {
        if quantity == 0 {
            return Err(DomainError::validation(
                "Alternative cost quantity must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_must_be_positive() {
        assert!(AlternativeCost::pe(0).is_err());
        assert!(AlternativeCost::pv(0).is_err());
        assert!(AlternativeCost::pe(1).is_ok());
    }

    #[test]
    fn atributo_requires_attribute_name() {
        assert!(AlternativeCost::atributo(2, "").is_err());
        let cost = AlternativeCost::atributo(2, "Vigor").unwrap();
        assert!(matches!(cost, AlternativeCost::Atributo { ref attribute, .. } if attribute == "Vigor"));
    }

    #[test]
    fn material_requires_description() {
        assert!(AlternativeCost::material(1, "  ").is_err());
        assert!(AlternativeCost::material(1, "pó de prata").is_ok());
    }

    #[test]
    fn serde_tags_by_type() {
        let cost = AlternativeCost::item(3, ItemId::new()).unwrap();
        let json = serde_json::to_string(&cost).unwrap();
        assert!(json.contains("\"type\":\"ITEM\""));
        assert!(json.contains("itemId"));

        let back: AlternativeCost = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cost);
    }
}
