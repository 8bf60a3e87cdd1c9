//! Power domain value object.
//!
//! Every power and array belongs to exactly one domain. Two domains carry
//! extra data: Científico requires a knowledge area, Peculiar requires a
//! reference to the user-owned peculiarity backing it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::ids::PeculiarityId;

/// The fixed set of power domains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainName {
    Arcano,
    Cientifico,
    Divino,
    Elemental,
    Mental,
    Natural,
    Sombrio,
    Peculiar,
}

impl DomainName {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Arcano => "Arcano",
            Self::Cientifico => "Científico",
            Self::Divino => "Divino",
            Self::Elemental => "Elemental",
            Self::Mental => "Mental",
            Self::Natural => "Natural",
            Self::Sombrio => "Sombrio",
            Self::Peculiar => "Peculiar",
        }
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A power's domain, with the conditional data some names require
///
/// # Invariants
///
/// - `knowledge_area` is present iff the name is `Cientifico`
/// - `peculiarity_id` is present iff the name is `Peculiar`
///
/// Equality is structural: two domains are the same only when name and
/// conditional data all match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DomainWire")]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    name: DomainName,
    #[serde(skip_serializing_if = "Option::is_none")]
    knowledge_area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    peculiarity_id: Option<PeculiarityId>,
}

impl Domain {
    /// Create a domain from a plain name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for `Cientifico` and `Peculiar`,
    /// which require their conditional fields; use [`Domain::cientifico`]
    /// or [`Domain::peculiar`] for those.
    pub fn new(name: DomainName) -> Result<Self, DomainError> {
        Self::from_parts(name, None, None)
    }

    /// Create a Científico domain with its knowledge area.
    pub fn cientifico(knowledge_area: impl Into<String>) -> Result<Self, DomainError> {
        Self::from_parts(DomainName::Cientifico, Some(knowledge_area.into()), None)
    }

    /// Create a Peculiar domain bound to a user peculiarity.
    pub fn peculiar(peculiarity_id: PeculiarityId) -> Self {
        Self {
            name: DomainName::Peculiar,
            knowledge_area: None,
            peculiarity_id: Some(peculiarity_id),
        }
    }

    /// Assemble a domain from raw parts, enforcing the iff-rules.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if a required conditional field
    /// is missing, empty, or present on a name that forbids it.
    pub fn from_parts(
        name: DomainName,
        knowledge_area: Option<String>,
        peculiarity_id: Option<PeculiarityId>,
    ) -> Result<Self, DomainError> {
        match name {
            DomainName::Cientifico => {
                let area = knowledge_area.ok_or_else(|| {
                    DomainError::validation("Científico domain requires a knowledge area")
                })?;
                if area.trim().is_empty() {
                    return Err(DomainError::validation(
                        "Científico knowledge area cannot be empty",
                    ));
                }
                if peculiarity_id.is_some() {
                    return Err(DomainError::validation(
                        "Only the Peculiar domain may reference a peculiarity",
                    ));
                }
                Ok(Self {
                    name,
                    knowledge_area: Some(area.trim().to_string()),
                    peculiarity_id: None,
                })
            }
            DomainName::Peculiar => {
                if knowledge_area.is_some() {
                    return Err(DomainError::validation(
                        "Only the Científico domain carries a knowledge area",
                    ));
                }
                let id = peculiarity_id.ok_or_else(|| {
                    DomainError::validation("Peculiar domain requires a peculiarity reference")
                })?;
                Ok(Self {
                    name,
                    knowledge_area: None,
                    peculiarity_id: Some(id),
                })
            }
            _ => {
                if knowledge_area.is_some() {
                    return Err(DomainError::validation(
                        "Only the Científico domain carries a knowledge area",
                    ));
                }
                if peculiarity_id.is_some() {
                    return Err(DomainError::validation(
                        "Only the Peculiar domain may reference a peculiarity",
                    ));
                }
                Ok(Self {
                    name,
                    knowledge_area: None,
                    peculiarity_id: None,
                })
            }
        }
    }

    #[inline]
    pub fn name(&self) -> DomainName {
        self.name
    }

    #[inline]
    pub fn knowledge_area(&self) -> Option<&str> {
        self.knowledge_area.as_deref()
    }

    #[inline]
    pub fn peculiarity_id(&self) -> Option<PeculiarityId> {
        self.peculiarity_id
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.knowledge_area, &self.peculiarity_id) {
            (Some(area), _) => write!(f, "{} ({})", self.name, area),
            (_, Some(id)) => write!(f, "{} ({})", self.name, id),
            _ => write!(f, "{}", self.name),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DomainWire {
    name: DomainName,
    #[serde(default)]
    knowledge_area: Option<String>,
    #[serde(default)]
    peculiarity_id: Option<PeculiarityId>,
}

impl TryFrom<DomainWire> for Domain {
    type Error = DomainError;

    fn try_from(wire: DomainWire) -> Result<Self, Self::Error> {
        Self::from_parts(wire.name, wire.knowledge_area, wire.peculiarity_id)
    }
}
