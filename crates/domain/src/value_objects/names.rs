//! Validated string newtypes for domain entities
//!
//! These newtypes ensure that text fields are valid by construction:
//! - Non-empty where the domain requires it
//! - Within length limits
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for power and array names
const MAX_NAME_LENGTH: usize = 100;

/// Maximum length for description fields
const MAX_DESCRIPTION_LENGTH: usize = 5000;

/// Maximum length for free-form notes
const MAX_NOTE_LENGTH: usize = 500;

// ============================================================================
// PowerName
// ============================================================================

/// A validated power name (non-empty, <=100 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PowerName(String);

impl PowerName {
    /// Create a new validated power name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is empty after trimming
    /// - The name exceeds 100 characters after trimming
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Power name cannot be empty"));
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Power name cannot exceed {} characters",
                MAX_NAME_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PowerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PowerName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<PowerName> for String {
    fn from(name: PowerName) -> String {
        name.0
    }
}

// ============================================================================
// ArrayName
// ============================================================================

/// A validated power-array ("acervo") name (non-empty, <=100 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArrayName(String);

impl ArrayName {
    /// Create a new validated array name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is empty after trimming
    /// - The name exceeds 100 characters after trimming
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Array name cannot be empty"));
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Array name cannot exceed {} characters",
                MAX_NAME_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArrayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ArrayName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ArrayName> for String {
    fn from(name: ArrayName) -> String {
        name.0
    }
}

// ============================================================================
// Description
// ============================================================================

/// A validated description (non-empty, <=5000 chars, trimmed)
///
/// Powers and arrays always carry a description of what they do in the
/// fiction; an empty description is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    /// Create a new validated description.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The description is empty after trimming
    /// - The description exceeds 5000 characters after trimming
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Description cannot be empty"));
        }
        if trimmed.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(DomainError::validation(format!(
                "Description cannot exceed {} characters",
                MAX_DESCRIPTION_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the description as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Description {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Description> for String {
    fn from(description: Description) -> String {
        description.0
    }
}

// ============================================================================
// Note
// ============================================================================

/// A free-form note (<=500 chars, may be empty)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Note(String);

impl Note {
    /// Create a new validated note.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the note exceeds 500 characters.
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.chars().count() > MAX_NOTE_LENGTH {
            return Err(DomainError::validation(format!(
                "Note cannot exceed {} characters",
                MAX_NOTE_LENGTH
            )));
        }
        Ok(Self(text))
    }

    /// Returns the note as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Note {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Note> for String {
    fn from(note: Note) -> String {
        note.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_name_rejects_empty() {
        assert!(PowerName::new("").is_err());
        assert!(PowerName::new("   ").is_err());
    }

    #[test]
    fn power_name_rejects_too_long() {
        let long = "x".repeat(101);
        assert!(PowerName::new(long).is_err());
        assert!(PowerName::new("x".repeat(100)).is_ok());
    }

    #[test]
    fn power_name_trims_whitespace() {
        let name = PowerName::new("  Rajada de Fogo  ").unwrap();
        assert_eq!(name.as_str(), "Rajada de Fogo");
    }

    #[test]
    fn description_rejects_empty() {
        assert!(Description::new("").is_err());
    }

    #[test]
    fn note_allows_empty_but_caps_length() {
        assert!(Note::new("").is_ok());
        assert!(Note::new("x".repeat(500)).is_ok());
        assert!(Note::new("x".repeat(501)).is_err());
    }

    #[test]
    fn serde_roundtrip_validates() {
        let name: PowerName = serde_json::from_str("\"Voo\"").unwrap();
        assert_eq!(name.as_str(), "Voo");

        let bad: Result<PowerName, _> = serde_json::from_str("\"\"");
        assert!(bad.is_err());
    }
}
