use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_LEN: usize = 100;

/// First or last name of an invitee. Case is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName(String);

impl PersonName {
    pub fn new(name: impl AsRef<str>) -> Result<Self, String> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err("Name cannot be empty".to_string());
        }
        if name.chars().count() > MAX_LEN {
            return Err("Name too long".to_string());
        }
        Ok(Self(name.to_string()))
    }

    /// Wraps a value read back from the store as-is. Legacy rows may predate
    /// the input rules enforced by [`PersonName::new`].
    pub fn from_db(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_but_keeps_case() {
        assert_eq!(PersonName::new("  Alice ").unwrap().as_str(), "Alice");
    }

    #[test]
    fn rejects_blank_and_overlong() {
        assert!(PersonName::new(" \t").is_err());
        assert!(PersonName::new("x".repeat(101)).is_err());
        assert!(PersonName::new("x".repeat(100)).is_ok());
    }
}
