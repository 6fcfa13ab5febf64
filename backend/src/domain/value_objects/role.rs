use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_LEN: usize = 50;

/// Role offered to the invitee. Open vocabulary, stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role(String);

impl Role {
    pub fn new(role: impl AsRef<str>) -> Result<Self, String> {
        let role = role.as_ref().trim().to_lowercase();
        if role.is_empty() {
            return Err("Role cannot be empty".to_string());
        }
        if role.chars().count() > MAX_LEN {
            return Err("Role too long".to_string());
        }
        Ok(Self(role))
    }

    /// Wraps a value read back from the store as-is. Legacy rows may predate
    /// the input rules enforced by [`Role::new`].
    pub fn from_db(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Role with its first letter upper-cased, for human-facing text.
    pub fn title(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
