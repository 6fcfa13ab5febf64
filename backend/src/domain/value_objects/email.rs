use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_LEN: usize = 255;

/// Invitee address, trimmed and lower-cased on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    pub fn new(email: impl AsRef<str>) -> Result<Self, String> {
        let email = email.as_ref().trim().to_lowercase();
        if email.is_empty() {
            return Err("Email is required".to_string());
        }
        if email.chars().count() > MAX_LEN {
            return Err("Email too long".to_string());
        }
        Ok(Self(email))
    }

    /// Wraps a value read back from the store as-is. Legacy rows may predate
    /// the input rules enforced by [`Email::new`].
    pub fn from_db(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
