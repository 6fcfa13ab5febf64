use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use crate::domain::entities::{Invitation, InvitationStatus, NewInvitation};
use crate::domain::value_objects::Email;

/// Unique constraints enforced by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Email,
    CustomerId,
    InvitationCode,
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UniqueField::Email => "email",
            UniqueField::CustomerId => "customer_id",
            UniqueField::InvitationCode => "invitation_code",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("unique constraint violated on {0}")]
    Conflict(UniqueField),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store call timed out after {0:?}")]
    Timeout(Duration),
    #[error("stored invitation is invalid: {0}")]
    Corrupt(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AcceptOutcome {
    Updated(Invitation),
    /// No row for the email, or the row was already accepted.
    NotFound,
}

/// Row counts per status, all taken from the same read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub sent: u64,
    pub pending: u64,
    pub accepted: u64,
    pub error: u64,
}

impl StatusCounts {
    pub fn add(&mut self, status: InvitationStatus, n: u64) {
        match status {
            InvitationStatus::Sent => self.sent += n,
            InvitationStatus::Pending => self.pending += n,
            InvitationStatus::Accepted => self.accepted += n,
            InvitationStatus::Error => self.error += n,
        }
    }

    pub fn total(&self) -> u64 {
        self.sent + self.pending + self.accepted + self.error
    }
}

/// Persistence contract for invitations. Each call is one logical transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvitationStore: Send + Sync {
    /// Fails with `StoreError::Conflict` naming the violated unique field.
    async fn insert(&self, invitation: &NewInvitation) -> Result<Invitation, StoreError>;
    async fn count_all(&self) -> Result<u64, StoreError>;
    async fn count_by_status(&self, status: InvitationStatus) -> Result<u64, StoreError>;
    /// Every status counted in one statement, so the counts are mutually consistent.
    async fn count_all_by_status(&self) -> Result<StatusCounts, StoreError>;
    /// Newest invitation first.
    async fn list_all(&self) -> Result<Vec<Invitation>, StoreError>;
    /// Compare-and-set: only rows whose status is not `accepted` are updated.
    async fn accept_by_email(&self, email: &Email) -> Result<AcceptOutcome, StoreError>;
}
