use crate::domain::value_objects::*;
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Persisted invitation row
#[derive(Debug, Clone, PartialEq)]
pub struct Invitation {
    pub id: i64,
    pub customer_id: CustomerId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: Email,
    pub role: Role,
    pub status: InvitationStatus,
    pub invitation_code: InvitationCode,
    pub invited_on: DateTime<Utc>,
    pub accepted_on: Option<DateTime<Utc>>,
}

/// An invitation that has been validated but not yet stored, so it has no row id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvitation {
    pub customer_id: CustomerId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: Email,
    pub role: Role,
    pub invitation_code: InvitationCode,
    pub invited_on: DateTime<Utc>,
}

/// Lifecycle status.
///
/// `Pending` only appears in legacy or hand-edited rows and `Error` is never
/// written by this service; both are kept so such rows can be read and counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Sent,
    Pending,
    Accepted,
    Error,
}

impl InvitationStatus {
    pub const ALL: [InvitationStatus; 4] = [
        InvitationStatus::Sent,
        InvitationStatus::Pending,
        InvitationStatus::Accepted,
        InvitationStatus::Error,
    ];

    pub fn as_db_str(&self) -> &'static str {
        match self {
            InvitationStatus::Sent => "sent",
            InvitationStatus::Pending => "pending",
            InvitationStatus::Accepted => "accepted",
            InvitationStatus::Error => "error",
        }
    }
}

impl fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_db_str())
    }
}

impl FromStr for InvitationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sent" => Ok(InvitationStatus::Sent),
            "pending" => Ok(InvitationStatus::Pending),
            "accepted" => Ok(InvitationStatus::Accepted),
            "error" => Ok(InvitationStatus::Error),
            other => Err(format!("Unknown invitation status: {other}")),
        }
    }
}

impl NewInvitation {
    pub fn into_invitation(self, id: i64) -> Invitation {
        Invitation {
            id,
            customer_id: self.customer_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            role: self.role,
            status: InvitationStatus::Sent,
            invitation_code: self.invitation_code,
            invited_on: self.invited_on,
            accepted_on: None,
        }
    }
}

impl Invitation {
    pub fn is_accepted(&self) -> bool {
        self.status == InvitationStatus::Accepted
    }

    /// Moves any non-accepted invitation to `Accepted`.
    ///
    /// Returns `false` and leaves the row untouched when it was already accepted.
    /// `accepted_on` never precedes `invited_on`.
    pub fn accept(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_accepted() {
            return false;
        }
        self.status = InvitationStatus::Accepted;
        self.accepted_on = Some(now.max(self.invited_on));
        true
    }
}
