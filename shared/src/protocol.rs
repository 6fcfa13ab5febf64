use serde::{Deserialize, Serialize};

/// Counters shown on the admin dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_invitations_sent: u64,
    pub total_users_registered: u64,
    pub pending_invitations: u64,
    pub invitation_errors: u64,
}

/// One row of the invitation list. Timestamps are ISO-8601 UTC strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationView {
    pub customer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub status: String,
    pub invitation_code: String,
    pub invited_on: String,
    pub accepted_on: Option<String>,
}

/// Body of an admin "send invitation" request.
///
/// Missing fields deserialize as empty strings so the service can answer
/// with its own validation message instead of a decoding error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueInvitationRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueInvitationResponse {
    pub message: String,
    pub customer_id: String,
    pub invitation_code: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptInvitationRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub invitation_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptInvitationResponse {
    pub message: String,
    pub email: String,
    pub accepted_on: String,
}

/// Plain `{"message": ...}` body used for errors and informational replies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
