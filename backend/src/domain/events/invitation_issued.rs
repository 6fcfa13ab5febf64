use crate::domain::entities::Invitation;

/// Raised once an invitation row has been committed.
#[derive(Debug, Clone)]
pub struct InvitationIssued {
    pub invitation: Invitation,
}
