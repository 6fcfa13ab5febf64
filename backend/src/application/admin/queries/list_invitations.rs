use chrono::{DateTime, SecondsFormat, Utc};
use shared::InvitationView;
use crate::application::fallback;
use crate::application::ports::InvitationStore;
use crate::domain::entities::Invitation;

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn to_view(invitation: &Invitation) -> InvitationView {
    InvitationView {
        customer_id: invitation.customer_id.to_string(),
        first_name: invitation.first_name.to_string(),
        last_name: invitation.last_name.to_string(),
        email: invitation.email.to_string(),
        role: invitation.role.to_string(),
        status: invitation.status.to_string(),
        invitation_code: invitation.invitation_code.to_string(),
        invited_on: format_timestamp(&invitation.invited_on),
        accepted_on: invitation.accepted_on.as_ref().map(format_timestamp),
    }
}

/// All invitations, newest first. Serves the fallback sample when the store fails.
pub async fn execute(store: &dyn InvitationStore) -> Vec<InvitationView> {
    match store.list_all().await {
        Ok(invitations) => {
            tracing::info!(count = invitations.len(), "Returning invitations");
            invitations.iter().map(to_view).collect()
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                snapshot = fallback::FALLBACK_SNAPSHOT_VERSION,
                "Invitation list unavailable, serving fallback"
            );
            fallback::invitations()
        }
    }
}
