use async_trait::async_trait;
use crate::application::ports::{Notifier, NotifyError};
use crate::domain::entities::Invitation;

/// Stand-in used when no SMTP relay is configured: records the invitation and succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, invitation: &Invitation) -> Result<(), NotifyError> {
        tracing::warn!(
            email = %invitation.email,
            invitation_code = %invitation.invitation_code,
            "SMTP not configured, invitation email not sent"
        );
        Ok(())
    }
}
