use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;
use crate::application::ports::Notifier;
use crate::domain::events::{DomainEvent, InvitationIssued};

/// Fire-and-forget delivery of invitation emails.
///
/// Every notification runs on its own task under a timeout. Its outcome is
/// only logged: the invitation row is already committed when this is called.
/// Clones share the same set of in-flight tasks.
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifier: Arc<dyn Notifier>,
    timeout: Duration,
    tasks: TaskTracker,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>, timeout: Duration) -> Self {
        Self {
            notifier,
            timeout,
            tasks: TaskTracker::new(),
        }
    }

    /// Waits for in-flight notifications, at most one notifier timeout.
    ///
    /// Returns `false` if some were still running when the bound elapsed.
    pub async fn drain(&self) -> bool {
        self.tasks.close();
        let pending = self.tasks.len();
        if pending > 0 {
            tracing::info!(pending, "Waiting for invitation notifications to finish");
        }
        tokio::time::timeout(self.timeout, self.tasks.wait()).await.is_ok()
    }

    pub fn dispatch(&self, event: DomainEvent<InvitationIssued>) -> JoinHandle<()> {
        let notifier = self.notifier.clone();
        let timeout = self.timeout;

        self.tasks.spawn(async move {
            let invitation = &event.data.invitation;
            match tokio::time::timeout(timeout, notifier.notify(invitation)).await {
                Ok(Ok(())) => tracing::info!(
                    event_id = %event.event_id,
                    email = %invitation.email,
                    "Invitation notification delivered"
                ),
                Ok(Err(e)) => tracing::warn!(
                    event_id = %event.event_id,
                    email = %invitation.email,
                    error = %e,
                    "Invitation notification failed"
                ),
                Err(_) => tracing::warn!(
                    event_id = %event.event_id,
                    email = %invitation.email,
                    timeout_ms = timeout.as_millis() as u64,
                    "Invitation notification timed out"
                ),
            }
        })
    }
}
