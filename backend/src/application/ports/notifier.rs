use async_trait::async_trait;
use crate::domain::entities::Invitation;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("invalid address: {0}")]
    Address(String),
    #[error("failed to build message: {0}")]
    Message(String),
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Outbound delivery of an invitation to its recipient
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, invitation: &Invitation) -> Result<(), NotifyError>;
}
