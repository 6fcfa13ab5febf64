use crate::domain::value_objects::{CustomerId, InvitationCode};

/// Source of fresh identifiers. Never consults the store; collisions surface at insert.
#[cfg_attr(test, mockall::automock)]
pub trait IdentifierGenerator: Send + Sync {
    fn new_customer_id(&self) -> CustomerId;
    fn new_invitation_code(&self) -> InvitationCode;
}
