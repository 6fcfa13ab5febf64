// Application ports - Driven ports (output ports implemented by infrastructure)

pub mod invitation_store;
pub mod notifier;
pub mod identifier_generator;

pub use invitation_store::{AcceptOutcome, InvitationStore, StatusCounts, StoreError, UniqueField};
pub use notifier::{Notifier, NotifyError};
pub use identifier_generator::IdentifierGenerator;
