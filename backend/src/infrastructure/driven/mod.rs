pub mod identifiers;
pub mod notifier;
pub mod persistence;

pub use identifiers::RandomIdentifierGenerator;
pub use notifier::{LogNotifier, SmtpNotifier, SmtpSettings};
pub use persistence::{InMemoryInvitationStore, PostgresInvitationStore};
