mod db_types;
pub mod in_memory_invitation_store;
pub mod postgres_invitation_store;

pub use in_memory_invitation_store::InMemoryInvitationStore;
pub use postgres_invitation_store::PostgresInvitationStore;
