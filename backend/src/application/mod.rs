// Application layer - use cases organized by persona
// Orchestrates domain logic, depends on domain layer only

pub mod admin;
pub mod invite;
pub mod ports;
pub mod error;
pub mod fallback;
pub mod notifications;

pub use error::LifecycleError;
