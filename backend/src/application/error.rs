use crate::application::ports::StoreError;

/// Failures of the invitation use cases
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("{0}")]
    Validation(String),
    #[error("Email already exists")]
    EmailExists,
    #[error("could not allocate unique invitation identifiers after {attempts} attempts")]
    IdentifierConflict { attempts: u32 },
    #[error("Invitation not found or already accepted")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}
