use crate::application::error::LifecycleError;
use crate::application::ports::{AcceptOutcome, InvitationStore};
use crate::domain::entities::Invitation;
use crate::domain::value_objects::Email;

pub struct AcceptInvitationCommand {
    pub email: Option<String>,
    /// Correlation value only; acceptance is keyed by email.
    pub invitation_code: Option<String>,
}

/// Moves the invitation for `email` to `accepted`.
///
/// Unknown emails and already-accepted invitations both yield
/// `LifecycleError::NotFound`, so a repeated accept is reported as not found
/// rather than as a second success.
pub async fn execute(
    store: &dyn InvitationStore,
    cmd: AcceptInvitationCommand,
) -> Result<Invitation, LifecycleError> {
    let raw = cmd.email.unwrap_or_default();
    if raw.trim().is_empty() {
        return Err(LifecycleError::Validation("Email is required".to_string()));
    }
    let email = Email::new(raw).map_err(LifecycleError::Validation)?;
    tracing::info!(email = %email, invitation_code = ?cmd.invitation_code, "Accepting invitation");

    match store.accept_by_email(&email).await? {
        AcceptOutcome::Updated(invitation) => {
            tracing::info!(email = %email, customer_id = %invitation.customer_id, "Invitation accepted");
            Ok(invitation)
        }
        AcceptOutcome::NotFound => Err(LifecycleError::NotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::application::ports::StoreError;
    use crate::domain::entities::invitation::fixtures;
    use crate::domain::entities::InvitationStatus;
    use crate::infrastructure::driven::persistence::InMemoryInvitationStore;

    fn accept(email: &str) -> AcceptInvitationCommand {
        AcceptInvitationCommand {
            email: Some(email.to_string()),
            invitation_code: None,
        }
    }

    async fn seeded() -> InMemoryInvitationStore {
        let store = InMemoryInvitationStore::new();
        store
            .insert(&fixtures::new_invitation("alice@example.com", "CUST1", "INV1"))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn second_accept_is_not_found() {
        let store = seeded().await;

        let accepted = execute(&store, accept("alice@example.com")).await.unwrap();
        assert_eq!(accepted.status, InvitationStatus::Accepted);
        assert!(accepted.accepted_on.is_some());
        assert!(accepted.invited_on <= accepted.accepted_on.unwrap());

        let err = execute(&store, accept("alice@example.com")).await.unwrap_err();
        assert!(matches!(err, LifecycleError::NotFound));
        assert_eq!(err.to_string(), "Invitation not found or already accepted");

        let rows = store.list_all().await.unwrap();
        assert_eq!(rows[0].accepted_on, accepted.accepted_on);
    }

    #[tokio::test]
    async fn unknown_email_is_not_found() {
        let store = seeded().await;
        let err = execute(&store, accept("nobody@example.com")).await.unwrap_err();
        assert!(matches!(err, LifecycleError::NotFound));
    }

    #[tokio::test]
    async fn email_is_normalized_before_lookup() {
        let store = seeded().await;
        assert!(execute(&store, accept("  ALICE@Example.com")).await.is_ok());
    }

    #[tokio::test]
    async fn missing_email_is_a_validation_error() {
        let store = seeded().await;
        for cmd in [
            AcceptInvitationCommand { email: None, invitation_code: Some("INV1".into()) },
            accept("   "),
        ] {
            match execute(&store, cmd).await.unwrap_err() {
                LifecycleError::Validation(msg) => assert_eq!(msg, "Email is required"),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn pending_rows_also_transition() {
        let store = seeded().await;
        store.force_status("alice@example.com", InvitationStatus::Pending).await;
        let accepted = execute(&store, accept("alice@example.com")).await.unwrap();
        assert_eq!(accepted.status, InvitationStatus::Accepted);
    }

    #[tokio::test]
    async fn concurrent_accepts_have_exactly_one_winner() {
        let store = Arc::new(seeded().await);
        let mut tasks = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                execute(store.as_ref(), accept("alice@example.com")).await
            }));
        }

        let mut wins = 0;
        let mut not_found = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => wins += 1,
                Err(LifecycleError::NotFound) => not_found += 1,
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }
        assert_eq!(wins, 1);
        assert_eq!(not_found, 15);
    }

    #[tokio::test]
    async fn store_outage_is_a_hard_failure() {
        let store = seeded().await;
        store.set_available(false);
        let err = execute(&store, accept("alice@example.com")).await.unwrap_err();
        assert!(matches!(err, LifecycleError::Store(StoreError::Unavailable(_))));
    }
}
