use std::sync::Arc;
use chrono::Utc;
use tokio::task::JoinHandle;
use crate::application::error::LifecycleError;
use crate::application::notifications::NotificationDispatcher;
use crate::application::ports::{IdentifierGenerator, InvitationStore, StoreError, UniqueField};
use crate::domain::entities::NewInvitation;
use crate::domain::events::{DomainEvent, InvitationIssued};
use crate::domain::value_objects::{CustomerId, Email, InvitationCode, PersonName, Role};

/// Raw admin input, normalized and validated by the handler
#[derive(Debug, Clone)]
pub struct IssueInvitationCommand {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
}

pub struct IssueInvitationResult {
    pub customer_id: CustomerId,
    pub invitation_code: InvitationCode,
    /// Background notification task. Dropping it detaches the task.
    pub notification: JoinHandle<()>,
}

struct ValidatedInvitee {
    first_name: PersonName,
    last_name: PersonName,
    email: Email,
    role: Role,
}

fn validate(cmd: IssueInvitationCommand) -> Result<ValidatedInvitee, LifecycleError> {
    let fields = [&cmd.first_name, &cmd.last_name, &cmd.email, &cmd.role];
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(LifecycleError::Validation("All fields are required".to_string()));
    }
    Ok(ValidatedInvitee {
        first_name: PersonName::new(&cmd.first_name).map_err(LifecycleError::Validation)?,
        last_name: PersonName::new(&cmd.last_name).map_err(LifecycleError::Validation)?,
        email: Email::new(&cmd.email).map_err(LifecycleError::Validation)?,
        role: Role::new(&cmd.role).map_err(LifecycleError::Validation)?,
    })
}

/// Creates invitations: one row per call, then one best-effort notification.
pub struct IssueInvitationHandler {
    store: Arc<dyn InvitationStore>,
    identifiers: Arc<dyn IdentifierGenerator>,
    notifications: NotificationDispatcher,
    max_attempts: u32,
}

impl IssueInvitationHandler {
    pub fn new(
        store: Arc<dyn InvitationStore>,
        identifiers: Arc<dyn IdentifierGenerator>,
        notifications: NotificationDispatcher,
        max_attempts: u32,
    ) -> Self {
        Self {
            store,
            identifiers,
            notifications,
            max_attempts: max_attempts.max(1),
        }
    }

    pub async fn handle(&self, command: IssueInvitationCommand) -> Result<IssueInvitationResult, LifecycleError> {
        let invitee = validate(command)?;
        tracing::info!(
            email = %invitee.email,
            role = %invitee.role,
            "Issuing invitation to {} {}",
            invitee.first_name,
            invitee.last_name
        );

        for attempt in 1..=self.max_attempts {
            let candidate = NewInvitation {
                customer_id: self.identifiers.new_customer_id(),
                first_name: invitee.first_name.clone(),
                last_name: invitee.last_name.clone(),
                email: invitee.email.clone(),
                role: invitee.role.clone(),
                invitation_code: self.identifiers.new_invitation_code(),
                invited_on: Utc::now(),
            };

            match self.store.insert(&candidate).await {
                Ok(invitation) => {
                    tracing::info!(
                        email = %invitation.email,
                        customer_id = %invitation.customer_id,
                        "Invitation saved"
                    );
                    let result = IssueInvitationResult {
                        customer_id: invitation.customer_id.clone(),
                        invitation_code: invitation.invitation_code.clone(),
                        notification: self
                            .notifications
                            .dispatch(DomainEvent::new(InvitationIssued { invitation })),
                    };
                    return Ok(result);
                }
                Err(StoreError::Conflict(UniqueField::Email)) => {
                    return Err(LifecycleError::EmailExists);
                }
                Err(StoreError::Conflict(field)) => {
                    tracing::warn!(attempt, %field, "Generated identifier already taken, regenerating");
                }
                Err(e) => {
                    tracing::error!(email = %invitee.email, error = %e, "Invitation insert failed");
                    return Err(e.into());
                }
            }
        }

        Err(LifecycleError::IdentifierConflict {
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use crate::application::ports::identifier_generator::MockIdentifierGenerator;
    use crate::application::ports::invitation_store::MockInvitationStore;
    use crate::application::ports::notifier::{MockNotifier, NotifyError};
    use crate::application::ports::AcceptOutcome;
    use crate::domain::entities::InvitationStatus;
    use crate::infrastructure::driven::identifiers::RandomIdentifierGenerator;
    use crate::infrastructure::driven::persistence::InMemoryInvitationStore;

    fn command(first: &str, last: &str, email: &str, role: &str) -> IssueInvitationCommand {
        IssueInvitationCommand {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    fn silent_notifier() -> MockNotifier {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().returning(|_| Ok(()));
        notifier
    }

    fn handler_with(
        store: Arc<dyn InvitationStore>,
        identifiers: Arc<dyn IdentifierGenerator>,
        notifier: MockNotifier,
    ) -> IssueInvitationHandler {
        IssueInvitationHandler::new(
            store,
            identifiers,
            NotificationDispatcher::new(Arc::new(notifier), Duration::from_secs(1)),
            3,
        )
    }

    #[tokio::test]
    async fn normalizes_and_stores_as_sent() {
        let store = Arc::new(InMemoryInvitationStore::new());
        let handler = handler_with(store.clone(), Arc::new(RandomIdentifierGenerator), silent_notifier());

        let result = handler
            .handle(command("Alice", "Cooper", "Alice.Cooper@Ex.com", "Entrepreneur"))
            .await
            .unwrap();
        result.notification.await.unwrap();

        let rows = store.list_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.email.as_str(), "alice.cooper@ex.com");
        assert_eq!(row.role.as_str(), "entrepreneur");
        assert_eq!(row.status, InvitationStatus::Sent);
        assert_eq!(row.customer_id, result.customer_id);
        assert_eq!(row.invitation_code, result.invitation_code);
        assert!(row.accepted_on.is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_and_not_stored_twice() {
        let store = Arc::new(InMemoryInvitationStore::new());
        let handler = handler_with(store.clone(), Arc::new(RandomIdentifierGenerator), silent_notifier());

        handler.handle(command("Alice", "Cooper", "alice@example.com", "admin")).await.unwrap();
        let err = handler
            .handle(command("Alice", "Cooper", "ALICE@example.com ", "admin"))
            .await
            .err()
            .unwrap();

        assert!(matches!(err, LifecycleError::EmailExists));
        assert_eq!(err.to_string(), "Email already exists");
        assert_eq!(store.count_all().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn blank_field_fails_validation_without_side_effects() {
        let mut store = MockInvitationStore::new();
        store.expect_insert().never();
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();
        let handler = handler_with(Arc::new(store), Arc::new(RandomIdentifierGenerator), notifier);

        let err = handler
            .handle(command("Alice", "   ", "alice@example.com", "admin"))
            .await
            .err()
            .unwrap();

        match err {
            LifecycleError::Validation(msg) => assert_eq!(msg, "All fields are required"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn regenerates_identifiers_after_collision() {
        let store = Arc::new(InMemoryInvitationStore::new());
        let seed = handler_with(store.clone(), Arc::new(FixedIds::new(&["CUSTTAKEN"], &["INVTAKEN"])), silent_notifier());
        seed.handle(command("Bob", "Dylan", "bob@example.com", "member")).await.unwrap();

        let ids = FixedIds::new(&["CUSTTAKEN", "CUSTFRESH"], &["INVTAKEN", "INVFRESH"]);
        let handler = handler_with(store.clone(), Arc::new(ids), silent_notifier());
        let result = handler
            .handle(command("Alice", "Cooper", "alice@example.com", "admin"))
            .await
            .unwrap();

        assert_eq!(result.customer_id.as_str(), "CUSTFRESH");
        assert_eq!(result.invitation_code.as_str(), "INVFRESH");
        assert_eq!(store.count_all().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn gives_up_after_bounded_collisions() {
        let mut store = MockInvitationStore::new();
        store
            .expect_insert()
            .times(3)
            .returning(|_| Err(StoreError::Conflict(UniqueField::InvitationCode)));
        let mut ids = MockIdentifierGenerator::new();
        ids.expect_new_customer_id()
            .times(3)
            .returning(|| CustomerId::from_string("CUSTX".into()));
        ids.expect_new_invitation_code()
            .times(3)
            .returning(|| InvitationCode::from_string("INVX".into()));
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();

        let handler = handler_with(Arc::new(store), Arc::new(ids), notifier);
        let err = handler
            .handle(command("Alice", "Cooper", "alice@example.com", "admin"))
            .await
            .err()
            .unwrap();

        assert!(matches!(err, LifecycleError::IdentifierConflict { attempts: 3 }));
    }

    #[tokio::test]
    async fn notifier_failure_keeps_the_invitation() {
        let store = Arc::new(InMemoryInvitationStore::new());
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .times(1)
            .returning(|_| Err(NotifyError::Delivery("connection refused".into())));
        let handler = handler_with(store.clone(), Arc::new(RandomIdentifierGenerator), notifier);

        let result = handler
            .handle(command("Alice", "Cooper", "alice@example.com", "admin"))
            .await
            .unwrap();
        result.notification.await.unwrap();

        assert_eq!(store.count_all().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn store_outage_is_a_hard_failure() {
        let store = Arc::new(InMemoryInvitationStore::new());
        store.set_available(false);
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();
        let handler = handler_with(store.clone(), Arc::new(RandomIdentifierGenerator), notifier);

        let err = handler
            .handle(command("Alice", "Cooper", "alice@example.com", "admin"))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, LifecycleError::Store(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn issued_invitations_have_distinct_identifiers() {
        let store = Arc::new(InMemoryInvitationStore::new());
        let handler = Arc::new(handler_with(store.clone(), Arc::new(RandomIdentifierGenerator), silent_notifier()));

        let mut tasks = Vec::new();
        for i in 0..25 {
            let handler = handler.clone();
            tasks.push(tokio::spawn(async move {
                handler
                    .handle(command("User", "Number", &format!("user{i}@example.com"), "member"))
                    .await
                    .map(|r| (r.customer_id, r.invitation_code))
            }));
        }
        let mut customer_ids = std::collections::HashSet::new();
        let mut codes = std::collections::HashSet::new();
        for task in tasks {
            let (customer_id, code) = task.await.unwrap().unwrap();
            assert!(customer_ids.insert(customer_id));
            assert!(codes.insert(code));
        }
        assert_eq!(store.count_all().await.unwrap(), 25);
        assert!(matches!(
            store.accept_by_email(&Email::new("user3@example.com").unwrap()).await.unwrap(),
            AcceptOutcome::Updated(_)
        ));
    }

    /// Hands out a scripted sequence of identifiers.
    struct FixedIds {
        customer_ids: std::sync::Mutex<Vec<String>>,
        codes: std::sync::Mutex<Vec<String>>,
    }

    impl FixedIds {
        fn new(customer_ids: &[&str], codes: &[&str]) -> Self {
            Self {
                customer_ids: std::sync::Mutex::new(customer_ids.iter().rev().map(|s| s.to_string()).collect()),
                codes: std::sync::Mutex::new(codes.iter().rev().map(|s| s.to_string()).collect()),
            }
        }
    }

    impl IdentifierGenerator for FixedIds {
        fn new_customer_id(&self) -> CustomerId {
            CustomerId::from_string(self.customer_ids.lock().unwrap().pop().unwrap())
        }

        fn new_invitation_code(&self) -> InvitationCode {
            InvitationCode::from_string(self.codes.lock().unwrap().pop().unwrap())
        }
    }
}
