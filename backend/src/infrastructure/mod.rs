// Infrastructure layer - adapters for the store, the mail relay and HTTP.
// Implements the ports defined in the application layer.

use std::sync::Arc;
use crate::application::admin::commands::issue_invitation::IssueInvitationHandler;
use crate::application::notifications::NotificationDispatcher;
use crate::application::ports::{InvitationStore, Notifier};
use crate::config::{AppConfig, StoreBackend};

pub mod driven;    // Output adapters (store, notifier, identifiers)
pub mod driving;   // Input adapters (HTTP)

use driven::{InMemoryInvitationStore, LogNotifier, PostgresInvitationStore, RandomIdentifierGenerator, SmtpNotifier};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn InvitationStore>,
    pub issue_invitation: Arc<IssueInvitationHandler>,
    /// Shared with the issue handler; drained on shutdown.
    pub notifications: NotificationDispatcher,
}

impl AppState {
    pub fn new(store: Arc<dyn InvitationStore>, notifier: Arc<dyn Notifier>, config: &AppConfig) -> Self {
        let notifications = NotificationDispatcher::new(notifier, config.notifier.timeout());
        let issue_invitation = IssueInvitationHandler::new(
            store.clone(),
            Arc::new(RandomIdentifierGenerator),
            notifications.clone(),
            config.identifiers.max_attempts,
        );
        Self {
            store,
            issue_invitation: Arc::new(issue_invitation),
            notifications,
        }
    }

    /// Wires the adapters selected by `config`.
    ///
    /// A database that cannot be reached or migrated does not stop startup:
    /// the read endpoints keep answering from the fallback snapshot and the
    /// store migrates on its first successful call.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn InvitationStore> = match config.store.backend {
            StoreBackend::Memory => {
                tracing::warn!("Using the in-memory invitation store, data is lost on restart");
                Arc::new(InMemoryInvitationStore::new())
            }
            StoreBackend::Postgres => {
                let url = config.store.url.as_deref().unwrap_or_default();
                let store = PostgresInvitationStore::connect_lazy(
                    url,
                    config.store.max_connections,
                    config.store.timeout(),
                )?;
                let store = if config.store.run_migrations {
                    if let Err(e) = store.migrate().await {
                        tracing::warn!(error = %e, "Database migrations not applied yet, retrying on the next store call");
                    }
                    store
                } else {
                    store.without_migrations()
                };
                Arc::new(store)
            }
        };

        let notifier: Arc<dyn Notifier> = match config.notifier.smtp_settings() {
            Some(settings) => {
                tracing::info!(host = %settings.host, port = settings.port, "Sending invitation emails over SMTP");
                Arc::new(SmtpNotifier::new(settings)?)
            }
            None => {
                tracing::info!("No SMTP host configured, invitation emails are logged only");
                Arc::new(LogNotifier)
            }
        };

        Ok(Self::new(store, notifier, config))
    }
}
