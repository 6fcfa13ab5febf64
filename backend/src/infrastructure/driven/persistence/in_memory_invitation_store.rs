use std::sync::atomic::{AtomicBool, Ordering};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use crate::application::ports::{AcceptOutcome, InvitationStore, StatusCounts, StoreError, UniqueField};
use crate::domain::entities::{Invitation, InvitationStatus, NewInvitation};
use crate::domain::value_objects::Email;

#[derive(Default)]
struct Table {
    rows: Vec<Invitation>,
    next_id: i64,
}

/// In-memory `InvitationStore` for local runs and tests.
///
/// A single write lock serializes inserts and accepts, which gives the same
/// uniqueness and compare-and-set guarantees as the Postgres store.
pub struct InMemoryInvitationStore {
    table: RwLock<Table>,
    available: AtomicBool,
}

impl Default for InMemoryInvitationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryInvitationStore {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: Vec::new(),
                next_id: 1,
            }),
            available: AtomicBool::new(true),
        }
    }

    /// Simulates losing (or regaining) the connection to the store.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("in-memory store is offline".to_string()))
        }
    }

    /// Overwrites a row's status the way a manual data fix would.
    #[cfg(test)]
    pub(crate) async fn force_status(&self, email: &str, status: InvitationStatus) {
        let mut table = self.table.write().await;
        if let Some(row) = table.rows.iter_mut().find(|r| r.email.as_str() == email) {
            row.status = status;
            row.accepted_on = (status == InvitationStatus::Accepted).then(Utc::now);
        }
    }
}

#[async_trait]
impl InvitationStore for InMemoryInvitationStore {
    async fn insert(&self, invitation: &NewInvitation) -> Result<Invitation, StoreError> {
        self.ensure_available()?;
        let mut table = self.table.write().await;

        for row in &table.rows {
            if row.email == invitation.email {
                return Err(StoreError::Conflict(UniqueField::Email));
            }
            if row.customer_id == invitation.customer_id {
                return Err(StoreError::Conflict(UniqueField::CustomerId));
            }
            if row.invitation_code == invitation.invitation_code {
                return Err(StoreError::Conflict(UniqueField::InvitationCode));
            }
        }

        let id = table.next_id;
        table.next_id += 1;
        let stored = invitation.clone().into_invitation(id);
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn count_all(&self) -> Result<u64, StoreError> {
        self.ensure_available()?;
        Ok(self.table.read().await.rows.len() as u64)
    }

    async fn count_by_status(&self, status: InvitationStatus) -> Result<u64, StoreError> {
        self.ensure_available()?;
        let table = self.table.read().await;
        Ok(table.rows.iter().filter(|r| r.status == status).count() as u64)
    }

    async fn count_all_by_status(&self) -> Result<StatusCounts, StoreError> {
        self.ensure_available()?;
        let table = self.table.read().await;
        let mut counts = StatusCounts::default();
        for row in &table.rows {
            counts.add(row.status, 1);
        }
        Ok(counts)
    }

    async fn list_all(&self) -> Result<Vec<Invitation>, StoreError> {
        self.ensure_available()?;
        let mut rows = self.table.read().await.rows.clone();
        rows.sort_by(|a, b| b.invited_on.cmp(&a.invited_on).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn accept_by_email(&self, email: &Email) -> Result<AcceptOutcome, StoreError> {
        self.ensure_available()?;
        let mut table = self.table.write().await;
        let Some(row) = table.rows.iter_mut().find(|r| &r.email == email) else {
            return Ok(AcceptOutcome::NotFound);
        };
        if row.accept(Utc::now()) {
            Ok(AcceptOutcome::Updated(row.clone()))
        } else {
            Ok(AcceptOutcome::NotFound)
        }
    }
}
