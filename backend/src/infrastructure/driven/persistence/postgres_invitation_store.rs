use std::future::Future;
use std::time::Duration;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;
use crate::application::ports::{AcceptOutcome, InvitationStore, StatusCounts, StoreError, UniqueField};
use crate::domain::entities::{Invitation, InvitationStatus, NewInvitation};
use crate::domain::value_objects::Email;
use crate::infrastructure::driven::persistence::db_types::{DbInvitation, INVITATION_COLUMNS};

const UNIQUE_VIOLATION: &str = "23505";

pub struct PostgresInvitationStore {
    pool: PgPool,
    timeout: Duration,
    /// Set once the embedded migrations have run against this pool.
    schema: OnceCell<()>,
}

impl PostgresInvitationStore {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self {
            pool,
            timeout,
            schema: OnceCell::new(),
        }
    }

    /// Treats the schema as managed elsewhere: no call ever runs migrations.
    pub fn without_migrations(self) -> Self {
        Self {
            schema: OnceCell::new_with(Some(())),
            ..self
        }
    }

    /// Lazily connecting pool: the service starts even if the database is down,
    /// so the read endpoints can answer in degraded mode.
    pub fn connect_lazy(url: &str, max_connections: u32, timeout: Duration) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(timeout)
            .connect_lazy(url)
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool, timeout))
    }

    /// Applies the embedded migrations unless a previous call already succeeded.
    ///
    /// Every store call goes through here first, so a database that was down
    /// at startup gets its schema on the first call after it comes back.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        self.schema
            .get_or_try_init(|| async {
                match tokio::time::timeout(self.timeout, sqlx::migrate!("./migrations").run(&self.pool)).await {
                    Ok(Ok(())) => {
                        tracing::info!("Database migrations applied");
                        Ok(())
                    }
                    Ok(Err(e)) => Err(StoreError::Unavailable(format!("migration failed: {e}"))),
                    Err(_) => Err(StoreError::Timeout(self.timeout)),
                }
            })
            .await
            .map(|_| ())
    }

    /// Runs one store call under the configured timeout.
    async fn bounded<T, F>(&self, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>> + Send,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map_err(map_sqlx_error),
            Err(_) => Err(StoreError::Timeout(self.timeout)),
        }
    }
}

fn conflicting_field(constraint: &str) -> Option<UniqueField> {
    match constraint {
        "invitations_email_key" => Some(UniqueField::Email),
        "invitations_customer_id_key" => Some(UniqueField::CustomerId),
        "invitations_invitation_code_key" => Some(UniqueField::InvitationCode),
        _ => None,
    }
}

fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &e {
        if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
            if let Some(field) = db.constraint().and_then(conflicting_field) {
                return StoreError::Conflict(field);
            }
        }
    }
    match e {
        sqlx::Error::PoolTimedOut => StoreError::Unavailable("connection pool timed out".to_string()),
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::ColumnNotFound(_) => {
            StoreError::Corrupt(e.to_string())
        }
        other => StoreError::Unavailable(other.to_string()),
    }
}

fn count(n: i64) -> u64 {
    u64::try_from(n).unwrap_or_default()
}

#[async_trait]
impl InvitationStore for PostgresInvitationStore {
    async fn insert(&self, invitation: &NewInvitation) -> Result<Invitation, StoreError> {
        self.migrate().await?;
        let sql = format!(
            "INSERT INTO invitations (customer_id, first_name, last_name, email, role, status, invitation_code, invited_on) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {INVITATION_COLUMNS}"
        );
        let row: DbInvitation = self
            .bounded(
                sqlx::query_as::<_, DbInvitation>(&sql)
                    .bind(invitation.customer_id.as_str())
                    .bind(invitation.first_name.as_str())
                    .bind(invitation.last_name.as_str())
                    .bind(invitation.email.as_str())
                    .bind(invitation.role.as_str())
                    .bind(InvitationStatus::Sent.as_db_str())
                    .bind(invitation.invitation_code.as_str())
                    .bind(invitation.invited_on)
                    .fetch_one(&self.pool),
            )
            .await?;
        row.try_into()
    }

    async fn count_all(&self) -> Result<u64, StoreError> {
        self.migrate().await?;
        let n: i64 = self
            .bounded(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM invitations").fetch_one(&self.pool))
            .await?;
        Ok(count(n))
    }

    async fn count_by_status(&self, status: InvitationStatus) -> Result<u64, StoreError> {
        self.migrate().await?;
        let n: i64 = self
            .bounded(
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM invitations WHERE status = $1")
                    .bind(status.as_db_str())
                    .fetch_one(&self.pool),
            )
            .await?;
        Ok(count(n))
    }

    async fn count_all_by_status(&self) -> Result<StatusCounts, StoreError> {
        self.migrate().await?;
        let rows: Vec<(String, i64)> = self
            .bounded(
                sqlx::query_as::<_, (String, i64)>("SELECT status, COUNT(*) FROM invitations GROUP BY status")
                    .fetch_all(&self.pool),
            )
            .await?;

        let mut counts = StatusCounts::default();
        for (status, n) in rows {
            let status = status
                .parse::<InvitationStatus>()
                .map_err(StoreError::Corrupt)?;
            counts.add(status, count(n));
        }
        Ok(counts)
    }

    async fn list_all(&self) -> Result<Vec<Invitation>, StoreError> {
        self.migrate().await?;
        let sql = format!("SELECT {INVITATION_COLUMNS} FROM invitations ORDER BY invited_on DESC, id DESC");
        let rows: Vec<DbInvitation> = self
            .bounded(sqlx::query_as::<_, DbInvitation>(&sql).fetch_all(&self.pool))
            .await?;
        rows.into_iter().map(Invitation::try_from).collect()
    }

    async fn accept_by_email(&self, email: &Email) -> Result<AcceptOutcome, StoreError> {
        self.migrate().await?;
        // Single statement: the row lock taken by UPDATE makes the status check a compare-and-set.
        let sql = format!(
            "UPDATE invitations \
             SET status = 'accepted', accepted_on = GREATEST(NOW(), invited_on), updated_at = NOW() \
             WHERE email = $1 AND status <> 'accepted' \
             RETURNING {INVITATION_COLUMNS}"
        );
        let row: Option<DbInvitation> = self
            .bounded(sqlx::query_as::<_, DbInvitation>(&sql).bind(email.as_str()).fetch_optional(&self.pool))
            .await?;
        match row {
            Some(row) => Ok(AcceptOutcome::Updated(row.try_into()?)),
            None => Ok(AcceptOutcome::NotFound),
        }
    }
}
