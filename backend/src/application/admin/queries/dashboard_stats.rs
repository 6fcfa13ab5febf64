use shared::DashboardStats;
use crate::application::fallback;
use crate::application::ports::{InvitationStore, StoreError};

/// Counters over the current invitation set, from a single store read.
pub async fn compute(store: &dyn InvitationStore) -> Result<DashboardStats, StoreError> {
    let counts = store.count_all_by_status().await?;

    Ok(DashboardStats {
        total_invitations_sent: counts.total(),
        total_users_registered: counts.accepted,
        pending_invitations: counts.sent + counts.pending,
        invitation_errors: counts.error,
    })
}

/// Like [`compute`], but serves the fallback snapshot when the store fails.
pub async fn execute(store: &dyn InvitationStore) -> DashboardStats {
    match compute(store).await {
        Ok(stats) => {
            tracing::info!(?stats, "Dashboard stats computed");
            stats
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                snapshot = fallback::FALLBACK_SNAPSHOT_VERSION,
                "Dashboard stats unavailable, serving fallback"
            );
            fallback::dashboard_stats()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::invitation_store::MockInvitationStore;
    use crate::application::ports::StatusCounts;
    use crate::domain::entities::InvitationStatus;
    use crate::domain::entities::invitation::fixtures;
    use crate::infrastructure::driven::persistence::InMemoryInvitationStore;

    async fn seed(store: &InMemoryInvitationStore, status: InvitationStatus, n: usize, tag: &str) {
        for i in 0..n {
            let new = fixtures::new_invitation(
                &format!("{tag}{i}@example.com"),
                &format!("CUST{tag}{i}"),
                &format!("INV{tag}{i}"),
            );
            store.insert(&new).await.unwrap();
            store.force_status(new.email.as_str(), status).await;
        }
    }

    #[tokio::test]
    async fn counts_mixed_statuses() {
        let store = InMemoryInvitationStore::new();
        seed(&store, InvitationStatus::Sent, 3, "s").await;
        seed(&store, InvitationStatus::Pending, 1, "p").await;
        seed(&store, InvitationStatus::Accepted, 2, "a").await;

        let stats = execute(&store).await;
        assert_eq!(
            stats,
            DashboardStats {
                total_invitations_sent: 6,
                total_users_registered: 2,
                pending_invitations: 4,
                invitation_errors: 0,
            }
        );
    }

    #[tokio::test]
    async fn totals_add_up_including_error_rows() {
        let store = InMemoryInvitationStore::new();
        seed(&store, InvitationStatus::Sent, 2, "s").await;
        seed(&store, InvitationStatus::Accepted, 1, "a").await;
        seed(&store, InvitationStatus::Error, 2, "e").await;

        let s = compute(&store).await.unwrap();
        assert_eq!(s.invitation_errors, 2);
        assert_eq!(
            s.total_invitations_sent,
            s.pending_invitations + s.total_users_registered + s.invitation_errors
        );
    }

    #[tokio::test]
    async fn empty_store_reports_zeroes() {
        let store = InMemoryInvitationStore::new();
        let s = execute(&store).await;
        assert_eq!(s.total_invitations_sent, 0);
        assert_eq!(s.pending_invitations, 0);
    }

    #[tokio::test]
    async fn falls_back_when_store_is_down() {
        let mut store = MockInvitationStore::new();
        store
            .expect_count_all_by_status()
            .returning(|| Err(StoreError::Timeout(std::time::Duration::from_secs(5))));

        assert_eq!(execute(&store).await, fallback::FALLBACK_STATS);
        assert!(compute(&store).await.is_err());
    }

    #[tokio::test]
    async fn reads_all_counters_from_one_snapshot() {
        let mut store = MockInvitationStore::new();
        store.expect_count_all().never();
        store.expect_count_by_status().never();
        store.expect_count_all_by_status().times(1).returning(|| {
            Ok(StatusCounts {
                sent: 2,
                pending: 1,
                accepted: 4,
                error: 1,
            })
        });

        let stats = compute(&store).await.unwrap();
        assert_eq!(
            stats,
            DashboardStats {
                total_invitations_sent: 8,
                total_users_registered: 4,
                pending_invitations: 3,
                invitation_errors: 1,
            }
        );
    }
}
