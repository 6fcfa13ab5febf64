//! Degraded-mode snapshot served by the read endpoints when the store is unreachable.
//!
//! The values are fixed at build time and change only with a new deployment.

use shared::{DashboardStats, InvitationView};

pub const FALLBACK_SNAPSHOT_VERSION: &str = "2025-10-11";

pub const FALLBACK_STATS: DashboardStats = DashboardStats {
    total_invitations_sent: 6,
    total_users_registered: 3,
    pending_invitations: 3,
    invitation_errors: 0,
};

pub fn dashboard_stats() -> DashboardStats {
    FALLBACK_STATS
}

pub fn invitations() -> Vec<InvitationView> {
    vec![
        InvitationView {
            customer_id: "CUST005".to_string(),
            first_name: "Sample".to_string(),
            last_name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
            role: "admin".to_string(),
            status: "accepted".to_string(),
            invitation_code: "INV2440".to_string(),
            invited_on: "2025-10-11T00:00:00Z".to_string(),
            accepted_on: Some("2025-10-11T12:00:00Z".to_string()),
        },
        InvitationView {
            customer_id: "CUST006".to_string(),
            first_name: "Sample".to_string(),
            last_name: "Member".to_string(),
            email: "member@example.com".to_string(),
            role: "admin".to_string(),
            status: "sent".to_string(),
            invitation_code: "INV8910".to_string(),
            invited_on: "2025-10-11T00:00:00Z".to_string(),
            accepted_on: None,
        },
    ]
}
