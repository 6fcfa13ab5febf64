pub mod dashboard_stats;
pub mod list_invitations;
