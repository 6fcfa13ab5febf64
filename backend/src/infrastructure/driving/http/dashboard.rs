use axum::{extract::State, Json};
use shared::DashboardStats;
use crate::application::admin::queries::dashboard_stats;
use crate::infrastructure::AppState;

/// Always answers 200; degraded mode serves the fallback snapshot.
pub async fn dashboard_stats(State(state): State<AppState>) -> Json<DashboardStats> {
    Json(dashboard_stats::execute(&*state.store).await)
}
