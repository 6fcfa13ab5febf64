pub mod accept;
pub mod cors;
pub mod dashboard;
pub mod error;
pub mod invitations;

use axum::http::header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN};
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use tower_http::trace::TraceLayer;
use crate::infrastructure::AppState;

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/dashboard-stats", get(dashboard::dashboard_stats))
        .route(
            "/api/invitations",
            get(invitations::list_invitations).post(invitations::issue_invitation),
        )
        .route("/api/email", post(invitations::issue_invitation))
        .route("/api/send-invitation", post(invitations::issue_invitation))
        .route("/api/invitations/accept", post(accept::accept_invitation))
        .route("/api/accept-invitation", post(accept::accept_invitation))
        .route("/api/invitation/accept", post(accept::accept_invitation))
        .fallback(cors::endpoint_not_found)
        .layer(cors::cors_layer())
        .layer(middleware::from_fn(cors::answer_preflight))
        .layer(cors::default_header(ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .layer(cors::default_header(ACCESS_CONTROL_ALLOW_METHODS, cors::ALLOWED_METHODS))
        .layer(cors::default_header(ACCESS_CONTROL_ALLOW_HEADERS, cors::ALLOWED_HEADERS))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
