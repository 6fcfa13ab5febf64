use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use shared::{AcceptInvitationRequest, AcceptInvitationResponse};
use crate::application::admin::queries::list_invitations::format_timestamp;
use crate::application::invite::accept_invitation::{self, AcceptInvitationCommand};
use crate::infrastructure::driving::http::error::ApiError;
use crate::infrastructure::AppState;

pub async fn accept_invitation(
    State(state): State<AppState>,
    payload: Result<Json<AcceptInvitationRequest>, JsonRejection>,
) -> Result<Json<AcceptInvitationResponse>, ApiError> {
    let Json(req) = payload?;
    let cmd = AcceptInvitationCommand {
        email: req.email,
        invitation_code: req.invitation_code,
    };

    let invitation = accept_invitation::execute(&*state.store, cmd)
        .await
        .map_err(|e| ApiError::from_lifecycle(e, "Failed to accept invitation"))?;

    Ok(Json(AcceptInvitationResponse {
        message: "Invitation accepted successfully".to_string(),
        email: invitation.email.to_string(),
        accepted_on: invitation
            .accepted_on
            .as_ref()
            .map(format_timestamp)
            .unwrap_or_default(),
    }))
}
