use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use shared::{InvitationView, IssueInvitationRequest, IssueInvitationResponse};
use crate::application::admin::commands::issue_invitation::IssueInvitationCommand;
use crate::application::admin::queries::list_invitations;
use crate::infrastructure::driving::http::error::ApiError;
use crate::infrastructure::AppState;

pub async fn list_invitations(State(state): State<AppState>) -> Json<Vec<InvitationView>> {
    Json(list_invitations::execute(&*state.store).await)
}

pub async fn issue_invitation(
    State(state): State<AppState>,
    payload: Result<Json<IssueInvitationRequest>, JsonRejection>,
) -> Result<Json<IssueInvitationResponse>, ApiError> {
    let Json(req) = payload?;
    let cmd = IssueInvitationCommand {
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        role: req.role,
    };

    let result = state
        .issue_invitation
        .handle(cmd)
        .await
        .map_err(|e| ApiError::from_lifecycle(e, "Failed to send invitation"))?;

    Ok(Json(IssueInvitationResponse {
        message: "Invitation sent successfully".to_string(),
        customer_id: result.customer_id.to_string(),
        invitation_code: result.invitation_code.to_string(),
    }))
}
