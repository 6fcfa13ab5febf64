use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shared::MessageResponse;
use crate::application::LifecycleError;

/// Error reply of the HTTP adapter: a status and a `{"message": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Maps a use-case failure, keeping the context used for the generic 500 message.
    pub fn from_lifecycle(err: LifecycleError, context: &str) -> Self {
        match err {
            LifecycleError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            LifecycleError::EmailExists => Self::new(StatusCode::BAD_REQUEST, err.to_string()),
            LifecycleError::IdentifierConflict { .. } => {
                tracing::error!(error = %err, "{context}");
                Self::new(StatusCode::BAD_REQUEST, "Could not allocate a unique invitation, please retry")
            }
            LifecycleError::NotFound => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            LifecycleError::Store(e) => {
                tracing::error!(error = %e, "{context}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, context)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        Self::new(StatusCode::BAD_REQUEST, "Invalid request body")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(MessageResponse::new(self.message))).into_response()
    }
}
