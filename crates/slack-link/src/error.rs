//! Error types for the slash command service.

use crate::signature::VerificationError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors that end a request before a command runs.
///
/// Command-level failures never show up here: they are turned into reply
/// text and answered with 200.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Request verification failed: {0}")]
    Verification(#[from] VerificationError),

    #[error("Failed to read request body: {0}")]
    Body(String),

    #[error("Malformed command payload: {0}")]
    MalformedPayload(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Verification(_) => {
                (StatusCode::UNAUTHORIZED, "Request verification failed")
            }
            AppError::Body(_) => (StatusCode::BAD_REQUEST, "Unreadable request body"),
            AppError::MalformedPayload(_) => (StatusCode::BAD_REQUEST, "Malformed command payload"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error"),
        };

        (status, message).into_response()
    }
}

impl From<axum::Error> for AppError {
    fn from(e: axum::Error) -> Self {
        AppError::Body(e.to_string())
    }
}

impl From<membership_client::MembershipError> for AppError {
    fn from(e: membership_client::MembershipError) -> Self {
        AppError::Internal(format!("Membership client error: {}", e))
    }
}

impl From<slack_client::SlackError> for AppError {
    fn from(e: slack_client::SlackError) -> Self {
        AppError::Internal(format!("Slack client error: {}", e))
    }
}
