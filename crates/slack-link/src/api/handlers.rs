//! HTTP request handlers.

use super::types::{HealthResponse, SlashCommandForm};
use super::AppState;
use crate::error::AppError;
use axum::{
    extract::{rejection::FormRejection, State},
    Form, Json,
};
use tracing::info;

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Slash command endpoint. Runs behind signature verification.
pub async fn slash_command(
    State(state): State<AppState>,
    payload: Result<Form<SlashCommandForm>, FormRejection>,
) -> Result<String, AppError> {
    let Form(form) = payload.map_err(|e| AppError::MalformedPayload(e.body_text()))?;
    info!(command = %form.command, user_id = %form.user_id, "Slash command received");

    Ok(state
        .router
        .handle(&form.command, &form.text, &form.user_id)
        .await)
}
