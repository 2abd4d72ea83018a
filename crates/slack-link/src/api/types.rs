//! API request and response types.

use serde::{Deserialize, Serialize};

/// Form fields Slack posts for a slash command.
///
/// Slack sends more fields (team, channel, response_url, ...); only the ones
/// this service acts on are kept.
#[derive(Debug, Deserialize)]
pub struct SlashCommandForm {
    pub command: String,
    #[serde(default)]
    pub text: String,
    pub user_id: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}
