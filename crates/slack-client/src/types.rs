//! Slack Web API types.

use serde::Deserialize;

/// Envelope returned by `users.info`.
///
/// Slack reports most failures with a 200 status and `ok: false`, so the
/// `ok` flag has to be checked before `user` is trusted.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfoResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub user: Option<SlackUser>,
}

/// The subset of a Slack user object this workspace cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct SlackUser {
    pub id: String,
    pub is_admin: bool,
}
