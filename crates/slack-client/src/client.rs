//! Slack HTTP client.

use crate::error::SlackError;
use crate::types::*;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Slack Web API client.
///
/// The bot access token is kept in a `SecretString` so it never shows up in
/// debug output or logs.
#[derive(Clone)]
pub struct SlackClient {
    client: Client,
    base_url: String,
    access_token: SecretString,
}

impl SlackClient {
    /// Create a new Slack client.
    pub fn new(
        base_url: impl Into<String>,
        access_token: SecretString,
        timeout: Duration,
    ) -> Result<Self, SlackError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token,
        })
    }

    /// Look up a user with `users.info`.
    #[instrument(skip(self))]
    pub async fn user_info(&self, user_id: &str) -> Result<SlackUser, SlackError> {
        let response = self
            .client
            .get(format!("{}/users.info", self.base_url))
            .query(&[("user", user_id)])
            .bearer_auth(self.access_token.expose_secret())
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let message = response.text().await.unwrap_or_default();
            warn!(%status, "users.info request failed");
            return Err(SlackError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let info: UserInfoResponse = serde_json::from_str(&body)?;

        if !info.ok {
            return Err(SlackError::NotOk(
                info.error.unwrap_or_else(|| "unknown_error".into()),
            ));
        }

        let user = info.user.ok_or(SlackError::MissingUser)?;
        debug!(user_id = %user.id, is_admin = user.is_admin, "Resolved Slack user");
        Ok(user)
    }
}
