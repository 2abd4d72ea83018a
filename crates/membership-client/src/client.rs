//! Membership endpoint HTTP client.

use crate::error::MembershipError;
use crate::types::{encode_component, LookupTarget, MemberId, UserReference};
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Form body for creating a link.
#[derive(Serialize)]
struct LinkForm<'a> {
    slack_id: &'a UserReference,
    member_id: MemberId,
    token: &'a str,
}

/// Client for the membership site's `slack-link` endpoint.
///
/// Every call carries the shared verification token. Successful replies are
/// opaque text meant to be shown to the Slack user as-is.
#[derive(Clone)]
pub struct MembershipClient {
    client: Client,
    endpoint: String,
    verification_token: SecretString,
}

impl MembershipClient {
    /// Create a new membership client.
    pub fn new(
        endpoint: impl Into<String>,
        verification_token: SecretString,
        timeout: Duration,
    ) -> Result<Self, MembershipError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            verification_token,
        })
    }

    /// Link a Slack user to a member id.
    #[instrument(skip_all, fields(user = %user, member_id = %member_id))]
    pub async fn link(
        &self,
        user: &UserReference,
        member_id: MemberId,
    ) -> Result<String, MembershipError> {
        let form = LinkForm {
            slack_id: user,
            member_id,
            token: self.verification_token.expose_secret(),
        };

        let response = self.client.post(&self.endpoint).form(&form).send().await?;
        Self::relay(response).await
    }

    /// Look up which member a Slack user is linked to.
    #[instrument(skip_all, fields(user = %target.user()))]
    pub async fn lookup(&self, target: &LookupTarget) -> Result<String, MembershipError> {
        let response = self.client.get(self.lookup_url(target)).send().await?;
        Self::relay(response).await
    }

    /// Fetch member information. Admin callers get the extended view.
    #[instrument(skip_all, fields(user = %target.user(), is_admin = is_admin))]
    pub async fn info(
        &self,
        target: &LookupTarget,
        is_admin: bool,
    ) -> Result<String, MembershipError> {
        let response = self.client.get(self.info_url(target, is_admin)).send().await?;
        Self::relay(response).await
    }

    fn base_query(&self) -> String {
        format!(
            "{}?token={}",
            self.endpoint,
            encode_component(self.verification_token.expose_secret())
        )
    }

    pub(crate) fn lookup_url(&self, target: &LookupTarget) -> String {
        format!("{}&slack_id={}", self.base_query(), target.query_value())
    }

    pub(crate) fn info_url(&self, target: &LookupTarget, is_admin: bool) -> String {
        let mut url = format!(
            "{}&type=info&slack_id={}",
            self.base_query(),
            target.query_value()
        );
        if is_admin {
            url.push_str("&admin=1");
        }
        url
    }

    /// Pass a 200 body through untouched, anything else becomes an error.
    async fn relay(response: Response) -> Result<String, MembershipError> {
        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Membership endpoint returned an error");
            return Err(MembershipError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "Membership endpoint replied");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> MembershipClient {
        MembershipClient::new(
            "https://members.example.org/slack-link.php",
            SecretString::new("s3cret".into()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_lookup_url_for_caller() {
        let target = LookupTarget::Caller(UserReference::from_user_id("U9"));
        assert_eq!(
            client().lookup_url(&target),
            "https://members.example.org/slack-link.php?token=s3cret&slack_id=%3C%40U9%3E"
        );
    }

    #[test]
    fn test_lookup_url_for_mention() {
        let target = LookupTarget::Mentioned(UserReference::parse_mention("<@U1|x>").unwrap());
        assert_eq!(
            client().lookup_url(&target),
            "https://members.example.org/slack-link.php?token=s3cret&slack_id=%3C@U1%3E"
        );
    }

    #[test]
    fn test_info_url_admin_flag_is_a_separate_parameter() {
        let target = LookupTarget::Mentioned(UserReference::parse_mention("<@U1>").unwrap());
        assert_eq!(
            client().info_url(&target, true),
            "https://members.example.org/slack-link.php?token=s3cret&type=info&slack_id=%3C@U1%3E&admin=1"
        );
        assert!(!client().info_url(&target, false).contains("admin"));
    }

    #[test]
    fn test_mention_cannot_add_query_parameters() {
        let target = LookupTarget::Mentioned(UserReference::from_user_id("U1&admin=1&x="));
        let url = client().info_url(&target, false);
        assert_eq!(
            url,
            "https://members.example.org/slack-link.php?token=s3cret&type=info&slack_id=%3C@U1%26admin%3D1%26x%3D%3E"
        );
        assert!(!url.contains("&admin="));

        let target = LookupTarget::Mentioned(UserReference::from_user_id("U1&token=x&type=info"));
        let url = client().lookup_url(&target);
        assert_eq!(url.matches("&token=").count() + url.matches("?token=").count(), 1);
        assert!(!url.contains("&type="));
    }
}
