//! Slash command parsing and dispatch.

mod parser;
mod router;

pub use parser::{parse, ParseError};
pub use router::{messages, CommandRouter};

use async_trait::async_trait;
use membership_client::{
    LookupTarget, MemberId, MembershipClient, MembershipError, UserReference,
};
use slack_client::SlackClient;
use tracing::warn;

pub const LINK_USER: &str = "/linkuser";
pub const CHECK_LINK: &str = "/checklink";
pub const MEMBER_INFO: &str = "/memberinfo";

/// A parsed slash command together with the Slack user who ran it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlashCommand {
    pub caller: String,
    pub kind: Command,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Link a Slack user to a member id. Admin only.
    LinkUser {
        user: UserReference,
        member_id: MemberId,
    },
    /// Show which member a Slack user is linked to.
    CheckLink { target: LookupTarget },
    /// Show member details; admins see more.
    MemberInfo { target: LookupTarget },
    /// Anything this service was not set up for.
    Unknown(String),
}

/// Decides whether a Slack user holds admin privilege.
///
/// Implementations fail closed: any doubt is answered with `false`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminAuthorizer: Send + Sync {
    async fn is_admin(&self, user_id: &str) -> bool;
}

/// The membership link operations the router delegates to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipService: Send + Sync {
    async fn link(
        &self,
        user: &UserReference,
        member_id: MemberId,
    ) -> Result<String, MembershipError>;

    async fn lookup(&self, target: &LookupTarget) -> Result<String, MembershipError>;

    async fn info(&self, target: &LookupTarget, is_admin: bool)
        -> Result<String, MembershipError>;
}

#[async_trait]
impl AdminAuthorizer for SlackClient {
    async fn is_admin(&self, user_id: &str) -> bool {
        match self.user_info(user_id).await {
            Ok(user) => user.is_admin,
            Err(e) => {
                warn!(%user_id, error = %e, "Admin check failed, treating as non-admin");
                false
            }
        }
    }
}

#[async_trait]
impl MembershipService for MembershipClient {
    async fn link(
        &self,
        user: &UserReference,
        member_id: MemberId,
    ) -> Result<String, MembershipError> {
        MembershipClient::link(self, user, member_id).await
    }

    async fn lookup(&self, target: &LookupTarget) -> Result<String, MembershipError> {
        MembershipClient::lookup(self, target).await
    }

    async fn info(
        &self,
        target: &LookupTarget,
        is_admin: bool,
    ) -> Result<String, MembershipError> {
        MembershipClient::info(self, target, is_admin).await
    }
}
