//! Maps a parsed command to exactly one downstream action.

use super::{parse, AdminAuthorizer, Command, MembershipService, SlashCommand};
use membership_client::MembershipError;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Fixed replies sent back to Slack.
pub mod messages {
    pub const ADMIN_ONLY: &str = "This command can only be used by an admin!";
    pub const UNSUPPORTED: &str =
        "It appears the command you are trying to send isn't supported.";
    pub const SERVER_ERROR: &str =
        "Oops! Something went wrong with the membership server request, please try again later.";
}

/// Routes slash commands to the membership service, consulting the admin
/// authorizer where a command needs it.
#[derive(Clone)]
pub struct CommandRouter {
    authorizer: Arc<dyn AdminAuthorizer>,
    membership: Arc<dyn MembershipService>,
}

impl CommandRouter {
    pub fn new(
        authorizer: Arc<dyn AdminAuthorizer>,
        membership: Arc<dyn MembershipService>,
    ) -> Self {
        Self {
            authorizer,
            membership,
        }
    }

    /// Parse and dispatch one invocation, producing the text for Slack.
    pub async fn handle(&self, command: &str, text: &str, caller: &str) -> String {
        match parse(command, text, caller) {
            Ok(parsed) => self.dispatch(parsed).await,
            Err(e) => {
                debug!(%command, %caller, error = %e, "Rejected command arguments");
                e.to_string()
            }
        }
    }

    /// Run an already parsed command.
    pub async fn dispatch(&self, command: SlashCommand) -> String {
        let SlashCommand { caller, kind } = command;

        let result = match kind {
            Command::LinkUser { user, member_id } => {
                if !self.authorizer.is_admin(&caller).await {
                    info!(%caller, "Non-admin attempted /linkuser");
                    return messages::ADMIN_ONLY.to_string();
                }
                info!(%caller, %user, %member_id, "Linking user");
                self.membership.link(&user, member_id).await
            }
            Command::CheckLink { target } => self.membership.lookup(&target).await,
            Command::MemberInfo { target } => {
                let is_admin = self.authorizer.is_admin(&caller).await;
                self.membership.info(&target, is_admin).await
            }
            Command::Unknown(name) => {
                warn!(command = %name, "Command not configured");
                return messages::UNSUPPORTED.to_string();
            }
        };

        result.unwrap_or_else(|e| Self::server_error(&caller, e))
    }

    fn server_error(caller: &str, e: MembershipError) -> String {
        error!(%caller, error = %e, "Membership request failed");
        messages::SERVER_ERROR.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{MockAdminAuthorizer, MockMembershipService};
    use membership_client::{LookupTarget, MemberId, UserReference};
    use mockall::predicate::eq;

    fn router(
        authorizer: MockAdminAuthorizer,
        membership: MockMembershipService,
    ) -> CommandRouter {
        CommandRouter::new(Arc::new(authorizer), Arc::new(membership))
    }

    #[tokio::test]
    async fn test_link_user_as_admin() {
        let mut authorizer = MockAdminAuthorizer::new();
        authorizer
            .expect_is_admin()
            .with(eq("UADMIN"))
            .times(1)
            .returning(|_| true);

        let mut membership = MockMembershipService::new();
        membership
            .expect_link()
            .with(
                eq(UserReference::from_user_id("U1")),
                eq(MemberId(42)),
            )
            .times(1)
            .returning(|_, _| Ok("Linked!".into()));

        let reply = router(authorizer, membership)
            .handle("/linkuser", "<@U1|name> 42", "UADMIN")
            .await;
        assert_eq!(reply, "Linked!");
    }

    #[tokio::test]
    async fn test_link_user_denied_for_non_admin() {
        let mut authorizer = MockAdminAuthorizer::new();
        authorizer
            .expect_is_admin()
            .with(eq("U9"))
            .times(1)
            .returning(|_| false);

        let mut membership = MockMembershipService::new();
        membership.expect_link().never();

        let reply = router(authorizer, membership)
            .handle("/linkuser", "<@U1> 42", "U9")
            .await;
        assert_eq!(reply, messages::ADMIN_ONLY);
    }

    #[tokio::test]
    async fn test_link_user_validation_makes_no_calls() {
        let mut authorizer = MockAdminAuthorizer::new();
        authorizer.expect_is_admin().never();
        let mut membership = MockMembershipService::new();
        membership.expect_link().never();

        let reply = router(authorizer, membership)
            .handle("/linkuser", "notamention 42", "UADMIN")
            .await;
        assert_eq!(reply, "The first parameter must be a user!");
    }

    #[tokio::test]
    async fn test_check_link_self_skips_admin_check() {
        let mut authorizer = MockAdminAuthorizer::new();
        authorizer.expect_is_admin().never();

        let mut membership = MockMembershipService::new();
        membership
            .expect_lookup()
            .with(eq(LookupTarget::Caller(UserReference::from_user_id("U9"))))
            .times(1)
            .returning(|_| Ok("raw body\n".into()));

        let reply = router(authorizer, membership)
            .handle("/checklink", "", "U9")
            .await;
        assert_eq!(reply, "raw body\n");
    }

    #[tokio::test]
    async fn test_member_info_admin_flag() {
        for admin in [true, false] {
            let mut authorizer = MockAdminAuthorizer::new();
            authorizer
                .expect_is_admin()
                .with(eq("U9"))
                .times(1)
                .returning(move |_| admin);

            let mut membership = MockMembershipService::new();
            membership
                .expect_info()
                .with(
                    eq(LookupTarget::Mentioned(UserReference::from_user_id("U1"))),
                    eq(admin),
                )
                .times(1)
                .returning(|_, _| Ok("info".into()));

            let reply = router(authorizer, membership)
                .handle("/memberinfo", "<@U1|x>", "U9")
                .await;
            assert_eq!(reply, "info");
        }
    }

    #[tokio::test]
    async fn test_member_info_injected_mention_makes_no_calls() {
        let mut authorizer = MockAdminAuthorizer::new();
        authorizer.expect_is_admin().never();
        let mut membership = MockMembershipService::new();
        membership.expect_info().never();

        let reply = router(authorizer, membership)
            .handle("/memberinfo", "<@U1&admin=1&x=>", "U9")
            .await;
        assert_eq!(reply, "The first parameter must be a user!");
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let mut authorizer = MockAdminAuthorizer::new();
        authorizer.expect_is_admin().never();
        let membership = MockMembershipService::new();

        let reply = router(authorizer, membership)
            .handle("/nope", "", "U9")
            .await;
        assert_eq!(reply, messages::UNSUPPORTED);
    }

    #[tokio::test]
    async fn test_membership_failure_is_not_leaked() {
        let authorizer = MockAdminAuthorizer::new();
        let mut membership = MockMembershipService::new();
        membership.expect_lookup().times(1).returning(|_| {
            Err(MembershipError::Status {
                status: 500,
                body: "SQLSTATE[HY000] token=abc".into(),
            })
        });

        let reply = router(authorizer, membership)
            .handle("/checklink", "<@U1>", "U9")
            .await;
        assert_eq!(reply, messages::SERVER_ERROR);
        assert!(!reply.contains("SQLSTATE"));
    }
}
