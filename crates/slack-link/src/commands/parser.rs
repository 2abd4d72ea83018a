//! Slash command grammar.

use super::{Command, SlashCommand, CHECK_LINK, LINK_USER, MEMBER_INFO};
use membership_client::{LookupTarget, MemberId, UserReference};
use thiserror::Error;

/// Problems with the text a user typed. The message is shown to them as-is.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("The first parameter must be a user!")]
    NotAMention,

    #[error("The second parameter must be a whole number!")]
    MemberIdNotNumeric,

    #[error("Usage: {0}")]
    Usage(&'static str),
}

const LINK_USER_USAGE: &str = "/linkuser @user <member id>";

/// Parse a slash command invocation.
pub fn parse(command: &str, text: &str, caller: &str) -> Result<SlashCommand, ParseError> {
    let kind = match command {
        LINK_USER => parse_link_user(text)?,
        CHECK_LINK => Command::CheckLink {
            target: parse_target(text, caller)?,
        },
        MEMBER_INFO => Command::MemberInfo {
            target: parse_target(text, caller)?,
        },
        other => Command::Unknown(other.to_string()),
    };

    Ok(SlashCommand {
        caller: caller.to_string(),
        kind,
    })
}

/// Empty text means the caller asked about themselves.
fn parse_target(text: &str, caller: &str) -> Result<LookupTarget, ParseError> {
    match text.split_whitespace().next() {
        None => Ok(LookupTarget::Caller(UserReference::from_user_id(caller))),
        Some(token) => UserReference::parse_mention(token)
            .map(LookupTarget::Mentioned)
            .ok_or(ParseError::NotAMention),
    }
}

fn parse_link_user(text: &str) -> Result<Command, ParseError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let [mention, member_id] = tokens[..] else {
        return Err(ParseError::Usage(LINK_USER_USAGE));
    };

    let user = UserReference::parse_mention(mention).ok_or(ParseError::NotAMention)?;
    let member_id: MemberId = member_id
        .parse()
        .map_err(|_| ParseError::MemberIdNotNumeric)?;

    Ok(Command::LinkUser { user, member_id })
}
