//! Identifiers exchanged with the membership endpoint.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Characters left alone by JavaScript's `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Looser set used for typed mentions: the component set plus the URI
/// path delimiters. Query delimiters (`&`, `=`, `+`, `#`) stay escaped so a
/// mention can never add or override query parameters.
const URI: &AsciiSet = &COMPONENT
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'$');

/// Percent-encode a query component.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Percent-encode with the looser mention rules, keeping `@` and path
/// delimiters literal.
pub fn encode_uri(value: &str) -> String {
    utf8_percent_encode(value, URI).to_string()
}

/// A Slack mention token such as `<@U12345>`, the key the membership
/// database stores links under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserReference(String);

impl UserReference {
    /// Mention token for a bare Slack user id.
    pub fn from_user_id(user_id: &str) -> Self {
        Self(format!("<@{}>", user_id))
    }

    /// Normalize a mention token typed by a user.
    ///
    /// Accepts `<@ID>` or `<@ID|displayname>` where `ID` is a Slack user id
    /// (uppercase letters and digits). The display name is dropped.
    pub fn parse_mention(token: &str) -> Option<Self> {
        let inner = token.strip_prefix("<@")?.strip_suffix('>')?;
        let (id, display_name) = match inner.split_once('|') {
            Some((id, name)) => (id, Some(name)),
            None => (inner, None),
        };

        if id.is_empty()
            || !id
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return None;
        }
        if display_name.is_some_and(|name| name.contains('>')) {
            return None;
        }

        Some(Self::from_user_id(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Numeric member id on the membership site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MemberId(pub u64);

impl FromStr for MemberId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(MemberId)
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whose link a lookup is about.
///
/// The endpoint is sensitive to how the token is escaped, and the two
/// origins have always been escaped differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupTarget {
    /// The user who ran the command.
    Caller(UserReference),
    /// A user named in the command text.
    Mentioned(UserReference),
}

impl LookupTarget {
    pub fn user(&self) -> &UserReference {
        match self {
            LookupTarget::Caller(user) | LookupTarget::Mentioned(user) => user,
        }
    }

    /// The token escaped for the `slack_id` query parameter.
    pub fn query_value(&self) -> String {
        match self {
            LookupTarget::Caller(user) => encode_component(user.as_str()),
            LookupTarget::Mentioned(user) => encode_uri(user.as_str()),
        }
    }
}
