//! Client for the membership site's Slack link endpoint.
//!
//! The endpoint keys links by Slack mention token (`<@U12345>`) and answers
//! with plain text that is relayed straight back to Slack.

mod client;
mod error;
mod types;

pub use client::MembershipClient;
pub use error::MembershipError;
pub use types::*;
