//! Slack Web API client.

mod client;
mod error;
mod types;

pub use client::SlackClient;
pub use error::SlackError;
pub use types::*;
