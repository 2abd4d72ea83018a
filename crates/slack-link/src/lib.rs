//! Slack slash-command bridge to the membership link service.
//!
//! Inbound slash commands are:
//! - Verified against Slack's request signature and replay window
//! - Parsed into one of `/linkuser`, `/checklink` or `/memberinfo`
//! - Checked against the caller's Slack admin flag where required
//! - Forwarded to the membership endpoint, whose reply is relayed verbatim

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod signature;

pub use commands::{AdminAuthorizer, Command, CommandRouter, MembershipService, SlashCommand};
pub use config::Config;
pub use error::AppError;
pub use signature::SignatureVerifier;
