//! Membership client errors.

use thiserror::Error;

/// Failures talking to the membership endpoint.
///
/// The `Display` output may contain the endpoint's own error text, so it is
/// meant for operator logs only.
#[derive(Error, Debug)]
pub enum MembershipError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },
}
