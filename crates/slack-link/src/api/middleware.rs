//! Signature verification and request logging middleware.

use super::AppState;
use crate::error::AppError;
use crate::signature::{VerificationError, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

/// Slash command payloads are small; anything past this is not from Slack.
const MAX_BODY_BYTES: usize = 64 * 1024;

fn header<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, VerificationError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or(VerificationError::MissingHeader(name))
}

/// Verify the Slack signature over the raw body.
///
/// The body is buffered, checked byte-for-byte, then handed on unchanged so
/// the handler can decode the form.
pub async fn verify_signature_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (parts, body) = request.into_parts();

    let signature = header(&parts.headers, SIGNATURE_HEADER)?.to_string();
    let timestamp: i64 = header(&parts.headers, TIMESTAMP_HEADER)?
        .trim()
        .parse()
        .map_err(|_| VerificationError::MalformedTimestamp)?;

    let bytes = to_bytes(body, MAX_BODY_BYTES).await?;

    if let Err(e) = state.verifier.verify(&signature, timestamp, &bytes) {
        warn!(error = %e, "Rejected unverified request");
        return Err(e.into());
    }

    debug!("Request signature verified");
    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

/// Logging middleware for requests.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    debug!(%method, %uri, "Request started");

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    if status.is_success() {
        debug!(%method, %uri, %status, ?duration, "Request completed");
    } else {
        warn!(%method, %uri, %status, ?duration, "Request failed");
    }

    response
}
