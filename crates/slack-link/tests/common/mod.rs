//! Common test utilities for integration tests.

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use membership_client::MembershipClient;
use secrecy::SecretString;
use slack_client::SlackClient;
use slack_link::{
    api::{create_router, AppState, COMMANDS_PATH},
    signature::{compute_signature, SIGNATURE_HEADER, TIMESTAMP_HEADER},
    CommandRouter, SignatureVerifier,
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::MockServer;

pub const SIGNING_SECRET: &str = "test-signing-secret";
pub const MEMBERSHIP_PATH: &str = "/slack-link.php";

/// Build the full app against mock Slack and membership servers.
pub fn test_app(slack_server: &MockServer, membership_server: &MockServer) -> Router {
    let slack = SlackClient::new(
        slack_server.uri(),
        SecretString::new("xoxb-test".into()),
        Duration::from_secs(5),
    )
    .unwrap();

    let membership = MembershipClient::new(
        format!("{}{}", membership_server.uri(), MEMBERSHIP_PATH),
        SecretString::new("verify-token".into()),
        Duration::from_secs(5),
    )
    .unwrap();

    let state = AppState::new(
        SignatureVerifier::new(SecretString::new(SIGNING_SECRET.into())),
        CommandRouter::new(Arc::new(slack), Arc::new(membership)),
    );

    create_router(state)
}

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// A slash command request signed as Slack would sign it at `timestamp`.
pub fn signed_request(body: &str, timestamp: i64) -> Request<Body> {
    let signature = compute_signature(SIGNING_SECRET.as_bytes(), timestamp, body.as_bytes());

    Request::builder()
        .method("POST")
        .uri(COMMANDS_PATH)
        .header("content-type", "application/x-www-form-urlencoded")
        .header(SIGNATURE_HEADER, signature)
        .header(TIMESTAMP_HEADER, timestamp.to_string())
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
