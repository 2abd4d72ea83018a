//! HTTP API for the slash command service.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::{logging_middleware, verify_signature_middleware};
pub use types::*;

use crate::commands::CommandRouter;
use crate::config::Config;
use crate::error::AppError;
use crate::signature::SignatureVerifier;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use membership_client::MembershipClient;
use slack_client::SlackClient;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Path Slack is configured to post slash commands to.
pub const COMMANDS_PATH: &str = "/slack/slack-link/commands";

/// Shared application state. Everything in it is immutable.
#[derive(Clone)]
pub struct AppState {
    /// Inbound request verifier
    pub verifier: Arc<SignatureVerifier>,
    /// Command dispatch
    pub router: CommandRouter,
}

impl AppState {
    /// Create new application state.
    pub fn new(verifier: SignatureVerifier, router: CommandRouter) -> Self {
        Self {
            verifier: Arc::new(verifier),
            router,
        }
    }

    /// Build the verifier and both collaborator clients from configuration.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let slack = SlackClient::new(
            config.slack.api_url.clone(),
            config.slack.access_token.clone(),
            config.slack.timeout,
        )?;

        let membership = MembershipClient::new(
            config.membership.url.clone(),
            config.membership.verification_token.clone(),
            config.membership.timeout,
        )?;

        let verifier = SignatureVerifier::with_max_skew(
            config.slack.signing_secret.clone(),
            config.server.max_skew,
        );

        Ok(Self::new(
            verifier,
            CommandRouter::new(Arc::new(slack), Arc::new(membership)),
        ))
    }
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check (unsigned)
        .route("/health", get(handlers::health))
        .route(
            COMMANDS_PATH,
            post(handlers::slash_command).route_layer(axum_middleware::from_fn_with_state(
                state.clone(),
                verify_signature_middleware,
            )),
        )
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
