//! Configuration for the slash command service.

use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

/// Service configuration. Read once at startup and never changed.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Slack credentials and API configuration
    pub slack: SlackConfig,

    /// Membership endpoint configuration
    pub membership: MembershipConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlackConfig {
    /// Signing secret used to verify inbound requests
    pub signing_secret: SecretString,

    /// Bot access token for `users.info`
    pub access_token: SecretString,

    /// Slack Web API base URL
    #[serde(default = "default_slack_api_url")]
    pub api_url: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MembershipConfig {
    /// Shared token the membership endpoint expects on every call
    pub verification_token: SecretString,

    /// Link endpoint URL
    #[serde(default = "default_membership_url")]
    pub url: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest accepted distance between a request timestamp and local time
    #[serde(default = "default_max_skew", with = "humantime_serde")]
    pub max_skew: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
            max_skew: default_max_skew(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_slack_api_url() -> String {
    "https://slack.com/api".into()
}

fn default_membership_url() -> String {
    "https://rpiambulance.com/slack-link.php".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    4000
}

fn default_max_skew() -> Duration {
    crate::signature::DEFAULT_MAX_SKEW
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_source(config::Environment::default().separator("__"))
    }

    fn from_source<S>(source: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .add_source(source)
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
