//! Configuration management for userql.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (`USERQL__` prefix, `__` separator)
//! 2. Config file (`userql.toml` by default)
//! 3. Defaults

use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, UserqlError};

/// Environment variable prefix, e.g. `USERQL__GRAPHQL__ENDPOINT`.
pub const ENV_PREFIX: &str = "USERQL";

/// Top-level userql configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserqlConfig {
    #[serde(default)]
    pub graphql: GraphqlSettings,
}

/// Connection settings for the GraphQL endpoint.
///
/// Loaded from the `[graphql]` section or `USERQL__GRAPHQL__*` variables.
#[derive(Clone, Deserialize)]
pub struct GraphqlSettings {
    /// GraphQL endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Bearer token sent in the `Authorization` header, if set.
    #[serde(default)]
    pub bearer_token: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl GraphqlSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl std::fmt::Debug for GraphqlSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphqlSettings")
            .field("endpoint", &self.endpoint)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "[redacted]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_endpoint() -> String {
    "http://localhost:4000/graphql".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for GraphqlSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            bearer_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl UserqlConfig {
    /// Load configuration from `<file_prefix>.<ext>` (optional) and
    /// `USERQL__` environment variables.
    pub fn load(file_prefix: &str) -> Result<Self> {
        Self::load_with_env_prefix(file_prefix, ENV_PREFIX)
    }

    /// Same as [`UserqlConfig::load`] with a custom environment prefix.
    pub fn load_with_env_prefix(file_prefix: &str, env_prefix: &str) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix(env_prefix)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: Self = cfg.try_deserialize()?;
        loaded.validate()?;
        tracing::debug!(endpoint = %loaded.graphql.endpoint, "Loaded configuration");
        Ok(loaded)
    }

    /// Reject settings no client could work with.
    pub fn validate(&self) -> Result<()> {
        let endpoint = self.graphql.endpoint.trim();
        if endpoint.is_empty() {
            return Err(UserqlError::InvalidConfig(
                "graphql.endpoint must not be empty".to_string(),
            ));
        }
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(UserqlError::InvalidConfig(format!(
                "graphql.endpoint must be an http(s) URL, got {endpoint}"
            )));
        }
        if self.graphql.timeout_secs == 0 {
            return Err(UserqlError::InvalidConfig(
                "graphql.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
