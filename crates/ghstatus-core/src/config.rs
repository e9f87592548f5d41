//! Environment-derived configuration.
//!
//! Read once at startup and passed by reference to whatever needs it.

use std::time::Duration;

use ghstatus_github::StatusClient;
use secrecy::SecretString;
use tracing::debug;

use crate::error::{Error, Result};

/// Required access token.
pub const ENV_ACCESS_TOKEN: &str = "GITHUB_STATUS_ACCESS_TOKEN";
/// Default for `-owner`.
pub const ENV_REPO_OWNER: &str = "GITHUB_STATUS_REPO_OWNER";
/// Default for `-repo`.
pub const ENV_REPO_NAME: &str = "GITHUB_STATUS_REPO_NAME";
/// User agent sent to the API.
pub const ENV_USER_AGENT: &str = "GITHUB_STATUS_USER_AGENT";
/// API base URL override.
pub const ENV_API_URL: &str = "GITHUB_STATUS_API_URL";
/// Remote that pull request refs are fetched from.
pub const ENV_REMOTE: &str = "GITHUB_STATUS_REMOTE";
/// Request timeout in seconds.
pub const ENV_TIMEOUT: &str = "GITHUB_STATUS_TIMEOUT";
/// Enables verbose diagnostics.
pub const ENV_DEBUG: &str = "DEBUG";

/// Process-wide settings.
#[derive(Debug)]
pub struct Config {
    /// Access token; checked by [`Config::access_token`].
    pub token: Option<SecretString>,

    /// Default repository owner.
    pub owner: Option<String>,

    /// Default repository name.
    pub repo: Option<String>,

    pub user_agent: String,

    pub api_url: String,

    /// Git remote used for pull request refs.
    pub remote: String,

    pub timeout: Duration,

    /// Verbose diagnostics to stderr.
    pub debug: bool,
}

impl Config {
    /// Default remote for pull request refs.
    pub const DEFAULT_REMOTE: &'static str = "origin";

    /// Load from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable lookup. Empty values count as unset.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let timeout = var(ENV_TIMEOUT)
            .and_then(|v| match v.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    debug!(value = %v, "ignoring invalid {ENV_TIMEOUT}");
                    None
                }
            })
            .unwrap_or(StatusClient::DEFAULT_TIMEOUT);

        Self {
            token: var(ENV_ACCESS_TOKEN).map(SecretString::from),
            owner: var(ENV_REPO_OWNER),
            repo: var(ENV_REPO_NAME),
            user_agent: var(ENV_USER_AGENT)
                .unwrap_or_else(|| StatusClient::DEFAULT_USER_AGENT.to_string()),
            api_url: var(ENV_API_URL).unwrap_or_else(|| StatusClient::DEFAULT_API_URL.to_string()),
            remote: var(ENV_REMOTE).unwrap_or_else(|| Self::DEFAULT_REMOTE.to_string()),
            timeout,
            debug: var(ENV_DEBUG).is_some_and(|v| !matches!(v.as_str(), "0" | "false")),
        }
    }

    /// The access token, which every command requires.
    ///
    /// # Errors
    /// Returns [`Error::MissingToken`] if the token is not configured.
    pub fn access_token(&self) -> Result<&SecretString> {
        self.token
            .as_ref()
            .ok_or(Error::MissingToken(ENV_ACCESS_TOKEN))
    }
}
