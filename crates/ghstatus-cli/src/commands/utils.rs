use anyhow::{Context, Result};
use ghstatus_core::{Config, ResolvedRef, resolve};
use ghstatus_git::Repository;
use ghstatus_github::{Auth, StatusClient};
use secrecy::ExposeSecret;
use tokio::runtime::Runtime;
use tracing::debug;

/// Build an authenticated client from the startup configuration.
pub fn status_client(config: &Config) -> Result<StatusClient> {
    let auth = Auth::from(config.access_token()?.expose_secret());
    StatusClient::with_base_url(&auth, &config.api_url, &config.user_agent, config.timeout)
        .context("Failed to create GitHub client")
}

/// Resolve a PR number or SHA against the repository in the current
/// directory, falling back to the identifier itself.
pub fn resolve_ref(config: &Config, identifier: &str) -> ResolvedRef {
    let repo = match Repository::open_current() {
        Ok(repo) if repo.has_remote(&config.remote) => Some(repo),
        Ok(_) => {
            debug!(remote = %config.remote, "remote not configured, skipping pull request lookup");
            None
        }
        Err(e) => {
            debug!(error = %e, "skipping pull request lookup");
            None
        }
    };

    let resolved = resolve(repo.as_ref(), &config.remote, identifier);
    debug!(identifier, sha = resolved.sha(), "resolved ref");
    resolved
}

/// Single-threaded runtime for the one HTTP call an invocation makes.
pub fn runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
}
