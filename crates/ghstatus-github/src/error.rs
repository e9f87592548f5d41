//! Error types for GitHub API operations.

/// Result type alias for GitHub operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the status API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Status state outside the four values GitHub accepts.
    #[error("invalid state '{0}' (expected one of: pending, success, error, failure)")]
    InvalidState(String),

    /// A header value (token or user agent) contains forbidden characters.
    #[error("invalid {name} header value")]
    InvalidHeader {
        /// Header name.
        name: &'static str,
    },

    /// Transport failure: DNS, TLS, connection, timeout.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// GitHub rejected the token.
    #[error("authentication failed - check GITHUB_STATUS_ACCESS_TOKEN")]
    AuthenticationFailed,

    /// GitHub reported an exhausted rate limit.
    #[error("GitHub API rate limit exceeded")]
    RateLimited,

    /// Any other non-2xx response.
    #[error("GitHub API error ({status}): {message}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// Response body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Parse(#[from] serde_json::Error),
}
