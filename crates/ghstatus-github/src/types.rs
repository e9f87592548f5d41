//! GitHub commit status API types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// State of a commit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
    /// Check is still running.
    Pending,
    /// Check passed.
    Success,
    /// Check could not run.
    Error,
    /// Check ran and failed.
    Failure,
}

impl StatusState {
    /// All accepted states, in the order they are documented.
    pub const ALL: [Self; 4] = [Self::Pending, Self::Success, Self::Error, Self::Failure];

    /// The literal GitHub uses for this state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Error => "error",
            Self::Failure => "failure",
        }
    }
}

impl fmt::Display for StatusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusState {
    type Err = Error;

    /// Only the exact lowercase literals are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| Error::InvalidState(s.to_string()))
    }
}

/// Request body for creating a commit status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateStatus {
    /// Status state.
    pub state: StatusState,

    /// Short human-readable description.
    pub description: String,

    /// Link to the build or check output. Omitted from the body when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,

    /// Label distinguishing this status from others on the same commit.
    pub context: String,
}

/// Combined status for a ref, as returned by
/// `GET /repos/{owner}/{repo}/commits/{ref}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct CombinedStatus {
    /// Overall state across all contexts.
    pub state: String,

    /// Repository the commit belongs to.
    pub repository: RepositoryRef,

    /// Commit SHA.
    pub sha: String,

    /// Latest status per context, in API order.
    pub statuses: Vec<CommitStatus>,
}

/// Repository summary embedded in a combined status.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryRef {
    /// `owner/name`.
    pub full_name: String,
}

/// A single status entry.
///
/// `description` and `target_url` may be `null` but must be present.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitStatus {
    pub state: String,
    pub context: String,
    #[serde(deserialize_with = "Option::deserialize")]
    pub description: Option<String>,
    #[serde(deserialize_with = "Option::deserialize")]
    pub target_url: Option<String>,
}

/// Status returned after a successful create call.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedStatus {
    /// API URL of the new status.
    pub url: String,
    pub state: String,
    #[serde(deserialize_with = "Option::deserialize")]
    pub description: Option<String>,
    #[serde(deserialize_with = "Option::deserialize")]
    pub target_url: Option<String>,
    pub context: String,
}
