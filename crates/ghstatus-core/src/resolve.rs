//! Resolution of a user-supplied PR number or SHA to a commit SHA.

use std::fmt::Display;

use ghstatus_git::Repository;
use tracing::debug;

/// Something that can look up the head commit of a pull request.
pub trait PullHeadSource {
    type Error: Display;

    /// Fetch `refs/pull/<number>/head` from `remote` and return its SHA.
    ///
    /// # Errors
    /// Returns error if the ref cannot be fetched.
    fn fetch_pull_head(&self, remote: &str, number: &str) -> Result<String, Self::Error>;
}

impl PullHeadSource for Repository {
    type Error = ghstatus_git::Error;

    fn fetch_pull_head(&self, remote: &str, number: &str) -> Result<String, Self::Error> {
        Self::fetch_pull_head(self, remote, number)
    }
}

/// Outcome of resolving an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedRef {
    /// The identifier named an open pull request; `sha` is its head.
    PullHead { identifier: String, sha: String },
    /// The identifier is used as a SHA as-is.
    Literal { identifier: String },
}

impl ResolvedRef {
    /// The identifier as given.
    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            Self::PullHead { identifier, .. } | Self::Literal { identifier } => identifier,
        }
    }

    /// Commit SHA to use downstream.
    #[must_use]
    pub fn sha(&self) -> &str {
        match self {
            Self::PullHead { sha, .. } => sha,
            Self::Literal { identifier } => identifier,
        }
    }
}

/// Resolve `identifier` to a commit SHA.
///
/// Never fails: if there is no source, or the pull request ref cannot be
/// fetched, the identifier itself is treated as a SHA.
pub fn resolve<S>(source: Option<&S>, remote: &str, identifier: &str) -> ResolvedRef
where
    S: PullHeadSource + ?Sized,
{
    let literal = || ResolvedRef::Literal {
        identifier: identifier.to_string(),
    };

    let Some(source) = source else {
        debug!(identifier, "no repository, using identifier as sha");
        return literal();
    };

    match source.fetch_pull_head(remote, identifier) {
        Ok(sha) if !sha.is_empty() => ResolvedRef::PullHead {
            identifier: identifier.to_string(),
            sha,
        },
        Ok(_) => literal(),
        Err(e) => {
            debug!(identifier, error = %e, "not a pull request ref, using identifier as sha");
            literal()
        }
    }
}
