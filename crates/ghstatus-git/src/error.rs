//! Error types for git operations.

use std::path::PathBuf;

/// Result type alias for git operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to git.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Not inside a git repository.
    #[error("not inside a git repository")]
    NotARepository,

    /// `git fetch` exited unsuccessfully or could not be spawned.
    #[error("fetch of {refspec} failed: {message}")]
    FetchFailed {
        /// The refspec that was requested.
        refspec: String,
        /// Stderr from git, or the spawn error.
        message: String,
    },

    /// The fetched-head pointer file had no usable commit id.
    #[error("no commit id in {}", .0.display())]
    EmptyFetchHead(PathBuf),

    /// Underlying libgit2 error.
    #[error(transparent)]
    Git(#[from] git2::Error),

    /// Filesystem error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
