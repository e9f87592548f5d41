//! Repository wrapper providing the git operations github-status needs.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{Error, Result};
use crate::fetch_head::FetchHead;

/// High-level wrapper around a git repository.
pub struct Repository {
    inner: git2::Repository,
}

impl Repository {
    /// Open a repository at the given path.
    ///
    /// # Errors
    /// Returns error if no repository found at path or any parent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let inner = git2::Repository::discover(path).map_err(|e| {
            debug!(error = %e, "repository discovery failed");
            Error::NotARepository
        })?;
        Ok(Self { inner })
    }

    /// Open the repository containing the current directory.
    ///
    /// # Errors
    /// Returns error if not inside a git repository.
    pub fn open_current() -> Result<Self> {
        Self::open(".")
    }

    /// Get the path to the repository root (workdir).
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.inner.workdir()
    }

    /// Get the path to the .git directory.
    #[must_use]
    pub fn git_dir(&self) -> &Path {
        self.inner.path()
    }

    /// Check whether a remote with this name is configured.
    #[must_use]
    pub fn has_remote(&self, name: &str) -> bool {
        self.inner.find_remote(name).is_ok()
    }

    // === Pull request refs ===

    /// Fetch `refs/pull/<number>/head` from `remote` and return the commit id
    /// it points at.
    ///
    /// The `FETCH_HEAD` file written by the fetch is removed before this
    /// returns, whether or not the fetch succeeded.
    ///
    /// # Errors
    /// Returns error if the fetch fails or yields no commit id.
    pub fn fetch_pull_head(&self, remote: &str, number: &str) -> Result<String> {
        let refspec = format!("refs/pull/{number}/head");
        let fetch_head = FetchHead::in_git_dir(self.git_dir());
        let cwd = self.workdir().unwrap_or_else(|| self.git_dir());

        debug!(remote, refspec = %refspec, "fetching pull request head");

        let output = Command::new("git")
            .args(["fetch", "--quiet", "--no-tags", remote, &refspec])
            .current_dir(cwd)
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| Error::FetchFailed {
                refspec: refspec.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::FetchFailed {
                refspec,
                message: stderr.trim().to_string(),
            });
        }

        let sha = fetch_head.read_sha()?;
        debug!(sha = %sha, "pull request head resolved");
        Ok(sha)
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("path", &self.inner.path())
            .finish()
    }
}
