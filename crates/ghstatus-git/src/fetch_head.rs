//! The `FETCH_HEAD` pointer file written by `git fetch`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// Handle on a repository's `FETCH_HEAD` file.
///
/// The file is ephemeral: it is removed when the handle is dropped, so a
/// resolution never leaves a stale pointer behind. Removal is idempotent.
#[derive(Debug)]
pub struct FetchHead {
    path: PathBuf,
}

impl FetchHead {
    /// File name git writes fetched heads to.
    pub const FILE_NAME: &'static str = "FETCH_HEAD";

    /// Handle for the pointer file inside `git_dir`.
    #[must_use]
    pub fn in_git_dir(git_dir: &Path) -> Self {
        Self {
            path: git_dir.join(Self::FILE_NAME),
        }
    }

    /// Path of the pointer file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the commit id recorded for the fetched head.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or holds no commit id.
    pub fn read_sha(&self) -> Result<String> {
        let contents = fs::read_to_string(&self.path)?;
        parse_fetch_head(&contents)
            .map(String::from)
            .ok_or_else(|| Error::EmptyFetchHead(self.path.clone()))
    }

    /// Remove the pointer file. A missing file is not an error.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be removed.
    pub fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "removed fetched-head pointer");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Drop for FetchHead {
    fn drop(&mut self) {
        if let Err(e) = self.remove() {
            debug!(path = %self.path.display(), error = %e, "could not remove fetched-head pointer");
        }
    }
}

/// Extract the commit id from `FETCH_HEAD` contents.
///
/// That is the first tab-delimited field of the first line. Returns `None`
/// when the field is empty or is not a hex object id.
#[must_use]
pub fn parse_fetch_head(contents: &str) -> Option<&str> {
    let line = contents.lines().next()?;
    let sha = line.split('\t').next()?.trim();

    if sha.is_empty() || !sha.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some(sha)
}
