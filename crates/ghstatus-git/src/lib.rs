//! # ghstatus-git
//!
//! Git operations for github-status: fetching pull request head refs
//! and reading the commit they point at.

mod error;
mod fetch_head;
mod repository;

pub use error::{Error, Result};
pub use fetch_head::{FetchHead, parse_fetch_head};
pub use repository::Repository;
