//! # ghstatus-github
//!
//! GitHub commit status API integration: token auth, request
//! construction, and a single-attempt HTTP client.

mod auth;
mod client;
mod error;
mod request;
mod types;

pub use auth::Auth;
pub use client::{RawResponse, StatusClient};
pub use error::{Error, Result};
pub use request::StatusRequest;
pub use types::{CombinedStatus, CommitStatus, CreateStatus, CreatedStatus, RepositoryRef, StatusState};
