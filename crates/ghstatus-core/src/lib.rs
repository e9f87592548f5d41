//! # ghstatus-core
//!
//! Core library for github-status: environment configuration, command
//! validation, and resolution of pull request numbers to commit SHAs.

pub mod config;
pub mod error;
pub mod invocation;
pub mod resolve;

pub use config::Config;
pub use error::{Error, Result};
pub use invocation::{Command, CommandInvocation, FlagSet};
pub use resolve::{PullHeadSource, ResolvedRef, resolve};
