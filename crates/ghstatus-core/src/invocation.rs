//! Command invocations and their required-flag validation.

use ghstatus_github::{CreateStatus, StatusState};

use crate::config::Config;
use crate::error::{Error, Result};

/// A supported command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Read the combined status of a ref.
    Get,
    /// Create a status on a ref.
    Create,
}

/// Flags as given on the command line.
///
/// `state` is already checked against the four accepted literals when the
/// arguments are parsed; everything else is validated per command by
/// [`CommandInvocation::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub state: Option<StatusState>,
    pub description: Option<String>,
    pub context: Option<String>,
    pub target_url: Option<String>,
}

impl FlagSet {
    /// Drop empty values, then fill owner and repo from the environment
    /// defaults where they were not given.
    #[must_use]
    pub fn with_defaults(self, config: &Config) -> Self {
        Self {
            owner: non_empty(self.owner).or_else(|| config.owner.clone()),
            repo: non_empty(self.repo).or_else(|| config.repo.clone()),
            state: self.state,
            description: non_empty(self.description),
            context: non_empty(self.context),
            target_url: non_empty(self.target_url),
        }
    }

    /// Names of every required flag that is unset for `command`.
    fn missing(&self, command: Command) -> Vec<&'static str> {
        let mut required = vec![("-owner", self.owner.is_some()), ("-repo", self.repo.is_some())];
        if command == Command::Create {
            required.extend([
                ("-state", self.state.is_some()),
                ("-desc", self.description.is_some()),
                ("-context", self.context.is_some()),
            ]);
        }

        required
            .into_iter()
            .filter_map(|(name, present)| (!present).then_some(name))
            .collect()
    }
}

/// Placeholder naming the PR/SHA argument in error messages.
const IDENTIFIER: &str = "<pr_or_sha>";

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// A validated command ready to run.
///
/// Construction fails unless every flag the command requires is present, so
/// the accessors never see an unset required value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    command: Command,
    identifier: String,
    flags: FlagSet,
}

impl CommandInvocation {
    /// Validate a parsed command line.
    ///
    /// # Errors
    /// Returns [`Error::MissingArguments`] listing the PR/SHA argument, if
    /// absent, together with every required flag that is unset.
    pub fn new(
        command: Command,
        identifier: Option<String>,
        flags: FlagSet,
        config: &Config,
    ) -> Result<Self> {
        let identifier = non_empty(identifier);
        let flags = flags.with_defaults(config);

        let mut missing = Vec::new();
        if identifier.is_none() {
            missing.push(IDENTIFIER);
        }
        missing.extend(flags.missing(command));

        match identifier {
            Some(identifier) if missing.is_empty() => Ok(Self {
                command,
                identifier,
                flags,
            }),
            _ => Err(Error::MissingArguments(missing)),
        }
    }

    /// PR number or SHA exactly as given.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        self.flags.owner.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        self.flags.repo.as_deref().unwrap_or_default()
    }

    /// Body for the create call; `None` for `get`.
    #[must_use]
    pub fn create_status(&self) -> Option<CreateStatus> {
        if self.command != Command::Create {
            return None;
        }

        Some(CreateStatus {
            state: self.flags.state?,
            description: self.flags.description.clone()?,
            target_url: self.flags.target_url.clone(),
            context: self.flags.context.clone()?,
        })
    }
}
