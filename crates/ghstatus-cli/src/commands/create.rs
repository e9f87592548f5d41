//! `github-status create` command - Create a status on a ref.

use anyhow::{Context, Result};
use ghstatus_core::{Command, CommandInvocation, Config, FlagSet};

use super::utils;
use crate::{output, render};

/// Run the create command.
pub fn run(config: &Config, identifier: Option<String>, flags: FlagSet) -> Result<()> {
    let invocation = CommandInvocation::new(Command::Create, identifier, flags, config)?;
    let status = invocation
        .create_status()
        .context("create invocation without a status body")?;
    let client = utils::status_client(config)?;
    let resolved = utils::resolve_ref(config, invocation.identifier());

    let rt = utils::runtime()?;
    let created = rt
        .block_on(client.create_status(
            invocation.owner(),
            invocation.repo(),
            resolved.sha(),
            &status,
        ))
        .with_context(|| format!("Failed to create status on {}", resolved.sha()))?;

    output::essential(&render::created_status(
        invocation.identifier(),
        resolved.sha(),
        &created,
    ));
    Ok(())
}
