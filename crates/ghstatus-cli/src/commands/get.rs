//! `github-status get` command - Show the combined status of a ref.

use anyhow::{Context, Result};
use ghstatus_core::{Command, CommandInvocation, Config, FlagSet};

use super::utils;
use crate::{output, render};

/// Run the get command.
pub fn run(config: &Config, identifier: Option<String>, flags: FlagSet) -> Result<()> {
    let invocation = CommandInvocation::new(Command::Get, identifier, flags, config)?;
    let client = utils::status_client(config)?;
    let resolved = utils::resolve_ref(config, invocation.identifier());

    let rt = utils::runtime()?;
    let status = rt
        .block_on(client.get_combined_status(
            invocation.owner(),
            invocation.repo(),
            resolved.sha(),
        ))
        .with_context(|| format!("Failed to get status for {}", resolved.sha()))?;

    // Report the identifier as given; the resolved sha shows up in the body.
    output::essential(&render::combined_status(invocation.identifier(), &status));
    Ok(())
}
