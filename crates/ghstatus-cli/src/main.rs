//! github-status - read and write GitHub commit statuses from CI.

use std::ffi::OsString;

use clap::Parser;
use ghstatus_core::Config;

mod commands;
mod logging;
mod output;
mod render;

use commands::{Cli, Commands};

fn main() {
    let code = run(std::env::args_os());
    output::info(&format!("END github-status (exit {code})"));
    std::process::exit(code);
}

/// Parse, validate and dispatch one invocation; returns the exit code.
fn run(args: impl IntoIterator<Item = OsString>) -> i32 {
    let config = Config::from_env();
    logging::init(config.debug);

    if let Err(e) = config.access_token() {
        output::error(&e.to_string());
        return output::usage(1);
    }

    let cli = match Cli::try_parse_from(commands::normalize_args(args)) {
        Ok(cli) => cli,
        Err(e) => return commands::report_parse_error(&e),
    };

    let result = match cli.command {
        None => return output::usage(1),
        Some(Commands::Help) => return output::usage(0),
        Some(Commands::Get { identifier, repo }) => {
            commands::get::run(&config, identifier, repo.into_flags())
        }
        Some(Commands::Create {
            identifier,
            repo,
            status,
        }) => commands::create::run(&config, identifier, status.into_flags(repo)),
    };

    if let Err(e) = result {
        output::error(&format!("{e:#}"));
        return 1;
    }
    0
}
