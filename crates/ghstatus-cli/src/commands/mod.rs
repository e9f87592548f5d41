//! CLI command definitions and handlers.

use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use ghstatus_core::FlagSet;
use ghstatus_github::StatusState;

use crate::output;

pub mod create;
pub mod get;
mod utils;

/// Usage text printed by `help` and on usage failures.
pub const USAGE: &str = "\
github-status - read and write GitHub commit statuses

Usage:
  github-status get    <pr_or_sha> -owner <owner> -repo <repo>
  github-status create <pr_or_sha> -owner <owner> -repo <repo>
                       -state {pending|success|error|failure}
                       -desc <text> -context <text> [-url <url>]
  github-status help

<pr_or_sha> is a pull request number, resolved through
refs/pull/<n>/head on the configured remote, or a commit SHA.

Environment:
  GITHUB_STATUS_ACCESS_TOKEN  access token (required)
  GITHUB_STATUS_REPO_OWNER    default for -owner
  GITHUB_STATUS_REPO_NAME     default for -repo
  GITHUB_STATUS_USER_AGENT    User-Agent header (default: github-status)
  GITHUB_STATUS_API_URL       API base URL (default: https://api.github.com)
  GITHUB_STATUS_REMOTE        remote for pull request refs (default: origin)
  GITHUB_STATUS_TIMEOUT       request timeout in seconds (default: 30)
  DEBUG                       verbose diagnostics on stderr
";

/// Flags that are written with a single dash on the command line.
const SINGLE_DASH_FLAGS: [&str; 6] = ["owner", "repo", "state", "desc", "context", "url"];

/// github-status - read and write GitHub commit statuses.
///
/// Reports build and test outcomes for a pull request or commit from CI,
/// and queries the statuses already recorded for it.
#[derive(Parser)]
#[command(name = "github-status")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Show the combined status of a pull request or commit.
    Get {
        /// Pull request number or commit SHA.
        identifier: Option<String>,

        #[command(flatten)]
        repo: RepoArgs,
    },

    /// Create a status on a pull request or commit.
    Create {
        /// Pull request number or commit SHA.
        identifier: Option<String>,

        #[command(flatten)]
        repo: RepoArgs,

        #[command(flatten)]
        status: StatusArgs,
    },

    /// Print usage.
    Help,
}

/// Repository selection, shared by every command.
#[derive(Args)]
pub struct RepoArgs {
    /// Repository owner [env: GITHUB_STATUS_REPO_OWNER].
    #[arg(long, allow_hyphen_values = true)]
    pub owner: Option<String>,

    /// Repository name [env: GITHUB_STATUS_REPO_NAME].
    #[arg(long, allow_hyphen_values = true)]
    pub repo: Option<String>,
}

impl RepoArgs {
    pub fn into_flags(self) -> FlagSet {
        FlagSet {
            owner: self.owner,
            repo: self.repo,
            ..FlagSet::default()
        }
    }
}

/// The status being created.
#[derive(Args)]
pub struct StatusArgs {
    /// One of pending, success, error, failure.
    #[arg(long, allow_hyphen_values = true)]
    pub state: Option<StatusState>,

    /// Short description of the status.
    #[arg(long = "desc", allow_hyphen_values = true)]
    pub description: Option<String>,

    /// Label for this status among the commit's checks.
    #[arg(long, allow_hyphen_values = true)]
    pub context: Option<String>,

    /// Link to the build or check output.
    #[arg(long = "url", allow_hyphen_values = true)]
    pub target_url: Option<String>,
}

impl StatusArgs {
    pub fn into_flags(self, repo: RepoArgs) -> FlagSet {
        FlagSet {
            state: self.state,
            description: self.description,
            context: self.context,
            target_url: self.target_url,
            ..repo.into_flags()
        }
    }
}

/// Rewrite single-dash long flags (`-owner x`, `-owner=x`) to the
/// double-dash form clap expects.
///
/// Every flag takes a value, so the token after a flag without `=` is passed
/// through untouched even if it spells a flag name. Everything after `--` is
/// left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    let mut value_next = false;
    args.into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            if passthrough {
                return arg;
            }
            if value_next {
                value_next = false;
                return arg;
            }
            let Some(s) = arg.to_str() else {
                return arg;
            };
            if s == "--" {
                passthrough = true;
                return arg;
            }
            match parse_flag(s) {
                Some(flag) => {
                    value_next = !flag.inline_value;
                    if flag.single_dash {
                        OsString::from(format!("-{s}"))
                    } else {
                        arg
                    }
                }
                None => arg,
            }
        })
        .collect()
}

/// A recognized flag token.
struct FlagToken {
    single_dash: bool,
    /// Written as `-flag=value`.
    inline_value: bool,
}

fn parse_flag(arg: &str) -> Option<FlagToken> {
    let (rest, single_dash) = match arg.strip_prefix("--") {
        Some(rest) => (rest, false),
        None => (arg.strip_prefix('-')?, true),
    };
    let (name, inline_value) = rest
        .split_once('=')
        .map_or((rest, false), |(name, _)| (name, true));

    SINGLE_DASH_FLAGS.contains(&name).then_some(FlagToken {
        single_dash,
        inline_value,
    })
}

/// Report a clap parse failure and return the exit code.
///
/// `--help` and `--version` are not failures; everything else, including an
/// invalid `-state`, exits 1.
pub fn report_parse_error(e: &clap::Error) -> i32 {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = e.print();
            0
        }
        kind => {
            let rendered = e.to_string();
            let first = rendered.lines().next().unwrap_or_default();
            output::error(first.strip_prefix("error: ").unwrap_or(first));
            if kind == ErrorKind::InvalidSubcommand {
                output::usage(1)
            } else {
                1
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        let mut argv = vec!["github-status"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(normalize_args(argv))
    }

    #[test]
    fn test_normalize_single_dash_flags() {
        let args = normalize_args([
            "github-status",
            "create",
            "-owner",
            "acme",
            "-repo=widget",
            "-desc",
            "-ready",
            "--context",
            "ci",
            "-x",
            "--",
            "-url",
        ]);
        let args: Vec<&str> = args.iter().map(|a| a.to_str().unwrap()).collect();
        assert_eq!(
            args,
            [
                "github-status",
                "create",
                "--owner",
                "acme",
                "--repo=widget",
                "--desc",
                "-ready",
                "--context",
                "ci",
                "-x",
                "--",
                "-url",
            ]
        );
    }

    #[test]
    fn test_normalize_leaves_flag_values_alone() {
        let args = normalize_args(["-desc", "-url", "--context", "-owner", "-repo=x", "-state"]);
        let args: Vec<&str> = args.iter().map(|a| a.to_str().unwrap()).collect();
        assert_eq!(
            args,
            ["--desc", "-url", "--context", "-owner", "--repo=x", "--state"]
        );
    }

    #[test]
    fn test_value_spelling_a_flag_name_is_kept() {
        let cli = parse(&[
            "create", "1234", "-owner", "acme", "-repo", "widget", "-state", "success", "-desc",
            "-url", "-context", "ci",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Create { repo, status, .. }) => {
                let flags = status.into_flags(repo);
                assert_eq!(flags.description.as_deref(), Some("-url"));
                assert_eq!(flags.target_url, None);
                assert_eq!(flags.context.as_deref(), Some("ci"));
            }
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn test_parse_get() {
        let cli = parse(&["get", "1236", "-owner", "acme", "-repo", "widget"]).unwrap();
        match cli.command {
            Some(Commands::Get { identifier, repo }) => {
                assert_eq!(identifier.as_deref(), Some("1236"));
                let flags = repo.into_flags();
                assert_eq!(flags.owner.as_deref(), Some("acme"));
                assert_eq!(flags.repo.as_deref(), Some("widget"));
            }
            _ => panic!("expected get"),
        }
    }

    #[test]
    fn test_parse_create() {
        let cli = parse(&[
            "create", "1234", "-owner", "acme", "-repo", "widget", "-state", "success", "-desc",
            "Good Job", "-context", "ci", "-url", "http://x",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Create {
                identifier,
                repo,
                status,
            }) => {
                assert_eq!(identifier.as_deref(), Some("1234"));
                let flags = status.into_flags(repo);
                assert_eq!(flags.state, Some(StatusState::Success));
                assert_eq!(flags.description.as_deref(), Some("Good Job"));
                assert_eq!(flags.context.as_deref(), Some("ci"));
                assert_eq!(flags.target_url.as_deref(), Some("http://x"));
                assert_eq!(flags.owner.as_deref(), Some("acme"));
            }
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn test_invalid_state_rejected_at_parse_time() {
        let err = parse(&["create", "1234", "-state", "bogus"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_missing_flags_parse_fine() {
        let cli = parse(&["create", "1234"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Create { .. })));
    }

    #[test]
    fn test_unknown_command() {
        let err = parse(&["delete", "1234"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn test_help_and_no_command() {
        assert!(matches!(parse(&["help"]).unwrap().command, Some(Commands::Help)));
        assert!(parse(&[]).unwrap().command.is_none());
    }

    #[test]
    fn test_get_rejects_create_flags() {
        assert!(parse(&["get", "1", "-state", "success"]).is_err());
    }
}
