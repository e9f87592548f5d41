//! Diagnostic logging, enabled by `DEBUG`.

use tracing_subscriber::EnvFilter;

/// Crates whose diagnostics are shown at DEBUG level.
const DEBUG_DIRECTIVES: &str =
    "warn,github_status=debug,ghstatus_core=debug,ghstatus_git=debug,ghstatus_github=debug";

/// Install a stderr subscriber when `debug` is set.
/// Without it, `tracing` events are discarded.
pub fn init(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(DEBUG_DIRECTIVES))
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }
}
