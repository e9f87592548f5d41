//! Error types for configuration and validation.

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised before any network activity.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The access token environment variable is unset or empty.
    #[error("{0} is not set")]
    MissingToken(&'static str),

    /// The PR/SHA argument or required flags were not supplied. Every
    /// missing argument is listed, by its command-line spelling.
    #[error("missing required {} ({} missing)", list_arguments(.0), .0.len())]
    MissingArguments(Vec<&'static str>),
}

fn list_arguments(names: &[&'static str]) -> String {
    let noun = if names.len() == 1 { "argument" } else { "arguments" };
    format!("{noun}: {}", names.join(", "))
}
