//! Terminal output formatting utilities.
//!
//! Reports go to stdout; errors, info lines and usage-on-failure go to stderr.

use colored::Colorize;

use crate::commands::USAGE;

/// Print an error message (always prints to stderr).
pub fn error(msg: &str) {
    eprintln!("{} {}", "[ERROR]".red().bold(), msg);
}

/// Print an info message to stderr.
pub fn info(msg: &str) {
    eprintln!("{} {}", "[INFO]".blue(), msg);
}

/// Print report output to stdout.
pub fn essential(msg: &str) {
    println!("{msg}");
}

/// Print the usage text and hand back `code` as the exit code.
///
/// Successful help goes to stdout; every failure path goes to stderr.
pub fn usage(code: i32) -> i32 {
    if code == 0 {
        print!("{USAGE}");
    } else {
        eprint!("{USAGE}");
    }
    code
}
