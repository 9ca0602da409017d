use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::fmt::Display;

/// Colors only for a terminal stderr, and never when `NO_COLOR` is set.
pub fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
}

/// Print a labelled warning to stderr.
pub fn warning(message: impl Display) {
    if use_color() {
        eprintln!("{} {}", "Warning:".yellow().bold(), message);
    } else {
        eprintln!("Warning: {}", message);
    }
}

/// Print a labelled per-reference error to stderr.
pub fn error(message: impl Display) {
    if use_color() {
        eprintln!("{} {}", "Error:".red().bold(), message);
    } else {
        eprintln!("Error: {}", message);
    }
}

/// Print an unlabelled note to stderr.
pub fn note(message: impl Display) {
    if use_color() {
        eprintln!("{}", message.dimmed());
    } else {
        eprintln!("{}", message);
    }
}
