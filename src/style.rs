//! Terminal colours for headers and dependency notes
//!
//! Honours `NO_COLOR` (https://no-color.org/), `CLICOLOR=0` and
//! `CLICOLOR_FORCE`. Otherwise colour follows whether stdout is a terminal.

use colored::{ColoredString, Colorize, control};
use std::io::IsTerminal;

/// Decide whether output should be coloured from the given environment
pub fn colors_enabled(var: impl Fn(&str) -> Option<String>, is_tty: bool) -> bool {
    if var("NO_COLOR").is_some() {
        return false;
    }
    if var("CLICOLOR_FORCE").is_some_and(|v| v != "0") {
        return true;
    }
    if var("CLICOLOR").is_some_and(|v| v == "0") {
        return false;
    }
    is_tty
}

/// Apply the colour decision for the whole process. Call once from `main`.
pub fn init_colors() {
    let enabled = colors_enabled(|key| std::env::var(key).ok(), std::io::stdout().is_terminal());
    control::set_override(enabled);
}

/// `** Possibly new brews **`
pub fn header(title: &str) -> ColoredString {
    format!("** {} **", title).bold().green()
}

/// `  wget is dependent on openssl@3, libidn2`
pub fn relation(name: &str, relation: &str, others: &[String]) -> String {
    format!("  {} {} {}", name.bold(), relation.dimmed(), others.join(", ").cyan())
}
