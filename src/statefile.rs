//! Desired-state files (Tapfile, Brewfile)
//!
//! Both files are plain whitespace-separated name lists with no comments or
//! structure. A missing file is a normal first-run condition and reads as an
//! empty list.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// The user's declared taps and formulae, read once per session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesiredState {
    pub taps: Vec<String>,
    pub brews: Vec<String>,
}

impl DesiredState {
    pub fn load(tapfile: &Path, brewfile: &Path) -> Self {
        Self {
            taps: read_names(tapfile),
            brews: read_names(brewfile),
        }
    }
}

/// Read the names listed in a desired-state file, in file order.
///
/// Duplicates are dropped (first occurrence wins). Missing or unreadable files
/// yield an empty list.
pub fn read_names(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            let names = split_names(&contents);
            debug!(path = %path.display(), count = names.len(), "read desired state");
            names
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "desired state unavailable, using empty list");
            Vec::new()
        }
    }
}

/// Split whitespace-delimited text into unique names, keeping first-seen order
pub fn split_names(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.split_whitespace()
        .filter(|token| seen.insert(*token))
        .map(String::from)
        .collect()
}
