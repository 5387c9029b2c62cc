//! Live state probes - asking `brew` what is tapped, installed, and depended on
//!
//! Every probe shells out through a [`CommandRunner`]. Any failure to run the
//! binary or a non-zero exit aborts the whole session: reconciling against a
//! partial snapshot could propose removing things that are actually wanted.

use crate::error::{GuzzleError, Result};
use crate::statefile::split_names;
use regex::Regex;
use std::path::PathBuf;
use std::process::Command;
use std::sync::LazyLock;
use tracing::{debug, trace};

/// Matches one edge of `brew graph` dot output: `"wget" -> "openssl@3"`
static EDGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*"([^"]+)"\s*->\s*"([^"]+)""#).expect("edge pattern is valid")
});

/// Something that can run `brew <args>` and hand back its stdout
pub trait CommandRunner {
    fn capture(&self, args: &[&str]) -> Result<String>;
}

/// Runs the real `brew` executable
#[derive(Debug, Clone)]
pub struct BrewRunner {
    bin: PathBuf,
}

impl BrewRunner {
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }
}

impl CommandRunner for BrewRunner {
    fn capture(&self, args: &[&str]) -> Result<String> {
        let command = format!("{} {}", self.bin.display(), args.join(" "));
        debug!(%command, "probing");

        let output = Command::new(&self.bin)
            .args(args)
            .output()
            .map_err(|source| GuzzleError::ProbeUnavailable {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GuzzleError::ProbeFailed {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// A `(dependent, dependency)` pair: the first name depends on the second
pub type Edge = (String, String);

/// Currently tapped repositories (`brew tap`)
pub fn list_taps(runner: &impl CommandRunner) -> Result<Vec<String>> {
    Ok(split_names(&runner.capture(&["tap"])?))
}

/// Currently installed formulae (`brew list`)
pub fn list_brews(runner: &impl CommandRunner) -> Result<Vec<String>> {
    Ok(split_names(&runner.capture(&["list"])?))
}

/// Dependency edges reported by `brew graph`
pub fn graph_edges(runner: &impl CommandRunner) -> Result<Vec<Edge>> {
    Ok(parse_graph_edges(&runner.capture(&["graph"])?))
}

/// Extract edges from dot-style graph output, skipping lines that are not edges
pub fn parse_graph_edges(output: &str) -> Vec<Edge> {
    output
        .lines()
        .filter_map(|line| match EDGE_REGEX.captures(line) {
            Some(caps) => Some((caps[1].to_string(), caps[2].to_string())),
            None => {
                trace!(line, "skipping non-edge graph line");
                None
            }
        })
        .collect()
}

/// One consistent snapshot of what Homebrew reports right now
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveState {
    pub taps: Vec<String>,
    pub brews: Vec<String>,
    pub edges: Vec<Edge>,
}

impl LiveState {
    /// Take the snapshot. Nothing is re-probed later in the session.
    pub fn probe(runner: &impl CommandRunner) -> Result<Self> {
        let taps = list_taps(runner)?;
        let brews = list_brews(runner)?;
        let edges = graph_edges(runner)?;
        debug!(
            taps = taps.len(),
            brews = brews.len(),
            edges = edges.len(),
            "captured live state"
        );
        Ok(Self { taps, brews, edges })
    }
}
