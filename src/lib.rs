//! Library interface for brew-guzzle
//!
//! Reconciles a Tapfile and Brewfile against what Homebrew reports, asking
//! about each difference before building one batch `brew` command.

pub mod config;
pub mod diff;
pub mod error;
pub mod graph;
pub mod plan;
pub mod probe;
pub mod prompt;
pub mod reconcile;
pub mod session;
pub mod statefile;
pub mod style;

// Re-export commonly used types
pub use config::Config;
pub use error::{GuzzleError, Result};
pub use graph::DependencyGraph;
pub use plan::{ActionPlan, Outcome};
pub use probe::{BrewRunner, CommandRunner, LiveState};
pub use statefile::DesiredState;
