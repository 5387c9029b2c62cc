//! One complete run: read desired state, probe Homebrew, ask, then act.

use crate::config::Config;
use crate::error::Result;
use crate::graph::DependencyGraph;
use crate::plan::{self, Outcome};
use crate::probe::{CommandRunner, LiveState};
use crate::reconcile::Reconciler;
use crate::statefile::DesiredState;
use std::io::{BufRead, Write};
use tracing::debug;

/// Run the whole interactive session.
///
/// Probe failures abort before any question is asked. Unless `dry_run` is
/// set, a non-empty plan replaces the current process and this does not
/// return.
pub fn run<R: BufRead, W: Write>(
    config: &Config,
    runner: &impl CommandRunner,
    input: R,
    output: W,
    dry_run: bool,
) -> Result<Outcome> {
    let desired = DesiredState::load(&config.tapfile, &config.brewfile);
    let live = LiveState::probe(runner)?;
    let graph = DependencyGraph::from_edges(live.edges.iter().cloned());
    debug!(
        desired_taps = desired.taps.len(),
        desired_brews = desired.brews.len(),
        edges = graph.edge_count(),
        "starting reconciliation"
    );
    if graph.is_empty() {
        debug!("no dependency edges reported, prompts will carry no dependency notes");
    }

    let mut reconciler = Reconciler::new(input, output);
    let action_plan = reconciler.run(&desired, &live, &graph)?;
    let mut output = reconciler.into_output();
    plan::execute(action_plan, &config.brew_bin, dry_run, &mut output)
}
