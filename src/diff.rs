//! Desired vs. live state differences
//!
//! Taps are a plain two-way set difference. Formulae additionally drop "new"
//! entries that another new formula will pull in as a dependency anyway, so
//! the user isn't asked to install something twice.

use crate::graph::DependencyGraph;
use crate::probe::LiveState;
use crate::statefile::DesiredState;
use std::collections::HashSet;

/// Elements of `a` not present in `b`, in `a`'s order
pub fn difference(a: &[String], b: &[String]) -> Vec<String> {
    let exclude: HashSet<&str> = b.iter().map(String::as_str).collect();
    a.iter()
        .filter(|name| !exclude.contains(name.as_str()))
        .cloned()
        .collect()
}

/// Drop candidates that are direct dependencies of another surviving candidate.
///
/// Single pass in candidate order: each candidate still present removes its
/// own direct dependencies from the result. A candidate that was already
/// removed contributes nothing, so for `a -> b -> c` the order `[a, b, c]`
/// keeps `c` (b was gone before its turn) while `[b, a, c]` keeps only `a`.
/// Dependencies of dependencies are not followed.
pub fn suppress_dependencies(candidates: &[String], graph: &DependencyGraph) -> Vec<String> {
    let mut result = candidates.to_vec();
    for name in candidates {
        if !result.contains(name) {
            continue;
        }
        let deps = graph.depends_on(name);
        result.retain(|other| other == name || !deps.contains(other));
    }
    result
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TapDiff {
    /// Listed in the Tapfile but not tapped
    pub new: Vec<String>,
    /// Tapped but not listed in the Tapfile
    pub removed: Vec<String>,
}

impl TapDiff {
    pub fn compute(desired: &[String], live: &[String]) -> Self {
        Self {
            new: difference(desired, live),
            removed: difference(live, desired),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrewDiff {
    /// Listed in the Brewfile, not installed, and not implied by another new formula
    pub new: Vec<String>,
    /// Installed but not listed in the Brewfile
    pub missing: Vec<String>,
}

impl BrewDiff {
    pub fn compute(desired: &[String], live: &[String], graph: &DependencyGraph) -> Self {
        Self {
            new: suppress_dependencies(&difference(desired, live), graph),
            missing: difference(live, desired),
        }
    }
}

/// Everything the reconciler needs to walk, derived from one snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff {
    pub taps: TapDiff,
    pub brews: BrewDiff,
}

impl Diff {
    pub fn compute(desired: &DesiredState, live: &LiveState, graph: &DependencyGraph) -> Self {
        Self {
            taps: TapDiff::compute(&desired.taps, &live.taps),
            brews: BrewDiff::compute(&desired.brews, &live.brews, graph),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.taps.new.is_empty()
            && self.taps.removed.is_empty()
            && self.brews.new.is_empty()
            && self.brews.missing.is_empty()
    }
}

/// Advisory dependency context shown before a formula prompt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    pub depends_on: Vec<String>,
    pub depended_on_by: Vec<String>,
}

impl Annotation {
    /// Relations of `name` restricted to formulae that are wanted or installed.
    ///
    /// Repeated edges are reported once.
    pub fn for_brew(name: &str, graph: &DependencyGraph, inclusive: &HashSet<&str>) -> Self {
        Self {
            depends_on: relevant(graph.depends_on(name), inclusive),
            depended_on_by: relevant(graph.depended_on_by(name), inclusive),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.depends_on.is_empty() && self.depended_on_by.is_empty()
    }
}

/// Union of desired and installed formula names
pub fn inclusive_brews<'a>(desired: &'a [String], live: &'a [String]) -> HashSet<&'a str> {
    desired.iter().chain(live).map(String::as_str).collect()
}

fn relevant(names: &[String], inclusive: &HashSet<&str>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .filter(|n| inclusive.contains(n.as_str()))
        .filter(|n| seen.insert(*n))
        .cloned()
        .collect()
}
