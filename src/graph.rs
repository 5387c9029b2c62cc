//! In-memory dependency graph built from `brew graph` edges.
//!
//! The graph is stored twice: forward (`depends_on`) and transposed
//! (`depended_on_by`). Both maps are only ever written together by
//! [`DependencyGraph::add_edge`], so each one is exactly the transpose of the
//! other. Duplicate edges are kept as duplicates.

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    depends_on: HashMap<String, Vec<String>>,
    depended_on_by: HashMap<String, Vec<String>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(dependent, dependency)` pairs
    pub fn from_edges<I, A, B>(edges: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        let mut graph = Self::new();
        for (dependent, dependency) in edges {
            graph.add_edge(dependent, dependency);
        }
        graph
    }

    /// Record that `dependent` depends on `dependency`
    pub fn add_edge(&mut self, dependent: impl Into<String>, dependency: impl Into<String>) {
        let dependent = dependent.into();
        let dependency = dependency.into();
        self.depended_on_by
            .entry(dependency.clone())
            .or_default()
            .push(dependent.clone());
        self.depends_on.entry(dependent).or_default().push(dependency);
    }

    /// Direct dependencies of `name` (empty if unknown)
    pub fn depends_on(&self, name: &str) -> &[String] {
        self.depends_on.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Direct dependents of `name` (empty if unknown)
    pub fn depended_on_by(&self, name: &str) -> &[String] {
        self.depended_on_by
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of recorded edges, duplicates included
    pub fn edge_count(&self) -> usize {
        self.depends_on.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.depends_on.is_empty()
    }
}
