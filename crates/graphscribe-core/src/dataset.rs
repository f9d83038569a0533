//! # Dataset
//!
//! A mapping from graph name to [`Graph`] plus exactly one unnamed
//! default graph. Writing to an unseen name implicitly creates an empty
//! graph. The dataset enforces no cross-graph invariants; each contained
//! graph is independent.

use crate::graph::Graph;
use crate::types::Iri;
use std::collections::BTreeMap;

/// Named graphs plus one default graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    default: Graph,
    named: BTreeMap<Iri, Graph>,
}

impl Dataset {
    /// Create an empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The graph for `name`, created empty on first access.
    pub fn graph(&mut self, name: &Iri) -> &mut Graph {
        self.named.entry(name.clone()).or_default()
    }

    /// The graph for `name` if it exists; never creates.
    #[must_use]
    pub fn named_graph(&self, name: &Iri) -> Option<&Graph> {
        self.named.get(name)
    }

    /// The single unnamed default graph.
    #[must_use]
    pub fn default_graph(&self) -> &Graph {
        &self.default
    }

    /// Mutable access to the default graph.
    pub fn default_graph_mut(&mut self) -> &mut Graph {
        &mut self.default
    }

    /// Lazy sequence of (name, graph) pairs, excluding the default graph,
    /// in deterministic name order.
    pub fn named_graphs(&self) -> impl Iterator<Item = (&Iri, &Graph)> {
        self.named.iter()
    }

    /// Number of named graphs (the default graph is not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.named.len()
    }

    /// True if there are no named graphs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.named.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
