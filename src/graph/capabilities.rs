//! Per-instance capability flags, fixed at construction and checked on every mutation.

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};

/// Directedness and the kinds of edges a graph accepts.
///
/// Capabilities never change over the lifetime of a graph. Every edge
/// insertion is validated against them before any state is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capabilities {
    /// Whether edges have a distinguished source and target.
    pub directed: bool,
    /// Whether an edge may connect a vertex to itself.
    pub self_edges: bool,
    /// Whether more than one edge may connect the same (ordered, if directed) pair.
    pub parallel_edges: bool,
}

impl Capabilities {
    /// Creates a capability set.
    pub const fn new(directed: bool, self_edges: bool, parallel_edges: bool) -> Self {
        Self {
            directed,
            self_edges,
            parallel_edges,
        }
    }

    /// Default capabilities of a directed graph: parallel edges allowed, self edges rejected.
    pub const fn directed() -> Self {
        Self::new(true, false, true)
    }

    /// Default capabilities of an undirected graph: parallel edges allowed, self edges rejected.
    pub const fn undirected() -> Self {
        Self::new(false, false, true)
    }

    /// Validates a prospective edge `(source, target)`.
    ///
    /// `exists` is consulted only when parallel edges are forbidden, so backends
    /// without a cheap lookup pay for it only when they have to.
    pub fn check_edge(
        &self,
        source: usize,
        target: usize,
        exists: impl FnOnce() -> bool,
    ) -> GraphResult<()> {
        if source == target && !self.self_edges {
            return Err(GraphError::SelfEdgesNotSupported(source));
        }
        if !self.parallel_edges && exists() {
            return Err(GraphError::ParallelEdgesNotSupported {
                from: source,
                to: target,
            });
        }
        Ok(())
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::directed()
    }
}
