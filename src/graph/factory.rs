//! Graph construction configuration.
//!
//! A [`GraphFactory`] fixes the capabilities of the graphs it creates and
//! chooses their adjacency backend, either explicitly or from workload hints.
//! It is plain data and (de)serializes with serde, so a configuration can be
//! loaded from any serde format.

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};
use crate::graph::basic::{ArrayGraph, HashmapGraph, LinkedGraph, MatrixGraph};
use crate::graph::builder::IndexGraphBuilder;
use crate::graph::capabilities::Capabilities;
use crate::graph::compressed::CsrOptions;
use crate::graph::traits::{IndexGraph, IndexGraphMut};

/// The mutable adjacency backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphImpl {
    /// Per-vertex growable edge arrays. The general-purpose default.
    Array,
    /// Intrusive doubly-linked incidence lists, for deletion-heavy workloads.
    Linked,
    /// Per-vertex neighbor hash maps, for lookup-heavy workloads without parallel edges.
    Hashmap,
    /// Dense adjacency matrix, for small or dense graphs without parallel edges.
    Matrix,
}

impl GraphImpl {
    /// Whether the backend can hold parallel edges.
    pub const fn supports_parallel_edges(self) -> bool {
        matches!(self, GraphImpl::Array | GraphImpl::Linked)
    }
}

/// Workload hints that steer backend selection when no backend is chosen explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphHint {
    /// Edges are removed often.
    FastEdgeRemoval,
    /// `get_edge` is on the hot path.
    FastEdgeLookup,
    /// The graph is small or has close to `n²` edges.
    DenseGraph,
}

/// Creates mutable graphs and builders with one fixed configuration.
///
/// Backend selection order: the explicit implementation if set; otherwise
/// [`GraphHint::DenseGraph`] picks the matrix and [`GraphHint::FastEdgeLookup`]
/// the hashmap backend (both only when parallel edges are not allowed),
/// [`GraphHint::FastEdgeRemoval`] picks linked lists, and everything else gets arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphFactory {
    directed: bool,
    self_edges: bool,
    parallel_edges: bool,
    implementation: Option<GraphImpl>,
    hints: Vec<GraphHint>,
    expected_vertices: usize,
    expected_edges: usize,
    csr: CsrOptions,
}

impl Default for GraphFactory {
    fn default() -> Self {
        Self::with_capabilities(Capabilities::directed())
    }
}

impl GraphFactory {
    /// A factory for directed graphs with default capabilities.
    pub fn directed() -> Self {
        Self::with_capabilities(Capabilities::directed())
    }

    /// A factory for undirected graphs with default capabilities.
    pub fn undirected() -> Self {
        Self::with_capabilities(Capabilities::undirected())
    }

    /// A factory for graphs with exactly these capabilities.
    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        Self {
            directed: capabilities.directed,
            self_edges: capabilities.self_edges,
            parallel_edges: capabilities.parallel_edges,
            implementation: None,
            hints: Vec::new(),
            expected_vertices: 0,
            expected_edges: 0,
            csr: CsrOptions::default(),
        }
    }

    /// Allows or forbids self edges.
    #[must_use]
    pub fn allow_self_edges(mut self, allow: bool) -> Self {
        self.self_edges = allow;
        self
    }

    /// Allows or forbids parallel edges.
    #[must_use]
    pub fn allow_parallel_edges(mut self, allow: bool) -> Self {
        self.parallel_edges = allow;
        self
    }

    /// Selects the backend explicitly, overriding hints.
    #[must_use]
    pub fn with_impl(mut self, implementation: GraphImpl) -> Self {
        self.implementation = Some(implementation);
        self
    }

    /// Adds a workload hint.
    #[must_use]
    pub fn with_hint(mut self, hint: GraphHint) -> Self {
        if !self.hints.contains(&hint) {
            self.hints.push(hint);
        }
        self
    }

    /// Reserves room for this many vertices in new graphs.
    #[must_use]
    pub fn expected_vertices(mut self, count: usize) -> Self {
        self.expected_vertices = count;
        self
    }

    /// Reserves room for this many edges in new graphs.
    #[must_use]
    pub fn expected_edges(mut self, count: usize) -> Self {
        self.expected_edges = count;
        self
    }

    /// Options for the CSR graphs produced by builders of this factory.
    #[must_use]
    pub fn csr_options(mut self, options: CsrOptions) -> Self {
        self.csr = options;
        self
    }

    /// The capabilities of every graph this factory creates.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::new(self.directed, self.self_edges, self.parallel_edges)
    }

    /// The configured CSR options.
    pub fn csr(&self) -> CsrOptions {
        self.csr
    }

    fn has_hint(&self, hint: GraphHint) -> bool {
        self.hints.contains(&hint)
    }

    /// The backend new mutable graphs will use.
    ///
    /// Fails with [`GraphError::UnsupportedCapabilities`] if the explicit
    /// backend cannot hold parallel edges but they are allowed.
    pub fn selected_impl(&self) -> GraphResult<GraphImpl> {
        if let Some(implementation) = self.implementation {
            if self.parallel_edges && !implementation.supports_parallel_edges() {
                return Err(GraphError::UnsupportedCapabilities(format!(
                    "{implementation:?} backend cannot hold parallel edges"
                )));
            }
            return Ok(implementation);
        }
        let selected = if !self.parallel_edges && self.has_hint(GraphHint::DenseGraph) {
            GraphImpl::Matrix
        } else if !self.parallel_edges && self.has_hint(GraphHint::FastEdgeLookup) {
            GraphImpl::Hashmap
        } else if self.has_hint(GraphHint::FastEdgeRemoval) {
            GraphImpl::Linked
        } else {
            GraphImpl::Array
        };
        Ok(selected)
    }

    /// Creates an empty mutable graph.
    pub fn new_graph(&self) -> GraphResult<Box<dyn IndexGraphMut>> {
        let implementation = self.selected_impl()?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            backend = ?implementation,
            directed = self.directed,
            expected_vertices = self.expected_vertices,
            expected_edges = self.expected_edges,
            "creating mutable graph"
        );
        let (caps, n, m) = (self.capabilities(), self.expected_vertices, self.expected_edges);
        Ok(match implementation {
            GraphImpl::Array => Box::new(ArrayGraph::with_capacity(caps, n, m)),
            GraphImpl::Linked => Box::new(LinkedGraph::with_capacity(caps, n, m)),
            GraphImpl::Hashmap => Box::new(HashmapGraph::with_capacity(caps, n, m)),
            GraphImpl::Matrix => Box::new(MatrixGraph::with_capacity(caps, n, m)),
        })
    }

    /// Creates an empty builder whose graphs follow this configuration.
    pub fn new_builder(&self) -> IndexGraphBuilder {
        IndexGraphBuilder::with_factory(self.clone())
    }

    /// Copies `graph` into a new mutable graph of the configured backend.
    ///
    /// Vertex and edge indices are preserved. Weight columns are copied when
    /// `copy_weights` is set. The copy is validated against this factory's
    /// capabilities, which may be stricter than those of `graph`.
    pub fn new_copy_of<G: IndexGraph + ?Sized>(
        &self,
        graph: &G,
        copy_weights: bool,
    ) -> GraphResult<Box<dyn IndexGraphMut>> {
        if graph.is_directed() != self.directed {
            return Err(GraphError::UnsupportedCapabilities(format!(
                "cannot copy a {} graph with a {} factory",
                direction(graph.is_directed()),
                direction(self.directed)
            )));
        }
        let factory = self
            .clone()
            .expected_vertices(graph.vertex_count().max(self.expected_vertices))
            .expected_edges(graph.edge_count().max(self.expected_edges));
        let mut copy = factory.new_graph()?;
        copy.add_vertices(graph.vertex_count())?;
        let ends = graph.endpoints();
        let edges: Vec<(usize, usize)> = graph
            .edges()
            .map(|e| (ends.source(e), ends.target(e)))
            .collect();
        copy.add_edges(&edges)?;
        if copy_weights {
            graph
                .vertex_space()
                .copy_columns_into(copy.vertex_space_mut()?)?;
            graph.edge_space().copy_columns_into(copy.edge_space_mut()?)?;
        }
        Ok(copy)
    }
}

fn direction(directed: bool) -> &'static str {
    if directed {
        "directed"
    } else {
        "undirected"
    }
}
