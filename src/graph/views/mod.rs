//! Non-owning projections of a live backing graph.
//!
//! - [`ImmutableView`] forwards every read and rejects every write.
//! - [`ReversedView`] swaps the roles of source and target; writes go through
//!   to the backing graph with their endpoints swapped.
//!
//! Neither view copies data. Both borrow (or hold a smart pointer to) the
//! backing graph, so anything visible through one side is visible through the other.

use core::ops::{Deref, DerefMut, Range};

use crate::error::{GraphError, GraphResult};
use crate::graph::capabilities::Capabilities;
use crate::graph::edge_iter::{EdgeSet, Endpoints};
use crate::graph::index::IndexSpace;
use crate::graph::traits::{IndexGraph, IndexGraphMut};


/// A read-only view of a graph.
pub struct ImmutableView<'a, G: ?Sized> {
    graph: &'a G,
}

impl<'a, G: ?Sized> ImmutableView<'a, G> {
    /// Wraps `graph`.
    pub fn new(graph: &'a G) -> Self {
        Self { graph }
    }

    /// The backing graph.
    pub fn graph(&self) -> &'a G {
        self.graph
    }

    /// An immutable view of an immutable view is the view itself.
    pub fn immutable_view(&self) -> &Self {
        self
    }
}

impl<G: ?Sized> Clone for ImmutableView<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: ?Sized> Copy for ImmutableView<'_, G> {}

impl<G: IndexGraph + ?Sized> core::fmt::Debug for ImmutableView<'_, G> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ImmutableView")
            .field("vertices", &self.graph.vertex_count())
            .field("edges", &self.graph.edge_count())
            .finish()
    }
}

impl<G: IndexGraph + ?Sized> IndexGraph for ImmutableView<'_, G> {
    fn capabilities(&self) -> Capabilities {
        self.graph.capabilities()
    }

    fn vertex_space(&self) -> &IndexSpace {
        self.graph.vertex_space()
    }

    fn edge_space(&self) -> &IndexSpace {
        self.graph.edge_space()
    }

    fn endpoints(&self) -> Endpoints<'_> {
        self.graph.endpoints()
    }

    fn out_edges(&self, source: usize) -> EdgeSet<'_> {
        self.graph.out_edges(source)
    }

    fn in_edges(&self, target: usize) -> EdgeSet<'_> {
        self.graph.in_edges(target)
    }

    fn get_edge(&self, source: usize, target: usize) -> Option<usize> {
        self.graph.get_edge(source, target)
    }

    fn get_edges(&self, source: usize, target: usize) -> EdgeSet<'_> {
        self.graph.get_edges(source, target)
    }

    fn out_degree(&self, v: usize) -> usize {
        self.graph.out_degree(v)
    }

    fn in_degree(&self, v: usize) -> usize {
        self.graph.in_degree(v)
    }
}

impl<G: IndexGraph + ?Sized> IndexGraphMut for ImmutableView<'_, G> {
    fn add_vertex(&mut self) -> GraphResult<usize> {
        Err(GraphError::ImmutableGraph)
    }

    fn add_vertices(&mut self, _count: usize) -> GraphResult<Range<usize>> {
        Err(GraphError::ImmutableGraph)
    }

    fn remove_vertex(&mut self, _vertex: usize) -> GraphResult<()> {
        Err(GraphError::ImmutableGraph)
    }

    fn add_edge(&mut self, _source: usize, _target: usize) -> GraphResult<usize> {
        Err(GraphError::ImmutableGraph)
    }

    fn add_edges(&mut self, _edges: &[(usize, usize)]) -> GraphResult<Range<usize>> {
        Err(GraphError::ImmutableGraph)
    }

    fn remove_edge(&mut self, _edge: usize) -> GraphResult<()> {
        Err(GraphError::ImmutableGraph)
    }

    fn remove_edges_of(&mut self, _vertex: usize) -> GraphResult<()> {
        Err(GraphError::ImmutableGraph)
    }

    fn remove_out_edges_of(&mut self, _source: usize) -> GraphResult<()> {
        Err(GraphError::ImmutableGraph)
    }

    fn remove_in_edges_of(&mut self, _target: usize) -> GraphResult<()> {
        Err(GraphError::ImmutableGraph)
    }

    fn reverse_edge(&mut self, _edge: usize) -> GraphResult<()> {
        Err(GraphError::ImmutableGraph)
    }

    fn clear_edges(&mut self) -> GraphResult<()> {
        Err(GraphError::ImmutableGraph)
    }

    fn clear(&mut self) -> GraphResult<()> {
        Err(GraphError::ImmutableGraph)
    }

    fn vertex_space_mut(&mut self) -> GraphResult<&mut IndexSpace> {
        Err(GraphError::ImmutableGraph)
    }

    fn edge_space_mut(&mut self) -> GraphResult<&mut IndexSpace> {
        Err(GraphError::ImmutableGraph)
    }
}

/// A view of a graph with every edge reversed.
///
/// `G` is any pointer to the backing graph: `&G`, `&mut G` or `Box<G>`. The view
/// is writable when `G` gives mutable access.
#[derive(Debug)]
pub struct ReversedView<G> {
    graph: G,
}

impl<G> ReversedView<G> {
    /// Wraps `graph`.
    pub fn new(graph: G) -> Self {
        Self { graph }
    }

    /// Unwraps the backing graph pointer.
    pub fn into_inner(self) -> G {
        self.graph
    }
}

impl<G: Deref> ReversedView<G> {
    /// The backing graph.
    pub fn graph(&self) -> &G::Target {
        &self.graph
    }
}

impl<G: Deref> IndexGraph for ReversedView<G>
where
    G::Target: IndexGraph,
{
    fn capabilities(&self) -> Capabilities {
        self.graph.capabilities()
    }

    fn vertex_space(&self) -> &IndexSpace {
        self.graph.vertex_space()
    }

    fn edge_space(&self) -> &IndexSpace {
        self.graph.edge_space()
    }

    fn endpoints(&self) -> Endpoints<'_> {
        self.graph.endpoints().reversed()
    }

    fn out_edges(&self, source: usize) -> EdgeSet<'_> {
        self.graph.in_edges(source).reversed()
    }

    fn in_edges(&self, target: usize) -> EdgeSet<'_> {
        self.graph.out_edges(target).reversed()
    }

    fn get_edge(&self, source: usize, target: usize) -> Option<usize> {
        self.graph.get_edge(target, source)
    }

    fn get_edges(&self, source: usize, target: usize) -> EdgeSet<'_> {
        self.graph.get_edges(target, source).reversed()
    }

    fn out_degree(&self, v: usize) -> usize {
        self.graph.in_degree(v)
    }

    fn in_degree(&self, v: usize) -> usize {
        self.graph.out_degree(v)
    }
}

impl<G: DerefMut> IndexGraphMut for ReversedView<G>
where
    G::Target: IndexGraphMut,
{
    fn add_vertex(&mut self) -> GraphResult<usize> {
        self.graph.add_vertex()
    }

    fn add_vertices(&mut self, count: usize) -> GraphResult<Range<usize>> {
        self.graph.add_vertices(count)
    }

    fn remove_vertex(&mut self, vertex: usize) -> GraphResult<()> {
        self.graph.remove_vertex(vertex)
    }

    fn add_edge(&mut self, source: usize, target: usize) -> GraphResult<usize> {
        self.graph.add_edge(target, source)
    }

    fn add_edges(&mut self, edges: &[(usize, usize)]) -> GraphResult<Range<usize>> {
        let swapped: Vec<(usize, usize)> = edges.iter().map(|&(u, v)| (v, u)).collect();
        self.graph.add_edges(&swapped)
    }

    fn remove_edge(&mut self, edge: usize) -> GraphResult<()> {
        self.graph.remove_edge(edge)
    }

    fn remove_edges_of(&mut self, vertex: usize) -> GraphResult<()> {
        self.graph.remove_edges_of(vertex)
    }

    fn remove_out_edges_of(&mut self, source: usize) -> GraphResult<()> {
        self.graph.remove_in_edges_of(source)
    }

    fn remove_in_edges_of(&mut self, target: usize) -> GraphResult<()> {
        self.graph.remove_out_edges_of(target)
    }

    fn reverse_edge(&mut self, edge: usize) -> GraphResult<()> {
        self.graph.reverse_edge(edge)
    }

    fn clear_edges(&mut self) -> GraphResult<()> {
        self.graph.clear_edges()
    }

    fn clear(&mut self) -> GraphResult<()> {
        self.graph.clear()
    }

    fn vertex_space_mut(&mut self) -> GraphResult<&mut IndexSpace> {
        self.graph.vertex_space_mut()
    }

    fn edge_space_mut(&mut self) -> GraphResult<&mut IndexSpace> {
        self.graph.edge_space_mut()
    }
}
