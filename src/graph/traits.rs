//! The read and write interfaces every graph representation implements.
//!
//! Algorithms are written against [`IndexGraph`] only and never learn which
//! backend sits underneath. Vertices and edges are dense indices in
//! `0..vertex_count()` and `0..edge_count()`.

use core::ops::Range;

use crate::error::GraphResult;
use crate::graph::capabilities::Capabilities;
use crate::graph::edge_iter::{EdgeSet, Endpoints};
use crate::graph::index::IndexSpace;
use crate::graph::views::{ImmutableView, ReversedView};

/// Read access to an index graph.
///
/// Query methods take indices that must be live; out-of-range indices panic,
/// as slice indexing does.
pub trait IndexGraph {
    /// Directedness and accepted edge kinds.
    fn capabilities(&self) -> Capabilities;

    /// The vertex index space, including its weight columns.
    fn vertex_space(&self) -> &IndexSpace;

    /// The edge index space, including its weight columns.
    fn edge_space(&self) -> &IndexSpace;

    /// Endpoint columns of every edge.
    fn endpoints(&self) -> Endpoints<'_>;

    /// Edges leaving `source` (all incident edges for undirected graphs).
    ///
    /// # Panics
    /// Panics if `source` is not a vertex.
    fn out_edges(&self, source: usize) -> EdgeSet<'_>;

    /// Edges entering `target` (all incident edges for undirected graphs).
    ///
    /// # Panics
    /// Panics if `target` is not a vertex.
    fn in_edges(&self, target: usize) -> EdgeSet<'_>;

    /// Some edge from `source` to `target`, if one exists.
    ///
    /// # Panics
    /// Panics if either endpoint is not a vertex.
    fn get_edge(&self, source: usize, target: usize) -> Option<usize>;

    /// Every edge from `source` to `target`.
    ///
    /// # Panics
    /// Panics if either endpoint is not a vertex.
    fn get_edges(&self, source: usize, target: usize) -> EdgeSet<'_>;

    /// Returns `true` if edges have a distinguished source and target.
    #[inline]
    fn is_directed(&self) -> bool {
        self.capabilities().directed
    }

    /// Number of vertices.
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertex_space().len()
    }

    /// Number of edges.
    #[inline]
    fn edge_count(&self) -> usize {
        self.edge_space().len()
    }

    /// The vertex set, always `0..vertex_count()`.
    #[inline]
    fn vertices(&self) -> Range<usize> {
        self.vertex_space().indices()
    }

    /// The edge set, always `0..edge_count()`.
    #[inline]
    fn edges(&self) -> Range<usize> {
        self.edge_space().indices()
    }

    /// Source of `edge`.
    ///
    /// # Panics
    /// Panics if `edge` is not an edge.
    #[inline]
    fn edge_source(&self, edge: usize) -> usize {
        self.endpoints().source(edge)
    }

    /// Target of `edge`.
    ///
    /// # Panics
    /// Panics if `edge` is not an edge.
    #[inline]
    fn edge_target(&self, edge: usize) -> usize {
        self.endpoints().target(edge)
    }

    /// The endpoint of `edge` opposite to `endpoint`.
    ///
    /// # Panics
    /// Panics if `endpoint` is not an endpoint of `edge`.
    fn edge_endpoint(&self, edge: usize, endpoint: usize) -> usize {
        let ends = self.endpoints();
        let (s, t) = (ends.source(edge), ends.target(edge));
        if endpoint == s {
            t
        } else {
            assert!(endpoint == t, "vertex {endpoint} is not an endpoint of edge {edge}");
            s
        }
    }

    /// Number of edges leaving `v`.
    fn out_degree(&self, v: usize) -> usize {
        self.out_edges(v).len()
    }

    /// Number of edges entering `v`.
    fn in_degree(&self, v: usize) -> usize {
        self.in_edges(v).len()
    }

    /// Returns `true` if some edge goes from `source` to `target`.
    fn contains_edge(&self, source: usize, target: usize) -> bool {
        self.get_edge(source, target).is_some()
    }
}

/// Mutation of an index graph.
///
/// New indices are always the prior count. Removal swaps the last index into
/// the removed slot, so indices stay dense. Immutable graphs and views
/// implement this trait by failing every call with
/// [`GraphError::ImmutableGraph`](crate::GraphError::ImmutableGraph).
pub trait IndexGraphMut: IndexGraph {
    /// Adds a vertex and returns its index.
    fn add_vertex(&mut self) -> GraphResult<usize>;

    /// Adds `count` vertices and returns their indices.
    fn add_vertices(&mut self, count: usize) -> GraphResult<Range<usize>>;

    /// Removes `vertex` and every edge incident to it.
    ///
    /// The last vertex is relocated to `vertex` with all of its edges re-pointed.
    fn remove_vertex(&mut self, vertex: usize) -> GraphResult<()>;

    /// Adds an edge and returns its index.
    fn add_edge(&mut self, source: usize, target: usize) -> GraphResult<usize>;

    /// Adds a batch of edges. Either every edge is added or none is.
    fn add_edges(&mut self, edges: &[(usize, usize)]) -> GraphResult<Range<usize>>;

    /// Removes `edge`; the last edge is relocated to its index.
    fn remove_edge(&mut self, edge: usize) -> GraphResult<()>;

    /// Removes every edge incident to `vertex`.
    fn remove_edges_of(&mut self, vertex: usize) -> GraphResult<()>;

    /// Removes every edge leaving `source`.
    fn remove_out_edges_of(&mut self, source: usize) -> GraphResult<()>;

    /// Removes every edge entering `target`.
    fn remove_in_edges_of(&mut self, target: usize) -> GraphResult<()>;

    /// Swaps the source and target of a directed edge. No-op for undirected graphs.
    fn reverse_edge(&mut self, edge: usize) -> GraphResult<()>;

    /// Removes every edge, keeping the vertices.
    fn clear_edges(&mut self) -> GraphResult<()>;

    /// Removes every vertex and edge. Weight columns stay registered.
    fn clear(&mut self) -> GraphResult<()>;

    /// The vertex index space for registering columns and listeners.
    fn vertex_space_mut(&mut self) -> GraphResult<&mut IndexSpace>;

    /// The edge index space for registering columns and listeners.
    fn edge_space_mut(&mut self) -> GraphResult<&mut IndexSpace>;
}

/// View constructors available on every graph.
pub trait GraphViewExt: IndexGraph {
    /// A read-only view that rejects every mutation.
    fn immutable_view(&self) -> ImmutableView<'_, Self> {
        ImmutableView::new(self)
    }

    /// A live view with every edge reversed; mutations go through to `self`.
    fn reversed_view(&mut self) -> ReversedView<&mut Self> {
        ReversedView::new(self)
    }

    /// A read-only reversed view.
    fn reversed_view_ref(&self) -> ReversedView<&Self> {
        ReversedView::new(self)
    }
}

impl<G: IndexGraph + ?Sized> GraphViewExt for G {}

impl<G: IndexGraph + ?Sized> IndexGraph for Box<G> {
    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }

    fn vertex_space(&self) -> &IndexSpace {
        (**self).vertex_space()
    }

    fn edge_space(&self) -> &IndexSpace {
        (**self).edge_space()
    }

    fn endpoints(&self) -> Endpoints<'_> {
        (**self).endpoints()
    }

    fn out_edges(&self, source: usize) -> EdgeSet<'_> {
        (**self).out_edges(source)
    }

    fn in_edges(&self, target: usize) -> EdgeSet<'_> {
        (**self).in_edges(target)
    }

    fn get_edge(&self, source: usize, target: usize) -> Option<usize> {
        (**self).get_edge(source, target)
    }

    fn get_edges(&self, source: usize, target: usize) -> EdgeSet<'_> {
        (**self).get_edges(source, target)
    }

    fn out_degree(&self, v: usize) -> usize {
        (**self).out_degree(v)
    }

    fn in_degree(&self, v: usize) -> usize {
        (**self).in_degree(v)
    }
}

impl<G: IndexGraphMut + ?Sized> IndexGraphMut for Box<G> {
    fn add_vertex(&mut self) -> GraphResult<usize> {
        (**self).add_vertex()
    }

    fn add_vertices(&mut self, count: usize) -> GraphResult<Range<usize>> {
        (**self).add_vertices(count)
    }

    fn remove_vertex(&mut self, vertex: usize) -> GraphResult<()> {
        (**self).remove_vertex(vertex)
    }

    fn add_edge(&mut self, source: usize, target: usize) -> GraphResult<usize> {
        (**self).add_edge(source, target)
    }

    fn add_edges(&mut self, edges: &[(usize, usize)]) -> GraphResult<Range<usize>> {
        (**self).add_edges(edges)
    }

    fn remove_edge(&mut self, edge: usize) -> GraphResult<()> {
        (**self).remove_edge(edge)
    }

    fn remove_edges_of(&mut self, vertex: usize) -> GraphResult<()> {
        (**self).remove_edges_of(vertex)
    }

    fn remove_out_edges_of(&mut self, source: usize) -> GraphResult<()> {
        (**self).remove_out_edges_of(source)
    }

    fn remove_in_edges_of(&mut self, target: usize) -> GraphResult<()> {
        (**self).remove_in_edges_of(target)
    }

    fn reverse_edge(&mut self, edge: usize) -> GraphResult<()> {
        (**self).reverse_edge(edge)
    }

    fn clear_edges(&mut self) -> GraphResult<()> {
        (**self).clear_edges()
    }

    fn clear(&mut self) -> GraphResult<()> {
        (**self).clear()
    }

    fn vertex_space_mut(&mut self) -> GraphResult<&mut IndexSpace> {
        (**self).vertex_space_mut()
    }

    fn edge_space_mut(&mut self) -> GraphResult<&mut IndexSpace> {
        (**self).edge_space_mut()
    }
}
