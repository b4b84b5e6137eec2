//! Mutable index graphs.
//!
//! Every mutable representation is a [`MutableGraph`] over one [`Adjacency`]
//! backend. The graph owns everything the backends have in common: the
//! capability checks, the vertex and edge [`IndexSpace`]s with their weight
//! columns, and the endpoint columns `sources[e]` / `targets[e]`. A backend only
//! maintains its own incidence structure and is told exactly how to follow each
//! swap-and-remove relocation.
//!
//! | Backend | `out_edges` | `get_edge` | `remove_edge` | Parallel edges |
//! |---------|-------------|------------|---------------|----------------|
//! | [`ArrayAdjacency`] | \(O(1)\) | \(O(\deg)\) | \(O(\deg)\) | yes |
//! | [`LinkedAdjacency`] | \(O(\deg)\) | \(O(\deg)\) | \(O(1)\) | yes |
//! | [`HashmapAdjacency`] | \(O(1)\) | \(O(1)\) expected | \(O(1)\) expected | no |
//! | [`MatrixAdjacency`] | \(O(n)\) | \(O(1)\) | \(O(1)\) | no |

use core::fmt;
use core::ops::Range;
use std::collections::HashSet;

use crate::error::{GraphError, GraphResult};
use crate::graph::capabilities::Capabilities;
use crate::graph::edge_iter::{EdgeIter, EdgeQuery, EdgeSet, Endpoints, IncidentEdges, Side};
use crate::graph::index::IndexSpace;
use crate::graph::traits::{IndexGraph, IndexGraphMut};

pub mod array;
pub mod hashmap;
pub mod linked;
pub mod matrix;

pub use array::ArrayAdjacency;
pub use hashmap::HashmapAdjacency;
pub use linked::LinkedAdjacency;
pub use matrix::MatrixAdjacency;

#[cfg(test)]
mod tests;

/// Mutable graph backed by per-vertex growable edge arrays.
pub type ArrayGraph = MutableGraph<ArrayAdjacency>;
/// Mutable graph backed by intrusive doubly-linked incidence lists.
pub type LinkedGraph = MutableGraph<LinkedAdjacency>;
/// Mutable graph backed by per-vertex neighbor hash maps.
pub type HashmapGraph = MutableGraph<HashmapAdjacency>;
/// Mutable graph backed by a dense adjacency matrix.
pub type MatrixGraph = MutableGraph<MatrixAdjacency>;

/// The incidence structure of a mutable graph.
///
/// Every method receives the graph's current [`Endpoints`]. Edge ids stored by
/// a backend are always live edge indices of the owning graph.
pub trait Adjacency: fmt::Debug {
    /// Human-readable backend name, used in diagnostics.
    const NAME: &'static str;

    /// Whether the backend can hold more than one edge per vertex pair.
    const PARALLEL_EDGES: bool;

    /// Creates an empty structure, reserving room for the expected sizes.
    fn new(directed: bool, expected_vertices: usize, expected_edges: usize) -> Self
    where
        Self: Sized;

    /// Appends one vertex with no incident edges.
    fn add_vertex(&mut self);

    /// Attaches `edge`, whose endpoints are already recorded in `ends`.
    ///
    /// `edge` is either a brand new index or one previously detached with
    /// [`Adjacency::detach_edge`].
    fn add_edge(&mut self, edge: usize, ends: Endpoints<'_>);

    /// Detaches `edge` from both of its endpoints.
    fn detach_edge(&mut self, edge: usize, ends: Endpoints<'_>);

    /// Re-labels the attached edge `from` as `to`. `to` is detached and `ends`
    /// still reports the endpoints of `from` at index `from`.
    fn rename_edge(&mut self, from: usize, to: usize, ends: Endpoints<'_>);

    /// Moves vertex `swapped` (the last vertex) into slot `removed` and drops the last slot.
    ///
    /// `removed` has no incident edges. When `removed == swapped` the last slot
    /// is simply dropped. The caller re-points the endpoint columns of the
    /// moved edges afterwards.
    fn swap_vertex(&mut self, removed: usize, swapped: usize);

    /// Edges leaving `v` and their count.
    fn out_edges<'a>(&'a self, v: usize, ends: Endpoints<'a>) -> (Box<dyn EdgeIter + 'a>, usize);

    /// Edges entering `v` and their count.
    fn in_edges<'a>(&'a self, v: usize, ends: Endpoints<'a>) -> (Box<dyn EdgeIter + 'a>, usize);

    /// Some edge from `u` to `v`.
    fn get_edge(&self, u: usize, v: usize, ends: Endpoints<'_>) -> Option<usize> {
        let (mut edges, _) = self.out_edges(u, ends);
        while let Some(e) = edges.next() {
            if edges.target() == v {
                return Some(e);
            }
        }
        None
    }

    /// Every edge from `u` to `v` and their count.
    fn get_edges<'a>(&'a self, u: usize, v: usize, ends: Endpoints<'a>) -> (Box<dyn EdgeIter + 'a>, usize) {
        let (mut edges, _) = self.out_edges(u, ends);
        let mut found = Vec::new();
        while let Some(e) = edges.next() {
            if edges.target() == v {
                found.push(e);
            }
        }
        let len = found.len();
        (Box::new(IncidentEdges::new(found.into_iter(), u, Side::Out, ends)), len)
    }

    /// Detaches every edge, keeping the vertices.
    fn clear_edges(&mut self);

    /// Drops every vertex and edge.
    fn clear(&mut self);
}

/// A mutable index graph over the adjacency backend `A`.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `add_vertex` | \(O(L)\) amortized | `L` = registered vertex listeners; \(O(n)\) for the matrix backend |
/// | `add_edge` | \(O(L)\) amortized | plus a lookup when parallel edges are forbidden |
/// | `remove_edge` | backend removal + \(O(L)\) | last edge takes the removed index |
/// | `remove_vertex` | \(O(\deg)\) edge removals | last vertex takes the removed index |
#[derive(Debug)]
pub struct MutableGraph<A: Adjacency> {
    capabilities: Capabilities,
    vertices: IndexSpace,
    edges: IndexSpace,
    sources: Vec<usize>,
    targets: Vec<usize>,
    adjacency: A,
}

impl<A: Adjacency> MutableGraph<A> {
    /// Creates an empty graph.
    ///
    /// Backends that cannot hold parallel edges clear the `parallel_edges`
    /// capability, so a second edge between the same pair is rejected.
    pub fn new(capabilities: Capabilities) -> Self {
        Self::with_capacity(capabilities, 0, 0)
    }

    /// Creates an empty graph with room for the expected number of vertices and edges.
    pub fn with_capacity(mut capabilities: Capabilities, vertices: usize, edges: usize) -> Self {
        capabilities.parallel_edges &= A::PARALLEL_EDGES;
        Self {
            capabilities,
            vertices: IndexSpace::new(),
            edges: IndexSpace::new(),
            sources: Vec::with_capacity(edges),
            targets: Vec::with_capacity(edges),
            adjacency: A::new(capabilities.directed, vertices, edges),
        }
    }

    /// Name of the adjacency backend.
    pub fn backend_name(&self) -> &'static str {
        A::NAME
    }

    fn check_vertex(&self, v: usize) -> GraphResult<()> {
        if self.vertices.contains(v) {
            Ok(())
        } else {
            Err(GraphError::NoSuchVertex(v))
        }
    }

    fn check_edge_index(&self, e: usize) -> GraphResult<()> {
        if self.edges.contains(e) {
            Ok(())
        } else {
            Err(GraphError::NoSuchEdge(e))
        }
    }

    fn push_edge(&mut self, source: usize, target: usize) -> usize {
        let e = self.sources.len();
        self.sources.push(source);
        self.targets.push(target);
        self.adjacency
            .add_edge(e, Endpoints::new(&self.sources, &self.targets));
        self.edges.push();
        e
    }

    fn remove_edge_unchecked(&mut self, e: usize) {
        let last = self.sources.len() - 1;
        let ends = Endpoints::new(&self.sources, &self.targets);
        self.adjacency.detach_edge(e, ends);
        if e != last {
            self.adjacency.rename_edge(last, e, ends);
        }
        self.sources.swap_remove(e);
        self.targets.swap_remove(e);
        self.edges.swap_remove(e);
    }

    /// Removes `edges`, which must be sorted in descending order without duplicates.
    ///
    /// Descending order guarantees that the edge relocated by each removal is
    /// never one still waiting to be removed.
    fn remove_edges_descending(&mut self, edges: &[usize]) {
        for &e in edges {
            self.remove_edge_unchecked(e);
        }
    }

    fn descending(mut edges: Vec<usize>) -> Vec<usize> {
        edges.sort_unstable_by(|a, b| b.cmp(a));
        edges.dedup();
        edges
    }

    fn incident_edges(&self, v: usize) -> Vec<usize> {
        let mut edges = self.out_edges(v).to_vec();
        if self.capabilities.directed {
            edges.extend(self.in_edges(v));
        }
        Self::descending(edges)
    }

    fn edge_set<'a>(&'a self, (iter, len): (Box<dyn EdgeIter + 'a>, usize), query: EdgeQuery) -> EdgeSet<'a> {
        EdgeSet::new(
            iter,
            len,
            query,
            Endpoints::new(&self.sources, &self.targets),
            self.capabilities.directed,
        )
    }

    #[inline]
    fn assert_vertex(&self, v: usize) {
        assert!(
            v < self.vertices.len(),
            "vertex {v} out of bounds for {} vertices",
            self.vertices.len()
        );
    }
}

impl<A: Adjacency> IndexGraph for MutableGraph<A> {
    #[inline]
    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    #[inline]
    fn vertex_space(&self) -> &IndexSpace {
        &self.vertices
    }

    #[inline]
    fn edge_space(&self) -> &IndexSpace {
        &self.edges
    }

    #[inline]
    fn endpoints(&self) -> Endpoints<'_> {
        Endpoints::new(&self.sources, &self.targets)
    }

    fn out_edges(&self, source: usize) -> EdgeSet<'_> {
        self.assert_vertex(source);
        let found = self.adjacency.out_edges(source, self.endpoints());
        self.edge_set(found, EdgeQuery::Out(source))
    }

    fn in_edges(&self, target: usize) -> EdgeSet<'_> {
        self.assert_vertex(target);
        let found = self.adjacency.in_edges(target, self.endpoints());
        self.edge_set(found, EdgeQuery::In(target))
    }

    fn get_edge(&self, source: usize, target: usize) -> Option<usize> {
        self.assert_vertex(source);
        self.assert_vertex(target);
        self.adjacency.get_edge(source, target, self.endpoints())
    }

    fn get_edges(&self, source: usize, target: usize) -> EdgeSet<'_> {
        self.assert_vertex(source);
        self.assert_vertex(target);
        let found = self.adjacency.get_edges(source, target, self.endpoints());
        self.edge_set(found, EdgeQuery::Between(source, target))
    }
}

impl<A: Adjacency> IndexGraphMut for MutableGraph<A> {
    fn add_vertex(&mut self) -> GraphResult<usize> {
        self.adjacency.add_vertex();
        Ok(self.vertices.push())
    }

    fn add_vertices(&mut self, count: usize) -> GraphResult<Range<usize>> {
        for _ in 0..count {
            self.adjacency.add_vertex();
        }
        Ok(self.vertices.extend(count))
    }

    fn remove_vertex(&mut self, vertex: usize) -> GraphResult<()> {
        self.check_vertex(vertex)?;
        let incident = self.incident_edges(vertex);
        self.remove_edges_descending(&incident);

        let last = self.vertices.len() - 1;
        let moved = if vertex == last {
            Vec::new()
        } else {
            self.incident_edges(last)
        };
        self.adjacency.swap_vertex(vertex, last);
        for e in moved {
            if self.sources[e] == last {
                self.sources[e] = vertex;
            }
            if self.targets[e] == last {
                self.targets[e] = vertex;
            }
        }
        self.vertices.swap_remove(vertex);
        Ok(())
    }

    fn add_edge(&mut self, source: usize, target: usize) -> GraphResult<usize> {
        self.check_vertex(source)?;
        self.check_vertex(target)?;
        self.capabilities.check_edge(source, target, || {
            self.adjacency
                .get_edge(source, target, Endpoints::new(&self.sources, &self.targets))
                .is_some()
        })?;
        Ok(self.push_edge(source, target))
    }

    fn add_edges(&mut self, edges: &[(usize, usize)]) -> GraphResult<Range<usize>> {
        let directed = self.capabilities.directed;
        let mut batch = HashSet::new();
        for &(u, v) in edges {
            self.check_vertex(u)?;
            self.check_vertex(v)?;
            let key = if directed || u <= v { (u, v) } else { (v, u) };
            self.capabilities.check_edge(u, v, || {
                !batch.insert(key)
                    || self
                        .adjacency
                        .get_edge(u, v, Endpoints::new(&self.sources, &self.targets))
                        .is_some()
            })?;
        }
        let begin = self.sources.len();
        for &(u, v) in edges {
            self.push_edge(u, v);
        }
        Ok(begin..self.sources.len())
    }

    fn remove_edge(&mut self, edge: usize) -> GraphResult<()> {
        self.check_edge_index(edge)?;
        self.remove_edge_unchecked(edge);
        Ok(())
    }

    fn remove_edges_of(&mut self, vertex: usize) -> GraphResult<()> {
        self.check_vertex(vertex)?;
        let incident = self.incident_edges(vertex);
        self.remove_edges_descending(&incident);
        Ok(())
    }

    fn remove_out_edges_of(&mut self, source: usize) -> GraphResult<()> {
        self.check_vertex(source)?;
        let out = Self::descending(self.out_edges(source).to_vec());
        self.remove_edges_descending(&out);
        Ok(())
    }

    fn remove_in_edges_of(&mut self, target: usize) -> GraphResult<()> {
        self.check_vertex(target)?;
        let inc = Self::descending(self.in_edges(target).to_vec());
        self.remove_edges_descending(&inc);
        Ok(())
    }

    fn reverse_edge(&mut self, edge: usize) -> GraphResult<()> {
        self.check_edge_index(edge)?;
        let (u, v) = (self.sources[edge], self.targets[edge]);
        if !self.capabilities.directed || u == v {
            return Ok(());
        }
        self.capabilities.check_edge(v, u, || {
            self.adjacency
                .get_edge(v, u, Endpoints::new(&self.sources, &self.targets))
                .is_some()
        })?;
        self.adjacency
            .detach_edge(edge, Endpoints::new(&self.sources, &self.targets));
        self.sources[edge] = v;
        self.targets[edge] = u;
        self.adjacency
            .add_edge(edge, Endpoints::new(&self.sources, &self.targets));
        Ok(())
    }

    fn clear_edges(&mut self) -> GraphResult<()> {
        self.adjacency.clear_edges();
        self.sources.clear();
        self.targets.clear();
        self.edges.clear();
        Ok(())
    }

    fn clear(&mut self) -> GraphResult<()> {
        self.clear_edges()?;
        self.adjacency.clear();
        self.vertices.clear();
        Ok(())
    }

    #[inline]
    fn vertex_space_mut(&mut self) -> GraphResult<&mut IndexSpace> {
        Ok(&mut self.vertices)
    }

    #[inline]
    fn edge_space_mut(&mut self) -> GraphResult<&mut IndexSpace> {
        Ok(&mut self.edges)
    }
}
