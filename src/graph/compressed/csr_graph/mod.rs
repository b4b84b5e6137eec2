//! An immutable CSR (compressed sparse row) index graph.
//!
//! CSR graphs are only produced by compaction in
//! [`IndexGraphBuilder`](crate::graph::builder::IndexGraphBuilder). Every
//! mutation fails with [`GraphError::ImmutableGraph`].
//!
//! Memory layout:
//! - `sources` / `targets`: endpoint columns indexed by edge id
//! - `out`: row offsets of length `n + 1` plus a flat array of edge ids, each
//!   row sorted by (neighbor, edge id). Undirected rows hold every incident
//!   edge, self edges once.
//! - `inc`: optional in-edge CSR of a directed graph
//! - `lookup`: optional per-vertex neighbor → first edge hash maps

use core::ops::Range;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};
use crate::graph::capabilities::Capabilities;
use crate::graph::edge_iter::{EdgeQuery, EdgeSet, Endpoints, IncidentEdges, Side};
use crate::graph::index::IndexSpace;
use crate::graph::traits::{IndexGraph, IndexGraphMut};


/// Optional secondary structures of a [`CsrGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsrOptions {
    /// Build an in-edge CSR. Without it `in_edges` of a directed graph scans every edge.
    pub in_edges: bool,
    /// Build per-vertex hash maps so `get_edge` is \(O(1)\) expected instead of a binary search.
    pub fast_lookup: bool,
}

impl Default for CsrOptions {
    fn default() -> Self {
        Self {
            in_edges: true,
            fast_lookup: false,
        }
    }
}

/// Row offsets plus a flat array of edge ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Rows {
    offsets: Vec<usize>,
    edges: Vec<usize>,
}

impl Rows {
    /// Compresses `(row, neighbor, edge)` triples, sorting them first.
    fn compress(n: usize, mut incidences: Vec<(usize, usize, usize)>) -> Self {
        sort_incidences(&mut incidences);

        let mut offsets = vec![0usize; n + 1];
        for &(row, _, _) in &incidences {
            offsets[row + 1] += 1;
        }
        for v in 0..n {
            offsets[v + 1] += offsets[v];
        }
        let edges = incidences.into_iter().map(|(_, _, e)| e).collect();
        Self { offsets, edges }
    }

    #[inline(always)]
    fn row(&self, v: usize) -> &[usize] {
        &self.edges[self.offsets[v]..self.offsets[v + 1]]
    }
}

fn sort_incidences(incidences: &mut [(usize, usize, usize)]) {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        incidences.par_sort_unstable();
    }
    #[cfg(not(feature = "parallel"))]
    incidences.sort_unstable();
}

/// An immutable graph in compressed sparse row form.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `out_edges` | \(O(1)\) | contiguous row slice |
/// | `in_edges` | \(O(1)\) / \(O(m)\) | with / without the in-edge CSR |
/// | `get_edge` | \(O(\log \deg)\) | \(O(1)\) expected with fast lookup |
/// | `get_edges` | \(O(\log \deg)\) | parallel edges are adjacent in a row |
#[derive(Debug)]
pub struct CsrGraph {
    capabilities: Capabilities,
    vertices: IndexSpace,
    edges: IndexSpace,
    sources: Vec<usize>,
    targets: Vec<usize>,
    out: Rows,
    inc: Option<Rows>,
    lookup: Option<Vec<HashMap<usize, usize>>>,
}

/// A compacted graph together with the edge order chosen during compaction.
pub(crate) struct Compacted {
    pub(crate) graph: CsrGraph,
    /// `new_to_orig[e]` is the pre-compaction index of edge `e`, when edges were re-indexed.
    pub(crate) edges_new_to_orig: Option<Vec<usize>>,
}

impl CsrGraph {
    /// Compacts validated edge data into CSR form.
    ///
    /// Weight columns are copied from `vertex_columns` and `edge_columns`. With
    /// `reindex_edges` on a directed graph, edges are renumbered in row order so
    /// that the out-edges of every vertex occupy one contiguous index range.
    pub(crate) fn compact(
        capabilities: Capabilities,
        vertex_columns: &IndexSpace,
        edge_columns: &IndexSpace,
        mut sources: Vec<usize>,
        mut targets: Vec<usize>,
        options: CsrOptions,
        reindex_edges: bool,
    ) -> Compacted {
        let n = vertex_columns.len();
        let m = sources.len();
        let directed = capabilities.directed;

        let mut out_incidences = Vec::with_capacity(if directed { m } else { 2 * m });
        for e in 0..m {
            let (s, t) = (sources[e], targets[e]);
            out_incidences.push((s, t, e));
            if !directed && s != t {
                out_incidences.push((t, s, e));
            }
        }
        let mut out = Rows::compress(n, out_incidences);

        let edges_new_to_orig = if directed && reindex_edges {
            // Row order is the new edge order; the out CSR becomes the identity.
            let new_to_orig = core::mem::take(&mut out.edges);
            sources = new_to_orig.iter().map(|&e| sources[e]).collect();
            targets = new_to_orig.iter().map(|&e| targets[e]).collect();
            out.edges = (0..m).collect();
            Some(new_to_orig)
        } else {
            None
        };

        let inc = (directed && options.in_edges).then(|| {
            let incidences = (0..m).map(|e| (targets[e], sources[e], e)).collect();
            Rows::compress(n, incidences)
        });

        let lookup = options.fast_lookup.then(|| {
            let mut maps = vec![HashMap::new(); n];
            for (u, map) in maps.iter_mut().enumerate() {
                for &e in out.row(u) {
                    let w = if sources[e] == u { targets[e] } else { sources[e] };
                    map.entry(w).or_insert(e);
                }
            }
            maps
        });

        let graph = CsrGraph {
            capabilities,
            vertices: vertex_columns.clone_columns(None),
            edges: edge_columns.clone_columns(edges_new_to_orig.as_deref()),
            sources,
            targets,
            out,
            inc,
            lookup,
        };
        Compacted {
            graph,
            edges_new_to_orig,
        }
    }

    /// Returns `true` if the graph carries an in-edge CSR.
    pub fn has_in_edges_index(&self) -> bool {
        self.inc.is_some()
    }

    /// Returns `true` if the graph carries fast-lookup hash maps.
    pub fn has_fast_lookup(&self) -> bool {
        self.lookup.is_some()
    }

    /// Edge ids of the out-row of `v`, in (neighbor, edge id) order.
    ///
    /// # Panics
    /// Panics if `v` is not a vertex.
    pub fn out_row(&self, v: usize) -> &[usize] {
        self.out.row(v)
    }

    /// The range of `row` whose neighbor (relative to `u`) is `v`.
    fn neighbor_range(&self, row: &[usize], u: usize, v: usize) -> Range<usize> {
        let ends = self.endpoints();
        let lo = row.partition_point(|&e| ends.opposite(e, u) < v);
        let hi = lo + row[lo..].partition_point(|&e| ends.opposite(e, u) == v);
        lo..hi
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

impl IndexGraph for CsrGraph {
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
        let row = self.out.row(source);
        let ends = self.endpoints();
        EdgeSet::new(
            Box::new(IncidentEdges::new(row.iter().copied(), source, Side::Out, ends)),
            row.len(),
            EdgeQuery::Out(source),
            ends,
            self.capabilities.directed,
        )
    }

    fn in_edges(&self, target: usize) -> EdgeSet<'_> {
        self.assert_vertex(target);
        let ends = self.endpoints();
        let directed = self.capabilities.directed;
        let query = EdgeQuery::In(target);
        match (&self.inc, directed) {
            (_, false) => {
                let row = self.out.row(target);
                let iter = IncidentEdges::new(row.iter().copied(), target, Side::In, ends);
                EdgeSet::new(Box::new(iter), row.len(), query, ends, directed)
            }
            (Some(inc), true) => {
                let row = inc.row(target);
                let iter = IncidentEdges::new(row.iter().copied(), target, Side::In, ends);
                EdgeSet::new(Box::new(iter), row.len(), query, ends, directed)
            }
            (None, true) => {
                let targets = &self.targets;
                let scan = (0..targets.len()).filter(move |&e| targets[e] == target);
                let len = scan.clone().count();
                let iter = IncidentEdges::new(scan, target, Side::In, ends);
                EdgeSet::new(Box::new(iter), len, query, ends, directed)
            }
        }
    }

    fn get_edge(&self, source: usize, target: usize) -> Option<usize> {
        self.assert_vertex(source);
        self.assert_vertex(target);
        if let Some(maps) = &self.lookup {
            return maps[source].get(&target).copied();
        }
        let row = self.out.row(source);
        let range = self.neighbor_range(row, source, target);
        row.get(range).and_then(|r| r.first().copied())
    }

    fn get_edges(&self, source: usize, target: usize) -> EdgeSet<'_> {
        self.assert_vertex(source);
        self.assert_vertex(target);
        let row = self.out.row(source);
        let matching = &row[self.neighbor_range(row, source, target)];
        let ends = self.endpoints();
        EdgeSet::new(
            Box::new(IncidentEdges::new(matching.iter().copied(), source, Side::Out, ends)),
            matching.len(),
            EdgeQuery::Between(source, target),
            ends,
            self.capabilities.directed,
        )
    }

    fn out_degree(&self, v: usize) -> usize {
        self.assert_vertex(v);
        self.out.offsets[v + 1] - self.out.offsets[v]
    }
}

impl IndexGraphMut for CsrGraph {
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
