//! Dense `n × n` adjacency matrix of edge ids.
//!
//! Lookup, insertion and removal are \(O(1)\); iterating one vertex scans a
//! whole row (or column) and every vertex costs \(O(n)\) memory. Suited to
//! small or dense graphs. One cell holds one edge, so parallel edges are never
//! stored.

use crate::graph::basic::Adjacency;
use crate::graph::edge_iter::{EdgeIter, Endpoints, IncidentEdges, Side};

const NO_EDGE: usize = usize::MAX;

/// Row-major matrix where `rows[u][v]` is the edge from `u` to `v` or a sentinel.
/// Undirected graphs store every edge in both `[u][v]` and `[v][u]`.
#[derive(Debug, Clone, Default)]
pub struct MatrixAdjacency {
    directed: bool,
    rows: Vec<Vec<usize>>,
}

#[inline]
fn present(e: &usize) -> bool {
    *e != NO_EDGE
}

impl Adjacency for MatrixAdjacency {
    const NAME: &'static str = "matrix";
    const PARALLEL_EDGES: bool = false;

    fn new(directed: bool, expected_vertices: usize, _expected_edges: usize) -> Self {
        Self {
            directed,
            rows: Vec::with_capacity(expected_vertices),
        }
    }

    fn add_vertex(&mut self) {
        for row in &mut self.rows {
            row.push(NO_EDGE);
        }
        let n = self.rows.len() + 1;
        self.rows.push(vec![NO_EDGE; n]);
    }

    fn add_edge(&mut self, edge: usize, ends: Endpoints<'_>) {
        let (s, t) = (ends.source(edge), ends.target(edge));
        debug_assert_eq!(self.rows[s][t], NO_EDGE, "matrix adjacency cannot hold parallel edges");
        self.rows[s][t] = edge;
        if !self.directed {
            self.rows[t][s] = edge;
        }
    }

    fn detach_edge(&mut self, edge: usize, ends: Endpoints<'_>) {
        let (s, t) = (ends.source(edge), ends.target(edge));
        self.rows[s][t] = NO_EDGE;
        if !self.directed {
            self.rows[t][s] = NO_EDGE;
        }
    }

    fn rename_edge(&mut self, from: usize, to: usize, ends: Endpoints<'_>) {
        let (s, t) = (ends.source(from), ends.target(from));
        self.rows[s][t] = to;
        if !self.directed {
            self.rows[t][s] = to;
        }
    }

    fn swap_vertex(&mut self, removed: usize, _swapped: usize) {
        // Row and column `removed` are empty; the last row and column take their place.
        self.rows.swap_remove(removed);
        for row in &mut self.rows {
            row.swap_remove(removed);
        }
    }

    fn out_edges<'a>(&'a self, v: usize, ends: Endpoints<'a>) -> (Box<dyn EdgeIter + 'a>, usize) {
        let edges = self.rows[v].iter().copied().filter(present);
        let len = edges.clone().count();
        (Box::new(IncidentEdges::new(edges, v, Side::Out, ends)), len)
    }

    fn in_edges<'a>(&'a self, v: usize, ends: Endpoints<'a>) -> (Box<dyn EdgeIter + 'a>, usize) {
        if !self.directed {
            let edges = self.rows[v].iter().copied().filter(present);
            let len = edges.clone().count();
            return (Box::new(IncidentEdges::new(edges, v, Side::In, ends)), len);
        }
        let edges = self.rows.iter().map(move |row| row[v]).filter(present);
        let len = edges.clone().count();
        (Box::new(IncidentEdges::new(edges, v, Side::In, ends)), len)
    }

    fn get_edge(&self, u: usize, v: usize, _ends: Endpoints<'_>) -> Option<usize> {
        let e = self.rows[u][v];
        (e != NO_EDGE).then_some(e)
    }

    fn get_edges<'a>(&'a self, u: usize, v: usize, ends: Endpoints<'a>) -> (Box<dyn EdgeIter + 'a>, usize) {
        let found = self.get_edge(u, v, ends);
        (
            Box::new(IncidentEdges::new(found.into_iter(), u, Side::Out, ends)),
            usize::from(found.is_some()),
        )
    }

    fn clear_edges(&mut self) {
        for row in &mut self.rows {
            row.fill(NO_EDGE);
        }
    }

    fn clear(&mut self) {
        self.rows.clear();
    }
}
