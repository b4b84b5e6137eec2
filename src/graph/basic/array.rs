//! Per-vertex growable arrays of incident edge ids.
//!
//! The default general-purpose backend: appending an edge is amortized
//! \(O(1)\), iteration walks a contiguous slice, and removal or lookup scan one
//! vertex's array.

use crate::graph::basic::Adjacency;
use crate::graph::edge_iter::{EdgeIter, Endpoints, IncidentEdges, Side};

/// Edge-id arrays per vertex. Undirected graphs keep one array per vertex
/// holding every incident edge (self edges once).
#[derive(Debug, Clone, Default)]
pub struct ArrayAdjacency {
    directed: bool,
    out: Vec<Vec<usize>>,
    inc: Vec<Vec<usize>>,
}

#[inline]
fn remove_from(list: &mut Vec<usize>, edge: usize) {
    if let Some(pos) = list.iter().position(|&e| e == edge) {
        list.swap_remove(pos);
    }
}

#[inline]
fn replace_in(list: &mut [usize], from: usize, to: usize) {
    if let Some(slot) = list.iter_mut().find(|e| **e == from) {
        *slot = to;
    }
}

impl Adjacency for ArrayAdjacency {
    const NAME: &'static str = "array";
    const PARALLEL_EDGES: bool = true;

    fn new(directed: bool, expected_vertices: usize, _expected_edges: usize) -> Self {
        Self {
            directed,
            out: Vec::with_capacity(expected_vertices),
            inc: if directed {
                Vec::with_capacity(expected_vertices)
            } else {
                Vec::new()
            },
        }
    }

    fn add_vertex(&mut self) {
        self.out.push(Vec::new());
        if self.directed {
            self.inc.push(Vec::new());
        }
    }

    fn add_edge(&mut self, edge: usize, ends: Endpoints<'_>) {
        let (s, t) = (ends.source(edge), ends.target(edge));
        self.out[s].push(edge);
        if self.directed {
            self.inc[t].push(edge);
        } else if s != t {
            self.out[t].push(edge);
        }
    }

    fn detach_edge(&mut self, edge: usize, ends: Endpoints<'_>) {
        let (s, t) = (ends.source(edge), ends.target(edge));
        remove_from(&mut self.out[s], edge);
        if self.directed {
            remove_from(&mut self.inc[t], edge);
        } else if s != t {
            remove_from(&mut self.out[t], edge);
        }
    }

    fn rename_edge(&mut self, from: usize, to: usize, ends: Endpoints<'_>) {
        let (s, t) = (ends.source(from), ends.target(from));
        replace_in(&mut self.out[s], from, to);
        if self.directed {
            replace_in(&mut self.inc[t], from, to);
        } else if s != t {
            replace_in(&mut self.out[t], from, to);
        }
    }

    fn swap_vertex(&mut self, removed: usize, _swapped: usize) {
        self.out.swap_remove(removed);
        if self.directed {
            self.inc.swap_remove(removed);
        }
    }

    fn out_edges<'a>(&'a self, v: usize, ends: Endpoints<'a>) -> (Box<dyn EdgeIter + 'a>, usize) {
        let list = &self.out[v];
        (
            Box::new(IncidentEdges::new(list.iter().copied(), v, Side::Out, ends)),
            list.len(),
        )
    }

    fn in_edges<'a>(&'a self, v: usize, ends: Endpoints<'a>) -> (Box<dyn EdgeIter + 'a>, usize) {
        let list = if self.directed { &self.inc[v] } else { &self.out[v] };
        (
            Box::new(IncidentEdges::new(list.iter().copied(), v, Side::In, ends)),
            list.len(),
        )
    }

    fn clear_edges(&mut self) {
        self.out.iter_mut().for_each(Vec::clear);
        self.inc.iter_mut().for_each(Vec::clear);
    }

    fn clear(&mut self) {
        self.out.clear();
        self.inc.clear();
    }
}
