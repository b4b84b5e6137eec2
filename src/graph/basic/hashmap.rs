//! Per-vertex hash maps from neighbor to edge id.
//!
//! Existence checks and lookups are expected \(O(1)\). A neighbor key maps to
//! exactly one edge, so this backend never holds parallel edges.

use std::collections::HashMap;

use crate::graph::basic::Adjacency;
use crate::graph::edge_iter::{EdgeIter, Endpoints, IncidentEdges, Side};

/// Neighbor→edge maps. Directed graphs keep an out-map and an in-map per
/// vertex; undirected graphs keep one map holding each edge under both endpoints.
#[derive(Debug, Clone, Default)]
pub struct HashmapAdjacency {
    directed: bool,
    out: Vec<HashMap<usize, usize>>,
    inc: Vec<HashMap<usize, usize>>,
}

#[inline]
fn rekey(map: &mut HashMap<usize, usize>, old: usize, new: usize) {
    if let Some(e) = map.remove(&old) {
        map.insert(new, e);
    }
}

#[inline]
fn relabel(map: &mut HashMap<usize, usize>, key: usize, to: usize) {
    if let Some(e) = map.get_mut(&key) {
        *e = to;
    }
}

impl HashmapAdjacency {
    fn neighbors(map: &HashMap<usize, usize>) -> Vec<usize> {
        map.keys().copied().collect()
    }
}

impl Adjacency for HashmapAdjacency {
    const NAME: &'static str = "hashmap";
    const PARALLEL_EDGES: bool = false;

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
        self.out.push(HashMap::new());
        if self.directed {
            self.inc.push(HashMap::new());
        }
    }

    fn add_edge(&mut self, edge: usize, ends: Endpoints<'_>) {
        let (s, t) = (ends.source(edge), ends.target(edge));
        let prev = self.out[s].insert(t, edge);
        debug_assert!(prev.is_none(), "hashmap adjacency cannot hold parallel edges");
        if self.directed {
            self.inc[t].insert(s, edge);
        } else {
            self.out[t].insert(s, edge);
        }
    }

    fn detach_edge(&mut self, edge: usize, ends: Endpoints<'_>) {
        let (s, t) = (ends.source(edge), ends.target(edge));
        self.out[s].remove(&t);
        if self.directed {
            self.inc[t].remove(&s);
        } else {
            self.out[t].remove(&s);
        }
    }

    fn rename_edge(&mut self, from: usize, to: usize, ends: Endpoints<'_>) {
        let (s, t) = (ends.source(from), ends.target(from));
        relabel(&mut self.out[s], t, to);
        if self.directed {
            relabel(&mut self.inc[t], s, to);
        } else {
            relabel(&mut self.out[t], s, to);
        }
    }

    fn swap_vertex(&mut self, removed: usize, swapped: usize) {
        self.out.swap_remove(removed);
        if self.directed {
            self.inc.swap_remove(removed);
        }
        if removed == swapped {
            return;
        }

        // Neighbors of the moved vertex still key it as `swapped`.
        let out_neighbors = Self::neighbors(&self.out[removed]);
        if self.directed {
            let in_neighbors = Self::neighbors(&self.inc[removed]);
            for w in out_neighbors {
                if w == swapped {
                    rekey(&mut self.out[removed], swapped, removed);
                    rekey(&mut self.inc[removed], swapped, removed);
                } else {
                    rekey(&mut self.inc[w], swapped, removed);
                }
            }
            for w in in_neighbors {
                if w != swapped {
                    rekey(&mut self.out[w], swapped, removed);
                }
            }
        } else {
            for w in out_neighbors {
                let map = if w == swapped { removed } else { w };
                rekey(&mut self.out[map], swapped, removed);
            }
        }
    }

    fn out_edges<'a>(&'a self, v: usize, ends: Endpoints<'a>) -> (Box<dyn EdgeIter + 'a>, usize) {
        let map = &self.out[v];
        (
            Box::new(IncidentEdges::new(map.values().copied(), v, Side::Out, ends)),
            map.len(),
        )
    }

    fn in_edges<'a>(&'a self, v: usize, ends: Endpoints<'a>) -> (Box<dyn EdgeIter + 'a>, usize) {
        let map = if self.directed { &self.inc[v] } else { &self.out[v] };
        (
            Box::new(IncidentEdges::new(map.values().copied(), v, Side::In, ends)),
            map.len(),
        )
    }

    fn get_edge(&self, u: usize, v: usize, _ends: Endpoints<'_>) -> Option<usize> {
        self.out[u].get(&v).copied()
    }

    fn get_edges<'a>(&'a self, u: usize, v: usize, ends: Endpoints<'a>) -> (Box<dyn EdgeIter + 'a>, usize) {
        let found = self.get_edge(u, v, ends);
        (
            Box::new(IncidentEdges::new(found.into_iter(), u, Side::Out, ends)),
            usize::from(found.is_some()),
        )
    }

    fn clear_edges(&mut self) {
        self.out.iter_mut().for_each(HashMap::clear);
        self.inc.iter_mut().for_each(HashMap::clear);
    }

    fn clear(&mut self) {
        self.out.clear();
        self.inc.clear();
    }
}
