//! Tests for the mutable backends. Every check runs against all four adjacency structures.

use super::*;
use crate::graph::weights::WeightsMutExt;

fn sorted(set: EdgeSet<'_>) -> Vec<usize> {
    let mut edges = set.to_vec();
    edges.sort_unstable();
    edges
}

/// Cross-checks every incidence query against the endpoint columns.
fn assert_consistent<A: Adjacency>(g: &MutableGraph<A>) {
    let directed = g.is_directed();
    for v in g.vertices() {
        let expected_out: Vec<usize> = g
            .edges()
            .filter(|&e| {
                let (s, t) = (g.edge_source(e), g.edge_target(e));
                s == v || (!directed && t == v)
            })
            .collect();
        let expected_in: Vec<usize> = g
            .edges()
            .filter(|&e| {
                let (s, t) = (g.edge_source(e), g.edge_target(e));
                t == v || (!directed && s == v)
            })
            .collect();

        let out = g.out_edges(v);
        assert_eq!(out.len(), expected_out.len(), "{} out-degree of {v}", A::NAME);
        let mut it = out.into_iter();
        while let Some(e) = it.next() {
            assert_eq!(it.source(), v);
            assert_eq!(it.target(), g.edge_endpoint(e, v));
        }
        assert_eq!(sorted(g.out_edges(v)), expected_out, "{} out-edges of {v}", A::NAME);

        let mut it = g.in_edges(v).into_iter();
        while let Some(e) = it.next() {
            assert_eq!(it.target(), v);
            assert_eq!(it.source(), g.edge_endpoint(e, v));
        }
        assert_eq!(sorted(g.in_edges(v)), expected_in, "{} in-edges of {v}", A::NAME);
    }
    for e in g.edges() {
        let (s, t) = (g.edge_source(e), g.edge_target(e));
        assert!(s < g.vertex_count() && t < g.vertex_count());
        assert!(g.get_edges(s, t).contains(e));
        assert!(g.get_edge(s, t).is_some());
    }
}

fn remove_vertex_relocates_last<A: Adjacency>() {
    let mut g = MutableGraph::<A>::new(Capabilities::new(true, true, false));
    g.add_vertices(5).unwrap();
    // 0->1, 4->2, 2->4, 4->4, 1->0, 3->4
    g.add_edges(&[(0, 1), (4, 2), (2, 4), (4, 4), (1, 0), (3, 4)]).unwrap();
    assert_consistent(&g);

    g.remove_vertex(1).unwrap();
    assert_eq!(g.vertex_count(), 4);
    assert_eq!(g.edges(), 0..4);
    // Vertex 4 is now 1; edges 0->1 and 1->0 are gone.
    let mut pairs: Vec<(usize, usize)> = g.edges().map(|e| (g.edge_source(e), g.edge_target(e))).collect();
    pairs.sort_unstable();
    assert_eq!(pairs, vec![(1, 1), (1, 2), (2, 1), (3, 1)]);
    assert_consistent(&g);

    g.remove_vertex(3).unwrap();
    assert_consistent(&g);
    g.remove_vertex(0).unwrap();
    assert_consistent(&g);
    assert_eq!(g.vertex_count(), 2);
    assert_eq!(g.edge_count(), 3);
}

fn undirected_remove_vertex_scenario<A: Adjacency>() {
    let mut g = MutableGraph::<A>::new(Capabilities::undirected());
    g.add_vertices(3).unwrap();
    assert_eq!(g.add_edge(0, 1).unwrap(), 0);
    assert_eq!(g.add_edge(1, 2).unwrap(), 1);

    g.remove_vertex(0).unwrap();
    assert_eq!(g.vertices(), 0..2);
    assert_eq!(g.edges(), 0..1);
    // Former vertex 2 is now 0 and former e1 is now e0.
    assert_eq!(sorted(g.out_edges(0)), vec![0]);
    assert_eq!(g.edge_endpoint(0, 0), 1);
    assert_eq!(g.get_edge(1, 0), Some(0));
    assert_consistent(&g);
}

fn capability_violations_leave_graph_unchanged<A: Adjacency>() {
    let mut g = MutableGraph::<A>::new(Capabilities::new(true, false, false));
    g.add_vertices(3).unwrap();
    g.add_edge(0, 1).unwrap();

    assert_eq!(g.add_edge(2, 2), Err(GraphError::SelfEdgesNotSupported(2)));
    assert_eq!(
        g.add_edge(0, 1),
        Err(GraphError::ParallelEdgesNotSupported { from: 0, to: 1 })
    );
    assert_eq!(g.add_edge(0, 3), Err(GraphError::NoSuchVertex(3)));
    // Reverse direction is a different pair in a directed graph.
    assert_eq!(g.add_edge(1, 0), Ok(1));

    // A batch with a duplicate pair inside it is rejected as a whole.
    assert_eq!(
        g.add_edges(&[(1, 2), (2, 0), (1, 2)]),
        Err(GraphError::ParallelEdgesNotSupported { from: 1, to: 2 })
    );
    assert_eq!(g.vertex_count(), 3);
    assert_eq!(g.edge_count(), 2);
    assert_consistent(&g);
}

fn remove_edge_keeps_lists_intact<A: Adjacency>() {
    let mut g = MutableGraph::<A>::new(Capabilities::undirected());
    g.add_vertices(4).unwrap();
    g.add_edges(&[(0, 1), (0, 2), (0, 3), (1, 2), (2, 3)]).unwrap();
    g.add_edges_weights("id", 0usize).unwrap();
    for e in g.edges() {
        g.edges_weights_mut::<usize>("id").unwrap().set(e, e);
    }

    g.remove_edge(1).unwrap();
    assert_consistent(&g);
    let ids = g.edges_weights_mut::<usize>("id").unwrap().as_slice().to_vec();
    assert_eq!(ids, vec![0, 4, 2, 3]);
    assert_eq!((g.edge_source(1), g.edge_target(1)), (2, 3));

    g.remove_edge(3).unwrap();
    g.remove_edge(0).unwrap();
    assert_consistent(&g);
    assert_eq!(g.edge_count(), 2);
    assert_eq!(g.remove_edge(2), Err(GraphError::NoSuchEdge(2)));
}

fn bulk_removal_and_reversal<A: Adjacency>() {
    let mut g = MutableGraph::<A>::new(Capabilities::new(true, false, false));
    g.add_vertices(4).unwrap();
    g.add_edges(&[(0, 1), (1, 2), (2, 0), (3, 0), (0, 3)]).unwrap();

    g.remove_in_edges_of(0).unwrap();
    assert_eq!(g.in_degree(0), 0);
    assert_eq!(g.out_degree(0), 2);
    assert_consistent(&g);

    g.remove_out_edges_of(0).unwrap();
    assert_eq!(g.edge_count(), 1);
    assert_consistent(&g);

    let e = g.get_edge(1, 2).unwrap();
    g.reverse_edge(e).unwrap();
    assert_eq!((g.edge_source(e), g.edge_target(e)), (2, 1));
    assert_eq!(g.get_edge(1, 2), None);
    assert_consistent(&g);

    let back = g.add_edge(1, 2).unwrap();
    assert_eq!(
        g.reverse_edge(back),
        Err(GraphError::ParallelEdgesNotSupported { from: 2, to: 1 })
    );

    g.remove_edges_of(2).unwrap();
    assert_eq!(g.edge_count(), 0);
    assert_consistent(&g);
}

fn clear_keeps_columns<A: Adjacency>() {
    let mut g = MutableGraph::<A>::new(Capabilities::directed());
    g.add_vertices(3).unwrap();
    g.add_vertices_weights("w", 1i64).unwrap();
    g.add_edges(&[(0, 1), (1, 2)]).unwrap();

    g.clear_edges().unwrap();
    assert_eq!(g.edge_count(), 0);
    assert_eq!(g.vertex_count(), 3);
    assert!(g.out_edges(0).is_empty());
    g.add_edge(2, 0).unwrap();
    assert_consistent(&g);

    g.clear().unwrap();
    assert_eq!((g.vertex_count(), g.edge_count()), (0, 0));
    g.add_vertex().unwrap();
    assert_eq!(g.vertices_weights_mut::<i64>("w").unwrap().as_slice(), &[1]);
}

macro_rules! backend_tests {
    ($($name:ident => $adj:ty),* $(,)?) => {
        $(
            mod $name {
                use super::*;

                #[test]
                fn remove_vertex_relocates_last() {
                    super::remove_vertex_relocates_last::<$adj>();
                }

                #[test]
                fn undirected_remove_vertex_scenario() {
                    super::undirected_remove_vertex_scenario::<$adj>();
                }

                #[test]
                fn capability_violations_leave_graph_unchanged() {
                    super::capability_violations_leave_graph_unchanged::<$adj>();
                }

                #[test]
                fn remove_edge_keeps_lists_intact() {
                    super::remove_edge_keeps_lists_intact::<$adj>();
                }

                #[test]
                fn bulk_removal_and_reversal() {
                    super::bulk_removal_and_reversal::<$adj>();
                }

                #[test]
                fn clear_keeps_columns() {
                    super::clear_keeps_columns::<$adj>();
                }
            }
        )*
    };
}

backend_tests! {
    array => ArrayAdjacency,
    linked => LinkedAdjacency,
    hashmap => HashmapAdjacency,
    matrix => MatrixAdjacency,
}

#[test]
fn parallel_edges_depend_on_backend() {
    let mut array = ArrayGraph::new(Capabilities::directed());
    array.add_vertices(2).unwrap();
    array.add_edge(0, 1).unwrap();
    array.add_edge(0, 1).unwrap();
    assert_eq!(array.get_edges(0, 1).len(), 2);

    let mut hashmap = HashmapGraph::new(Capabilities::directed());
    assert!(!hashmap.capabilities().parallel_edges);
    hashmap.add_vertices(2).unwrap();
    hashmap.add_edge(0, 1).unwrap();
    assert!(matches!(
        hashmap.add_edge(0, 1),
        Err(GraphError::ParallelEdgesNotSupported { .. })
    ));
    assert_eq!(hashmap.get_edges(0, 1).len(), 1);
}

#[test]
fn linked_parallel_edges_survive_interleaved_removal() {
    let mut g = LinkedGraph::new(Capabilities::new(false, true, true));
    g.add_vertices(3).unwrap();
    g.add_edges(&[(0, 1), (1, 0), (1, 1), (0, 1), (2, 1), (1, 2)]).unwrap();
    assert_eq!(g.get_edges(1, 0).len(), 3);
    assert_eq!(g.out_degree(1), 6);

    g.remove_edge(0).unwrap();
    assert_consistent(&g);
    g.remove_edge(2).unwrap();
    assert_consistent(&g);
    g.remove_vertex(0).unwrap();
    assert_consistent(&g);
    assert_eq!(g.vertex_count(), 2);
    // Remaining: 2<->1 twice, now 0<->1.
    assert_eq!(g.get_edges(0, 1).len(), 2);
}

#[test]
fn backend_names() {
    assert_eq!(ArrayGraph::new(Capabilities::directed()).backend_name(), "array");
    assert_eq!(MatrixGraph::new(Capabilities::directed()).backend_name(), "matrix");
}

#[test]
#[should_panic(expected = "out of bounds")]
fn querying_missing_vertex_panics() {
    let g = ArrayGraph::new(Capabilities::directed());
    let _ = g.out_edges(0);
}

#[test]
#[should_panic(expected = "vertex 2 out of bounds for 2 vertices")]
fn matrix_in_edges_of_missing_vertex_panics() {
    let mut g = MatrixGraph::new(Capabilities::directed());
    g.add_vertices(2).unwrap();
    let _ = g.in_edges(2);
}
