use densegraph::graph::IndexListener;
use densegraph::{
    ArrayGraph, Capabilities, GraphError, GraphFactory, GraphImpl, GraphViewExt, HashmapGraph,
    IdGraph, IndexGraph, IndexGraphBuilder, IndexGraphMut, LinkedGraph, MatrixGraph, WeightsExt,
    WeightsMutExt,
};
use std::sync::{Arc, Mutex};

fn check_dense<G: IndexGraph + ?Sized>(g: &G) {
    for e in g.edges() {
        assert!(g.edge_source(e) < g.vertex_count());
        assert!(g.edge_target(e) < g.vertex_count());
    }
    let total: usize = g.vertices().map(|v| g.out_edges(v).len()).sum();
    if g.is_directed() {
        assert_eq!(total, g.edge_count());
    }
}

#[test]
fn undirected_remove_first_vertex_relabels_last() {
    for imp in [GraphImpl::Array, GraphImpl::Linked, GraphImpl::Hashmap, GraphImpl::Matrix] {
        let mut g = GraphFactory::undirected()
            .allow_parallel_edges(false)
            .with_impl(imp)
            .new_graph()
            .unwrap();
        g.add_vertices(3).unwrap();
        assert_eq!(g.add_edge(0, 1), Ok(0));
        assert_eq!(g.add_edge(1, 2), Ok(1));

        g.remove_vertex(0).unwrap();
        assert_eq!(g.vertices(), 0..2, "{imp:?}");
        assert_eq!(g.edges(), 0..1, "{imp:?}");
        assert_eq!(g.out_edges(0).to_vec(), vec![0], "{imp:?}");
        let ends = (g.edge_source(0), g.edge_target(0));
        assert!(ends == (1, 0) || ends == (0, 1), "{imp:?}: {ends:?}");
        assert_eq!(g.get_edge(0, 1), Some(0), "{imp:?}");
        check_dense(&*g);
    }
}

#[test]
fn parallel_edges_per_backend() {
    let mut hashmap = HashmapGraph::new(Capabilities::directed());
    hashmap.add_vertices(2).unwrap();
    hashmap.add_edge(0, 1).unwrap();
    assert_eq!(
        hashmap.add_edge(0, 1),
        Err(GraphError::ParallelEdgesNotSupported { from: 0, to: 1 })
    );
    assert_eq!(hashmap.edge_count(), 1);

    let mut array = ArrayGraph::new(Capabilities::directed());
    array.add_vertices(2).unwrap();
    array.add_edge(0, 1).unwrap();
    array.add_edge(0, 1).unwrap();
    assert_eq!(array.get_edges(0, 1).len(), 2);
}

#[test]
fn self_edge_rejected_without_side_effects() {
    let mut g = MatrixGraph::new(Capabilities::new(true, false, false));
    g.add_vertices(2).unwrap();
    g.add_vertices_weights("w", 0u8).unwrap();
    assert_eq!(g.add_edge(1, 1), Err(GraphError::SelfEdgesNotSupported(1)));
    assert_eq!(
        g.add_edges(&[(0, 1), (1, 1)]),
        Err(GraphError::SelfEdgesNotSupported(1))
    );
    assert_eq!((g.vertex_count(), g.edge_count()), (2, 0));
    assert!(g.get_edge(0, 1).is_none());
}

#[test]
fn removing_non_last_vertex_repoints_incident_edges() {
    let mut g = LinkedGraph::new(Capabilities::directed());
    g.add_vertices(5).unwrap();
    // Vertex 4 is last and has edges in both directions plus one to the removed vertex.
    g.add_edges(&[(4, 0), (2, 4), (4, 1), (1, 3), (1, 4)]).unwrap();
    g.remove_vertex(1).unwrap();

    assert_eq!(g.vertex_count(), 4);
    let mut ends: Vec<(usize, usize)> = g.edges().map(|e| (g.edge_source(e), g.edge_target(e))).collect();
    ends.sort_unstable();
    assert_eq!(ends, vec![(1, 0), (2, 1)]);
    assert_eq!(g.out_edges(1).len(), 1);
    assert_eq!(g.in_edges(1).len(), 1);
    check_dense(&g);
}

#[test]
fn explicit_ids_round_trip() {
    let ends = [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)];
    let order = [3usize, 0, 4, 2, 1];
    let mut b = IndexGraphBuilder::directed();
    b.add_vertices(4);
    for &id in &order {
        let (u, v) = ends[id];
        b.add_edge_with_id(u, v, id).unwrap();
    }
    let g = b.build().unwrap();
    assert_eq!(g.edges(), 0..5);
    for (id, &(u, v)) in ends.iter().enumerate() {
        assert_eq!((g.edge_source(id), g.edge_target(id)), (u, v));
    }

    let re = b.re_index_and_build(false, true).unwrap();
    let map = re.edges_reindexing.as_ref().unwrap();
    for e in re.graph.edges() {
        let orig = map.reindexed_to_orig(e);
        assert_eq!((re.graph.edge_source(e), re.graph.edge_target(e)), ends[orig]);
    }
}

#[test]
fn immutable_view_of_view_is_same_instance() {
    let g = ArrayGraph::new(Capabilities::undirected());
    let view = g.immutable_view();
    assert!(std::ptr::eq(view.immutable_view(), &view));

    let ids: IdGraph<u32, u32> = IdGraph::new(&GraphFactory::directed()).unwrap();
    let id_view = ids.immutable_view();
    let index_view = id_view.index_graph();
    assert!(std::ptr::eq(index_view.graph(), ids.index_graph()));
}

#[test]
fn reversed_view_is_live_both_ways() {
    let mut g = ArrayGraph::new(Capabilities::directed());
    g.add_vertices(2).unwrap();
    {
        let mut rev = g.reversed_view();
        rev.add_edge(0, 1).unwrap();
        assert_eq!(rev.out_edges(0).to_vec(), vec![0]);
    }
    assert_eq!((g.edge_source(0), g.edge_target(0)), (1, 0));
    g.add_edge(0, 1).unwrap();
    let rev = g.reversed_view_ref();
    assert_eq!(rev.in_edges(0).to_vec(), vec![1]);
}

#[derive(Default)]
struct Journal(Arc<Mutex<Vec<(usize, usize)>>>);

impl IndexListener for Journal {
    fn swap_remove(&mut self, removed: usize, swapped: usize) {
        self.0.lock().unwrap().push((removed, swapped));
    }
}

#[test]
fn listeners_observe_every_relocation() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut g = ArrayGraph::new(Capabilities::directed());
    g.add_vertices(4).unwrap();
    g.add_edges(&[(0, 1), (3, 2), (2, 0)]).unwrap();
    let id = g
        .vertex_space_mut()
        .unwrap()
        .add_listener(Box::new(Journal(Arc::clone(&log))));
    let edge_log = Arc::new(Mutex::new(Vec::new()));
    g.edge_space_mut()
        .unwrap()
        .add_listener(Box::new(Journal(Arc::clone(&edge_log))));

    g.remove_vertex(0).unwrap();
    assert_eq!(*log.lock().unwrap(), vec![(0, 3)]);
    assert_eq!(*edge_log.lock().unwrap(), vec![(2, 2), (0, 1)]);

    assert!(g.vertex_space_mut().unwrap().remove_listener(id).is_some());
    g.remove_vertex(0).unwrap();
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[test]
fn weights_survive_backend_copy() {
    let mut g = LinkedGraph::new(Capabilities::undirected());
    g.add_vertices(3).unwrap();
    g.add_edges(&[(0, 1), (1, 2)]).unwrap();
    g.add_edges_weights("cap", 1u64).unwrap().set(1, 9);

    let copy = GraphFactory::undirected()
        .with_impl(GraphImpl::Array)
        .new_copy_of(&g, true)
        .unwrap();
    assert_eq!(copy.edges_weights::<u64>("cap").unwrap().as_slice(), &[1, 9]);
    let bare = GraphFactory::undirected().new_copy_of(&g, false).unwrap();
    assert!(bare.edges_weights_keys().is_empty());
    assert_eq!(bare.get_edge(2, 1), Some(1));
}
