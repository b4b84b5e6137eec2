use super::*;
use crate::graph::basic::{ArrayGraph, HashmapGraph};
use crate::graph::capabilities::Capabilities;
use crate::graph::weights::WeightsExt;

fn triangle() -> IdGraph<&'static str, u32> {
    let mut g = IdGraph::new(&GraphFactory::directed()).unwrap();
    for v in ["a", "b", "c"] {
        g.add_vertex(v).unwrap();
    }
    g.add_edge(&"a", &"b", 10).unwrap();
    g.add_edge(&"b", &"c", 20).unwrap();
    g.add_edge(&"c", &"a", 30).unwrap();
    g
}

fn assert_bijection<V: GraphId, E: GraphId, G: IndexGraph>(g: &IdGraph<V, E, G>) {
    assert_eq!(g.vertex_count(), g.index_graph().vertex_count());
    assert_eq!(g.edge_count(), g.index_graph().edge_count());
    for (i, id) in g.vertices_ids().enumerate() {
        assert_eq!(g.vertex_index(id), Some(i));
    }
    for (i, id) in g.edges_ids().enumerate() {
        assert_eq!(g.edge_index(id), Some(i));
    }
}

#[test]
fn ids_map_to_dense_indices() {
    let g = triangle();
    assert_bijection(&g);
    assert_eq!(g.vertex_index(&"c"), Some(2));
    assert_eq!(g.edge_index(&20), Some(1));
    assert_eq!(g.edge_source(&30), Some(&"c"));
    assert_eq!(g.edge_target(&30), Some(&"a"));
    assert_eq!(g.get_edge(&"b", &"c"), Some(&20));
    assert_eq!(g.out_edges(&"a"), Some(vec![&10]));
    assert_eq!(g.in_edges(&"a"), Some(vec![&30]));
    assert_eq!(g.out_edges(&"z"), None);
}

#[test]
fn removal_relocates_last_id() {
    let mut g = triangle();
    g.remove_vertex(&"a").unwrap();
    assert_bijection(&g);
    // "c" was last and took index 0.
    assert_eq!(g.vertex_index(&"c"), Some(0));
    assert_eq!(g.vertex_index(&"a"), None);
    assert_eq!(g.edges_ids().copied().collect::<Vec<_>>(), vec![20]);
    assert_eq!(g.edge_source(&20), Some(&"b"));
    assert_eq!(g.edge_target(&20), Some(&"c"));

    g.remove_edge(&20).unwrap();
    assert_eq!(g.edge_count(), 0);
    assert_bijection(&g);
}

#[test]
fn unknown_and_duplicate_ids() {
    let mut g = triangle();
    assert_eq!(
        g.add_vertex("a"),
        Err(GraphError::DuplicateVertexId("\"a\"".into()))
    );
    assert_eq!(
        g.add_edge(&"a", &"c", 10),
        Err(GraphError::DuplicateEdgeId("10".into()))
    );
    assert_eq!(
        g.add_edge(&"a", &"q", 40),
        Err(GraphError::UnknownVertexId("\"q\"".into()))
    );
    assert_eq!(g.remove_edge(&99), Err(GraphError::UnknownEdgeId("99".into())));
    assert_eq!(
        g.remove_vertex(&"q"),
        Err(GraphError::UnknownVertexId("\"q\"".into()))
    );
    assert_bijection(&g);
    assert_eq!(g.edge_count(), 3);
}

#[test]
fn capability_errors_leave_maps_untouched() {
    let factory = GraphFactory::undirected();
    let mut g: IdGraph<u8, u8> = IdGraph::new(&factory).unwrap();
    g.add_vertex(1).unwrap();
    assert_eq!(g.add_edge(&1, &1, 0), Err(GraphError::SelfEdgesNotSupported(0)));
    assert_eq!(g.edge_count(), 0);
    assert_eq!(g.edge_index(&0), None);
}

#[test]
fn weights_by_id_survive_removal() {
    let mut g = triangle();
    {
        let mut w = g.add_vertices_weights("rank", 0i64).unwrap();
        w.set(&"a", 1).unwrap();
        w.set(&"b", 2).unwrap();
        w.set(&"c", 3).unwrap();
        assert_eq!(w.set(&"x", 9), Err(GraphError::UnknownVertexId("\"x\"".into())));
    }
    g.add_edges_weights("cost", 0.0f64).unwrap().set(&20, 2.5).unwrap();

    g.remove_vertex(&"a").unwrap();
    let rank = g.vertices_weights::<i64>("rank").unwrap();
    assert_eq!(rank.get(&"c"), Some(&3));
    assert_eq!(rank.get(&"b"), Some(&2));
    assert_eq!(rank.get(&"a"), None);
    assert_eq!(rank.iter().count(), 2);
    assert_eq!(g.edges_weights::<f64>("cost").unwrap().get(&20), Some(&2.5));
    assert!(g.edges_weights::<i32>("cost").is_none());
    assert!(matches!(
        g.edges_weights_mut::<i32>("cost"),
        Err(GraphError::UnknownWeightsKey { .. })
    ));
}

#[test]
fn wraps_existing_index_graph() {
    let mut inner = HashmapGraph::new(Capabilities::directed());
    inner.add_vertices(2).unwrap();
    inner.add_edge(1, 0).unwrap();
    let g = IdGraph::from_index_graph(inner, vec!['x', 'y'], vec!["yx"]).unwrap();
    assert_eq!(g.get_edge(&'y', &'x'), Some(&"yx"));
    assert_eq!(g.index_graph().backend_name(), "hashmap");

    let mut dup = ArrayGraph::new(Capabilities::directed());
    dup.add_vertices(2).unwrap();
    let err = IdGraph::<char, u8, _>::from_index_graph(dup, vec!['x', 'x'], vec![]).unwrap_err();
    assert_eq!(err, GraphError::DuplicateVertexId("'x'".into()));
}

#[test]
fn immutable_id_view() {
    let g = triangle();
    let view = g.immutable_view();
    assert!(core::ptr::eq(view.immutable_view(), &view));
    assert_eq!(view.vertex_index(&"b"), Some(1));

    let mut index = view.index_graph();
    assert_eq!(index.edge_count(), 3);
    assert_eq!(index.add_vertex(), Err(GraphError::ImmutableGraph));
    assert!(core::ptr::eq(index.immutable_view(), &index));
}

#[test]
fn clear_empties_maps() {
    let mut g = triangle();
    g.clear().unwrap();
    assert_eq!(g.vertex_count(), 0);
    assert_eq!(g.vertex_index(&"a"), None);
    g.add_vertex("a").unwrap();
    assert_eq!(g.vertex_index(&"a"), Some(0));
}

#[test]
fn id_maps_ride_the_index_spaces() {
    let mut g = triangle();
    g.add_vertices_weights("rank", 0u8).unwrap();
    assert_eq!(g.index_graph().vertices_weights_keys(), vec!["rank".to_owned()]);
    assert!(g.index_graph().edges_weights_keys().is_empty());

    // A copy of the index graph carries the weights but not the id maps.
    let copy = GraphFactory::directed().new_copy_of(g.index_graph(), true).unwrap();
    assert_eq!(copy.vertices_weights_keys(), vec!["rank".to_owned()]);

    g.remove_vertex(&"b").unwrap();
    assert_eq!(g.vertex_ids().len(), 2);
    assert_eq!(g.edge_ids().len(), 1);
    assert_eq!(g.edge_source(&30), Some(&"c"));
    assert_bijection(&g);
}

#[test]
fn reversed_id_view_is_live_both_ways() {
    let mut g = triangle();
    {
        let rev = g.reversed_view_ref();
        assert_eq!(rev.edge_source(&10), Some(&"b"));
        assert_eq!(rev.edge_target(&10), Some(&"a"));
        assert_eq!(rev.out_edges(&"a"), Some(vec![&30]));
        assert_eq!(rev.in_edges(&"a"), Some(vec![&10]));
        assert_eq!(rev.get_edge(&"b", &"a"), Some(&10));
        assert_eq!(rev.get_edge(&"a", &"b"), None);
        assert_eq!(rev.index_graph().edge_source(0), 1);
        assert!(core::ptr::eq(rev.index_graph().graph(), g.index_graph()));
    }
    {
        let mut rev = g.reversed_view();
        rev.add_vertex("d").unwrap();
        rev.add_edge(&"d", &"a", 40).unwrap();
        rev.remove_edge(&20).unwrap();
        rev.add_vertices_weights("w", 0u8).unwrap().set(&"d", 4).unwrap();
        assert_eq!(rev.edge_source(&40), Some(&"d"));
        assert_bijection(&rev);
    }
    assert_eq!(g.edge_source(&40), Some(&"a"));
    assert_eq!(g.edge_target(&40), Some(&"d"));
    assert_eq!(g.edge_index(&20), None);
    assert_eq!(g.edge_index(&40), Some(1));
    assert_eq!(g.vertices_weights::<u8>("w").unwrap().get(&"d"), Some(&4));

    g.add_edge(&"b", &"d", 50).unwrap();
    assert_eq!(g.reversed_view_ref().out_edges(&"d").map(|e| e.len()), Some(2));
    assert_bijection(&g);
}
