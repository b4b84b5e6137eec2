use densegraph::{
    Capabilities, GraphFactory, GraphImpl, IndexGraph, IndexGraphMut, WeightsExt, WeightsMutExt,
};
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::Graph;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Operation {
    AddVertex,
    AddEdge(u8, u8),
    RemoveEdge(u8),
    RemoveVertex(u8),
    ReverseEdge(u8),
}

fn operations() -> impl Strategy<Value = Vec<Operation>> {
    proptest::collection::vec(
        prop_oneof![
            2 => Just(Operation::AddVertex),
            5 => (any::<u8>(), any::<u8>()).prop_map(|(u, v)| Operation::AddEdge(u, v)),
            2 => any::<u8>().prop_map(Operation::RemoveEdge),
            1 => any::<u8>().prop_map(Operation::RemoveVertex),
            1 => any::<u8>().prop_map(Operation::ReverseEdge),
        ],
        1..80,
    )
}

/// Reference model: a vertex count plus an edge list with swap-remove semantics.
#[derive(Debug, Default)]
struct Model {
    n: usize,
    edges: Vec<(usize, usize)>,
}

impl Model {
    fn has_edge(&self, caps: Capabilities, u: usize, v: usize) -> bool {
        self.edges
            .iter()
            .any(|&(s, t)| (s, t) == (u, v) || (!caps.directed && (t, s) == (u, v)))
    }

    fn accepts(&self, caps: Capabilities, u: usize, v: usize) -> bool {
        (u != v || caps.self_edges) && (caps.parallel_edges || !self.has_edge(caps, u, v))
    }

    fn remove_vertex(&mut self, v: usize) {
        let mut incident: Vec<usize> = (0..self.edges.len())
            .filter(|&e| self.edges[e].0 == v || self.edges[e].1 == v)
            .collect();
        incident.reverse();
        for e in incident {
            self.edges.swap_remove(e);
        }
        let last = self.n - 1;
        for (s, t) in &mut self.edges {
            if *s == last {
                *s = v;
            }
            if *t == last {
                *t = v;
            }
        }
        self.n -= 1;
    }

    fn out_edges(&self, caps: Capabilities, v: usize) -> Vec<usize> {
        (0..self.edges.len())
            .filter(|&e| {
                let (s, t) = self.edges[e];
                s == v || (!caps.directed && t == v)
            })
            .collect()
    }

    fn in_edges(&self, caps: Capabilities, v: usize) -> Vec<usize> {
        (0..self.edges.len())
            .filter(|&e| {
                let (s, t) = self.edges[e];
                t == v || (!caps.directed && s == v)
            })
            .collect()
    }
}

fn sorted(mut edges: Vec<usize>) -> Vec<usize> {
    edges.sort_unstable();
    edges
}

fn assert_matches_model<G: IndexGraph + ?Sized>(g: &G, model: &Model, caps: Capabilities, name: &str) {
    assert_eq!(g.vertex_count(), model.n, "{name}: vertex count");
    assert_eq!(g.edge_count(), model.edges.len(), "{name}: edge count");
    for (e, &ends) in model.edges.iter().enumerate() {
        assert_eq!((g.edge_source(e), g.edge_target(e)), ends, "{name}: endpoints of {e}");
    }
    for v in 0..model.n {
        assert_eq!(sorted(g.out_edges(v).to_vec()), model.out_edges(caps, v), "{name}: out of {v}");
        assert_eq!(sorted(g.in_edges(v).to_vec()), model.in_edges(caps, v), "{name}: in of {v}");
        for w in 0..model.n {
            match g.get_edge(v, w) {
                Some(e) => {
                    let (s, t) = model.edges[e];
                    assert!(
                        (s, t) == (v, w) || (!caps.directed && (t, s) == (v, w)),
                        "{name}: get_edge({v}, {w}) returned {e}"
                    );
                }
                None => assert!(!model.has_edge(caps, v, w), "{name}: get_edge({v}, {w}) missed"),
            }
        }
    }
}

fn run_differential(caps: Capabilities, impls: &[GraphImpl], ops: Vec<Operation>) {
    let mut graphs: Vec<(GraphImpl, Box<dyn IndexGraphMut>)> = impls
        .iter()
        .map(|&imp| {
            let factory = GraphFactory::with_capabilities(caps).with_impl(imp);
            (imp, factory.new_graph().unwrap())
        })
        .collect();
    let mut model = Model::default();

    for op in ops {
        match op {
            Operation::AddVertex => {
                model.n += 1;
                for (_, g) in &mut graphs {
                    assert_eq!(g.add_vertex(), Ok(model.n - 1));
                }
            }
            Operation::AddEdge(u, v) if model.n > 0 => {
                let (u, v) = (usize::from(u) % model.n, usize::from(v) % model.n);
                let ok = model.accepts(caps, u, v);
                if ok {
                    model.edges.push((u, v));
                }
                for (imp, g) in &mut graphs {
                    assert_eq!(g.add_edge(u, v).is_ok(), ok, "{imp:?}: add_edge({u}, {v})");
                }
            }
            Operation::RemoveEdge(e) if !model.edges.is_empty() => {
                let e = usize::from(e) % model.edges.len();
                model.edges.swap_remove(e);
                for (_, g) in &mut graphs {
                    g.remove_edge(e).unwrap();
                }
            }
            Operation::RemoveVertex(v) if model.n > 0 => {
                let v = usize::from(v) % model.n;
                model.remove_vertex(v);
                for (_, g) in &mut graphs {
                    g.remove_vertex(v).unwrap();
                }
            }
            Operation::ReverseEdge(e) if !model.edges.is_empty() => {
                let e = usize::from(e) % model.edges.len();
                let (u, v) = model.edges[e];
                let ok = !caps.directed || u == v || caps.parallel_edges || !model.has_edge(caps, v, u);
                if ok && caps.directed {
                    model.edges[e] = (v, u);
                }
                for (imp, g) in &mut graphs {
                    assert_eq!(g.reverse_edge(e).is_ok(), ok, "{imp:?}: reverse_edge({e})");
                }
            }
            _ => {}
        }
        for (imp, g) in &graphs {
            assert_matches_model(&**g, &model, caps, &format!("{imp:?}"));
        }
    }

    // The same edge list compacted into CSR answers every query identically.
    let mut builder = GraphFactory::with_capabilities(caps).new_builder();
    builder.add_vertices(model.n);
    builder.add_edges(&model.edges).unwrap();
    let csr = builder.build().unwrap();
    assert_matches_model(&csr, &model, caps, "csr");
}

proptest! {
    #[test]
    fn all_backends_agree_without_parallel_edges(
        directed in any::<bool>(),
        self_edges in any::<bool>(),
        ops in operations(),
    ) {
        let caps = Capabilities::new(directed, self_edges, false);
        run_differential(
            caps,
            &[GraphImpl::Array, GraphImpl::Linked, GraphImpl::Hashmap, GraphImpl::Matrix],
            ops,
        );
    }

    #[test]
    fn list_backends_agree_with_parallel_edges(
        directed in any::<bool>(),
        ops in operations(),
    ) {
        let caps = Capabilities::new(directed, true, true);
        run_differential(caps, &[GraphImpl::Array, GraphImpl::Linked], ops);
    }

    #[test]
    fn vertex_removal_matches_petgraph(
        edges in proptest::collection::vec((0usize..12, 0usize..12), 0..40),
        removals in proptest::collection::vec(any::<u8>(), 1..8),
    ) {
        let mut ours = GraphFactory::directed()
            .allow_self_edges(true)
            .new_graph()
            .unwrap();
        let mut theirs: Graph<usize, usize> = Graph::new();
        ours.add_vertices(12).unwrap();
        for v in 0..12 {
            theirs.add_node(v);
        }
        ours.add_vertices_weights("label", 0usize).unwrap();
        ours.add_edges_weights("label", 0usize).unwrap();
        for (i, &(u, v)) in edges.iter().enumerate() {
            let e = ours.add_edge(u, v).unwrap();
            ours.edges_weights_mut::<usize>("label").unwrap().set(e, i);
            theirs.add_edge(NodeIndex::new(u), NodeIndex::new(v), i);
        }
        for v in 0..12 {
            ours.vertices_weights_mut::<usize>("label").unwrap().set(v, v);
        }

        for r in removals {
            if ours.vertex_count() == 0 {
                break;
            }
            let v = usize::from(r) % ours.vertex_count();
            ours.remove_vertex(v).unwrap();
            theirs.remove_node(NodeIndex::new(v));

            prop_assert_eq!(ours.vertex_count(), theirs.node_count());
            prop_assert_eq!(ours.edge_count(), theirs.edge_count());
            let labels = ours.vertices_weights::<usize>("label").unwrap();
            for i in 0..ours.vertex_count() {
                prop_assert_eq!(Some(labels.get(i)), theirs.node_weight(NodeIndex::new(i)));
            }

            let edge_labels = ours.edges_weights::<usize>("label").unwrap();
            let mut ours_edges: Vec<(usize, usize, usize)> = ours
                .edges()
                .map(|e| (*labels.get(ours.edge_source(e)), *labels.get(ours.edge_target(e)), *edge_labels.get(e)))
                .collect();
            let mut theirs_edges: Vec<(usize, usize, usize)> = (0..theirs.edge_count())
                .filter_map(|e| {
                    let (s, t) = theirs.edge_endpoints(EdgeIndex::new(e))?;
                    Some((theirs[s], theirs[t], theirs[EdgeIndex::new(e)]))
                })
                .collect();
            ours_edges.sort_unstable();
            theirs_edges.sort_unstable();
            prop_assert_eq!(ours_edges, theirs_edges);
        }
    }
}
