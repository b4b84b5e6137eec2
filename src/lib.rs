//! # `densegraph` - Index Graph Storage Engine
//!
//! Graphs whose vertices and edges are dense indices `0..n` and `0..m`, stored
//! behind interchangeable backends, with weights kept as parallel columns.
//!
//! ## Index Space Guarantees
//!
//! - **Dense indices**: a graph with `n` vertices uses exactly `0..n`, with `m`
//!   edges exactly `0..m`, at every observable point.
//! - **Swap-remove**: removing index `i` moves the last index into `i`. Weight
//!   columns, id maps and registered listeners are told `(i, last)` before the
//!   space shrinks, so they never disagree with the graph.
//! - **Atomic failure**: a rejected mutation leaves the graph untouched, batch
//!   insertions included.
//!
//! ## Key Features
//!
//! - **Backends**: array, linked-list, hashmap and matrix adjacency behind one
//!   [`IndexGraphMut`] interface, plus an immutable [`CsrGraph`]
//! - **Builder**: accumulate edges, validate once, compact into CSR with
//!   optional edge re-indexing for out-edge locality
//! - **Views**: immutable and reversed projections that never copy
//! - **Ids**: [`IdGraph`] names vertices and edges by caller-chosen keys
//!
//! ## Architecture
//!
//! Algorithms are written against [`IndexGraph`] only. A [`GraphFactory`] picks
//! the backend from capabilities and hints:
//!
//! 1. **Capabilities** (`directed`, `self_edges`, `parallel_edges`):
//!    - Fixed at construction
//!    - Enforced by every insertion and by every build
//!
//! 2. **Index spaces** ([`IndexSpace`]):
//!    - Own the vertex or edge count
//!    - Broadcast swap-remove to columns and listeners in registration order
//!
//! 3. **Adjacency** ([`Adjacency`](graph::basic::Adjacency)):
//!    - Per-backend incidence storage driven by one shared engine
//!    - Rename and detach hooks keep edge lists intact under relocation
//!
//! ## Example
//!
//! ```rust
//! use densegraph::{GraphFactory, IndexGraph, IndexGraphMut, WeightsMutExt};
//!
//! let mut g = GraphFactory::directed().new_graph().unwrap();
//! g.add_vertices(3).unwrap();
//! g.add_edges(&[(0, 1), (1, 2), (2, 0)]).unwrap();
//! g.add_vertices_weights("label", 'a').unwrap().set(2, 'c');
//!
//! // Vertex 2 is last, so it takes over index 0.
//! g.remove_vertex(0).unwrap();
//! assert_eq!(g.vertex_count(), 2);
//! assert_eq!(g.edge_count(), 1);
//! assert_eq!(g.get_edge(1, 0), Some(0));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod graph;

pub use error::{GraphError, GraphResult};
pub use graph::{
    ArrayGraph, Capabilities, CsrGraph, CsrOptions, EdgeIter, EdgeSet, Endpoints, GraphFactory,
    GraphHint, GraphImpl, GraphViewExt, HashmapGraph, IdGraph, ImmutableView, IndexGraph,
    IndexGraphBuilder, IndexGraphMut, IndexSpace, LinkedGraph, MatrixGraph, ReversedView, Weights,
    WeightsExt, WeightsMutExt,
};

// Compile-time assertions for memory layout
const _: () = {
    use core::mem;

    // Capabilities are three flags and must stay a plain copyable value.
    assert!(mem::size_of::<Capabilities>() == 3);

    // An endpoint view is two borrowed slices and nothing else.
    assert!(mem::size_of::<Endpoints<'static>>() == 4 * mem::size_of::<usize>());

    // Views are a single pointer to the backing graph.
    assert!(mem::size_of::<ImmutableView<'static, ArrayGraph>>() == mem::size_of::<usize>());
    assert!(mem::size_of::<ReversedView<&'static ArrayGraph>>() == mem::size_of::<usize>());
};

// Every graph can be shared with concurrent readers.
const _: fn() = || {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CsrGraph>();
    assert_send_sync::<ArrayGraph>();
    assert_send_sync::<LinkedGraph>();
    assert_send_sync::<HashmapGraph>();
    assert_send_sync::<MatrixGraph>();
    assert_send_sync::<IndexGraphBuilder>();
    assert_send_sync::<IdGraph<u64, u64, ArrayGraph>>();
};
