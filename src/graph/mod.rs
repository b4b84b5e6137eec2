//! Index graphs: dense vertex and edge indices over interchangeable storage backends.
//!
//! Graph implementations are organized into categories:
//! - `basic`: mutable backends (array, linked, hashmap, matrix) behind one engine
//! - `compressed`: the immutable CSR graph produced by the builder
//! - `views`: immutable and reversed projections of a live graph
//! - `id`: stable caller-chosen identifiers layered over the index space

pub mod basic;
pub mod builder;
pub mod capabilities;
pub mod compressed;
pub mod edge_iter;
pub mod factory;
pub mod id;
pub mod index;
pub mod traits;
pub mod views;
pub mod weights;

// Re-export commonly used types from submodules
pub use basic::{ArrayGraph, HashmapGraph, LinkedGraph, MatrixGraph, MutableGraph};
pub use builder::{IndexGraphBuilder, ReIndexedGraph, ReIndexingMap};
pub use capabilities::Capabilities;
pub use compressed::{CsrGraph, CsrOptions};
pub use edge_iter::{EdgeIter, EdgeSet, Endpoints};
pub use factory::{GraphFactory, GraphHint, GraphImpl};
pub use id::{
    EdgeWeightsMut, GraphId, IdGraph, ImmutableIdView, IndexIdMap, MappedWeights, VertexWeightsMut,
};
pub use index::{IndexColumn, IndexListener, IndexSpace, ListenerId};
pub use traits::{GraphViewExt, IndexGraph, IndexGraphMut};
pub use views::{ImmutableView, ReversedView};
pub use weights::{CardinalityWeight, WeightFunction, Weights, WeightsExt, WeightsMutExt};
