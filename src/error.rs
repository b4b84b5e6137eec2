//! Error types for graph construction and mutation.
//!
//! Every failure is reported synchronously at the call site and is never retried
//! internally. Single-step mutations fail atomically, and batch mutations are
//! validated before anything is applied, so an `Err` always means the graph is
//! exactly as it was before the call.

use thiserror::Error;

/// Errors that can occur while building, mutating or addressing a graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A self edge was inserted into a graph that does not support self edges.
    #[error("self edge ({0}, {0}) is not supported by this graph")]
    SelfEdgesNotSupported(usize),

    /// A second edge between the same endpoints was inserted into a graph that
    /// does not support parallel edges.
    #[error("edge ({from}, {to}) already exists and parallel edges are not supported")]
    ParallelEdgesNotSupported {
        /// Source of the rejected edge.
        from: usize,
        /// Target of the rejected edge.
        to: usize,
    },

    /// The requested capabilities cannot be provided by the selected backend.
    #[error("unsupported capabilities: {0}")]
    UnsupportedCapabilities(String),

    /// A vertex index outside `0..vertex_count`.
    #[error("no such vertex: {0}")]
    NoSuchVertex(usize),

    /// An edge index outside `0..edge_count`.
    #[error("no such edge: {0}")]
    NoSuchEdge(usize),

    /// A vertex id that is already mapped to an index.
    #[error("duplicate vertex id: {0}")]
    DuplicateVertexId(String),

    /// An edge id that is already mapped to an index.
    #[error("duplicate edge id: {0}")]
    DuplicateEdgeId(String),

    /// A vertex id that is not part of the graph.
    #[error("unknown vertex id: {0}")]
    UnknownVertexId(String),

    /// An edge id that is not part of the graph.
    #[error("unknown edge id: {0}")]
    UnknownEdgeId(String),

    /// Explicit edge ids given to a builder do not form `0..edge_count`.
    #[error("edge ids are not 0..{edge_count}: {detail}")]
    NonContiguousEdgeIds {
        /// Number of edges in the builder.
        edge_count: usize,
        /// Which id broke the sequence.
        detail: String,
    },

    /// Sequential and explicit edge-id insertion were mixed in one builder.
    #[error("cannot mix sequential and explicit edge ids in the same builder")]
    MixedEdgeIdModes,

    /// A weights column with the same key already exists.
    #[error("weights with key {0:?} already exist")]
    DuplicateWeightsKey(String),

    /// A column was registered with more rows than its index space has indices.
    #[error("column {key:?} has {found} rows but the index space has {expected}")]
    ColumnLengthMismatch {
        /// Key of the rejected column.
        key: String,
        /// Number of live indices.
        expected: usize,
        /// Rows held by the column.
        found: usize,
    },

    /// No weights column of the requested type exists under this key.
    #[error("no weights of type {element_type} with key {key:?}")]
    UnknownWeightsKey {
        /// Requested key.
        key: String,
        /// Requested element type.
        element_type: &'static str,
    },

    /// A mutation was attempted on an immutable graph or view.
    #[error("graph is immutable")]
    ImmutableGraph,
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
