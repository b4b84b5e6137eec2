//! Accumulates vertices and edges, validates them once, and materializes a graph.
//!
//! A builder accepts edges under one of two protocols, never both:
//! - sequential: [`IndexGraphBuilder::add_edge`] numbers edges `0..m` in insertion order;
//! - explicit: [`IndexGraphBuilder::add_edge_with_id`] places each edge at a
//!   caller-chosen index, and the indices must form exactly `0..m` by build time.
//!   Explicit ids are kept in a sparse map until then, so an id far beyond the
//!   edge count costs nothing and is reported by the build.
//!
//! Capability conformance and id contiguity are validated by every build call,
//! never per insertion, so construction stays linear. Building borrows the
//! builder and never changes it, so a failed build leaves the builder exactly as it was.

use core::ops::Range;
use std::collections::{HashMap, HashSet};

use crate::error::{GraphError, GraphResult};
use crate::graph::capabilities::Capabilities;
use crate::graph::compressed::CsrGraph;
use crate::graph::factory::GraphFactory;
use crate::graph::index::IndexSpace;
use crate::graph::traits::{IndexGraph, IndexGraphMut};
use crate::graph::weights::{unknown_key, Weights};


/// A bijection between original and re-indexed positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReIndexingMap {
    orig_to_reindexed: Vec<usize>,
    reindexed_to_orig: Vec<usize>,
}

impl ReIndexingMap {
    /// Builds the map from its reindexed → original direction.
    ///
    /// # Panics
    /// Panics if `reindexed_to_orig` is not a permutation of `0..len`.
    pub fn from_reindexed_to_orig(reindexed_to_orig: Vec<usize>) -> Self {
        let mut orig_to_reindexed = vec![usize::MAX; reindexed_to_orig.len()];
        for (new, &orig) in reindexed_to_orig.iter().enumerate() {
            assert!(
                orig < orig_to_reindexed.len() && orig_to_reindexed[orig] == usize::MAX,
                "re-indexing is not a permutation"
            );
            orig_to_reindexed[orig] = new;
        }
        Self {
            orig_to_reindexed,
            reindexed_to_orig,
        }
    }

    /// The new index of original index `orig`.
    #[inline]
    pub fn orig_to_reindexed(&self, orig: usize) -> usize {
        self.orig_to_reindexed[orig]
    }

    /// The original index of new index `reindexed`.
    #[inline]
    pub fn reindexed_to_orig(&self, reindexed: usize) -> usize {
        self.reindexed_to_orig[reindexed]
    }

    /// Number of indices.
    pub fn len(&self) -> usize {
        self.reindexed_to_orig.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.reindexed_to_orig.is_empty()
    }
}

/// A built graph plus the re-indexing chosen while building it.
///
/// Either map is `None` when the corresponding indices were kept as inserted.
#[derive(Debug)]
pub struct ReIndexedGraph<G> {
    /// The built graph.
    pub graph: G,
    /// Vertex re-indexing, if any.
    pub vertices_reindexing: Option<ReIndexingMap>,
    /// Edge re-indexing, if any.
    pub edges_reindexing: Option<ReIndexingMap>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeIdMode {
    Unset,
    Sequential,
    Explicit,
}

/// Builds [`CsrGraph`]s and mutable graphs from accumulated vertices and edges.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `add_vertex` / `add_edge` | \(O(1)\) amortized | endpoints must already exist |
/// | `build` | \(O((n + m) \log m)\) | validation plus compaction |
/// | `build_mutable` | \(O(n + m)\) | plus backend insertion cost |
#[derive(Debug)]
pub struct IndexGraphBuilder {
    factory: GraphFactory,
    vertices: IndexSpace,
    edges: IndexSpace,
    /// Endpoints in insertion order. In sequential mode this is also index order.
    sources: Vec<usize>,
    targets: Vec<usize>,
    /// Explicit edge id to insertion position.
    explicit: HashMap<usize, usize>,
    mode: EdgeIdMode,
}

impl IndexGraphBuilder {
    /// Creates a builder for graphs with the given capabilities.
    pub fn new(capabilities: Capabilities) -> Self {
        Self::with_factory(GraphFactory::with_capabilities(capabilities))
    }

    /// Creates a builder for directed graphs with default capabilities.
    pub fn directed() -> Self {
        Self::with_factory(GraphFactory::directed())
    }

    /// Creates a builder for undirected graphs with default capabilities.
    pub fn undirected() -> Self {
        Self::with_factory(GraphFactory::undirected())
    }

    pub(crate) fn with_factory(factory: GraphFactory) -> Self {
        Self {
            factory,
            vertices: IndexSpace::new(),
            edges: IndexSpace::new(),
            sources: Vec::new(),
            targets: Vec::new(),
            explicit: HashMap::new(),
            mode: EdgeIdMode::Unset,
        }
    }

    /// Creates a builder pre-filled with the vertices, edges and weights of `graph`.
    ///
    /// Indices are preserved; the builder is in sequential mode.
    pub fn new_copy_of<G: IndexGraph + ?Sized>(graph: &G) -> Self {
        let ends = graph.endpoints();
        let mut builder = Self::new(graph.capabilities());
        builder.vertices = graph.vertex_space().clone_columns(None);
        builder.edges = graph.edge_space().clone_columns(None);
        builder.sources = (0..ends.len()).map(|e| ends.source(e)).collect();
        builder.targets = (0..ends.len()).map(|e| ends.target(e)).collect();
        if !ends.is_empty() {
            builder.mode = EdgeIdMode::Sequential;
        }
        builder
    }

    /// The capabilities every built graph will have.
    pub fn capabilities(&self) -> Capabilities {
        self.factory.capabilities()
    }

    /// Number of vertices added so far.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges added so far.
    pub fn edge_count(&self) -> usize {
        self.sources.len()
    }

    /// Insertion position of the edge with index `edge`.
    fn position(&self, edge: usize) -> Option<usize> {
        match self.mode {
            EdgeIdMode::Explicit => self.explicit.get(&edge).copied(),
            _ => (edge < self.sources.len()).then_some(edge),
        }
    }

    /// Source of the edge with index `edge`, if one was added there.
    pub fn edge_source(&self, edge: usize) -> Option<usize> {
        self.position(edge).map(|pos| self.sources[pos])
    }

    /// Target of the edge with index `edge`, if one was added there.
    pub fn edge_target(&self, edge: usize) -> Option<usize> {
        self.position(edge).map(|pos| self.targets[pos])
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self) -> usize {
        self.vertices.push()
    }

    /// Adds `count` vertices and returns their indices.
    pub fn add_vertices(&mut self, count: usize) -> Range<usize> {
        self.vertices.extend(count)
    }

    fn check_endpoints(&self, source: usize, target: usize) -> GraphResult<()> {
        for v in [source, target] {
            if !self.vertices.contains(v) {
                return Err(GraphError::NoSuchVertex(v));
            }
        }
        Ok(())
    }

    fn check_mode(&self, mode: EdgeIdMode) -> GraphResult<()> {
        if self.mode == EdgeIdMode::Unset || self.mode == mode {
            Ok(())
        } else {
            Err(GraphError::MixedEdgeIdModes)
        }
    }

    /// Adds an edge numbered as the current edge count.
    pub fn add_edge(&mut self, source: usize, target: usize) -> GraphResult<usize> {
        self.check_mode(EdgeIdMode::Sequential)?;
        self.check_endpoints(source, target)?;
        self.mode = EdgeIdMode::Sequential;
        let e = self.sources.len();
        self.sources.push(source);
        self.targets.push(target);
        self.edges.push();
        Ok(e)
    }

    /// Adds a batch of sequentially numbered edges. Either all are added or none is.
    pub fn add_edges(&mut self, edges: &[(usize, usize)]) -> GraphResult<Range<usize>> {
        self.check_mode(EdgeIdMode::Sequential)?;
        for &(u, v) in edges {
            self.check_endpoints(u, v)?;
        }
        if edges.is_empty() {
            let end = self.sources.len();
            return Ok(end..end);
        }
        self.mode = EdgeIdMode::Sequential;
        let begin = self.sources.len();
        self.sources.extend(edges.iter().map(|&(u, _)| u));
        self.targets.extend(edges.iter().map(|&(_, v)| v));
        Ok(self.edges.extend(edges.len()))
    }

    fn claim_slot(&self, id: usize) -> GraphResult<()> {
        if self.explicit.contains_key(&id) {
            return Err(GraphError::DuplicateEdgeId(id.to_string()));
        }
        Ok(())
    }

    fn place(&mut self, source: usize, target: usize, id: usize) {
        self.explicit.insert(id, self.sources.len());
        self.sources.push(source);
        self.targets.push(target);
        self.edges.push();
    }

    /// Adds an edge at the caller-chosen index `id`.
    ///
    /// Ids may arrive in any order; together they must form `0..m` when the graph is built.
    /// Any id is accepted here, and one outside `0..m` fails the build with
    /// [`GraphError::NonContiguousEdgeIds`].
    pub fn add_edge_with_id(&mut self, source: usize, target: usize, id: usize) -> GraphResult<()> {
        self.check_mode(EdgeIdMode::Explicit)?;
        self.check_endpoints(source, target)?;
        self.claim_slot(id)?;
        self.mode = EdgeIdMode::Explicit;
        self.place(source, target, id);
        Ok(())
    }

    /// Adds a batch of edges with caller-chosen indices. Either all are added or none is.
    pub fn add_edges_with_ids(&mut self, edges: &[(usize, usize, usize)]) -> GraphResult<()> {
        self.check_mode(EdgeIdMode::Explicit)?;
        let mut batch = HashSet::with_capacity(edges.len());
        for &(u, v, id) in edges {
            self.check_endpoints(u, v)?;
            self.claim_slot(id)?;
            if !batch.insert(id) {
                return Err(GraphError::DuplicateEdgeId(id.to_string()));
            }
        }
        if edges.is_empty() {
            return Ok(());
        }
        self.mode = EdgeIdMode::Explicit;
        for &(u, v, id) in edges {
            self.place(u, v, id);
        }
        Ok(())
    }

    /// Removes every vertex and edge and resets the edge-id protocol. Weight columns stay registered.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.sources.clear();
        self.targets.clear();
        self.explicit.clear();
        self.mode = EdgeIdMode::Unset;
    }

    /// Creates vertex weights under `key`.
    pub fn add_vertices_weights<T: Clone + Send + Sync + 'static>(&mut self, key: &str, default: T) -> GraphResult<&mut Weights<T>> {
        self.vertices.add_column(key, Box::new(Weights::new(default)))?;
        self.vertices_weights_mut(key)
    }

    /// Creates edge weights under `key`.
    ///
    /// In explicit mode they are indexed by edge id and cover the ids below the
    /// current edge count, which are exactly the ids of a buildable graph.
    pub fn add_edges_weights<T: Clone + Send + Sync + 'static>(&mut self, key: &str, default: T) -> GraphResult<&mut Weights<T>> {
        self.edges.add_column(key, Box::new(Weights::new(default)))?;
        self.edges_weights_mut(key)
    }

    /// The vertex weights under `key`.
    pub fn vertices_weights<T: Clone + Send + Sync + 'static>(&self, key: &str) -> Option<&Weights<T>> {
        self.vertices.column_as(key)
    }

    /// The edge weights under `key`.
    pub fn edges_weights<T: Clone + Send + Sync + 'static>(&self, key: &str) -> Option<&Weights<T>> {
        self.edges.column_as(key)
    }

    /// Mutable access to the vertex weights under `key`.
    pub fn vertices_weights_mut<T: Clone + Send + Sync + 'static>(&mut self, key: &str) -> GraphResult<&mut Weights<T>> {
        self.vertices
            .column_as_mut(key)
            .ok_or_else(|| unknown_key::<T>(key))
    }

    /// Mutable access to the edge weights under `key`.
    pub fn edges_weights_mut<T: Clone + Send + Sync + 'static>(&mut self, key: &str) -> GraphResult<&mut Weights<T>> {
        self.edges
            .column_as_mut(key)
            .ok_or_else(|| unknown_key::<T>(key))
    }

    /// Endpoints in edge-index order, once the explicit ids are known to form `0..m`.
    fn endpoints_by_index(&self) -> GraphResult<(Vec<usize>, Vec<usize>)> {
        let m = self.sources.len();
        if self.mode != EdgeIdMode::Explicit {
            return Ok((self.sources.clone(), self.targets.clone()));
        }
        if self.explicit.keys().any(|&id| id >= m) {
            let missing = (0..m).find(|id| !self.explicit.contains_key(id)).unwrap_or(m);
            return Err(GraphError::NonContiguousEdgeIds {
                edge_count: m,
                detail: format!("no edge with id {missing}"),
            });
        }
        let mut sources = vec![0; m];
        let mut targets = vec![0; m];
        for (&id, &pos) in &self.explicit {
            sources[id] = self.sources[pos];
            targets[id] = self.targets[pos];
        }
        Ok((sources, targets))
    }

    /// Checks id contiguity and capability conformance of the accumulated edges.
    fn validate(&self) -> GraphResult<(Vec<usize>, Vec<usize>)> {
        let (sources, targets) = self.endpoints_by_index()?;
        let caps = self.capabilities();
        if !caps.self_edges {
            if let Some(e) = (0..sources.len()).find(|&e| sources[e] == targets[e]) {
                return Err(GraphError::SelfEdgesNotSupported(sources[e]));
            }
        }
        if !caps.parallel_edges {
            let mut seen = HashSet::with_capacity(sources.len());
            for (&u, &v) in sources.iter().zip(&targets) {
                let key = if caps.directed || u <= v { (u, v) } else { (v, u) };
                if !seen.insert(key) {
                    return Err(GraphError::ParallelEdgesNotSupported { from: u, to: v });
                }
            }
        }
        Ok((sources, targets))
    }

    fn compact(&self, reindex_edges: bool) -> GraphResult<(CsrGraph, Option<Vec<usize>>)> {
        let (sources, targets) = self.validate()?;
        let compacted = CsrGraph::compact(
            self.capabilities(),
            &self.vertices,
            &self.edges,
            sources,
            targets,
            self.factory.csr(),
            reindex_edges,
        );
        #[cfg(feature = "tracing")]
        tracing::debug!(
            vertices = self.vertices.len(),
            edges = self.sources.len(),
            edges_reindexed = compacted.edges_new_to_orig.is_some(),
            "compacted graph into CSR"
        );
        Ok((compacted.graph, compacted.edges_new_to_orig))
    }

    /// Builds an immutable CSR graph with the indices exactly as inserted.
    pub fn build(&self) -> GraphResult<CsrGraph> {
        self.compact(false).map(|(graph, _)| graph)
    }

    /// Builds a mutable graph of the factory's backend with the indices exactly as inserted.
    pub fn build_mutable(&self) -> GraphResult<Box<dyn IndexGraphMut>> {
        let (sources, targets) = self.validate()?;
        let factory = self
            .factory
            .clone()
            .expected_vertices(self.vertices.len())
            .expected_edges(self.sources.len());
        let mut graph = factory.new_graph()?;
        graph.add_vertices(self.vertices.len())?;
        let edges: Vec<(usize, usize)> = sources.into_iter().zip(targets).collect();
        graph.add_edges(&edges)?;
        self.vertices.copy_columns_into(graph.vertex_space_mut()?)?;
        self.edges.copy_columns_into(graph.edge_space_mut()?)?;
        Ok(graph)
    }

    /// Builds an immutable CSR graph, re-indexing where it improves locality.
    ///
    /// Vertices keep their indices. Edges of a directed graph are renumbered
    /// when `reindex_edges` is set, so that the out-edges of each vertex form a
    /// contiguous index range sorted by target; the returned map translates
    /// between the two numberings. Undirected edges keep their indices.
    pub fn re_index_and_build(
        &self,
        _reindex_vertices: bool,
        reindex_edges: bool,
    ) -> GraphResult<ReIndexedGraph<CsrGraph>> {
        let (graph, edges_new_to_orig) = self.compact(reindex_edges)?;
        Ok(ReIndexedGraph {
            graph,
            vertices_reindexing: None,
            edges_reindexing: edges_new_to_orig.map(ReIndexingMap::from_reindexed_to_orig),
        })
    }

    /// Builds a mutable graph. Mutable backends gain nothing from re-indexing, so both maps are `None`.
    pub fn re_index_and_build_mutable(
        &self,
        _reindex_vertices: bool,
        _reindex_edges: bool,
    ) -> GraphResult<ReIndexedGraph<Box<dyn IndexGraphMut>>> {
        Ok(ReIndexedGraph {
            graph: self.build_mutable()?,
            vertices_reindexing: None,
            edges_reindexing: None,
        })
    }
}
