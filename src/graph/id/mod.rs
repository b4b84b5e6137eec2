//! Stable caller-chosen identifiers on top of the dense index space.
//!
//! [`IdGraph`] pairs an index graph with two [`IndexIdMap`]s, one for vertices
//! and one for edges. The maps are attached to the index spaces of the graph
//! itself, so every removal reaches them in the same fan-out as the weight
//! columns and each map is a bijection between its ids and `0..count` at every
//! observable point. Algorithms run on [`IdGraph::index_graph`] and translate
//! results back to ids only at the boundary.

use core::any::Any;
use core::fmt::Debug;
use core::hash::Hash;
use core::marker::PhantomData;
use std::collections::HashMap;

use crate::error::{GraphError, GraphResult};
use crate::graph::factory::GraphFactory;
use crate::graph::index::{AttachedListener, IndexListener, IndexSpace, ListenerId};
use crate::graph::traits::{IndexGraph, IndexGraphMut};
use crate::graph::views::{ImmutableView, ReversedView};
use crate::graph::weights::{unknown_key, Weights};

#[cfg(test)]
mod tests;

/// Requirements on vertex and edge id types.
pub trait GraphId: Eq + Hash + Clone + Debug + Send + Sync + 'static {}

impl<T: Eq + Hash + Clone + Debug + Send + Sync + 'static> GraphId for T {}

/// A bijection between ids of type `K` and the indices `0..len`.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `id_to_index` | \(O(1)\) expected | hash lookup |
/// | `index_to_id` | \(O(1)\) | array access |
/// | `swap_remove` | \(O(1)\) expected | relocates the last id |
#[derive(Debug, Clone)]
pub struct IndexIdMap<K> {
    index_to_id: Vec<K>,
    id_to_index: HashMap<K, usize>,
}

impl<K> Default for IndexIdMap<K> {
    fn default() -> Self {
        Self {
            index_to_id: Vec::new(),
            id_to_index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> IndexIdMap<K> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ids.
    #[inline]
    pub fn len(&self) -> usize {
        self.index_to_id.len()
    }

    /// Returns `true` if the map holds no ids.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index_to_id.is_empty()
    }

    /// The index currently assigned to `id`.
    #[inline]
    pub fn id_to_index(&self, id: &K) -> Option<usize> {
        self.id_to_index.get(id).copied()
    }

    /// The id at `index`.
    #[inline]
    pub fn index_to_id(&self, index: usize) -> Option<&K> {
        self.index_to_id.get(index)
    }

    /// Every id, in index order.
    pub fn ids(&self) -> core::slice::Iter<'_, K> {
        self.index_to_id.iter()
    }

    /// Assigns the next index to `id`. Hands `id` back if it is already mapped.
    pub(crate) fn push(&mut self, id: K) -> Result<usize, K> {
        if self.id_to_index.contains_key(&id) {
            return Err(id);
        }
        let index = self.index_to_id.len();
        self.id_to_index.insert(id.clone(), index);
        self.index_to_id.push(id);
        Ok(index)
    }
}

impl<K: Eq + Hash + Clone + Send + Sync + 'static> IndexListener for IndexIdMap<K> {
    fn swap_remove(&mut self, removed: usize, swapped: usize) {
        self.index_to_id.swap(removed, swapped);
        for id in self.index_to_id.drain(swapped..) {
            self.id_to_index.remove(&id);
        }
        if removed != swapped {
            if let Some(index) = self.id_to_index.get_mut(&self.index_to_id[removed]) {
                *index = removed;
            }
        }
    }

    fn clear(&mut self) {
        self.index_to_id.clear();
        self.id_to_index.clear();
    }
}

impl<K: Eq + Hash + Clone + Send + Sync + 'static> AttachedListener for IndexIdMap<K> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A weight column read through an id map.
#[derive(Debug)]
pub struct MappedWeights<'a, K, T> {
    weights: &'a Weights<T>,
    ids: &'a IndexIdMap<K>,
}

impl<K, T> Clone for MappedWeights<'_, K, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, T> Copy for MappedWeights<'_, K, T> {}

impl<'a, K: Eq + Hash + Clone, T: Clone> MappedWeights<'a, K, T> {
    /// The weight of `id`.
    pub fn get(&self, id: &K) -> Option<&'a T> {
        let index = self.ids.id_to_index(id)?;
        Some(self.weights.get(index))
    }

    /// The value unset entries read as.
    pub fn default_value(&self) -> &'a T {
        self.weights.default_value()
    }

    /// Every `(id, weight)` pair, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a K, &'a T)> + 'a {
        self.ids.ids().zip(self.weights.iter())
    }

    /// The underlying index-keyed column.
    pub fn index_weights(&self) -> &'a Weights<T> {
        self.weights
    }
}

/// A writable weight column addressed by id.
#[derive(Debug)]
pub struct MappedWeightsMut<'a, K, T> {
    weights: &'a mut Weights<T>,
    ids: &'a IndexIdMap<K>,
}

impl<K: Eq + Hash + Clone + Debug, T: Clone> MappedWeightsMut<'_, K, T> {
    /// The weight of `id`.
    pub fn get(&self, id: &K) -> Option<&T> {
        let index = self.ids.id_to_index(id)?;
        Some(self.weights.get(index))
    }

    /// Sets the weight of `id` and returns the previous value.
    ///
    /// `unknown` builds the error for an id that is not mapped.
    fn set_with(&mut self, id: &K, value: T, unknown: fn(String) -> GraphError) -> GraphResult<T> {
        let index = self
            .ids
            .id_to_index(id)
            .ok_or_else(|| unknown(format!("{id:?}")))?;
        Ok(self.weights.set(index, value))
    }
}

/// Vertex weights addressed by vertex id.
#[derive(Debug)]
pub struct VertexWeightsMut<'a, V, T>(MappedWeightsMut<'a, V, T>);

/// Edge weights addressed by edge id.
#[derive(Debug)]
pub struct EdgeWeightsMut<'a, E, T>(MappedWeightsMut<'a, E, T>);

impl<V: Eq + Hash + Clone + Debug, T: Clone> VertexWeightsMut<'_, V, T> {
    /// The weight of vertex `id`.
    pub fn get(&self, id: &V) -> Option<&T> {
        self.0.get(id)
    }

    /// Sets the weight of vertex `id` and returns the previous value.
    pub fn set(&mut self, id: &V, value: T) -> GraphResult<T> {
        self.0.set_with(id, value, GraphError::UnknownVertexId)
    }
}

impl<E: Eq + Hash + Clone + Debug, T: Clone> EdgeWeightsMut<'_, E, T> {
    /// The weight of edge `id`.
    pub fn get(&self, id: &E) -> Option<&T> {
        self.0.get(id)
    }

    /// Sets the weight of edge `id` and returns the previous value.
    pub fn set(&mut self, id: &E, value: T) -> GraphResult<T> {
        self.0.set_with(id, value, GraphError::UnknownEdgeId)
    }
}

fn attached<L: AttachedListener>(space: &IndexSpace, id: ListenerId) -> &L {
    space
        .attached(id)
        .expect("id maps stay attached for the lifetime of the id graph")
}

fn attached_mut<L: AttachedListener>(space: &mut IndexSpace, id: ListenerId) -> &mut L {
    space
        .attached_mut(id)
        .expect("id maps stay attached for the lifetime of the id graph")
}

/// A graph addressed by stable vertex ids `V` and edge ids `E`.
///
/// ```
/// use densegraph::{GraphFactory, IdGraph};
///
/// let mut g: IdGraph<&str, u32> = IdGraph::new(&GraphFactory::directed()).unwrap();
/// g.add_vertex("a").unwrap();
/// g.add_vertex("b").unwrap();
/// g.add_edge(&"a", &"b", 7).unwrap();
/// g.remove_vertex(&"a").unwrap();
/// assert_eq!(g.vertex_index(&"b"), Some(0));
/// assert_eq!(g.edge_count(), 0);
/// ```
pub struct IdGraph<V, E, G = Box<dyn IndexGraphMut>> {
    graph: G,
    vertex_ids: ListenerId,
    edge_ids: ListenerId,
    _ids: PhantomData<fn() -> (V, E)>,
}

impl<V: GraphId, E: GraphId, G: IndexGraph> Debug for IdGraph<V, E, G> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IdGraph")
            .field("vertices", &self.vertex_ids().index_to_id)
            .field("edges", &self.edge_ids().index_to_id)
            .finish_non_exhaustive()
    }
}

impl<V: GraphId, E: GraphId> IdGraph<V, E> {
    /// Creates an empty id graph over a new index graph of `factory`.
    pub fn new(factory: &GraphFactory) -> GraphResult<Self> {
        Self::from_index_graph(factory.new_graph()?, Vec::new(), Vec::new())
    }
}

impl<V: GraphId, E: GraphId, G: IndexGraph> IdGraph<V, E, G> {
    /// The index graph for algorithm code.
    pub fn index_graph(&self) -> &G {
        &self.graph
    }

    /// The vertex id map.
    pub fn vertex_ids(&self) -> &IndexIdMap<V> {
        attached(self.graph.vertex_space(), self.vertex_ids)
    }

    /// The edge id map.
    pub fn edge_ids(&self) -> &IndexIdMap<E> {
        attached(self.graph.edge_space(), self.edge_ids)
    }

    /// Every vertex id, in index order.
    pub fn vertices_ids(&self) -> core::slice::Iter<'_, V> {
        self.vertex_ids().ids()
    }

    /// Every edge id, in index order.
    pub fn edges_ids(&self) -> core::slice::Iter<'_, E> {
        self.edge_ids().ids()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Index of vertex `id`.
    pub fn vertex_index(&self, id: &V) -> Option<usize> {
        self.vertex_ids().id_to_index(id)
    }

    /// Index of edge `id`.
    pub fn edge_index(&self, id: &E) -> Option<usize> {
        self.edge_ids().id_to_index(id)
    }

    fn require_vertex(&self, id: &V) -> GraphResult<usize> {
        self.vertex_index(id)
            .ok_or_else(|| GraphError::UnknownVertexId(format!("{id:?}")))
    }

    fn require_edge(&self, id: &E) -> GraphResult<usize> {
        self.edge_index(id)
            .ok_or_else(|| GraphError::UnknownEdgeId(format!("{id:?}")))
    }

    /// Source vertex of edge `id`.
    pub fn edge_source(&self, id: &E) -> Option<&V> {
        let e = self.edge_index(id)?;
        self.vertex_ids().index_to_id(self.graph.edge_source(e))
    }

    /// Target vertex of edge `id`.
    pub fn edge_target(&self, id: &E) -> Option<&V> {
        let e = self.edge_index(id)?;
        self.vertex_ids().index_to_id(self.graph.edge_target(e))
    }

    /// Ids of the edges leaving vertex `id`.
    pub fn out_edges(&self, id: &V) -> Option<Vec<&E>> {
        let v = self.vertex_index(id)?;
        let edges = self.edge_ids();
        Some(self.graph.out_edges(v).into_iter().filter_map(|e| edges.index_to_id(e)).collect())
    }

    /// Ids of the edges entering vertex `id`.
    pub fn in_edges(&self, id: &V) -> Option<Vec<&E>> {
        let v = self.vertex_index(id)?;
        let edges = self.edge_ids();
        Some(self.graph.in_edges(v).into_iter().filter_map(|e| edges.index_to_id(e)).collect())
    }

    /// Some edge from `source` to `target`.
    pub fn get_edge(&self, source: &V, target: &V) -> Option<&E> {
        let u = self.vertex_index(source)?;
        let v = self.vertex_index(target)?;
        self.edge_ids().index_to_id(self.graph.get_edge(u, v)?)
    }

    /// The vertex weights under `key`, addressed by vertex id.
    pub fn vertices_weights<T: Clone + Send + Sync + 'static>(&self, key: &str) -> Option<MappedWeights<'_, V, T>> {
        Some(MappedWeights {
            weights: self.graph.vertex_space().column_as::<Weights<T>>(key)?,
            ids: self.vertex_ids(),
        })
    }

    /// The edge weights under `key`, addressed by edge id.
    pub fn edges_weights<T: Clone + Send + Sync + 'static>(&self, key: &str) -> Option<MappedWeights<'_, E, T>> {
        Some(MappedWeights {
            weights: self.graph.edge_space().column_as::<Weights<T>>(key)?,
            ids: self.edge_ids(),
        })
    }

    /// A read-only view whose index graph is the immutable view of this graph's index graph.
    pub fn immutable_view(&self) -> ImmutableIdView<'_, V, E, G> {
        ImmutableIdView { graph: self }
    }

    /// A read-only view with every edge reversed, addressed by the same ids.
    ///
    /// Its index graph is the reversed view of this graph's index graph.
    pub fn reversed_view_ref(&self) -> IdGraph<V, E, ReversedView<&G>> {
        IdGraph {
            graph: ReversedView::new(&self.graph),
            vertex_ids: self.vertex_ids,
            edge_ids: self.edge_ids,
            _ids: PhantomData,
        }
    }
}

impl<V: GraphId, E: GraphId, G: IndexGraphMut> IdGraph<V, E, G> {
    /// Wraps an existing index graph, naming index `i` by `vertex_ids[i]` / `edge_ids[i]`.
    ///
    /// # Panics
    /// Panics if the id lists do not match the vertex and edge counts of `graph`.
    pub fn from_index_graph(mut graph: G, vertex_ids: Vec<V>, edge_ids: Vec<E>) -> GraphResult<Self> {
        assert_eq!(vertex_ids.len(), graph.vertex_count(), "one id per vertex");
        assert_eq!(edge_ids.len(), graph.edge_count(), "one id per edge");
        let mut vertices = IndexIdMap::new();
        for id in vertex_ids {
            vertices
                .push(id)
                .map_err(|id| GraphError::DuplicateVertexId(format!("{id:?}")))?;
        }
        let mut edges = IndexIdMap::new();
        for id in edge_ids {
            edges
                .push(id)
                .map_err(|id| GraphError::DuplicateEdgeId(format!("{id:?}")))?;
        }
        let vertex_ids = graph.vertex_space_mut()?.attach(Box::new(vertices));
        let edge_ids = graph.edge_space_mut()?.attach(Box::new(edges));
        Ok(Self {
            graph,
            vertex_ids,
            edge_ids,
            _ids: PhantomData,
        })
    }

    /// Adds a vertex named `id`.
    pub fn add_vertex(&mut self, id: V) -> GraphResult<()> {
        if self.vertex_index(&id).is_some() {
            return Err(GraphError::DuplicateVertexId(format!("{id:?}")));
        }
        let index = self.graph.add_vertex()?;
        let map: &mut IndexIdMap<V> = attached_mut(self.graph.vertex_space_mut()?, self.vertex_ids);
        let mapped = map.push(id);
        debug_assert_eq!(mapped.ok(), Some(index));
        Ok(())
    }

    /// Adds an edge named `id` from `source` to `target`.
    pub fn add_edge(&mut self, source: &V, target: &V, id: E) -> GraphResult<()> {
        let u = self.require_vertex(source)?;
        let v = self.require_vertex(target)?;
        if self.edge_index(&id).is_some() {
            return Err(GraphError::DuplicateEdgeId(format!("{id:?}")));
        }
        let index = self.graph.add_edge(u, v)?;
        let map: &mut IndexIdMap<E> = attached_mut(self.graph.edge_space_mut()?, self.edge_ids);
        let mapped = map.push(id);
        debug_assert_eq!(mapped.ok(), Some(index));
        Ok(())
    }

    /// Removes edge `id`.
    pub fn remove_edge(&mut self, id: &E) -> GraphResult<()> {
        let e = self.require_edge(id)?;
        self.graph.remove_edge(e)
    }

    /// Removes vertex `id` and every edge incident to it.
    pub fn remove_vertex(&mut self, id: &V) -> GraphResult<()> {
        let v = self.require_vertex(id)?;
        self.graph.remove_vertex(v)
    }

    /// Removes every vertex and edge.
    pub fn clear(&mut self) -> GraphResult<()> {
        self.graph.clear()
    }

    /// Creates vertex weights under `key`.
    pub fn add_vertices_weights<T: Clone + Send + Sync + 'static>(&mut self, key: &str, default: T) -> GraphResult<VertexWeightsMut<'_, V, T>> {
        self.graph
            .vertex_space_mut()?
            .add_column(key, Box::new(Weights::new(default)))?;
        self.vertices_weights_mut(key)
    }

    /// Creates edge weights under `key`.
    pub fn add_edges_weights<T: Clone + Send + Sync + 'static>(&mut self, key: &str, default: T) -> GraphResult<EdgeWeightsMut<'_, E, T>> {
        self.graph
            .edge_space_mut()?
            .add_column(key, Box::new(Weights::new(default)))?;
        self.edges_weights_mut(key)
    }

    /// Writable vertex weights under `key`, addressed by vertex id.
    pub fn vertices_weights_mut<T: Clone + Send + Sync + 'static>(&mut self, key: &str) -> GraphResult<VertexWeightsMut<'_, V, T>> {
        let (weights, ids) = self
            .graph
            .vertex_space_mut()?
            .column_and_attached::<Weights<T>, IndexIdMap<V>>(key, self.vertex_ids);
        Ok(VertexWeightsMut(MappedWeightsMut {
            weights: weights.ok_or_else(|| unknown_key::<T>(key))?,
            ids: ids.expect("id maps stay attached for the lifetime of the id graph"),
        }))
    }

    /// Writable edge weights under `key`, addressed by edge id.
    pub fn edges_weights_mut<T: Clone + Send + Sync + 'static>(&mut self, key: &str) -> GraphResult<EdgeWeightsMut<'_, E, T>> {
        let (weights, ids) = self
            .graph
            .edge_space_mut()?
            .column_and_attached::<Weights<T>, IndexIdMap<E>>(key, self.edge_ids);
        Ok(EdgeWeightsMut(MappedWeightsMut {
            weights: weights.ok_or_else(|| unknown_key::<T>(key))?,
            ids: ids.expect("id maps stay attached for the lifetime of the id graph"),
        }))
    }

    /// A writable view with every edge reversed, addressed by the same ids.
    ///
    /// Its index graph is the reversed view of this graph's index graph, and
    /// every mutation through it lands reversed in this graph.
    pub fn reversed_view(&mut self) -> IdGraph<V, E, ReversedView<&mut G>> {
        IdGraph {
            graph: ReversedView::new(&mut self.graph),
            vertex_ids: self.vertex_ids,
            edge_ids: self.edge_ids,
            _ids: PhantomData,
        }
    }
}

/// A read-only view of an [`IdGraph`].
///
/// Reads go to the id graph itself; [`ImmutableIdView::index_graph`] yields the
/// immutable view of the backing index graph rather than a view of a view.
pub struct ImmutableIdView<'a, V, E, G> {
    graph: &'a IdGraph<V, E, G>,
}

impl<V: GraphId, E: GraphId, G: IndexGraph> Debug for ImmutableIdView<'_, V, E, G> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("ImmutableIdView").field(self.graph).finish()
    }
}

impl<V, E, G> Clone for ImmutableIdView<'_, V, E, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V, E, G> Copy for ImmutableIdView<'_, V, E, G> {}

impl<'a, V: GraphId, E: GraphId, G: IndexGraph> ImmutableIdView<'a, V, E, G> {
    /// The immutable view of the backing index graph.
    pub fn index_graph(&self) -> ImmutableView<'a, G> {
        ImmutableView::new(&self.graph.graph)
    }

    /// An immutable view of an immutable view is the view itself.
    pub fn immutable_view(&self) -> &Self {
        self
    }
}

impl<'a, V, E, G> core::ops::Deref for ImmutableIdView<'a, V, E, G> {
    type Target = IdGraph<V, E, G>;

    fn deref(&self) -> &Self::Target {
        self.graph
    }
}
