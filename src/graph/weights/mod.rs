//! Typed per-vertex and per-edge weight columns.
//!
//! A [`Weights<T>`] column is sized to its index space and reads as its
//! default value at every index that was never set, including indices added
//! after the column was created. Columns are registered in an
//! [`IndexSpace`](crate::graph::index::IndexSpace) and therefore follow every
//! swap-and-remove relocation of that space.

use core::any::{type_name, Any};
use core::ops::Add;

use num_traits::{ToPrimitive, Zero};

use crate::error::{GraphError, GraphResult};
use crate::graph::index::{IndexColumn, IndexListener};
use crate::graph::traits::{IndexGraph, IndexGraphMut};


/// A typed column over one index space with a default value.
#[derive(Debug, Clone, PartialEq)]
pub struct Weights<T> {
    values: Vec<T>,
    default: T,
}

impl<T: Clone> Weights<T> {
    /// Creates an empty column.
    pub fn new(default: T) -> Self {
        Self {
            values: Vec::new(),
            default,
        }
    }

    /// Creates a column of `len` default entries.
    pub fn with_len(len: usize, default: T) -> Self {
        Self {
            values: vec![default.clone(); len],
            default,
        }
    }

    /// Number of entries (equal to the size of the owning index space).
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the column has no entries.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value every unset entry reads as.
    #[inline(always)]
    pub fn default_value(&self) -> &T {
        &self.default
    }

    /// Value at `idx`.
    ///
    /// # Panics
    /// Panics if `idx` is out of bounds.
    #[inline(always)]
    pub fn get(&self, idx: usize) -> &T {
        &self.values[idx]
    }

    /// Sets the value at `idx` and returns the previous value.
    ///
    /// # Panics
    /// Panics if `idx` is out of bounds.
    #[inline]
    pub fn set(&mut self, idx: usize, value: T) -> T {
        core::mem::replace(&mut self.values[idx], value)
    }

    /// Resets `idx` to the default value.
    pub fn reset(&mut self, idx: usize) {
        self.values[idx] = self.default.clone();
    }

    /// Resets every entry to the default value.
    pub fn reset_all(&mut self) {
        let default = self.default.clone();
        self.values.fill(default);
    }

    /// All values in index order.
    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Iterates over all values in index order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.values.iter()
    }
}

impl<T: Copy + Zero + Add<Output = T>> Weights<T> {
    /// Sum of the weights of `indices`.
    pub fn sum_of<I: IntoIterator<Item = usize>>(&self, indices: I) -> T {
        indices
            .into_iter()
            .fold(T::zero(), |acc, idx| acc + self.values[idx])
    }
}

impl<'a, T> IntoIterator for &'a Weights<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<T: Clone + Send + Sync + 'static> IndexListener for Weights<T> {
    fn grow(&mut self, len: usize) {
        if len > self.values.len() {
            self.values.resize(len, self.default.clone());
        }
    }

    fn swap_remove(&mut self, removed: usize, swapped: usize) {
        self.values.swap(removed, swapped);
        self.values.truncate(swapped);
    }

    fn clear(&mut self) {
        self.values.clear();
    }
}

impl<T: Clone + Send + Sync + 'static> IndexColumn for Weights<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn clone_column(&self) -> Box<dyn IndexColumn> {
        Box::new(self.clone())
    }

    fn reindex(&mut self, new_to_orig: &[usize]) {
        debug_assert_eq!(new_to_orig.len(), self.values.len());
        self.values = new_to_orig
            .iter()
            .map(|&orig| self.values[orig].clone())
            .collect();
    }

    fn element_type(&self) -> &'static str {
        type_name::<T>()
    }

    fn rows(&self) -> usize {
        self.values.len()
    }
}

/// A numeric view of per-element weights, as consumed by weighted algorithms.
pub trait WeightFunction {
    /// Weight of element `idx`.
    fn weight(&self, idx: usize) -> f64;

    /// Sum of the weights of `indices`.
    fn weight_sum<I: IntoIterator<Item = usize>>(&self, indices: I) -> f64
    where
        Self: Sized,
    {
        indices.into_iter().map(|idx| self.weight(idx)).sum()
    }
}

impl<T: Copy + ToPrimitive> WeightFunction for Weights<T> {
    /// Non-representable values read as `NaN`.
    #[inline]
    fn weight(&self, idx: usize) -> f64 {
        self.values[idx].to_f64().unwrap_or(f64::NAN)
    }
}

/// Every element weighs one, so weighted sums count elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardinalityWeight;

impl WeightFunction for CardinalityWeight {
    #[inline(always)]
    fn weight(&self, _idx: usize) -> f64 {
        1.0
    }
}

pub(crate) fn unknown_key<T>(key: &str) -> GraphError {
    GraphError::UnknownWeightsKey {
        key: key.to_owned(),
        element_type: type_name::<T>(),
    }
}

/// Typed weight lookup on any graph.
pub trait WeightsExt: IndexGraph {
    /// The vertex weights under `key`, if they exist with element type `T`.
    fn vertices_weights<T: Clone + Send + Sync + 'static>(&self, key: &str) -> Option<&Weights<T>> {
        self.vertex_space().column_as::<Weights<T>>(key)
    }

    /// The edge weights under `key`, if they exist with element type `T`.
    fn edges_weights<T: Clone + Send + Sync + 'static>(&self, key: &str) -> Option<&Weights<T>> {
        self.edge_space().column_as::<Weights<T>>(key)
    }

    /// Keys of every vertex weights column.
    fn vertices_weights_keys(&self) -> Vec<String> {
        self.vertex_space().column_keys().map(str::to_owned).collect()
    }

    /// Keys of every edge weights column.
    fn edges_weights_keys(&self) -> Vec<String> {
        self.edge_space().column_keys().map(str::to_owned).collect()
    }
}

impl<G: IndexGraph + ?Sized> WeightsExt for G {}

/// Typed weight creation and mutation on mutable graphs.
pub trait WeightsMutExt: IndexGraphMut {
    /// Creates vertex weights under `key` with the given default value.
    fn add_vertices_weights<T: Clone + Send + Sync + 'static>(
        &mut self,
        key: &str,
        default: T,
    ) -> GraphResult<&mut Weights<T>> {
        let space = self.vertex_space_mut()?;
        space.add_column(key, Box::new(Weights::new(default)))?;
        space
            .column_as_mut::<Weights<T>>(key)
            .ok_or_else(|| unknown_key::<T>(key))
    }

    /// Creates edge weights under `key` with the given default value.
    fn add_edges_weights<T: Clone + Send + Sync + 'static>(
        &mut self,
        key: &str,
        default: T,
    ) -> GraphResult<&mut Weights<T>> {
        let space = self.edge_space_mut()?;
        space.add_column(key, Box::new(Weights::new(default)))?;
        space
            .column_as_mut::<Weights<T>>(key)
            .ok_or_else(|| unknown_key::<T>(key))
    }

    /// Mutable access to the vertex weights under `key`.
    fn vertices_weights_mut<T: Clone + Send + Sync + 'static>(&mut self, key: &str) -> GraphResult<&mut Weights<T>> {
        self.vertex_space_mut()?
            .column_as_mut::<Weights<T>>(key)
            .ok_or_else(|| unknown_key::<T>(key))
    }

    /// Mutable access to the edge weights under `key`.
    fn edges_weights_mut<T: Clone + Send + Sync + 'static>(&mut self, key: &str) -> GraphResult<&mut Weights<T>> {
        self.edge_space_mut()?
            .column_as_mut::<Weights<T>>(key)
            .ok_or_else(|| unknown_key::<T>(key))
    }

    /// Removes the vertex weights under `key`.
    fn remove_vertices_weights(&mut self, key: &str) -> GraphResult<()> {
        self.vertex_space_mut()?
            .remove_column(key)
            .map(drop)
            .ok_or_else(|| unknown_key::<()>(key))
    }

    /// Removes the edge weights under `key`.
    fn remove_edges_weights(&mut self, key: &str) -> GraphResult<()> {
        self.edge_space_mut()?
            .remove_column(key)
            .map(drop)
            .ok_or_else(|| unknown_key::<()>(key))
    }
}

impl<G: IndexGraphMut + ?Sized> WeightsMutExt for G {}
