//! Dense index-space bookkeeping and the removal-listener registry.
//!
//! An [`IndexSpace`] is the arena half of the arena+index pattern: it owns the
//! count of live indices (always exactly `0..len`) and every structure that
//! caches per-index data. Removal is swap-and-truncate: removing `k` moves the
//! last live index into slot `k`, every registered listener applies that same
//! relocation synchronously and in registration order, and only then does the
//! count shrink.
//!
//! Listeners only ever receive `&mut self`. They have no path back to the graph
//! that owns them, so a notification can never trigger a nested removal.
//!
//! Everything registered in a space is `Send + Sync`, so a graph can be read
//! from several threads at once.

use core::any::Any;
use core::fmt;
use core::ops::Range;

use crate::error::{GraphError, GraphResult};


/// Receives relocation notifications from an [`IndexSpace`].
pub trait IndexListener: Send + Sync + 'static {
    /// The index space grew to `len` indices. New slots take their default.
    fn grow(&mut self, len: usize) {
        let _ = len;
    }

    /// Index `removed` is being deleted and the last live index `swapped` takes its slot.
    ///
    /// When `removed == swapped` the last index is simply truncated.
    fn swap_remove(&mut self, removed: usize, swapped: usize);

    /// Every index is being discarded.
    fn clear(&mut self) {}
}

/// A per-index data column that can live in an [`IndexSpace`] registry.
///
/// Columns are type-erased so that one registry holds columns of every
/// element type; typed access goes through [`IndexSpace::column_as`].
pub trait IndexColumn: IndexListener {
    /// Type-erased shared access, used for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Type-erased exclusive access, used for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Clones the column (values and default) into a new box.
    fn clone_column(&self) -> Box<dyn IndexColumn>;

    /// Rearranges the column so that new index `i` holds the value of old index `new_to_orig[i]`.
    fn reindex(&mut self, new_to_orig: &[usize]);

    /// Name of the stored element type, for diagnostics.
    fn element_type(&self) -> &'static str;

    /// Number of rows the column currently holds.
    fn rows(&self) -> usize;
}

/// A listener that the code attaching it reads back through the space.
///
/// Attached listeners are owned by the space, so every relocation reaches them
/// in registration order like any other listener, but they carry no key and are
/// never copied with the columns.
pub(crate) trait AttachedListener: IndexListener {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Handle returned by [`IndexSpace::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

enum Registered {
    Column {
        key: String,
        column: Box<dyn IndexColumn>,
    },
    Listener {
        id: ListenerId,
        listener: Box<dyn IndexListener>,
    },
    Attached {
        id: ListenerId,
        listener: Box<dyn AttachedListener>,
    },
}

impl Registered {
    #[inline]
    fn grow(&mut self, len: usize) {
        match self {
            Registered::Column { column, .. } => column.grow(len),
            Registered::Listener { listener, .. } => listener.grow(len),
            Registered::Attached { listener, .. } => listener.grow(len),
        }
    }

    #[inline]
    fn swap_remove(&mut self, removed: usize, swapped: usize) {
        match self {
            Registered::Column { column, .. } => column.swap_remove(removed, swapped),
            Registered::Listener { listener, .. } => listener.swap_remove(removed, swapped),
            Registered::Attached { listener, .. } => listener.swap_remove(removed, swapped),
        }
    }

    #[inline]
    fn clear(&mut self) {
        match self {
            Registered::Column { column, .. } => column.clear(),
            Registered::Listener { listener, .. } => listener.clear(),
            Registered::Attached { listener, .. } => listener.clear(),
        }
    }
}

/// The dense index space of one element kind (vertices or edges) of one graph.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `push` | \(O(L)\) | `L` = registered listeners |
/// | `swap_remove` | \(O(L)\) | each listener relocates one slot |
/// | `column` | \(O(L)\) | linear key scan, `L` is tiny in practice |
#[derive(Default)]
pub struct IndexSpace {
    len: usize,
    registry: Vec<Registered>,
    next_listener: usize,
}

impl IndexSpace {
    /// Creates an empty index space with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an index space that already holds `len` indices.
    pub fn with_len(len: usize) -> Self {
        Self {
            len,
            ..Self::default()
        }
    }

    /// Number of live indices.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no index is live.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The live indices, `0..len`.
    #[inline(always)]
    pub fn indices(&self) -> Range<usize> {
        0..self.len
    }

    /// Returns `true` if `idx` is a live index.
    #[inline(always)]
    pub fn contains(&self, idx: usize) -> bool {
        idx < self.len
    }

    /// Appends one index and returns it. The new index is always the prior count.
    pub(crate) fn push(&mut self) -> usize {
        let idx = self.len;
        self.len += 1;
        self.notify_grow();
        idx
    }

    /// Appends `count` indices at once.
    pub(crate) fn extend(&mut self, count: usize) -> Range<usize> {
        let begin = self.len;
        if count != 0 {
            self.len += count;
            self.notify_grow();
        }
        begin..self.len
    }

    fn notify_grow(&mut self) {
        let len = self.len;
        for entry in &mut self.registry {
            entry.grow(len);
        }
    }

    /// Removes `idx` by swapping the last live index into its slot.
    ///
    /// Returns the index that was relocated into `idx` (equal to `idx` when it
    /// was the last one). All listeners have applied the relocation when this returns.
    ///
    /// # Panics
    /// Panics if `idx` is not live.
    pub(crate) fn swap_remove(&mut self, idx: usize) -> usize {
        assert!(idx < self.len, "index {idx} out of bounds for len {}", self.len);
        let swapped = self.len - 1;
        for entry in &mut self.registry {
            entry.swap_remove(idx, swapped);
        }
        self.len -= 1;
        swapped
    }

    /// Discards every index, broadcasting a bulk clear.
    pub(crate) fn clear(&mut self) {
        for entry in &mut self.registry {
            entry.clear();
        }
        self.len = 0;
    }

    /// Registers a keyed data column, grown to the current index space.
    ///
    /// A column holding more rows than the space has indices is rejected: its
    /// last row would not be the one relocated by the next removal.
    pub fn add_column(&mut self, key: &str, mut column: Box<dyn IndexColumn>) -> GraphResult<()> {
        if self.column(key).is_some() {
            return Err(GraphError::DuplicateWeightsKey(key.to_owned()));
        }
        if column.rows() > self.len {
            return Err(GraphError::ColumnLengthMismatch {
                key: key.to_owned(),
                expected: self.len,
                found: column.rows(),
            });
        }
        column.grow(self.len);
        self.registry.push(Registered::Column {
            key: key.to_owned(),
            column,
        });
        Ok(())
    }

    /// Returns the column registered under `key`.
    pub fn column(&self, key: &str) -> Option<&dyn IndexColumn> {
        self.registry.iter().find_map(|entry| match entry {
            Registered::Column { key: k, column } if k == key => Some(&**column),
            _ => None,
        })
    }

    /// Returns the column registered under `key` for mutation.
    pub fn column_mut(&mut self, key: &str) -> Option<&mut (dyn IndexColumn + 'static)> {
        self.registry.iter_mut().find_map(|entry| match entry {
            Registered::Column { key: k, column } if k == key => Some(&mut **column),
            _ => None,
        })
    }

    /// Returns the column under `key` downcast to its concrete type.
    pub fn column_as<C: IndexColumn>(&self, key: &str) -> Option<&C> {
        self.column(key)?.as_any().downcast_ref::<C>()
    }

    /// Returns the column under `key` downcast to its concrete type, for mutation.
    pub fn column_as_mut<C: IndexColumn>(&mut self, key: &str) -> Option<&mut C> {
        self.column_mut(key)?.as_any_mut().downcast_mut::<C>()
    }

    /// Returns the column under `key` for mutation together with the attached listener `id`.
    ///
    /// Either half is `None` when it is missing or of another type.
    pub(crate) fn column_and_attached<C: IndexColumn, L: AttachedListener>(
        &mut self,
        key: &str,
        id: ListenerId,
    ) -> (Option<&mut C>, Option<&L>) {
        let mut found_column = None;
        let mut found_listener = None;
        for entry in &mut self.registry {
            match entry {
                Registered::Column { key: k, column } if k == key => {
                    found_column = column.as_any_mut().downcast_mut::<C>();
                }
                Registered::Attached { id: i, listener } if *i == id => {
                    found_listener = listener.as_any().downcast_ref::<L>();
                }
                _ => {}
            }
        }
        (found_column, found_listener)
    }

    /// Unregisters and returns the column under `key`.
    pub fn remove_column(&mut self, key: &str) -> Option<Box<dyn IndexColumn>> {
        let pos = self.registry.iter().position(
            |entry| matches!(entry, Registered::Column { key: k, .. } if k == key),
        )?;
        match self.registry.remove(pos) {
            Registered::Column { column, .. } => Some(column),
            _ => None,
        }
    }

    /// Keys of all registered columns, in registration order.
    pub fn column_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.registry.iter().filter_map(|entry| match entry {
            Registered::Column { key, .. } => Some(key.as_str()),
            _ => None,
        })
    }

    fn next_listener_id(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        id
    }

    /// Registers a plain removal listener. It is notified after every entry registered before it.
    pub fn add_listener(&mut self, mut listener: Box<dyn IndexListener>) -> ListenerId {
        let id = self.next_listener_id();
        listener.grow(self.len);
        self.registry.push(Registered::Listener { id, listener });
        id
    }

    /// Registers a listener that stays attached for the lifetime of the space.
    ///
    /// [`IndexSpace::remove_listener`] does not detach it.
    pub(crate) fn attach(&mut self, mut listener: Box<dyn AttachedListener>) -> ListenerId {
        let id = self.next_listener_id();
        listener.grow(self.len);
        self.registry.push(Registered::Attached { id, listener });
        id
    }

    /// The attached listener `id` downcast to its concrete type.
    pub(crate) fn attached<L: AttachedListener>(&self, id: ListenerId) -> Option<&L> {
        self.registry.iter().find_map(|entry| match entry {
            Registered::Attached { id: i, listener } if *i == id => listener.as_any().downcast_ref::<L>(),
            _ => None,
        })
    }

    /// The attached listener `id` downcast to its concrete type, for mutation.
    pub(crate) fn attached_mut<L: AttachedListener>(&mut self, id: ListenerId) -> Option<&mut L> {
        self.registry.iter_mut().find_map(|entry| match entry {
            Registered::Attached { id: i, listener } if *i == id => {
                listener.as_any_mut().downcast_mut::<L>()
            }
            _ => None,
        })
    }

    /// Unregisters a listener previously returned by [`IndexSpace::add_listener`].
    pub fn remove_listener(&mut self, id: ListenerId) -> Option<Box<dyn IndexListener>> {
        let pos = self.registry.iter().position(
            |entry| matches!(entry, Registered::Listener { id: i, .. } if *i == id),
        )?;
        match self.registry.remove(pos) {
            Registered::Listener { listener, .. } => Some(listener),
            _ => None,
        }
    }

    /// Copies the index count and every column, optionally re-indexed.
    ///
    /// Plain and attached listeners are observers of one particular graph and are not carried over.
    pub(crate) fn clone_columns(&self, new_to_orig: Option<&[usize]>) -> IndexSpace {
        let mut copy = IndexSpace::with_len(self.len);
        for entry in &self.registry {
            if let Registered::Column { key, column } = entry {
                let mut column = column.clone_column();
                if let Some(perm) = new_to_orig {
                    column.reindex(perm);
                }
                copy.registry.push(Registered::Column {
                    key: key.clone(),
                    column,
                });
            }
        }
        copy
    }

    /// Registers a copy of every column of `self` in `other`, which must hold as many indices.
    pub(crate) fn copy_columns_into(&self, other: &mut IndexSpace) -> GraphResult<()> {
        debug_assert_eq!(self.len, other.len);
        for entry in &self.registry {
            if let Registered::Column { key, column } = entry {
                other.add_column(key, column.clone_column())?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for IndexSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexSpace")
            .field("len", &self.len)
            .field("columns", &self.column_keys().collect::<Vec<_>>())
            .finish()
    }
}
