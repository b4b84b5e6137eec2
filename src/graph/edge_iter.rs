//! The edge-iteration contract shared by every backend and view.
//!
//! `out_edges(v)` / `in_edges(v)` / `get_edges(u, v)` return an [`EdgeSet`]: a
//! sized, containment-checkable set whose iterator is an [`EdgeIter`]. Besides
//! yielding edge indices, the iterator reports the endpoints of the edge it
//! yielded last, oriented relative to the queried vertex. For an undirected
//! graph `out_edges(v)` yields every incident edge once with `source() == v`,
//! and `in_edges(v)` yields the same edges with `target() == v`.

use core::iter::Peekable;

/// Iterator over edge indices that also exposes the endpoints of the last yielded edge.
///
/// `source()` and `target()` describe the edge most recently returned by
/// `next()`. Calling either before the first `next()` is a contract violation
/// and panics.
pub trait EdgeIter: Iterator<Item = usize> {
    /// Returns the next edge without consuming it.
    fn peek_next(&mut self) -> Option<usize>;

    /// Source of the last edge returned by `next()`.
    ///
    /// # Panics
    /// Panics if `next()` has not yet returned an edge.
    fn source(&self) -> usize;

    /// Target of the last edge returned by `next()`.
    ///
    /// # Panics
    /// Panics if `next()` has not yet returned an edge.
    fn target(&self) -> usize;
}

/// Borrowed endpoint columns of a graph: `sources[e]` and `targets[e]` for every edge `e`.
#[derive(Debug, Clone, Copy)]
pub struct Endpoints<'a> {
    sources: &'a [usize],
    targets: &'a [usize],
}

impl<'a> Endpoints<'a> {
    /// Wraps two parallel endpoint columns.
    ///
    /// # Panics
    /// Panics if the columns differ in length.
    #[inline]
    pub fn new(sources: &'a [usize], targets: &'a [usize]) -> Self {
        assert_eq!(sources.len(), targets.len(), "endpoint columns differ in length");
        Self { sources, targets }
    }

    /// Number of edges.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns `true` if there are no edges.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Source of edge `e`.
    #[inline(always)]
    pub fn source(&self, e: usize) -> usize {
        self.sources[e]
    }

    /// Target of edge `e`.
    #[inline(always)]
    pub fn target(&self, e: usize) -> usize {
        self.targets[e]
    }

    /// The endpoint of `e` that is not `v` (or `v` itself for a self edge).
    #[inline(always)]
    pub fn opposite(&self, e: usize, v: usize) -> usize {
        let s = self.sources[e];
        if s == v {
            self.targets[e]
        } else {
            s
        }
    }

    /// The same columns with the roles of source and target exchanged.
    #[inline(always)]
    pub fn reversed(self) -> Self {
        Self {
            sources: self.targets,
            targets: self.sources,
        }
    }
}

/// Which side of the queried vertex an iterator walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    /// The queried vertex is the source of every yielded edge.
    Out,
    /// The queried vertex is the target of every yielded edge.
    In,
}

/// Generic [`EdgeIter`] over any stream of edge indices incident to one vertex.
///
/// Every backend feeds its native storage walk (slice, linked list, hash map
/// values, matrix row scan) through this adapter, so endpoint orientation is
/// resolved in one place.
pub(crate) struct IncidentEdges<'a, I: Iterator<Item = usize>> {
    edges: Peekable<I>,
    vertex: usize,
    side: Side,
    endpoints: Endpoints<'a>,
    last: Option<usize>,
}

impl<'a, I: Iterator<Item = usize>> IncidentEdges<'a, I> {
    #[inline]
    pub(crate) fn new(edges: I, vertex: usize, side: Side, endpoints: Endpoints<'a>) -> Self {
        Self {
            edges: edges.peekable(),
            vertex,
            side,
            endpoints,
            last: None,
        }
    }

    #[inline]
    fn last_edge(&self) -> usize {
        match self.last {
            Some(e) => e,
            None => panic!("edge endpoints queried before the first call to next()"),
        }
    }
}

impl<I: Iterator<Item = usize>> Iterator for IncidentEdges<'_, I> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        let e = self.edges.next()?;
        self.last = Some(e);
        Some(e)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.edges.size_hint()
    }
}

impl<I: Iterator<Item = usize>> EdgeIter for IncidentEdges<'_, I> {
    #[inline]
    fn peek_next(&mut self) -> Option<usize> {
        self.edges.peek().copied()
    }

    #[inline]
    fn source(&self) -> usize {
        let e = self.last_edge();
        match self.side {
            Side::Out => self.vertex,
            Side::In => self.endpoints.opposite(e, self.vertex),
        }
    }

    #[inline]
    fn target(&self) -> usize {
        let e = self.last_edge();
        match self.side {
            Side::Out => self.endpoints.opposite(e, self.vertex),
            Side::In => self.vertex,
        }
    }
}

/// An [`EdgeIter`] with source and target exchanged, used by reversed views.
pub(crate) struct ReversedEdges<'a> {
    inner: Box<dyn EdgeIter + 'a>,
}

impl Iterator for ReversedEdges<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl EdgeIter for ReversedEdges<'_> {
    #[inline]
    fn peek_next(&mut self) -> Option<usize> {
        self.inner.peek_next()
    }

    #[inline]
    fn source(&self) -> usize {
        self.inner.target()
    }

    #[inline]
    fn target(&self) -> usize {
        self.inner.source()
    }
}

/// What an [`EdgeSet`] was queried for; drives `contains`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EdgeQuery {
    Out(usize),
    In(usize),
    Between(usize, usize),
}

impl EdgeQuery {
    fn reversed(self) -> Self {
        match self {
            EdgeQuery::Out(v) => EdgeQuery::In(v),
            EdgeQuery::In(v) => EdgeQuery::Out(v),
            EdgeQuery::Between(u, v) => EdgeQuery::Between(v, u),
        }
    }
}

/// A sized set of edges answering one adjacency query.
///
/// Iterating consumes the set; query the graph again for another pass.
pub struct EdgeSet<'a> {
    iter: Box<dyn EdgeIter + 'a>,
    len: usize,
    query: EdgeQuery,
    endpoints: Endpoints<'a>,
    directed: bool,
}

impl<'a> EdgeSet<'a> {
    pub(crate) fn new(
        iter: Box<dyn EdgeIter + 'a>,
        len: usize,
        query: EdgeQuery,
        endpoints: Endpoints<'a>,
        directed: bool,
    ) -> Self {
        Self {
            iter,
            len,
            query,
            endpoints,
            directed,
        }
    }

    /// Number of edges in the set.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set has no edges.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if edge `e` belongs to this set.
    ///
    /// Answered from the endpoint columns in \(O(1)\); unknown edge indices are
    /// simply not contained.
    pub fn contains(&self, e: usize) -> bool {
        if e >= self.endpoints.len() {
            return false;
        }
        let (s, t) = (self.endpoints.source(e), self.endpoints.target(e));
        match (self.query, self.directed) {
            (EdgeQuery::Out(v), true) => s == v,
            (EdgeQuery::In(v), true) => t == v,
            (EdgeQuery::Out(v) | EdgeQuery::In(v), false) => s == v || t == v,
            (EdgeQuery::Between(u, v), true) => s == u && t == v,
            (EdgeQuery::Between(u, v), false) => (s == u && t == v) || (s == v && t == u),
        }
    }

    /// Collects the edge indices in iteration order.
    pub fn to_vec(self) -> Vec<usize> {
        self.iter.collect()
    }

    /// The same set seen through a reversed graph: out becomes in, source becomes target.
    pub(crate) fn reversed(self) -> EdgeSet<'a> {
        EdgeSet {
            iter: Box::new(ReversedEdges { inner: self.iter }),
            len: self.len,
            query: self.query.reversed(),
            endpoints: self.endpoints.reversed(),
            directed: self.directed,
        }
    }
}

impl<'a> IntoIterator for EdgeSet<'a> {
    type Item = usize;
    type IntoIter = Box<dyn EdgeIter + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter
    }
}

impl core::fmt::Debug for EdgeSet<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EdgeSet")
            .field("len", &self.len)
            .field("query", &self.query)
            .finish()
    }
}
