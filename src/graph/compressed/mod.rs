//! Compressed graph representations.
//!
//! This module contains the immutable compressed sparse row graph produced by
//! builder compaction.

pub mod csr_graph;

pub use csr_graph::{CsrGraph, CsrOptions};
