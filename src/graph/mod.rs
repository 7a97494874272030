//! # Graph storage
//!
//! Nodes are opaque string identifiers. [`NodeIndex`] interns them in
//! lexicographic order and hands out dense [`Position`]s; every other
//! component in the crate works on positions only.
//!
//! [`AdjacencyRelation`] is the dense presence matrix built from an edge list.
//! An edge `(a, b)` always means "a points to b". Whether that reads as
//! "a depends on b" or "b depends on a" is up to the caller; the sorters in
//! [`crate::algorithms`] emit sinks first under this convention.

use thiserror::Error;

pub mod adjacency;
pub mod node_index;

pub use adjacency::AdjacencyRelation;
pub use node_index::NodeIndex;

crate::define_indexed_vec!(
    /// Dense position of an interned node, `0..N-1`.
    pub struct Position;

    /// A vector indexed by [`Position`].
    pub struct PositionVec;
);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Unknown node: {0:?} was never interned")]
    UnknownNode(String),
}

#[cfg(test)]
mod test;
