//! # Topograph
//!
//! Topograph is a small toolkit for analysing dependency graphs held in
//! memory as a dense adjacency matrix. It provides
//!
//! - topological ordering, either by Kahn's algorithm (flat or split into
//!   waves) or depth-first with cycle detection,
//! - the longest path leading into a given node,
//! - a disjoint-set forest for clustering and connectivity queries.
//!
//! Node identifiers are interned with [`graph::NodeIndex`], edges collected in
//! a [`graph::AdjacencyRelation`] and handed to one of the functions in
//! [`algorithms`]. [`union_find::DisjointSet`] works on plain integers and is
//! independent of the graph types.

pub mod algorithms;
pub mod graph;
pub mod input;
pub mod typed_vec;
pub mod union_find;
