//! # Algorithms over an [`AdjacencyRelation`](crate::graph::AdjacencyRelation)
//!
//! ### Topological ordering
//! - [`topological_order`]: Kahn's algorithm, flat and level-stratified
//! - [`depth_first`]: depth-first ordering with three-colour cycle detection
//!
//! ### Depth
//! - [`path_depth`]: longest reverse path from a start node
//!
//! Every ordering is emitted sinks first: for an edge `u → v`, `v` appears
//! before `u`. Sorting consumes edges, so `kahn_*` work on a private clone
//! while [`depth_first::dfs_order`] takes the relation mutably and clears it.

pub mod depth_first;
pub mod path_depth;
pub mod topological_order;

pub use depth_first::dfs_order;
pub use path_depth::{max_depth, max_depth_checked, max_depth_checked_of, max_depth_of};
pub use topological_order::{kahn_levels, kahn_order, Leveled, TopoError};
