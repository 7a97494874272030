use thiserror::Error;
use tracing::debug;

use crate::graph::{AdjacencyRelation, GraphError, Position, PositionVec};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopoError {
    #[error("Not acyclic: {remaining_edges} edges left undischarged after ordering {} of {total_nodes} nodes. Unresolved edges: {unresolved:?}", .partial.len())]
    NotAcyclic {
        remaining_edges: usize,
        total_nodes: usize,
        unresolved: Vec<(Position, Position)>,
        /// Order produced before the drain stalled; diagnostic only, not a valid ordering.
        partial: Vec<Position>,
    },
    #[error("Cycle detected: node {node} was reached again while still in progress, cycle {path:?}")]
    CycleDetected {
        node: Position,
        /// The cycle in edge direction, starting and implicitly ending at `node`.
        path: Vec<Position>,
    },
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// A node together with the wave in which Kahn's drain emitted it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leveled {
    pub node: Position,
    pub level: usize,
}

/// Kahn's algorithm, emitting sinks first.
///
/// The relation is cloned, so `relation` is left untouched. Nodes whose
/// out-degree drops to zero are pushed on a stack and popped last-in
/// first-out; the initial sinks are pushed in ascending position order.
///
/// If edges remain once the stack is empty the graph has a cycle and
/// [`TopoError::NotAcyclic`] is returned with the undischarged edges.
pub fn kahn_order(relation: &AdjacencyRelation) -> Result<Vec<Position>, TopoError> {
    drain(relation).map(|order| order.into_iter().map(|l| l.node).collect())
}

/// Kahn's algorithm, tagging every node with a wave index.
///
/// Each stack entry remembers the frontier counter at the time it was pushed
/// (sinks at 0). Popping an entry whose stored level equals the frontier
/// advances the frontier, and predecessors released by that pop are pushed at
/// the new frontier. A node is emitted at the frontier it was popped under,
/// so levels never decrease along the output.
///
/// Levels depend on the LIFO schedule and are not longest-path distances.
/// Dropping them gives exactly [`kahn_order`].
pub fn kahn_levels(relation: &AdjacencyRelation) -> Result<Vec<Leveled>, TopoError> {
    drain(relation)
}

fn drain(relation: &AdjacencyRelation) -> Result<Vec<Leveled>, TopoError> {
    let mut residual = relation.clone();
    let total_nodes = residual.node_count();

    let mut out_degree: PositionVec<usize> =
        residual.nodes().map(|n| residual.out_degree(n)).collect();

    let mut stack: Vec<(Position, usize)> = out_degree
        .iter()
        .filter(|(_, d)| **d == 0)
        .map(|(n, _)| (n, 0))
        .collect();

    let mut frontier = 0;
    let mut order = Vec::with_capacity(total_nodes);
    let mut released = Vec::new();

    while let Some((n, level)) = stack.pop() {
        if level == frontier {
            frontier += 1;
        }
        order.push(Leveled {
            node: n,
            level: frontier - 1,
        });

        released.clear();
        released.extend(residual.predecessors(n));
        for &m in &released {
            residual.remove(m, n);
            out_degree[m] -= 1;
            if out_degree[m] == 0 {
                stack.push((m, frontier));
            }
        }
    }

    let remaining_edges = residual.edge_count();
    debug!(
        total_nodes,
        ordered = order.len(),
        waves = frontier,
        remaining_edges,
        "kahn drain finished"
    );

    if remaining_edges > 0 {
        return Err(TopoError::NotAcyclic {
            remaining_edges,
            total_nodes,
            unresolved: residual.edges().collect(),
            partial: order.into_iter().map(|l| l.node).collect(),
        });
    }
    Ok(order)
}
