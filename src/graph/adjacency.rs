use bitvec::vec::BitVec;
use tracing::{debug, trace};

use super::{GraphError, NodeIndex, Position, PositionVec};

/// Dense `N×N` presence matrix: `contains(u, v)` iff the edge `u → v` exists.
///
/// Rows hold the successors of a node, columns (kept as a transposed copy)
/// hold its predecessors, so both directions scan in `O(N / word)`. Duplicate
/// edges collapse into a single bit and self-loops are never stored.
///
/// The sorters consume edges as they go. Clone the relation for every
/// independent sort of the same graph.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdjacencyRelation {
    rows: PositionVec<BitVec>,
    columns: PositionVec<BitVec>,
}

impl AdjacencyRelation {
    /// An edgeless relation over `n` nodes.
    pub fn with_nodes(n: usize) -> Self {
        AdjacencyRelation {
            rows: PositionVec::filled(n, BitVec::repeat(false, n)),
            columns: PositionVec::filled(n, BitVec::repeat(false, n)),
        }
    }

    /// Builds the relation for `index` from `(source, target)` identifier pairs.
    ///
    /// Both endpoints must be interned, otherwise [`GraphError::UnknownNode`]
    /// is returned. Pairs with `source == target` are dropped.
    pub fn build<I, A, B>(index: &NodeIndex, edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut relation = Self::with_nodes(index.len());
        let mut self_loops = 0usize;

        for (source, target) in edges {
            let u = index.position_of(source.as_ref())?;
            let v = index.position_of(target.as_ref())?;
            if u == v {
                trace!(node = source.as_ref(), "dropping self-loop");
                self_loops += 1;
                continue;
            }
            relation.insert(u, v);
        }

        debug!(
            nodes = relation.node_count(),
            edges = relation.edge_count(),
            self_loops,
            "built adjacency relation"
        );
        Ok(relation)
    }

    pub fn node_count(&self) -> usize {
        self.rows.len()
    }

    /// Every node position, ascending.
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = Position> {
        (0..self.node_count()).map(Position)
    }

    /// Sets the edge `u → v`. Returns `false` if it was already present or is
    /// a self-loop, which is never stored.
    pub fn insert(&mut self, u: Position, v: Position) -> bool {
        if u == v || self.contains(u, v) {
            return false;
        }
        self.rows[u].set(v.0, true);
        self.columns[v].set(u.0, true);
        true
    }

    /// Clears the edge `u → v`, returning whether it was present.
    pub fn remove(&mut self, u: Position, v: Position) -> bool {
        if !self.contains(u, v) {
            return false;
        }
        self.rows[u].set(v.0, false);
        self.columns[v].set(u.0, false);
        true
    }

    pub fn contains(&self, u: Position, v: Position) -> bool {
        self.rows[u][v.0]
    }

    pub fn out_degree(&self, u: Position) -> usize {
        self.rows[u].count_ones()
    }

    pub fn in_degree(&self, v: Position) -> usize {
        self.columns[v].count_ones()
    }

    pub fn successors(&self, u: Position) -> impl Iterator<Item = Position> + '_ {
        self.rows[u].iter_ones().map(Position)
    }

    pub fn predecessors(&self, v: Position) -> impl Iterator<Item = Position> + '_ {
        self.columns[v].iter_ones().map(Position)
    }

    /// The first predecessor of `v` at or after position `from`.
    pub fn next_predecessor(&self, v: Position, from: usize) -> Option<Position> {
        let column = &self.columns[v];
        if from >= column.len() {
            return None;
        }
        column[from..].first_one().map(|i| Position(from + i))
    }

    pub fn edge_count(&self) -> usize {
        self.rows.raw().iter().map(|row| row.count_ones()).sum()
    }

    /// Remaining edges in row-major order.
    pub fn edges(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.rows
            .iter()
            .flat_map(|(u, row)| row.iter_ones().map(move |v| (u, Position(v))))
    }

    /// Removes every edge, keeping the node set.
    pub fn clear(&mut self) {
        for (_, row) in self.rows.iter_mut() {
            row.fill(false);
        }
        for (_, column) in self.columns.iter_mut() {
            column.fill(false);
        }
    }
}
