use std::collections::VecDeque;

use tracing::debug;

use super::topological_order::TopoError;
use crate::graph::{AdjacencyRelation, Position, PositionVec};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Unvisited,
    InProgress,
    Done,
}

/// Depth-first walk along reverse edges with an explicit stack.
///
/// Each frame holds a node and the position from which its predecessor scan
/// resumes, so predecessors are explored in ascending order exactly as the
/// recursive formulation would.
pub(crate) struct ReverseWalk<'a> {
    relation: &'a AdjacencyRelation,
    color: PositionVec<Color>,
    stack: Vec<(Position, usize)>,
}

impl<'a> ReverseWalk<'a> {
    pub(crate) fn new(relation: &'a AdjacencyRelation) -> Self {
        ReverseWalk {
            relation,
            color: PositionVec::filled(relation.node_count(), Color::Unvisited),
            stack: Vec::new(),
        }
    }

    /// Starts a new tree at `root`. Does nothing if `root` was already visited.
    pub(crate) fn enter(&mut self, root: Position) {
        if self.color[root] == Color::Unvisited {
            self.color[root] = Color::InProgress;
            self.stack.push((root, 0));
        }
    }

    /// Advances until the next node finishes and returns it, or `None` once
    /// the current tree is exhausted.
    pub(crate) fn next_done(&mut self) -> Result<Option<Position>, TopoError> {
        while let Some(frame) = self.stack.last_mut() {
            let node = frame.0;
            match self.relation.next_predecessor(node, frame.1) {
                Some(m) => {
                    frame.1 = m.0 + 1;
                    match self.color[m] {
                        Color::Unvisited => {
                            self.color[m] = Color::InProgress;
                            self.stack.push((m, 0));
                        }
                        Color::InProgress => return Err(self.cycle_through(m)),
                        Color::Done => {}
                    }
                }
                None => {
                    self.color[node] = Color::Done;
                    self.stack.pop();
                    return Ok(Some(node));
                }
            }
        }
        Ok(None)
    }

    /// The in-progress frames from `m` up to the top of the stack form a
    /// cycle against edge direction; flip it so it reads along the edges.
    fn cycle_through(&self, m: Position) -> TopoError {
        let mut path: Vec<Position> = self
            .stack
            .iter()
            .map(|(n, _)| *n)
            .skip_while(|n| *n != m)
            .collect();
        path[1..].reverse();
        TopoError::CycleDetected { node: m, path }
    }
}

/// Depth-first topological order, sinks first.
///
/// Unvisited nodes are picked in ascending position order and each visit
/// explores the predecessors of a node before prepending it to the output.
/// Reaching a node that is still in progress aborts the whole sort with
/// [`TopoError::CycleDetected`]; the relation is then left as it was.
///
/// On success the relation is cleared: the traversal consumed it.
pub fn dfs_order(relation: &mut AdjacencyRelation) -> Result<Vec<Position>, TopoError> {
    let mut order = VecDeque::with_capacity(relation.node_count());
    {
        let mut walk = ReverseWalk::new(relation);
        for root in relation.nodes() {
            walk.enter(root);
            while let Some(done) = walk.next_done()? {
                order.push_front(done);
            }
        }
    }

    debug!(
        nodes = order.len(),
        edges = relation.edge_count(),
        "depth-first order complete"
    );
    relation.clear();
    Ok(order.into())
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;
    use crate::algorithms::topological_order::test::{arb_dag, position_in, relation};

    #[test]
    fn diamond_sinks_first() {
        let (index, mut relation) = relation(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("B", "C"), ("B", "D")],
        );

        let order = dfs_order(&mut relation).unwrap();

        assert_eq!(index.identifiers(&order), ["D", "C", "B", "A"]);
        assert_eq!(relation.edge_count(), 0);
    }

    #[test]
    fn two_cycle_is_detected() {
        let (_, mut relation) = relation(&["X", "Y"], &[("X", "Y"), ("Y", "X")]);

        let err = dfs_order(&mut relation).unwrap_err();

        assert_eq!(
            err,
            TopoError::CycleDetected {
                node: Position(0),
                path: vec![Position(0), Position(1)],
            }
        );
        // nothing was consumed
        assert_eq!(relation.edge_count(), 2);
    }

    #[test]
    fn cycle_path_follows_edges() {
        let (index, mut relation) = relation(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("b", "c"), ("c", "d"), ("d", "b")],
        );

        let Err(TopoError::CycleDetected { node, path }) = dfs_order(&mut relation) else {
            panic!("expected a cycle");
        };

        assert_eq!(index.identifier_at(node), "b");
        assert_eq!(index.identifiers(&path), ["b", "c", "d"]);
        for (u, v) in path.iter().zip(path.iter().cycle().skip(1)) {
            assert!(relation.contains(*u, *v));
        }
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let n = 10_000;
        let mut relation = AdjacencyRelation::with_nodes(n);
        for i in 1..n {
            relation.insert(Position(i), Position(i - 1));
        }

        // the walk from the sink at 0 descends through every node
        let order = dfs_order(&mut relation).unwrap();

        assert_eq!(order.len(), n);
        assert_eq!(order.first(), Some(&Position(0)));
        assert_eq!(order.last(), Some(&Position(n - 1)));
    }

    proptest! {
        #[test]
        fn dfs_respects_every_edge(relation in arb_dag()) {
            let mut consumed = relation.clone();
            let order = dfs_order(&mut consumed).unwrap();
            prop_assert_eq!(order.len(), relation.node_count());

            let at = position_in(&order);
            for (u, v) in relation.edges() {
                prop_assert!(at[v] < at[u], "{} -> {} out of order", u, v);
            }
        }
    }
}
