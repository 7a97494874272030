use tracing::debug;

use super::{depth_first::ReverseWalk, topological_order::TopoError};
use crate::graph::{AdjacencyRelation, GraphError, NodeIndex, Position, PositionVec};

/// Number of hops on the longest path that ends at `start`, found by walking
/// edges backwards (`p → start`, then into `p`, and so on).
///
/// A node without incoming edges has depth 0; the last node of a chain of `k`
/// edges has depth `k`.
///
/// The relation must be acyclic on everything that reaches `start`. This is
/// not checked: a reachable cycle makes the walk run forever. Use
/// [`max_depth_checked`] when that cannot be guaranteed.
pub fn max_depth(relation: &AdjacencyRelation, start: Position) -> usize {
    let mut deepest: PositionVec<Option<usize>> =
        PositionVec::filled(relation.node_count(), None);
    let mut max = 0;
    let mut stack = vec![(start, 0usize)];

    while let Some((node, level)) = stack.pop() {
        max = max.max(level);
        let next = level + 1;
        for p in relation.predecessors(node) {
            // already walked from p with at least as many hops behind it
            if deepest[p].is_some_and(|d| d >= next) {
                continue;
            }
            deepest[p] = Some(next);
            stack.push((p, next));
        }
    }

    debug!(%start, max, "reverse path depth");
    max
}

/// [`max_depth`] for an identifier, failing on names that were never interned.
pub fn max_depth_of(
    index: &NodeIndex,
    relation: &AdjacencyRelation,
    start: &str,
) -> Result<usize, GraphError> {
    Ok(max_depth(relation, index.position_of(start)?))
}

/// Same value as [`max_depth`], but a cycle reachable backwards from `start`
/// fails with [`TopoError::CycleDetected`] instead of diverging.
pub fn max_depth_checked(relation: &AdjacencyRelation, start: Position) -> Result<usize, TopoError> {
    let mut height: PositionVec<usize> = PositionVec::filled(relation.node_count(), 0);
    let mut walk = ReverseWalk::new(relation);

    walk.enter(start);
    while let Some(done) = walk.next_done()? {
        height[done] = relation
            .predecessors(done)
            .map(|p| height[p] + 1)
            .max()
            .unwrap_or(0);
    }

    Ok(height[start])
}

/// [`max_depth_checked`] for an identifier. Unknown names surface as
/// [`TopoError::Graph`].
pub fn max_depth_checked_of(
    index: &NodeIndex,
    relation: &AdjacencyRelation,
    start: &str,
) -> Result<usize, TopoError> {
    max_depth_checked(relation, index.position_of(start)?)
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;
    use crate::algorithms::topological_order::test::{arb_dag, relation};

    #[test]
    fn chain_depth_is_its_length() {
        let (index, relation) = relation(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("b", "c"), ("c", "d"), ("d", "e")],
        );

        assert_eq!(max_depth_of(&index, &relation, "e"), Ok(4));
        assert_eq!(max_depth_of(&index, &relation, "c"), Ok(2));
        assert_eq!(max_depth_of(&index, &relation, "a"), Ok(0));
    }

    #[test]
    fn isolated_node_has_depth_zero() {
        let (index, relation) = relation(&["lonely", "x", "y"], &[("x", "y")]);

        assert_eq!(max_depth_of(&index, &relation, "lonely"), Ok(0));
    }

    #[test]
    fn takes_the_longest_branch() {
        // short: s -> t, long: a -> b -> c -> t
        let (index, relation) = relation(
            &["a", "b", "c", "s", "t"],
            &[("s", "t"), ("a", "b"), ("b", "c"), ("c", "t")],
        );

        let t = index.position_of("t").unwrap();
        assert_eq!(max_depth(&relation, t), 3);
        assert_eq!(max_depth_checked(&relation, t), Ok(3));
    }

    #[test]
    fn unknown_start_is_rejected() {
        let (index, relation) = relation(&["a"], &[]);

        assert_eq!(
            max_depth_of(&index, &relation, "nope"),
            Err(GraphError::UnknownNode("nope".to_string()))
        );
    }

    #[test]
    fn checked_depth_reports_cycle() {
        let (index, relation) = relation(
            &["a", "b", "c", "z"],
            &[("a", "b"), ("b", "c"), ("c", "a"), ("a", "z")],
        );

        let z = index.position_of("z").unwrap();
        assert!(matches!(
            max_depth_checked(&relation, z),
            Err(TopoError::CycleDetected { .. })
        ));
    }

    #[test]
    fn checked_depth_ignores_cycles_it_cannot_reach() {
        let (index, relation) = relation(
            &["a", "b", "p", "q"],
            &[("a", "b"), ("b", "a"), ("p", "q")],
        );

        let q = index.position_of("q").unwrap();
        assert_eq!(max_depth_checked(&relation, q), Ok(1));
    }

    #[test]
    fn checked_depth_by_identifier() {
        let (index, relation) = relation(
            &["a", "b", "c"],
            &[("a", "b"), ("b", "a"), ("b", "c")],
        );

        assert_eq!(
            max_depth_checked_of(&index, &relation, "nope"),
            Err(TopoError::Graph(GraphError::UnknownNode("nope".to_string())))
        );
        assert_eq!(
            max_depth_checked_of(&index, &relation, "c"),
            Err(TopoError::CycleDetected {
                node: Position(1),
                path: vec![Position(1), Position(0)],
            })
        );
    }

    proptest! {
        #[test]
        fn checked_and_unchecked_agree(relation in arb_dag(), pick in any::<prop::sample::Index>()) {
            let start = Position(pick.index(relation.node_count()));
            prop_assert_eq!(max_depth_checked(&relation, start), Ok(max_depth(&relation, start)));
        }
    }
}
