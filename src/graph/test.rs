use super::*;

fn diamond_index() -> NodeIndex {
    NodeIndex::intern(["D", "B", "A", "C", "B"])
}

#[test]
fn intern_sorts_and_deduplicates() {
    let index = diamond_index();

    assert_eq!(index.len(), 4);
    assert_eq!(index.position_of("A"), Ok(Position(0)));
    assert_eq!(index.position_of("D"), Ok(Position(3)));
    assert_eq!(index.identifier_at(Position(2)), "C");
    assert_eq!(
        index.iter().map(|(_, id)| id).collect::<Vec<_>>(),
        ["A", "B", "C", "D"]
    );
}

#[test]
fn positions_are_a_bijection() {
    let index = NodeIndex::intern(["zeta", "alpha", "mu", "alpha", "beta"]);

    for (position, id) in index.iter() {
        assert_eq!(index.position_of(id), Ok(position));
    }
    assert_eq!(index.get_identifier(Position(index.len())), None);
}

#[test]
fn unknown_identifier_is_rejected() {
    let index = diamond_index();

    assert_eq!(
        index.position_of("E"),
        Err(GraphError::UnknownNode("E".to_string()))
    );
    assert!(!index.contains("E"));
}

#[test]
fn build_sets_edges_and_drops_self_loops() {
    let index = diamond_index();
    let relation =
        AdjacencyRelation::build(&index, [("A", "B"), ("B", "C"), ("B", "D"), ("C", "C")])
            .unwrap();

    assert_eq!(relation.node_count(), 4);
    assert_eq!(relation.edge_count(), 3);
    assert!(relation.contains(Position(0), Position(1)));
    assert!(!relation.contains(Position(1), Position(0)));
    assert!(!relation.contains(Position(2), Position(2)));
    assert_eq!(relation.out_degree(Position(1)), 2);
    assert_eq!(relation.in_degree(Position(1)), 1);
}

#[test]
fn duplicate_edges_are_idempotent() {
    let index = diamond_index();
    let relation = AdjacencyRelation::build(&index, [("A", "B"), ("A", "B"), ("A", "B")]).unwrap();

    assert_eq!(relation.edge_count(), 1);
}

#[test]
fn build_rejects_unknown_endpoint() {
    let index = diamond_index();

    let err = AdjacencyRelation::build(&index, [("A", "B"), ("B", "Q")]).unwrap_err();
    assert_eq!(err, GraphError::UnknownNode("Q".to_string()));

    // unknown self-loops still surface instead of being dropped
    let err = AdjacencyRelation::build(&index, [("Q", "Q")]).unwrap_err();
    assert_eq!(err, GraphError::UnknownNode("Q".to_string()));
}

#[test]
fn neighbours_and_edges() {
    let index = diamond_index();
    let relation =
        AdjacencyRelation::build(&index, [("B", "D"), ("A", "B"), ("B", "C")]).unwrap();

    assert_eq!(
        relation.successors(Position(1)).collect::<Vec<_>>(),
        [Position(2), Position(3)]
    );
    assert_eq!(
        relation.predecessors(Position(1)).collect::<Vec<_>>(),
        [Position(0)]
    );
    assert_eq!(
        relation.edges().collect::<Vec<_>>(),
        [
            (Position(0), Position(1)),
            (Position(1), Position(2)),
            (Position(1), Position(3))
        ]
    );
    assert_eq!(relation.next_predecessor(Position(3), 0), Some(Position(1)));
    assert_eq!(relation.next_predecessor(Position(3), 2), None);
    assert_eq!(relation.next_predecessor(Position(3), 4), None);
}

#[test]
fn insert_remove_and_clear() {
    let mut relation = AdjacencyRelation::with_nodes(3);

    assert!(relation.insert(Position(0), Position(2)));
    assert!(!relation.insert(Position(0), Position(2)));
    assert!(!relation.insert(Position(1), Position(1)));
    assert!(relation.insert(Position(1), Position(2)));
    assert_eq!(relation.in_degree(Position(2)), 2);

    assert!(relation.remove(Position(0), Position(2)));
    assert!(!relation.remove(Position(0), Position(2)));
    assert_eq!(relation.in_degree(Position(2)), 1);

    let snapshot = relation.clone();
    relation.clear();
    assert_eq!(relation.edge_count(), 0);
    assert_eq!(relation.node_count(), 3);
    assert_eq!(snapshot.edge_count(), 1);
}
