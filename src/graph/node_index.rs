use ahash::AHashMap;
use itertools::Itertools;

use super::{GraphError, Position, PositionVec};

/// Bidirectional mapping between node identifiers and their positions.
///
/// Positions are assigned once, in lexicographic order of the identifiers,
/// and form a bijection onto `0..len()`.
#[derive(Clone, Debug, Default)]
pub struct NodeIndex {
    identifiers: PositionVec<String>,
    positions: AHashMap<String, Position>,
}

impl NodeIndex {
    /// Interns `ids`, removing duplicates and sorting them lexicographically.
    pub fn intern<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let identifiers: PositionVec<String> =
            ids.into_iter().map(Into::<String>::into).sorted().dedup().collect();

        let positions = identifiers
            .iter()
            .map(|(position, id)| (id.clone(), position))
            .collect();

        NodeIndex {
            identifiers,
            positions,
        }
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn position_of(&self, id: &str) -> Result<Position, GraphError> {
        self.positions
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode(id.to_owned()))
    }

    /// The identifier stored at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is not below [`NodeIndex::len`].
    pub fn identifier_at(&self, position: Position) -> &str {
        &self.identifiers[position]
    }

    pub fn get_identifier(&self, position: Position) -> Option<&str> {
        self.identifiers.get(position).map(String::as_str)
    }

    /// Maps a sequence of positions back to their identifiers.
    pub fn identifiers(&self, positions: &[Position]) -> Vec<&str> {
        positions.iter().map(|p| self.identifier_at(*p)).collect()
    }

    /// All `(position, identifier)` pairs in position order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Position, &str)> {
        self.identifiers.iter().map(|(p, id)| (p, id.as_str()))
    }
}
