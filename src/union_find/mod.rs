//! Disjoint-set forest over the integers `0..n`, with full path compression
//! and union by size.

use thiserror::Error;
use tracing::trace;

/// Longest parent chain `find` will follow before declaring the forest corrupt.
///
/// Union by size keeps every tree below `log2(n)` levels, so a healthy forest
/// never gets anywhere near this.
pub const DEFAULT_PATH_LIMIT: usize = 100;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DisjointSetError {
    #[error("DisjointSet({len}): index out of bounds: {index}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// One element of the forest.
///
/// - `Root { size }`: the element represents its set, which has `size` members.
/// - `Child(parent)`: the element points at another element of the same set.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Slot {
    Root { size: usize },
    Child(usize),
}

#[derive(Debug, Clone)]
pub struct DisjointSet {
    slots: Vec<Slot>,
    /// Scratch stack reused by `find` to remember the path it has to compress.
    path: Vec<usize>,
    path_limit: usize,
}

impl DisjointSet {
    /// `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self::with_path_limit(n, DEFAULT_PATH_LIMIT)
    }

    pub fn with_path_limit(n: usize, path_limit: usize) -> Self {
        DisjointSet {
            slots: vec![Slot::Root { size: 1 }; n],
            path: Vec::new(),
            path_limit,
        }
    }

    /// Splits everything back into singletons.
    pub fn reset(&mut self) {
        self.slots.fill(Slot::Root { size: 1 });
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn check(&self, index: usize) -> Result<(), DisjointSetError> {
        if index < self.slots.len() {
            Ok(())
        } else {
            Err(DisjointSetError::IndexOutOfRange {
                index,
                len: self.slots.len(),
            })
        }
    }

    pub fn is_root(&self, index: usize) -> Result<bool, DisjointSetError> {
        self.check(index)?;
        Ok(matches!(self.slots[index], Slot::Root { .. }))
    }

    /// Root of the set containing `index`.
    ///
    /// Every element on the way to the root is repointed directly at it.
    ///
    /// # Panics
    ///
    /// Panics if the chain of parents is longer than the configured path
    /// limit, which only happens if the forest has been corrupted.
    pub fn find(&mut self, index: usize) -> Result<usize, DisjointSetError> {
        self.check(index)?;
        Ok(self.find_root(index))
    }

    fn find_root(&mut self, index: usize) -> usize {
        let mut current = match self.slots[index] {
            Slot::Root { .. } => return index,
            Slot::Child(parent) => parent,
        };

        self.path.clear();
        self.path.push(index);
        while let Slot::Child(parent) = self.slots[current] {
            self.path.push(current);
            if self.path.len() > self.path_limit {
                panic!(
                    "DisjointSet({}): no root within {} steps from {index}, forest is corrupt",
                    self.slots.len(),
                    self.path_limit
                );
            }
            current = parent;
        }

        let root = current;
        trace!(index, root, compressed = self.path.len(), "path compression");
        while let Some(j) = self.path.pop() {
            self.slots[j] = Slot::Child(root);
        }
        root
    }

    fn size_of_root(&self, root: usize) -> usize {
        match self.slots[root] {
            Slot::Root { size } => size,
            Slot::Child(_) => unreachable!("find() should always return a root"),
        }
    }

    /// Merges the sets of `i` and `j` and returns the surviving root.
    ///
    /// The smaller set is attached under the root of the larger one; on a tie
    /// the root of `i` survives. Joining two members of the same set returns
    /// its root and changes nothing.
    pub fn union(&mut self, i: usize, j: usize) -> Result<usize, DisjointSetError> {
        let r1 = self.find(i)?;
        let r2 = self.find(j)?;
        if r1 == r2 {
            return Ok(r1);
        }

        let (s1, s2) = (self.size_of_root(r1), self.size_of_root(r2));
        let (winner, loser) = if s1 < s2 { (r2, r1) } else { (r1, r2) };

        self.slots[winner] = Slot::Root { size: s1 + s2 };
        self.slots[loser] = Slot::Child(winner);
        Ok(winner)
    }

    /// Number of elements in the set containing `index`.
    pub fn set_size(&mut self, index: usize) -> Result<usize, DisjointSetError> {
        let root = self.find(index)?;
        Ok(self.size_of_root(root))
    }

    pub fn component_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, Slot::Root { .. }))
            .count()
    }

    /// The root of every element, compressing all paths along the way.
    pub fn roots(&mut self) -> Vec<usize> {
        (0..self.slots.len()).map(|i| self.find_root(i)).collect()
    }

    /// Members of every set, each sorted ascending, sets ordered by their
    /// smallest member.
    pub fn components(&mut self) -> Vec<Vec<usize>> {
        let mut group_of_root: Vec<Option<usize>> = vec![None; self.slots.len()];
        let mut groups: Vec<Vec<usize>> = Vec::with_capacity(self.component_count());

        for (i, root) in self.roots().into_iter().enumerate() {
            let group = *group_of_root[root].get_or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[group].push(i);
        }
        groups
    }

    /// The classic array encoding: a root stores the negated size of its set,
    /// any other element stores the index of its parent.
    pub fn encoded(&self) -> Vec<isize> {
        self.slots
            .iter()
            .map(|slot| match *slot {
                Slot::Root { size } => -(size as isize),
                Slot::Child(parent) => parent as isize,
            })
            .collect()
    }
}
