///! Elimination forest: a parent array over column indices `0..n`.
///!
///! `parent(i)` is the smallest `k > i` with `L[k, i] != 0`, or `ROOT` when
///! `i` has no such ancestor. The forest is built incrementally, column by
///! column, by elimination-tree algorithms (see the `etree` module of the
///! `qd-sparse-ldl` crate): each column starts as its own root and is
///! re-parented at most once, the first time an ancestor below it is
///! discovered.

/// Sentinel marking a column with no parent (a root of the forest).
pub const ROOT: usize = usize::MAX;

/// A parent array over `0..n`, with `ROOT` for columns that are roots.
#[derive(Clone, Debug)]
pub struct EliminationForest {
    parent: Vec<usize>,
}

impl EliminationForest {
    /// Create a forest of `n` singleton roots.
    pub fn new(n: usize) -> Self {
        EliminationForest {
            parent: vec![ROOT; n],
        }
    }

    /// Number of columns in the forest.
    #[inline]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// The parent of `i`, or `None` if `i` is a root.
    #[inline]
    pub fn parent(&self, i: usize) -> Option<usize> {
        match self.parent[i] {
            ROOT => None,
            p => Some(p),
        }
    }

    /// The raw parent array (`ROOT` for roots).
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.parent
    }

    /// Set the parent of `i` to `k`, if `i` does not already have one.
    /// No-op if `i` already has a parent (a column is only ever re-parented
    /// once, the first time it is discovered from below).
    #[inline]
    pub fn set_parent_if_root(&mut self, i: usize, k: usize) {
        debug_assert!(k > i, "a parent must have a strictly larger column index");
        if self.parent[i] == ROOT {
            self.parent[i] = k;
        }
    }
}
