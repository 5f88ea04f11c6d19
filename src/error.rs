use thiserror::Error;

/// The negative results of looking something up in a [`Tree`][crate::Tree].
///
/// Neither of these is fatal: they are how the tree says "there is nothing there".
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested key (or its neighbour in the requested direction) is not in the tree.
    #[error("key not found")]
    NotFound,
    /// The operation needs at least one entry but the tree has none.
    #[error("tree is empty")]
    EmptyTree,
}

/// A broken tree invariant, as reported by [`Tree::validate`][crate::Tree::validate].
///
/// Seeing one of these means the tree itself has a bug. Positions are indices into the tree's
/// in-order sequence.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// The entry at `position` does not compare greater than the one before it.
    #[error("entry {position} is not greater than its in-order predecessor")]
    Ordering {
        /// In-order index of the offending entry.
        position: usize,
    },
    /// A node's stored height disagrees with the height of its subtree.
    #[error("entry {position} stores height {stored} but its subtree has height {actual}")]
    Height {
        /// In-order index of the offending entry.
        position: usize,
        /// The height the node claims.
        stored: usize,
        /// The height recomputed from its children.
        actual: usize,
    },
    /// A node's subtrees differ in height by more than one.
    #[error("entry {position} has balance factor {factor}")]
    Balance {
        /// In-order index of the offending entry.
        position: usize,
        /// `height(left) - height(right)`.
        factor: isize,
    },
    /// A child's parent link does not point at the node that owns it.
    #[error("entry {position} has a parent link that disagrees with its parent's child link")]
    ParentLink {
        /// In-order index of the offending entry.
        position: usize,
    },
    /// The recorded size disagrees with the number of reachable nodes.
    #[error("tree records {recorded} entries but {reachable} are reachable")]
    Size {
        /// The size the tree reports.
        recorded: usize,
        /// The number of nodes reachable from the root.
        reachable: usize,
    },
}
