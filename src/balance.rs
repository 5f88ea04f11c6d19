//! The balancing half of the tree. After [`bst`][crate::bst] changes the shape of the tree, the
//! functions in here walk from the lowest changed node up towards the root, recomputing heights
//! and rotating wherever a node's subtrees differ in height by more than one.
//!
//! See [the Wikipedia page][wiki] for the terminology.
//!
//! [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Rebalancing

use crate::node::{Link, NodeId};
use crate::util::Side;
use crate::Tree;

impl<K, V> Tree<K, V> {
    /// Height of a possibly missing subtree. A missing subtree has height 0.
    pub(crate) fn link_height(&self, link: Link) -> usize {
        link.map_or(0, |id| self.arena[id].height)
    }

    /// Adjusts the height of `id` to be the max of its children's heights + 1.
    fn fix_height(&mut self, id: NodeId) {
        let node = &self.arena[id];
        let height = self.link_height(node.left).max(self.link_height(node.right)) + 1;
        self.arena[id].height = height;
    }

    /// `height(left) - height(right)`. Positive means left-heavy.
    pub(crate) fn balance_factor(&self, id: NodeId) -> isize {
        let node = &self.arena[id];
        self.link_height(node.left) as isize - self.link_height(node.right) as isize
    }

    /// Rotates the subtree rooted at `root` towards `side`. The child on the other side (the
    /// pivot) moves up into `root`'s place and `root` becomes the pivot's `side` child. The
    /// pivot's inner subtree changes hands to keep the ordering intact.
    ///
    /// Only `root`, the pivot, the inner subtree's root and `root`'s parent have links touched,
    /// and only `root` and the pivot have their heights recomputed. Returns the pivot.
    ///
    /// ## Panics
    ///
    /// When `root` has no child opposite `side`.
    fn rotate(&mut self, root: NodeId, side: Side) -> NodeId {
        let Some(pivot) = self.arena[root].child(side.opposite()) else {
            panic!("rotating {side} needs a {} child", side.opposite());
        };
        let inner = self.arena[pivot].child(side);
        let parent = self.arena[root].parent;

        self.arena[root].set_child(side.opposite(), inner);
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(root);
        }

        self.replace_child(parent, root, Some(pivot));
        self.arena[pivot].set_child(side, Some(root));
        self.arena[root].parent = Some(pivot);

        self.fix_height(root);
        self.fix_height(pivot);
        pivot
    }

    /// Rotate `root` to the right. This moves the left child up vertically and `root` down
    /// vertically. Used when the left subtree is too tall.
    ///
    /// ```text
    ///    Option<parent>            Option<parent>
    ///      /                         /
    ///    root                     pivot
    ///    /  \                     /   \
    /// pivot  z     rotate ->     x    root
    ///  / \                            /  \
    /// x   y                          y    z
    /// ```
    fn rotate_right(&mut self, root: NodeId) -> NodeId {
        log::trace!("rotating right");
        self.rotate(root, Side::Right)
    }

    /// The mirror image of [`Self::rotate_right`]. Used when the right subtree is too tall.
    ///
    /// ```text
    ///  Option<parent>              Option<parent>
    ///      /                           /
    ///    root                        pivot
    ///    /  \                        /   \
    ///   x  pivot     rotate ->     root   z
    ///       / \                    /  \
    ///      y   z                  x    y
    /// ```
    fn rotate_left(&mut self, root: NodeId) -> NodeId {
        log::trace!("rotating left");
        self.rotate(root, Side::Left)
    }

    /// Left rotation of the left child followed by a right rotation of `root`. Used when the
    /// left subtree is too tall because of its right child.
    fn rotate_left_right(&mut self, root: NodeId, left: NodeId) -> NodeId {
        log::trace!("double rotation (left-right)");
        self.rotate(left, Side::Left);
        self.rotate(root, Side::Right)
    }

    /// Right rotation of the right child followed by a left rotation of `root`.
    fn rotate_right_left(&mut self, root: NodeId, right: NodeId) -> NodeId {
        log::trace!("double rotation (right-left)");
        self.rotate(right, Side::Right);
        self.rotate(root, Side::Left)
    }

    /// Restores the balance invariant at `id`, assuming `id`'s height is current and its
    /// subtrees are balanced. Returns the new root of the subtree if a rotation was needed.
    fn rebalance_at(&mut self, id: NodeId) -> Option<NodeId> {
        let node = &self.arena[id];
        let new_root = match (self.balance_factor(id), node.left, node.right) {
            (factor, Some(left), _) if factor > 1 => match self.balance_factor(left) {
                n if n >= 0 => self.rotate_right(id),
                _ => self.rotate_left_right(id, left),
            },
            (factor, _, Some(right)) if factor < -1 => match self.balance_factor(right) {
                n if n <= 0 => self.rotate_left(id),
                _ => self.rotate_right_left(id, right),
            },
            _ => return None,
        };

        if cfg!(debug_assertions) {
            let node = &self.arena[new_root];
            let left_height = self.link_height(node.left);
            let right_height = self.link_height(node.right);
            assert_eq!(node.height, left_height.max(right_height) + 1);
            assert!(left_height.abs_diff(right_height) <= 1);
        }
        Some(new_root)
    }

    /// Rebalances after `leaf` was linked in. Returns how many (single or double) rotations were
    /// performed, which is never more than one.
    ///
    /// The walk stops as soon as a node's height doesn't change, since nothing above it can have
    /// changed either. It also stops after a rotation: a rotation after an insert restores the
    /// subtree to the height it had before the insert.
    pub(crate) fn rebalance_after_insert(&mut self, leaf: NodeId) -> usize {
        let mut current = self.arena[leaf].parent;
        while let Some(id) = current {
            let before = self.arena[id].height;
            self.fix_height(id);
            if self.rebalance_at(id).is_some() {
                return 1;
            }
            if self.arena[id].height == before {
                break;
            }
            current = self.arena[id].parent;
        }
        0
    }

    /// Rebalances after a node was unlinked below `lowest`. Returns how many (single or double)
    /// rotations were performed.
    ///
    /// Unlike insertion a rotation can leave the subtree one level shorter than it was, which
    /// can unbalance an ancestor in turn. So this always walks all the way to the root.
    pub(crate) fn rebalance_after_delete(&mut self, lowest: Link) -> usize {
        let mut rotations = 0;
        let mut current = lowest;
        while let Some(id) = current {
            self.fix_height(id);
            let top = match self.rebalance_at(id) {
                Some(new_root) => {
                    rotations += 1;
                    new_root
                }
                None => id,
            };
            current = self.arena[top].parent;
        }
        rotations
    }
}
