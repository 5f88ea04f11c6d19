//! The ordering half of the tree. Everything in here keeps keys sorted (left subtree smaller,
//! right subtree larger) but knows nothing about heights or rotations. Mutations report the
//! lowest node whose subtree changed so [`balance`][crate::balance] can walk the parent links
//! from there up to the root.

use std::cmp::Ordering;
use std::mem;

use crate::node::{Link, Node, NodeId};
use crate::util::Side;
use crate::Tree;

/// What happened when a key was placed in the tree.
pub(crate) enum Placement<V> {
    /// A new leaf was linked in. Its ancestors are the ones that may need rebalancing.
    Inserted(NodeId),
    /// The key was already present. Its old value is handed back.
    Updated(V),
}

/// An entry cut out of the tree by [`Tree::unlink`].
pub(crate) struct Unlinked<K, V> {
    /// The lowest node whose subtree lost a level (or may have). Rebalancing starts here.
    pub(crate) lowest: Link,
    pub(crate) key: K,
    pub(crate) value: V,
}

impl<K, V> Tree<K, V> {
    pub(crate) fn find_node(&self, key: &K) -> Link
    where
        K: Ord,
    {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.arena[id];
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Equal => return Some(id),
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Walks down from the root the way a search would and hangs a new leaf where the search
    /// falls off the tree. An existing key keeps its node and only has its value replaced.
    pub(crate) fn place(&mut self, key: K, value: V) -> Placement<V>
    where
        K: Ord,
    {
        let mut parent = None;
        let mut current = self.root;
        while let Some(id) = current {
            let node = &mut self.arena[id];
            let side = match key.cmp(&node.key) {
                Ordering::Less => Side::Left,
                Ordering::Equal => return Placement::Updated(mem::replace(&mut node.value, value)),
                Ordering::Greater => Side::Right,
            };
            parent = Some((id, side));
            current = node.child(side);
        }

        let mut leaf = Node::new(key, value);
        leaf.parent = parent.map(|(id, _)| id);
        let leaf = self.arena.alloc(leaf);
        match parent {
            Some((id, side)) => self.arena[id].set_child(side, Some(leaf)),
            None => self.root = Some(leaf),
        }
        Placement::Inserted(leaf)
    }

    /// Removes the entry stored at `id` from the tree.
    ///
    /// 1. A leaf is simply detached.
    /// 2. A node with one child is replaced by that child.
    /// 3. A node with two children takes over the entry of its in-order successor (the minimum
    ///    of its right subtree), and the successor's node is removed instead. The successor has
    ///    no left child so removing it is case 1 or 2.
    pub(crate) fn unlink(&mut self, id: NodeId) -> Unlinked<K, V> {
        let (parent, left, right) = {
            let node = &self.arena[id];
            (node.parent, node.left, node.right)
        };

        match (left, right) {
            (None, None) => {
                log::trace!("unlinking a leaf");
                self.replace_child(parent, id, None);
                let Node { key, value, .. } = self.arena.free(id);
                Unlinked {
                    lowest: parent,
                    key,
                    value,
                }
            }
            (Some(child), None) | (None, Some(child)) => {
                log::trace!("splicing out a node with one child");
                self.replace_child(parent, id, Some(child));
                let Node { key, value, .. } = self.arena.free(id);
                Unlinked {
                    lowest: parent,
                    key,
                    value,
                }
            }
            (Some(_), Some(right)) => {
                log::trace!("replacing a node with two children by its successor");
                let successor = self.extreme(right, Side::Left);
                let successor_parent = self.arena[successor].parent;
                let successor_right = self.arena[successor].right;
                self.replace_child(successor_parent, successor, successor_right);

                let Node { key, value, .. } = self.arena.free(successor);
                let node = &mut self.arena[id];
                Unlinked {
                    lowest: successor_parent,
                    key: mem::replace(&mut node.key, key),
                    value: mem::replace(&mut node.value, value),
                }
            }
        }
    }

    /// Points whatever referenced `old` (its parent, or the root) at `new` instead, and fixes
    /// `new`'s parent link to match. `old`'s own links are left alone.
    pub(crate) fn replace_child(&mut self, parent: Link, old: NodeId, new: Link) {
        if let Some(new) = new {
            self.arena[new].parent = parent;
        }
        match parent {
            Some(parent) => {
                let side = self.side_of(parent, old);
                self.arena[parent].set_child(side, new);
            }
            None => self.root = new,
        }
    }

    /// Which child of `parent` the node `child` is.
    pub(crate) fn side_of(&self, parent: NodeId, child: NodeId) -> Side {
        let parent = &self.arena[parent];
        if parent.left == Some(child) {
            Side::Left
        } else {
            debug_assert_eq!(parent.right, Some(child), "not a child of its parent");
            Side::Right
        }
    }

    /// Follows `side` children from `id` until there are none. `Side::Left` finds the minimum of
    /// the subtree, `Side::Right` the maximum.
    pub(crate) fn extreme(&self, mut id: NodeId, side: Side) -> NodeId {
        while let Some(child) = self.arena[id].child(side) {
            id = child;
        }
        id
    }

    /// The next node in sorted order towards `side`: `Side::Right` is the successor and
    /// `Side::Left` the predecessor.
    ///
    /// If `id` has a child on that side the answer is the nearest extreme of that subtree.
    /// Otherwise it is the first ancestor reached by stepping up out of the opposite side.
    pub(crate) fn neighbour(&self, id: NodeId, side: Side) -> Link {
        if let Some(child) = self.arena[id].child(side) {
            return Some(self.extreme(child, side.opposite()));
        }

        let mut current = id;
        let mut parent = self.arena[id].parent;
        while let Some(p) = parent {
            if self.arena[p].child(side) != Some(current) {
                return Some(p);
            }
            current = p;
            parent = self.arena[p].parent;
        }
        None
    }

    pub(crate) fn entry(&self, id: NodeId) -> (&K, &V) {
        let node = &self.arena[id];
        (&node.key, &node.value)
    }
}
