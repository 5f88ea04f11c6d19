//! Storage for the nodes of a [`Tree`][crate::Tree].
//!
//! Every node of a tree lives in that tree's [`Arena`]. Nodes refer to each other through
//! [`NodeId`]s, which are plain indices into the arena. Only the arena owns nodes, so the `parent`
//! link can point back up the tree without creating a second owner. Dropping the arena drops every
//! node exactly once.

use std::ops::{Index, IndexMut};

use crate::util::Side;

/// Index of a [`Node`] in an [`Arena`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    /// Position of the node's slot, for side tables indexed like the arena.
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// A possibly missing node.
pub(crate) type Link = Option<NodeId>;

#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    pub(crate) height: usize,

    pub(crate) parent: Link,
    pub(crate) left: Link,
    pub(crate) right: Link,
}

impl<K, V> Node<K, V> {
    /// Construct a new, unlinked leaf with the given `key` and `value`.
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            height: 1,
            parent: None,
            left: None,
            right: None,
        }
    }

    pub(crate) fn child(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Link) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

/// The node table. Vacated slots are recycled through a free list so a long running tree doesn't
/// grow without bound under churn.
#[derive(Debug, Clone)]
pub(crate) struct Arena<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<NodeId>,
    len: usize,
}

impl<K, V> Default for Arena<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Arena<K, V> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of live nodes.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Number of slots, live or vacant. Every [`NodeId`] handed out is below this.
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        self.len += 1;
        match self.free.pop() {
            Some(id) => {
                debug_assert!(self.slots[id.0].is_none(), "free list handed out a live slot");
                self.slots[id.0] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Removes the node from the table and hands it back. The caller is responsible for having
    /// unlinked it from its parent and children first.
    pub(crate) fn free(&mut self, id: NodeId) -> Node<K, V> {
        let node = match self.slots.get_mut(id.0).and_then(Option::take) {
            Some(node) => node,
            None => panic!("freeing vacant node {id:?}"),
        };
        self.free.push(id);
        self.len -= 1;
        node
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }
}

impl<K, V> Index<NodeId> for Arena<K, V> {
    type Output = Node<K, V>;

    fn index(&self, id: NodeId) -> &Self::Output {
        match self.slots.get(id.0) {
            Some(Some(node)) => node,
            _ => panic!("dangling node {id:?}"),
        }
    }
}

impl<K, V> IndexMut<NodeId> for Arena<K, V> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match self.slots.get_mut(id.0) {
            Some(Some(node)) => node,
            _ => panic!("dangling node {id:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freed_slots_are_reused() {
        let mut arena = Arena::new();
        let a = arena.alloc(Node::new(1, "one"));
        let b = arena.alloc(Node::new(2, "two"));
        assert_eq!(arena.len(), 2);

        let freed = arena.free(a);
        assert_eq!(freed.key, 1);
        assert_eq!(arena.len(), 1);

        let c = arena.alloc(Node::new(3, "three"));
        assert_eq!(c, a);
        assert_eq!(arena[c].key, 3);
        assert_eq!(arena[b].key, 2);
    }

    #[test]
    #[should_panic(expected = "dangling node")]
    fn indexing_a_freed_node_panics() {
        let mut arena = Arena::new();
        let a = arena.alloc(Node::new(1, ()));
        arena.free(a);
        let _ = &arena[a];
    }

    #[test]
    fn children_by_side() {
        let mut arena = Arena::new();
        let parent = arena.alloc(Node::new(2, ()));
        let child = arena.alloc(Node::new(1, ()));

        arena[parent].set_child(Side::Left, Some(child));
        assert_eq!(arena[parent].child(Side::Left), Some(child));
        assert_eq!(arena[parent].child(Side::Right), None);
    }
}
