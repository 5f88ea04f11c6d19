//! A self-balancing Binary Search Tree (specifically, an AVL tree).
//!
//! # Examples
//!
//! ```
//! use avl::{Error, Insertion, Tree};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.search(&1), Err(Error::NotFound));
//!
//! assert_eq!(tree.insert(1, 2), Insertion::Inserted);
//! assert_eq!(tree.search(&1), Ok(&2));
//!
//! // Inserting a new value for the same key overwrites the value.
//! assert_eq!(tree.insert(1, 3), Insertion::Updated(2));
//! assert_eq!(tree.search(&1), Ok(&3));
//!
//! // Deleting a node returns its value.
//! assert_eq!(tree.delete(&1), Ok(3));
//! assert_eq!(tree.search(&1), Err(Error::NotFound));
//! assert_eq!(tree.delete(&1), Err(Error::NotFound));
//! ```

use std::collections::VecDeque;
use std::fmt;

use crate::bst::Placement;
use crate::error::{Error, Violation};
use crate::iter::InOrder;
use crate::node::{Arena, Link, NodeId};
use crate::util::Side;

/// The result of [`Tree::insert`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Insertion<V> {
    /// The key was new and a node was created for it.
    Inserted,
    /// The key was already present. Its value was replaced and the old one is returned here.
    Updated(V),
}

impl<V> Insertion<V> {
    /// Whether an existing key had its value replaced.
    pub fn is_update(&self) -> bool {
        matches!(self, Self::Updated(_))
    }
}

/// A self-balancing Binary Search Tree (specifically, an AVL tree). This can be used for
/// inserting, finding, and deleting keys and values.
///
/// Every operation that changes the tree leaves it satisfying two invariants:
///
/// 1. **Ordering**: every key in a node's left subtree is smaller than its key and every key in
///    its right subtree is larger.
/// 2. **Balance**: the heights of every node's two subtrees differ by at most one. This keeps the
///    height of the tree below roughly `1.44 * lg(n + 2)`, so point operations take `O(lg n)`.
pub struct Tree<K, V> {
    pub(crate) arena: Arena<K, V>,
    pub(crate) root: Link,
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for Tree<K, V>
where
    K: Clone,
    V: Clone,
{
    // Node ids are arena indices so the links stay valid in the copy.
    fn clone(&self) -> Self {
        Self {
            arena: self.arena.clone(),
            root: self.root,
        }
    }
}

impl<K, V> fmt::Debug for Tree<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.in_order()).finish()
    }
}

impl<K, V> Tree<K, V> {
    /// Generate a new, empty `Tree`.
    pub const fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// The number of entries in the tree.
    pub fn size(&self) -> usize {
        self.arena.len()
    }

    /// The number of entries in the tree. Same as [`Tree::size`].
    pub fn len(&self) -> usize {
        self.size()
    }

    /// Whether the tree has no entries.
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.root.is_none(), self.size() == 0);
        self.root.is_none()
    }

    /// The number of edges on the longest path from the root to a leaf. A single node has height
    /// 0 and an empty tree has height -1.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.height(), -1);
    ///
    /// tree.extend((1..=7).map(|k| (k, ())));
    /// assert_eq!(tree.height(), 2);
    /// ```
    pub fn height(&self) -> isize {
        self.link_height(self.root) as isize - 1
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.root = None;
        self.arena.clear();
    }

    /// Inserts the given value into the tree stored at the given key. Inserting a new value for an
    /// existing key overwrites its value and reports the old one.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::{Insertion, Tree};
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert_eq!(tree.insert(1, 2), Insertion::Inserted);
    /// assert_eq!(tree.find(&1), Some(&2));
    ///
    /// assert_eq!(tree.insert(1, 3), Insertion::Updated(2));
    /// assert_eq!(tree.find(&1), Some(&3));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Insertion<V>
    where
        K: Ord,
    {
        match self.place(key, value) {
            Placement::Inserted(leaf) => {
                let rotations = self.rebalance_after_insert(leaf);
                log::debug!("inserted new key ({rotations} rotations)");
                Insertion::Inserted
            }
            Placement::Updated(old) => {
                log::debug!("updated existing key");
                Insertion::Updated(old)
            }
        }
    }

    /// Finds the value associated with the given key. Doesn't modify the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::{Error, Tree};
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.search(&1), Ok(&2));
    /// assert_eq!(tree.search(&42), Err(Error::NotFound));
    /// ```
    pub fn search(&self, key: &K) -> Result<&V, Error>
    where
        K: Ord,
    {
        self.find(key).ok_or(Error::NotFound)
    }

    /// Potentially finds the value associated with the given key in this tree. If no node has the
    /// corresponding key, `None` is returned.
    pub fn find(&self, key: &K) -> Option<&V>
    where
        K: Ord,
    {
        self.find_node(key).map(|id| &self.arena[id].value)
    }

    /// Like [`Tree::find`] but allows changing the value in place.
    pub fn find_mut(&mut self, key: &K) -> Option<&mut V>
    where
        K: Ord,
    {
        self.find_node(key).map(|id| &mut self.arena[id].value)
    }

    /// Whether the tree has an entry for `key`.
    pub fn contains_key(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.find_node(key).is_some()
    }

    /// Deletes the node containing the given key from the tree and returns its value. If the tree
    /// does not contain a node with the key, nothing happens.
    ///
    /// A node with two children is replaced by its in-order successor.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::{Error, Tree};
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.delete(&1), Ok(2));
    /// assert_eq!(tree.delete(&1), Err(Error::NotFound));
    /// ```
    pub fn delete(&mut self, key: &K) -> Result<V, Error>
    where
        K: Ord,
    {
        self.delete_entry(key).map(|(_, value)| value)
    }

    /// Like [`Tree::delete`] but also hands back the key that was stored in the tree.
    pub fn delete_entry(&mut self, key: &K) -> Result<(K, V), Error>
    where
        K: Ord,
    {
        let Some(id) = self.find_node(key) else {
            log::debug!("delete missed");
            return Err(Error::NotFound);
        };
        let unlinked = self.unlink(id);
        let rotations = self.rebalance_after_delete(unlinked.lowest);
        log::debug!("deleted key ({rotations} rotations)");
        Ok((unlinked.key, unlinked.value))
    }

    /// The entry with the smallest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::{Error, Tree};
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.find_min(), Err(Error::EmptyTree));
    ///
    /// tree.insert(2, 'b');
    /// tree.insert(1, 'a');
    /// assert_eq!(tree.find_min(), Ok((&1, &'a')));
    /// ```
    pub fn find_min(&self) -> Result<(&K, &V), Error> {
        self.find_extreme(Side::Left)
    }

    /// The entry with the largest key.
    pub fn find_max(&self) -> Result<(&K, &V), Error> {
        self.find_extreme(Side::Right)
    }

    fn find_extreme(&self, side: Side) -> Result<(&K, &V), Error> {
        let root = self.root.ok_or(Error::EmptyTree)?;
        Ok(self.entry(self.extreme(root, side)))
    }

    /// The entry with the largest key smaller than `key`. Fails with [`Error::NotFound`] if `key`
    /// isn't in the tree or is the smallest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::{Error, Tree};
    ///
    /// let tree: Tree<_, _> = [(1, 'a'), (3, 'c'), (5, 'e')].into_iter().collect();
    ///
    /// assert_eq!(tree.predecessor(&3), Ok((&1, &'a')));
    /// assert_eq!(tree.predecessor(&1), Err(Error::NotFound));
    /// assert_eq!(tree.predecessor(&4), Err(Error::NotFound));
    /// ```
    pub fn predecessor(&self, key: &K) -> Result<(&K, &V), Error>
    where
        K: Ord,
    {
        self.find_neighbour(key, Side::Left)
    }

    /// The entry with the smallest key larger than `key`. Fails with [`Error::NotFound`] if `key`
    /// isn't in the tree or is the largest key.
    pub fn successor(&self, key: &K) -> Result<(&K, &V), Error>
    where
        K: Ord,
    {
        self.find_neighbour(key, Side::Right)
    }

    fn find_neighbour(&self, key: &K, side: Side) -> Result<(&K, &V), Error>
    where
        K: Ord,
    {
        let id = self.find_node(key).ok_or(Error::NotFound)?;
        let neighbour = self.neighbour(id, side).ok_or(Error::NotFound)?;
        Ok(self.entry(neighbour))
    }

    /// Recomputes every subtree's height from the tree's shape, ignoring the heights stored in the
    /// nodes, and checks that no node's subtrees differ in height by more than one.
    ///
    /// This is a diagnostic for tests. A tree built through the public API is always balanced.
    pub fn is_balanced(&self) -> bool {
        self.recomputed_heights()
            .iter()
            .all(|&(_, left, right)| left.abs_diff(right) <= 1)
    }

    /// Checks that an in-order walk of the tree yields strictly increasing keys.
    pub fn is_ordered(&self) -> bool
    where
        K: Ord,
    {
        let mut keys = self.in_order().map(|(k, _)| k);
        let Some(mut previous) = keys.next() else {
            return true;
        };
        keys.all(|key| {
            let ordered = previous < key;
            previous = key;
            ordered
        })
    }

    /// Audits the whole tree and reports the first broken invariant found: parent links that
    /// disagree with child links, the recorded size, stored heights, balance factors and key
    /// ordering.
    ///
    /// This is a diagnostic for tests and takes `O(n)` time.
    pub fn validate(&self) -> Result<(), Violation>
    where
        K: Ord,
    {
        let order = self.in_order_ids();
        let mut positions = vec![None; self.arena.slot_count()];
        for (index, &id) in order.iter().enumerate() {
            positions[id.index()] = Some(index);
        }
        let position = |id: NodeId| match positions[id.index()] {
            Some(index) => index,
            None => unreachable!("{id:?} is linked into the tree but missing from its in-order walk"),
        };

        if order.len() != self.size() {
            return Err(Violation::Size {
                recorded: self.size(),
                reachable: order.len(),
            });
        }

        if let Some(root) = self.root {
            if self.arena[root].parent.is_some() {
                return Err(Violation::ParentLink {
                    position: position(root),
                });
            }
        }
        for &id in &order {
            let node = &self.arena[id];
            for child in [node.left, node.right].into_iter().flatten() {
                if self.arena[child].parent != Some(id) {
                    return Err(Violation::ParentLink {
                        position: position(child),
                    });
                }
            }
        }

        for (id, left, right) in self.recomputed_heights() {
            let stored = self.arena[id].height;
            let actual = left.max(right) + 1;
            if stored != actual {
                return Err(Violation::Height {
                    position: position(id),
                    stored,
                    actual,
                });
            }
            if left.abs_diff(right) > 1 {
                return Err(Violation::Balance {
                    position: position(id),
                    factor: left as isize - right as isize,
                });
            }
        }

        for (index, pair) in order.windows(2).enumerate() {
            if self.arena[pair[0]].key >= self.arena[pair[1]].key {
                return Err(Violation::Ordering { position: index + 1 });
            }
        }

        Ok(())
    }

    /// Node ids in key order.
    fn in_order_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(self.size());
        let mut stack = Vec::new();
        let mut current = self.root;
        loop {
            while let Some(id) = current {
                stack.push(id);
                current = self.arena[id].left;
            }
            let Some(id) = stack.pop() else {
                break;
            };
            ids.push(id);
            current = self.arena[id].right;
        }
        ids
    }

    /// For every node, the heights of its left and right subtrees computed from the shape of the
    /// tree alone. Children are visited before their parents.
    fn recomputed_heights(&self) -> Vec<(NodeId, usize, usize)> {
        // Reverse level order visits every child before its parent.
        let mut level_order = Vec::with_capacity(self.size());
        let mut queue: VecDeque<NodeId> = self.root.into_iter().collect();
        while let Some(id) = queue.pop_front() {
            level_order.push(id);
            let node = &self.arena[id];
            queue.extend(node.left);
            queue.extend(node.right);
        }

        let mut heights = vec![0; self.arena.slot_count()];
        let mut result = Vec::with_capacity(level_order.len());
        for &id in level_order.iter().rev() {
            let node = &self.arena[id];
            let left = node.left.map_or(0, |child| heights[child.index()]);
            let right = node.right.map_or(0, |child| heights[child.index()]);
            heights[id.index()] = left.max(right) + 1;
            result.push((id, left, right));
        }
        result
    }
}

impl<K, V> FromIterator<(K, V)> for Tree<K, V>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl<K, V> Extend<(K, V)> for Tree<K, V>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            let _ = self.insert(key, value);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a Tree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = InOrder<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.in_order()
    }
}
