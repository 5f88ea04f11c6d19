//! Iterators over the entries of a [`Tree`] in the four classic orders.
//!
//! Every iterator borrows the tree, so the tree can't be changed while one is alive. Each call
//! to [`Tree::in_order`] (etc.) starts a fresh walk from the root. None of them recurse: pending
//! nodes are kept on a heap-allocated stack or queue whose size is bounded by the height of the
//! tree (or its widest level, for [`LevelOrder`]).

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::node::{Link, NodeId};
use crate::Tree;

impl<K, V> Tree<K, V> {
    /// Iterates over the entries in ascending key order (left subtree, node, right subtree).
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree: Tree<_, _> = [(2, 'b'), (3, 'c'), (1, 'a')].into_iter().collect();
    /// let entries: Vec<_> = tree.in_order().collect();
    ///
    /// assert_eq!(entries, [(&1, &'a'), (&2, &'b'), (&3, &'c')]);
    /// ```
    pub fn in_order(&self) -> InOrder<'_, K, V> {
        let mut iter = InOrder {
            tree: self,
            stack: Vec::new(),
            remaining: self.size(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    /// Iterates over the entries node first, then the left subtree, then the right subtree.
    /// Two trees with equal pre-orders have the same shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree: Tree<_, _> = (1..=3).map(|k| (k, ())).collect();
    /// let keys: Vec<_> = tree.pre_order().map(|(k, _)| *k).collect();
    ///
    /// assert_eq!(keys, [2, 1, 3]);
    /// ```
    pub fn pre_order(&self) -> PreOrder<'_, K, V> {
        PreOrder {
            tree: self,
            stack: self.root.into_iter().collect(),
            remaining: self.size(),
        }
    }

    /// Iterates over the entries left subtree first, then the right subtree, then the node.
    /// Every node comes after all of its descendants.
    pub fn post_order(&self) -> PostOrder<'_, K, V> {
        PostOrder {
            tree: self,
            stack: self.root.map(|id| (id, false)).into_iter().collect(),
            remaining: self.size(),
        }
    }

    /// Iterates over the entries one level at a time, from the root down and left to right
    /// within a level.
    pub fn level_order(&self) -> LevelOrder<'_, K, V> {
        LevelOrder {
            tree: self,
            queue: self.root.into_iter().collect(),
            remaining: self.size(),
        }
    }
}

/// An iterator over the entries of a [`Tree`] in ascending key order. See [`Tree::in_order`].
pub struct InOrder<'a, K, V> {
    tree: &'a Tree<K, V>,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<K, V> InOrder<'_, K, V> {
    fn push_left_spine(&mut self, mut link: Link) {
        while let Some(id) = link {
            self.stack.push(id);
            link = self.tree.arena[id].left;
        }
    }
}

impl<'a, K, V> Iterator for InOrder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let id = self.stack.pop()?;
        self.push_left_spine(tree.arena[id].right);
        self.remaining -= 1;
        Some(tree.entry(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// An iterator over the entries of a [`Tree`], each node before its subtrees. See
/// [`Tree::pre_order`].
pub struct PreOrder<'a, K, V> {
    tree: &'a Tree<K, V>,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<'a, K, V> Iterator for PreOrder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let id = self.stack.pop()?;
        let node = &tree.arena[id];
        // Right first so the left subtree is popped first.
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        self.remaining -= 1;
        Some(tree.entry(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// An iterator over the entries of a [`Tree`], each node after its subtrees. See
/// [`Tree::post_order`].
pub struct PostOrder<'a, K, V> {
    tree: &'a Tree<K, V>,
    /// Pending nodes, flagged with whether their children have already been pushed.
    stack: Vec<(NodeId, bool)>,
    remaining: usize,
}

impl<'a, K, V> Iterator for PostOrder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some((id, expanded)) = self.stack.pop() {
            if expanded {
                self.remaining -= 1;
                return Some(tree.entry(id));
            }

            let node = &tree.arena[id];
            self.stack.push((id, true));
            self.stack.extend(node.right.map(|right| (right, false)));
            self.stack.extend(node.left.map(|left| (left, false)));
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// An iterator over the entries of a [`Tree`], breadth first. See [`Tree::level_order`].
pub struct LevelOrder<'a, K, V> {
    tree: &'a Tree<K, V>,
    queue: VecDeque<NodeId>,
    remaining: usize,
}

impl<'a, K, V> Iterator for LevelOrder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let id = self.queue.pop_front()?;
        let node = &tree.arena[id];
        self.queue.extend(node.left);
        self.queue.extend(node.right);
        self.remaining -= 1;
        Some(tree.entry(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// The iterators only hold a shared reference to the tree and some node ids, so they can be
/// cloned without requiring `K: Clone` or `V: Clone`.
macro_rules! impl_traversal_traits {
    ($name:ident, $pending:ident) => {
        impl<K, V> Clone for $name<'_, K, V> {
            fn clone(&self) -> Self {
                Self {
                    tree: self.tree,
                    $pending: self.$pending.clone(),
                    remaining: self.remaining,
                }
            }
        }

        impl<K, V> ExactSizeIterator for $name<'_, K, V> {}

        impl<K, V> FusedIterator for $name<'_, K, V> {}
    };
}

impl_traversal_traits!(InOrder, stack);
impl_traversal_traits!(PreOrder, stack);
impl_traversal_traits!(PostOrder, stack);
impl_traversal_traits!(LevelOrder, queue);
