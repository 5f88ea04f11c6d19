//! This crate exposes a self-balancing Binary Search Tree (BST), written mostly for educational
//! purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! The benefits of these invariants are many. For instance, searching for
//! keys in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). BSTs also naturally support sorted
//! iteration by visiting the left subtree, then the subtree root, then the right subtree.
//!
//! ## AVL Trees
//!
//! Inserting keys in sorted order into a plain BST gives a tree that is really a linked list,
//! with a height of `N - 1` for `N` nodes. An AVL tree adds a third invariant:
//!
//! 3. For every `Node`, the heights of its left and right subtrees differ by at most one.
//!
//! After every insert and delete the tree walks from the changed node back up to the root and
//! restores this invariant with "rotations", constant time relinkings of a node and one or two of
//! its descendants that keep the keys in order. This limits the height to roughly
//! `1.44 * lg(N + 2)`.
//!
//! The tree is split into layers:
//!
//! - `node` stores nodes in a per-tree table and links them by index,
//! - `bst` keeps keys in order and reports which part of the tree changed,
//! - `balance` recomputes heights and rotates,
//! - [`iter`] walks the tree in the four classic orders.
//!
//! # Examples
//!
//! ```
//! use avl::Tree;
//!
//! let mut tree = Tree::new();
//! for key in 1..=7 {
//!     tree.insert(key, key * 10);
//! }
//!
//! // A plain BST would be 6 levels deep here.
//! assert_eq!(tree.height(), 2);
//! assert!(tree.is_balanced());
//!
//! let keys: Vec<_> = tree.in_order().map(|(k, _)| *k).collect();
//! assert_eq!(keys, [1, 2, 3, 4, 5, 6, 7]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod balance;
mod bst;
mod error;
pub mod iter;
mod node;
mod render;
mod tree;
mod util;

#[cfg(test)]
mod test;

pub use error::{Error, Violation};
pub use render::Dot;
pub use tree::{Insertion, Tree};
