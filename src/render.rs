//! Pictures of a tree's shape, for debugging and teaching.

use std::fmt;

use crate::node::NodeId;
use crate::Tree;

impl<K, V> Tree<K, V> {
    /// Renders the shape of the tree in the Graphviz `dot` language. Each node is labelled with
    /// its key and the height of its subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree: Tree<_, _> = [(2, ()), (1, ())].into_iter().collect();
    /// let dot = tree.dot().to_string();
    ///
    /// assert!(dot.starts_with("digraph {"));
    /// assert!(dot.contains(r#"n0 -> n1 [label="left"];"#));
    /// ```
    pub fn dot(&self) -> Dot<'_, K, V> {
        Dot { tree: self }
    }
}

/// A Graphviz rendering of a [`Tree`]. See [`Tree::dot`].
pub struct Dot<'a, K, V> {
    tree: &'a Tree<K, V>,
}

impl<K, V> fmt::Display for Dot<'_, K, V>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arena = &self.tree.arena;
        writeln!(f, "digraph {{")?;

        let mut stack: Vec<NodeId> = self.tree.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let node = &arena[id];
            let name = id.index();
            writeln!(
                f,
                r#"  n{name} [label="{:?} (h={})"];"#,
                node.key,
                node.height - 1
            )?;
            for (side, child) in [("left", node.left), ("right", node.right)] {
                if let Some(child) = child {
                    writeln!(f, r#"  n{name} -> n{} [label="{side}"];"#, child.index())?;
                    stack.push(child);
                }
            }
        }

        write!(f, "}}")
    }
}

impl<K, V> fmt::Debug for Dot<'_, K, V>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Draws the tree on its side: the root is in the left-most column, the right subtree above it
/// and the left subtree below it. Each level is indented by four more spaces.
///
/// ```
/// use avl::Tree;
///
/// let tree: Tree<_, _> = [(2, ()), (1, ()), (3, ())].into_iter().collect();
/// assert_eq!(tree.to_string(), "    3\n2\n    1\n");
/// ```
impl<K, V> fmt::Display for Tree<K, V>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Reverse in-order so the largest key is printed first.
        let mut stack = Vec::new();
        let mut current = self.root.map(|id| (id, 0));
        loop {
            while let Some((id, depth)) = current {
                stack.push((id, depth));
                current = self.arena[id].right.map(|right| (right, depth + 1));
            }
            let Some((id, depth)) = stack.pop() else {
                break;
            };
            let node = &self.arena[id];
            writeln!(f, "{:indent$}{}", "", node.key, indent = depth * 4)?;
            current = node.left.map(|left| (left, depth + 1));
        }
        Ok(())
    }
}
