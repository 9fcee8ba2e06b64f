//! Binary search tree with parent-owned nodes
//!
//! Every node is uniquely owned by its parent and the root by the tree
//! itself. Nodes receive a `NodeId` equal to their insertion order, which
//! is what trace steps report as the examined position.
//!
//! Duplicate policy: inserting a value equal to one already present is
//! rejected with `SearchError::InvalidInput`. The tree never stores equal
//! keys, so a successful search always ends at a unique node.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{NodeId, Result, SearchError};

/// Tree node owning both subtrees
pub struct TreeNode<T> {
    id: NodeId,
    value: T,
    left: Option<Box<TreeNode<T>>>,
    right: Option<Box<TreeNode<T>>>,
}

impl<T> TreeNode<T> {
    fn leaf(id: NodeId, value: T) -> Self {
        Self {
            id,
            value,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    #[inline]
    pub fn left(&self) -> Option<&TreeNode<T>> {
        self.left.as_deref()
    }

    #[inline]
    pub fn right(&self) -> Option<&TreeNode<T>> {
        self.right.as_deref()
    }
}

/// Shows child ids rather than whole subtrees
impl<T: fmt::Debug> fmt::Debug for TreeNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeNode")
            .field("id", &self.id)
            .field("value", &self.value)
            .field("left", &self.left().map(TreeNode::id))
            .field("right", &self.right().map(TreeNode::id))
            .finish()
    }
}

/// Which edge led to a node in a layout listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeSide {
    Root,
    Left,
    Right,
}

impl fmt::Display for NodeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeSide::Root => "root",
            NodeSide::Left => "left",
            NodeSide::Right => "right",
        })
    }
}

/// Node placement for tree views: value, level (root = 0) and side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLayout<T> {
    pub id: NodeId,
    pub value: T,
    pub level: usize,
    pub side: NodeSide,
}

/// Binary search tree built once and read-only afterwards
///
/// `Clone`, `PartialEq`, `Debug` and `Drop` use explicit stacks, so
/// degenerate chains of any depth are safe.
pub struct SearchTree<T> {
    root: Option<Box<TreeNode<T>>>,
    len: usize,
}

impl<T> Default for SearchTree<T> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<T: Ord> SearchTree<T> {
    /// Inserts `values` in the given order, rejecting duplicates
    pub fn from_values(values: Vec<T>) -> Result<Self>
    where
        T: fmt::Debug,
    {
        let mut tree = Self::default();
        for value in values {
            tree.insert(value)?;
        }
        Ok(tree)
    }

    fn insert(&mut self, value: T) -> Result<NodeId>
    where
        T: fmt::Debug,
    {
        let id = NodeId(self.len);
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match value.cmp(&node.value) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => {
                    return Err(SearchError::InvalidInput(format!(
                        "duplicate value {:?} rejected by binary search tree",
                        value
                    )))
                }
            };
        }
        *slot = Some(Box::new(TreeNode::leaf(id, value)));
        self.len += 1;
        Ok(id)
    }

    /// Depth of `value` counting the root as 1, if present
    pub fn depth_of(&self, value: &T) -> Option<usize> {
        let mut current = self.root();
        let mut depth = 1;
        while let Some(node) = current {
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(depth),
            };
            depth += 1;
        }
        None
    }
}

impl<T> SearchTree<T> {
    #[inline]
    pub fn root(&self) -> Option<&TreeNode<T>> {
        self.root.as_deref()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels; an empty tree has height 0
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut pending: Vec<(&TreeNode<T>, usize)> = self.root().map(|r| (r, 1)).into_iter().collect();
        while let Some((node, level)) = pending.pop() {
            height = height.max(level);
            pending.extend(node.left().map(|n| (n, level + 1)));
            pending.extend(node.right().map(|n| (n, level + 1)));
        }
        height
    }

    /// Values in ascending order
    pub fn inorder(&self) -> Vec<&T> {
        let mut ordered = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        let mut current = self.root();
        while current.is_some() || !stack.is_empty() {
            while let Some(node) = current {
                stack.push(node);
                current = node.left();
            }
            if let Some(node) = stack.pop() {
                ordered.push(&node.value);
                current = node.right();
            }
        }
        ordered
    }

    /// Pre-order placement listing for tree rendering
    pub fn layout(&self) -> Vec<NodeLayout<T>>
    where
        T: Clone,
    {
        let mut placements = Vec::with_capacity(self.len);
        let mut pending: Vec<(&TreeNode<T>, usize, NodeSide)> = self
            .root()
            .map(|r| (r, 0, NodeSide::Root))
            .into_iter()
            .collect();
        while let Some((node, level, side)) = pending.pop() {
            placements.push(NodeLayout {
                id: node.id,
                value: node.value.clone(),
                level,
                side,
            });
            // Right is pushed first so the left subtree is listed first.
            pending.extend(node.right().map(|n| (n, level + 1, NodeSide::Right)));
            pending.extend(node.left().map(|n| (n, level + 1, NodeSide::Left)));
        }
        placements
    }
}

impl<T: Clone> Clone for SearchTree<T> {
    fn clone(&self) -> Self {
        // Children are rebuilt before their parent: reversed (node, right, left)
        // order is post-order, and finished subtrees wait on `built`.
        let mut order = Vec::with_capacity(self.len);
        let mut pending: Vec<&TreeNode<T>> = self.root().into_iter().collect();
        while let Some(node) = pending.pop() {
            order.push(node);
            pending.extend(node.left());
            pending.extend(node.right());
        }

        let mut built: Vec<Box<TreeNode<T>>> = Vec::new();
        for node in order.into_iter().rev() {
            let right = if node.right.is_some() { built.pop() } else { None };
            let left = if node.left.is_some() { built.pop() } else { None };
            built.push(Box::new(TreeNode {
                id: node.id,
                value: node.value.clone(),
                left,
                right,
            }));
        }
        Self {
            root: built.pop(),
            len: self.len,
        }
    }
}

impl<T: PartialEq> PartialEq for SearchTree<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }
        let mut pending = vec![(self.root(), other.root())];
        while let Some(pair) = pending.pop() {
            match pair {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    if a.id != b.id || a.value != b.value {
                        return false;
                    }
                    pending.push((a.left(), b.left()));
                    pending.push((a.right(), b.right()));
                }
                _ => return false,
            }
        }
        true
    }
}

impl<T: Eq> Eq for SearchTree<T> {}

/// Lists `id: value` pairs in pre-order
impl<T: fmt::Debug> fmt::Debug for SearchTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut nodes = f.debug_map();
        let mut pending: Vec<&TreeNode<T>> = self.root().into_iter().collect();
        while let Some(node) = pending.pop() {
            nodes.entry(&node.id, &node.value);
            pending.extend(node.right());
            pending.extend(node.left());
        }
        nodes.finish()
    }
}

impl<T> Drop for SearchTree<T> {
    fn drop(&mut self) {
        let mut pending: Vec<Box<TreeNode<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}
