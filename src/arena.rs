use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::attrs::{AttrMap, NodeAttrs};
use crate::errors::{GraphError, GraphResult};
use crate::snapshot::Snapshot;

/// Data payload for tree nodes: identity plus the node's own attributes.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Node name; keys the node's entry in exported snapshots
    pub name: String,
    /// The node's own attributes, as resolved at insertion or edited since
    pub attrs: NodeAttrs,
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    /// Identity and own attributes for this node
    pub data: NodeData,
    /// Subtree totals, refreshed by every build pass
    pub aggregated: NodeAttrs,
    /// Exported view of this node's subtree, refreshed by every build pass
    pub snapshot: Snapshot,
    /// Index of parent node in the arena, None for root nodes; read only
    /// at insertion time for attribute inheritance
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in registration order
    pub children: Vec<Index>,
}

/// Arena-based tree structure for efficient hierarchy management.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
/// Each tree holds one hierarchy of named, attributed nodes; the most
/// recently inserted parentless node is the root.
#[derive(Debug)]
pub struct ValueTree {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl Default for ValueTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Insert a node, resolving its attributes against the parent.
    ///
    /// Required attributes missing from `overrides` fall back to the
    /// parent's current color (for `color`) and then to compiled defaults.
    /// Inheritance reads the parent at insertion time; later edits to the
    /// parent do not propagate. The new node registers itself in the
    /// parent's child sequence; without a parent it becomes the root.
    #[instrument(level = "trace", skip(self))]
    pub fn add_node(
        &mut self,
        name: &str,
        parent: Option<Index>,
        overrides: AttrMap,
    ) -> GraphResult<Index> {
        let parent_color = match parent {
            Some(parent_idx) => {
                let parent_node = self.arena.get(parent_idx).ok_or(GraphError::UnknownNode)?;
                Some(parent_node.data.attrs.color.clone())
            }
            None => None,
        };
        let attrs = NodeAttrs::resolve(name, overrides, parent_color.as_deref())?;

        let node = TreeNode {
            aggregated: attrs.clone(),
            snapshot: Snapshot::new(),
            data: NodeData {
                name: name.to_string(),
                attrs,
            },
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        Ok(node_idx)
    }

    /// Register an existing node as a child of another parent.
    ///
    /// The child's parent back-reference stays untouched; it only matters
    /// for inheritance at insertion time. A node registered under several
    /// parents is counted once per registration by their common ancestors,
    /// and a registration that closes a cycle makes `build` non-terminating.
    /// The caller keeps the structure a tree.
    #[instrument(level = "trace", skip(self))]
    pub fn add_child(&mut self, parent: Index, child: Index) -> GraphResult<()> {
        if !self.arena.contains(child) {
            return Err(GraphError::UnknownNode);
        }
        let parent_node = self
            .arena
            .get_mut(parent)
            .ok_or(GraphError::UnknownNode)?;
        parent_node.children.push(child);
        Ok(())
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.arena.get_mut(idx)
    }

    pub(crate) fn get2_mut(
        &mut self,
        a: Index,
        b: Index,
    ) -> (Option<&mut TreeNode>, Option<&mut TreeNode>) {
        self.arena.get2_mut(a, b)
    }

    /// A node's own attributes.
    pub fn attrs(&self, idx: Index) -> Option<&NodeAttrs> {
        self.arena.get(idx).map(|node| &node.data.attrs)
    }

    /// Mutable access to a node's own attributes, for edits between builds.
    pub fn attrs_mut(&mut self, idx: Index) -> Option<&mut NodeAttrs> {
        self.arena.get_mut(idx).map(|node| &mut node.data.attrs)
    }

    /// A node's subtree totals as of the last build.
    pub fn aggregated(&self, idx: Index) -> Option<&NodeAttrs> {
        self.arena.get(idx).map(|node| &node.aggregated)
    }

    /// A node's subtree snapshot as of the last build.
    pub fn snapshot(&self, idx: Index) -> Option<&Snapshot> {
        self.arena.get(idx).map(|node| &node.snapshot)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> TreeIterator {
        TreeIterator::new(self)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter_postorder(&self) -> PostOrderIterator {
        PostOrderIterator::new(self)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    #[instrument(level = "trace", skip(self))]
    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Collects all leaf nodes (nodes with no children) in the tree.
    ///
    /// Returns node names for easy display and processing. Empty trees
    /// return an empty vector.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<String> {
        let mut leaves = Vec::new();
        if let Some(root) = self.root {
            self.collect_leaves(root, &mut leaves);
        }
        leaves
    }

    #[instrument(level = "trace", skip(self))]
    fn collect_leaves(&self, node_idx: Index, leaves: &mut Vec<String>) {
        if let Some(node) = self.get_node(node_idx) {
            if node.children.is_empty() {
                leaves.push(node.data.name.clone());
            } else {
                for &child in &node.children {
                    self.collect_leaves(child, leaves);
                }
            }
        }
    }
}

pub struct TreeIterator<'a> {
    tree: &'a ValueTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    #[instrument(level = "trace")]
    fn new(tree: &'a ValueTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    #[instrument(level = "trace", skip(self))]
    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    tree: &'a ValueTree,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    #[instrument(level = "trace")]
    fn new(tree: &'a ValueTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push((root, false));
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    #[instrument(level = "trace", skip(self))]
    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
