//! Terminal tree view of a hierarchy

use generational_arena::Index;
use termtree::Tree;

use crate::arena::ValueTree;

impl ValueTree {
    /// Render the hierarchy as a terminal tree, one line per node showing
    /// its name and own value.
    pub fn to_tree_string(&self) -> Tree<String> {
        if let Some(root_idx) = self.root() {
            let mut tree = Tree::new(self.node_line(root_idx));

            fn build_tree(tree_arena: &ValueTree, node_idx: Index, parent_tree: &mut Tree<String>) {
                if let Some(node) = tree_arena.get_node(node_idx) {
                    for &child_idx in &node.children {
                        if tree_arena.get_node(child_idx).is_some() {
                            let mut child_tree = Tree::new(tree_arena.node_line(child_idx));
                            build_tree(tree_arena, child_idx, &mut child_tree);
                            parent_tree.push(child_tree);
                        }
                    }
                }
            }

            build_tree(self, root_idx, &mut tree);
            tree
        } else {
            Tree::new("Empty tree".to_string())
        }
    }

    fn node_line(&self, idx: Index) -> String {
        match self.get_node(idx) {
            Some(node) => format!("{} ({})", node.data.name, node.data.attrs.value),
            None => String::new(),
        }
    }
}
