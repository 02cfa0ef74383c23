//! Bottom-up aggregation: rebuild snapshots and subtree totals

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::arena::ValueTree;
use crate::attrs::AttrValue;
use crate::errors::{GraphError, GraphResult};

impl ValueTree {
    /// Recompute the snapshot and subtree totals of `root` and every node
    /// below it.
    ///
    /// Runs a full recompute in post-order: each node is reset to its own
    /// attributes and a snapshot seeded with just itself, children are
    /// built first, then folded into the parent in registration order.
    /// Rebuilding an unchanged tree yields an identical snapshot.
    #[instrument(level = "debug", skip(self))]
    pub fn build(&mut self, root: Index) -> GraphResult<()> {
        // Explicit stack instead of call-stack recursion; the bool marks
        // nodes whose children are already expanded.
        let mut stack = vec![(root, false)];

        while let Some((current_idx, expanded)) = stack.pop() {
            if expanded {
                let children = self
                    .get_node(current_idx)
                    .ok_or(GraphError::UnknownNode)?
                    .children
                    .clone();
                for child_idx in children {
                    self.merge_child(current_idx, child_idx)?;
                }
            } else {
                self.reset(current_idx)?;
                stack.push((current_idx, true));
                let node = self.get_node(current_idx).ok_or(GraphError::UnknownNode)?;
                for &child_idx in node.children.iter().rev() {
                    stack.push((child_idx, false));
                }
            }
        }

        debug!("rebuilt subtree at {:?}", root);
        Ok(())
    }

    /// Reset a node to its pre-aggregation state: totals equal its own
    /// attributes, snapshot holds just itself.
    fn reset(&mut self, idx: Index) -> GraphResult<()> {
        let node = self.get_node_mut(idx).ok_or(GraphError::UnknownNode)?;
        node.aggregated = node.data.attrs.clone();
        node.snapshot.clear();
        node.snapshot
            .put_node(node.data.name.clone(), node.aggregated.clone());
        Ok(())
    }

    /// Fold one fully built child into its parent.
    fn merge_child(&mut self, parent: Index, child: Index) -> GraphResult<()> {
        let (parent_node, child_node) = self.get2_mut(parent, child);
        let parent_node = parent_node.ok_or(GraphError::UnknownNode)?;
        let child_node = child_node.ok_or(GraphError::UnknownNode)?;

        let child_value = numeric(&child_node.data.name, "value", &child_node.aggregated.value)?;
        let own_value = numeric(
            &parent_node.data.name,
            "value",
            &parent_node.aggregated.value,
        )?;
        parent_node.aggregated.value = AttrValue::Number(own_value + child_value);

        // A parent that never saw a percent starts accumulating from zero.
        if let Some(percent) = &child_node.aggregated.percent {
            let child_percent = numeric(&child_node.data.name, "percent", percent)?;
            let own_percent = match &parent_node.aggregated.percent {
                Some(p) => numeric(&parent_node.data.name, "percent", p)?,
                None => 0.0,
            };
            parent_node.aggregated.percent = Some(AttrValue::Number(own_percent + child_percent));
        }

        // Keep the parent's own snapshot entry in step with its totals.
        let parent_name = parent_node.data.name.clone();
        if let Some(entry) = parent_node.snapshot.node_mut(&parent_name) {
            entry.value = parent_node.aggregated.value.clone();
            entry.percent = parent_node.aggregated.percent.clone();
        }

        parent_node.snapshot.absorb(&child_node.snapshot);
        parent_node
            .snapshot
            .add_edge(parent_name, child_node.data.name.clone());
        Ok(())
    }
}

fn numeric(node: &str, key: &'static str, value: &AttrValue) -> GraphResult<f64> {
    value.as_number().ok_or_else(|| GraphError::AggregationType {
        node: node.to_string(),
        key,
        found: value.kind(),
    })
}
