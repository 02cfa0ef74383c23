//! Exported directed-graph snapshot

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::attrs::NodeAttrs;

/// Directed graph materialized from one subtree by a build pass.
///
/// Node entries are keyed by name and carry the aggregated attributes the
/// subtree owner computed for them; edges are `(source, target)` name
/// pairs. Two snapshots compare equal when they hold the same entries,
/// which is how rebuild idempotence is checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    nodes: BTreeMap<String, NodeAttrs>,
    edges: BTreeSet<(String, String)>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all nodes and edges.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// Insert a node entry, replacing any previous one under that name.
    pub(crate) fn put_node(&mut self, name: impl Into<String>, attrs: NodeAttrs) {
        self.nodes.insert(name.into(), attrs);
    }

    pub(crate) fn node_mut(&mut self, name: &str) -> Option<&mut NodeAttrs> {
        self.nodes.get_mut(name)
    }

    pub(crate) fn add_edge(&mut self, source: impl Into<String>, target: impl Into<String>) {
        self.edges.insert((source.into(), target.into()));
    }

    /// Union another snapshot into this one.
    ///
    /// Node entries from `other` are copied key-by-key over any local entry
    /// of the same name, so the incoming copy wins every collision. Edges
    /// are set-unioned.
    pub(crate) fn absorb(&mut self, other: &Snapshot) {
        for (name, fresh) in &other.nodes {
            match self.nodes.get_mut(name) {
                Some(stale) => stale.overwrite_from(fresh),
                None => {
                    self.nodes.insert(name.clone(), fresh.clone());
                }
            }
        }
        for edge in &other.edges {
            self.edges.insert(edge.clone());
        }
    }

    /// Attributes recorded for a node, if present.
    pub fn node(&self, name: &str) -> Option<&NodeAttrs> {
        self.nodes.get(name)
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn contains_edge(&self, source: &str, target: &str) -> bool {
        self.edges
            .contains(&(source.to_string(), target.to_string()))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate node entries in name order.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, &NodeAttrs)> {
        self.nodes.iter().map(|(name, attrs)| (name.as_str(), attrs))
    }

    /// Iterate edges as `(source, target)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges
            .iter()
            .map(|(source, target)| (source.as_str(), target.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::AttrValue;

    fn entry(value: f64, color: &str) -> NodeAttrs {
        NodeAttrs {
            value: AttrValue::Number(value),
            color: color.to_string(),
            ..NodeAttrs::default()
        }
    }

    #[test]
    fn test_absorb_prefers_incoming_entries() {
        let mut local = Snapshot::new();
        local.put_node("shared", entry(1.0, "red"));

        let mut incoming = Snapshot::new();
        incoming.put_node("shared", entry(9.0, "blue"));
        incoming.put_node("extra", entry(2.0, "green"));

        local.absorb(&incoming);

        assert_eq!(local.node("shared").unwrap().value, AttrValue::Number(9.0));
        assert_eq!(local.node("shared").unwrap().color, "blue");
        assert!(local.contains_node("extra"));
    }

    #[test]
    fn test_absorb_unions_edges_without_duplicates() {
        let mut local = Snapshot::new();
        local.add_edge("a", "b");

        let mut incoming = Snapshot::new();
        incoming.add_edge("a", "b");
        incoming.add_edge("b", "c");

        local.absorb(&incoming);

        assert_eq!(local.edge_count(), 2);
        assert!(local.contains_edge("b", "c"));
    }

    #[test]
    fn test_clear_empties_both_sides() {
        let mut snapshot = Snapshot::new();
        snapshot.put_node("a", entry(1.0, "green"));
        snapshot.add_edge("a", "b");

        snapshot.clear();

        assert!(snapshot.is_empty());
        assert_eq!(snapshot.edge_count(), 0);
    }
}
