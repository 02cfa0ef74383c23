//! Hierarchical aggregation graphs.
//!
//! Build a tree of named, attributed nodes; [`ValueTree::build`] rolls the
//! numeric attributes of every subtree up the hierarchy and materializes,
//! per node, a directed-graph [`Snapshot`] of the subtree below it. The
//! root snapshot plus derived label, size and color maps form the
//! [`RenderPayload`] handed to an external drawing collaborator behind the
//! [`Renderer`] trait.
//!
//! ```
//! use hiergraph::{attrs, ValueTree};
//!
//! let mut tree = ValueTree::new();
//! let total = tree.add_node("total", None, attrs! { "value" => 1, "percent" => 10 })?;
//! let web = tree.add_node("web", Some(total), attrs! { "value" => 2, "percent" => 20 })?;
//! tree.add_node("api", Some(web), attrs! { "value" => 3, "percent" => 30 })?;
//!
//! tree.build(total)?;
//!
//! let totals = tree.aggregated(total).unwrap();
//! assert_eq!(totals.value.as_number(), Some(6.0));
//! assert_eq!(totals.percent_as_number(), Some(60.0));
//!
//! let snapshot = tree.snapshot(total).unwrap();
//! assert_eq!(snapshot.node_count(), 3);
//! assert_eq!(snapshot.edge_count(), 2);
//! # Ok::<(), hiergraph::GraphError>(())
//! ```

pub mod arena;
pub mod attrs;
pub mod errors;
pub mod export;
pub mod macros;
pub mod render;
pub mod snapshot;
pub mod util;

mod aggregate;
mod display;

pub use arena::{NodeData, PostOrderIterator, TreeIterator, TreeNode, ValueTree};
pub use attrs::{AttrMap, AttrValue, NodeAttrs, DEFAULT_COLOR};
pub use errors::{GraphError, GraphResult};
pub use export::{
    RenderOptions, RenderPayload, SizeMode, BASE_NODE_SIZE, DEFAULT_FIGSIZE,
};
pub use render::{DotRenderer, Renderer};
pub use snapshot::Snapshot;
