//! Render handoff: labels, size scaling, colors, payload assembly

use std::collections::BTreeMap;
use std::str::FromStr;

use itertools::Itertools;
use serde::Serialize;
use tracing::instrument;

use crate::attrs::NodeAttrs;
use crate::errors::GraphError;
use crate::snapshot::Snapshot;

/// Base node size the scaling modes start from.
pub const BASE_NODE_SIZE: f64 = 2000.0;

/// Figure size handed through to the rendering collaborator unexamined.
pub const DEFAULT_FIGSIZE: (f64, f64) = (7.0, 5.0);

/// Scaling applied to a node's aggregated percent to derive its render size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SizeMode {
    /// Every node gets the base size
    #[default]
    Fixed,
    /// base × percent / 100
    Linear,
    /// base × percent² / 10000
    Exponential,
    /// base × 0.5 × log10(percent)
    Logarithmic,
}

impl SizeMode {
    /// Derive a render size from an aggregated percent.
    pub fn scale(self, base_size: f64, percent: f64) -> f64 {
        match self {
            SizeMode::Fixed => base_size,
            SizeMode::Linear => base_size * percent / 100.0,
            SizeMode::Exponential => base_size * percent * percent / 10_000.0,
            SizeMode::Logarithmic => base_size * 0.5 * percent.log10(),
        }
    }
}

impl FromStr for SizeMode {
    type Err = GraphError;

    /// Parse a mode selector: `false`, `true` or `lin`, `exp`, `log`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "false" => Ok(SizeMode::Fixed),
            "true" | "lin" => Ok(SizeMode::Linear),
            "exp" => Ok(SizeMode::Exponential),
            "log" => Ok(SizeMode::Logarithmic),
            other => Err(GraphError::UnknownSizeMode(other.to_string())),
        }
    }
}

/// Caller-tunable knobs for the render handoff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Size scaling applied to aggregated percents
    pub dynamic_size: SizeMode,
    /// Figure size, opaque to this crate
    pub figsize: (f64, f64),
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            dynamic_size: SizeMode::default(),
            figsize: DEFAULT_FIGSIZE,
        }
    }
}

/// Everything a rendering collaborator receives: the aggregated graph plus
/// per-node display maps derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPayload<'a> {
    /// The aggregated node/edge graph
    pub snapshot: &'a Snapshot,
    /// Node name to multi-line display label
    pub labels: BTreeMap<String, String>,
    /// Node name to render size derived from its aggregated percent
    pub sizes: BTreeMap<String, f64>,
    /// Node name to color, verbatim from the snapshot
    pub colors: BTreeMap<String, String>,
    /// Figure size, passed through untouched
    pub figsize: (f64, f64),
}

impl<'a> RenderPayload<'a> {
    /// Assemble the handoff maps for every node in the snapshot.
    ///
    /// Nodes without a numeric percent scale as percent zero.
    #[instrument(level = "debug", skip(snapshot))]
    pub fn new(snapshot: &'a Snapshot, options: &RenderOptions) -> Self {
        let mut labels = BTreeMap::new();
        let mut sizes = BTreeMap::new();
        let mut colors = BTreeMap::new();

        for (name, attrs) in snapshot.nodes() {
            let percent = attrs.percent_as_number().unwrap_or(0.0);
            labels.insert(name.to_string(), node_label(name, attrs));
            sizes.insert(
                name.to_string(),
                options.dynamic_size.scale(BASE_NODE_SIZE, percent),
            );
            colors.insert(name.to_string(), attrs.color.clone());
        }

        Self {
            snapshot,
            labels,
            sizes,
            colors,
            figsize: options.figsize,
        }
    }
}

/// Multi-line node label: name, aggregated value, and the percent line when
/// a numeric percent is present.
fn node_label(name: &str, attrs: &NodeAttrs) -> String {
    let mut parts = vec![name.to_string(), attrs.value.to_string()];
    if let Some(percent) = attrs.percent_as_number() {
        parts.push(format!("{:5.2}%", percent));
    }
    parts.iter().join("\n")
}
