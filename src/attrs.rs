//! Attribute model: typed values, known fields, passthrough extras

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::errors::{GraphError, GraphResult};

/// Color assigned when a node has no explicit color and no parent to inherit from.
pub const DEFAULT_COLOR: &str = "green";

/// Caller-supplied attribute overrides, keyed by attribute name.
pub type AttrMap = BTreeMap<String, AttrValue>;

/// A single attribute payload.
///
/// `value` and `percent` are numeric by contract, but the contract is only
/// enforced when they are summed: a `Text` value survives construction and
/// fails at aggregation time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl AttrValue {
    /// Numeric view, `None` for non-numeric payloads.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Payload kind for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            AttrValue::Number(_) => "number",
            AttrValue::Text(_) => "text",
            AttrValue::Flag(_) => "flag",
        }
    }

    /// Consume into the textual form used for categorical fields.
    pub fn into_text(self) -> String {
        match self {
            AttrValue::Text(s) => s,
            other => other.to_string(),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Integral numbers print without a decimal point ("6", not "6.0").
            AttrValue::Number(n) if n.fract() == 0.0 && n.is_finite() => {
                write!(f, "{}", *n as i64)
            }
            AttrValue::Number(n) => write!(f, "{}", n),
            AttrValue::Text(s) => write!(f, "{}", s),
            AttrValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        AttrValue::Number(n)
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        AttrValue::Number(n as f64)
    }
}

impl From<i32> for AttrValue {
    fn from(n: i32) -> Self {
        AttrValue::Number(n as f64)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Flag(b)
    }
}

/// Compiled default for a known attribute key.
pub(crate) fn default_for(key: &str) -> Option<AttrValue> {
    match key {
        "value" => Some(AttrValue::Number(0.0)),
        "percent" => Some(AttrValue::Number(0.0)),
        "color" => Some(AttrValue::Text(DEFAULT_COLOR.to_string())),
        _ => None,
    }
}

/// Attributes of one node: the known fields plus a passthrough side-map.
///
/// `extra` carries keys the aggregation does not interpret; they survive
/// merges unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeAttrs {
    pub value: AttrValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<AttrValue>,
    pub color: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, AttrValue>,
}

impl Default for NodeAttrs {
    fn default() -> Self {
        Self {
            value: AttrValue::Number(0.0),
            percent: None,
            color: DEFAULT_COLOR.to_string(),
            extra: BTreeMap::new(),
        }
    }
}

impl NodeAttrs {
    /// Resolve a node's attributes from caller-supplied overrides.
    ///
    /// Resolution order per required key: supplied override, then (for
    /// `color`) the parent's current color, then the compiled default.
    /// `percent` is only present when supplied. Remaining override keys
    /// become passthrough extras.
    pub(crate) fn resolve(
        name: &str,
        mut overrides: AttrMap,
        parent_color: Option<&str>,
    ) -> GraphResult<Self> {
        let value = Self::resolve_required(name, "value", overrides.remove("value"), None)?;
        let inherited = parent_color.map(|c| AttrValue::Text(c.to_string()));
        let color = Self::resolve_required(name, "color", overrides.remove("color"), inherited)?
            .into_text();
        let percent = overrides.remove("percent");

        Ok(Self {
            value,
            percent,
            color,
            extra: overrides,
        })
    }

    fn resolve_required(
        name: &str,
        key: &'static str,
        supplied: Option<AttrValue>,
        inherited: Option<AttrValue>,
    ) -> GraphResult<AttrValue> {
        supplied
            .or(inherited)
            .or_else(|| default_for(key))
            .ok_or_else(|| GraphError::MissingAttribute {
                node: name.to_string(),
                key,
            })
    }

    /// Numeric view of `percent`, `None` when absent or non-numeric.
    pub fn percent_as_number(&self) -> Option<f64> {
        self.percent.as_ref().and_then(AttrValue::as_number)
    }

    /// Copy a freshly built node's attributes over this (possibly stale) copy.
    ///
    /// Key-by-key overwrite: `percent` is only replaced when the fresh copy
    /// defines it, and extras absent from the fresh copy survive.
    pub(crate) fn overwrite_from(&mut self, fresh: &NodeAttrs) {
        self.value = fresh.value.clone();
        if fresh.percent.is_some() {
            self.percent = fresh.percent.clone();
        }
        self.color = fresh.color.clone();
        for (key, val) in &fresh.extra {
            self.extra.insert(key.clone(), val.clone());
        }
    }
}
