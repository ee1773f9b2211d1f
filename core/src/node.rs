//! Node Description Model
//!
//! The untyped component tree the server sends. A node carries a type
//! tag into the leaf registry, a bag of JSON-primitive props, and
//! children in one of three shapes: a single node, an ordered list of
//! nodes, or literal text.
//!
//! The wire names are `type` / `props` / `children`, matching what the
//! agent backend emits. A tree is a tree: nothing in here caches by
//! node identity, so a misbehaving server sharing sub-nodes degrades
//! gracefully instead of corrupting state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Property bag for one node. Ordered map so serialization and tests
/// are deterministic.
pub type PropMap = BTreeMap<String, PropValue>;

/// A single JSON-primitive property value.
///
/// Strings double as symbolic action references; whether a string is
/// interpreted as one is decided by the leaf's hook-key contract, not
/// by the string's shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    /// String value (display text or action reference)
    Text(String),
    /// Numeric value
    Number(f64),
    /// Boolean value
    Bool(bool),
}

impl PropValue {
    /// String content, if this is a string prop
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Render the value for display
    pub fn to_display(&self) -> String {
        match self {
            PropValue::Text(s) => s.clone(),
            PropValue::Number(n) => {
                // Trim the ".0" off integral numbers
                if n.fract() == 0.0 && n.is_finite() {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            PropValue::Bool(b) => format!("{b}"),
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Text(s.to_string())
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

/// The three children shapes a node may carry (plus absence).
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Children {
    /// No children (absent or JSON null)
    #[default]
    None,
    /// Literal text content
    Text(String),
    /// A single child node
    One(Box<NodeDescription>),
    /// An ordered sequence of child nodes
    Many(Vec<NodeDescription>),
}

impl Children {
    pub fn is_none(&self) -> bool {
        matches!(self, Children::None)
    }
}

/// One server-sent UI element and its subtree.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeDescription {
    /// Type tag into the leaf registry. Missing tag deserializes to
    /// the empty string, which resolves like any unknown tag.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Display props and action references
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub props: PropMap,
    /// Child content
    #[serde(default, skip_serializing_if = "Children::is_none")]
    pub children: Children,
}

impl NodeDescription {
    /// Convenience constructor for tests and fixtures
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            props: PropMap::new(),
            children: Children::None,
        }
    }

    /// Builder-style prop insertion
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Builder-style children assignment
    pub fn with_children(mut self, children: Children) -> Self {
        self.children = children;
        self
    }
}

/// A top-level response payload: either a full node tree or a bare
/// string, which renders through the raw-text leaf.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UiPayload {
    /// Bare string payload
    Text(String),
    /// Full node description
    Node(NodeDescription),
}
