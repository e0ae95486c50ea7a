use crate::alias::ALIAS_PATH_SEPARATOR;
use crate::grammar::TokenTypeName;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The raw input: a JSON object mapping names to token and group nodes.
pub type TokenTree = Map<String, Value>;

/// The two independent resolution switches.
///
/// `resolve_aliases` inlines alias targets into the output instead of
/// keeping the reference strings. `publish_metadata` annotates every emitted
/// node with its classification and structural path. Both default to off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub resolve_aliases: bool,
    pub publish_metadata: bool,
}

/// How a node ended up in the output: defined as a token, defined as a
/// group, or inlined through an alias dereference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Token,
    Group,
    Alias,
}

/// The `_kind` / `_name` / `_path` annotations emitted when
/// [`ParseOptions::publish_metadata`] is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeMeta {
    #[serde(rename = "_kind")]
    pub kind: NodeKind,
    #[serde(rename = "_name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "_path")]
    pub path: Vec<String>,
}

/// A resolved token value. Aliases either stay as literal reference strings
/// (deferred resolution) or become [`ResolvedValue::Reference`] nodes
/// (eager resolution); arrays and objects are resolved element-wise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResolvedValue {
    Literal(Value),
    Reference(Box<ResolvedNode>),
    Array(Vec<ResolvedValue>),
    Object(BTreeMap<String, ResolvedValue>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedToken {
    #[serde(rename = "$type")]
    pub token_type: TokenTypeName,
    #[serde(rename = "$value")]
    pub value: ResolvedValue,
    #[serde(rename = "$description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "$extensions", skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
    #[serde(rename = "$deprecated", skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<Value>,
    #[serde(flatten)]
    pub meta: Option<NodeMeta>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedGroup {
    #[serde(rename = "$type", skip_serializing_if = "Option::is_none")]
    pub group_type: Option<TokenTypeName>,
    #[serde(rename = "$description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub meta: Option<NodeMeta>,
    #[serde(flatten)]
    pub children: BTreeMap<String, ResolvedNode>,
}

/// A node of the normalized output tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResolvedNode {
    Token(ResolvedToken),
    Group(ResolvedGroup),
}

impl ResolvedNode {
    #[must_use]
    pub fn as_token(&self) -> Option<&ResolvedToken> {
        match self {
            ResolvedNode::Token(token) => Some(token),
            ResolvedNode::Group(_) => None,
        }
    }

    #[must_use]
    pub fn as_group(&self) -> Option<&ResolvedGroup> {
        match self {
            ResolvedNode::Group(group) => Some(group),
            ResolvedNode::Token(_) => None,
        }
    }

    /// The type tag the node carries, if any. Tokens always carry one;
    /// groups only when declared or inherited.
    #[must_use]
    pub fn node_type(&self) -> Option<TokenTypeName> {
        match self {
            ResolvedNode::Token(token) => Some(token.token_type),
            ResolvedNode::Group(group) => group.group_type,
        }
    }
}

/// The fully resolved output tree. Children are kept sorted so that
/// serialization is deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ResolvedTokenTree {
    pub nodes: BTreeMap<String, ResolvedNode>,
}

impl ResolvedTokenTree {
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks a node up by its dot-separated path from the root.
    /// Intermediate segments must name groups.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&ResolvedNode> {
        let mut segments = path.split(ALIAS_PATH_SEPARATOR);
        let mut node = self.nodes.get(segments.next()?)?;
        for segment in segments {
            node = node.as_group()?.children.get(segment)?;
        }
        Some(node)
    }

    /// Serializes the tree into a generic `serde_json::Value`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        crate::serialization::to_value(self)
    }

    /// Serializes the tree into a pretty-printed JSON string.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serializes the tree into a YAML string.
    ///
    /// # Errors
    /// Returns a `serde_yaml::Error` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// Returns true iff the raw value is a plain object carrying a `$value` key.
#[must_use]
pub fn match_is_token(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|obj| obj.contains_key("$value"))
}

/// Returns true iff the raw value is a plain object without a `$value` key.
#[must_use]
pub fn match_is_group(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|obj| !obj.contains_key("$value"))
}
