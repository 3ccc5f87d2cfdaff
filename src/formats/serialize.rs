//! Serde snapshots of tokens and trees
//!
//! Arena ids mean nothing outside the tree, so the tree is serialized as a
//! nested structure instead. Nesting is capped at [`MAX_SNAPSHOT_DEPTH`]; the
//! `dump` format has no such limit.

use super::FormatError;
use crate::lexing::Token;
use crate::parsing::{NodeId, Tree};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenSnapshot {
    #[serde(rename = "type")]
    pub typ: String,
    pub value: String,
    pub offset: usize,
    pub end: usize,
}

impl From<&Token> for TokenSnapshot {
    fn from(token: &Token) -> Self {
        TokenSnapshot {
            typ: token.typ.to_string(),
            value: token.value.clone(),
            offset: token.offset,
            end: token.end(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSnapshot {
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
    pub offset: usize,
    pub length: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

/// Deepest nesting a [`NodeSnapshot`] accepts, matching the recursion limit
/// serde_json applies when reading documents back.
pub const MAX_SNAPSHOT_DEPTH: usize = 128;

impl NodeSnapshot {
    /// Snapshot of the subtree under `id`.
    pub fn of(tree: &Tree, id: NodeId) -> Result<Self, FormatError> {
        let depth = tree.walk_from(id).map(|(_, depth)| depth).max().unwrap_or(0);
        if depth > MAX_SNAPSHOT_DEPTH {
            return Err(FormatError::TooDeep {
                depth,
                limit: MAX_SNAPSHOT_DEPTH,
            });
        }
        Ok(NodeSnapshot::build(tree, id))
    }

    fn build(tree: &Tree, id: NodeId) -> Self {
        let node = &tree[id];
        let span = node.span();
        NodeSnapshot {
            node_type: node.node_type().to_string(),
            value: node.render(),
            offset: span.offset,
            length: span.length,
            children: node
                .children()
                .iter()
                .map(|&child| NodeSnapshot::build(tree, child))
                .collect(),
        }
    }
}

impl TryFrom<&Tree> for NodeSnapshot {
    type Error = FormatError;

    fn try_from(tree: &Tree) -> Result<Self, FormatError> {
        NodeSnapshot::of(tree, tree.root())
    }
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn to_yaml<T: Serialize + ?Sized>(value: &T) -> Result<String, FormatError> {
    Ok(serde_yaml::to_string(value)?)
}
