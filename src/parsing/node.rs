//! Node tree
//!
//! The tree is an arena: [`Tree`] owns every [`Node`] in a flat vector and
//! nodes refer to each other through [`NodeId`]s. A node's children are
//! exclusively its own; the parent id is a back-reference used only to walk
//! upwards (`depth`, `root_of`, `parent`).
//!
//! What a node *is* comes from its [`NodeKind`]. Clients define their own
//! kinds by implementing the trait; [`Tagged`] covers the common case of a
//! type tag plus a displayable payload.
//!
//! Trees grow append-only. Nothing is ever removed or re-parented.

use crate::lexing::Token;
use serde::Serialize;
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::ops::Index;
use thiserror::Error;

/// Opaque tag naming the kind of a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeType(Cow<'static, str>);

impl NodeType {
    pub const fn new(name: &'static str) -> Self {
        NodeType(Cow::Borrowed(name))
    }

    pub fn owned(name: impl Into<String>) -> Self {
        NodeType(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle to a node inside a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Source range a node was built from, in runes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    pub offset: usize,
    pub length: usize,
}

impl Span {
    pub fn new(offset: usize, length: usize) -> Self {
        Span { offset, length }
    }

    /// The span covered by a token's value.
    pub fn of(token: &Token) -> Self {
        Span::new(token.offset, token.len())
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// Capability shared by every kind of node.
pub trait NodeKind: fmt::Debug {
    fn node_type(&self) -> NodeType;

    /// Free-form rendering of the payload, used by tree dumps.
    fn render(&self) -> String {
        String::new()
    }

    /// Support for [`Node::downcast_ref`]. Implementations return `self`.
    fn as_any(&self) -> &dyn Any;
}

/// Node kind made of a type tag and a displayable payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tagged<V = String> {
    pub node_type: NodeType,
    pub value: V,
}

impl<V> Tagged<V> {
    pub fn new(node_type: NodeType, value: V) -> Self {
        Tagged { node_type, value }
    }
}

impl Tagged<String> {
    /// A tagged node without payload.
    pub fn bare(node_type: NodeType) -> Self {
        Tagged::new(node_type, String::new())
    }
}

impl<V> NodeKind for Tagged<V>
where
    V: fmt::Display + fmt::Debug + 'static,
{
    fn node_type(&self) -> NodeType {
        self.node_type.clone()
    }

    fn render(&self) -> String {
        self.value.to_string()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A node of the tree.
///
/// Built detached with [`Node::new`], then attached with [`Tree::append`],
/// which sets the parent back-reference.
#[derive(Debug)]
pub struct Node {
    kind: Box<dyn NodeKind>,
    span: Span,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn new(kind: impl NodeKind + 'static, span: Span) -> Self {
        Node {
            kind: Box::new(kind),
            span,
            parent: None,
            children: Vec::new(),
        }
    }

    /// A node spanning the value of `token`.
    pub fn from_token(kind: impl NodeKind + 'static, token: &Token) -> Self {
        Node::new(kind, Span::of(token))
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    pub fn render(&self) -> String {
        self.kind.render()
    }

    pub fn kind(&self) -> &dyn NodeKind {
        self.kind.as_ref()
    }

    /// The concrete kind of this node, if it is a `K`.
    pub fn downcast_ref<K: NodeKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("node {} is the root and has no parent", .0.index())]
    IsRoot(NodeId),
    #[error("node {} is not part of this tree", .0.index())]
    UnknownNode(NodeId),
}

/// Arena holding a rooted tree of nodes.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<Node>,
}

const ROOT: NodeId = NodeId(0);

impl Tree {
    /// Start a tree from its root node.
    pub fn new(root: Node) -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            ..root
        };
        Tree { nodes: vec![root] }
    }

    pub fn root(&self) -> NodeId {
        ROOT
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Attach `child` as the last child of `parent`.
    ///
    /// Fails without touching the tree if `parent` belongs to another tree.
    pub fn append(&mut self, parent: NodeId, child: Node) -> Result<NodeId, NodeError> {
        if !self.contains(parent) {
            return Err(NodeError::UnknownNode(parent));
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            ..child
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    /// Attach several children to `parent`, in iteration order.
    pub fn append_all(
        &mut self,
        parent: NodeId,
        children: impl IntoIterator<Item = Node>,
    ) -> Result<Vec<NodeId>, NodeError> {
        children
            .into_iter()
            .map(|child| self.append(parent, child))
            .collect()
    }

    /// Parent of `id`; asking the root for its parent is an error.
    pub fn parent(&self, id: NodeId) -> Result<NodeId, NodeError> {
        self[id].parent.ok_or(NodeError::IsRoot(id))
    }

    /// Topmost ancestor of `id`.
    pub fn root_of(&self, id: NodeId) -> NodeId {
        self.ancestors(id).last().unwrap_or(id)
    }

    /// Distance from the root; the root itself has depth 0.
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    /// Parent, grandparent and so on up to the root. `id` itself is not included.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self[id].parent,
        }
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self[id].is_leaf()
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        self[id].is_root()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self[id].children
    }

    /// Preorder traversal from the root, yielding each node with its depth.
    pub fn walk(&self) -> Walk<'_> {
        self.walk_from(ROOT)
    }

    /// Preorder traversal of the subtree under `id`. Depths are relative to `id`.
    pub fn walk_from(&self, id: NodeId) -> Walk<'_> {
        Walk {
            tree: self,
            stack: vec![(id, 0)],
        }
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

/// Iterator returned by [`Tree::ancestors`].
pub struct Ancestors<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree[id].parent;
        Some(id)
    }
}

/// Preorder iterator returned by [`Tree::walk`] and [`Tree::walk_from`].
pub struct Walk<'a> {
    tree: &'a Tree,
    stack: Vec<(NodeId, usize)>,
}

impl Iterator for Walk<'_> {
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        let children = self.tree.children(id);
        self.stack
            .extend(children.iter().rev().map(|&child| (child, depth + 1)));
        Some((id, depth))
    }
}
