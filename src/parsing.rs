//! Parsing
//!
//! Folds a token stream into a [`Tree`](node::Tree). The parser is lenient:
//! tokens nobody registered a factory for are skipped and reported as
//! [`Diagnostic`](diagnostics::Diagnostic)s instead of aborting the parse.

pub mod diagnostics;
pub mod node;
pub mod parser;

pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use node::{Ancestors, Node, NodeError, NodeId, NodeKind, NodeType, Span, Tagged, Tree, Walk};
pub use parser::{
    ascend, descend, leaf, tagged, Ascend, Descend, Ignore, Leaf, NodeFactory, ParseOutcome,
    Parser, Step,
};
