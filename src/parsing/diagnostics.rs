//! Parse diagnostics
//!
//! The parser never fails. Tokens it cannot place are skipped and reported
//! here, and the embedding application decides whether that matters.

use super::node::NodeId;
use crate::lexing::Token;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// No factory is registered for the token's type.
    UnmappedTokenType,
    /// A factory returned a node id that does not belong to the tree.
    UnknownNode,
}

/// A non-fatal problem met while folding a token into the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub token: Token,
    pub message: String,
}

impl Diagnostic {
    pub fn unmapped(token: &Token) -> Self {
        Diagnostic {
            kind: DiagnosticKind::UnmappedTokenType,
            message: format!("no factory found for token type {}", token.typ),
            token: token.clone(),
        }
    }

    pub fn unknown_node(token: &Token, id: NodeId) -> Self {
        Diagnostic {
            kind: DiagnosticKind::UnknownNode,
            message: format!(
                "factory for token type {} returned unknown node {}",
                token.typ,
                id.index()
            ),
            token: token.clone(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.message, self.token.offset)
    }
}
