//! Helpers for writing lexer tests.
//!
//! [`TokenGenerator`] builds the expected token stream of a test without
//! hand-computing offsets:
//!
//! ```ignore
//! let expected = TokenGenerator::new()
//!     .t(START, "(")
//!     .t(SYMBOL, "test")
//!     .t(END, ")")
//!     .t(EOF, "")
//!     .build();
//! ```

use crate::lexing::{Token, TokenType};

/// Builds a token stream with running offsets.
#[derive(Debug, Clone, Default)]
pub struct TokenGenerator {
    tokens: Vec<Token>,
    offset: usize,
}

impl TokenGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a token; the next token starts right after its value.
    pub fn t(self, typ: TokenType, value: &str) -> Self {
        let length = value.chars().count();
        self.tl(typ, value, length)
    }

    /// Append a token that occupies `length` runes of input.
    ///
    /// Needed when the value differs from the source text, e.g. strings whose
    /// escape backslashes were dropped.
    pub fn tl(mut self, typ: TokenType, value: &str, length: usize) -> Self {
        self.tokens.push(Token::new(typ, value).at(self.offset));
        self.offset += length;
        self
    }

    /// Offset the next token will get.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn build(self) -> Vec<Token> {
        self.tokens
    }
}
