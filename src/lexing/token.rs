//! Token and token type definitions
//!
//! Token types are opaque string tags owned by the client grammar. The core
//! only ever compares them and hands them back, so a grammar can declare its
//! types as constants:
//!
//! ```ignore
//! const START: TokenType = TokenType::new("START");
//! ```

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Opaque tag identifying the kind of a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TokenType(Cow<'static, str>);

impl TokenType {
    pub const fn new(name: &'static str) -> Self {
        TokenType(Cow::Borrowed(name))
    }

    /// Build a token type from a name only known at runtime.
    pub fn owned(name: impl Into<String>) -> Self {
        TokenType(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for TokenType {
    fn from(name: &'static str) -> Self {
        TokenType::new(name)
    }
}

/// A lexeme recognized by a consumer.
///
/// Consumers return drafts with only `typ` and `value` set; the driver stamps
/// `offset`. `line` and `column` are never computed by the core and stay zero
/// unless the caller fills them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub typ: TokenType,
    pub value: String,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(typ: TokenType, value: impl Into<String>) -> Self {
        Token {
            typ,
            value: value.into(),
            offset: 0,
            line: 0,
            column: 0,
        }
    }

    /// Return this token positioned at `offset`.
    pub fn at(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Length of the value in runes.
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Offset one past the last rune of the value.
    pub fn end(&self) -> usize {
        self.offset + self.len()
    }
}
