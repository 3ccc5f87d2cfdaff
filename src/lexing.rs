//! Lexing
//!
//! Hand-rolled tokenization built from three pieces:
//!
//! 1. A [`RuneReader`](reader::RuneReader) holding the input and a stack of
//!    saved positions (`mark` / `rewind` / `commit`).
//! 2. [`Consumer`](consumers::Consumer)s, each recognizing one kind of lexeme.
//!    The library ships single runes, character classes, rune sets, literal
//!    text, regex-validated and incremental-regex matching, and quoted strings.
//!    Any closure taking a reader works as well.
//! 3. The driver ([`lex_static`](driver::lex_static)), which tries the
//!    consumers in order at every position, rewinds after each failed attempt
//!    and emits tokens to a [`TokenSink`](driver::TokenSink).
//!
//! Lexing is all or nothing: the first position no consumer recognizes ends
//! the stream with an ERROR token.

pub mod consumers;
pub mod driver;
pub mod reader;
pub mod token;

pub use consumers::{
    CharacterClass, Consumer, DelimitedString, FullMatch, IncrementalRegex, RegexValidated,
    RuneSet, SingleRune, Text,
};
pub use driver::{lex_static, LexStatus, Lexer, TokenSink, NO_VALID_TOKEN};
pub use reader::{RuneReader, StringReader, REPLACEMENT};
pub use token::{Token, TokenType};
