//! # parsekit
//!
//! Building blocks for hand-rolled tokenizers and tree-building parsers.
//!
//! - [`lexing`]: a backtracking rune reader, composable token consumers and
//!   the driver loop turning text into a token stream.
//! - [`parsing`]: an arena node tree and a parser folding tokens into it
//!   through per-token-type factories.
//! - [`formats`]: debug, colored and serde renderings of token streams and trees.
//! - [`grammars`]: sample grammars, currently S-expressions.
//!
//! The ambient pieces used by the binary live in [`config`] and [`logging`].
//! [`testing`] has helpers for writing lexer tests.

pub mod config;
pub mod formats;
pub mod grammars;
pub mod lexing;
pub mod logging;
pub mod parsing;
pub mod testing;
