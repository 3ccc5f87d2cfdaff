//! Ready-made grammars built from the library's consumers and factories.
//!
//! They back the `parsekit` binary and double as worked examples of wiring a
//! lexer and a parser together.

pub mod sexp;
