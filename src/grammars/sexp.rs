//! S-expressions
//!
//! Token types, in consumer priority order:
//!
//! | type     | lexeme                                      |
//! |----------|---------------------------------------------|
//! | `START`  | `(`                                         |
//! | `END`    | `)`                                         |
//! | `NUMBER` | `0`, `0.5`, `42`, `3.14`                    |
//! | `SYMBOL` | runs of letters, digits and `-_$#%&`        |
//! | `WS`     | runs of whitespace                          |
//! | `STRING` | `"..."` or `'...'`, `\` escapes the next rune  |
//!
//! Lexing ends with `EOF`, or `ERR` at the first unrecognized rune.
//!
//! The tree has a `ROOT` node, one `LIST` node per parenthesized list and one
//! leaf per atom. Whitespace never reaches the tree.

use crate::formats::ColorPrinter;
use crate::lexing::{
    CharacterClass, Consumer, DelimitedString, FullMatch, LexStatus, Lexer, RegexValidated,
    RuneSet, SingleRune, StringReader, Token, TokenType,
};
use crate::parsing::{
    ascend, descend, leaf, tagged, Diagnostic, Ignore, Node, NodeType, Parser, Tagged, Tree,
};
use crossterm::style::Color;
use once_cell::sync::Lazy;

pub const START: TokenType = TokenType::new("START");
pub const END: TokenType = TokenType::new("END");
pub const NUMBER: TokenType = TokenType::new("NUMBER");
pub const SYMBOL: TokenType = TokenType::new("SYMBOL");
pub const WS: TokenType = TokenType::new("WS");
pub const STRING: TokenType = TokenType::new("STRING");
pub const EOF: TokenType = TokenType::new("EOF");
pub const ERR: TokenType = TokenType::new("ERR");

pub const ROOT_NODE: NodeType = NodeType::new("ROOT");
pub const LIST_NODE: NodeType = NodeType::new("LIST");
pub const NUMBER_NODE: NodeType = NodeType::new("NUMBER");
pub const SYMBOL_NODE: NodeType = NodeType::new("SYMBOL");
pub const STRING_NODE: NodeType = NodeType::new("STRING");

const DIGITS: &str = "0123456789.";
const SYMBOL_RUNES: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-_$#%&";

static NUMBER_PATTERN: Lazy<FullMatch> =
    Lazy::new(|| FullMatch::new(r"0|0\.\d+|[1-9]\d*(\.\d+)?").unwrap());

pub fn consumers() -> Vec<Box<dyn Consumer>> {
    vec![
        SingleRune::new(START, ['(']).boxed(),
        SingleRune::new(END, [')']).boxed(),
        RegexValidated::new(FullMatch::clone(&NUMBER_PATTERN), RuneSet::new(NUMBER, DIGITS)).boxed(),
        RuneSet::new(SYMBOL, SYMBOL_RUNES).boxed(),
        CharacterClass::new(WS, char::is_whitespace).boxed(),
        DelimitedString::new(STRING).boxed(),
    ]
}

pub fn lexer() -> Lexer {
    Lexer::new(EOF, ERR, consumers())
}

pub fn parser() -> Parser {
    let mut parser = Parser::new(ROOT_NODE);
    parser
        .register(START, descend(|token: &Token| Node::from_token(Tagged::bare(LIST_NODE), token)))
        .register(END, ascend())
        .register(NUMBER, leaf(tagged(NUMBER_NODE)))
        .register(SYMBOL, leaf(tagged(SYMBOL_NODE)))
        .register(STRING, leaf(tagged(STRING_NODE)))
        .register(WS, Ignore)
        .register(EOF, Ignore);
    parser
}

/// Palette for the `color` token format.
pub fn color_printer() -> ColorPrinter {
    ColorPrinter::new()
        .define(START, Color::DarkYellow)
        .define(END, Color::DarkYellow)
        .define(NUMBER, Color::Cyan)
        .define(SYMBOL, Color::Green)
        .define(STRING, Color::Magenta)
        .define(ERR, Color::Red)
}

pub fn tokenize(source: &str) -> (Vec<Token>, LexStatus) {
    lexer().tokenize(source)
}

#[derive(Debug)]
pub struct SexpOutcome {
    pub tree: Tree,
    pub status: LexStatus,
    pub diagnostics: Vec<Diagnostic>,
    /// Lists still open when the input ended.
    pub unclosed: usize,
}

/// Lex `source` straight into the parser.
pub fn parse(source: &str) -> SexpOutcome {
    let mut parser = parser();
    let status = lexer().lex(&mut StringReader::new(source), &mut parser);
    let unclosed = parser.tree().depth(parser.current());
    let outcome = parser.finish();
    SexpOutcome {
        tree: outcome.tree,
        status,
        diagnostics: outcome.diagnostics,
        unclosed,
    }
}
