//! Token printers and the printing visitor
//!
//! A printer turns a token into text; the [`PrintingVisitor`] is a token sink
//! that writes whatever a printer produces. Printers returning an empty
//! string suppress the token.

use crate::lexing::{Token, TokenSink, TokenType};
use crossterm::style::{style, Color, Stylize};
use std::collections::HashMap;
use std::io::{self, Write};

pub trait TokenPrinter {
    fn render(&self, token: &Token) -> String;
}

impl<F> TokenPrinter for F
where
    F: Fn(&Token) -> String,
{
    fn render(&self, token: &Token) -> String {
        self(token)
    }
}

/// One line per token: `TYPE: '"value"'  [offset:end]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugPrinter;

impl TokenPrinter for DebugPrinter {
    fn render(&self, token: &Token) -> String {
        format!(
            "{}: '{:?}'  [{}:{}]\n",
            token.typ,
            token.value,
            token.offset,
            token.end()
        )
    }
}

/// Reprints token values, colored by token type.
///
/// Types without a color are printed as is, so printing every token of a
/// complete stream reproduces the source.
#[derive(Debug, Clone, Default)]
pub struct ColorPrinter {
    colors: HashMap<TokenType, Color>,
}

impl ColorPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(mut self, typ: TokenType, color: Color) -> Self {
        self.colors.insert(typ, color);
        self
    }
}

impl TokenPrinter for ColorPrinter {
    fn render(&self, token: &Token) -> String {
        match self.colors.get(&token.typ) {
            Some(&color) => style(&token.value).with(color).to_string(),
            None => token.value.clone(),
        }
    }
}

/// Token sink writing rendered tokens to `out`.
///
/// Sinks cannot fail, so the first write error is kept and every later token
/// is dropped. [`PrintingVisitor::finish`] reports it.
pub struct PrintingVisitor<W, P> {
    out: W,
    printer: P,
    error: Option<io::Error>,
}

impl<W: Write> PrintingVisitor<W, DebugPrinter> {
    pub fn debug(out: W) -> Self {
        PrintingVisitor::new(out, DebugPrinter)
    }
}

impl<W: Write, P: TokenPrinter> PrintingVisitor<W, P> {
    pub fn new(out: W, printer: P) -> Self {
        PrintingVisitor {
            out,
            printer,
            error: None,
        }
    }

    /// Flush the writer and hand it back, or the first error met.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write, P: TokenPrinter> TokenSink for PrintingVisitor<W, P> {
    fn visit(&mut self, token: Token) {
        if self.error.is_some() {
            return;
        }
        let rendered = self.printer.render(&token);
        if rendered.is_empty() {
            return;
        }
        if let Err(err) = self.out.write_all(rendered.as_bytes()) {
            self.error = Some(err);
        }
    }
}
