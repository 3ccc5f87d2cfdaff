//! Lex driver
//!
//! Turns a rune reader into a token stream using an ordered list of consumers.
//! Consumers are tried in priority order at each position and the first one
//! that succeeds wins; there is no longest-match arbitration between them.
//!
//! The stream always ends with exactly one terminal token: an EOF token when
//! the input was consumed completely, or an ERROR token at the first position
//! no consumer recognizes. Lexing does not resume after an ERROR token.

use super::consumers::Consumer;
use super::reader::{RuneReader, StringReader};
use super::token::{Token, TokenType};
use tracing::{debug, trace};

/// Diagnostic payload of the ERROR token.
pub const NO_VALID_TOKEN: &str = "No valid token found";

/// Receives every emitted token, in stream order.
pub trait TokenSink {
    fn visit(&mut self, token: Token);
}

impl<F> TokenSink for F
where
    F: FnMut(Token),
{
    fn visit(&mut self, token: Token) {
        self(token)
    }
}

impl TokenSink for Vec<Token> {
    fn visit(&mut self, token: Token) {
        self.push(token);
    }
}

/// How a lex session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexStatus {
    /// The whole input was tokenized and an EOF token was emitted.
    Complete,
    /// No consumer matched at `offset`; an ERROR token was emitted there.
    Failed { offset: usize },
}

impl LexStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, LexStatus::Complete)
    }
}

/// Scan `input` with one fixed set of consumers, feeding every token to `sink`.
///
/// A consumer reporting success without consuming anything is treated as a
/// failure, so the loop always makes progress.
pub fn lex_static<S>(
    input: &mut dyn RuneReader,
    sink: &mut S,
    eof_type: &TokenType,
    error_type: &TokenType,
    consumers: &[Box<dyn Consumer>],
) -> LexStatus
where
    S: TokenSink + ?Sized,
{
    'scan: loop {
        if input.eof() {
            let offset = input.offset();
            debug!(target: "parsekit::lexer", offset, "reached end of input");
            sink.visit(Token::new(eof_type.clone(), "").at(offset));
            return LexStatus::Complete;
        }

        for (index, consumer) in consumers.iter().enumerate() {
            let start = input.mark();
            match consumer.attempt(input) {
                Some(token) if input.offset() > start => {
                    input.commit();
                    let token = token.at(start);
                    trace!(
                        target: "parsekit::lexer",
                        consumer = index,
                        typ = %token.typ,
                        value = ?token.value,
                        offset = start,
                        "emitting token"
                    );
                    sink.visit(token);
                    continue 'scan;
                }
                Some(_) => {
                    trace!(target: "parsekit::lexer", consumer = index, offset = start, "consumer matched nothing");
                    input.rewind();
                }
                None => input.rewind(),
            }
        }

        let offset = input.offset();
        debug!(target: "parsekit::lexer", offset, "no consumer matched");
        sink.visit(Token::new(error_type.clone(), NO_VALID_TOKEN).at(offset));
        return LexStatus::Failed { offset };
    }
}

/// A consumer list together with the types of its terminal tokens.
pub struct Lexer {
    eof_type: TokenType,
    error_type: TokenType,
    consumers: Vec<Box<dyn Consumer>>,
}

impl Lexer {
    pub fn new(eof_type: TokenType, error_type: TokenType, consumers: Vec<Box<dyn Consumer>>) -> Self {
        Lexer {
            eof_type,
            error_type,
            consumers,
        }
    }

    pub fn eof_type(&self) -> &TokenType {
        &self.eof_type
    }

    pub fn error_type(&self) -> &TokenType {
        &self.error_type
    }

    pub fn lex<S>(&self, input: &mut dyn RuneReader, sink: &mut S) -> LexStatus
    where
        S: TokenSink + ?Sized,
    {
        lex_static(input, sink, &self.eof_type, &self.error_type, &self.consumers)
    }

    /// Tokenize a string into a vector, terminal token included.
    pub fn tokenize(&self, source: &str) -> (Vec<Token>, LexStatus) {
        let mut tokens = Vec::new();
        let status = self.lex(&mut StringReader::new(source), &mut tokens);
        (tokens, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::consumers::{CharacterClass, RuneSet, SingleRune};

    const START: TokenType = TokenType::new("START");
    const END: TokenType = TokenType::new("END");
    const WS: TokenType = TokenType::new("WS");
    const SYMBOL: TokenType = TokenType::new("SYMBOL");
    const EOF: TokenType = TokenType::new("EOF");
    const ERR: TokenType = TokenType::new("ERR");

    fn lexer() -> Lexer {
        Lexer::new(
            EOF,
            ERR,
            vec![
                SingleRune::new(START, ['(']).boxed(),
                SingleRune::new(END, [')']).boxed(),
                RuneSet::new(SYMBOL, "abcdefghijklmnopqrstuvwxyz").boxed(),
                CharacterClass::new(WS, char::is_whitespace).boxed(),
            ],
        )
    }

    #[test]
    fn test_empty_input_yields_only_eof() {
        let (tokens, status) = lexer().tokenize("");
        assert_eq!(tokens, vec![Token::new(EOF, "")]);
        assert_eq!(status, LexStatus::Complete);
    }

    #[test]
    fn test_offsets_are_stamped_from_marks() {
        let (tokens, _) = lexer().tokenize("(ab c)");
        let offsets: Vec<_> = tokens.iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![0, 1, 3, 4, 5, 6]);
    }

    #[test]
    fn test_unrecognized_rune_halts_with_error() {
        let (tokens, status) = lexer().tokenize("(a#b)");
        assert_eq!(status, LexStatus::Failed { offset: 2 });
        let last = tokens.last().unwrap();
        assert_eq!(last.typ, ERR);
        assert_eq!(last.value, NO_VALID_TOKEN);
        assert_eq!(last.offset, 2);
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_marks_are_released_after_lexing() {
        let mut reader = StringReader::new("(ab)");
        let mut tokens = Vec::new();
        lexer().lex(&mut reader, &mut tokens);
        assert_eq!(reader.marks(), 0);
    }

    #[test]
    fn test_empty_success_is_not_progress() {
        let consumers: Vec<Box<dyn Consumer>> = vec![
            (|_: &mut dyn RuneReader| Some(Token::new(WS, ""))).boxed(),
            RuneSet::new(SYMBOL, "ab").boxed(),
        ];
        let mut tokens = Vec::new();
        let status = lex_static(&mut StringReader::new("ab"), &mut tokens, &EOF, &ERR, &consumers);
        assert!(status.is_complete());
        assert_eq!(tokens, vec![Token::new(SYMBOL, "ab"), Token::new(EOF, "").at(2)]);
    }

    #[test]
    fn test_closure_sink_sees_every_token() {
        let mut count = 0;
        let mut sink = |_: Token| count += 1;
        lexer().lex(&mut StringReader::new("(a)"), &mut sink);
        assert_eq!(count, 4);
    }
}
