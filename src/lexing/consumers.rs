//! Token consumers
//!
//! A consumer is one strategy for recognizing a lexeme at the reader's current
//! position. It either advances the reader and returns a token draft, or
//! returns `None`. A failing consumer may leave the reader anywhere: the
//! driver rewinds to its own mark before trying the next consumer.
//!
//! Grammars are plain ordered lists of consumers:
//!
//! ```ignore
//! let grammar: Vec<Box<dyn Consumer>> = vec![
//!     SingleRune::new(START, ['(']).boxed(),
//!     SingleRune::new(END, [')']).boxed(),
//!     CharacterClass::new(WS, char::is_whitespace).boxed(),
//!     DelimitedString::new(STRING).boxed(),
//! ];
//! ```

use super::reader::RuneReader;
use super::token::{Token, TokenType};
use regex::Regex;

/// Strategy recognizing a single kind of lexeme.
pub trait Consumer {
    /// Try to recognize a lexeme at the reader's current offset.
    fn attempt(&self, input: &mut dyn RuneReader) -> Option<Token>;

    fn boxed(self) -> Box<dyn Consumer>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

impl<F> Consumer for F
where
    F: Fn(&mut dyn RuneReader) -> Option<Token>,
{
    fn attempt(&self, input: &mut dyn RuneReader) -> Option<Token> {
        self(input)
    }
}

/// Regular expression that only accepts matches spanning the whole haystack.
#[derive(Debug, Clone)]
pub struct FullMatch {
    regex: Regex,
}

impl FullMatch {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{pattern})$"))?;
        Ok(FullMatch { regex })
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Reads exactly one rune and accepts it if it is in the allow-set.
///
/// The read is unconditional: on failure the reader has still advanced.
pub struct SingleRune {
    typ: TokenType,
    expected: Vec<char>,
}

impl SingleRune {
    pub fn new(typ: TokenType, expected: impl IntoIterator<Item = char>) -> Self {
        SingleRune {
            typ,
            expected: expected.into_iter().collect(),
        }
    }
}

impl Consumer for SingleRune {
    fn attempt(&self, input: &mut dyn RuneReader) -> Option<Token> {
        let rune = input.read();
        if self.expected.contains(&rune) {
            Some(Token::new(self.typ.clone(), rune.to_string()))
        } else {
            None
        }
    }
}

/// Greedily consumes runes while `accepts` holds, never reading past the first rejected rune.
fn consume_while(
    input: &mut dyn RuneReader,
    typ: &TokenType,
    accepts: impl Fn(char) -> bool,
) -> Option<Token> {
    let mut value = String::new();
    while !input.eof() && accepts(input.peek()) {
        value.push(input.read());
    }
    if value.is_empty() {
        None
    } else {
        Some(Token::new(typ.clone(), value))
    }
}

/// Greedy run of runes belonging to at least one character class.
pub struct CharacterClass {
    typ: TokenType,
    classes: Vec<Box<dyn Fn(char) -> bool>>,
}

impl CharacterClass {
    pub fn new(typ: TokenType, class: impl Fn(char) -> bool + 'static) -> Self {
        CharacterClass {
            typ,
            classes: vec![Box::new(class)],
        }
    }

    /// Also accept runes of another class.
    pub fn or(mut self, class: impl Fn(char) -> bool + 'static) -> Self {
        self.classes.push(Box::new(class));
        self
    }
}

impl Consumer for CharacterClass {
    fn attempt(&self, input: &mut dyn RuneReader) -> Option<Token> {
        consume_while(input, &self.typ, |rune| {
            self.classes.iter().any(|class| class(rune))
        })
    }
}

/// Greedy run of runes taken from an explicit set.
pub struct RuneSet {
    typ: TokenType,
    runes: Vec<char>,
}

impl RuneSet {
    pub fn new(typ: TokenType, runes: &str) -> Self {
        RuneSet {
            typ,
            runes: runes.chars().collect(),
        }
    }
}

impl Consumer for RuneSet {
    fn attempt(&self, input: &mut dyn RuneReader) -> Option<Token> {
        consume_while(input, &self.typ, |rune| self.runes.contains(&rune))
    }
}

/// Matches a literal string rune by rune.
///
/// Stops at the first mismatch, leaving the matched prefix consumed.
pub struct Text {
    typ: TokenType,
    text: Vec<char>,
}

impl Text {
    pub fn new(typ: TokenType, text: &str) -> Self {
        Text {
            typ,
            text: text.chars().collect(),
        }
    }
}

impl Consumer for Text {
    fn attempt(&self, input: &mut dyn RuneReader) -> Option<Token> {
        let mut value = String::with_capacity(self.text.len());
        for &expected in &self.text {
            if input.eof() || input.peek() != expected {
                return None;
            }
            value.push(input.read());
        }
        Some(Token::new(self.typ.clone(), value))
    }
}

/// Re-validates the lexeme of an inner consumer against a full-match regex.
///
/// Useful for lexemes with the right shape but invalid content, e.g. numbers
/// with leading zeros.
pub struct RegexValidated<C> {
    pattern: FullMatch,
    inner: C,
}

impl<C: Consumer> RegexValidated<C> {
    pub fn new(pattern: FullMatch, inner: C) -> Self {
        RegexValidated { pattern, inner }
    }
}

impl<C: Consumer> Consumer for RegexValidated<C> {
    fn attempt(&self, input: &mut dyn RuneReader) -> Option<Token> {
        let token = self.inner.attempt(input)?;
        if self.pattern.is_match(&token.value) {
            Some(token)
        } else {
            None
        }
    }
}

/// Reads one rune at a time until the accumulated value fully matches.
///
/// This finds the shortest matching prefix, not the longest: `a+` against
/// `aaa` yields `a`.
pub struct IncrementalRegex {
    typ: TokenType,
    pattern: FullMatch,
}

impl IncrementalRegex {
    pub fn new(typ: TokenType, pattern: FullMatch) -> Self {
        IncrementalRegex { typ, pattern }
    }
}

impl Consumer for IncrementalRegex {
    fn attempt(&self, input: &mut dyn RuneReader) -> Option<Token> {
        let mut value = String::new();
        while !input.eof() {
            value.push(input.read());
            if self.pattern.is_match(&value) {
                return Some(Token::new(self.typ.clone(), value));
            }
        }
        None
    }
}

/// Single- or double-quoted string literal with backslash escapes.
///
/// The backslash is always dropped. An escaped delimiter lands in the value as
/// a literal delimiter, any other escaped rune is kept verbatim. Both
/// delimiters are part of the value. Hitting the end of input before the
/// closing delimiter fails the whole literal.
pub struct DelimitedString {
    typ: TokenType,
}

impl DelimitedString {
    pub fn new(typ: TokenType) -> Self {
        DelimitedString { typ }
    }
}

impl Consumer for DelimitedString {
    fn attempt(&self, input: &mut dyn RuneReader) -> Option<Token> {
        let delimiter = input.read();
        if delimiter != '"' && delimiter != '\'' {
            return None;
        }
        let mut value = String::from(delimiter);
        let mut escaped = false;
        loop {
            if input.eof() {
                return None;
            }
            let rune = input.read();
            if rune == '\\' {
                escaped = true;
                continue;
            }
            if escaped {
                escaped = false;
            } else if rune == delimiter {
                value.push(delimiter);
                return Some(Token::new(self.typ.clone(), value));
            }
            value.push(rune);
        }
    }
}
