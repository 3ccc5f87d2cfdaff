//! Buffered rune reader with speculative mark/rewind
//!
//! Consumers never look at the raw input directly. They go through a
//! [`RuneReader`], which hands out one `char` at a time and lets the driver
//! record positions it may later have to return to.
//!
//! Marks form a stack rather than a single saved position, so a consumer that
//! wraps another consumer can roll back its own attempt without disturbing a
//! mark the driver placed further out.

use std::io::{self, Read};

/// Rune returned by [`RuneReader::peek`] and [`RuneReader::read`] once the input is exhausted.
pub const REPLACEMENT: char = '\u{FFFD}';

/// Read interface shared by the lex driver and every consumer.
pub trait RuneReader {
    /// Push the current offset onto the mark stack and return it.
    fn mark(&mut self) -> usize;

    /// Current absolute offset, counted in runes.
    fn offset(&self) -> usize;

    /// Return the rune at the current offset and advance by one.
    ///
    /// At end of input this returns [`REPLACEMENT`] and does not advance.
    fn read(&mut self) -> char;

    /// Return the rune at the current offset without advancing.
    fn peek(&self) -> char;

    /// Pop the most recent mark and reset the offset to it.
    ///
    /// Rewinding with an empty mark stack is a no-op.
    fn rewind(&mut self);

    /// Pop the most recent mark, keeping the current offset.
    ///
    /// Committing with an empty mark stack is a no-op.
    fn commit(&mut self);

    /// True once the offset has reached the end of the input.
    fn eof(&self) -> bool;
}

/// [`RuneReader`] over an in-memory string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringReader {
    input: Vec<char>,
    offset: usize,
    marks: Vec<usize>,
}

impl StringReader {
    pub fn new(input: &str) -> Self {
        StringReader {
            input: input.chars().collect(),
            offset: 0,
            marks: Vec::new(),
        }
    }

    /// Buffer an entire `Read` source.
    ///
    /// Fails with [`io::ErrorKind::InvalidData`] if the source is not valid UTF-8.
    pub fn from_reader<R: Read>(mut source: R) -> io::Result<Self> {
        let mut text = String::new();
        source.read_to_string(&mut text)?;
        Ok(Self::new(&text))
    }

    /// Number of marks currently on the stack.
    pub fn marks(&self) -> usize {
        self.marks.len()
    }

    /// Total number of runes in the buffer.
    pub fn len(&self) -> usize {
        self.input.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }
}

impl From<&str> for StringReader {
    fn from(input: &str) -> Self {
        StringReader::new(input)
    }
}

impl RuneReader for StringReader {
    fn mark(&mut self) -> usize {
        self.marks.push(self.offset);
        self.offset
    }

    fn offset(&self) -> usize {
        self.offset
    }

    fn read(&mut self) -> char {
        match self.input.get(self.offset) {
            Some(&rune) => {
                self.offset += 1;
                rune
            }
            None => REPLACEMENT,
        }
    }

    fn peek(&self) -> char {
        self.input.get(self.offset).copied().unwrap_or(REPLACEMENT)
    }

    fn rewind(&mut self) {
        if let Some(mark) = self.marks.pop() {
            self.offset = mark;
        }
    }

    fn commit(&mut self) {
        self.marks.pop();
    }

    fn eof(&self) -> bool {
        self.offset >= self.input.len()
    }
}
