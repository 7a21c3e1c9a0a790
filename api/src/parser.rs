//! Interfaces for RDF parsers.

use crate::sink::TripleSink;
use std::error::Error;
use std::fmt;

/// A position in a text document: 1-based line number and 1-based column (counted in bytes).
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
pub struct TextPosition {
    line: u64,
    column: u64,
}

impl TextPosition {
    pub fn new(line: u64, column: u64) -> Self {
        Self { line, column }
    }

    /// The line number, starting at 1.
    #[inline]
    pub fn line_number(&self) -> u64 {
        self.line
    }

    /// The column inside of the line, starting at 1.
    #[inline]
    pub fn column_number(&self) -> u64 {
        self.column
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} at column {}", self.line, self.column)
    }
}

/// An error raised while parsing that might carry the position of the faulty input.
pub trait ParseError: Error {
    /// The position of the error in the input, if known.
    fn textual_position(&self) -> Option<TextPosition>;
}

/// A parser producing [`Triple`](../model/struct.Triple.html)s.
///
/// The whole document is consumed by a single call to `parse_all`. Triples already handed to the
/// sink are not retracted when a later error stops the parsing.
pub trait TriplesParser {
    type Error: ParseError;

    /// Parses the complete document and calls the sink for each triple read.
    ///
    /// Once the document has been consumed (or parsing failed), later calls do nothing.
    fn parse_all<S: TripleSink>(&mut self, sink: &mut S) -> Result<(), Self::Error>;

    /// Returns `true` if the complete document has been consumed by the parser.
    fn is_end(&self) -> bool;
}
