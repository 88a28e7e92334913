/*!
Error types surfaced at the edges of the crate.

Errors come in two independent flavors:

- [`ParseError`]: the tokenizer rejected a byte buffer as invalid JSON, or accepted
  JSON of the wrong root shape. These are always the caller's fault and always
  recoverable: nothing has been allocated into a document yet.
- [`DocumentError`]: a request against an already-parsed document failed, such as
  reading an array index out of range or writing through the wrong container kind.

A third kind of failure, a broken index invariant, is deliberately *not* a variant of
either enum: it can only follow a library bug, never user input, so it panics via
`internal_error!` (see `macros.rs`) instead of being returned.
*/

use std::fmt;

use thiserror::Error;

/// Where in the tokenizer's structural state machine a `missingToken`/`unexpectedToken`
/// error was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    ExpectedObjectKey,
    ExpectedObjectClose,
    ExpectedValue,
    ExpectedColon,
    ExpectedComma,
    ExpectedArrayClose,
    ExpectedTopLevelObject,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Reason::ExpectedObjectKey => "expected an object key",
            Reason::ExpectedObjectClose => "expected '}'",
            Reason::ExpectedValue => "expected a value",
            Reason::ExpectedColon => "expected ':'",
            Reason::ExpectedComma => "expected ','",
            Reason::ExpectedArrayClose => "expected ']'",
            Reason::ExpectedTopLevelObject => "expected the document root to be an object",
        };

        f.write_str(s)
    }
}

/// The kind of syntax error the tokenizer ran into, independent of where it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A value was required after `{`/`,` but the container was closed instead.
    EndOfObject,
    /// The object-constructing API was used on a buffer whose root isn't an object.
    InvalidTopLevelObject,
    /// End-of-input was reached before a required byte.
    MissingData,
    /// A `true`/`false`/`null` literal didn't match exactly.
    InvalidLiteral,
    /// A required token was missing at the current position.
    MissingToken(Reason),
    /// A token was present but wasn't the one expected at the current position.
    UnexpectedToken(Reason),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::EndOfObject => f.write_str("a value was required but the container closed"),
            ErrorKind::InvalidTopLevelObject => f.write_str("the document root is not an object"),
            ErrorKind::MissingData => f.write_str("unexpected end of input"),
            ErrorKind::InvalidLiteral => f.write_str("invalid literal"),
            ErrorKind::MissingToken(reason) => write!(f, "missing token: {}", reason),
            ErrorKind::UnexpectedToken(reason) => write!(f, "unexpected token: {}", reason),
        }
    }
}

/// A one-based line and column position within a parsed byte buffer.
///
/// LF (`\n`) increments the line and resets the column; every other consumed byte
/// advances the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A syntax error raised while tokenizing a byte buffer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("parse error at {position}: {kind}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub position: Position,
    /// The byte that triggered the error, when one could be identified (absent for
    /// `missingData`, which fires past the end of the buffer).
    pub offending_byte: Option<u8>,
}

/// An error raised against an already-parsed document.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DocumentError {
    /// The root-level constructor expected an object but the parsed value was an array.
    #[error("expected the document to be an object")]
    ExpectedObject,
    /// The root-level constructor expected an array but the parsed value was an object.
    #[error("expected the document to be an array")]
    ExpectedArray,
    /// An array read or indexed write targeted an index beyond the array's bounds.
    #[error("index {index} is out of range for an array of length {length}")]
    IndexOutOfRange { index: usize, length: usize },
    /// A number decoded (on read) or serialized (on write) to a non-finite `f64`.
    ///
    /// Not part of the tokenizer's syntax-error taxonomy: the JSON grammar for e.g.
    /// `1e400` is perfectly valid, it's the IEEE 754 decode that overflows.
    #[error("number is not finite")]
    NonFiniteNumber,
    /// A byte buffer failed to parse into a document.
    #[error(transparent)]
    Parse(#[from] ParseError),
}
