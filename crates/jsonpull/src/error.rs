//! Typed diagnostics for the first-error latch.
//!
//! Two grammar-level kinds exist: [`SyntaxError`] for grammar-position
//! errors (an offending code point plus a fixed situational tag) and
//! [`LiteralError`] for a mismatch while matching `null`, `true` or `false`.
//! Failures of the underlying code-point source surface as [`SourceError`].
//! All three render through the [`Error`] wrapper returned by
//! [`Tokenizer::err`](crate::Tokenizer::err).

use core::fmt;

use thiserror::Error;

use crate::token::Token;

/// The grammar situation in which an unexpected code point was seen.
///
/// The rendered message is a pure function of the tag and the offending code
/// point; no other state is captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SyntaxErrorKind {
    /// A value was expected and the code point cannot start one.
    BeginningOfValue,
    /// Inside a string literal: an unescaped control character or a stray
    /// quote/backslash.
    StringLiteral,
    /// A non-hexadecimal digit inside a `\u` escape.
    HexEscape,
    /// An unknown character after a reverse solidus.
    EscapeCode,
    /// Trailing garbage after a complete value where a separator was due.
    AfterTopLevelValue,
    /// A digit following a leading `0` (or `-0`) in the integer part.
    AfterLeadingZero,
    /// A value where a comma was due inside an open container.
    ExpectingComma,
}

impl SyntaxErrorKind {
    fn suffix(self) -> &'static str {
        match self {
            SyntaxErrorKind::BeginningOfValue => "looking for beginning of value",
            SyntaxErrorKind::StringLiteral => "in string literal",
            SyntaxErrorKind::HexEscape => "in \\u hexadecimal character escape",
            SyntaxErrorKind::EscapeCode => "in string escape code",
            SyntaxErrorKind::AfterTopLevelValue => "after top-level value",
            SyntaxErrorKind::AfterLeadingZero => "after top-level value 0",
            SyntaxErrorKind::ExpectingComma => "looking for a comma",
        }
    }
}

/// A grammar-position error: one invalid code point, precisely situated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyntaxError {
    /// The offending code point; `None` is the end-of-input sentinel.
    pub found: Option<char>,
    /// Where in the grammar the code point was rejected.
    pub kind: SyntaxErrorKind,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.found {
            Some(ch) => write!(f, "invalid character {ch:?} {}", self.kind.suffix()),
            None => write!(f, "unexpected end of input {}", self.kind.suffix()),
        }
    }
}

impl core::error::Error for SyntaxError {}

/// A mismatch while matching the tail of `null`, `true` or `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LiteralError {
    /// The code point the literal required at this position.
    pub want: char,
    /// The code point actually seen; `None` is the end-of-input sentinel.
    pub got: Option<char>,
    /// The literal being matched: `Null`, `True` or `False`.
    pub token: Token,
}

impl fmt::Display for LiteralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.got {
            Some(ch) => write!(
                f,
                "invalid character {ch:?} in literal {} (expecting {:?})",
                self.token, self.want
            ),
            None => write!(
                f,
                "unexpected end of input in literal {} (expecting {:?})",
                self.token, self.want
            ),
        }
    }
}

impl core::error::Error for LiteralError {}

/// A failure of the underlying code-point source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The byte stream failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The byte stream is not valid UTF-8.
    #[error("invalid UTF-8 sequence in input")]
    InvalidUtf8,
}

/// Any error the tokenizer can latch.
///
/// Clean end-of-input is not an error and is never wrapped here; see
/// [`Tokenizer::err`](crate::Tokenizer::err).
#[derive(Debug, Error)]
pub enum Error {
    /// The code-point source failed (I/O or UTF-8 decoding).
    #[error(transparent)]
    Source(#[from] SourceError),
    /// A grammar-position error.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// A literal-mismatch error.
    #[error(transparent)]
    Literal(#[from] LiteralError),
}

impl Error {
    /// The grammar-position error, if that is what latched.
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            Error::Syntax(err) => Some(err),
            _ => None,
        }
    }

    /// The literal-mismatch error, if that is what latched.
    pub fn as_literal(&self) -> Option<&LiteralError> {
        match self {
            Error::Literal(err) => Some(err),
            _ => None,
        }
    }
}
