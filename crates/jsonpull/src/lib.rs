//! A streaming, pull-based JSON tokenizer for the ECMA-404 grammar.
//!
//! [`Tokenizer`] reads code points from a [`CodePointSource`] (typically a
//! [`std::io::Read`] via [`ReadCodePoints`]) and recognizes one token per
//! call to [`Tokenizer::advance`]: structural characters, literals, strings
//! and numbers, each with its exact raw input bytes attached. It keeps a
//! single code point of lookahead and no more than one token's text in
//! memory; strings and numbers larger than a configurable chunk size are
//! delivered as a sequence of fragments.
//!
//! The first error encountered latches: [`Tokenizer::advance`] returns
//! `false` from then on and [`Tokenizer::err`] reports the same error
//! forever. Clean end of input also stops the token stream, but leaves
//! [`Tokenizer::err`] empty.
//!
//! ```
//! use jsonpull::{Token, Tokenizer};
//!
//! let mut scanner = Tokenizer::from_reader(&br#"{"id": 7, "tags": ["a"]}"#[..]);
//! while scanner.advance() {
//!     println!("{:>8} {:?}", scanner.token().to_string(), scanner.bytes());
//! }
//! assert!(scanner.err().is_none());
//! ```
//!
//! Input is required to be valid UTF-8; [`ReadCodePoints`] rejects malformed
//! sequences with [`SourceError::InvalidUtf8`]. U+FEFF is not whitespace and
//! a leading byte-order mark is a syntax error, as ECMA-404 requires.

mod buffer;
mod error;
mod grammar;
mod literal;
mod source;
mod stack;
mod token;
mod tokenizer;

pub use error::{Error, LiteralError, SourceError, SyntaxError, SyntaxErrorKind};
pub use source::{CodePointSource, ReadCodePoints};
pub use token::Token;
pub use tokenizer::{DEFAULT_CHUNK_SIZE, MIN_CHUNK_SIZE, Tokenizer};

#[cfg(test)]
mod tests;
