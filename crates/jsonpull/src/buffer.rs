//! Raw-text accumulator for the token currently being recognized.

use core::fmt;

use bstr::{BStr, ByteSlice};

/// An append-only, resettable byte buffer holding the exact raw input text of
/// the current token, structural characters included.
///
/// The contents are exposed read-only between tokens and are overwritten on
/// the next call to [`advance`](crate::Tokenizer::advance).
pub(crate) struct TokenBuf {
    bytes: Vec<u8>,
}

impl TokenBuf {
    pub(crate) fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Appends the UTF-8 encoding of one accepted code point.
    pub(crate) fn push(&mut self, ch: char) {
        let mut utf8 = [0u8; 4];
        self.bytes.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
    }

    /// Discards the contents, keeping the allocation for the next token.
    pub(crate) fn reset(&mut self) {
        self.bytes.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }

    pub(crate) fn as_bstr(&self) -> &BStr {
        self.bytes.as_bstr()
    }
}

impl fmt::Debug for TokenBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_bstr(), f)
    }
}
