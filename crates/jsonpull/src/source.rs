//! The code-point source boundary.
//!
//! "JSON text is a sequence of Unicode code points", so the tokenizer pulls
//! decoded code points one at a time rather than raw bytes. The boundary is
//! the [`CodePointSource`] trait; [`ReadCodePoints`] is the production
//! implementation over any [`std::io::Read`], decoding UTF-8 strictly and
//! incrementally (a scalar may span two underlying reads).

use std::io::{ErrorKind, Read};

use crate::error::SourceError;

/// Supplies one Unicode code point at a time from an underlying stream.
///
/// `Ok(None)` reports clean end of input. A call may block on I/O inside the
/// source; cancellation is the caller's concern (closing the stream surfaces
/// as an error on the next read). The tokenizer stops polling the source
/// permanently after the first error.
pub trait CodePointSource {
    /// Decodes and consumes the next code point.
    ///
    /// # Errors
    ///
    /// I/O failures and invalid encoding are reported as [`SourceError`];
    /// both are terminal for the owning tokenizer.
    fn next_code_point(&mut self) -> Result<Option<char>, SourceError>;
}

const READ_BUF_SIZE: usize = 8 * 1024;

/// A [`CodePointSource`] decoding strict UTF-8 from a byte stream.
///
/// Rejects invalid sequences (overlong forms, bare continuation bytes,
/// surrogate encodings, sequences truncated by end of input) with
/// [`SourceError::InvalidUtf8`]. A well-formed U+FFFD in the input is passed
/// through like any other scalar.
pub struct ReadCodePoints<R> {
    inner: R,
    buf: Vec<u8>,
    start: usize,
    end: usize,
    eof: bool,
}

impl<R: Read> ReadCodePoints<R> {
    /// Wraps a byte stream with an internal 8 KiB read buffer.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: vec![0; READ_BUF_SIZE],
            start: 0,
            end: 0,
            eof: false,
        }
    }

    fn available(&self) -> usize {
        self.end - self.start
    }

    /// Reads until at least `need` bytes are buffered or the stream ends.
    /// `need` is at most 4, so one compaction always makes room.
    fn fill(&mut self, need: usize) -> Result<(), SourceError> {
        while self.available() < need && !self.eof {
            if self.start > 0 {
                self.buf.copy_within(self.start..self.end, 0);
                self.end -= self.start;
                self.start = 0;
            }
            match self.inner.read(&mut self.buf[self.end..]) {
                Ok(0) => self.eof = true,
                Ok(n) => self.end += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => return Err(SourceError::Io(err)),
            }
        }
        Ok(())
    }
}

/// Expected sequence length from a UTF-8 leading byte. `None` for bytes that
/// cannot begin a sequence (continuation bytes, overlong prefixes 0xC0/0xC1,
/// and anything above 0xF4).
fn sequence_len(b0: u8) -> Option<usize> {
    match b0 {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

impl<R: Read> CodePointSource for ReadCodePoints<R> {
    fn next_code_point(&mut self) -> Result<Option<char>, SourceError> {
        self.fill(1)?;
        if self.available() == 0 {
            return Ok(None);
        }
        let len = sequence_len(self.buf[self.start]).ok_or(SourceError::InvalidUtf8)?;
        self.fill(len)?;
        if self.available() < len {
            // The stream ended in the middle of a multi-byte sequence.
            return Err(SourceError::InvalidUtf8);
        }
        let bytes = &self.buf[self.start..self.start + len];
        let text = core::str::from_utf8(bytes).map_err(|_| SourceError::InvalidUtf8)?;
        let Some(ch) = text.chars().next() else {
            return Err(SourceError::InvalidUtf8);
        };
        self.start += len;
        Ok(Some(ch))
    }
}
