//! The pull-based tokenizer: dispatcher, recognizers and first-error latch.
//!
//! One call to [`Tokenizer::advance`] recognizes one token (or one fragment
//! of an oversized string/number). The dispatcher branches on the current
//! code point, the top of the nesting stack and the previous token kind, with
//! a single code point of lookahead and no backtracking. Comma expectation is
//! checked before value expectation at every branch: a stray value where a
//! comma was due is the more informative error.
//!
//! All scan state lives in the `Tokenizer` value itself; independent
//! instances over independent sources never interact.

use core::fmt;
use std::io::Read;

use bstr::BStr;

use crate::buffer::TokenBuf;
use crate::error::{Error, LiteralError, SyntaxError, SyntaxErrorKind};
use crate::grammar;
use crate::literal::{LiteralMatcher, Step};
use crate::source::{CodePointSource, ReadCodePoints};
use crate::stack::{Context, ContextStack};
use crate::token::Token;

/// Default fragment size for oversized string/number values: 32 KiB.
pub const DEFAULT_CHUNK_SIZE: usize = 32 << 10;

/// Smallest accepted fragment size. Five bytes, so that `false` (the longest
/// literal) is always recognized without splitting.
pub const MIN_CHUNK_SIZE: usize = 5;

/// The first-error latch.
///
/// End-of-input is a soft placeholder: if a structural or literal check fails
/// in the same step that input ran out, the concrete error replaces it. A
/// hard error is never replaced.
#[derive(Debug)]
enum Latch {
    EndOfInput,
    Hard(Error),
}

/// Mid-value state carried between `advance` calls when a string or number
/// is being delivered in fragments.
#[derive(Debug)]
enum Pending {
    StringBody,
    Number(NumberLex),
    Exponent(ExponentLex),
}

#[derive(Debug, Clone, Copy)]
struct NumberLex {
    /// At least one integer digit has been consumed.
    int_started: bool,
    /// The integer part so far is exactly `0` or `-0`; another integer digit
    /// is the after-leading-zero error.
    leading_zero: bool,
    in_frac: bool,
    last_is_digit: bool,
}

#[derive(Debug, Clone, Copy)]
struct ExponentLex {
    /// A sign or digit has been consumed; a sign is only legal first.
    started: bool,
    last_is_digit: bool,
}

/// A streaming, pull-based JSON tokenizer.
///
/// Bound to a [`CodePointSource`]; call [`advance`](Self::advance) in a loop
/// and read the current token off [`token`](Self::token) and
/// [`bytes`](Self::bytes) between calls. Not safe for concurrent use; use
/// independent tokenizers over independent sources instead.
///
/// ```
/// use jsonpull::{Token, Tokenizer};
///
/// let mut scanner = Tokenizer::from_reader(&b"[true, 1, \"a\"]"[..]);
/// let mut kinds = Vec::new();
/// while scanner.advance() {
///     kinds.push(scanner.token());
/// }
/// assert!(scanner.err().is_none());
/// assert_eq!(
///     kinds,
///     [
///         Token::ArrayStart,
///         Token::True,
///         Token::Number,
///         Token::String,
///         Token::ArrayEnd,
///     ],
/// );
/// ```
pub struct Tokenizer<S> {
    source: S,

    /// Values whose raw text reaches this many bytes are delivered in
    /// multiple fragments of at most this size (plus at most one unsplit
    /// escape sequence).
    size: usize,

    /// Current code point under examination; `None` is the end/absent
    /// sentinel.
    ch: Option<char>,
    latch: Option<Latch>,
    buf: TokenBuf,
    tok: Token,

    /// Recognizer state to resume when the current value continues past the
    /// fragment boundary.
    pending: Option<Pending>,
    /// Whether the current token is a non-terminal fragment.
    continued: bool,
    /// A key has completed and its colon has not been consumed yet.
    want_colon: bool,
    stack: ContextStack,
}

impl<S: CodePointSource> Tokenizer<S> {
    /// Creates a tokenizer bound to `source` with the default chunk size.
    pub fn new(source: S) -> Self {
        Self::with_chunk_size(source, DEFAULT_CHUNK_SIZE)
    }

    /// Creates a tokenizer bound to `source`. `size` is clamped to
    /// [`MIN_CHUNK_SIZE`].
    pub fn with_chunk_size(source: S, size: usize) -> Self {
        Self {
            source,
            size: size.max(MIN_CHUNK_SIZE),
            ch: None,
            latch: None,
            buf: TokenBuf::new(),
            tok: Token::Invalid,
            pending: None,
            continued: false,
            want_colon: false,
            stack: ContextStack::new(),
        }
    }

    /// Resets all internal state and binds to a new source.
    ///
    /// The chunk-size configuration is kept. Re-scanning the same input after
    /// a rebind yields an identical token/byte/error sequence.
    pub fn rebind(&mut self, source: S) {
        self.source = source;
        self.ch = None;
        self.latch = None;
        self.buf.reset();
        self.tok = Token::Invalid;
        self.pending = None;
        self.continued = false;
        self.want_colon = false;
        self.stack.clear();
    }

    /// Advances to the next token.
    ///
    /// Returns `true` when a token (or fragment of an oversized value) was
    /// recognized and is readable via [`token`](Self::token) /
    /// [`bytes`](Self::bytes). Returns `false` when input is exhausted
    /// cleanly or an error has latched; the two are distinguished by
    /// [`err`](Self::err).
    pub fn advance(&mut self) -> bool {
        if matches!(self.latch, Some(Latch::Hard(_))) {
            return false;
        }
        if self.latch.is_none() && self.ch.is_none() {
            // Initial call: position on the first non-whitespace code point.
            self.next(true);
        }
        if let Some(pending) = self.pending.take() {
            self.buf.reset();
            self.continued = false;
            let ok = match pending {
                Pending::StringBody => self.scan_string_body(),
                Pending::Number(st) => self.scan_number_body(st),
                Pending::Exponent(st) => self.scan_exponent_body(st),
            };
            return self.finish_scalar(ok);
        }
        self.parse_value()
    }

    /// The kind of the current token. [`Token::Invalid`] before the first
    /// successful advance and after an error latches.
    pub fn token(&self) -> Token {
        self.tok
    }

    /// The exact raw input text of the current token, structural characters
    /// included (quotes for strings, the bracket for `ArrayStart`).
    ///
    /// Valid only until the next call to [`advance`](Self::advance); copy the
    /// bytes out to retain them. After an error, holds the consumed prefix of
    /// the failing token.
    pub fn bytes(&self) -> &BStr {
        self.buf.as_bstr()
    }

    /// The latched error, or `None` if no error has occurred (including
    /// clean end of input).
    pub fn err(&self) -> Option<&Error> {
        match &self.latch {
            Some(Latch::Hard(err)) => Some(err),
            _ => None,
        }
    }

    /// Whether the current token is a non-terminal fragment of an oversized
    /// string or number.
    ///
    /// A value whose raw text reaches the configured chunk size is delivered
    /// across several `advance` calls, each fragment carrying the same token
    /// kind; this reports `true` for every fragment except the last.
    /// Concatenating fragment bytes in order reconstructs the value exactly.
    /// A number's terminal fragment may be empty when the value ended exactly
    /// at a fragment boundary.
    pub fn is_continued(&self) -> bool {
        self.continued
    }

    /// Current nesting depth: the number of unmatched `[`/`{` scanned so far.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// The configured fragment size in bytes.
    pub fn chunk_size(&self) -> usize {
        self.size
    }

    // ------------------------------------------------------------------
    // Dispatcher
    // ------------------------------------------------------------------

    fn parse_value(&mut self) -> bool {
        if self.latch.is_some() {
            if matches!(self.latch, Some(Latch::EndOfInput)) && !self.stack.is_empty() {
                // Input ran out inside an open container.
                let kind = if self.want_comma() {
                    SyntaxErrorKind::ExpectingComma
                } else {
                    SyntaxErrorKind::BeginningOfValue
                };
                self.fail_syntax(kind, None);
            }
            return false;
        }

        self.buf.reset();
        self.continued = false;
        let mut comma = false;
        let mut want_comma = self.want_comma();
        let mut want_value = false;

        loop {
            let Some(ch) = self.ch else {
                // Input ran out right after a consumed comma or colon.
                self.fail_syntax(SyntaxErrorKind::BeginningOfValue, None);
                return false;
            };
            match ch {
                '{' | '[' | '"' | 't' | 'f' | 'n' | '-' | '0'..='9' => {
                    if want_comma {
                        self.fail_syntax(SyntaxErrorKind::ExpectingComma, Some(ch));
                        return false;
                    }
                    if self.want_colon {
                        // A key has completed; only a colon may follow.
                        self.fail_syntax(SyntaxErrorKind::BeginningOfValue, Some(ch));
                        return false;
                    }
                    if ch != '"' && self.key_position(want_value) {
                        // Object keys must be strings.
                        self.fail_syntax(SyntaxErrorKind::BeginningOfValue, Some(ch));
                        return false;
                    }
                    return match ch {
                        '{' => {
                            self.tok = Token::ObjectStart;
                            self.stack.push(Context::ObjectKey);
                            self.store();
                            self.next(true);
                            true
                        }
                        '[' => {
                            self.tok = Token::ArrayStart;
                            self.stack.push(Context::Array);
                            self.store();
                            self.next(true);
                            true
                        }
                        '"' => {
                            self.tok = Token::String;
                            let ok = self.scan_string();
                            self.finish_scalar(ok)
                        }
                        't' => {
                            self.tok = Token::True;
                            let ok = self.scan_literal();
                            self.finish_scalar(ok)
                        }
                        'f' => {
                            self.tok = Token::False;
                            let ok = self.scan_literal();
                            self.finish_scalar(ok)
                        }
                        'n' => {
                            self.tok = Token::Null;
                            let ok = self.scan_literal();
                            self.finish_scalar(ok)
                        }
                        _ => {
                            self.tok = Token::Number;
                            let ok = self.scan_number();
                            self.finish_scalar(ok)
                        }
                    };
                }

                '}' => {
                    if want_value || self.want_colon {
                        self.fail_syntax(SyntaxErrorKind::BeginningOfValue, Some(ch));
                        return false;
                    }
                    if !self.stack.pop_expect(Context::ObjectKey) {
                        self.fail_syntax(SyntaxErrorKind::BeginningOfValue, Some(ch));
                        return false;
                    }
                    self.tok = Token::ObjectEnd;
                    self.store();
                    self.note_value_end();
                    self.next(true);
                    return true;
                }

                ']' => {
                    if want_value {
                        self.fail_syntax(SyntaxErrorKind::BeginningOfValue, Some(ch));
                        return false;
                    }
                    if !self.stack.pop_expect(Context::Array) {
                        self.fail_syntax(SyntaxErrorKind::BeginningOfValue, Some(ch));
                        return false;
                    }
                    self.tok = Token::ArrayEnd;
                    self.store();
                    self.note_value_end();
                    self.next(true);
                    return true;
                }

                ':' => {
                    if want_comma {
                        self.fail_syntax(SyntaxErrorKind::ExpectingComma, Some(ch));
                        return false;
                    }
                    if want_value || !self.want_colon {
                        self.fail_syntax(SyntaxErrorKind::BeginningOfValue, Some(ch));
                        return false;
                    }
                    self.want_colon = false;
                    want_value = true; // the member value must follow
                    self.next(true);
                }

                ',' => {
                    if comma || !want_comma {
                        self.fail_syntax(SyntaxErrorKind::BeginningOfValue, Some(ch));
                        return false;
                    }
                    comma = true;
                    want_comma = false;
                    want_value = true; // a value must follow the comma
                    self.next(true);
                }

                _ => {
                    self.fail_syntax(SyntaxErrorKind::BeginningOfValue, Some(ch));
                    return false;
                }
            }
        }
    }

    /// True iff the previous token completed a value inside an open
    /// container, so a comma (or the matching closer) is due next.
    fn want_comma(&self) -> bool {
        !self.stack.is_empty() && !self.want_colon && self.tok.completes_value()
    }

    /// True iff an object key is expected at the current decision point.
    fn key_position(&self, want_value: bool) -> bool {
        self.stack.top() == Some(Context::ObjectKey)
            && (want_value || !self.tok.completes_value())
    }

    /// Records that a value token just completed: object contexts alternate
    /// between key-expecting and value-expecting.
    fn note_value_end(&mut self) {
        match self.stack.top() {
            Some(Context::ObjectValue) => {
                // Member value consumed; comma-or-close next.
                self.stack.replace_top(Context::ObjectKey);
            }
            Some(Context::ObjectKey) if self.tok == Token::String => {
                // The string was a key; its colon is now required.
                self.stack.replace_top(Context::ObjectValue);
                self.want_colon = true;
            }
            _ => {}
        }
    }

    /// Applies key/value bookkeeping once a scalar finishes, skipping it for
    /// non-terminal fragments (a fragment sequence is one logical token).
    fn finish_scalar(&mut self, ok: bool) -> bool {
        if ok && self.pending.is_none() {
            self.note_value_end();
        }
        ok
    }

    // ------------------------------------------------------------------
    // Recognizers
    // ------------------------------------------------------------------

    fn scan_literal(&mut self) -> bool {
        self.store(); // the character that selected the literal
        let mut matcher = LiteralMatcher::new(self.tok);
        loop {
            self.next(false);
            match matcher.step(self.ch) {
                Step::Matched => self.store(),
                Step::Done => {
                    self.store();
                    break;
                }
                Step::Mismatch { want } => {
                    let err = LiteralError {
                        want,
                        got: self.ch,
                        token: self.tok,
                    };
                    self.fail(Error::Literal(err));
                    return false;
                }
            }
        }

        // The next code point must be a separator.
        self.next(false);
        if !grammar::is_separator(self.ch) {
            self.fail_syntax(SyntaxErrorKind::AfterTopLevelValue, self.ch);
            return false;
        }
        self.skip_trailing_whitespace();
        true
    }

    fn scan_string(&mut self) -> bool {
        self.store(); // opening double-quote
        self.scan_string_body()
    }

    fn scan_string_body(&mut self) -> bool {
        loop {
            if !self.next(false) {
                // No closing quote before end of input (or a source error,
                // which the latch keeps instead).
                self.fail_syntax(SyntaxErrorKind::StringLiteral, None);
                return false;
            }
            match self.ch {
                Some('"') => {
                    // Unescaped double-quote: end of the string literal.
                    self.store();
                    break;
                }
                Some('\\') => {
                    if !self.scan_escape() {
                        return false;
                    }
                }
                Some(ch) if grammar::is_invalid_in_string(ch) => {
                    self.fail_syntax(SyntaxErrorKind::StringLiteral, Some(ch));
                    return false;
                }
                Some(_) => self.store(),
                None => {
                    self.fail_syntax(SyntaxErrorKind::StringLiteral, None);
                    return false;
                }
            }
            if self.buf.len() >= self.size {
                self.pending = Some(Pending::StringBody);
                self.continued = true;
                return true;
            }
        }

        // Position the tokenizer on the next code point.
        self.next(true);
        true
    }

    /// Consumes one escape sequence: a single-character escape or `\u` plus
    /// exactly four hexadecimal digits. Surrogate pairs are not reassembled;
    /// two adjacent `\u` escapes pass through independently.
    fn scan_escape(&mut self) -> bool {
        self.store(); // reverse solidus
        self.next(false);
        match self.ch {
            Some('"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't') => {
                self.store();
                true
            }
            Some('u') => {
                self.store();
                for _ in 0..4 {
                    self.next(false);
                    match self.ch {
                        Some(ch) if grammar::is_hex_digit(ch) => self.store(),
                        found => {
                            self.fail_syntax(SyntaxErrorKind::HexEscape, found);
                            return false;
                        }
                    }
                }
                true
            }
            found => {
                self.fail_syntax(SyntaxErrorKind::EscapeCode, found);
                false
            }
        }
    }

    fn scan_number(&mut self) -> bool {
        self.store(); // leading sign or first digit
        let digit_start = self.ch != Some('-');
        let st = NumberLex {
            int_started: digit_start,
            leading_zero: self.ch == Some('0'),
            in_frac: false,
            last_is_digit: digit_start,
        };
        self.scan_number_body(st)
    }

    fn scan_number_body(&mut self, mut st: NumberLex) -> bool {
        loop {
            if !self.next(false) {
                break;
            }
            let Some(ch) = self.ch else { break };
            match ch {
                '0'..='9' => {
                    if !st.in_frac {
                        if st.leading_zero {
                            self.fail_syntax(SyntaxErrorKind::AfterLeadingZero, Some(ch));
                            return false;
                        }
                        if !st.int_started {
                            // First digit after the leading minus.
                            st.int_started = true;
                            st.leading_zero = ch == '0';
                        }
                    }
                    self.store();
                    st.last_is_digit = true;
                }
                '.' => {
                    if st.in_frac || !st.last_is_digit {
                        self.fail_syntax(SyntaxErrorKind::AfterTopLevelValue, Some(ch));
                        return false;
                    }
                    st.in_frac = true;
                    st.last_is_digit = false;
                    self.store();
                }
                'e' | 'E' => {
                    if !st.last_is_digit {
                        self.fail_syntax(SyntaxErrorKind::AfterTopLevelValue, Some(ch));
                        return false;
                    }
                    // Single forward pass: the integer/fraction phase is
                    // never re-entered.
                    return self.scan_exponent();
                }
                ch if grammar::is_separator(Some(ch)) => break,
                ch => {
                    self.fail_syntax(SyntaxErrorKind::AfterTopLevelValue, Some(ch));
                    return false;
                }
            }
            if self.buf.len() >= self.size {
                self.pending = Some(Pending::Number(st));
                self.continued = true;
                return true;
            }
        }

        if !st.last_is_digit {
            // A bare `-`, or a trailing `.`.
            self.fail_syntax(SyntaxErrorKind::AfterTopLevelValue, self.ch);
            return false;
        }
        self.skip_trailing_whitespace();
        true
    }

    fn scan_exponent(&mut self) -> bool {
        self.store(); // the 'e' or 'E'
        let st = ExponentLex {
            started: false,
            last_is_digit: false,
        };
        self.scan_exponent_body(st)
    }

    fn scan_exponent_body(&mut self, mut st: ExponentLex) -> bool {
        loop {
            if !self.next(false) {
                break;
            }
            let Some(ch) = self.ch else { break };
            match ch {
                '+' | '-' => {
                    if st.started {
                        self.fail_syntax(SyntaxErrorKind::AfterTopLevelValue, Some(ch));
                        return false;
                    }
                    st.started = true;
                    self.store();
                }
                '0'..='9' => {
                    st.started = true;
                    st.last_is_digit = true;
                    self.store();
                }
                ch if grammar::is_separator(Some(ch)) => break,
                ch => {
                    self.fail_syntax(SyntaxErrorKind::AfterTopLevelValue, Some(ch));
                    return false;
                }
            }
            if self.buf.len() >= self.size {
                self.pending = Some(Pending::Exponent(st));
                self.continued = true;
                return true;
            }
        }

        if !st.last_is_digit {
            // `1e`, `1e+`, or a non-digit after the sign.
            self.fail_syntax(SyntaxErrorKind::AfterTopLevelValue, self.ch);
            return false;
        }
        self.skip_trailing_whitespace();
        true
    }

    // ------------------------------------------------------------------
    // Scanning primitives
    // ------------------------------------------------------------------

    /// Advances to the next code point, optionally discarding whitespace.
    /// On end of input or a source error, latches and clears the current
    /// code point; returns whether a code point is available.
    fn next(&mut self, skip_whitespace: bool) -> bool {
        if self.latch.is_some() {
            return false;
        }
        loop {
            match self.source.next_code_point() {
                Err(err) => {
                    self.fail(Error::Source(err));
                    return false;
                }
                Ok(None) => {
                    self.fail_eof();
                    return false;
                }
                Ok(Some(ch)) if skip_whitespace && grammar::is_whitespace(ch) => {}
                Ok(Some(ch)) => {
                    self.ch = Some(ch);
                    return true;
                }
            }
        }
    }

    /// Appends the current code point to the token buffer.
    fn store(&mut self) {
        if let Some(ch) = self.ch {
            self.buf.push(ch);
        }
    }

    fn skip_trailing_whitespace(&mut self) {
        if self.ch.is_some_and(grammar::is_whitespace) {
            self.next(true);
        }
    }

    /// Latches a hard error. First error wins; the end-of-input placeholder
    /// is the one latch a hard error may replace. The source is never polled
    /// again and the token becomes `Invalid`.
    fn fail(&mut self, err: Error) {
        match self.latch {
            None | Some(Latch::EndOfInput) => {
                self.latch = Some(Latch::Hard(err));
                self.ch = None;
                self.tok = Token::Invalid;
            }
            Some(Latch::Hard(_)) => {}
        }
    }

    fn fail_syntax(&mut self, kind: SyntaxErrorKind, found: Option<char>) {
        self.fail(Error::Syntax(SyntaxError { found, kind }));
    }

    /// Latches the soft end-of-input placeholder. Not an error on its own:
    /// [`err`](Self::err) reports nothing unless a hard error replaces it.
    fn fail_eof(&mut self) {
        self.ch = None;
        if self.latch.is_none() {
            self.latch = Some(Latch::EndOfInput);
        }
    }
}

impl<R: Read> Tokenizer<ReadCodePoints<R>> {
    /// Creates a tokenizer reading UTF-8 from `reader` with the default
    /// chunk size.
    pub fn from_reader(reader: R) -> Self {
        Self::new(ReadCodePoints::new(reader))
    }

    /// Creates a tokenizer reading UTF-8 from `reader`. `size` is clamped to
    /// [`MIN_CHUNK_SIZE`].
    pub fn from_reader_with_chunk_size(reader: R, size: usize) -> Self {
        Self::with_chunk_size(ReadCodePoints::new(reader), size)
    }
}

impl<S> fmt::Debug for Tokenizer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("token", &self.tok)
            .field("bytes", &self.buf)
            .field("depth", &self.stack.depth())
            .field("continued", &self.continued)
            .finish_non_exhaustive()
    }
}
