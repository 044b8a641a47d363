//! The tokenizer over readers that dribble input out slowly, including mid
//! code point and with transient `Interrupted` failures.

use std::io::{self, Read};

use jsonpull::{Token, Tokenizer};

/// Yields at most one byte per `read` call.
struct OneByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl Read for OneByteReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos == self.data.len() || buf.is_empty() {
            return Ok(0);
        }
        buf[0] = self.data[self.pos];
        self.pos += 1;
        Ok(1)
    }
}

/// Yields one byte per call and fails with `Interrupted` before every other
/// one.
struct InterruptingReader<'a> {
    data: &'a [u8],
    pos: usize,
    interrupt: bool,
}

impl Read for InterruptingReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.interrupt {
            self.interrupt = false;
            return Err(io::Error::new(io::ErrorKind::Interrupted, "try again"));
        }
        self.interrupt = true;
        if self.pos == self.data.len() || buf.is_empty() {
            return Ok(0);
        }
        buf[0] = self.data[self.pos];
        self.pos += 1;
        Ok(1)
    }
}

const DOCUMENT: &str = "{\"greeting\": \"καλημέρα\", \"n\": -12.5e3, \"ok\": [true, null]}";

fn expected() -> Vec<(Token, String)> {
    vec![
        (Token::ObjectStart, "{".to_string()),
        (Token::String, "\"greeting\"".to_string()),
        (Token::String, "\"καλημέρα\"".to_string()),
        (Token::String, "\"n\"".to_string()),
        (Token::Number, "-12.5e3".to_string()),
        (Token::String, "\"ok\"".to_string()),
        (Token::ArrayStart, "[".to_string()),
        (Token::True, "true".to_string()),
        (Token::Null, "null".to_string()),
        (Token::ArrayEnd, "]".to_string()),
        (Token::ObjectEnd, "}".to_string()),
    ]
}

fn collect<R: Read>(reader: R) -> (Vec<(Token, String)>, bool) {
    let mut scanner = Tokenizer::from_reader(reader);
    let mut out = Vec::new();
    while scanner.advance() {
        out.push((scanner.token(), scanner.bytes().to_string()));
    }
    (out, scanner.err().is_none())
}

#[test]
fn one_byte_at_a_time() {
    let (tokens, clean) = collect(OneByteReader {
        data: DOCUMENT.as_bytes(),
        pos: 0,
    });
    assert!(clean);
    assert_eq!(tokens, expected());
}

#[test]
fn interrupted_reads_are_retried() {
    let (tokens, clean) = collect(InterruptingReader {
        data: DOCUMENT.as_bytes(),
        pos: 0,
        interrupt: false,
    });
    assert!(clean);
    assert_eq!(tokens, expected());
}

#[test]
fn matches_a_bulk_read() {
    let (bulk, clean) = collect(DOCUMENT.as_bytes());
    assert!(clean);
    assert_eq!(bulk, expected());
}

#[test]
fn multibyte_code_point_split_across_reads_still_errors_cleanly_when_cut() {
    // Truncating inside a multi-byte sequence is a decoding error, not a
    // panic, even at one byte per read.
    // Byte 15 is the middle of the first two-byte Greek letter.
    let cut = &DOCUMENT.as_bytes()[..15];
    let mut scanner = Tokenizer::from_reader(OneByteReader { data: cut, pos: 0 });
    while scanner.advance() {}
    assert!(scanner.err().is_some());
}
