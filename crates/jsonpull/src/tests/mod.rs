mod messages;

use crate::{
    CodePointSource, Error, LiteralError, ReadCodePoints, SyntaxError, SyntaxErrorKind, Token,
    Tokenizer,
};

/// Tokenizer over an in-memory document.
fn tokenizer(input: &str) -> Tokenizer<ReadCodePoints<&[u8]>> {
    Tokenizer::from_reader(input.as_bytes())
}

fn tokenizer_with_chunk_size(input: &str, size: usize) -> Tokenizer<ReadCodePoints<&[u8]>> {
    Tokenizer::from_reader_with_chunk_size(input.as_bytes(), size)
}

/// Drains the tokenizer, collecting `(kind, raw text)` per recognized token.
/// Fragments of an oversized value show up as separate entries.
fn collect<S: CodePointSource>(scanner: &mut Tokenizer<S>) -> Vec<(Token, String)> {
    let mut out = Vec::new();
    while scanner.advance() {
        out.push((scanner.token(), scanner.bytes().to_string()));
    }
    out
}

/// Like [`collect`], also recording the continued flag per entry.
fn collect_fragments<S: CodePointSource>(
    scanner: &mut Tokenizer<S>,
) -> Vec<(Token, String, bool)> {
    let mut out = Vec::new();
    while scanner.advance() {
        out.push((
            scanner.token(),
            scanner.bytes().to_string(),
            scanner.is_continued(),
        ));
    }
    out
}

fn assert_clean_end<S: CodePointSource>(scanner: &Tokenizer<S>) {
    assert!(
        scanner.err().is_none(),
        "expected clean end of input, got {:?}",
        scanner.err()
    );
}

#[track_caller]
fn assert_syntax_err<S: CodePointSource>(
    scanner: &Tokenizer<S>,
    kind: SyntaxErrorKind,
    found: Option<char>,
) {
    match scanner.err() {
        Some(Error::Syntax(err)) => assert_eq!(*err, SyntaxError { found, kind }),
        other => panic!("expected syntax error, got {other:?}"),
    }
    assert_eq!(scanner.token(), Token::Invalid);
}

#[track_caller]
fn assert_literal_err<S: CodePointSource>(
    scanner: &Tokenizer<S>,
    want: char,
    got: Option<char>,
    token: Token,
) {
    match scanner.err() {
        Some(Error::Literal(err)) => assert_eq!(*err, LiteralError { want, got, token }),
        other => panic!("expected literal error, got {other:?}"),
    }
    assert_eq!(scanner.token(), Token::Invalid);
}
