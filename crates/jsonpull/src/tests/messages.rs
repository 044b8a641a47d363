//! End-to-end checks of the rendered diagnostics, one per error situation.

use insta::assert_snapshot;

use super::tokenizer;

/// Scans to the latch and renders the diagnostic.
fn diagnostic(input: &str) -> String {
    let mut scanner = tokenizer(input);
    while scanner.advance() {}
    match scanner.err() {
        Some(err) => err.to_string(),
        None => panic!("input {input:?} scanned cleanly"),
    }
}

#[test]
fn beginning_of_value() {
    assert_snapshot!(
        diagnostic("z"),
        @"invalid character 'z' looking for beginning of value"
    );
}

#[test]
fn beginning_of_value_at_end_of_input() {
    assert_snapshot!(
        diagnostic("[1,"),
        @"unexpected end of input looking for beginning of value"
    );
}

#[test]
fn string_literal() {
    assert_snapshot!(
        diagnostic("\"a\nb\""),
        @r"invalid character '\n' in string literal"
    );
}

#[test]
fn unterminated_string() {
    assert_snapshot!(
        diagnostic("\"abc"),
        @"unexpected end of input in string literal"
    );
}

#[test]
fn hex_escape() {
    assert_snapshot!(
        diagnostic(r#""\uab_e""#),
        @r"invalid character '_' in \u hexadecimal character escape"
    );
}

#[test]
fn escape_code() {
    assert_snapshot!(
        diagnostic(r#""\z""#),
        @"invalid character 'z' in string escape code"
    );
}

#[test]
fn after_top_level_value() {
    assert_snapshot!(
        diagnostic("falsez"),
        @"invalid character 'z' after top-level value"
    );
}

#[test]
fn after_leading_zero() {
    assert_snapshot!(
        diagnostic("01"),
        @"invalid character '1' after top-level value 0"
    );
}

#[test]
fn expecting_comma() {
    assert_snapshot!(
        diagnostic("[1 2]"),
        @"invalid character '2' looking for a comma"
    );
}

#[test]
fn literal_mismatch() {
    assert_snapshot!(
        diagnostic("nall"),
        @"invalid character 'a' in literal null (expecting 'u')"
    );
}

#[test]
fn literal_truncated() {
    assert_snapshot!(
        diagnostic("fa"),
        @"unexpected end of input in literal false (expecting 'l')"
    );
}

#[test]
fn invalid_utf8() {
    let mut scanner = crate::Tokenizer::from_reader(&b"\xc0\xaf"[..]);
    while scanner.advance() {}
    assert_snapshot!(
        scanner.err().map(ToString::to_string).unwrap_or_default(),
        @"invalid UTF-8 sequence in input"
    );
}

#[test]
fn non_ascii_offender_is_quoted() {
    assert_snapshot!(
        diagnostic("\u{feff}null"),
        @r"invalid character '\u{feff}' looking for beginning of value"
    );
}
