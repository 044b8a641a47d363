//! Code-point classification for the JSON grammar.

/// Whether `ch` is JSON whitespace.
///
/// "Insignificant whitespace is allowed before or after any token. The
/// whitespace characters are: character tabulation (U+0009), line feed
/// (U+000A), carriage return (U+000D), and space (U+0020)."
pub(crate) fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

/// Whether `ch` may legally follow a complete value: whitespace, a structural
/// character, or the end-of-input sentinel (`None`).
pub(crate) fn is_separator(ch: Option<char>) -> bool {
    match ch {
        None => true,
        Some(ch) => is_whitespace(ch) || matches!(ch, ',' | ':' | '[' | ']' | '{' | '}'),
    }
}

/// Whether `ch` must not appear unescaped inside a string literal.
///
/// "All characters may be placed within the quotation marks except for the
/// characters that must be escaped: quotation mark (U+0022), reverse solidus
/// (U+005C), and the control characters U+0000 to U+001F."
///
/// The quotation mark and reverse solidus are consumed by dedicated branches
/// of the string recognizer before this check runs; they are included here so
/// the predicate stands on its own.
pub(crate) fn is_invalid_in_string(ch: char) -> bool {
    matches!(ch, '\u{0000}'..='\u{001F}' | '"' | '\\')
}

/// Whether `ch` is a hexadecimal digit, as required inside a `\u` escape.
pub(crate) fn is_hex_digit(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

#[cfg(test)]
mod tests {
    use super::{is_hex_digit, is_invalid_in_string, is_separator, is_whitespace};

    #[test]
    fn whitespace_is_the_four_json_code_points() {
        for ch in [' ', '\t', '\n', '\r'] {
            assert!(is_whitespace(ch), "{ch:?}");
        }
        // U+000B and U+00A0 are whitespace elsewhere, never in JSON.
        for ch in ['\u{000B}', '\u{00A0}', '\u{2028}'] {
            assert!(!is_whitespace(ch), "{ch:?}");
        }
    }

    #[test]
    fn end_of_input_is_a_separator() {
        assert!(is_separator(None));
        assert!(is_separator(Some(',')));
        assert!(is_separator(Some(']')));
        assert!(!is_separator(Some('z')));
        assert!(!is_separator(Some('"')));
    }

    #[test]
    fn string_legality() {
        assert!(is_invalid_in_string('\u{0000}'));
        assert!(is_invalid_in_string('\u{001F}'));
        assert!(is_invalid_in_string('"'));
        assert!(is_invalid_in_string('\\'));
        assert!(!is_invalid_in_string(' '));
        assert!(!is_invalid_in_string('\u{0020}'));
        assert!(!is_invalid_in_string('é'));
    }

    #[test]
    fn hex_digits() {
        for ch in ['0', '9', 'a', 'f', 'A', 'F'] {
            assert!(is_hex_digit(ch), "{ch:?}");
        }
        for ch in ['g', 'G', '_', ' '] {
            assert!(!is_hex_digit(ch), "{ch:?}");
        }
    }
}
