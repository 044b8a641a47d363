//! The closed set of token kinds produced by the tokenizer.

use core::fmt;

/// The classified kind of one recognized grammar unit.
///
/// [`Token::Invalid`] is both the initial sentinel (before the first call to
/// [`advance`](crate::Tokenizer::advance)) and the terminal value once an
/// error latches. The tokenizer holds exactly one current token at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Token {
    /// No token: not started yet, or an error has latched.
    Invalid,
    /// The literal `null`.
    Null,
    /// The literal `false`.
    False,
    /// The literal `true`.
    True,
    /// A string literal, quotes included in the raw bytes.
    String,
    /// A number literal.
    Number,
    /// A `}` closing an object.
    ObjectEnd,
    /// A `]` closing an array.
    ArrayEnd,
    /// A `[` opening an array.
    ArrayStart,
    /// A `{` opening an object.
    ObjectStart,
}

impl Token {
    /// Whether this token completes a value, i.e. a comma or a closing
    /// bracket may legally follow it inside an open container.
    ///
    /// `ArrayStart`/`ObjectStart` open a value rather than complete one, and
    /// `Invalid` completes nothing.
    pub(crate) fn completes_value(self) -> bool {
        matches!(
            self,
            Token::Null
                | Token::False
                | Token::True
                | Token::String
                | Token::Number
                | Token::ObjectEnd
                | Token::ArrayEnd
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Token::Invalid => "<invalid>",
            Token::Null => "null",
            Token::False => "false",
            Token::True => "true",
            Token::String => "string",
            Token::Number => "number",
            Token::ObjectEnd => "}",
            Token::ArrayEnd => "]",
            Token::ArrayStart => "[",
            Token::ObjectStart => "{",
        })
    }
}
