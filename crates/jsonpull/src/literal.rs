//! Tail matching for the three keyword literals.
//!
//! The dispatcher selects the literal from its first character (`n`, `t` or
//! `f`) and then feeds subsequent code points through [`LiteralMatcher`],
//! one per expected tail byte.

use crate::token::Token;

/// Outcome of feeding one code point to the matcher.
pub(crate) enum Step {
    /// Matched, more tail characters remain.
    Matched,
    /// Matched the final tail character; the literal is complete.
    Done,
    /// Did not match; `want` is the code point the literal required.
    Mismatch {
        /// Expected code point at the failing position.
        want: char,
    },
}

/// Matches the remaining tail of `null`, `true` or `false`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LiteralMatcher {
    rest: &'static [u8],
}

impl LiteralMatcher {
    /// Matcher for the tail of `token`, which must be one of the literal
    /// kinds; the first character has already been consumed.
    pub(crate) fn new(token: Token) -> Self {
        let rest: &'static [u8] = match token {
            Token::Null => b"ull",
            Token::True => b"rue",
            Token::False => b"alse",
            _ => unreachable!("literal matcher for non-literal token"),
        };
        Self { rest }
    }

    /// Feeds the next input code point (`None` = end of input, which never
    /// matches).
    pub(crate) fn step(&mut self, got: Option<char>) -> Step {
        let Some((&want, rest)) = self.rest.split_first() else {
            return Step::Done;
        };
        let want = want as char;
        if got == Some(want) {
            self.rest = rest;
            if rest.is_empty() { Step::Done } else { Step::Matched }
        } else {
            Step::Mismatch { want }
        }
    }
}
