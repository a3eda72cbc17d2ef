use alloc::string::String;
use thiserror::Error;

/// Why a piece of text could not be reduced to an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorReason {
    /// No grammar rule matches the text (empty input, a missing operand, a malformed group).
    #[error("no expression matches")]
    NoMatch,

    #[error("unbalanced parentheses")]
    UnbalancedParentheses,

    /// The whitespace-stripped input is longer than the configured limit.
    #[error("input is longer than {0} characters")]
    TooLong(usize),

    /// Parsing would recurse deeper than the configured limit.
    #[error("expression nests deeper than {0} levels")]
    TooDeep(usize),
}

/// The single failure signal of [parse](crate::parse), carrying the text which could not be
/// parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse expression `{text}`: {reason}")]
pub struct ParseError {
    pub text: String,
    pub reason: ParseErrorReason,
}

impl ParseError {
    pub fn new(text: impl Into<String>, reason: ParseErrorReason) -> Self {
        Self { text: text.into(), reason }
    }
}
