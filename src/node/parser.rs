//! Converts expression text into an [Expression] tree.
//!
//! The grammar has three binary precedence layers above the operands:
//!
//! ```text
//! Additive       := Multiplicative ('+' | '-') Additive | Multiplicative
//! Multiplicative := Exponential ('*' | '/') Additive | Exponential
//! Exponential    := Operand '^' Additive | Operand
//! Operand        := "log(" Additive ")" | Primary
//! Primary        := '(' Additive ')' | <literal> | 'x'
//! ```
//!
//! Each layer scans its text for the first operator of its own precedence which is not nested in
//! parentheses. The text left of that operator is parsed at the next layer up, and everything
//! right of it is parsed again as a whole `Additive`. A chain like `a-b-c` therefore becomes a
//! right-leaning tree whose inner nodes carry the operator they were split on; evaluation corrects
//! for this using each node's parent (see [BinaryOp::in_context]).
//!
//! Only parentheses and `log` calls recurse into the parser. A chain is walked in a loop, so its
//! length is bounded by [ParserSettings::max_length] alone.

use alloc::{string::String, vec::Vec};
use log::{debug, trace};

use crate::{error::{ParseError, ParseErrorReason}, numeric::literal_value};

use super::{label::{BinaryOp, Label}, tree::Expression};

type Parsed = Result<Expression, ParseErrorReason>;

/// Limits which protect the recursive parser, and the recursive operations on the trees it
/// produces, from unreasonably large input.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct ParserSettings {
    /// The maximum number of characters, after whitespace is removed.
    pub max_length: usize,

    /// The maximum nesting depth of parentheses and `log` calls. Operator chains, however long,
    /// do not count towards this.
    pub max_depth: usize,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self { max_length: 4096, max_depth: 256 }
    }
}

/// Parses `text` with the default [ParserSettings].
pub fn parse(text: &str) -> Result<Expression, ParseError> {
    parse_with_settings(text, &ParserSettings::default())
}

/// Parses `text` with the given limits.
pub fn parse_with_settings(text: &str, settings: &ParserSettings) -> Result<Expression, ParseError> {
    Parser::new(settings).parse(text)
}

/// A recursive-descent parser for a single expression.
pub struct Parser<'a> {
    settings: &'a ParserSettings,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(settings: &'a ParserSettings) -> Self {
        Self { settings, depth: 0 }
    }

    /// Parses `text`, ignoring all whitespace. Any text which does not reduce to exactly one
    /// expression is an error.
    pub fn parse(&mut self, text: &str) -> Result<Expression, ParseError> {
        let text: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        self.depth = 0;

        let result = self.check_limits(&text).and_then(|_| self.parse_chain(&text, Layer::Additive));
        match result {
            Ok(expression) => {
                debug!("parsed `{}` into {} nodes", text, expression.len());
                Ok(expression)
            }
            Err(reason) => {
                debug!("failed to parse `{}`: {}", text, reason);
                Err(ParseError::new(text, reason))
            }
        }
    }

    fn check_limits(&self, text: &str) -> Result<(), ParseErrorReason> {
        if text.chars().count() > self.settings.max_length {
            return Err(ParseErrorReason::TooLong(self.settings.max_length));
        }

        let mut depth = 0usize;
        for c in text.chars() {
            match c {
                '(' => depth += 1,
                ')' => depth = depth.checked_sub(1).ok_or(ParseErrorReason::UnbalancedParentheses)?,
                _ => (),
            }
        }

        if depth == 0 {
            Ok(())
        } else {
            Err(ParseErrorReason::UnbalancedParentheses)
        }
    }

    /// Parses `text`, the contents of a parenthesised group or a `log` call, one level deeper.
    fn nested(&mut self, text: &str) -> Parsed {
        if self.depth >= self.settings.max_depth {
            return Err(ParseErrorReason::TooDeep(self.settings.max_depth));
        }

        self.depth += 1;
        let result = self.parse_chain(text, Layer::Additive);
        self.depth -= 1;

        result
    }

    /// Parses `text` starting at `layer`. The right side of every split is an additive chain of
    /// its own, so the chain is walked in a loop and the right-leaning tree is assembled from the
    /// end.
    fn parse_chain(&mut self, text: &str, layer: Layer) -> Parsed {
        let mut links = Vec::new();
        let mut rest = text;
        let mut layer = layer;

        let last = loop {
            match layer.split_point(rest) {
                Some((index, op, split_layer)) => {
                    let (left, right) = (&rest[..index], &rest[index + 1..]);
                    if left.is_empty() || right.is_empty() {
                        trace!("operator `{}` in `{}` is missing an operand", op.symbol(), rest);
                        return Err(ParseErrorReason::NoMatch);
                    }

                    let left = match split_layer.next() {
                        Some(next) => self.parse_chain(left, next)?,
                        None => self.parse_operand(left)?,
                    };
                    links.push((left, op));

                    rest = right;
                    layer = Layer::Additive;
                }
                None => break self.parse_operand(rest)?,
            }
        };

        Ok(links.into_iter().rev().fold(last, |right, (left, op)| Expression::binary(op, left, right)))
    }

    fn parse_operand(&mut self, text: &str) -> Parsed {
        if let Some(argument) = text.strip_prefix("log").and_then(enclosed) {
            let argument = self.nested(argument)?;
            return Ok(Expression::unary(Label::Log, argument));
        }

        self.parse_primary(text)
    }

    fn parse_primary(&mut self, text: &str) -> Parsed {
        if text.starts_with('(') {
            return match enclosed(text) {
                Some(inner) => {
                    let inner = self.nested(inner)?;
                    Ok(Expression::unary(Label::Parentheses, inner))
                }
                None => {
                    trace!("`{}` is not a single parenthesised group", text);
                    Err(ParseErrorReason::NoMatch)
                }
            };
        }

        if let Some(value) = literal_value(text) {
            return Ok(Expression::new(Label::literal(value)));
        }

        if text == "x" {
            return Ok(Expression::new(Label::Variable));
        }

        if is_fallback_leaf(text) {
            trace!("keeping unrecognised leaf `{}`", text);
            Ok(Expression::new(Label::Unknown(text.into())))
        } else {
            trace!("`{}` matches no rule", text);
            Err(ParseErrorReason::NoMatch)
        }
    }
}

/// The precedence layers which split text on a binary operator, loosest first.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
enum Layer {
    Additive,
    Multiplicative,
    Exponential,
}

impl Layer {
    /// The layer which parses the text left of this layer's operator, or `None` if that text is
    /// a single operand.
    fn next(self) -> Option<Layer> {
        match self {
            Layer::Additive => Some(Layer::Multiplicative),
            Layer::Multiplicative => Some(Layer::Exponential),
            Layer::Exponential => None,
        }
    }

    /// Finds where `text` splits, trying this layer and then each tighter one in turn. Returns
    /// the index of the operator, the operator, and the layer which matched.
    fn split_point(self, text: &str) -> Option<(usize, BinaryOp, Layer)> {
        let found = match self {
            Layer::Additive => top_level_chars(text).find_map(|(i, c)| match c {
                '+' if !is_exponent_sign(text, i) => Some((i, BinaryOp::Add)),
                '-' if is_binary_minus(text, i) => Some((i, BinaryOp::Subtract)),
                _ => None,
            }),
            Layer::Multiplicative => top_level_chars(text).find_map(|(i, c)| match c {
                '*' => Some((i, BinaryOp::Multiply)),
                '/' => Some((i, BinaryOp::Divide)),
                _ => None,
            }),
            Layer::Exponential => top_level_chars(text)
                .find(|&(_, c)| c == '^')
                .map(|(i, _)| (i, BinaryOp::Power)),
        };

        match found {
            Some((index, op)) => Some((index, op, self)),
            None => self.next().and_then(|next| next.split_point(text)),
        }
    }
}

/// Iterates over the characters of `text` which are not inside parentheses, with their byte
/// indices. Parentheses themselves are never yielded.
fn top_level_chars(text: &str) -> impl Iterator<Item = (usize, char)> + '_ {
    let mut depth = 0i32;
    text.char_indices().filter(move |&(_, c)| {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => return depth == 0,
        }
        false
    })
}

/// If `text` is one parenthesised group, such as `(a+(b))` but not `(a)+(b)`, returns the text
/// between its outer parentheses.
fn enclosed(text: &str) -> Option<&str> {
    if !text.starts_with('(') {
        return None;
    }

    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return if i == text.len() - 1 { Some(&text[1..i]) } else { None };
                }
            }
            _ => (),
        }
    }

    None
}

/// A `-` splits the text unless it is the first character or follows another operator, in which
/// case it is the sign of whatever comes after it.
fn is_binary_minus(text: &str, index: usize) -> bool {
    match text[..index].chars().next_back() {
        None | Some('*' | '+' | '/' | '^' | '-') => false,
        Some(_) => !is_exponent_sign(text, index),
    }
}

/// Returns true if the `+` or `-` at `index` belongs to the exponent of a literal, as in `1e-5`.
fn is_exponent_sign(text: &str, index: usize) -> bool {
    let mantissa = match text[..index].strip_suffix(|c: char| c == 'e' || c == 'E') {
        Some(mantissa) => mantissa,
        None => return false,
    };

    let before_digits = mantissa.trim_end_matches(|c: char| c.is_ascii_digit() || c == '.');
    let digits = &mantissa[before_digits.len()..];

    digits.contains(|c: char| c.is_ascii_digit())
        && !before_digits.ends_with(char::is_alphanumeric)
}

/// Text which is neither a literal nor `x` is kept as a meaningless leaf if it looks like a
/// single token. Empty text, bare operators and anything with parentheses are rejected.
fn is_fallback_leaf(text: &str) -> bool {
    text.contains(|c: char| c.is_alphanumeric()) && !text.contains(|c: char| c == '(' || c == ')')
}
