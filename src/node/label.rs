//! The vocabulary of node labels.
//!
//! A label both identifies what kind of node it is attached to and, for literals, carries the
//! node's value as text. Labels can be converted to and from their textual names, which are the
//! names shown by [convert_to_string](crate::node::tree::NodeRef::convert_to_string).

use core::fmt;

use alloc::string::{String, ToString};

use crate::numeric::{format_literal, is_literal, literal_value};

/// The binary operators. Every node labelled with one of these has exactly two children.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOp {
    /// The textual symbol of this operator.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Power => "^",
        }
    }

    /// Returns the operator which a node labelled with this operator actually applies, given the
    /// label of its parent.
    ///
    /// The parser labels each node of a same-precedence chain with the first operator it finds,
    /// and parses the rest of the chain as the right child. Under a `-` parent, the child's
    /// additive operator must be inverted for the chain to keep left-to-right meaning, and
    /// likewise `*` under a `/` parent. Nothing else is ever inverted.
    pub fn in_context(self, parent: Option<&Label>) -> BinaryOp {
        match (self, parent) {
            (Self::Add, Some(Label::Binary(Self::Subtract))) => Self::Subtract,
            (Self::Subtract, Some(Label::Binary(Self::Subtract))) => Self::Add,
            (Self::Multiply, Some(Label::Binary(Self::Divide))) => Self::Divide,
            (op, _) => op,
        }
    }

    /// Applies this operator to two values, with IEEE semantics for every operator.
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Subtract => left - right,
            Self::Multiply => left * right,
            Self::Divide => left / right,
            Self::Power => num_traits::Float::powf(left, right),
        }
    }
}

/// The label of a node.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Label {
    Binary(BinaryOp),

    /// Natural logarithm, with one child.
    Log,

    /// A parenthesised group, with one child. Parentheses are kept in the tree as a pass-through
    /// node rather than being dropped during parsing.
    Parentheses,

    /// The independent variable `x`.
    Variable,

    /// A numeric literal, stored as text and parsed whenever its value is needed.
    Literal(String),

    /// Any other leaf text. Such a node has no meaning: it evaluates to 0 and differentiates to 0.
    Unknown(String),
}

impl Label {
    /// Creates a literal label holding the normalised text of `value`.
    pub fn literal(value: f64) -> Self {
        Self::Literal(format_literal(value))
    }

    /// The textual name of this label.
    pub fn name(&self) -> &str {
        match self {
            Self::Binary(op) => op.symbol(),
            Self::Log => "log",
            Self::Parentheses => "()",
            Self::Variable => "x",
            Self::Literal(text) | Self::Unknown(text) => text,
        }
    }

    /// The number of children a node with this label must have.
    pub fn arity(&self) -> usize {
        match self {
            Self::Binary(_) => 2,
            Self::Log | Self::Parentheses => 1,
            Self::Variable | Self::Literal(_) | Self::Unknown(_) => 0,
        }
    }

    /// Returns the value of a literal label, or `None` for every other label.
    pub fn value(&self) -> Option<f64> {
        if let Self::Literal(text) = self {
            literal_value(text)
        } else {
            None
        }
    }

    /// If this is a binary operator, returns it.
    pub fn binary_op(&self) -> Option<BinaryOp> {
        if let Self::Binary(op) = self {
            Some(*op)
        } else {
            None
        }
    }

    /// Returns true if a node with this label would apply a different operator than its own
    /// when attached under `parent`. See [BinaryOp::in_context].
    pub fn flips_under(&self, parent: &Label) -> bool {
        match self.binary_op() {
            Some(op) => op.in_context(Some(parent)) != op,
            None => false,
        }
    }
}

impl From<BinaryOp> for Label {
    fn from(op: BinaryOp) -> Self {
        Self::Binary(op)
    }
}

impl From<&str> for Label {
    /// Classifies a textual name. Literal text is kept exactly as given, without normalisation.
    fn from(name: &str) -> Self {
        match name {
            "+" => Self::Binary(BinaryOp::Add),
            "-" => Self::Binary(BinaryOp::Subtract),
            "*" => Self::Binary(BinaryOp::Multiply),
            "/" => Self::Binary(BinaryOp::Divide),
            "^" => Self::Binary(BinaryOp::Power),
            "log" => Self::Log,
            "()" => Self::Parentheses,
            "x" => Self::Variable,
            _ if is_literal(name) => Self::Literal(name.to_string()),
            _ => Self::Unknown(name.to_string()),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
