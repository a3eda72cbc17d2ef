//! An abstraction for something which can be evaluated into a number at a value of `x`.
//!
//! This is implemented for whole [Expression]s and for any node within one. Evaluation is total:
//! every tree produces a number, however malformed, and invalid operations follow IEEE semantics
//! (`NaN` or an infinity) rather than failing.

use num_traits::Float;

use crate::node::{label::Label, tree::{Expression, NodeRef}};

/// Something which can be evaluated into a number, given the value of the variable `x`.
pub trait Evaluable {
    fn evaluate(&self, x: f64) -> f64;
}

impl Evaluable for Expression {
    fn evaluate(&self, x: f64) -> f64 {
        self.root().evaluate(x)
    }
}

impl Evaluable for NodeRef<'_> {
    /// Evaluates the subtree rooted at this node.
    ///
    /// A binary operator node applies the operator given by
    /// [in_context](crate::node::label::BinaryOp::in_context) for its parent's label, so a node
    /// is evaluated in the context of the tree it belongs to, not as if it were a root.
    fn evaluate(&self, x: f64) -> f64 {
        match self.label() {
            Label::Literal(_) => self.label().value().unwrap_or(0.0),
            Label::Variable => x,

            Label::Binary(op) => match self.operands() {
                Some((left, right)) => op
                    .in_context(self.parent().map(|p| p.label()))
                    .apply(left.evaluate(x), right.evaluate(x)),
                None => 0.0,
            },

            Label::Log => self.operand().map_or(0.0, |inner| Float::ln(inner.evaluate(x))),
            Label::Parentheses => self.operand().map_or(0.0, |inner| inner.evaluate(x)),

            Label::Unknown(_) => 0.0,
        }
    }
}
