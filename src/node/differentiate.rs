//! Symbolic differentiation with respect to `x`.
//!
//! The derivative of a node is always a brand new tree. Whenever a rule needs an operand of the
//! original expression verbatim (the `h` in `g'h + gh'`), it takes a fresh deep copy for that one
//! use, so no node is shared between the input, the output, or any two outputs.
//!
//! Parsed trees depend on context: a node's operator may be inverted by its parent's label (see
//! [BinaryOp::in_context]). Before any rule is applied, the subtree is therefore copied in a
//! resolved form, where each operator node is relabelled with the operator it actually applies and
//! a child is wrapped in a `()` node wherever its new parent would invert it. Results are built
//! with the same wrapping, so a derivative means the same thing standalone as when it is attached
//! under another node. For trees without inversions, the resolved copy is an exact deep copy.

use alloc::{string::String, vec::Vec};
use log::debug;

use super::{label::{BinaryOp, Label}, tree::{Expression, NodeRef}};

/// A branch where no differentiation rule applies, and the constant `0` was produced in place of
/// a real derivative.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Unrefined {
    /// A power where neither the base nor the exponent is a constant, such as `x^x` or `y^x`.
    NonConstantPower,

    /// A leaf whose label is not recognised.
    UnknownLabel(String),

    /// An operator node with the wrong number of children.
    MalformedArity(Label),
}

/// Differentiates nodes, keeping a record of every [Unrefined] branch taken along the way.
#[derive(Debug, Default)]
pub struct Differentiator {
    unrefined: Vec<Unrefined>,
}

impl Differentiator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new tree for the derivative of the subtree rooted at `node`, interpreted in the
    /// context of its parent.
    pub fn differentiate(&mut self, node: NodeRef) -> Expression {
        let resolved = resolve(node, node.parent().map(|p| p.label()));
        self.derive(resolved.root())
    }

    /// The unrefined branches taken by every differentiation so far, in the order they were
    /// encountered.
    pub fn unrefined(&self) -> &[Unrefined] {
        &self.unrefined
    }

    pub fn into_unrefined(self) -> Vec<Unrefined> {
        self.unrefined
    }

    fn unrefined_zero(&mut self, reason: Unrefined) -> Expression {
        debug!("no differentiation rule for {:?}, using 0", reason);
        self.unrefined.push(reason);
        constant("0")
    }

    /// Differentiates a node of a resolved tree.
    fn derive(&mut self, node: NodeRef) -> Expression {
        match node.label() {
            Label::Variable => constant("1"),
            Label::Literal(_) => constant("0"),
            Label::Unknown(name) => self.unrefined_zero(Unrefined::UnknownLabel(name.clone())),

            Label::Binary(op) => match node.operands() {
                Some((left, right)) => self.derive_binary(*op, left, right),
                None => self.unrefined_zero(Unrefined::MalformedArity(node.label().clone())),
            },

            // (g)' = (g')
            Label::Parentheses => match node.operand() {
                Some(inner) => Expression::unary(Label::Parentheses, self.derive(inner)),
                None => self.unrefined_zero(Unrefined::MalformedArity(Label::Parentheses)),
            },

            // log(g)' = g' / g
            Label::Log => match node.operand() {
                Some(inner) => combine(BinaryOp::Divide, self.derive(inner), inner.deep_copy()),
                None => self.unrefined_zero(Unrefined::MalformedArity(Label::Log)),
            },
        }
    }

    fn derive_binary(&mut self, op: BinaryOp, left: NodeRef, right: NodeRef) -> Expression {
        match op {
            BinaryOp::Add | BinaryOp::Subtract => combine(op, self.derive(left), self.derive(right)),

            // (gh)' = g'h + gh'
            BinaryOp::Multiply => combine(
                BinaryOp::Add,
                combine(BinaryOp::Multiply, self.derive(left), right.deep_copy()),
                combine(BinaryOp::Multiply, left.deep_copy(), self.derive(right)),
            ),

            // (g/h)' = (g'h - gh') / h^2
            BinaryOp::Divide => combine(
                BinaryOp::Divide,
                combine(
                    BinaryOp::Subtract,
                    combine(BinaryOp::Multiply, self.derive(left), right.deep_copy()),
                    combine(BinaryOp::Multiply, left.deep_copy(), self.derive(right)),
                ),
                combine(BinaryOp::Power, right.deep_copy(), constant("2")),
            ),

            BinaryOp::Power => match (is_constant(left), is_constant(right)) {
                (true, true) => constant("0"),

                // (b^h)' = h' * b^h * log(b)
                (true, false) => combine(
                    BinaryOp::Multiply,
                    combine(
                        BinaryOp::Multiply,
                        self.derive(right),
                        combine(BinaryOp::Power, left.deep_copy(), right.deep_copy()),
                    ),
                    Expression::unary(Label::Log, left.deep_copy()),
                ),

                // (g^n)' = g' * g^(n-1) * n
                (false, true) => combine(
                    BinaryOp::Multiply,
                    combine(
                        BinaryOp::Multiply,
                        self.derive(left),
                        combine(
                            BinaryOp::Power,
                            left.deep_copy(),
                            combine(BinaryOp::Subtract, right.deep_copy(), constant("1")),
                        ),
                    ),
                    right.deep_copy(),
                ),

                (false, false) => self.unrefined_zero(Unrefined::NonConstantPower),
            },
        }
    }
}

impl NodeRef<'_> {
    /// Returns a new, fully independent tree for the derivative of the subtree rooted at this
    /// node. Never fails; see [Differentiator] to find out whether any rule was missing.
    pub fn differentiate(&self) -> Expression {
        Differentiator::new().differentiate(*self)
    }
}

impl Expression {
    /// Returns a new, fully independent tree for the derivative of this expression.
    pub fn differentiate(&self) -> Expression {
        self.root().differentiate()
    }
}

fn constant(text: &str) -> Expression {
    Expression::new(Label::from(text))
}

/// Builds an `op` node, wrapping either operand in `()` if `op` would otherwise invert it.
fn combine(op: BinaryOp, left: Expression, right: Expression) -> Expression {
    let parent = Label::Binary(op);
    Expression::binary(op, shield(left, &parent), shield(right, &parent))
}

fn shield(expression: Expression, parent: &Label) -> Expression {
    if expression.label().flips_under(parent) {
        Expression::unary(Label::Parentheses, expression)
    } else {
        expression
    }
}

/// Copies the subtree at `node`, which is evaluated under a parent labelled `context`, into a
/// standalone tree in which no operator is inverted by its parent.
fn resolve(node: NodeRef, context: Option<&Label>) -> Expression {
    let label = node.label();
    match (label, node.operands()) {
        (Label::Binary(op), Some((left, right))) => combine(
            op.in_context(context),
            resolve(left, Some(label)),
            resolve(right, Some(label)),
        ),

        _ => {
            let mut copy = Expression::new(label.clone());
            for child in node.children() {
                copy.add_subexpression(resolve(child, Some(label)));
            }
            copy
        }
    }
}

/// Returns true if the subtree at `node` does not depend on `x`. Numeric literals are the usual
/// case, but this also accepts constant expressions such as the `3-1` exponent which appears when
/// `x^3` is differentiated twice. An unrecognised leaf means nothing, so it is never a constant.
fn is_constant(node: NodeRef) -> bool {
    match node.label() {
        Label::Variable | Label::Unknown(_) => false,
        _ => node.children().all(is_constant),
    }
}
