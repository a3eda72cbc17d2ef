use approx::{assert_abs_diff_eq, assert_relative_eq};
use num_traits::Float;

use crate::{Differentiator, Evaluable, Expression, Label, Unrefined};

#[test]
fn test_leaves() {
    assert_eq!(parsed!("x").differentiate().convert_to_string(0), lines!("1"));
    assert_eq!(parsed!("5").differentiate().convert_to_string(0), lines!("0"));
    assert_eq!(parsed!("-2.5e3").differentiate().convert_to_string(0), lines!("0"));
}

#[test]
fn test_rule_shapes() {
    assert_eq!(
        parsed!("x*x").differentiate().convert_to_string(0),
        lines!("+", "\t*", "\t\t1", "\t\tx", "\t*", "\t\tx", "\t\t1"),
    );

    assert_eq!(
        parsed!("x^3").differentiate().convert_to_string(0),
        lines!("*", "\t*", "\t\t1", "\t\t^", "\t\t\tx", "\t\t\t-", "\t\t\t\t3.0", "\t\t\t\t1", "\t3.0"),
    );

    assert_eq!(parsed!("(x)").differentiate().convert_to_string(0), lines!("()", "\t1"));
}

#[test]
fn test_basic_rules() {
    assert_eq!(derivative_at!("x*x", 3.0), 6.0);
    assert_eq!(derivative_at!("x^3", 2.0), 12.0);
    assert_eq!(derivative_at!("2*x+5*x*x", 1.0), 12.0);
    assert_eq!(derivative_at!("x+7", 100.0), 1.0);
    assert_eq!(derivative_at!("3*x-4", -8.0), 3.0);

    assert_relative_eq!(derivative_at!("2^x", 1.0), 2.0 * Float::ln(2.0f64), epsilon = 1e-12);
    assert_relative_eq!(derivative_at!("log(x)", 2.0), 0.5);
    assert_relative_eq!(derivative_at!("log(x^2)", 3.0), 2.0 / 3.0, epsilon = 1e-12);
}

#[test]
fn test_quotient_rule() {
    for x in [0.0, 0.5, 1.0, 2.0, -3.0, 10.0].iter() {
        let expected = 1.0 / ((x + 1.0) * (x + 1.0));
        assert_relative_eq!(derivative_at!("x/(x+1)", *x), expected, epsilon = 1e-12);
    }

    assert_relative_eq!(derivative_at!("1/x", 2.0), -0.25);
}

#[test]
fn test_context_is_respected() {
    assert_eq!(derivative_at!("x-x*x", 3.0), -5.0);
    assert_eq!(derivative_at!("x-x-x", 7.0), -1.0);
    assert_eq!(derivative_at!("x-2*x+x*x", 2.0), 3.0);
    assert_eq!(derivative_at!("10-x+x", 4.0), 0.0);
    assert_abs_diff_eq!(derivative_at!("12/x*2", 2.0), -6.0, epsilon = 1e-12);

    // Differentiating a subtree in place sees the operator its parent makes it apply
    let tree = parsed!("10-x-x");
    let inner = tree.root().child(1).unwrap();
    assert_eq!(inner.differentiate().evaluate(0.0), 2.0);
    assert_eq!(inner.deep_copy().differentiate().evaluate(0.0), 0.0);
}

#[test]
fn test_higher_derivatives() {
    let first = parsed!("x^3").differentiate();
    let second = first.differentiate();
    let third = second.differentiate();

    assert_eq!(second.evaluate(2.0), 12.0);
    assert_eq!(second.evaluate(-1.0), -6.0);
    assert_eq!(third.evaluate(5.0), 6.0);
}

#[test]
fn test_unrefined_branches() {
    let mut differentiator = Differentiator::new();
    let power = parsed!("x^x");
    let derivative = differentiator.differentiate(power.root());
    assert_eq!(derivative.evaluate(3.0), 0.0);
    assert_eq!(differentiator.unrefined(), &[Unrefined::NonConstantPower]);

    let unknown = parsed!("y");
    differentiator.differentiate(unknown.root());
    assert_eq!(
        differentiator.into_unrefined(),
        [Unrefined::NonConstantPower, Unrefined::UnknownLabel("y".into())],
    );

    // Malformed trees differentiate to zero too
    let mut differentiator = Differentiator::new();
    let bare = Expression::new(Label::Log);
    assert_eq!(differentiator.differentiate(bare.root()).evaluate(1.0), 0.0);
    assert_eq!(differentiator.unrefined(), &[Unrefined::MalformedArity(Label::Log)]);

    // An unrecognised leaf is never treated as a constant operand of `^`
    for text in ["y^x", "x^y"].iter() {
        let mut differentiator = Differentiator::new();
        let power = parsed!(text);
        let derivative = differentiator.differentiate(power.root());
        assert_eq!(derivative.convert_to_string(0), lines!("0"));
        assert_eq!(derivative.evaluate(0.0), 0.0);
        assert_eq!(derivative.evaluate(2.0), 0.0);
        assert_eq!(differentiator.unrefined(), &[Unrefined::NonConstantPower]);
    }

    // Constant powers have an exact derivative
    let mut differentiator = Differentiator::new();
    let constant = parsed!("2^3");
    assert_eq!(differentiator.differentiate(constant.root()).convert_to_string(0), lines!("0"));
    let square = parsed!("x^2");
    differentiator.differentiate(square.root());
    assert!(differentiator.unrefined().is_empty());
}

#[test]
fn test_derivatives_are_independent() {
    let tree = parsed!("x*x+log(x)");
    let original = tree.convert_to_string(0);

    let mut first = tree.differentiate();
    let second = tree.differentiate();
    assert_eq!(first.convert_to_string(0), second.convert_to_string(0));

    let root = first.root().id();
    first.add_subexpression_to(root, Expression::new(Label::Variable)).unwrap();

    assert_ne!(first.convert_to_string(0), second.convert_to_string(0));
    assert_eq!(tree.convert_to_string(0), original);
    assert_eq!(tree.differentiate().convert_to_string(0), second.convert_to_string(0));
}
