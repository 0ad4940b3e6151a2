//! Symbolic differentiation.
//!
//! [`derivative`] applies the differentiation rules mechanically and never simplifies, so its
//! output is usually larger than necessary. Use [`derivative_simplified`] to get a readable result.

mod function;

use symdiff_parser::{Node, OpKind};
use tracing::trace;
use super::{expr::{ExprKind, ExprRef}, simplify::simplify};

/// Accumulates the factors of a product.
#[derive(Default)]
pub(crate) struct MulBuilder(Vec<Node>);

impl MulBuilder {
    pub(crate) fn mul(&mut self, factor: Node) {
        self.0.push(factor);
    }
}

impl From<MulBuilder> for Node {
    fn from(builder: MulBuilder) -> Self {
        if builder.0.is_empty() {
            Node::constant(1.0)
        } else {
            Node::op(OpKind::Mul, builder.0)
        }
    }
}

/// Accumulates the terms of a sum.
#[derive(Default)]
pub(crate) struct SumBuilder(Vec<Node>);

impl SumBuilder {
    pub(crate) fn add(&mut self, term: Node) {
        self.0.push(term);
    }
}

impl From<SumBuilder> for Node {
    fn from(builder: SumBuilder) -> Self {
        if builder.0.is_empty() {
            Node::constant(0.0)
        } else {
            Node::op(OpKind::Add, builder.0)
        }
    }
}

fn expr(node: &Node) -> ExprRef<'_> {
    ExprRef::new_unchecked(node)
}

/// `(a ± b ± ...)' = a' ± b' ± ...`
fn sum_rule(kind: OpKind, terms: &[Node], var: &str) -> Node {
    trace!(rule = "sum", terms = terms.len());
    Node::op(kind, terms.iter().map(|term| derivative(expr(term), var)).collect())
}

/// `(abc)' = a'bc + ab'c + abc'`
fn product_rule(factors: &[Node], var: &str) -> Node {
    trace!(rule = "product", factors = factors.len());
    let mut sum = SumBuilder::default();

    for i in 0..factors.len() {
        let mut product = MulBuilder::default();
        for (j, factor) in factors.iter().enumerate() {
            if i == j {
                product.mul(derivative(expr(factor), var));
            } else {
                product.mul(factor.clone());
            }
        }
        sum.add(product.into());
    }

    sum.into()
}

/// `(a / b)' = (a'b - ab') / b^2`
///
/// For `a / b / c / ...`, the numerator `a` is everything but the last operand.
fn quotient_rule(operands: &[Node], var: &str) -> Node {
    let Some((denominator, numerator)) = operands.split_last() else {
        return Node::constant(0.0);
    };
    let (numerator, numerator_derivative) = match numerator {
        [] => return derivative(expr(denominator), var),
        [single] => (single.clone(), derivative(expr(single), var)),
        _ => (Node::op(OpKind::Div, numerator.to_vec()), quotient_rule(numerator, var)),
    };
    trace!(rule = "quotient");

    let lhs = Node::op(OpKind::Mul, vec![numerator_derivative, denominator.clone()]);
    let rhs = Node::op(OpKind::Mul, vec![numerator, derivative(expr(denominator), var)]);
    Node::op(OpKind::Div, vec![
        Node::op(OpKind::Sub, vec![lhs, rhs]),
        Node::op(OpKind::Power, vec![denominator.clone(), Node::constant(2.0)]),
    ])
}

/// Differentiates `base ^ exponent`, where `base` may itself be a regrouped power.
///
/// A side of the power is treated as constant if it contains no variable at all, not only when it
/// doesn't contain `var`.
fn power_rule(operands: &[Node], var: &str) -> Node {
    let Some((exponent, base)) = operands.split_last() else {
        return Node::constant(0.0);
    };
    // regroup `a ^ b ^ c` into `(a ^ b) ^ c`
    let (base, base_derivative) = match base {
        [] => return derivative(expr(exponent), var),
        [single] => (single.clone(), None),
        _ => {
            let regrouped = base.iter()
                .skip(1)
                .fold(base[0].clone(), |acc, next| Node::op(OpKind::Power, vec![acc, next.clone()]));
            (regrouped, Some(power_rule(base, var)))
        },
    };
    let base_derivative = || base_derivative.clone().unwrap_or_else(|| derivative(expr(&base), var));
    let power = |exponent: Node| Node::op(OpKind::Power, vec![base.clone(), exponent]);
    let minus_one = || Node::op(OpKind::Sub, vec![exponent.clone(), Node::constant(1.0)]);
    let ln_base = || Node::op(OpKind::Ln, vec![base.clone()]);

    if !base.contains_variable() {
        // ln(b) * b^e * e'
        trace!(rule = "power", case = "constant base");
        Node::op(OpKind::Mul, vec![
            ln_base(),
            power(exponent.clone()),
            derivative(expr(exponent), var),
        ])
    } else if !exponent.contains_variable() {
        // e * b^(e-1) * b'
        trace!(rule = "power", case = "constant exponent");
        Node::op(OpKind::Mul, vec![exponent.clone(), power(minus_one()), base_derivative()])
    } else {
        // b^e * e' * ln(b) + b^(e-1) * e * b'
        trace!(rule = "power", case = "general");
        Node::op(OpKind::Add, vec![
            Node::op(OpKind::Mul, vec![
                power(exponent.clone()),
                derivative(expr(exponent), var),
                ln_base(),
            ]),
            Node::op(OpKind::Mul, vec![power(minus_one()), exponent.clone(), base_derivative()]),
        ])
    }
}

/// Computes the derivative of the expression with respect to the variable `var`.
///
/// The input is never modified; every subtree the result reuses is cloned. The result is not
/// simplified.
pub fn derivative(expr: ExprRef<'_>, var: &str) -> Node {
    match expr.kind() {
        ExprKind::Constant(_) => Node::constant(0.0),
        ExprKind::Variable(name) => Node::constant(if name == var { 1.0 } else { 0.0 }),
        ExprKind::Add(terms) => sum_rule(OpKind::Add, terms, var),
        ExprKind::Sub(terms) => sum_rule(OpKind::Sub, terms, var),
        ExprKind::Mul(factors) => product_rule(factors, var),
        ExprKind::Div(operands) => quotient_rule(operands, var),
        ExprKind::Power(operands) => power_rule(operands, var),
        ExprKind::Ln(arg) => function::ln(arg, var),
        ExprKind::Sin(arg) => function::sin(arg, var),
        ExprKind::Cos(arg) => function::cos(arg, var),
    }
}

/// Computes the derivative of the expression with respect to `var`, then simplifies it.
pub fn derivative_simplified(expr: ExprRef<'_>, var: &str) -> Node {
    let mut result = derivative(expr, var);
    simplify(&mut result);
    result
}

/// Computes the `n`th derivative of the expression with respect to `var`, simplifying after each
/// differentiation. The zeroth derivative is a copy of the expression.
pub fn nth_derivative(expr: ExprRef<'_>, var: &str, n: usize) -> Node {
    let mut result = expr.node().clone();
    for _ in 0..n {
        // the output of the differentiator and the simplifier is always an expression
        result = derivative_simplified(ExprRef::new_unchecked(&result), var);
    }
    result
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use symdiff_parser::Parser;
    use crate::symbolic::eval::eval;
    use super::*;

    fn parse(source: &str) -> Node {
        Parser::new(source).parse_expression().unwrap()
    }

    fn var(name: &str) -> Node {
        Node::variable(name)
    }

    fn num(value: f64) -> Node {
        Node::constant(value)
    }

    fn eval_x(node: &Node, x: f64) -> f64 {
        eval(ExprRef::try_from(node).unwrap(), &[("x", x), ("y", 0.75)]).unwrap()
    }

    fn finite_difference(node: &Node, x: f64) -> f64 {
        const DX: f64 = 1e-6;
        (eval_x(node, x + DX) - eval_x(node, x - DX)) / (2.0 * DX)
    }

    fn check_node(node: &Node, points: impl IntoIterator<Item = f64>) {
        let expr = ExprRef::try_from(node).unwrap();
        let raw = derivative(expr, "x");
        let simplified = derivative_simplified(expr, "x");

        for point in points {
            let numerical = finite_difference(node, point);
            assert_relative_eq!(eval_x(&raw, point), numerical, epsilon = 1e-4, max_relative = 1e-4);
            assert_relative_eq!(eval_x(&simplified, point), numerical, epsilon = 1e-4, max_relative = 1e-4);
        }
    }

    fn check(function: &str, points: impl IntoIterator<Item = f64>) {
        check_node(&parse(function), points);
    }

    #[test]
    fn constant() {
        assert_eq!(derivative(ExprRef::try_from(&num(5.0)).unwrap(), "x"), num(0.0));
    }

    #[test]
    fn variables() {
        assert_eq!(derivative(ExprRef::try_from(&var("x")).unwrap(), "x"), num(1.0));
        assert_eq!(derivative(ExprRef::try_from(&var("y")).unwrap(), "x"), num(0.0));
    }

    #[test]
    fn product_of_two() {
        let node = parse("(x*x)$");
        assert_eq!(derivative(ExprRef::try_from(&node).unwrap(), "x"), Node::op(OpKind::Add, vec![
            Node::op(OpKind::Mul, vec![num(1.0), var("x")]),
            Node::op(OpKind::Mul, vec![var("x"), num(1.0)]),
        ]));
    }

    #[test]
    fn product_of_two_simplified() {
        let node = parse("(x*x)$");
        assert_eq!(
            derivative_simplified(ExprRef::try_from(&node).unwrap(), "x"),
            Node::op(OpKind::Mul, vec![var("x"), num(2.0)]),
        );
    }

    #[test]
    fn input_is_not_modified() {
        let node = parse("sin(x) * x ^ 2 / ln(x)$");
        let before = node.clone();
        derivative_simplified(ExprRef::try_from(&node).unwrap(), "x");
        assert_eq!(node, before);
    }

    #[test]
    fn sub_keeps_kind() {
        let node = parse("x - y - 3$");
        assert_eq!(
            derivative(ExprRef::try_from(&node).unwrap(), "x"),
            Node::op(OpKind::Sub, vec![num(1.0), num(0.0), num(0.0)]),
        );
    }

    #[test]
    fn constant_base_power() {
        let node = parse("2 ^ x$");
        assert_eq!(derivative(ExprRef::try_from(&node).unwrap(), "x"), Node::op(OpKind::Mul, vec![
            Node::op(OpKind::Ln, vec![num(2.0)]),
            Node::op(OpKind::Power, vec![num(2.0), var("x")]),
            num(1.0),
        ]));
    }

    #[test]
    fn constant_exponent_power() {
        let node = parse("x ^ (1 + 1)$");
        assert_eq!(derivative(ExprRef::try_from(&node).unwrap(), "x"), Node::op(OpKind::Mul, vec![
            Node::op(OpKind::Add, vec![num(1.0), num(1.0)]),
            Node::op(OpKind::Power, vec![
                var("x"),
                Node::op(OpKind::Sub, vec![Node::op(OpKind::Add, vec![num(1.0), num(1.0)]), num(1.0)]),
            ]),
            num(1.0),
        ]));
    }

    #[test]
    fn partial_derivative() {
        let node = parse("x * y + y$");
        let expr = ExprRef::try_from(&node).unwrap();
        assert_eq!(derivative_simplified(expr, "y"), Node::op(OpKind::Add, vec![var("x"), num(1.0)]));
        assert_eq!(derivative_simplified(expr, "z"), num(0.0));
    }

    #[test]
    fn power_rule() {
        check("x^2 + x + 1$", [0.0, 1.0, 2.0, 5.0, 8.0]);
        check("x * x * x$", [-2.0, 0.5, 3.0]);
    }

    #[test]
    fn quotient() {
        check("ln(x) / x$", [0.5, 1.0, 4.0]);
        check("x / (x + 1) / 2$", [0.0, 1.5, 7.0]);
        check("1 / x / x / (x + 2)$", [0.5, 2.0]);
    }

    #[test]
    fn general_power() {
        check("x ^ x$", [0.5, 1.0, 2.5]);
        check("2 ^ (x * y)$", [-1.0, 0.0, 2.0]);
        check("(x + 1) ^ sin(x)$", [0.2, 1.0, 3.0]);
    }

    #[test]
    fn n_ary_power() {
        let node = Node::op(OpKind::Power, vec![var("x"), num(2.0), num(3.0)]);
        check_node(&node, [0.5, 1.0, 1.5]);

        let node = Node::op(OpKind::Power, vec![var("x"), var("x"), num(2.0)]);
        check_node(&node, [0.5, 1.0, 1.5]);
    }

    #[test]
    fn trigonometry() {
        check("sin(x) * cos(x)$", [0.0, 1.0, 2.0]);
        check("sin(x * x) - cos(2 * x)$", [-1.0, 0.3, 2.0]);
        check("ln(sin(x) + 2)$", [0.0, 1.0, 4.0]);
    }

    #[test]
    fn second_derivative() {
        let node = parse("x ^ 3 + sin(x)$");
        let second = nth_derivative(ExprRef::try_from(&node).unwrap(), "x", 2);
        for x in [-1.0, 0.0, 2.0] {
            assert_relative_eq!(eval_x(&second, x), 6.0 * x - f64::sin(x), epsilon = 1e-9);
        }
    }

    #[test]
    fn zeroth_derivative() {
        let node = parse("x + 1$");
        assert_eq!(nth_derivative(ExprRef::try_from(&node).unwrap(), "x", 0), node);
    }
}
