//! Symbolic derivatives of the builtin functions. Each one performs the chain rule.

use symdiff_parser::{Node, OpKind};
use tracing::trace;
use crate::symbolic::expr::ExprRef;
use super::{derivative, MulBuilder};

/// `d/dv ln(x) = (1/x) * x'`
pub(super) fn ln(arg: ExprRef<'_>, var: &str) -> Node {
    trace!(rule = "ln", "chain rule");
    let mut product = MulBuilder::default();
    product.mul(Node::op(OpKind::Div, vec![Node::constant(1.0), arg.node().clone()]));
    product.mul(derivative(arg, var));
    product.into()
}

/// `d/dv sin(x) = cos(x) * x'`
pub(super) fn sin(arg: ExprRef<'_>, var: &str) -> Node {
    trace!(rule = "sin", "chain rule");
    let mut product = MulBuilder::default();
    product.mul(Node::op(OpKind::Cos, vec![arg.node().clone()]));
    product.mul(derivative(arg, var));
    product.into()
}

/// `d/dv cos(x) = -1 * sin(x) * x'`
pub(super) fn cos(arg: ExprRef<'_>, var: &str) -> Node {
    trace!(rule = "cos", "chain rule");
    let mut product = MulBuilder::default();
    product.mul(Node::constant(-1.0));
    product.mul(Node::op(OpKind::Sin, vec![arg.node().clone()]));
    product.mul(derivative(arg, var));
    product.into()
}
