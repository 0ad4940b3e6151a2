//! Numeric evaluation of expressions.

use std::fmt;
use symdiff_parser::Node;
use super::expr::{ExprKind, ExprRef};

/// A variable had no value bound to it during evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnboundVariable {
    pub name: String,
}

impl fmt::Display for UnboundVariable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "no value was given for the variable `{}`", self.name)
    }
}

impl std::error::Error for UnboundVariable {}

/// Folds the operands of a left-associated operator with `op`.
fn fold_left(
    children: &[Node],
    bindings: &[(&str, f64)],
    op: impl Fn(f64, f64) -> f64,
) -> Result<f64, UnboundVariable> {
    let mut operands = children.iter().map(|child| eval(ExprRef::new_unchecked(child), bindings));
    let first = operands.next().transpose()?.unwrap_or(f64::NAN);
    operands.try_fold(first, |acc, value| -> Result<f64, UnboundVariable> { Ok(op(acc, value?)) })
}

/// Evaluates the expression with IEEE-754 double semantics, looking variables up in `bindings`.
///
/// Division by zero and the logarithm of a negative number produce infinities and NaN instead of
/// errors. The only error is a variable that is not in `bindings`.
pub fn eval(expr: ExprRef<'_>, bindings: &[(&str, f64)]) -> Result<f64, UnboundVariable> {
    Ok(match expr.kind() {
        ExprKind::Constant(value) => value,
        ExprKind::Variable(name) => bindings
            .iter()
            .find(|(bound, _)| *bound == name)
            .map(|(_, value)| *value)
            .ok_or_else(|| UnboundVariable { name: name.to_owned() })?,
        ExprKind::Add(children) => fold_left(children, bindings, |a, b| a + b)?,
        ExprKind::Sub(children) => fold_left(children, bindings, |a, b| a - b)?,
        ExprKind::Mul(children) => fold_left(children, bindings, |a, b| a * b)?,
        ExprKind::Div(children) => fold_left(children, bindings, |a, b| a / b)?,
        ExprKind::Power(children) => fold_left(children, bindings, f64::powf)?,
        ExprKind::Ln(arg) => eval(arg, bindings)?.ln(),
        ExprKind::Sin(arg) => eval(arg, bindings)?.sin(),
        ExprKind::Cos(arg) => eval(arg, bindings)?.cos(),
    })
}
