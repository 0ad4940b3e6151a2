use symdiff_parser::{Node, OpKind};
use crate::symbolic::{
    simplify::{rules::do_n_ary, step::Step},
    step_collector::StepCollector,
};

/// Replaces every constant operand with a single constant holding the combination of all of them.
/// The new constant takes the place of the first constant operand.
fn fold_all(kind: &OpKind, operands: &[Node], combine: fn(f64, f64) -> f64) -> Option<Node> {
    let total = operands.iter().filter_map(Node::value).reduce(combine)?;
    let mut placed = false;
    let new_operands = operands.iter()
        .filter_map(|operand| match operand.value() {
            Some(_) if placed => None,
            Some(_) => {
                placed = true;
                Some(Node::constant(total))
            },
            None => Some(operand.clone()),
        })
        .collect();
    Some(Node::op(kind.clone(), new_operands))
}

/// Folds the constants of a left-associated operator whose first operand is special, such as the
/// minuend of a subtraction.
///
/// The constants after the first operand are combined with `combine` (e.g. summed for `-`). If the
/// first operand is a constant too, the combined value is applied to it with `apply`. Otherwise,
/// the combined value is kept as the first constant operand after the first.
fn fold_right(
    kind: &OpKind,
    operands: &[Node],
    combine: fn(f64, f64) -> f64,
    apply: fn(f64, f64) -> f64,
) -> Option<Node> {
    let (first, rest) = operands.split_first()?;
    let combined = rest.iter().filter_map(Node::value).reduce(combine)?;

    match first.value() {
        Some(first_value) => {
            let mut new_operands = vec![Node::constant(apply(first_value, combined))];
            new_operands.extend(rest.iter().filter(|operand| operand.value().is_none()).cloned());
            Some(Node::op(kind.clone(), new_operands))
        },
        None => {
            let folded = fold_all(kind, rest, combine)?;
            let mut new_operands = vec![first.clone()];
            new_operands.extend(folded.children().iter().cloned());
            Some(Node::op(kind.clone(), new_operands))
        },
    }
}

/// Folds constant operands of an operator with three or more operands, at least two of which are
/// constants.
///
/// `2+a+3 = 5+a`
/// `2*a*3 = 6*a`
/// `10-a-2 = 8-a`
/// `a-2-b-3 = a-5-b`
/// `12/a/2 = 6/a`
/// `a/2/b/3 = a/6/b`
/// `a^2^3 = a^6`
pub fn fold_constants(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_n_ary(node, |kind, operands| {
        let constants = operands.iter().filter(|operand| operand.value().is_some()).count();
        if operands.len() < 3 || constants < 2 {
            return None;
        }

        match kind {
            OpKind::Add => fold_all(kind, operands, |a, b| a + b),
            OpKind::Mul => fold_all(kind, operands, |a, b| a * b),
            OpKind::Sub => fold_right(kind, operands, |a, b| a + b, |a, b| a - b),
            OpKind::Div => fold_right(kind, operands, |a, b| a * b, |a, b| a / b),
            OpKind::Power => {
                // `(a^b)^c = a^(b*c)`, so only the exponents are multiplied
                let (base, exponents) = operands.split_first()?;
                if exponents.iter().filter(|exponent| exponent.value().is_some()).count() < 2 {
                    return None;
                }
                let folded = fold_all(kind, exponents, |a, b| a * b)?;
                let mut new_operands = vec![base.clone()];
                new_operands.extend(folded.children().iter().cloned());
                Some(Node::op(kind.clone(), new_operands))
            },
            _ => None,
        }
    })?;

    step_collector.push(Step::FoldConstants);
    Some(opt)
}
