//! Removal of neutral operands, and of operators left with fewer than two operands.

use symdiff_parser::{Node, OpKind};
use crate::symbolic::{
    simplify::{rules::do_n_ary, step::Step},
    step_collector::StepCollector,
};

/// `a+0 = a`
/// `a-0 = a`
/// `a*1 = a`
/// `a/1 = a`
/// `a^1 = a`
///
/// The first operand of `-`, `/` and `^` is never removed, since the neutral element is only
/// neutral on the right.
pub fn remove_neutral(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_n_ary(node, |kind, operands| {
        let neutral = kind.neutral()?;
        let keep_first = matches!(kind, OpKind::Sub | OpKind::Div | OpKind::Power);
        let new_operands = operands.iter()
            .enumerate()
            .filter(|(i, operand)| (keep_first && *i == 0) || !operand.is_constant_approx(neutral))
            .map(|(_, operand)| operand.clone())
            .collect::<Vec<_>>();

        if new_operands.len() == operands.len() {
            None
        } else {
            Some(Node::op(kind.clone(), new_operands))
        }
    })?;

    step_collector.push(Step::RemoveNeutral);
    Some(opt)
}

/// `+(a) = a`
/// `+() = 0`
/// `*() = 1`
pub fn splice_up(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_n_ary(node, |kind, operands| match operands {
        [] => kind.neutral().map(Node::constant),
        [single] => Some(single.clone()),
        _ => None,
    })?;

    step_collector.push(Step::SpliceUp);
    Some(opt)
}

/// Removes neutral operands, then splices up the node if it has fewer than two operands left.
pub fn all(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let removed = remove_neutral(node, step_collector);
    let current = removed.as_ref().unwrap_or(node);
    splice_up(current, step_collector).or(removed)
}
