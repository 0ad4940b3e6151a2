//! Identities that collapse a whole operator into a constant because of a single operand.
//!
//! `0/a = 0` is applied even when `a` could be zero.

use symdiff_parser::{Node, OpKind};
use crate::symbolic::{
    simplify::{rules::do_op, step::Step},
    step_collector::StepCollector,
};

/// `a^0 = 1`
/// `a^b^0 = 1`
///
/// Checked before `0^a`, so `0^0 = 1`.
pub fn power_zero(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_op(node, OpKind::Power, |operands| {
        operands.iter()
            .skip(1)
            .any(|exponent| exponent.is_constant_approx(0.0))
            .then(|| Node::constant(1.0))
    })?;

    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `0^a = 0`
pub fn zero_power(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_op(node, OpKind::Power, |operands| {
        operands.first()
            .filter(|base| base.is_constant_approx(0.0))
            .map(|_| Node::constant(0.0))
    })?;

    step_collector.push(Step::ZeroPower);
    Some(opt)
}

/// `0/a = 0`
pub fn divide_zero(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_op(node, OpKind::Div, |operands| {
        operands.first()
            .filter(|dividend| dividend.is_constant_approx(0.0))
            .map(|_| Node::constant(0.0))
    })?;

    step_collector.push(Step::DivideZero);
    Some(opt)
}

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_op(node, OpKind::Mul, |factors| {
        factors.iter()
            .any(|factor| factor.is_constant_approx(0.0))
            .then(|| Node::constant(0.0))
    })?;

    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// Applies the first short-circuit identity that matches.
pub fn all(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    power_zero(node, step_collector)
        .or_else(|| zero_power(node, step_collector))
        .or_else(|| divide_zero(node, step_collector))
        .or_else(|| multiply_zero(node, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Node {
        Node::variable("x")
    }

    #[test]
    fn zero_to_the_zero() {
        let node = Node::op(OpKind::Power, vec![Node::constant(0.0), Node::constant(0.0)]);
        let mut steps = Vec::new();
        assert_eq!(all(&node, &mut steps), Some(Node::constant(1.0)));
        assert_eq!(steps, vec![Step::PowerZero]);
    }

    #[test]
    fn any_exponent_position() {
        let node = Node::op(OpKind::Power, vec![x(), Node::constant(0.0), x()]);
        assert_eq!(all(&node, &mut ()), Some(Node::constant(1.0)));
    }

    #[test]
    fn zero_base() {
        let node = Node::op(OpKind::Power, vec![Node::constant(0.0), x()]);
        assert_eq!(all(&node, &mut ()), Some(Node::constant(0.0)));
    }

    #[test]
    fn zero_dividend() {
        let node = Node::op(OpKind::Div, vec![Node::constant(0.0), x()]);
        assert_eq!(all(&node, &mut ()), Some(Node::constant(0.0)));

        // only the dividend short-circuits
        let node = Node::op(OpKind::Div, vec![x(), Node::constant(0.0)]);
        assert_eq!(all(&node, &mut ()), None);
    }

    #[test]
    fn zero_factor() {
        let node = Node::op(OpKind::Mul, vec![x(), Node::op(OpKind::Sin, vec![x()]), Node::constant(-0.0)]);
        let mut steps = Vec::new();
        assert_eq!(all(&node, &mut steps), Some(Node::constant(0.0)));
        assert_eq!(steps, vec![Step::MultiplyZero]);
    }

    #[test]
    fn zero_term_is_not_short_circuited() {
        let node = Node::op(OpKind::Add, vec![x(), Node::constant(0.0)]);
        assert_eq!(all(&node, &mut ()), None);
    }
}
