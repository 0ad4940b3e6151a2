use symdiff_parser::{Node, OpKind};
use crate::symbolic::{
    eval::eval,
    expr::ExprRef,
    simplify::step::Step,
    step_collector::StepCollector,
};

/// Replaces an arithmetic subtree that contains no variables with its value.
///
/// `3+4 = 7`
/// `sin(0)*2 = 0`
///
/// Evaluation follows IEEE-754 semantics, so `1/0` becomes infinity and `ln(0-1)` becomes NaN.
pub fn evaluate(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    if !node.op_kind().is_some_and(OpKind::is_arithmetic) || node.contains_variable() {
        return None;
    }

    let expr = ExprRef::try_from(node).ok()?;
    let value = eval(expr, &[]).ok()?;

    step_collector.push(Step::Evaluate);
    Some(Node::constant(value))
}
