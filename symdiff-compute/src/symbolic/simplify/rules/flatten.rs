use symdiff_parser::{Node, OpKind};
use crate::symbolic::{
    simplify::{rules::do_n_ary, step::Step},
    step_collector::StepCollector,
};

/// Returns true if `operand`, found at `index` among the operands of a `kind` node, can have its
/// own operands inlined into the parent.
fn can_inline(kind: &OpKind, index: usize, operand: &Node) -> bool {
    match kind {
        OpKind::Add | OpKind::Mul => operand.is_op(kind),
        OpKind::Sub => index > 0 && operand.is_op(&OpKind::Add),
        OpKind::Power => index == 0 && operand.is_op(&OpKind::Power),
        _ => false,
    }
}

/// Inlines operands that are associative with their parent.
///
/// `a+(b+c) = a+b+c`
/// `a*(b*c) = a*b*c`
/// `a-(b+c) = a-b-c`
/// `(a^b)^c = a^b^c`
pub fn flatten(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_n_ary(node, |kind, operands| {
        if !operands.iter().enumerate().any(|(i, operand)| can_inline(kind, i, operand)) {
            return None;
        }

        let mut new_operands = Vec::with_capacity(operands.len());
        for (i, operand) in operands.iter().enumerate() {
            if can_inline(kind, i, operand) {
                new_operands.extend_from_slice(operand.children());
            } else {
                new_operands.push(operand.clone());
            }
        }
        Some(Node::op(kind.clone(), new_operands))
    })?;

    step_collector.push(Step::Flatten);
    Some(opt)
}
