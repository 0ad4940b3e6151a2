//! Implementation of the simplification rules.
//!
//! Each rule in this module is a function that takes the node to simplify as an argument, and
//! returns `Some(node)` with the rewritten node if the rule applies, or `None` if it does not.
//! Rules only look at the node itself and its direct operands; the operands are simplified before
//! the rules run.

pub mod collect;
pub mod constant;
pub mod flatten;
pub mod fold;
pub mod identity;
pub mod short_circuit;

use symdiff_parser::{Node, OpKind};
use tracing::trace;
use crate::symbolic::step_collector::StepCollector;
use super::step::Step;

/// A simplification rule.
type Rule = fn(&Node, &mut dyn StepCollector<Step>) -> Option<Node>;

/// Every rule group, in the order they are applied during one pass.
const RULES: [(&str, Rule); 6] = [
    ("identity", identity::all),
    ("short circuit", short_circuit::all),
    ("evaluate", constant::evaluate),
    ("flatten", flatten::flatten),
    ("fold", fold::fold_constants),
    ("collect", collect::all),
];

/// If the node is an operator of the given kind, calls the given transformation function with
/// its operands.
///
/// Returns `Some(node)` with the transformed node if a transformation was applied.
pub(crate) fn do_op(
    node: &Node,
    kind: OpKind,
    f: impl FnOnce(&[Node]) -> Option<Node>,
) -> Option<Node> {
    match node {
        Node::Operator { kind: node_kind, children } if *node_kind == kind => f(children),
        _ => None,
    }
}

/// If the node is one of the n-ary arithmetic operators (`+`, `-`, `*`, `/`, `^`), calls the given
/// transformation function with its kind and operands.
///
/// Returns `Some(node)` with the transformed node if a transformation was applied.
pub(crate) fn do_n_ary(
    node: &Node,
    f: impl FnOnce(&OpKind, &[Node]) -> Option<Node>,
) -> Option<Node> {
    match node {
        Node::Operator { kind, children } if kind.is_n_ary() => f(kind, children),
        _ => None,
    }
}

/// Applies every rule once, in order, replacing the node each time a rule applies.
pub fn all(node: &mut Node, step_collector: &mut dyn StepCollector<Step>) {
    for (name, rule) in RULES {
        if let Some(rewritten) = rule(node, step_collector) {
            trace!(rule = name, from = %node, to = %rewritten, "rewrite");
            *node = rewritten;
        }
    }
}
