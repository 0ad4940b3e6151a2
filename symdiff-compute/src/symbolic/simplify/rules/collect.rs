//! Collection of like terms and factors involving a single variable.
//!
//! A linear term is a bare variable `v` (coefficient 1), or a product of exactly a variable and a
//! constant, `v*c` or `c*v`. Merged terms are always emitted in normal form: `0`, `v`, or `v*c`.

use symdiff_parser::{Node, OpKind};
use crate::{
    approx::{is_one, is_zero},
    symbolic::{
        simplify::{rules::do_op, step::Step},
        step_collector::StepCollector,
    },
};

/// Returns the variable and coefficient of a linear term.
fn linear_term(node: &Node) -> Option<(&str, f64)> {
    match node {
        Node::Variable(name) => Some((name.as_str(), 1.0)),
        Node::Operator { kind: OpKind::Mul, children } => match children.as_slice() {
            [Node::Variable(name), Node::Constant(coefficient)]
            | [Node::Constant(coefficient), Node::Variable(name)] => Some((name.as_str(), *coefficient)),
            _ => None,
        },
        _ => None,
    }
}

/// Builds the normal form of `var * coefficient`.
fn normal_form(var: &str, coefficient: f64) -> Node {
    if is_zero(coefficient) {
        Node::constant(0.0)
    } else if is_one(coefficient) {
        Node::variable(var)
    } else {
        Node::op(OpKind::Mul, vec![Node::variable(var), Node::constant(coefficient)])
    }
}

/// The linear terms sharing one variable.
struct Group<'a> {
    var: &'a str,
    coefficient: f64,
    count: usize,
    emitted: bool,
}

/// Groups the linear terms among `terms` by variable, in order of first appearance.
fn group<'a>(terms: impl IntoIterator<Item = &'a Node>) -> Vec<Group<'a>> {
    let mut groups: Vec<Group> = Vec::new();
    for (var, coefficient) in terms.into_iter().filter_map(linear_term) {
        match groups.iter_mut().find(|group| group.var == var) {
            Some(group) => {
                group.coefficient += coefficient;
                group.count += 1;
            },
            None => groups.push(Group { var, coefficient, count: 1, emitted: false }),
        }
    }
    groups
}

/// Merges the linear terms of every variable that appears more than once. The merged term takes
/// the place of the first term of its group.
///
/// Returns [`None`] if no variable appears more than once.
fn merge<'a>(terms: impl IntoIterator<Item = &'a Node> + Clone) -> Option<Vec<Node>> {
    let mut groups = group(terms.clone());
    if groups.iter().all(|group| group.count < 2) {
        return None;
    }

    let mut merged = Vec::new();
    for term in terms {
        let group = match linear_term(term) {
            Some((var, _)) => groups.iter_mut().find(|group| group.var == var && group.count > 1),
            None => None,
        };
        match group {
            Some(group) if group.emitted => (),
            Some(group) => {
                group.emitted = true;
                merged.push(normal_form(group.var, group.coefficient));
            },
            None => merged.push(term.clone()),
        }
    }
    Some(merged)
}

/// `a+a = a*2`
/// `a*2+b+a*3 = a*5+b`
/// `a+a*(-1) = 0`
pub fn combine_like_terms(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_op(node, OpKind::Add, |terms| {
        merge(terms).map(|merged| Node::op(OpKind::Add, merged))
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// `a*3-a = a*2`
/// `a-a = 0`
/// `b-a-2-a = b-a*2-2`
///
/// If the first operand is a linear term, every subtrahend with the same variable is merged into
/// it. Then, subtrahends sharing a variable are merged and placed right after the first operand.
pub fn subtract_like_terms(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_op(node, OpKind::Sub, |operands| {
        let (first, subtrahends) = operands.split_first()?;
        let mut changed = false;
        let mut new_first = first.clone();
        let mut remaining = subtrahends.iter().collect::<Vec<_>>();

        if let Some((var, mut coefficient)) = linear_term(first) {
            let before = remaining.len();
            remaining.retain(|subtrahend| match linear_term(subtrahend) {
                Some((other, other_coefficient)) if other == var => {
                    coefficient -= other_coefficient;
                    false
                },
                _ => true,
            });
            if remaining.len() != before {
                new_first = normal_form(var, coefficient);
                changed = true;
            }
        }

        let mut groups = group(remaining.iter().copied());
        groups.retain(|group| group.count > 1);
        changed |= !groups.is_empty();
        if !changed {
            return None;
        }

        let mut new_operands = vec![new_first];
        new_operands.extend(groups.iter().map(|group| normal_form(group.var, group.coefficient)));
        new_operands.extend(remaining.into_iter()
            .filter(|subtrahend| {
                linear_term(subtrahend)
                    .map(|(var, _)| !groups.iter().any(|group| group.var == var))
                    .unwrap_or(true)
            })
            .cloned());
        Some(Node::op(OpKind::Sub, new_operands))
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// `a*a = a^2`
/// `a*b*a*a = a^3*b`
pub fn combine_like_factors(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_op(node, OpKind::Mul, |factors| {
        let mut counts: Vec<(&str, usize, bool)> = Vec::new();
        for factor in factors {
            if let Node::Variable(var) = factor {
                match counts.iter_mut().find(|(name, ..)| *name == var.as_str()) {
                    Some((_, count, _)) => *count += 1,
                    None => counts.push((var.as_str(), 1, false)),
                }
            }
        }
        if counts.iter().all(|(_, count, _)| *count < 2) {
            return None;
        }

        let mut new_factors = Vec::new();
        for factor in factors {
            let repeated = match factor {
                Node::Variable(var) => counts.iter_mut().find(|(name, count, _)| *name == var.as_str() && *count > 1),
                _ => None,
            };
            match repeated {
                Some((_, _, true)) => (),
                Some((name, count, emitted)) => {
                    *emitted = true;
                    new_factors.push(Node::op(OpKind::Power, vec![
                        Node::variable(*name),
                        Node::constant(*count as f64),
                    ]));
                },
                None => new_factors.push(factor.clone()),
            }
        }
        Some(Node::op(OpKind::Mul, new_factors))
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// Applies the collection rule for the kind of the node.
pub fn all(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    combine_like_terms(node, step_collector)
        .or_else(|| subtract_like_terms(node, step_collector))
        .or_else(|| combine_like_factors(node, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn var(name: &str) -> Node {
        Node::variable(name)
    }

    fn num(value: f64) -> Node {
        Node::constant(value)
    }

    fn mul(a: Node, b: Node) -> Node {
        Node::op(OpKind::Mul, vec![a, b])
    }

    #[test]
    fn sum_of_same_variable() {
        let node = Node::op(OpKind::Add, vec![var("x"), var("x")]);
        let mut steps = Vec::new();
        assert_eq!(all(&node, &mut steps), Some(Node::op(OpKind::Add, vec![mul(var("x"), num(2.0))])));
        assert_eq!(steps, vec![Step::CombineLikeTerms]);
    }

    #[test]
    fn coefficients_on_either_side() {
        let node = Node::op(OpKind::Add, vec![
            mul(var("a"), num(2.0)),
            var("b"),
            mul(num(3.0), var("a")),
            num(1.0),
        ]);
        assert_eq!(all(&node, &mut ()), Some(Node::op(OpKind::Add, vec![
            mul(var("a"), num(5.0)),
            var("b"),
            num(1.0),
        ])));
    }

    #[test]
    fn cancelling_terms() {
        let node = Node::op(OpKind::Add, vec![var("a"), mul(var("a"), num(-1.0))]);
        assert_eq!(all(&node, &mut ()), Some(Node::op(OpKind::Add, vec![num(0.0)])));
    }

    #[test]
    fn single_terms_are_kept() {
        let node = Node::op(OpKind::Add, vec![var("a"), mul(var("b"), num(2.0))]);
        assert_eq!(all(&node, &mut ()), None);
    }

    #[test]
    fn subtract_from_first() {
        let node = Node::op(OpKind::Sub, vec![mul(var("a"), num(3.0)), var("a")]);
        assert_eq!(all(&node, &mut ()), Some(Node::op(OpKind::Sub, vec![mul(var("a"), num(2.0))])));

        let node = Node::op(OpKind::Sub, vec![var("a"), var("b"), var("a")]);
        assert_eq!(all(&node, &mut ()), Some(Node::op(OpKind::Sub, vec![num(0.0), var("b")])));
    }

    #[test]
    fn repeated_subtrahends() {
        let node = Node::op(OpKind::Sub, vec![var("b"), var("a"), num(2.0), var("a")]);
        assert_eq!(all(&node, &mut ()), Some(Node::op(OpKind::Sub, vec![
            var("b"),
            mul(var("a"), num(2.0)),
            num(2.0),
        ])));
    }

    #[test]
    fn subtraction_without_like_terms() {
        let node = Node::op(OpKind::Sub, vec![var("b"), var("a"), num(2.0)]);
        assert_eq!(all(&node, &mut ()), None);
    }

    #[test]
    fn repeated_factors() {
        let node = Node::op(OpKind::Mul, vec![var("a"), var("b"), var("a"), var("a")]);
        let mut steps = Vec::new();
        assert_eq!(all(&node, &mut steps), Some(Node::op(OpKind::Mul, vec![
            Node::op(OpKind::Power, vec![var("a"), num(3.0)]),
            var("b"),
        ])));
        assert_eq!(steps, vec![Step::CombineLikeFactors]);
    }

    #[test]
    fn products_are_not_factors() {
        // `x*2` inside a product is not a repeated factor
        let node = Node::op(OpKind::Mul, vec![var("x"), mul(var("x"), num(2.0))]);
        assert_eq!(all(&node, &mut ()), None);
    }
}
