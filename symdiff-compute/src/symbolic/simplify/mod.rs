//! Simplification of trees to a fixpoint.
//!
//! The operands of a node are simplified first. Then, the rules in [`rules`] are applied to the
//! node over and over, in a fixed order, until a whole pass over the rules leaves the node
//! unchanged. Only the arithmetic operators are rewritten; statements, comparisons, assignments
//! and calls to user-defined functions only have their operands simplified.

pub mod rules;
pub mod step;

use symdiff_parser::{Node, OpKind};
use tracing::debug;
use super::step_collector::StepCollector;

pub use step::Step;

/// Simplifies the tree in place.
///
/// Simplification is idempotent: simplifying an already simplified tree leaves it unchanged.
pub fn simplify(node: &mut Node) {
    simplify_with(node, &mut ());
}

/// Simplifies the tree in place, returning the steps taken to simplify it.
pub fn simplify_with_steps(node: &mut Node) -> Vec<Step> {
    let mut steps = Vec::new();
    simplify_with(node, &mut steps);
    steps
}

/// Simplifies the tree in place, reporting every rewrite to the given step collector.
pub fn simplify_with(node: &mut Node, step_collector: &mut dyn StepCollector<Step>) {
    if let Some(children) = node.children_mut() {
        for child in children.iter_mut() {
            simplify_with(child, step_collector);
        }
    }

    if !node.op_kind().is_some_and(OpKind::is_arithmetic) {
        return;
    }

    let mut passes = 0usize;
    loop {
        let before = node.clone();
        rules::all(node, step_collector);
        passes += 1;
        if node.structural_eq(&before) {
            break;
        }
    }

    if passes > 1 {
        debug!(passes, result = %node, "reached fixpoint");
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use symdiff_parser::Parser;
    use crate::symbolic::{eval::eval, expr::ExprRef};
    use super::*;

    fn var(name: &str) -> Node {
        Node::variable(name)
    }

    fn num(value: f64) -> Node {
        Node::constant(value)
    }

    fn simplified(source: &str) -> Node {
        let mut node = Parser::new(source).parse_expression().unwrap();
        simplify(&mut node);
        node
    }

    #[test]
    fn constant_sum() {
        assert_eq!(simplified("(3.0 + 4.0)$"), num(7.0));
    }

    #[test]
    fn square() {
        assert_eq!(simplified("(x*x)$"), Node::op(OpKind::Power, vec![var("x"), num(2.0)]));
    }

    #[test]
    fn sum_of_products() {
        // 1*x + x*1 = x + x = x*2
        let mut node = Node::op(OpKind::Add, vec![
            Node::op(OpKind::Mul, vec![num(1.0), var("x")]),
            Node::op(OpKind::Mul, vec![var("x"), num(1.0)]),
        ]);
        let steps = simplify_with_steps(&mut node);
        assert_eq!(node, Node::op(OpKind::Mul, vec![var("x"), num(2.0)]));
        assert_eq!(steps, vec![
            Step::RemoveNeutral,
            Step::SpliceUp,
            Step::RemoveNeutral,
            Step::SpliceUp,
            Step::CombineLikeTerms,
            Step::SpliceUp,
        ]);
    }

    #[test]
    fn nested_constants() {
        assert_eq!(simplified("x + (2 + 3) * 4 - 1$"), Node::op(OpKind::Sub, vec![
            Node::op(OpKind::Add, vec![var("x"), num(20.0)]),
            num(1.0),
        ]));
    }

    #[test]
    fn zero_product() {
        assert_eq!(simplified("sin(x) * (y - y) + 3$"), num(3.0));
    }

    #[test]
    fn unsound_zero_division() {
        assert_eq!(simplified("0 / (x - x)$"), num(0.0));
    }

    #[test]
    fn like_terms_across_nesting() {
        assert_eq!(simplified("x + (y + x) + 2 * x$"), Node::op(OpKind::Add, vec![
            Node::op(OpKind::Mul, vec![var("x"), num(4.0)]),
            var("y"),
        ]));
    }

    #[test]
    fn power_of_power() {
        assert_eq!(simplified("(x ^ 2) ^ 3$"), Node::op(OpKind::Power, vec![var("x"), num(6.0)]));
        assert_eq!(simplified("x ^ (3 - 3)$"), num(1.0));
    }

    #[test]
    fn statements_keep_their_shape() {
        let mut node = Parser::new("x = 2 * 3; if (x < 1 + 1) { return(x * 1); }$")
            .parse_statements()
            .unwrap();
        simplify(&mut node);
        assert_eq!(node, Node::op(OpKind::Sequence, vec![
            Node::op(OpKind::Assignment, vec![var("x"), num(6.0)]),
            Node::op(OpKind::If, vec![
                Node::op(OpKind::Less, vec![var("x"), num(2.0)]),
                Node::op(OpKind::Sequence, vec![Node::op(OpKind::Return, vec![var("x")])]),
            ]),
        ]));
    }

    #[test]
    fn user_calls_are_opaque() {
        let mut node = Parser::new("f(1 + 1) + 0$").parse_expression().unwrap();
        simplify(&mut node);
        assert_eq!(node, Node::op(OpKind::FuncCall("f".to_owned()), vec![num(2.0)]));
    }

    /// Every arithmetic operator.
    const ALL_KINDS: [OpKind; 8] = [
        OpKind::Add, OpKind::Sub, OpKind::Mul, OpKind::Div, OpKind::Power, OpKind::Ln, OpKind::Sin, OpKind::Cos,
    ];

    /// The operators whose rewrites never change the value of a finite expression. `(a^b)^c = a^(bc)`
    /// does not hold for a negative `a`, so powers are left out.
    const VALUE_PRESERVING_KINDS: [OpKind; 7] = [
        OpKind::Add, OpKind::Sub, OpKind::Mul, OpKind::Div, OpKind::Ln, OpKind::Sin, OpKind::Cos,
    ];

    /// Generates a random expression in `x` and `y`, with small integer constants.
    fn random_expr(rng: &mut StdRng, depth: usize, kinds: &[OpKind]) -> Node {
        if depth == 0 || rng.gen_bool(0.25) {
            return match rng.gen_range(0..4) {
                0 => var("x"),
                1 => var("y"),
                _ => num(rng.gen_range(0..4) as f64),
            };
        }

        let kind = kinds[rng.gen_range(0..kinds.len())].clone();
        let operands = if kind.is_function() { 1 } else { rng.gen_range(2..=3) };
        let children = (0..operands).map(|_| random_expr(rng, depth - 1, kinds)).collect();
        Node::op(kind, children)
    }

    /// Generates a random constant expression whose value is exactly representable, so that every
    /// evaluation order gives the same result.
    fn random_constant_expr(rng: &mut StdRng, depth: usize) -> Node {
        if depth == 0 || rng.gen_bool(0.2) {
            return num(rng.gen_range(0..10) as f64);
        }

        match rng.gen_range(0..4usize) {
            0 => Node::op(OpKind::Power, vec![
                random_constant_expr(rng, depth - 1),
                num(rng.gen_range(1..=2) as f64),
            ]),
            n => {
                let kind = [OpKind::Add, OpKind::Sub, OpKind::Mul][n - 1].clone();
                let operands = rng.gen_range(2..=3);
                let children = (0..operands).map(|_| random_constant_expr(rng, depth - 1)).collect();
                Node::op(kind, children)
            },
        }
    }

    #[test]
    fn idempotent() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..500 {
            let mut once = random_expr(&mut rng, 4, &ALL_KINDS);
            simplify(&mut once);

            let mut twice = once.clone();
            simplify(&mut twice);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn constant_collapse() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let node = random_constant_expr(&mut rng, 3);
            let expected = eval(ExprRef::try_from(&node).unwrap(), &[]).unwrap();

            let mut result = node.clone();
            simplify(&mut result);
            let value = result.value().unwrap_or_else(|| panic!("{} did not collapse: {}", node, result));
            assert_relative_eq!(value, expected, epsilon = 1e-7, max_relative = 1e-9);
        }
    }

    #[test]
    fn preserves_value() {
        let mut rng = StdRng::seed_from_u64(42);
        let bindings = [("x", 1.3), ("y", 0.4)];
        let value_of = |node: &Node| eval(ExprRef::try_from(node).unwrap(), &bindings).unwrap();

        for _ in 0..500 {
            let node = random_expr(&mut rng, 3, &VALUE_PRESERVING_KINDS);

            // `0*a = 0` and `0/a = 0` only hold for a finite `a`, and values close to zero or one
            // are matched with a tolerance
            let well_behaved = node.post_order_iter()
                .map(value_of)
                .all(|value| value.is_finite() && value.abs() < 1e6 && (value == 0.0 || value.abs() > 1e-6));
            if !well_behaved {
                continue;
            }

            let mut result = node.clone();
            simplify(&mut result);
            assert_relative_eq!(value_of(&result), value_of(&node), epsilon = 1e-6, max_relative = 1e-6);
        }
    }
}
