//! Algebraic manipulation of expression trees.
//!
//! # Expressions
//!
//! The parser produces a single [`Node`] type for whole programs and lone expressions alike. The
//! differentiator only accepts the expression subset of that tree: constants, variables, the
//! arithmetic operators, and the builtin functions `ln`, `sin` and `cos`. That subset is checked
//! once, up front, by converting a `&Node` into an [`ExprRef`]:
//!
//! ```
//! use symdiff_compute::symbolic::ExprRef;
//! use symdiff_parser::Parser;
//!
//! let tree = Parser::new("(sin(x) * 2)$").parse_expression().unwrap();
//! assert!(ExprRef::try_from(&tree).is_ok());
//!
//! let program = Parser::new("function f(a) { return(a); }$").parse_program().unwrap();
//! assert!(ExprRef::try_from(&program).is_err());
//! ```
//!
//! # Simplification
//!
//! [`simplify()`] rewrites any tree in place until none of its rules apply anymore. Statements are
//! left as they are, but the expressions inside them are simplified.
//!
//! ```
//! use symdiff_compute::symbolic::simplify;
//! use symdiff_parser::{Node, Parser};
//!
//! let mut tree = Parser::new("(3.0 + 4.0)$").parse_expression().unwrap();
//! simplify(&mut tree);
//! assert_eq!(tree, Node::constant(7.0));
//! ```
//!
//! [`Node`]: symdiff_parser::Node

pub mod derivative;
pub mod eval;
pub mod expr;
pub mod simplify;
pub mod step_collector;

pub use derivative::{derivative, derivative_simplified, nth_derivative};
pub use eval::eval;
pub use expr::{ExprKind, ExprRef, NotAnExpression};
pub use simplify::{simplify, simplify_with, simplify_with_steps};
pub use step_collector::StepCollector;
