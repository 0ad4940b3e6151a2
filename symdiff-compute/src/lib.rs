//! Symbolic differentiation and simplification of the trees produced by [`symdiff_parser`].
//!
//! ```
//! use symdiff_compute::symbolic::{derivative_simplified, ExprRef};
//! use symdiff_parser::{Node, OpKind, Parser};
//!
//! let tree = Parser::new("(x*x)$").parse_expression().unwrap();
//! let expr = ExprRef::try_from(&tree).unwrap();
//!
//! // d/dx x*x = 2x
//! assert_eq!(derivative_simplified(expr, "x"), Node::op(OpKind::Mul, vec![
//!     Node::variable("x"),
//!     Node::constant(2.0),
//! ]));
//! ```

pub mod approx;
pub mod symbolic;
