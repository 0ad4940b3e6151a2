//! Tokenizer, tree model and backtracking parser for a small expression / program language.
//!
//! ```
//! use symdiff_parser::{parser::Parser, tree::{Node, OpKind}};
//!
//! let tree = Parser::new("(3.0 + 4.0)$").parse_expression().unwrap();
//! assert_eq!(tree, Node::op(OpKind::Add, vec![Node::constant(3.0), Node::constant(4.0)]));
//! ```

pub mod parser;
pub mod tokenizer;
pub mod tree;

pub use parser::{with_sentinel, Parser};
pub use tree::{Node, OpKind};
