//! A validated view of the expression subset of a [`Node`] tree.

use levenshtein::levenshtein;
use std::{fmt, ops::Deref};
use symdiff_parser::{Node, OpKind};

/// Names of the builtin functions an expression may call.
pub const BUILTIN_FUNCTIONS: [&str; 3] = ["ln", "sin", "cos"];

/// The reason a tree could not be viewed as an [`ExprRef`].
#[derive(Debug, Clone, PartialEq)]
pub enum NotAnExpression {
    /// The tree contains a statement, a comparison or an assignment.
    Statement {
        /// The label of the offending node.
        label: String,
    },

    /// The tree calls a function that is not one of the builtin functions.
    UnknownFunction {
        /// The name of the called function.
        name: String,

        /// Builtin functions with a name similar to `name`.
        suggestions: Vec<&'static str>,
    },

    /// An operator has the wrong number of operands.
    Arity {
        /// The label of the offending node.
        label: String,

        /// A description of the expected number of operands.
        expected: &'static str,

        /// The number of operands found.
        found: usize,
    },
}

impl NotAnExpression {
    fn unknown_function(name: &str) -> Self {
        let suggestions = BUILTIN_FUNCTIONS
            .iter()
            .filter(|builtin| levenshtein(builtin, name) < 2)
            .copied()
            .collect();
        Self::UnknownFunction { name: name.to_owned(), suggestions }
    }
}

impl fmt::Display for NotAnExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Statement { label } => {
                write!(f, "`{}` is not part of an expression", label)
            },
            Self::UnknownFunction { name, suggestions } => {
                write!(f, "unknown function `{}`", name)?;
                match suggestions.as_slice() {
                    [] => Ok(()),
                    [single] => write!(f, ", did you mean `{}`?", single),
                    [rest @ .., last] => {
                        let rest = rest.iter()
                            .map(|name| format!("`{}`", name))
                            .collect::<Vec<_>>()
                            .join(", ");
                        write!(f, ", did you mean {} or `{}`?", rest, last)
                    },
                }
            },
            Self::Arity { label, expected, found } => {
                write!(f, "`{}` takes {} operand(s), but {} were given", label, expected, found)
            },
        }
    }
}

impl std::error::Error for NotAnExpression {}

/// A borrowed [`Node`] whose whole subtree is known to be an expression.
///
/// An expression consists only of constants, variables, the arithmetic operators with at least
/// one operand, and `ln`, `sin` and `cos` with exactly one operand. Use [`ExprRef::try_from`] to
/// check a tree.
#[derive(Debug, Clone, Copy)]
pub struct ExprRef<'a>(&'a Node);

/// The shape of the node behind an [`ExprRef`].
#[derive(Debug, Clone, Copy)]
pub enum ExprKind<'a> {
    Constant(f64),
    Variable(&'a str),
    Add(&'a [Node]),
    Sub(&'a [Node]),
    Mul(&'a [Node]),
    Div(&'a [Node]),
    Power(&'a [Node]),
    Ln(ExprRef<'a>),
    Sin(ExprRef<'a>),
    Cos(ExprRef<'a>),
}

impl<'a> ExprRef<'a> {
    /// Wraps a node that is already known to be an expression, such as a child of an [`ExprRef`]
    /// or the output of the differentiator.
    pub(crate) fn new_unchecked(node: &'a Node) -> Self {
        Self(node)
    }

    /// Returns the underlying node.
    pub fn node(self) -> &'a Node {
        self.0
    }

    /// Returns the shape of this expression.
    pub fn kind(self) -> ExprKind<'a> {
        match self.0 {
            Node::Constant(value) => ExprKind::Constant(*value),
            Node::Variable(name) => ExprKind::Variable(name),
            Node::Operator { kind, children } => match kind {
                OpKind::Add => ExprKind::Add(children),
                OpKind::Sub => ExprKind::Sub(children),
                OpKind::Mul => ExprKind::Mul(children),
                OpKind::Div => ExprKind::Div(children),
                OpKind::Power => ExprKind::Power(children),
                OpKind::Ln => ExprKind::Ln(Self(&children[0])),
                OpKind::Sin => ExprKind::Sin(Self(&children[0])),
                OpKind::Cos => ExprKind::Cos(Self(&children[0])),
                _ => unreachable!("`{}` passed expression validation", kind.label()),
            },
        }
    }

    /// Returns the operands of this expression as expressions.
    pub fn children(self) -> impl Iterator<Item = ExprRef<'a>> {
        self.0.children().iter().map(Self)
    }
}

impl Deref for ExprRef<'_> {
    type Target = Node;

    fn deref(&self) -> &Node {
        self.0
    }
}

/// Checks a single node, without looking at its children.
fn check_node(node: &Node) -> Result<(), NotAnExpression> {
    let Node::Operator { kind, children } = node else {
        return Ok(());
    };

    match kind {
        _ if kind.is_n_ary() => {
            if children.is_empty() {
                return Err(NotAnExpression::Arity {
                    label: kind.label().to_owned(),
                    expected: "at least one",
                    found: 0,
                });
            }
        },
        _ if kind.is_function() => {
            if children.len() != 1 {
                return Err(NotAnExpression::Arity {
                    label: kind.label().to_owned(),
                    expected: "exactly one",
                    found: children.len(),
                });
            }
        },
        OpKind::FuncCall(name) => {
            return Err(match OpKind::from_function_name(name) {
                Some(_) => NotAnExpression::Arity {
                    label: name.clone(),
                    expected: "exactly one",
                    found: children.len(),
                },
                None => NotAnExpression::unknown_function(name),
            });
        },
        _ => return Err(NotAnExpression::Statement { label: kind.label().to_owned() }),
    }

    Ok(())
}

impl<'a> TryFrom<&'a Node> for ExprRef<'a> {
    type Error = NotAnExpression;

    fn try_from(node: &'a Node) -> Result<Self, Self::Error> {
        node.post_order_iter().try_for_each(check_node)?;
        Ok(Self(node))
    }
}
