//! The tree model shared by the parser, the differentiator and the simplifier.
//!
//! A [`Node`] exclusively owns its children, so a tree has no sharing and no cycles. Structural
//! edits always go through `&mut` access to the parent node.

pub mod dot;
pub mod fmt;
pub mod iter;

use iter::NodeIter;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The maximum length of an identifier, in bytes.
pub const MAX_IDENT_LEN: usize = 15;

/// The absolute tolerance used when comparing a constant against a specific value.
pub const TOLERANCE: f64 = 1e-7;

/// The kind of an operator node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OpKind {
    /// Addition, `a + b + ...`.
    Add,

    /// Left-associated subtraction, `a - b - ...`.
    Sub,

    /// Multiplication, `a * b * ...`.
    Mul,

    /// Left-associated division, `a / b / ...`.
    Div,

    /// Left-associated exponentiation, `(a ^ b) ^ ...`.
    Power,

    /// Natural logarithm.
    Ln,

    /// Sine.
    Sin,

    /// Cosine.
    Cos,

    /// `target = value`.
    Assignment,

    /// `a > b`.
    More,

    /// `a < b`.
    Less,

    /// `a ~ b`.
    Eq,

    /// `[cond, then]` or `[cond, then, else]`.
    If,

    /// `[cond, body]`.
    While,

    /// `[init, cond, step, body]`.
    For,

    /// An ordered list of statements.
    Sequence,

    /// A call to a user-defined function.
    FuncCall(String),

    /// A function definition: its parameters, followed by its body.
    FuncDef(String),

    /// `return(value)`.
    Return,
}

impl OpKind {
    /// Returns the tag text used for this kind of operator when rendering a tree.
    pub fn label(&self) -> &str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Power => "^",
            Self::Ln => "ln",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Assignment => "=",
            Self::More => ">",
            Self::Less => "<",
            Self::Eq => "~",
            Self::If => "if",
            Self::While => "while",
            Self::For => "for",
            Self::Sequence => "seq",
            Self::FuncCall(name) | Self::FuncDef(name) => name.as_str(),
            Self::Return => "return",
        }
    }

    /// Returns true if this kind is one of the arithmetic operators that can appear in an
    /// expression that can be differentiated or evaluated.
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Power | Self::Ln | Self::Sin | Self::Cos
        )
    }

    /// Returns true if this kind is an n-ary arithmetic operator (`+`, `-`, `*`, `/`, `^`).
    pub fn is_n_ary(&self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Power)
    }

    /// Returns true if this kind is a builtin function of one argument.
    pub fn is_function(&self) -> bool {
        matches!(self, Self::Ln | Self::Sin | Self::Cos)
    }

    /// Returns the neutral element of this operator, if it has one.
    ///
    /// For [`OpKind::Sub`], [`OpKind::Div`] and [`OpKind::Power`], the neutral element is only
    /// neutral on the right of the operator, so it never applies to the first child.
    pub fn neutral(&self) -> Option<f64> {
        match self {
            Self::Add | Self::Sub => Some(0.0),
            Self::Mul | Self::Div | Self::Power => Some(1.0),
            _ => None,
        }
    }

    /// Returns the kind of the builtin function with the given name, if there is one.
    pub fn from_function_name(name: &str) -> Option<Self> {
        match name {
            "ln" => Some(Self::Ln),
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            _ => None,
        }
    }
}

/// A node of an expression / program tree.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Node {
    /// A numeric literal.
    Constant(f64),

    /// A named variable.
    Variable(String),

    /// An operator applied to an ordered list of children.
    Operator {
        kind: OpKind,
        children: Vec<Node>,
    },
}

impl Node {
    /// Creates a constant node.
    pub fn constant(value: f64) -> Self {
        Self::Constant(value)
    }

    /// Creates a variable node.
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// Creates an operator node with the given children.
    pub fn op(kind: OpKind, children: Vec<Node>) -> Self {
        Self::Operator { kind, children }
    }

    /// Appends `child` to the children of this node.
    ///
    /// Leaves cannot hold children; in that case, the child is handed back in the [`Err`].
    pub fn attach_child(&mut self, child: Node) -> Result<(), Node> {
        match self {
            Self::Operator { children, .. } => {
                children.push(child);
                Ok(())
            },
            _ => Err(child),
        }
    }

    /// Removes the child at `index` and returns it, shifting the following children down by one.
    ///
    /// Returns [`None`] if this node is a leaf or the index is out of bounds.
    pub fn detach_child(&mut self, index: usize) -> Option<Node> {
        match self {
            Self::Operator { children, .. } if index < children.len() => Some(children.remove(index)),
            _ => None,
        }
    }

    /// Returns true if both trees have the same kind, payload, and children, recursively.
    ///
    /// Constants compare by value, except that two NaN constants are considered equal. This is a
    /// structural comparison only, so `a + b` and `b + a` are different trees.
    pub fn structural_eq(&self, other: &Node) -> bool {
        match (self, other) {
            (Self::Constant(a), Self::Constant(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::Variable(a), Self::Variable(b)) => a == b,
            (
                Self::Operator { kind: kind_a, children: children_a },
                Self::Operator { kind: kind_b, children: children_b },
            ) => {
                kind_a == kind_b
                    && children_a.len() == children_b.len()
                    && children_a.iter().zip(children_b).all(|(a, b)| a.structural_eq(b))
            },
            _ => false,
        }
    }

    /// Returns the tag text of this node: the number for constants, the name for variables, and
    /// the operator label for everything else.
    pub fn label(&self) -> String {
        match self {
            Self::Constant(value) => value.to_string(),
            Self::Variable(name) => name.clone(),
            Self::Operator { kind, .. } => kind.label().to_string(),
        }
    }

    /// Returns the value of this node, if it is a constant.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Constant(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the name carried by this node, if it is a variable, a function call, or a function
    /// definition.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Variable(name) => Some(name.as_str()),
            Self::Operator { kind: OpKind::FuncCall(name) | OpKind::FuncDef(name), .. } => Some(name.as_str()),
            _ => None,
        }
    }

    /// Returns the operator kind of this node, if it is an operator.
    pub fn op_kind(&self) -> Option<&OpKind> {
        match self {
            Self::Operator { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Returns the children of this node. Leaves have no children.
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Operator { children, .. } => children,
            _ => &[],
        }
    }

    /// Returns the children of this node mutably, if it is an operator.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Self::Operator { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Returns true if this node is an operator of the given kind.
    pub fn is_op(&self, expected: &OpKind) -> bool {
        self.op_kind() == Some(expected)
    }

    /// Returns true if this node is a constant within [`TOLERANCE`] of `value`.
    pub fn is_constant_approx(&self, value: f64) -> bool {
        match self {
            Self::Constant(c) => (c - value).abs() < TOLERANCE,
            _ => false,
        }
    }

    /// Returns true if a [`Node::Variable`] appears anywhere in this tree.
    pub fn contains_variable(&self) -> bool {
        self.post_order_iter().any(|node| matches!(node, Self::Variable(_)))
    }

    /// Moves the node out of `self`, leaving a `Constant(0)` in its place.
    pub fn take(&mut self) -> Node {
        std::mem::replace(self, Self::Constant(0.0))
    }

    /// Returns an iterator that traverses the tree in left-to-right post-order (i.e. depth-first).
    pub fn post_order_iter(&self) -> NodeIter<'_> {
        NodeIter::new(self)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.structural_eq(other)
    }
}
