//! Source-like and LaTeX formatting of trees.
//!
//! The [`Display`] implementation of [`Node`] produces text that the parser reads back into the
//! same tree, as long as the tree respects the arity of its operators.

use std::fmt::{Display, Formatter, Result};
use super::{Node, OpKind};

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter) -> Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`].
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_latex(f)
    }
}

/// Binding strength of a node when printed in infix form. Higher binds tighter.
fn precedence(node: &Node) -> u8 {
    match node.op_kind() {
        None => 6,
        Some(OpKind::Assignment) => 0,
        Some(OpKind::More | OpKind::Less | OpKind::Eq) => 1,
        Some(OpKind::Add | OpKind::Sub) => 2,
        Some(OpKind::Mul | OpKind::Div) => 3,
        Some(OpKind::Power) => 4,
        Some(_) => 5,
    }
}

/// Returns true if the `index`th child of `parent` must be wrapped in parentheses so the text
/// parses back into the same tree.
fn needs_paren(parent: &Node, index: usize, child: &Node) -> bool {
    let (outer, inner) = (precedence(parent), precedence(child));
    match parent.op_kind() {
        // both sides of a comparison are sums, and powers take a single part on each side
        Some(OpKind::More | OpKind::Less | OpKind::Eq | OpKind::Power) => inner <= outer,
        Some(OpKind::Assignment) => index == 0 && inner < 6,
        Some(kind) if kind.is_n_ary() => {
            inner < outer || (inner == outer && (index > 0 || child.is_op(kind)))
        },
        _ => false,
    }
}

/// Writes the `index`th child of `parent`, adding parentheses if required.
fn fmt_child(f: &mut Formatter, parent: &Node, index: usize, child: &Node) -> Result {
    if needs_paren(parent, index, child) {
        write!(f, "({})", child)
    } else {
        write!(f, "{}", child)
    }
}

/// Writes each item separated by `separator`.
fn fmt_joined<T: Display>(f: &mut Formatter, items: &[T], separator: &str) -> Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", separator)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Writes the statements of a sequence, terminating the ones that need it with `;`.
fn fmt_statements(f: &mut Formatter, statements: &[Node]) -> Result {
    for (i, stmt) in statements.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        match stmt.op_kind() {
            Some(OpKind::If | OpKind::While | OpKind::For | OpKind::FuncDef(_)) => write!(f, "{}", stmt)?,
            _ => write!(f, "{};", stmt)?,
        }
    }
    Ok(())
}

/// Writes a braced block of statements.
fn fmt_block(f: &mut Formatter, block: &Node) -> Result {
    write!(f, "{{ ")?;
    fmt_statements(f, block.children())?;
    write!(f, " }}")
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let (kind, children) = match self {
            Node::Constant(value) => return write!(f, "{}", value),
            Node::Variable(name) => return write!(f, "{}", name),
            Node::Operator { kind, children } => (kind, children.as_slice()),
        };

        match kind {
            OpKind::Power => {
                // `(a^b)^c`: a single `^` per level
                for _ in 2..children.len() {
                    write!(f, "(")?;
                }
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, "^")?;
                    }
                    fmt_child(f, self, i, child)?;
                    if i > 0 && i + 1 < children.len() {
                        write!(f, ")")?;
                    }
                }
                Ok(())
            },
            OpKind::Add | OpKind::Sub | OpKind::Mul | OpKind::Div
                | OpKind::Assignment | OpKind::More | OpKind::Less | OpKind::Eq => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{}", kind.label())?;
                    }
                    fmt_child(f, self, i, child)?;
                }
                Ok(())
            },
            OpKind::Ln | OpKind::Sin | OpKind::Cos | OpKind::FuncCall(_) => {
                write!(f, "{}(", kind.label())?;
                fmt_joined(f, children, ", ")?;
                write!(f, ")")
            },
            OpKind::Return => {
                write!(f, "return(")?;
                fmt_joined(f, children, ", ")?;
                write!(f, ")")
            },
            OpKind::Sequence => fmt_statements(f, children),
            OpKind::If => {
                let [cond, branches @ ..] = children else {
                    return write!(f, "if");
                };
                write!(f, "if ({}) ", cond)?;
                for (i, branch) in branches.iter().enumerate() {
                    if i > 0 {
                        write!(f, " else ")?;
                    }
                    fmt_block(f, branch)?;
                }
                Ok(())
            },
            OpKind::While | OpKind::For | OpKind::FuncDef(_) => {
                let [header @ .., body] = children else {
                    return write!(f, "{}", kind.label());
                };
                match kind {
                    OpKind::While => {
                        write!(f, "while ")?;
                        fmt_joined(f, header, " ")?;
                        write!(f, " ")?;
                    },
                    OpKind::For => {
                        write!(f, "for (")?;
                        fmt_joined(f, header, "; ")?;
                        write!(f, ") ")?;
                    },
                    _ => {
                        write!(f, "function {}(", kind.label())?;
                        fmt_joined(f, header, ", ")?;
                        write!(f, ") ")?;
                    },
                }
                fmt_block(f, body)
            },
        }
    }
}

/// Writes a child, wrapped in `\left(` and `\right)` if `paren` is true.
fn latex_child(f: &mut Formatter, child: &Node, paren: bool) -> Result {
    if paren {
        write!(f, "\\left(")?;
        child.fmt_latex(f)?;
        write!(f, "\\right)")
    } else {
        child.fmt_latex(f)
    }
}

/// Writes each item as LaTeX, separated by `separator`.
fn latex_joined(f: &mut Formatter, items: &[Node], separator: &str) -> Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", separator)?;
        }
        item.fmt_latex(f)?;
    }
    Ok(())
}

/// Helper to format left-associated fractions, `\frac{\frac{a}{b}}{c}`.
fn latex_frac(f: &mut Formatter, children: &[Node]) -> Result {
    match children.split_last() {
        Some((last, rest)) if !rest.is_empty() => {
            write!(f, "\\frac{{")?;
            latex_frac(f, rest)?;
            write!(f, "}}{{")?;
            last.fmt_latex(f)?;
            write!(f, "}}")
        },
        Some((last, _)) => last.fmt_latex(f),
        None => Ok(()),
    }
}

/// Helper to format left-associated powers, `{\left(a^{b}\right)}^{c}`.
fn latex_pow(f: &mut Formatter, children: &[Node]) -> Result {
    match children.split_last() {
        Some((last, rest)) if !rest.is_empty() => {
            match rest {
                [base] => latex_child(f, base, precedence(base) <= 4)?,
                _ => {
                    write!(f, "\\left(")?;
                    latex_pow(f, rest)?;
                    write!(f, "\\right)")?;
                },
            }
            write!(f, "^{{")?;
            last.fmt_latex(f)?;
            write!(f, "}}")
        },
        Some((last, _)) => last.fmt_latex(f),
        None => Ok(()),
    }
}

impl Latex for Node {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        let (kind, children) = match self {
            Node::Constant(value) => return write!(f, "{}", value),
            Node::Variable(name) => return write!(f, "{}", name),
            Node::Operator { kind, children } => (kind, children.as_slice()),
        };

        match kind {
            OpKind::Add | OpKind::Sub => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{}", kind.label())?;
                    }
                    latex_child(f, child, i > 0 && *kind == OpKind::Sub && precedence(child) <= 2)?;
                }
                Ok(())
            },
            OpKind::Mul => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " \\cdot ")?;
                    }
                    latex_child(f, child, precedence(child) <= 2)?;
                }
                Ok(())
            },
            OpKind::Div => latex_frac(f, children),
            OpKind::Power => latex_pow(f, children),
            OpKind::Ln | OpKind::Sin | OpKind::Cos => {
                write!(f, "\\{}\\left(", kind.label())?;
                latex_joined(f, children, ", ")?;
                write!(f, "\\right)")
            },
            OpKind::FuncCall(name) => {
                write!(f, "\\mathrm{{ {} }} \\left(", name)?;
                latex_joined(f, children, ", ")?;
                write!(f, "\\right)")
            },
            OpKind::Assignment => latex_joined(f, children, " := "),
            OpKind::More => latex_joined(f, children, " > "),
            OpKind::Less => latex_joined(f, children, " < "),
            OpKind::Eq => latex_joined(f, children, " = "),
            OpKind::Return => {
                write!(f, "\\mathbf{{return}}\\ ")?;
                latex_joined(f, children, ", ")
            },
            OpKind::Sequence => latex_joined(f, children, " \\\\ "),
            OpKind::If => {
                let [cond, branches @ ..] = children else {
                    return write!(f, "\\mathbf{{if}}");
                };
                write!(f, "\\mathbf{{if}}\\ ")?;
                cond.fmt_latex(f)?;
                for (i, branch) in branches.iter().enumerate() {
                    if i > 0 {
                        write!(f, " \\\\ \\mathbf{{else}}")?;
                    }
                    write!(f, " \\\\ ")?;
                    branch.fmt_latex(f)?;
                }
                Ok(())
            },
            OpKind::While => {
                write!(f, "\\mathbf{{while}}\\ ")?;
                latex_joined(f, children, " \\\\ ")
            },
            OpKind::For => {
                write!(f, "\\mathbf{{for}}\\ ")?;
                if let [header @ .., body] = children {
                    latex_joined(f, header, ";\\ ")?;
                    write!(f, " \\\\ ")?;
                    body.fmt_latex(f)?;
                }
                Ok(())
            },
            OpKind::FuncDef(name) => {
                write!(f, "\\mathrm{{ {} }} \\left(", name)?;
                if let [params @ .., body] = children {
                    latex_joined(f, params, ", ")?;
                    write!(f, "\\right) \\\\ ")?;
                    body.fmt_latex(f)?;
                } else {
                    write!(f, "\\right)")?;
                }
                Ok(())
            },
        }
    }
}
