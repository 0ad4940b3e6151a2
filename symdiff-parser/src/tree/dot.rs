//! Graphviz DOT rendering of trees.

use std::fmt::Write;
use super::Node;

/// Escapes a label for use inside a double-quoted DOT string.
fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Writes the node and its subtree, numbering nodes in pre-order starting from `next_id`.
/// Returns the id given to `node`.
fn write_node(out: &mut String, node: &Node, next_id: &mut usize) -> usize {
    let id = *next_id;
    *next_id += 1;

    let shape = match node {
        Node::Constant(_) => "ellipse",
        Node::Variable(_) => "diamond",
        Node::Operator { .. } => "box",
    };
    // writing to a `String` cannot fail
    let _ = writeln!(out, "    n{} [label=\"{}\", shape={}];", id, escape(&node.label()), shape);

    for child in node.children() {
        let child_id = write_node(out, child, next_id);
        let _ = writeln!(out, "    n{} -> n{};", id, child_id);
    }

    id
}

/// Renders the tree as a Graphviz `digraph`.
///
/// Node identifiers are assigned in pre-order for every call, so rendering the same tree twice
/// produces the same text.
pub fn to_dot(root: &Node) -> String {
    let mut out = String::from("digraph tree {\n");
    let mut next_id = 0;
    write_node(&mut out, root, &mut next_id);
    out.push_str("}\n");
    out
}
