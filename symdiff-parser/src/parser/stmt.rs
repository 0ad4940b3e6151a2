//! Statements and blocks.

use crate::{
    parser::{
        error::Error,
        expr::expression,
        keyword::{Else, For, If, Return, While},
        token::{CloseCurly, CloseParen, OpenCurly, OpenParen, Semicolon},
        Parser,
    },
    tree::{Node, OpKind},
    try_parse_catch_fatal,
};

/// `Sequence := Statement*`
pub fn sequence(input: &mut Parser) -> Result<Node, Error> {
    let mut statements = Vec::new();
    while let Some(statement) = input.try_parse_optional(statement)? {
        statements.push(statement);
    }
    Ok(Node::op(OpKind::Sequence, statements))
}

/// `Statement := If | While | Return ";" | For | Expression ";"`
pub fn statement(input: &mut Parser) -> Result<Node, Error> {
    let err = try_parse_catch_fatal!(
        input.try_parse_with_fn(if_stmt),
        input.try_parse_with_fn(while_stmt),
        input.try_parse_with_fn(|input| {
            let node = return_stmt(input)?;
            input.try_parse::<Semicolon>()?;
            Ok(node)
        }),
        input.try_parse_with_fn(for_stmt),
        input.try_parse_with_fn(|input| {
            let node = expression(input)?;
            input.try_parse::<Semicolon>()?;
            Ok(node)
        }),
    );
    Err(err)
}

/// `"{" Sequence "}"`
pub fn block(input: &mut Parser) -> Result<Node, Error> {
    input.try_parse::<OpenCurly>()?;
    let body = sequence(input)?;
    input.try_parse::<CloseCurly>()?;
    Ok(body)
}

/// `"(" Expression ")"`
fn condition(input: &mut Parser) -> Result<Node, Error> {
    input.try_parse::<OpenParen>()?;
    let cond = expression(input)?;
    input.try_parse::<CloseParen>()?;
    Ok(cond)
}

/// `If := "if" "(" Expression ")" "{" Sequence "}" ("else" "{" Sequence "}")?`
pub fn if_stmt(input: &mut Parser) -> Result<Node, Error> {
    input.try_parse::<If>()?;
    let cond = condition(input)?;
    let then_branch = block(input)?;
    let else_branch = input.try_parse_optional(|input| {
        input.try_parse::<Else>()?;
        block(input)
    })?;

    let mut children = vec![cond, then_branch];
    children.extend(else_branch);
    Ok(Node::op(OpKind::If, children))
}

/// `While := "while" Expression "{" Sequence "}"`
pub fn while_stmt(input: &mut Parser) -> Result<Node, Error> {
    input.try_parse::<While>()?;
    let cond = expression(input)?;
    let body = block(input)?;
    Ok(Node::op(OpKind::While, vec![cond, body]))
}

/// `For := "for" "(" Expression ";" Expression ";" Expression ")" "{" Sequence "}"`
pub fn for_stmt(input: &mut Parser) -> Result<Node, Error> {
    input.try_parse::<For>()?;
    input.try_parse::<OpenParen>()?;
    let init = expression(input)?;
    input.try_parse::<Semicolon>()?;
    let cond = expression(input)?;
    input.try_parse::<Semicolon>()?;
    let step = expression(input)?;
    input.try_parse::<CloseParen>()?;
    let body = block(input)?;
    Ok(Node::op(OpKind::For, vec![init, cond, step, body]))
}

/// `Return := "return" "(" Expression ")"`
pub fn return_stmt(input: &mut Parser) -> Result<Node, Error> {
    input.try_parse::<Return>()?;
    let value = condition(input)?;
    Ok(Node::op(OpKind::Return, vec![value]))
}
