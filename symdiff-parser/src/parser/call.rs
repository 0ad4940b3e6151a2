use crate::{
    parser::{
        error::Error,
        expr::expression,
        literal::LitSym,
        token::{CloseParen, Comma, OpenParen},
        Parser,
    },
    tree::{Node, OpKind},
};

/// `FuncCall := Id "(" (Expression ("," Expression)*)? ")"`
///
/// A call to `ln`, `sin` or `cos` with exactly one argument builds the dedicated
/// [`OpKind::Ln`], [`OpKind::Sin`] or [`OpKind::Cos`] node. Any other call, such as `func(x, -40)`,
/// builds an [`OpKind::FuncCall`] node.
pub fn call(input: &mut Parser) -> Result<Node, Error> {
    let name = input.try_parse::<LitSym>()?;
    input.try_parse::<OpenParen>()?;
    let args = input.try_parse_separated::<Comma, _, _>(expression)?;
    input.try_parse::<CloseParen>()?;

    let kind = match OpKind::from_function_name(&name.name) {
        Some(builtin) if args.len() == 1 => builtin,
        _ => OpKind::FuncCall(name.name),
    };
    Ok(Node::op(kind, args))
}
