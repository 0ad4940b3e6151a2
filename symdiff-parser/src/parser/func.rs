use crate::{
    parser::{
        error::Error,
        keyword::Function,
        literal::LitSym,
        stmt::block,
        token::{CloseParen, Comma, OpenParen},
        Parser,
    },
    tree::{Node, OpKind},
};

/// `FuncDef := "function" Id "(" (Id ("," Id)*)? ")" "{" Sequence "}"`
///
/// The parameters become [`Node::Variable`] children, followed by the body.
pub fn function_def(input: &mut Parser) -> Result<Node, Error> {
    input.try_parse::<Function>()?;
    let name = input.try_parse::<LitSym>()?;
    input.try_parse::<OpenParen>()?;
    let params = input.try_parse_separated::<Comma, _, _>(|input| input.try_parse::<LitSym>())?;
    input.try_parse::<CloseParen>()?;
    let body = block(input)?;

    let mut children = params
        .into_iter()
        .map(|param| Node::variable(param.name))
        .collect::<Vec<_>>();
    children.push(body);
    Ok(Node::op(OpKind::FuncDef(name.name), children))
}

/// `Program := FuncDef*`, not including the final `$`.
pub fn program(input: &mut Parser) -> Result<Node, Error> {
    let mut defs = Vec::new();
    while let Some(def) = input.try_parse_optional(function_def)? {
        defs.push(def);
    }
    Ok(Node::op(OpKind::Sequence, defs))
}
