use crate::{
    parser::{
        error::Error,
        expr::expression,
        literal::LitSym,
        token::Assign as AssignOp,
        Parser,
    },
    tree::{Node, OpKind},
};

/// `Assignment := Id "=" Expression`
///
/// Builds an [`OpKind::Assignment`] node whose children are the target variable and the value.
pub fn assignment(input: &mut Parser) -> Result<Node, Error> {
    let target = input.try_parse::<LitSym>()?;
    input.try_parse::<AssignOp>()?;
    let value = expression(input)?;

    Ok(Node::op(OpKind::Assignment, vec![Node::variable(target.name), value]))
}
