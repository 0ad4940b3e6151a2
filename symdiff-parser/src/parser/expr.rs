//! Expressions: `Expression`, `Sum`, `Mul`, `Power` and `Part`.

use crate::{
    parser::{
        assign::assignment,
        call::call,
        error::Error,
        literal::{LitNum, LitSym},
        token::{CloseParen, Exp, OpenParen},
        Parser,
    },
    tokenizer::TokenKind,
    tree::{Node, OpKind},
    try_parse_catch_fatal,
};

/// A parsing function for one level of the expression grammar.
type Level = fn(&mut Parser) -> Result<Node, Error>;

/// Consumes the next token if it is one of the operators in `table`, returning the matching
/// operator kind.
fn operator(
    input: &mut Parser,
    expected: &'static str,
    table: &[(TokenKind, OpKind)],
) -> Result<OpKind, Error> {
    let token = input.next_token();
    let kind = token
        .as_ref()
        .and_then(|token| table.iter().find(|(kind, _)| *kind == token.kind))
        .map(|(_, op)| op.clone());
    match kind {
        Some(kind) => Ok(kind),
        None => Err(input.unexpected(expected, token.as_ref())),
    }
}

/// Parses `operand ((op) operand)*` into a left-associated n-ary tree.
///
/// A run of the same operator extends the node built by this loop, so `a - b - c` becomes
/// `Sub(a, b, c)`. A different operator wraps the node built so far, so `a + b - c` becomes
/// `Sub(Add(a, b), c)`.
fn n_ary(
    input: &mut Parser,
    operand: Level,
    expected: &'static str,
    table: &[(TokenKind, OpKind)],
) -> Result<Node, Error> {
    let mut acc = input.try_parse_with_fn(operand)?;
    let mut built: Option<OpKind> = None;

    while let Some((kind, rhs)) = input.try_parse_optional(|input| {
        let kind = operator(input, expected, table)?;
        let rhs = operand(input)?;
        Ok((kind, rhs))
    })? {
        if built.as_ref() == Some(&kind) {
            if let Some(children) = acc.children_mut() {
                children.push(rhs);
            }
        } else {
            acc = Node::op(kind.clone(), vec![acc, rhs]);
            built = Some(kind);
        }
    }

    Ok(acc)
}

/// `Expression := Sum (("<" | ">" | "~") Sum)?`
pub fn expression(input: &mut Parser) -> Result<Node, Error> {
    let lhs = input.try_parse_with_fn(sum)?;
    let rhs = input.try_parse_optional(|input| {
        let kind = operator(input, "a comparison", &[
            (TokenKind::Less, OpKind::Less),
            (TokenKind::Greater, OpKind::More),
            (TokenKind::Tilde, OpKind::Eq),
        ])?;
        Ok((kind, sum(input)?))
    })?;

    Ok(match rhs {
        Some((kind, rhs)) => Node::op(kind, vec![lhs, rhs]),
        None => lhs,
    })
}

/// `Sum := Mul (("+" | "-") Mul)*`
pub fn sum(input: &mut Parser) -> Result<Node, Error> {
    n_ary(input, mul, "`+` or `-`", &[
        (TokenKind::Add, OpKind::Add),
        (TokenKind::Sub, OpKind::Sub),
    ])
}

/// `Mul := Power (("*" | "/") Power)*`
pub fn mul(input: &mut Parser) -> Result<Node, Error> {
    n_ary(input, power, "`*` or `/`", &[
        (TokenKind::Mul, OpKind::Mul),
        (TokenKind::Div, OpKind::Div),
    ])
}

/// `Power := Part ("^" Part)?`
///
/// At most one `^` is consumed, so `a^b^c` leaves `^c` for the caller.
pub fn power(input: &mut Parser) -> Result<Node, Error> {
    let base = input.try_parse_with_fn(part)?;
    let exponent = input.try_parse_optional(|input| {
        input.try_parse::<Exp>()?;
        part(input)
    })?;

    Ok(match exponent {
        Some(exponent) => Node::op(OpKind::Power, vec![base, exponent]),
        None => base,
    })
}

/// `"(" Expression ")"`
fn paren(input: &mut Parser) -> Result<Node, Error> {
    input.try_parse::<OpenParen>()?;
    let inner = expression(input)?;
    input.try_parse::<CloseParen>()?;
    Ok(inner)
}

/// `Part := "(" Expression ")" | Assignment | Double | FuncCall | Id`
///
/// If no alternative matches, the failure is reported as a missing expression at the start of
/// the part.
pub fn part(input: &mut Parser) -> Result<Node, Error> {
    let _ = try_parse_catch_fatal!(
        input.try_parse_with_fn(paren),
        input.try_parse_with_fn(assignment),
        input.try_parse::<LitNum>().map(|num| Node::constant(num.value)),
        input.try_parse_with_fn(call),
        input.try_parse::<LitSym>().map(|sym| Node::variable(sym.name)),
    );

    let found = input.peek_token().cloned();
    Err(input.unexpected("an expression", found.as_ref()))
}
