use std::ops::Range;
use super::{
    error::{Error, IdentifierTooLong},
    token::{Name, Sub},
    Parse,
    Parser,
};
use crate::tokenizer::TokenKind;
use crate::tree::MAX_IDENT_LEN;

/// A number literal, `-? digit+ (. digit+)?`. The optional minus sign must be written directly
/// in front of the digits, and belongs to the literal only: there is no general unary minus.
#[derive(Debug, Clone, PartialEq)]
pub struct LitNum {
    /// The value of the number literal.
    pub value: f64,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitNum {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let minus = input.try_parse::<Sub>().ok();
        let token = match input.next_token() {
            Some(token)
                if matches!(token.kind, TokenKind::Int | TokenKind::Float)
                    && minus.as_ref().map_or(true, |minus| minus.span.end == token.span.start) => token,
            found => return Err(input.unexpected("a number", found.as_ref())),
        };
        let magnitude = token.lexeme
            .parse::<f64>()
            .map_err(|_| input.unexpected("a number", Some(&token)))?;

        Ok(match minus {
            Some(minus) => Self {
                value: -magnitude,
                span: minus.span.start..token.span.end,
            },
            None => Self {
                value: magnitude,
                span: token.span,
            },
        })
    }
}

/// A symbol / identifier literal, used for variables, parameters, and function names.
#[derive(Debug, Clone, PartialEq)]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitSym {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.try_parse::<Name>()?;
        if token.lexeme.len() > MAX_IDENT_LEN {
            return Err(input.error_fatal(token.span, IdentifierTooLong { name: token.lexeme }));
        }

        Ok(Self {
            name: token.lexeme,
            span: token.span,
        })
    }
}
