use crate::{
    parser::{error::Error, Parse, Parser},
    tokenizer::TokenKind,
};
use std::ops::Range;

/// Generates a struct for each token kind, as well as a simple [`Parse`] implementation for each
/// token kind. This enables the parser to use and request token kinds as a type, which is much
/// more ergonomic than using a string.
///
/// The string literal next to each kind describes the token in error messages.
macro_rules! token_kinds {
    ($($name:ident => $expected:literal)*) => {
        $(
            #[derive(Clone, Debug, PartialEq)]
            pub struct $name {
                pub lexeme: String,
                pub span: Range<usize>,
            }

            impl Parse for $name {
                fn parse(input: &mut Parser) -> Result<Self, Error> {
                    match input.next_token() {
                        Some(token) if token.kind == TokenKind::$name => Ok(Self {
                            lexeme: token.lexeme.to_owned(),
                            span: token.span,
                        }),
                        found => Err(input.unexpected($expected, found.as_ref())),
                    }
                }
            }
        )*
    };
}

token_kinds!(
    Add => "`+`"
    Sub => "`-`"
    Mul => "`*`"
    Div => "`/`"
    Exp => "`^`"
    Greater => "`>`"
    Less => "`<`"
    Tilde => "`~`"
    Assign => "`=`"
    Comma => "`,`"
    Semicolon => "`;`"
    OpenParen => "`(`"
    CloseParen => "`)`"
    OpenCurly => "`{`"
    CloseCurly => "`}`"
    End => "the end of the input `$`"
    Name => "an identifier"
    Int => "an integer"
    Float => "a number"
);
