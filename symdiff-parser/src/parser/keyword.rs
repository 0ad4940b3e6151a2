use crate::{
    parser::{error::Error, Parse, Parser},
    tokenizer::TokenKind,
};
use std::ops::Range;

/// Generates a unit struct for each keyword, as well as a simple [`Parse`] implementation for each
/// keyword. This enables the parser to use and request keywords as a type, which is much more
/// ergonomic than using a string.
macro_rules! keywords {
    ($(($name:ident, $lexeme:tt))*) => {
        $(
            #[derive(Clone, Debug, PartialEq)]
            pub struct $name {
                pub span: Range<usize>,
            }

            impl Parse for $name {
                fn parse(input: &mut Parser) -> Result<Self, Error> {
                    match input.next_token() {
                        Some(token)
                            if token.kind == TokenKind::Keyword
                                && token.lexeme == stringify!($lexeme) => Ok(Self {
                            span: token.span,
                        }),
                        found => Err(input.unexpected(
                            concat!("keyword `", stringify!($lexeme), "`"),
                            found.as_ref(),
                        )),
                    }
                }
            }
        )*
    };
}

keywords!(
    (Function, function)
    (If, if)
    (Else, else)
    (While, while)
    (For, for)
    (Return, return)
);
