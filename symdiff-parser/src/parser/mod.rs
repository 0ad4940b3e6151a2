//! The backtracking recursive-descent parser.
//!
//! Each nonterminal of the grammar is a function taking the [`Parser`] state. Alternatives are
//! tried in a fixed order; when one fails, the cursor is restored and its partially built tree,
//! an owned local of the failed call, is dropped before the next alternative runs.

pub mod assign;
pub mod call;
pub mod error;
pub mod expr;
pub mod func;
pub mod keyword;
pub mod literal;
pub mod stmt;
pub mod token;

use error::{Error, UnexpectedEnd, UnexpectedSymbol};
use std::ops::Range;
use symdiff_error::ErrorKind;
use super::{
    tokenizer::{tokenize_complete, Token, TokenKind},
    tree::Node,
};
use token::End;
use tracing::debug;

/// Attempts each of the given parsing expressions in order, returning from the enclosing function
/// with the value of the first one that succeeds.
///
/// A fatal error immediately short-circuits the parsing process. If every expression fails, the
/// macro evaluates to the error of the last one.
#[macro_export]
macro_rules! try_parse_catch_fatal {
    ($($expr:expr),+ $(,)?) => {{
        $(
            #[allow(unused_variables)]
            let err = match $expr {
                Ok(value) => return Ok(value),
                Err(err) if err.fatal => return Err(err),
                Err(err) => err,
            };
        )+
        err
    }};
}

/// Appends the `$` sentinel to the given source, unless it already ends with one.
pub fn with_sentinel(source: &str) -> String {
    if source.trim_end().ends_with('$') {
        source.to_owned()
    } else {
        format!("{}$", source)
    }
}

/// A high-level parser for the language. This is the type to use to parse an arbitrary piece of
/// code into a [`Node`] tree.
///
/// The source must end with the `$` sentinel. Parsing stops at the first `$`; text after it is
/// never looked at.
#[derive(Debug)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// The failure recorded at the furthest position in the source so far.
    furthest: Option<Error>,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
            furthest: None,
        }
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the next non-whitespace token without moving the cursor, or [`None`] if the
    /// cursor is at the end of the stream.
    pub fn peek_token(&self) -> Option<&Token<'source>> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
    }

    /// Returns the span of the next non-whitespace token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.peek_token().map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns [`None`] if there are no more tokens.
    pub fn next_token(&mut self) -> Option<Token<'source>> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if !token.is_whitespace() {
                // cloning is cheap: only Range<_> is cloned
                return Some(token.clone());
            }
        }

        None
    }

    /// Creates a non-fatal error with the given span, and remembers it if it is the furthest
    /// failure seen so far. Among failures at the same position, the latest one is kept.
    pub fn error<K: ErrorKind + Clone + 'static>(&mut self, span: Range<usize>, kind: K) -> Error {
        let is_furthest = self.furthest
            .as_ref()
            .map_or(true, |furthest| span.start >= furthest.position());
        if is_furthest {
            self.furthest = Some(Error::new(vec![span.clone()], kind.clone()));
        }
        Error::new(vec![span], kind)
    }

    /// Creates a fatal error with the given span.
    pub fn error_fatal(&self, span: Range<usize>, kind: impl ErrorKind + 'static) -> Error {
        Error::new_fatal(vec![span], kind)
    }

    /// Creates the error for finding `found` where `expected` was required. Reaching the `$`
    /// sentinel or running out of tokens is reported as [`UnexpectedEnd`], anything else as
    /// [`UnexpectedSymbol`].
    pub fn unexpected(&mut self, expected: &'static str, found: Option<&Token>) -> Error {
        match found {
            Some(token) if token.kind != TokenKind::End => self.error(
                token.span.clone(),
                UnexpectedSymbol { expected, found: token.lexeme.to_owned() },
            ),
            Some(token) => self.error(token.span.clone(), UnexpectedEnd { expected }),
            None => self.error(self.eof_span(), UnexpectedEnd { expected }),
        }
    }

    /// Returns the furthest failure recorded so far.
    pub fn furthest_error(&self) -> Option<&Error> {
        self.furthest.as_ref()
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value. This function can be used in the [`Parse::parse`]
    /// implementation of a type with the given [`Parser`], as it will automatically backtrack the
    /// cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Speculatively parses an optional value. A non-fatal failure restores the cursor and
    /// returns [`None`]; a fatal failure is returned as an error.
    pub fn try_parse_optional<T, F>(&mut self, f: F) -> Result<Option<T>, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        match self.try_parse_with_fn(f) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.fatal => Err(err),
            Err(_) => Ok(None),
        }
    }

    /// Speculatively parses zero or more values, each separated by a `D` token.
    ///
    /// The repetition stops before the first separator that is not followed by a value, leaving
    /// that separator for the caller to reject.
    pub fn try_parse_separated<D, T, F>(&mut self, mut f: F) -> Result<Vec<T>, Error>
    where
        D: Parse,
        F: FnMut(&mut Parser<'source>) -> Result<T, Error>,
    {
        let mut values = match self.try_parse_optional(&mut f)? {
            Some(value) => vec![value],
            None => return Ok(Vec::new()),
        };

        while let Some(value) = self.try_parse_optional(|input| {
            input.try_parse::<D>()?;
            f(input)
        })? {
            values.push(value);
        }

        Ok(values)
    }

    /// Parses a value with the given function, then the `$` sentinel.
    ///
    /// If parsing fails, the furthest failure recorded along the way is returned instead of the
    /// error of the outermost production, since that is the one that points at the actual
    /// mistake.
    fn parse_complete<F>(&mut self, f: F) -> Result<Node, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<Node, Error>,
    {
        self.cursor = 0;
        self.furthest = None;

        let result = self.try_parse_with_fn(|input| {
            let node = f(input)?;
            input.try_parse::<End>()?;
            Ok(node)
        });

        match result {
            Ok(node) => Ok(node),
            Err(err) if err.fatal => {
                debug!(position = err.position(), kind = ?err.kind, "fatal parse error");
                Err(err)
            },
            Err(err) => {
                let err = self.furthest.take().unwrap_or(err);
                debug!(position = err.position(), kind = ?err.kind, "parse failed");
                Err(err)
            },
        }
    }

    /// Parses a whole program: a sequence of function definitions, followed by `$`.
    ///
    /// Returns a [`OpKind::Sequence`](crate::tree::OpKind::Sequence) of
    /// [`OpKind::FuncDef`](crate::tree::OpKind::FuncDef) nodes.
    pub fn parse_program(&mut self) -> Result<Node, Error> {
        self.parse_complete(func::program)
    }

    /// Parses a single expression, followed by `$`.
    pub fn parse_expression(&mut self) -> Result<Node, Error> {
        self.parse_complete(expr::expression)
    }

    /// Parses a sequence of statements, followed by `$`.
    pub fn parse_statements(&mut self) -> Result<Node, Error> {
        self.parse_complete(stmt::sequence)
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use crate::tree::OpKind;
    use error::IdentifierTooLong;

    fn var(name: &str) -> Node {
        Node::variable(name)
    }

    fn num(value: f64) -> Node {
        Node::constant(value)
    }

    fn op(kind: OpKind, children: Vec<Node>) -> Node {
        Node::op(kind, children)
    }

    fn expr(source: &str) -> Node {
        Parser::new(&with_sentinel(source)).parse_expression().unwrap()
    }

    fn expr_err(source: &str) -> Error {
        Parser::new(&with_sentinel(source)).parse_expression().unwrap_err()
    }

    #[test]
    fn literal_int() {
        assert_eq!(expr("16"), num(16.0));
    }

    #[test]
    fn literal_float() {
        assert_eq!(expr("3.14"), num(3.14));
    }

    #[test]
    fn literal_negative() {
        assert_eq!(expr("-2.5"), num(-2.5));
        assert_eq!(expr("x*-3"), op(OpKind::Mul, vec![var("x"), num(-3.0)]));
    }

    #[test]
    fn minus_must_touch_digits() {
        let err = expr_err("- 3");
        assert!(err.is::<UnexpectedSymbol>());
    }

    #[test]
    fn no_unary_minus_on_names() {
        let err = expr_err("-x");
        assert_eq!(err.kind::<UnexpectedSymbol>(), Some(&UnexpectedSymbol {
            expected: "a number",
            found: "x".to_string(),
        }));
    }

    #[test]
    fn parenthesized_sum() {
        assert_eq!(expr("(3.0+4.0)"), op(OpKind::Add, vec![num(3.0), num(4.0)]));
    }

    #[test]
    fn precedence() {
        // 1 + 2 * x ^ 3
        assert_eq!(expr("1 + 2 * x ^ 3"), op(OpKind::Add, vec![
            num(1.0),
            op(OpKind::Mul, vec![
                num(2.0),
                op(OpKind::Power, vec![var("x"), num(3.0)]),
            ]),
        ]));
    }

    #[test]
    fn same_operator_extends() {
        assert_eq!(expr("a - b - c"), op(OpKind::Sub, vec![var("a"), var("b"), var("c")]));
        assert_eq!(expr("a * b * c / d / e"), op(OpKind::Div, vec![
            op(OpKind::Mul, vec![var("a"), var("b"), var("c")]),
            var("d"),
            var("e"),
        ]));
    }

    #[test]
    fn different_operator_wraps() {
        assert_eq!(expr("a + b - c + d"), op(OpKind::Add, vec![
            op(OpKind::Sub, vec![
                op(OpKind::Add, vec![var("a"), var("b")]),
                var("c"),
            ]),
            var("d"),
        ]));
    }

    #[test]
    fn parenthesized_operand_is_not_extended() {
        assert_eq!(expr("(a - b) - c"), op(OpKind::Sub, vec![
            op(OpKind::Sub, vec![var("a"), var("b")]),
            var("c"),
        ]));
    }

    #[test]
    fn power_is_single_level() {
        assert_eq!(expr("(a^b)^c"), op(OpKind::Power, vec![
            op(OpKind::Power, vec![var("a"), var("b")]),
            var("c"),
        ]));

        // the second `^` is left unconsumed
        let err = expr_err("a^b^c");
        assert_eq!(err.kind::<UnexpectedSymbol>(), Some(&UnexpectedSymbol {
            expected: "the end of the input `$`",
            found: "^".to_string(),
        }));
        assert_eq!(err.position(), 3);
    }

    #[test]
    fn comparisons() {
        assert_eq!(expr("x < 1"), op(OpKind::Less, vec![var("x"), num(1.0)]));
        assert_eq!(expr("x + 1 > y"), op(OpKind::More, vec![
            op(OpKind::Add, vec![var("x"), num(1.0)]),
            var("y"),
        ]));
        assert_eq!(expr("a ~ b"), op(OpKind::Eq, vec![var("a"), var("b")]));
        assert!(expr_err("a < b < c").is::<UnexpectedSymbol>());
    }

    #[test]
    fn assignment() {
        assert_eq!(expr("x = y + 1"), op(OpKind::Assignment, vec![
            var("x"),
            op(OpKind::Add, vec![var("y"), num(1.0)]),
        ]));
    }

    #[test]
    fn assignment_inside_sum() {
        // assignment is a part, so its value swallows the rest of the sum
        assert_eq!(expr("1 + x = 2 + 3"), op(OpKind::Add, vec![
            num(1.0),
            op(OpKind::Assignment, vec![
                var("x"),
                op(OpKind::Add, vec![num(2.0), num(3.0)]),
            ]),
        ]));
    }

    #[test]
    fn calls() {
        assert_eq!(expr("f()"), op(OpKind::FuncCall("f".into()), vec![]));
        assert_eq!(expr("g(x, 2, h(y))"), op(OpKind::FuncCall("g".into()), vec![
            var("x"),
            num(2.0),
            op(OpKind::FuncCall("h".into()), vec![var("y")]),
        ]));
    }

    #[test]
    fn builtin_functions() {
        assert_eq!(expr("ln(x)"), op(OpKind::Ln, vec![var("x")]));
        assert_eq!(expr("sin(x) * cos(x)"), op(OpKind::Mul, vec![
            op(OpKind::Sin, vec![var("x")]),
            op(OpKind::Cos, vec![var("x")]),
        ]));
        // wrong arity falls back to a plain call
        assert_eq!(expr("sin(x, y)"), op(OpKind::FuncCall("sin".into()), vec![var("x"), var("y")]));
    }

    #[test]
    fn dangling_operator() {
        let err = Parser::new("(3.0+)$").parse_expression().unwrap_err();
        assert_eq!(err.kind::<UnexpectedSymbol>(), Some(&UnexpectedSymbol {
            expected: "an expression",
            found: ")".to_string(),
        }));
        assert_eq!(err.position(), 5);
        assert!(!err.fatal);
    }

    #[test]
    fn unclosed_paren() {
        let err = Parser::new("(3.0+4.0$").parse_expression().unwrap_err();
        assert_eq!(err.kind::<UnexpectedEnd>(), Some(&UnexpectedEnd { expected: "`)`" }));
        assert_eq!(err.position(), 8);
    }

    #[test]
    fn missing_sentinel() {
        let err = Parser::new("x + 1").parse_expression().unwrap_err();
        assert!(err.is::<UnexpectedEnd>());
        assert_eq!(err.position(), 5);
    }

    #[test]
    fn text_after_sentinel_is_ignored() {
        let node = Parser::new("x$ this is not parsed )").parse_expression().unwrap();
        assert_eq!(node, var("x"));
    }

    #[test]
    fn identifier_too_long() {
        assert_eq!(expr("abcdefghijklmno"), var("abcdefghijklmno"));

        let err = expr_err("1 + abcdefghijklmnop");
        assert!(err.fatal);
        assert_eq!(err.kind::<IdentifierTooLong>(), Some(&IdentifierTooLong {
            name: "abcdefghijklmnop".to_string(),
        }));
        assert_eq!(err.position(), 4);
    }

    #[test]
    fn keywords_are_not_identifiers() {
        assert!(expr_err("while + 1").is::<UnexpectedSymbol>());
    }

    #[test]
    fn function_definition() {
        let program = Parser::new("function f(a,b){ return(a+b); }$").parse_program().unwrap();
        assert_eq!(program, op(OpKind::Sequence, vec![
            op(OpKind::FuncDef("f".into()), vec![
                var("a"),
                var("b"),
                op(OpKind::Sequence, vec![
                    op(OpKind::Return, vec![op(OpKind::Add, vec![var("a"), var("b")])]),
                ]),
            ]),
        ]));
    }

    #[test]
    fn empty_program() {
        let program = Parser::new("  $").parse_program().unwrap();
        assert_eq!(program, op(OpKind::Sequence, vec![]));
    }

    #[test]
    fn program_with_control_flow() {
        let source = "
            function main() {
                for (i = 0; i < 10; i = i + 1) {
                    if (i ~ 5) { x = f(i); } else { x = 0; }
                }
                while x > 0 { x = x - 1; }
                return(x);
            }
            function f(n) { return(n * 2); }
        $";
        let program = Parser::new(source).parse_program().unwrap();
        let defs = program.children();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].name(), Some("main"));
        assert_eq!(defs[1].name(), Some("f"));

        let body = defs[0].children();
        assert_eq!(body.len(), 1);
        let statements = body[0].children();
        assert_eq!(
            statements.iter().map(|s| s.op_kind().cloned()).collect::<Vec<_>>(),
            vec![Some(OpKind::For), Some(OpKind::While), Some(OpKind::Return)],
        );

        let for_loop = &statements[0];
        assert_eq!(for_loop.children().len(), 4);
        let if_stmt = &for_loop.children()[3].children()[0];
        assert_eq!(if_stmt.op_kind(), Some(&OpKind::If));
        assert_eq!(if_stmt.children().len(), 3);
    }

    #[test]
    fn if_without_else() {
        let node = Parser::new("if (x) { y = 1; }$").parse_statements().unwrap();
        assert_eq!(node, op(OpKind::Sequence, vec![
            op(OpKind::If, vec![
                var("x"),
                op(OpKind::Sequence, vec![
                    op(OpKind::Assignment, vec![var("y"), num(1.0)]),
                ]),
            ]),
        ]));
    }

    #[test]
    fn missing_semicolon() {
        let err = Parser::new("x = 1 y = 2;$").parse_statements().unwrap_err();
        assert_eq!(err.kind::<UnexpectedSymbol>(), Some(&UnexpectedSymbol {
            expected: "`;`",
            found: "y".to_string(),
        }));
    }

    #[test]
    fn trailing_comma_in_params() {
        let err = Parser::new("function f(a,) { }$").parse_program().unwrap_err();
        assert_eq!(err.kind::<UnexpectedSymbol>(), Some(&UnexpectedSymbol {
            expected: "an identifier",
            found: ")".to_string(),
        }));
    }

    #[test]
    fn every_child_accounted_for() {
        let program = Parser::new("function g(p, q) { r = p * (q + 1); return(ln(r)); }$")
            .parse_program()
            .unwrap();
        let labels = program.post_order_iter().map(Node::label).collect::<Vec<_>>();
        assert_eq!(labels, vec![
            "p", "q",
            "r", "p", "q", "1", "+", "*", "=",
            "r", "ln", "return",
            "seq", "g", "seq",
        ]);
    }
}
