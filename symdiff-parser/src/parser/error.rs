use ariadne::Fmt;
use symdiff_attrs::ErrorKind;
use symdiff_error::{ErrorKind, EXPR};
use crate::tree::MAX_IDENT_LEN;

pub use symdiff_error::Error;

/// The end of the input (the `$` sentinel, or the end of the text itself) was reached before the
/// current production was complete.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("I expected to see {} here", expected.fg(EXPR))],
    help = "the input ends at the first `$`; anything after it is ignored",
)]
pub struct UnexpectedEnd {
    /// What the parser expected to see instead.
    pub expected: &'static str,
}

/// The next symbol does not match what the current production requires.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected `{}`", found),
    labels = [format!("I expected to see {} here", expected.fg(EXPR))],
)]
pub struct UnexpectedSymbol {
    /// What the parser expected to see instead.
    pub expected: &'static str,

    /// The text that was found.
    pub found: String,
}

/// An identifier is longer than [`MAX_IDENT_LEN`] bytes.
///
/// This error is fatal: it stops any backtracking in progress.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "identifier is too long",
    labels = [format!("this identifier is {} bytes long", name.len())],
    help = format!("identifiers can be at most {} bytes long", MAX_IDENT_LEN.fg(EXPR)),
)]
pub struct IdentifierTooLong {
    /// The offending identifier.
    pub name: String,
}
