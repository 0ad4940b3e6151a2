use ariadne::Source;
use std::{fmt, io, path::PathBuf};
use symdiff_compute::symbolic::NotAnExpression;
use symdiff_parser::parser::error::Error as ParseError;
use crate::options::CommandError;

/// Utility enum to package errors that can occur while handling a line or a file.
#[derive(Debug)]
pub enum Error {
    /// Error that occurred while parsing.
    Parse(ParseError),

    /// The input parsed, but is not an expression that can be differentiated.
    NotAnExpression(NotAnExpression),

    /// A malformed `:` command.
    Command(CommandError),

    /// A file could not be read or written.
    Io(PathBuf, io::Error),
}

impl Error {
    /// Report this error to stderr.
    ///
    /// Parse errors are rendered with `ariadne`, highlighting the problem in `input`.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) {
        match self {
            Self::Parse(err) => {
                // nothing sensible can be done if stderr is gone
                let _ = err.build_report(src_id).eprint((src_id, Source::from(input)));
            },
            _ => eprintln!("error: {}", self),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "parse error at byte {}", err.position()),
            Self::NotAnExpression(err) => write!(f, "{}", err),
            Self::Command(err) => write!(f, "{}", err),
            Self::Io(path, err) => write!(f, "{}: {}", path.display(), err),
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<NotAnExpression> for Error {
    fn from(err: NotAnExpression) -> Self {
        Self::NotAnExpression(err)
    }
}

impl From<CommandError> for Error {
    fn from(err: CommandError) -> Self {
        Self::Command(err)
    }
}
