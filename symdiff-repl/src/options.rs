use std::{fmt, str::FromStr};

/// What a line of input is parsed as.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// A sequence of function definitions, which is simplified and printed back.
    Program,

    /// A single expression, which is simplified and differentiated.
    ///
    /// This is the default option.
    #[default]
    Expression,
}

impl FromStr for Mode {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "program" | "prog" => Ok(Self::Program),
            "expression" | "expr" => Ok(Self::Expression),
            _ => Err(CommandError::UnknownMode(s.to_owned())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Program => write!(f, "program"),
            Self::Expression => write!(f, "expr"),
        }
    }
}

/// Options that control how the REPL handles its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplOptions {
    /// The variable to differentiate with respect to.
    ///
    /// The default value is `x`.
    pub var: String,

    /// What a line of input is parsed as.
    pub mode: Mode,

    /// How many times expressions are differentiated.
    ///
    /// The default value is `1`.
    pub order: usize,
}

impl Default for ReplOptions {
    fn default() -> Self {
        Self {
            var: "x".to_owned(),
            mode: Mode::default(),
            order: 1,
        }
    }
}

impl ReplOptions {
    /// Wraps the given [`ReplOptions`] into a builder for further customization.
    pub fn into_builder(self) -> ReplOptionsBuilder {
        ReplOptionsBuilder(self)
    }
}

/// Helper struct to build a [`ReplOptions`] struct.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplOptionsBuilder(ReplOptions);

impl ReplOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the variable to differentiate with respect to.
    pub fn var(mut self, var: impl Into<String>) -> Self {
        self.0.var = var.into();
        self
    }

    /// Sets what a line of input is parsed as. See [`Mode`] for more information.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.0.mode = mode;
        self
    }

    /// Sets how many times expressions are differentiated.
    pub fn order(mut self, order: usize) -> Self {
        self.0.order = order;
        self
    }

    /// Builds the options.
    pub fn build(self) -> ReplOptions {
        self.0
    }
}

/// A malformed `:` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The command name is not known.
    UnknownCommand(String),

    /// The command needs an argument that was not given.
    MissingArgument(&'static str),

    /// The argument of `:var` is not a valid identifier.
    InvalidVariable(String),

    /// The argument of `:mode` is not a known mode.
    UnknownMode(String),

    /// The argument of `:order` is not a number.
    InvalidOrder(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnknownCommand(name) => write!(f, "unknown command `:{}`, try `:help`", name),
            Self::MissingArgument(command) => write!(f, "`:{}` needs an argument", command),
            Self::InvalidVariable(name) => write!(f, "`{}` is not a valid variable name", name),
            Self::UnknownMode(mode) => write!(f, "unknown mode `{}`, expected `program` or `expr`", mode),
            Self::InvalidOrder(order) => write!(f, "`{}` is not a valid derivative order", order),
        }
    }
}

impl std::error::Error for CommandError {}

/// The text printed by `:help`.
pub const HELP: &str = "\
commands:
  :var <name>            differentiate with respect to <name>
  :mode program|expr     parse lines as programs or as expressions
  :order <n>             differentiate expressions <n> times
  :options               show the current options
  :help                  show this message";

/// A `:` command entered at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Var(String),
    Mode(Mode),
    Order(usize),
    Options,
    Help,
}

impl Command {
    /// Parses a command line, if the line is one. Lines that don't start with `:` are not
    /// commands, and return [`None`].
    pub fn parse(line: &str) -> Option<Result<Self, CommandError>> {
        let rest = line.trim().strip_prefix(':')?;
        let mut words = rest.split_whitespace();
        let name = words.next().unwrap_or("");
        let argument = words.next();

        let command = match (name, argument) {
            ("var", Some(var)) => {
                let valid = var.len() <= symdiff_parser::tree::MAX_IDENT_LEN
                    && var.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
                    && var.chars().all(|c| c.is_ascii_alphanumeric());
                if valid {
                    Ok(Self::Var(var.to_owned()))
                } else {
                    Err(CommandError::InvalidVariable(var.to_owned()))
                }
            },
            ("mode", Some(mode)) => mode.parse().map(Self::Mode),
            ("order", Some(order)) => order.parse()
                .map(Self::Order)
                .map_err(|_| CommandError::InvalidOrder(order.to_owned())),
            ("var", None) => Err(CommandError::MissingArgument("var")),
            ("mode", None) => Err(CommandError::MissingArgument("mode")),
            ("order", None) => Err(CommandError::MissingArgument("order")),
            ("options", _) => Ok(Self::Options),
            ("help", _) => Ok(Self::Help),
            (name, _) => Err(CommandError::UnknownCommand(name.to_owned())),
        };
        Some(command)
    }

    /// Applies the command to the options, returning the text to print.
    pub fn apply(self, options: &mut ReplOptions) -> String {
        match self {
            Self::Var(var) => {
                options.var = var;
                format!("differentiating with respect to `{}`", options.var)
            },
            Self::Mode(mode) => {
                options.mode = mode;
                format!("mode set to {}", mode)
            },
            Self::Order(order) => {
                options.order = order;
                format!("derivative order set to {}", order)
            },
            Self::Options => format!(
                "var = {}, mode = {}, order = {}",
                options.var, options.mode, options.order,
            ),
            Self::Help => HELP.to_owned(),
        }
    }
}
