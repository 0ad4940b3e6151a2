mod error;
mod options;
mod render;

use error::Error;
use options::{Command, Mode, ReplOptions};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs, io::{self, IsTerminal, Read}, path::Path, process::ExitCode};
use symdiff_compute::symbolic::{nth_derivative, simplify, ExprRef};
use symdiff_parser::{with_sentinel, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Installs the logger. The filter comes from `RUST_LOG`, and defaults to `warn`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Returns the name of the `order`th derivative with respect to `var`, such as `d/dx` or
/// `d^2/dx^2`.
fn derivative_name(var: &str, order: usize) -> String {
    match order {
        1 => format!("d/d{}", var),
        n => format!("d^{n}/d{}^{n}", var),
    }
}

/// Parses the given source, which must end with `$`, and processes it according to the options,
/// returning the text to print.
///
/// An expression is simplified and differentiated. A program is simplified.
fn process(source: &str, options: &ReplOptions) -> Result<String, Error> {
    let mut parser = Parser::new(source);
    match options.mode {
        Mode::Expression => {
            let mut tree = parser.parse_expression()?;
            let derivative = nth_derivative(ExprRef::try_from(&tree)?, &options.var, options.order);
            simplify(&mut tree);
            Ok(format!(
                "{}\n{}: {}",
                tree,
                derivative_name(&options.var, options.order),
                derivative,
            ))
        },
        Mode::Program => {
            let mut tree = parser.parse_program()?;
            simplify(&mut tree);
            Ok(tree.to_string())
        },
    }
}

/// Handles a line of input, which is either a `:` command or code. Returns false if the line
/// failed.
fn handle_line(line: &str, options: &mut ReplOptions) -> bool {
    if line.trim().is_empty() {
        return true;
    }

    if let Some(command) = Command::parse(line) {
        return match command {
            Ok(command) => {
                println!("{}", command.apply(options));
                true
            },
            Err(err) => {
                Error::from(err).report_to_stderr("input", line);
                false
            },
        };
    }

    let source = with_sentinel(line);
    match process(&source, options) {
        Ok(output) => {
            println!("{}", output);
            true
        },
        Err(err) => {
            err.report_to_stderr("input", &source);
            false
        },
    }
}

/// Parses the program in the given file, simplifies it, prints it, and writes its DOT and TeX
/// renderings next to the file.
fn run_file(path: &Path) -> Result<(), Error> {
    let contents = fs::read_to_string(path).map_err(|err| Error::Io(path.to_owned(), err))?;
    let source = with_sentinel(&contents);
    let src_id = path.to_string_lossy();

    let mut tree = match Parser::new(&source).parse_program() {
        Ok(tree) => tree,
        Err(err) => {
            // the error is reported here, where the source is still available
            let err = Error::from(err);
            err.report_to_stderr(&src_id, &source);
            return Err(err);
        },
    };
    simplify(&mut tree);
    println!("{}", tree);

    for written in render::write_outputs(path, &tree)? {
        eprintln!("{}", written.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    let mut args = std::env::args();
    args.next();

    if let Some(filename) = args.next() {
        // run source file
        match run_file(Path::new(&filename)) {
            Ok(()) => ExitCode::SUCCESS,
            Err(Error::Parse(_)) => ExitCode::FAILURE,
            Err(err) => {
                err.report_to_stderr(&filename, "");
                ExitCode::FAILURE
            },
        }
    } else if !io::stdin().is_terminal() {
        // read lines from stdin
        let mut input = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut input) {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }

        let mut options = ReplOptions::default();
        let failures = input.lines()
            .filter(|line| !handle_line(line, &mut options))
            .count();
        debug!(failures, "finished reading stdin");

        if failures == 0 {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("error: {}", err);
                return ExitCode::FAILURE;
            },
        };
        let mut options = ReplOptions::default();

        fn process_line(rl: &mut DefaultEditor, options: &mut ReplOptions) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            handle_line(&input, options);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl, &mut options) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }

        ExitCode::SUCCESS
    }
}
