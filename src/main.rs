use clap::Parser;
use std::io::{BufRead, stderr, stdin};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use winforth::runtime::{
    built_ins::register_builtin_words,
    error,
    interpreter::{
        CodeManagement, Interpreter, InterpreterStack, forth_interpreter::ForthInterpreter,
    },
};

/// The path stamped on tokens read from the terminal.
const REPL_PATH: &str = "<repl>";

/// An interactive interpreter for a small Forth-like stack language.
#[derive(Parser)]
#[command(name = "winforth", version)]
struct Args {
    /// Source files to load and run, in order, before the prompt starts.
    files: Vec<String>,

    /// Exit once the files have been loaded instead of reading from the terminal.
    #[arg(long)]
    no_repl: bool,

    /// Directory to look in when a file isn't found as given.  May be repeated.
    #[arg(long = "search-path", env = "WINFORTH_PATH", value_delimiter = ':')]
    search_paths: Vec<String>,

    /// Log filter, overridden by RUST_LOG when that is set.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// Report how an evaluation went.  On failure the error and the stack are printed and the session
/// is reset so that it can take more input.
fn report(interpreter: &mut ForthInterpreter, result: error::Result<()>) -> error::Result<()> {
    match result {
        Ok(()) => {
            if !interpreter.exit_requested() {
                writeln!(interpreter.output(), " ok")?;
            }
        }

        Err(err) => {
            debug!(kind = ?err.kind(), "evaluation failed");

            let dump = interpreter.stack_dump();

            writeln!(interpreter.output(), "\n{}", err)?;
            writeln!(interpreter.output(), "Stack trace: {}", dump)?;

            interpreter.recover();
            eprint!("\x07");
        }
    }

    interpreter.flush()
}

/// Read lines from the terminal until it closes or the session ends.  While a `:` definition is
/// open, lines are gathered without being evaluated.
fn repl(interpreter: &mut ForthInterpreter) -> error::Result<()> {
    let mut lines = stdin().lock().lines();
    let mut line_number = 0;

    while !interpreter.exit_requested() {
        loop {
            let line = match lines.next() {
                Some(line) => line?,
                None => return Ok(()),
            };

            line_number += 1;

            if !interpreter.ingest_line(REPL_PATH, line_number, &line) {
                break;
            }
        }

        let result = interpreter.evaluate_pending();
        report(interpreter, result)?;
    }

    Ok(())
}

fn main() -> error::Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr)
        .init();

    // Create the session and give it all of the native words.
    let mut interpreter = ForthInterpreter::new();

    register_builtin_words(&mut interpreter);

    for path in &args.search_paths {
        interpreter.add_search_path(path)?;
    }

    println!("Winforth {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("type 'bye' to quit");

    for file in &args.files {
        if interpreter.exit_requested() {
            break;
        }

        println!("loading {}", file);

        let result = interpreter.process_source_file(file);
        report(&mut interpreter, result)?;
    }

    if !args.no_repl && !interpreter.exit_requested() {
        repl(&mut interpreter)?;
    }

    if interpreter.exit_requested() {
        eprintln!("Quaerendo invenietis.");
    }

    Ok(())
}
