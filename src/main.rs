use std::{fs, process::ExitCode};

use clap::Parser;
use keval::{
    KevalError, Registry,
    interpreter::{lexer::tokenize, parser::core::parse},
};
use log::{debug, info};

/// keval evaluates mathematical expressions such as `(3+4)(2-5)` or
/// `2^3^2 - sqrt(16)`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells keval to read expressions from a file, one per line.
    ///
    /// Empty lines and lines starting with `#` are skipped.
    #[arg(short, long)]
    file: bool,

    /// Prints the token stream instead of evaluating.
    #[arg(short, long)]
    tokens: bool,

    expression: String,
}

/// Runs one expression through the pipeline, logging each stage.
fn run(expression: &str, registry: &Registry, print_tokens: bool) -> Result<String, KevalError> {
    let tokens = tokenize(expression, registry)?;
    debug!("tokens: {tokens:?}");

    if print_tokens {
        let spelled: Vec<String> = tokens.iter().map(|(token, _)| token.to_string()).collect();
        return Ok(spelled.join(" "));
    }

    let tree = parse(&tokens, registry, expression)?;
    debug!("tree: {tree}");

    tree.eval().map(|value| value.to_string())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    let registry = Registry::builtin();

    let lines: Vec<String> = if args.file {
        match fs::read_to_string(&args.expression) {
            Ok(contents) => contents.lines()
                                    .map(str::trim)
                                    .filter(|line| !line.is_empty() && !line.starts_with('#'))
                                    .map(str::to_string)
                                    .collect(),
            Err(_) => {
                eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                          &args.expression);
                return ExitCode::FAILURE;
            },
        }
    } else {
        vec![args.expression]
    };

    for line in &lines {
        if args.file {
            info!("evaluating '{line}'");
        }
        match run(line, registry, args.tokens) {
            Ok(output) => println!("{output}"),
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            },
        }
    }

    ExitCode::SUCCESS
}
