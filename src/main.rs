use std::{
    fs,
    io::{self, BufRead, Write},
};

use clap::Parser;
use rolox::{Session, error::ExecError};

/// rolox is a tree-walking interpreter for the Lox scripting language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a script to run. Without it, an interactive prompt starts.
    script: Option<String>,
}

fn main() {
    let args = Args::parse();

    match args.script {
        Some(path) => run_file(&path),
        None => run_prompt(),
    }
}

/// Runs a script file and exits with the conventional code on failure:
/// 65 for errors detected before execution, 70 for runtime errors.
fn run_file(path: &str) {
    let source = fs::read_to_string(path).unwrap_or_else(|_| {
                     eprintln!("Failed to read the input file '{path}'. Perhaps this file does not exist?");
                     std::process::exit(1);
                 });

    if let Err(e) = rolox::run(&source) {
        eprintln!("{e}");
        let code = match e {
            ExecError::Static(_) => 65,
            ExecError::Runtime(_) => 70,
        };
        std::process::exit(code);
    }
}

/// Runs the interactive prompt.
///
/// Each line is first tried as a bare expression, whose value is printed
/// back. When that fails to parse, the line is run as statements instead,
/// so declarations and control flow work at the prompt too. Errors are
/// printed and the prompt continues; globals persist across lines.
fn run_prompt() {
    let mut session = Session::new();

    let stdin = io::stdin();
    print_prompt();

    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };

        match session.run_expression(&line) {
            Ok(value) => println!("{value}"),
            Err(ExecError::Static(_)) => {
                if let Err(e) = session.run(&line) {
                    eprintln!("{e}");
                }
            },
            Err(e) => eprintln!("{e}"),
        }

        print_prompt();
    }
}

fn print_prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}
