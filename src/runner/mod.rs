//! Runs a Monkey source file through the full pipeline.
//!
//! Unlike the REPL, the runner evaluates the whole file as a single program
//! in a fresh environment. The only output on success is whatever `puts`
//! emitted; parse and runtime errors go to stderr with sysexits-style codes.

use crate::object::Environment;
use crate::{Evaluator, Lexer, Parser};
use std::cell::RefCell;
use std::fs;
use std::process::ExitCode;
use std::rc::Rc;

/// Exit code when the file cannot be read (EX_NOINPUT).
const EXIT_NO_INPUT: u8 = 66;
/// Exit code for source files that fail to parse (EX_DATAERR).
const EXIT_PARSE_ERROR: u8 = 65;
/// Exit code for programs that evaluate to a runtime error (EX_SOFTWARE).
const EXIT_RUNTIME_ERROR: u8 = 70;

/// Reads and runs the file at `path`, returning the process exit code.
pub fn run_file(path: &str) -> ExitCode {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("monkey: cannot read {}: {}", path, err);
            return ExitCode::from(EXIT_NO_INPUT);
        }
    };

    let lexer = Lexer::new(source);
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();
    if !parser.errors.is_empty() {
        for error in parser.errors.iter() {
            eprintln!("{}", error);
        }
        return ExitCode::from(EXIT_PARSE_ERROR);
    }

    let evaluator = Evaluator::new();
    let env = Rc::new(RefCell::new(Environment::new()));
    let result = evaluator.eval_program(&program, &env);
    if result.is_error() {
        eprintln!("{}", result);
        return ExitCode::from(EXIT_RUNTIME_ERROR);
    }
    ExitCode::SUCCESS
}
