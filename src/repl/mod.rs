//! REPL for the Monkey programming language.
//!
//! Reads one program per line, runs it through the lexer, parser, and
//! evaluator, and prints either the collected parser errors or the
//! `Inspect` form of the result. The environment persists across lines, so
//! bindings made on one line are visible on the next.

use crate::object::Environment;
use crate::{Evaluator, Lexer, Parser};
pub use display::MONKEY_LOGO;
use display::{CYAN, GRAY, RESET, print_parser_errors, print_welcome};
use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
mod display;

const PROMPT: &str = ">>";

/// Starts the REPL.
/// # Parameters
/// - `input`: The input reader to read the lines from
/// - `output`: The output writer to write the lines to
/// # Returns
/// - `Ok(())` when the input is exhausted
/// - `Err(e)` if an I/O error occurred
pub fn repl<R: BufRead, W: Write>(input: R, mut output: W) -> io::Result<()> {
    print_welcome();

    // One evaluator and one environment for the whole session
    let evaluator = Evaluator::new();
    let env = Rc::new(RefCell::new(Environment::new()));

    let mut reader = input;
    let mut line = String::new();

    loop {
        // Print prompt
        write!(output, "{}{}{} ", CYAN, PROMPT, RESET)?;
        output.flush()?;
        line.clear();
        // Read line from input
        let bytes_read = reader.read_line(&mut line)?;
        if bytes_read == 0 {
            // If no bytes read, print goodbye message and exit
            writeln!(output, "\n{}Goodbye!{}", GRAY, RESET)?;
            return Ok(());
        }
        // If line is empty, continue to next iteration
        let trimmed_line = line.trim_end_matches(['\n', '\r']);
        if trimmed_line.is_empty() {
            continue;
        }

        // Create lexer and parse the line into a program
        let lexer = Lexer::new(trimmed_line.to_string());
        let mut parser = Parser::new(lexer);
        let program = parser.parse_program();

        // If there are parser errors, print them and skip evaluation
        if !parser.errors.is_empty() {
            print_parser_errors(&mut output, &parser.errors)?;
            continue;
        }

        let evaluated = evaluator.eval_program(&program, &env);
        writeln!(output, "{}", evaluated)?;
    }
}
