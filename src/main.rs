use env_logger::Builder;
use monkey_interpreter::repl::repl;
use monkey_interpreter::runner::run_file;
use std::env;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Initialize logger (can be controlled via RUST_LOG environment variable)
    // Examples: RUST_LOG=trace, RUST_LOG=monkey_interpreter::parser=trace
    Builder::from_default_env().init();

    let args: Vec<String> = env::args().collect();
    match args.len() {
        1 => {
            let stdin = io::stdin().lock();
            let stdout = io::stdout().lock();
            match repl(stdin, stdout) {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    eprintln!("monkey: {}", err);
                    ExitCode::from(74) // EX_IOERR
                }
            }
        }
        2 => run_file(&args[1]),
        _ => {
            eprintln!("Usage: monkey [script]");
            ExitCode::from(64) // EX_USAGE
        }
    }
}
