//! Print generated users as JSON.
//!
//! This binary delegates to `user_stub_data::generate_cli` for parsing and
//! rendering, keeping the CLI behaviour testable without spawning a process.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use user_stub_data::generate_cli::{CliError, ParseOutcome, USAGE, parse_args, render};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "{err}") {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    match parse_args(env::args().skip(1))? {
        ParseOutcome::Help => {
            write_stdout(USAGE);
            Ok(())
        }
        ParseOutcome::Options(options) => {
            let json = render(&options)?;
            write_stdout(&format!("{json}\n"));
            Ok(())
        }
    }
}

fn write_stdout(text: &str) {
    if let Err(err) = io::stdout().lock().write_all(text.as_bytes()) {
        drop(err);
    }
}
