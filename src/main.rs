//! # skeleton-cli
//!
//! This is the binary entry point for the `skeleton-cli` command-line tool.
//!
//! All parsing, dispatch and reporting lives in the `skeleton_cli` library;
//! this binary only wires the built-in commands to the process arguments and
//! turns the outcome into an exit code.

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    cli::run(std::env::args_os()).into()
}
