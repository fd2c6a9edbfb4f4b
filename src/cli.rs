//! CLI wiring: built-in registry, parser and logging reporter.

use std::ffi::OsString;

use skeleton_cli::commands;
use skeleton_cli::dispatch::{Dispatcher, ExitStatus};
use skeleton_cli::logging::LogReporter;
use skeleton_cli::parser::ArgumentParser;

const PROGRAM: &str = "skeleton-cli";
const ABOUT: &str = "skeleton-cli: A generic CLI tool skeleton";
const EPILOG: &str = "For more information, see the inline documentation.";

/// Run one invocation of the CLI.
pub fn run(args: impl IntoIterator<Item = OsString>) -> ExitStatus {
    let registry = match commands::builtin() {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitStatus::InternalError;
        }
    };

    let parser = ArgumentParser::for_registry(PROGRAM, ABOUT, &registry).after_help(EPILOG);
    let reporter = LogReporter;
    Dispatcher::new(&registry, &parser, &reporter).run(args)
}
