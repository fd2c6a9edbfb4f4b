//! # Dispatcher
//!
//! The [`Dispatcher`] drives one invocation from raw arguments to an
//! [`ExitStatus`]:
//!
//! ```text
//! Idle -> ParsingArgs -> Dispatching -> Reporting -> Terminated
//!              |              |
//!              +--------------+--> Terminated (usage error, no command,
//!                                  unknown command)
//! ```
//!
//! ## Outcome channels
//!
//! | Outcome                               | Log level | Status           |
//! |---------------------------------------|-----------|------------------|
//! | `Ok(CommandResult::success)`          | info      | `Success`        |
//! | `Ok(CommandResult::failure)`          | error     | `CommandFailure` |
//! | `Err(Error::CommandExecution)`        | error     | `CommandFailure` |
//! | any other error, or a panic           | error     | `InternalError`  |
//!
//! Usage errors never reach a command: clap's rendered error (with the
//! command's usage line) is printed to stderr instead. An unknown command name
//! is printed the same way and also logged as `Unknown command: <name>`.

use std::any::Any;
use std::ffi::OsString;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};

use anyhow::anyhow;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use log::{trace, Level};

use crate::command::CommandResult;
use crate::error::{Error, Result};
use crate::logging::{LogOptions, Reporter};
use crate::parser::{ArgumentParser, Invocation};
use crate::registry::CommandRegistry;

/// Where the dispatcher is in handling an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    ParsingArgs,
    Dispatching,
    Reporting,
    Terminated,
}

/// How an invocation ended.
///
/// Every variant other than `Success` maps to process exit code 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    NoCommand,
    UsageError,
    UnknownCommand,
    CommandFailure,
    InternalError,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::NoCommand
            | ExitStatus::UsageError
            | ExitStatus::UnknownCommand
            | ExitStatus::CommandFailure
            | ExitStatus::InternalError => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == ExitStatus::Success
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        std::process::ExitCode::from(status.code())
    }
}

/// Resolves and runs one command per call to [`Dispatcher::run`].
pub struct Dispatcher<'a> {
    registry: &'a CommandRegistry,
    parser: &'a ArgumentParser,
    reporter: &'a dyn Reporter,
    state: DispatchState,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        registry: &'a CommandRegistry,
        parser: &'a ArgumentParser,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            registry,
            parser,
            reporter,
            state: DispatchState::Idle,
        }
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// Handle a full command line, `argv[0]` included.
    pub fn run<I, T>(&mut self, raw: I) -> ExitStatus
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        self.state = DispatchState::Idle;
        let status = self.drive(raw);
        self.transition(DispatchState::Terminated);
        status
    }

    fn transition(&mut self, next: DispatchState) {
        trace!("dispatcher: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn drive<I, T>(&mut self, raw: I) -> ExitStatus
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let parser = self.parser;
        let registry = self.registry;
        let reporter = self.reporter;

        self.transition(DispatchState::ParsingArgs);
        let (options, name, args) = match parser.parse_invocation(raw) {
            Ok(Invocation::Command {
                options,
                name,
                args,
            }) => (options, name, args),
            Ok(Invocation::Display(info)) => {
                // --help and --version go to stdout
                return self.emit(info.print(), ExitStatus::Success);
            }
            Ok(Invocation::NoCommand { .. }) => {
                let help = parser.render_help();
                let written = write!(io::stdout().lock(), "{help}");
                return self.emit(written, ExitStatus::NoCommand);
            }
            Err(Error::Usage(err)) if err.kind() == ErrorKind::InvalidSubcommand => {
                let status = self.emit(err.print(), ExitStatus::UnknownCommand);
                if status == ExitStatus::UnknownCommand {
                    reporter.configure(&LogOptions::default());
                    let name = match err.get(ContextKind::InvalidSubcommand) {
                        Some(ContextValue::String(name)) => name.as_str(),
                        _ => "<unrecognized>",
                    };
                    reporter.report(Level::Error, &format!("Unknown command: {name}"));
                }
                return status;
            }
            Err(Error::Usage(err)) => {
                return self.emit(err.print(), ExitStatus::UsageError);
            }
            Err(err) => {
                reporter.configure(&LogOptions::default());
                return self.report_error(err);
            }
        };

        reporter.configure(&options);

        self.transition(DispatchState::Dispatching);
        let command = match registry.resolve(&name) {
            Ok(command) => command,
            Err(err) => {
                reporter.report(Level::Error, &err.to_string());
                return ExitStatus::UnknownCommand;
            }
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| command.execute(args)))
            .unwrap_or_else(|payload| {
                Err(Error::Internal(anyhow!(
                    "command '{name}' panicked: {}",
                    panic_message(payload.as_ref())
                )))
            });

        self.transition(DispatchState::Reporting);
        self.report(outcome)
    }

    /// `status`, unless writing the terminal output failed.
    fn emit(&self, written: io::Result<()>, status: ExitStatus) -> ExitStatus {
        match written {
            Ok(()) => status,
            Err(err) => {
                self.reporter.configure(&LogOptions::default());
                self.report_error(Error::Internal(
                    anyhow::Error::new(err).context("failed to write output"),
                ))
            }
        }
    }

    fn report(&self, outcome: Result<CommandResult>) -> ExitStatus {
        match outcome {
            Ok(result) if result.is_success() => {
                self.reporter.report(Level::Info, result.message());
                ExitStatus::Success
            }
            Ok(result) => {
                self.reporter.report(Level::Error, result.message());
                ExitStatus::CommandFailure
            }
            Err(err) => self.report_error(err),
        }
    }

    fn report_error(&self, err: Error) -> ExitStatus {
        match err {
            Error::CommandExecution { .. } => {
                self.reporter
                    .report(Level::Error, &format!("An error occurred: {err}"));
                ExitStatus::CommandFailure
            }
            Error::UnknownCommand { .. } => {
                self.reporter.report(Level::Error, &err.to_string());
                ExitStatus::UnknownCommand
            }
            // anyhow's Debug output carries the whole cause chain
            Error::Internal(inner) => {
                self.reporter.report(
                    Level::Error,
                    &format!("An unexpected error occurred: {inner:?}"),
                );
                ExitStatus::InternalError
            }
            other => {
                self.reporter.report(
                    Level::Error,
                    &format!("An unexpected error occurred: {other}"),
                );
                ExitStatus::InternalError
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}
