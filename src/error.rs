//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for
//! `skeleton-cli`. It uses the `thiserror` library to create an `Error` enum
//! that covers every failure mode of the dispatch pipeline.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors that can
//!   occur between argument parsing and command execution.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! A command reporting `CommandResult::failure` is *not* an error. That outcome
//! travels through the `Ok` channel and is logged differently by the
//! dispatcher; only the variants below end up in the `Err` channel.

use thiserror::Error;

/// Main error type for skeleton-cli operations
#[derive(Error, Debug)]
pub enum Error {
    /// The supplied arguments were malformed, missing, or conflicting.
    ///
    /// Carries the `clap` error, which already contains the rendered usage
    /// text for the offending command.
    #[error("Usage error: {0}")]
    Usage(#[from] clap::Error),

    /// The requested command name is not in the registry.
    #[error("Unknown command: {name}")]
    UnknownCommand { name: String },

    /// Two handlers were registered under the same name.
    #[error("Duplicate command registration: {name}")]
    DuplicateCommand { name: String },

    /// A command declared an argument schema that cannot be honored.
    #[error("Invalid argument schema for {command}: {message}")]
    InvalidSchema { command: String, message: String },

    /// A command signalled that it could not complete.
    #[error("Command {command} failed: {cause}")]
    CommandExecution { command: String, cause: String },

    /// Anything not covered above.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl Error {
    /// Shorthand for building a [`Error::CommandExecution`].
    pub fn execution(command: impl Into<String>, cause: impl Into<String>) -> Self {
        Error::CommandExecution {
            command: command.into(),
            cause: cause.into(),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_unknown_command() {
        let error = Error::UnknownCommand {
            name: "command-z".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Unknown command"));
        assert!(display.contains("command-z"));
    }

    #[test]
    fn test_error_display_duplicate_command() {
        let error = Error::DuplicateCommand {
            name: "command-a".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Duplicate command registration"));
        assert!(display.contains("command-a"));
    }

    #[test]
    fn test_error_display_invalid_schema() {
        let error = Error::InvalidSchema {
            command: "command-c".to_string(),
            message: "duplicate option 'add'".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Invalid argument schema for command-c"));
        assert!(display.contains("duplicate option 'add'"));
    }

    #[test]
    fn test_error_display_command_execution() {
        let error = Error::execution("command-b", "backend unavailable");
        let display = format!("{}", error);
        assert!(display.contains("command-b"));
        assert!(display.contains("backend unavailable"));
    }

    #[test]
    fn test_error_from_anyhow_is_transparent() {
        let error: Error = anyhow::anyhow!("something broke").into();
        assert!(matches!(error, Error::Internal(_)));
        assert_eq!(format!("{}", error), "something broke");
    }

    #[test]
    fn test_error_from_clap_error() {
        let clap_error: clap::Error = clap::Error::new(clap::error::ErrorKind::UnknownArgument);
        let error: Error = clap_error.into();
        assert!(matches!(error, Error::Usage(_)));
        assert!(format!("{}", error).contains("Usage error"));
    }
}
