//! # Command Contract
//!
//! Every subcommand implements [`Command`]: it declares its argument schema and
//! turns a set of [`ParsedArguments`] into a [`CommandResult`].
//!
//! There are two distinct ways for a command to not succeed:
//!
//! - returning `Ok(CommandResult::failure(..))`, the normal outcome channel for
//!   an operation that ran but did not achieve what was asked;
//! - returning `Err(Error::CommandExecution { .. })` (or any other
//!   [`Error`](crate::error::Error)) when the command could not run at all.
//!
//! The dispatcher logs the two differently, so implementations should not
//! collapse one into the other.

use std::fmt;

use crate::error::Result;
use crate::parser::ParsedArguments;
use crate::schema::CommandSchema;

/// Outcome of a single command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    success: bool,
    message: String,
}

impl CommandResult {
    /// A successful outcome with the given message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// A failed outcome with the given message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A named unit of CLI behavior.
///
/// Implementations must not keep mutable state between calls: the same
/// arguments always produce the same result.
pub trait Command: Send + Sync {
    /// The options this command accepts.
    fn schema(&self) -> CommandSchema;

    /// Run the command against arguments already validated against
    /// [`Command::schema`].
    fn execute(&self, args: ParsedArguments) -> Result<CommandResult>;
}
