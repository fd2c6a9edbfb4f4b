//! # Built-in Commands
//!
//! Each subcommand lives in its own file and implements
//! [`Command`](crate::command::Command): a `schema` describing its options and
//! an `execute` method that turns parsed arguments into a
//! [`CommandResult`](crate::command::CommandResult).
//!
//! [`builtin`] registers all of them under their command-line names. The
//! registration order is the order in which they appear in `--help`.

pub mod command_a;
pub mod command_b;
pub mod command_c;
pub mod command_d;

use crate::error::Result;
use crate::registry::CommandRegistry;

pub use command_a::CommandA;
pub use command_b::CommandB;
pub use command_c::CommandC;
pub use command_d::CommandD;

/// Registry holding every built-in command.
pub fn builtin() -> Result<CommandRegistry> {
    let mut builder = CommandRegistry::builder();
    builder
        .register("command-a", Box::new(CommandA))?
        .register("command-b", Box::new(CommandB))?
        .register("command-c", Box::new(CommandC))?
        .register("command-d", Box::new(CommandD))?;
    Ok(builder.build())
}
