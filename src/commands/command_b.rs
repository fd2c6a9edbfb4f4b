//! # Command B
//!
//! Reports whether its optional `--flag` switch was given.

use log::info;

use crate::command::{Command, CommandResult};
use crate::error::Result;
use crate::parser::ParsedArguments;
use crate::schema::{CommandSchema, OptionSpec};

pub struct CommandB;

impl Command for CommandB {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("Execute command B")
            .option(OptionSpec::flag("flag").help("Flag for command B"))
    }

    fn execute(&self, args: ParsedArguments) -> Result<CommandResult> {
        let flag = args.flag("flag");
        info!("Executing Command B with flag: {flag}");
        Ok(CommandResult::success(format!(
            "Command B executed with flag: {flag}"
        )))
    }
}
