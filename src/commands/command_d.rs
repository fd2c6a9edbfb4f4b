//! # Command D

use log::info;

use crate::command::{Command, CommandResult};
use crate::error::Result;
use crate::parser::ParsedArguments;
use crate::schema::{CommandSchema, OptionSpec};

pub struct CommandD;

impl Command for CommandD {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("Execute command D").option(
            OptionSpec::single("name")
                .required()
                .value_name("name")
                .help("Specify a name for command D"),
        )
    }

    fn execute(&self, args: ParsedArguments) -> Result<CommandResult> {
        let name = args.required_value("name")?;
        info!("Executing Command D with name: {name}");
        Ok(CommandResult::success(format!(
            "Command D executed with name: {name}"
        )))
    }
}
