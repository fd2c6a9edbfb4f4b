//! # Command C
//!
//! Lists, adds or removes items. The three actions form a required exclusive
//! group, so the parser guarantees exactly one of them is present; the
//! fallback branch only fires when the command is driven with hand-built
//! arguments.

use log::info;

use crate::command::{Command, CommandResult};
use crate::error::Result;
use crate::parser::ParsedArguments;
use crate::schema::{CommandSchema, ExclusiveGroup, OptionSpec};

const ACTION: &str = "action";

pub struct CommandC;

impl Command for CommandC {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("Execute command C (list, add, or remove items)")
            .group(ExclusiveGroup::required(ACTION))
            .option(OptionSpec::flag("list").in_group(ACTION).help("List items"))
            .option(
                OptionSpec::multi("add")
                    .in_group(ACTION)
                    .value_name("item")
                    .help("Add items"),
            )
            .option(
                OptionSpec::multi("remove")
                    .in_group(ACTION)
                    .value_name("item")
                    .help("Remove items"),
            )
    }

    fn execute(&self, args: ParsedArguments) -> Result<CommandResult> {
        if args.flag("list") {
            info!("Listing items");
            return Ok(CommandResult::success("Items listed"));
        }

        if let Some(items) = args.values("add").filter(|items| !items.is_empty()) {
            info!("Adding items: {items:?}");
            return Ok(CommandResult::success(format!("Items added: {items:?}")));
        }

        if let Some(items) = args.values("remove").filter(|items| !items.is_empty()) {
            info!("Removing items: {items:?}");
            return Ok(CommandResult::success(format!("Items removed: {items:?}")));
        }

        Ok(CommandResult::failure("invalid subcommand state"))
    }
}
