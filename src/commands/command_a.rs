//! # Command A
//!
//! Echoes back its required `--option` value.

use log::info;

use crate::command::{Command, CommandResult};
use crate::error::Result;
use crate::parser::ParsedArguments;
use crate::schema::{CommandSchema, OptionSpec};

pub struct CommandA;

impl Command for CommandA {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("Execute command A").option(
            OptionSpec::single("option")
                .required()
                .value_name("text")
                .help("Option for command A"),
        )
    }

    fn execute(&self, args: ParsedArguments) -> Result<CommandResult> {
        let option = args.required_value("option")?;
        info!("Executing Command A with option: {option}");
        Ok(CommandResult::success(format!(
            "Command A executed with option: {option}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ArgValue;

    #[test]
    fn test_execute_echoes_option() {
        let args = ParsedArguments::new().with("option", ArgValue::Single("foo".into()));
        let result = CommandA.execute(args).unwrap();
        assert!(result.is_success());
        assert_eq!(result.message(), "Command A executed with option: foo");
    }

    #[test]
    fn test_missing_option_is_an_error() {
        let err = CommandA.execute(ParsedArguments::new()).unwrap_err();
        assert!(err.to_string().contains("--option"));
    }

    #[test]
    fn test_schema_requires_option() {
        let schema = CommandA.schema();
        let option = schema.find_option("option").unwrap();
        assert!(option.required);
        assert!(schema.validate("command-a").is_ok());
    }
}
