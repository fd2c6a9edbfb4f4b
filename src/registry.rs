//! # Command Registry
//!
//! Maps command names to their [`Command`] handlers.
//!
//! Registration happens on a [`RegistryBuilder`]; calling
//! [`RegistryBuilder::build`] freezes it into a [`CommandRegistry`], which only
//! offers lookups. Each handler's schema is captured and validated when it is
//! registered, so a malformed schema or a duplicate name fails at start-up
//! rather than mid-dispatch.

use crate::command::Command;
use crate::error::{Error, Result};
use crate::schema::CommandSchema;

struct Entry {
    name: String,
    schema: CommandSchema,
    command: Box<dyn Command>,
}

/// Collects commands before the registry is frozen.
#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<Entry>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `command` under `name`.
    ///
    /// Fails with [`Error::DuplicateCommand`] if the name is taken and with
    /// [`Error::InvalidSchema`] if the name or the command's schema is unusable.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        command: Box<dyn Command>,
    ) -> Result<&mut Self> {
        let name = name.into();

        if name.is_empty() || name.starts_with('-') || name.contains(char::is_whitespace) {
            return Err(Error::InvalidSchema {
                command: name,
                message: "invalid command name".to_string(),
            });
        }
        if self.entries.iter().any(|entry| entry.name == name) {
            return Err(Error::DuplicateCommand { name });
        }

        let schema = command.schema();
        schema.validate(&name)?;

        self.entries.push(Entry {
            name,
            schema,
            command,
        });
        Ok(self)
    }

    pub fn build(self) -> CommandRegistry {
        CommandRegistry {
            entries: self.entries,
        }
    }
}

/// Read-only name to handler table.
pub struct CommandRegistry {
    entries: Vec<Entry>,
}

impl CommandRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    fn entry(&self, name: &str) -> Result<&Entry> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .ok_or_else(|| Error::UnknownCommand {
                name: name.to_string(),
            })
    }

    /// The handler registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<&dyn Command> {
        self.entry(name).map(|entry| entry.command.as_ref())
    }

    /// The argument schema of the command registered under `name`.
    pub fn describe(&self, name: &str) -> Result<&CommandSchema> {
        self.entry(name).map(|entry| &entry.schema)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    /// Command names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// `(name, schema)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CommandSchema)> {
        self.entries
            .iter()
            .map(|entry| (entry.name.as_str(), &entry.schema))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandResult;
    use crate::parser::ParsedArguments;
    use crate::schema::OptionSpec;
    use proptest::prelude::*;

    /// Not zero-sized, so every boxed instance has its own address.
    struct Echo {
        label: String,
    }

    impl Echo {
        fn boxed(label: &str) -> Box<dyn Command> {
            Box::new(Echo {
                label: label.to_string(),
            })
        }
    }

    impl Command for Echo {
        fn schema(&self) -> CommandSchema {
            CommandSchema::new("Echo a label").option(OptionSpec::flag("verbose"))
        }

        fn execute(&self, _args: ParsedArguments) -> Result<CommandResult> {
            Ok(CommandResult::success(self.label.clone()))
        }
    }

    fn address(command: &dyn Command) -> *const () {
        command as *const dyn Command as *const ()
    }

    fn registry() -> CommandRegistry {
        let mut builder = CommandRegistry::builder();
        builder
            .register("alpha", Echo::boxed("a"))
            .unwrap()
            .register("beta", Echo::boxed("b"))
            .unwrap()
            .register("gamma", Echo::boxed("c"))
            .unwrap();
        builder.build()
    }

    #[test]
    fn test_resolve_returns_registered_instance() {
        let first = Echo::boxed("a");
        let second = Echo::boxed("b");
        let first_addr = address(first.as_ref());
        let second_addr = address(second.as_ref());

        let mut builder = CommandRegistry::builder();
        builder.register("first", first).unwrap();
        builder.register("second", second).unwrap();
        let registry = builder.build();

        assert_eq!(address(registry.resolve("first").unwrap()), first_addr);
        assert_eq!(address(registry.resolve("second").unwrap()), second_addr);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut builder = CommandRegistry::builder();
        builder.register("alpha", Echo::boxed("a")).unwrap();
        let err = builder.register("alpha", Echo::boxed("b")).err().unwrap();
        assert!(matches!(err, Error::DuplicateCommand { ref name } if name == "alpha"));
    }

    #[test]
    fn test_invalid_name_rejected() {
        for name in ["", "--alpha", "two words"] {
            let mut builder = CommandRegistry::builder();
            let result = builder.register(name, Echo::boxed("a"));
            assert!(matches!(result, Err(Error::InvalidSchema { .. })), "{name:?}");
        }
    }

    #[test]
    fn test_invalid_schema_rejected() {
        struct Broken;
        impl Command for Broken {
            fn schema(&self) -> CommandSchema {
                CommandSchema::new("broken")
                    .option(OptionSpec::flag("x"))
                    .option(OptionSpec::flag("x"))
            }
            fn execute(&self, _args: ParsedArguments) -> Result<CommandResult> {
                unreachable!()
            }
        }

        let mut builder = CommandRegistry::builder();
        let result = builder.register("broken", Box::new(Broken));
        assert!(matches!(result, Err(Error::InvalidSchema { .. })));
    }

    #[test]
    fn test_names_in_registration_order() {
        let names: Vec<_> = registry().names().map(str::to_string).collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_describe() {
        let registry = registry();
        let schema = registry.describe("beta").unwrap();
        assert_eq!(schema.about(), "Echo a label");
        assert!(matches!(
            registry.describe("delta"),
            Err(Error::UnknownCommand { .. })
        ));
    }

    #[test]
    fn test_resolve_executes_the_right_handler() {
        let registry = registry();
        let result = registry
            .resolve("gamma")
            .unwrap()
            .execute(ParsedArguments::new())
            .unwrap();
        assert_eq!(result.message(), "c");
        assert_eq!(registry.len(), 3);
        assert!(registry.contains("alpha"));
        assert!(!registry.is_empty());
    }

    proptest! {
        #[test]
        fn test_resolve_unregistered_name_fails(name in "\\PC*") {
            let registry = registry();
            prop_assume!(!registry.contains(&name));
            let missing = match registry.resolve(&name) {
                Err(Error::UnknownCommand { name: missing }) => Some(missing),
                _ => None,
            };
            prop_assert_eq!(missing, Some(name));
        }
    }
}
