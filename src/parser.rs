//! # Argument Parsing
//!
//! This module is the boundary between raw process arguments and the typed
//! world of the dispatcher. An [`ArgumentParser`] is assembled from the
//! registered [`CommandSchema`]s; each schema is translated into a
//! `clap::Command` so that `clap` handles tokenizing, unknown options, missing
//! required options and help rendering. Exclusive groups are checked here after
//! `clap` has run, because an empty occurrence of a zero-or-more option must not
//! count as "supplied".
//!
//! ## Outputs
//!
//! - [`ParsedArguments`]: option name to [`ArgValue`] for a single command.
//! - [`Invocation`]: what the whole command line asked for.
//!
//! Every validation failure is reported as [`Error::Usage`], which carries a
//! `clap::Error` whose rendered text already includes the command's usage line.

use std::collections::BTreeMap;
use std::ffi::OsString;

use anyhow::anyhow;
use clap::error::ErrorKind;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Args, FromArgMatches};

use crate::error::{Error, Result};
use crate::logging::LogOptions;
use crate::registry::CommandRegistry;
use crate::schema::{CommandSchema, OptionKind, OptionSpec};

/// The value of one parsed option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Flag(bool),
    Single(String),
    Multi(Vec<String>),
}

/// Arguments for a single command invocation, keyed by option name.
///
/// Flags are always present (`false` when not given). Single and multi-value
/// options are only present when they appeared on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArguments {
    values: BTreeMap<String, ArgValue>,
}

impl ParsedArguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ArgValue) {
        self.values.insert(name.into(), value);
    }

    /// Builder-style [`ParsedArguments::insert`].
    pub fn with(mut self, name: impl Into<String>, value: ArgValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    /// `true` only if `name` is a flag that was set.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(ArgValue::Flag(true)))
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ArgValue::Single(value)) => Some(value),
            _ => None,
        }
    }

    pub fn values(&self, name: &str) -> Option<&[String]> {
        match self.values.get(name) {
            Some(ArgValue::Multi(values)) => Some(values),
            _ => None,
        }
    }

    /// Like [`ParsedArguments::value`], but a missing value is an internal
    /// error. Use for options the schema marks as required.
    pub fn required_value(&self, name: &str) -> Result<&str> {
        self.value(name)
            .ok_or_else(|| Error::Internal(anyhow!("missing value for required option --{name}")))
    }

    /// Whether `name` counts as supplied for exclusive group purposes.
    pub fn is_supplied(&self, name: &str) -> bool {
        match self.values.get(name) {
            Some(ArgValue::Flag(set)) => *set,
            Some(ArgValue::Single(_)) => true,
            Some(ArgValue::Multi(values)) => !values.is_empty(),
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// What a complete command line asked for.
#[derive(Debug)]
pub enum Invocation {
    /// `--help` or `--version`; the error value holds the rendered text.
    Display(clap::Error),
    /// Global options only, no command name.
    NoCommand { options: LogOptions },
    /// A command with arguments validated against its schema.
    Command {
        options: LogOptions,
        name: String,
        args: ParsedArguments,
    },
}

/// Schema-driven command line parser.
#[derive(Debug, Clone)]
pub struct ArgumentParser {
    root: clap::Command,
    schemas: Vec<(String, CommandSchema)>,
}

impl ArgumentParser {
    pub fn new(program: &'static str, about: &'static str) -> Self {
        let root = LogOptions::augment_args(clap::Command::new(program))
            .about(about)
            .version(env!("CARGO_PKG_VERSION"))
            .disable_help_subcommand(true)
            .subcommand_value_name("COMMAND")
            .subcommand_help_heading("Commands");

        Self {
            root,
            schemas: Vec::new(),
        }
    }

    /// A parser exposing every command of `registry`, in registration order.
    pub fn for_registry(
        program: &'static str,
        about: &'static str,
        registry: &CommandRegistry,
    ) -> Self {
        registry
            .iter()
            .fold(Self::new(program, about), |parser, (name, schema)| {
                parser.command(name, schema.clone())
            })
    }

    /// Text shown after the top-level help.
    pub fn after_help(mut self, text: &'static str) -> Self {
        self.root = self.root.after_help(text);
        self
    }

    pub fn command(mut self, name: impl Into<String>, schema: CommandSchema) -> Self {
        let name = name.into();
        let sub = build_command(self.root.get_name(), &name, &schema);
        self.root = self.root.subcommand(sub);
        self.schemas.push((name, schema));
        self
    }

    pub fn program(&self) -> &str {
        self.root.get_name()
    }

    /// Top-level help, listing commands in the order they were added.
    pub fn render_help(&self) -> String {
        self.root.clone().render_help().to_string()
    }

    /// Parse a full command line, `argv[0]` included.
    pub fn parse_invocation<I, T>(&self, raw: I) -> Result<Invocation>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = match self.root.clone().try_get_matches_from(raw) {
            Ok(matches) => matches,
            Err(err)
                if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) =>
            {
                return Ok(Invocation::Display(err));
            }
            Err(err) => return Err(Error::Usage(err)),
        };

        let options = LogOptions::from_arg_matches(&matches)?;

        let Some((name, sub_matches)) = matches.subcommand() else {
            return Ok(Invocation::NoCommand { options });
        };

        let schema = self
            .schemas
            .iter()
            .find(|(registered, _)| registered == name)
            .map(|(_, schema)| schema)
            .ok_or_else(|| Error::UnknownCommand {
                name: name.to_string(),
            })?;
        let mut command = self
            .root
            .find_subcommand(name)
            .cloned()
            .ok_or_else(|| Error::UnknownCommand {
                name: name.to_string(),
            })?;

        let args = extract(&mut command, schema, sub_matches)?;
        Ok(Invocation::Command {
            options,
            name: name.to_string(),
            args,
        })
    }

    /// Parse the arguments of a single command; `raw` excludes the command
    /// name itself.
    pub fn parse<I, T>(&self, name: &str, schema: &CommandSchema, raw: I) -> Result<ParsedArguments>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut command = build_command(self.program(), name, schema);
        let argv = std::iter::once(OsString::from(name)).chain(raw.into_iter().map(Into::into));
        let matches = command.try_get_matches_from_mut(argv)?;
        extract(&mut command, schema, &matches)
    }
}

/// Usage line derived from the schema, e.g.
/// `skeleton-cli command-c (--list | --add <item>... | --remove <item>...)`.
pub fn usage_line(program: &str, name: &str, schema: &CommandSchema) -> String {
    let mut parts = vec![format!("{program} {name}")];
    let mut seen_groups: Vec<&str> = Vec::new();

    for option in schema.options() {
        match option.group {
            Some(group_id) => {
                if seen_groups.contains(&group_id) {
                    continue;
                }
                seen_groups.push(group_id);
                let required = schema
                    .groups()
                    .iter()
                    .any(|g| g.id == group_id && g.required);
                let members: Vec<String> = schema.members(group_id).map(option_usage).collect();
                let joined = members.join(" | ");
                parts.push(if required {
                    format!("({joined})")
                } else {
                    format!("[{joined}]")
                });
            }
            None if option.required => parts.push(option_usage(option)),
            None => parts.push(format!("[{}]", option_usage(option))),
        }
    }

    parts.join(" ")
}

fn option_usage(option: &OptionSpec) -> String {
    let value_name = option.value_name.unwrap_or(option.name);
    match option.kind {
        OptionKind::Flag => format!("--{}", option.name),
        OptionKind::Single => format!("--{} <{value_name}>", option.name),
        OptionKind::Multi { allow_empty: false } => format!("--{} <{value_name}>...", option.name),
        OptionKind::Multi { allow_empty: true } => format!("--{} [<{value_name}>...]", option.name),
    }
}

fn build_command(program: &str, name: &str, schema: &CommandSchema) -> clap::Command {
    schema.options().iter().fold(
        clap::Command::new(name.to_string())
            .about(schema.about())
            .override_usage(usage_line(program, name, schema))
            // A repeated option keeps only its last occurrence
            .args_override_self(true),
        |command, option| command.arg(build_arg(option)),
    )
}

fn build_arg(option: &OptionSpec) -> Arg {
    let value_name = option.value_name.unwrap_or(option.name);
    let arg = Arg::new(option.name).long(option.name).help(option.help);

    match option.kind {
        OptionKind::Flag => arg.action(ArgAction::SetTrue),
        OptionKind::Single => arg
            .action(ArgAction::Set)
            .value_name(value_name)
            .value_parser(value_parser!(String))
            .required(option.required),
        OptionKind::Multi { allow_empty } => arg
            .action(ArgAction::Set)
            .num_args(if allow_empty { 0_usize.. } else { 1_usize.. })
            .value_name(value_name)
            .value_parser(value_parser!(String))
            .required(option.required),
    }
}

fn extract(
    command: &mut clap::Command,
    schema: &CommandSchema,
    matches: &ArgMatches,
) -> Result<ParsedArguments> {
    let mut parsed = ParsedArguments::new();

    for option in schema.options() {
        match option.kind {
            OptionKind::Flag => {
                parsed.insert(option.name, ArgValue::Flag(matches.get_flag(option.name)));
            }
            OptionKind::Single => {
                if let Some(value) = matches.get_one::<String>(option.name) {
                    parsed.insert(option.name, ArgValue::Single(value.clone()));
                }
            }
            OptionKind::Multi { .. } => {
                if matches.contains_id(option.name) {
                    let values = matches
                        .get_many::<String>(option.name)
                        .map(|values| values.cloned().collect())
                        .unwrap_or_default();
                    parsed.insert(option.name, ArgValue::Multi(values));
                }
            }
        }
    }

    check_groups(command, schema, &parsed)?;
    Ok(parsed)
}

fn check_groups(
    command: &mut clap::Command,
    schema: &CommandSchema,
    parsed: &ParsedArguments,
) -> Result<()> {
    for group in schema.groups() {
        let supplied: Vec<&OptionSpec> = schema
            .members(group.id)
            .filter(|option| parsed.is_supplied(option.name))
            .collect();

        if let [first, second, ..] = supplied.as_slice() {
            return Err(command
                .error(
                    ErrorKind::ArgumentConflict,
                    format!(
                        "the argument '{}' cannot be used with '{}'",
                        option_usage(first),
                        option_usage(second)
                    ),
                )
                .into());
        }

        if group.required && supplied.is_empty() {
            let names: Vec<String> = schema
                .members(group.id)
                .map(|option| format!("--{}", option.name))
                .collect();
            return Err(command
                .error(
                    ErrorKind::MissingRequiredArgument,
                    format!(
                        "one of the following arguments is required: {}",
                        names.join(", ")
                    ),
                )
                .into());
        }
    }

    Ok(())
}
