//! # Argument Schemas
//!
//! A [`CommandSchema`] is the declarative description of what a command
//! accepts: an ordered list of [`OptionSpec`]s and the mutually-exclusive
//! [`ExclusiveGroup`]s they may belong to. Schemas are pure data; the
//! [`parser`](crate::parser) module turns them into `clap` definitions and
//! enforces them.
//!
//! ## Example
//!
//! ```
//! use skeleton_cli::schema::{CommandSchema, ExclusiveGroup, OptionSpec};
//!
//! let schema = CommandSchema::new("Manage items")
//!     .group(ExclusiveGroup::required("action"))
//!     .option(OptionSpec::flag("list").in_group("action"))
//!     .option(OptionSpec::multi("add").in_group("action").value_name("item"));
//!
//! assert!(schema.validate("items").is_ok());
//! assert_eq!(schema.options().len(), 2);
//! ```

use std::collections::HashSet;

use crate::error::{Error, Result};

/// Option names owned by the program itself.
pub const RESERVED_NAMES: &[&str] = &["help", "version", "log-level", "color"];

/// How many values an option takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Boolean switch; present or absent.
    Flag,
    /// Exactly one value.
    Single,
    /// A sequence of values following the option.
    ///
    /// Unless `allow_empty` is set, at least one value must follow. An empty
    /// occurrence of an `allow_empty` option does not count as supplied when
    /// checking its exclusive group.
    Multi { allow_empty: bool },
}

/// Declaration of a single `--name` option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: &'static str,
    pub kind: OptionKind,
    pub required: bool,
    pub group: Option<&'static str>,
    pub help: &'static str,
    pub value_name: Option<&'static str>,
}

impl OptionSpec {
    fn new(name: &'static str, kind: OptionKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            group: None,
            help: "",
            value_name: None,
        }
    }

    pub fn flag(name: &'static str) -> Self {
        Self::new(name, OptionKind::Flag)
    }

    pub fn single(name: &'static str) -> Self {
        Self::new(name, OptionKind::Single)
    }

    /// A multi-value option requiring at least one value.
    pub fn multi(name: &'static str) -> Self {
        Self::new(name, OptionKind::Multi { allow_empty: false })
    }

    /// A multi-value option that may be given with zero values.
    pub fn zero_or_more(name: &'static str) -> Self {
        Self::new(name, OptionKind::Multi { allow_empty: true })
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn in_group(mut self, group: &'static str) -> Self {
        self.group = Some(group);
        self
    }

    pub fn help(mut self, help: &'static str) -> Self {
        self.help = help;
        self
    }

    pub fn value_name(mut self, value_name: &'static str) -> Self {
        self.value_name = Some(value_name);
        self
    }
}

/// A set of options of which at most one may be supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusiveGroup {
    pub id: &'static str,
    /// When set, exactly one member must be supplied.
    pub required: bool,
}

impl ExclusiveGroup {
    pub fn optional(id: &'static str) -> Self {
        Self {
            id,
            required: false,
        }
    }

    pub fn required(id: &'static str) -> Self {
        Self { id, required: true }
    }
}

/// Everything a command accepts on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSchema {
    about: &'static str,
    options: Vec<OptionSpec>,
    groups: Vec<ExclusiveGroup>,
}

impl CommandSchema {
    pub fn new(about: &'static str) -> Self {
        Self {
            about,
            options: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    pub fn group(mut self, group: ExclusiveGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// One-line description shown in help listings.
    pub fn about(&self) -> &'static str {
        self.about
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    pub fn groups(&self) -> &[ExclusiveGroup] {
        &self.groups
    }

    pub fn find_option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.name == name)
    }

    /// Options belonging to `group`, in declaration order.
    pub fn members<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a OptionSpec> + 'a {
        self.options
            .iter()
            .filter(move |o| o.group == Some(group))
    }

    /// Check the schema's internal consistency.
    ///
    /// `command` is only used to label the error.
    pub fn validate(&self, command: &str) -> Result<()> {
        let invalid = |message: String| Error::InvalidSchema {
            command: command.to_string(),
            message,
        };

        let mut group_ids = HashSet::new();
        for group in &self.groups {
            if !group_ids.insert(group.id) {
                return Err(invalid(format!("duplicate group '{}'", group.id)));
            }
        }

        let mut names = HashSet::new();
        for option in &self.options {
            if option.name.is_empty() {
                return Err(invalid("option with empty name".to_string()));
            }
            if RESERVED_NAMES.contains(&option.name) {
                return Err(invalid(format!("option name '{}' is reserved", option.name)));
            }
            if !names.insert(option.name) {
                return Err(invalid(format!("duplicate option '{}'", option.name)));
            }
            if let Some(group) = option.group {
                if !group_ids.contains(group) {
                    return Err(invalid(format!(
                        "option '{}' refers to undeclared group '{}'",
                        option.name, group
                    )));
                }
                if option.required {
                    return Err(invalid(format!(
                        "option '{}' cannot be required inside group '{}'",
                        option.name, group
                    )));
                }
            }
        }

        Ok(())
    }
}
