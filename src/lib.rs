//! # skeleton-cli Library
//!
//! The machinery behind the `skeleton-cli` binary: a registry of named
//! commands, a schema-driven argument parser, and a dispatcher that turns a
//! command's outcome into log output and a process exit status.
//!
//! ## Quick Example
//!
//! ```
//! use skeleton_cli::commands;
//! use skeleton_cli::parser::ArgumentParser;
//!
//! let registry = commands::builtin().unwrap();
//! let parser = ArgumentParser::for_registry("skeleton-cli", "demo", &registry);
//!
//! let schema = registry.describe("command-c").unwrap();
//! let args = parser.parse("command-c", schema, ["--add", "a", "b"]).unwrap();
//! let result = registry.resolve("command-c").unwrap().execute(args).unwrap();
//!
//! assert!(result.is_success());
//! assert_eq!(result.message(), r#"Items added: ["a", "b"]"#);
//! ```
//!
//! ## Core Concepts
//!
//! - **Schemas (`schema`)**: Declarative description of each command's options
//!   and mutually-exclusive groups.
//! - **Parsing (`parser`)**: Builds `clap` definitions from schemas and turns raw
//!   arguments into `ParsedArguments`, or a usage error.
//! - **Commands (`command`, `commands`)**: The `Command` trait and the built-in
//!   implementations.
//! - **Registry (`registry`)**: Name to handler table, frozen after start-up.
//! - **Dispatch (`dispatch`)**: Runs one invocation end to end and decides the
//!   exit status.
//! - **Logging (`logging`, `output`)**: The injected `Reporter` and the
//!   `env_logger` setup behind it.

pub mod command;
pub mod commands;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod output;
pub mod parser;
pub mod registry;
pub mod schema;
