//! # Logging
//!
//! All log records go through the `log` facade. The dispatcher does not call
//! the macros directly for its outcome lines; it talks to a [`Reporter`] that is
//! handed to it at construction, so tests (or an embedding application) can
//! capture what would be reported without touching the global logger.
//!
//! [`LogReporter`] is the production reporter. Its [`Reporter::configure`]
//! installs `env_logger` once per process with the level from `--log-level`;
//! filter directives from the `SKELETON_CLI_LOG` environment variable are
//! applied on top. Records are written to stderr as
//! `<timestamp> - <LEVEL> - <message>`.

use std::io::Write;

use clap::{Args, ValueEnum};
use env_logger::WriteStyle;
use log::{Level, LevelFilter};

use crate::output::ColorChoice;

/// Environment variable holding extra `env_logger` filter directives.
pub const LOG_ENV: &str = "SKELETON_CLI_LOG";

/// Value of the `--log-level` flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

// Global options accepted before or after any command. Kept out of the
// doc comment so `augment_args` does not overwrite the program `about`.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOptions {
    /// Set log level
    #[arg(
        long,
        global = true,
        value_enum,
        value_name = "LEVEL",
        default_value_t = LogLevel::Info
    )]
    pub log_level: LogLevel,

    /// Colorize log output
    #[arg(
        long,
        global = true,
        value_enum,
        value_name = "WHEN",
        default_value_t = ColorChoice::Auto
    )]
    pub color: ColorChoice,
}

/// Destination for the dispatcher's outcome lines.
pub trait Reporter {
    /// Apply the global options. Called once, after a successful parse and
    /// before anything is reported.
    fn configure(&self, options: &LogOptions);

    fn report(&self, level: Level, message: &str);
}

/// [`Reporter`] backed by the `log` facade and `env_logger`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn configure(&self, options: &LogOptions) {
        init(options);
    }

    fn report(&self, level: Level, message: &str) {
        log::log!(level, "{message}");
    }
}

/// Install `env_logger` as the global logger.
///
/// A second call in the same process leaves the first logger in place.
pub fn init(options: &LogOptions) {
    let write_style = if options.color.use_color() {
        WriteStyle::Always
    } else {
        WriteStyle::Never
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(options.log_level.into())
        .parse_env(env_logger::Env::new().filter(LOG_ENV))
        .write_style(write_style)
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "{} - {style}{}{style:#} - {}",
                buf.timestamp(),
                record.level(),
                record.args()
            )
        });

    if builder.try_init().is_err() {
        log::debug!("logger already initialized, keeping existing configuration");
    }
}
