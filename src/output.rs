//! # Output Configuration
//!
//! Decides whether log output on stderr should be colored, based on the
//! `--color` flag, terminal capabilities and user preferences.
//!
//! ## Respecting User Preferences
//!
//! In `auto` mode the following are honored:
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;

use clap::ValueEnum;

/// Value of the `--color` flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from the environment and terminal
    #[default]
    Auto,
    /// Always emit colors
    Always,
    /// Never emit colors
    Never,
}

impl ColorChoice {
    /// Resolve the choice to a yes/no answer for stderr.
    pub fn use_color(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => detect_color_support(),
        }
    }
}

/// Detect whether color output is supported based on environment.
fn detect_color_support() -> bool {
    // The presence of the variable (even if empty) disables colors
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
        return false;
    }

    if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
        return true;
    }

    if env::var("TERM").is_ok_and(|v| v == "dumb") {
        return false;
    }

    // Logs go to stderr, so that is the stream to probe
    console::Term::stderr().features().colors_supported()
}
