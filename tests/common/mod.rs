//! Shared test utilities for E2E tests.
//!
//! Add `mod common;` to a test file, then use the prelude:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     skeleton().arg("command-b").assert().success();
//! }
//! ```

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    pub use super::skeleton;
}

/// The `skeleton-cli` binary with a predictable logging environment.
pub fn skeleton() -> Command {
    let mut cmd = cargo_bin_cmd!("skeleton-cli");
    cmd.env_remove("SKELETON_CLI_LOG").env("NO_COLOR", "1");
    cmd
}
