#![allow(dead_code)]

pub use dockwrap_test_utils::builders;
pub use dockwrap_test_utils::fake_runner;
pub use dockwrap_test_utils::{init_tracing, with_timeout};

use dockwrap::exec::CommandSpec;

/// `sh -c <script>` as a command spec.
pub fn sh(script: &str) -> CommandSpec {
    CommandSpec::new("sh").arg("-c").arg(script)
}
