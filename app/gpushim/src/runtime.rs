//! Delegate runtime lookup and hand-off.

use std::os::unix::process::CommandExt;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::debug;

/// Runtime the wrapper hands the sanitized spec to.
pub const DEFAULT_RUNTIME: &str = "nvidia-container-runtime";

/// Environment variable overriding the delegate runtime binary.
pub const RUNTIME_ENV: &str = "GPUSHIM_RUNTIME";

/// Name of the delegate runtime binary, honoring the env override.
#[must_use]
pub fn delegate_name() -> String {
    std::env::var(RUNTIME_ENV).unwrap_or_else(|_| DEFAULT_RUNTIME.to_string())
}

/// Replace the current process with the delegate runtime.
///
/// `args` is the wrapper's argv tail, forwarded verbatim. Only returns on
/// failure.
pub fn exec_delegate(args: &[String]) -> Result<()> {
    let name = delegate_name();
    let path = which::which(&name).with_context(|| format!("cannot locate {name} on PATH"))?;

    debug!(runtime = %path.display(), "handing off to delegate runtime");

    let err = Command::new(&path).args(args).exec();
    Err(err).with_context(|| format!("cannot invoke {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exec_fails_when_runtime_is_missing() {
        // The override points at a binary that cannot exist, so the PATH
        // lookup fails and exec_delegate returns instead of replacing the
        // test process.
        std::env::set_var(RUNTIME_ENV, "gpushim-test-no-such-runtime");
        let err = exec_delegate(&["create".to_string()]).unwrap_err();
        assert!(err.to_string().contains("gpushim-test-no-such-runtime"));
        std::env::remove_var(RUNTIME_ENV);
    }
}
