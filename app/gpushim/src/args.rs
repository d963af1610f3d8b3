//! Wrapper argument scan.
//!
//! The wrapper is installed in place of the container runtime, so its argv
//! is whatever the container engine passes to runc. Unknown flags must be
//! forwarded verbatim, which rules out a strict parser: this is a tolerant
//! single-pass scan that only picks out what the wrapper itself acts on.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// What the wrapper should do with this invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `create`: sanitize the bundle spec, then hand off.
    Create,
    /// `--wrapper-version`: print version information and exit.
    Version,
    /// Anything else: hand off to the delegate runtime untouched.
    Passthrough,
}

/// Parsed view of a wrapper invocation.
#[derive(Debug)]
pub struct Invocation {
    /// Recognized command, if any.
    pub command: Command,
    /// Bundle directory (`--bundle`/`-b`, defaults to the current directory).
    pub bundle: PathBuf,
}

impl Invocation {
    /// Scan argv for the flags the wrapper acts on.
    pub fn from_args(argv: &[String]) -> Result<Self> {
        let mut command = Command::Passthrough;
        let mut bundle = None;

        for (i, arg) in argv.iter().enumerate() {
            match arg.as_str() {
                "--bundle" | "-b" => match argv.get(i + 1) {
                    Some(dir) => bundle = Some(PathBuf::from(dir)),
                    None => bail!("{arg} requires a directory argument"),
                },
                "create" => command = Command::Create,
                "--wrapper-version" => command = Command::Version,
                _ => {}
            }
        }

        let bundle = match bundle {
            Some(dir) => dir,
            None => std::env::current_dir().context("cannot resolve current directory")?,
        };

        Ok(Self { command, bundle })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn create_with_bundle_flag() {
        let inv =
            Invocation::from_args(&argv(&["gpushim", "create", "--bundle", "/run/bundle", "c1"]))
                .unwrap();
        assert_eq!(inv.command, Command::Create);
        assert_eq!(inv.bundle, PathBuf::from("/run/bundle"));
    }

    #[test]
    fn short_bundle_flag() {
        let inv = Invocation::from_args(&argv(&["gpushim", "-b", "/b", "create", "c1"])).unwrap();
        assert_eq!(inv.command, Command::Create);
        assert_eq!(inv.bundle, PathBuf::from("/b"));
    }

    #[test]
    fn bundle_defaults_to_cwd() {
        let inv = Invocation::from_args(&argv(&["gpushim", "create", "c1"])).unwrap();
        assert_eq!(inv.command, Command::Create);
        assert_eq!(inv.bundle, std::env::current_dir().unwrap());
    }

    #[test]
    fn missing_bundle_value_is_an_error() {
        let result = Invocation::from_args(&argv(&["gpushim", "create", "--bundle"]));
        assert!(result.is_err());
    }

    #[test]
    fn version_flag() {
        let inv = Invocation::from_args(&argv(&["gpushim", "--wrapper-version"])).unwrap();
        assert_eq!(inv.command, Command::Version);
    }

    #[test]
    fn unrecognized_invocation_is_passthrough() {
        let inv =
            Invocation::from_args(&argv(&["gpushim", "start", "--some-runc-flag", "c1"])).unwrap();
        assert_eq!(inv.command, Command::Passthrough);
    }

    #[test]
    fn unknown_flags_do_not_disturb_the_scan() {
        let inv = Invocation::from_args(&argv(&[
            "gpushim",
            "--root",
            "/run/runc",
            "--log-format",
            "json",
            "create",
            "-b",
            "/bundle",
            "c1",
        ]))
        .unwrap();
        assert_eq!(inv.command, Command::Create);
        assert_eq!(inv.bundle, PathBuf::from("/bundle"));
    }
}
