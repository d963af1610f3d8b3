//! gpushim - GPU device-visibility sanitizing OCI runtime wrapper.
//!
//! gpushim is installed in place of the container runtime binary. On
//! `create` it rewrites the bundle's config.json, dropping any malformed
//! `NVIDIA_VISIBLE_DEVICES` declaration, then execs the real runtime with
//! the original arguments. Every other invocation passes straight through.

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gpushim_oci::Bundle;

mod args;
mod runtime;

use args::{Command, Invocation};

fn main() -> Result<()> {
    // Diagnostics go to stderr; stdout belongs to --wrapper-version output.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gpushim=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let argv: Vec<String> = std::env::args().collect();
    let invocation = Invocation::from_args(&argv)?;

    match invocation.command {
        Command::Version => print_version(),
        Command::Create => create(&invocation, &argv[1..]),
        Command::Passthrough => runtime::exec_delegate(&argv[1..]),
    }
}

/// Sanitize the bundle spec, then hand off to the delegate runtime.
fn create(invocation: &Invocation, args: &[String]) -> Result<()> {
    let mut bundle = Bundle::load(&invocation.bundle)
        .with_context(|| format!("cannot load OCI bundle at {}", invocation.bundle.display()))?;

    gpushim_oci::sanitize_spec(bundle.spec_mut());

    bundle
        .save()
        .context("cannot write sanitized config.json")?;

    runtime::exec_delegate(args)
}

fn print_version() -> Result<()> {
    println!(
        "{} version {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    println!("commit: {}", option_env!("GPUSHIM_COMMIT").unwrap_or(""));
    println!("spec: {}", gpushim_oci::OCI_VERSION);
    println!("execve: {}", runtime::delegate_name());
    Ok(())
}
