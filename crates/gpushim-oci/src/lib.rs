//! OCI runtime-spec handling for the gpushim runtime wrapper.
//!
//! This crate carries everything the wrapper needs to vet a container's
//! GPU device-visibility declaration before the spec reaches the real
//! runtime:
//!
//! - [`config`]: a round-trip-safe model of the OCI runtime spec
//! - [`bundle`]: loading and persisting a bundle's config.json
//! - [`visibility`]: the device-visibility sanitizer itself

pub mod bundle;
pub mod config;
pub mod error;
pub mod visibility;

pub use bundle::Bundle;
pub use config::{Process, Root, Spec, User, OCI_VERSION};
pub use error::{OciError, Result};
pub use visibility::{sanitize_env, sanitize_spec, DropReason, Verdict, VISIBLE_DEVICES_KEY};
