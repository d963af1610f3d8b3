//! GPU device-visibility sanitization.
//!
//! Containers request GPU access by setting `NVIDIA_VISIBLE_DEVICES` in
//! their environment. Before the spec reaches the delegate runtime, every
//! such declaration is vetted against the `GPU-<uuid>` selector grammar and
//! dropped wholesale if any selector fails. Fail-closed: a malformed
//! declaration is never forwarded as-is, because the downstream runtime
//! could interpret it as broader device exposure than intended. A drop is
//! silent at the API level (the operation cannot fail) but emits a
//! structured warning for operability.

use std::fmt;

use tracing::warn;
use uuid::Uuid;

use crate::config::Spec;

/// Environment key carrying the GPU device-visibility declaration.
pub const VISIBLE_DEVICES_KEY: &str = "NVIDIA_VISIBLE_DEVICES";

/// Prefix of the UUID device-selector family.
const SELECTOR_PREFIX: &str = "GPU-";

/// Length of a canonical hyphenated UUID (8-4-4-4-12).
const CANONICAL_UUID_LEN: usize = 36;

/// Why a device-visibility declaration was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// Value does not use the `GPU-<uuid>` selector family
    /// (e.g. `all` or index-based selection).
    ForeignSelectorFamily,
    /// A selector token is not `GPU-` followed by a canonical UUID.
    InvalidSelector(String),
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ForeignSelectorFamily => write!(f, "value is not a GPU-<uuid> selector list"),
            Self::InvalidSelector(token) => write!(f, "invalid selector token: {token:?}"),
        }
    }
}

/// Verdict for one device-visibility declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Every selector is well formed; keep the original entry verbatim.
    Keep,
    /// Declaration is rejected as a whole.
    Drop(DropReason),
}

/// Classify the value of a device-visibility declaration.
///
/// The value must be one or more `GPU-<uuid>` tokens joined by `,` with no
/// surrounding whitespace. There is no partial validity: one bad token
/// rejects the whole value.
#[must_use]
pub fn classify_value(value: &str) -> Verdict {
    if !value.starts_with(SELECTOR_PREFIX) {
        return Verdict::Drop(DropReason::ForeignSelectorFamily);
    }

    for token in value.split(',') {
        if !is_valid_selector(token) {
            return Verdict::Drop(DropReason::InvalidSelector(token.to_string()));
        }
    }

    Verdict::Keep
}

/// Check a single selector token: `GPU-` followed by a canonical
/// hyphenated UUID.
fn is_valid_selector(token: &str) -> bool {
    let Some(id) = token.strip_prefix(SELECTOR_PREFIX) else {
        return false;
    };

    if id.is_empty() || id.contains(SELECTOR_PREFIX) {
        return false;
    }

    // `Uuid::try_parse` also accepts simple, braced, and URN forms; the
    // length check pins the input to the canonical 8-4-4-4-12 form.
    id.len() == CANONICAL_UUID_LEN && Uuid::try_parse(id).is_ok()
}

/// Sanitize an environment list.
///
/// Entries not keyed `NVIDIA_VISIBLE_DEVICES` (including entries with no
/// `=` at all, which cannot match the key) pass through untouched in their
/// original relative order. Each matching entry is classified
/// independently; survivors are appended after the passthrough group,
/// preserved byte-for-byte. Intra-group order is preserved, interleaving
/// between the two groups is not.
#[must_use]
pub fn sanitize_env(env: &[String]) -> Vec<String> {
    let mut passthrough = Vec::with_capacity(env.len());
    let mut surviving = Vec::new();

    for entry in env {
        match entry.split_once('=') {
            Some((key, value)) if key == VISIBLE_DEVICES_KEY => match classify_value(value) {
                Verdict::Keep => surviving.push(entry.clone()),
                Verdict::Drop(reason) => {
                    warn!(
                        key = VISIBLE_DEVICES_KEY,
                        %reason,
                        "dropping malformed device-visibility declaration"
                    );
                }
            },
            _ => passthrough.push(entry.clone()),
        }
    }

    passthrough.extend(surviving);
    passthrough
}

/// Sanitize the device-visibility declaration of an OCI spec.
///
/// No-op when the spec has no `process` object.
pub fn sanitize_spec(spec: &mut Spec) {
    if let Some(process) = spec.process.as_mut() {
        process.env = sanitize_env(&process.env);
    }
}
