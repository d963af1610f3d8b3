//! OCI bundle handling.
//!
//! An OCI bundle is a directory containing a `config.json` runtime spec
//! (plus a rootfs the wrapper never touches). The bundle is the wrapper's
//! spec store: the spec is read from it, sanitized in memory, and written
//! back before the delegate runtime sees it.
//!
//! Reference: <https://github.com/opencontainers/runtime-spec/blob/main/bundle.md>

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Spec;
use crate::error::{OciError, Result};

/// Standard config file name within a bundle.
pub const CONFIG_FILE: &str = "config.json";

/// OCI bundle representation.
#[derive(Debug, Clone)]
pub struct Bundle {
    /// Absolute path to the bundle directory.
    path: PathBuf,
    /// Parsed OCI specification.
    spec: Spec,
}

impl Bundle {
    /// Load an OCI bundle from a directory.
    ///
    /// Reads and validates the config.json file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(OciError::BundleNotFound(path.to_path_buf()));
        }

        if !path.is_dir() {
            return Err(OciError::InvalidBundle(format!(
                "not a directory: {}",
                path.display()
            )));
        }

        let path = path
            .canonicalize()
            .map_err(|e| OciError::InvalidBundle(format!("failed to resolve path: {e}")))?;

        let config_path = path.join(CONFIG_FILE);
        if !config_path.exists() {
            return Err(OciError::ConfigNotFound(path));
        }

        let spec = Spec::load(&config_path)?;
        debug!("Loaded OCI spec from {}", config_path.display());

        Ok(Self { path, spec })
    }

    /// Get the bundle directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the OCI specification.
    #[must_use]
    pub const fn spec(&self) -> &Spec {
        &self.spec
    }

    /// Get mutable reference to the OCI specification.
    pub fn spec_mut(&mut self) -> &mut Spec {
        &mut self.spec
    }

    /// Get the config.json path.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.path.join(CONFIG_FILE)
    }

    /// Save any modifications to the spec back to config.json.
    pub fn save(&self) -> Result<()> {
        self.spec.save(self.config_path())?;
        debug!("Wrote OCI spec to {}", self.config_path().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn create_temp_bundle() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let config = r#"{
            "ociVersion": "1.2.0",
            "process": {
                "cwd": "/",
                "args": ["sh"]
            }
        }"#;
        fs::write(dir.path().join("config.json"), config).unwrap();
        dir
    }

    #[test]
    fn test_load_bundle() {
        let dir = create_temp_bundle();
        let bundle = Bundle::load(dir.path()).unwrap();

        assert_eq!(bundle.spec().oci_version, "1.2.0");
        assert!(bundle.path().is_absolute());
        assert!(bundle.config_path().ends_with("config.json"));
    }

    #[test]
    fn test_bundle_not_found() {
        let result = Bundle::load("/nonexistent/path");
        assert!(matches!(result, Err(OciError::BundleNotFound(_))));
    }

    #[test]
    fn test_config_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = Bundle::load(dir.path());
        assert!(matches!(result, Err(OciError::ConfigNotFound(_))));
    }

    #[test]
    fn test_bundle_not_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("not-a-dir");
        fs::write(&file_path, "content").unwrap();

        let result = Bundle::load(&file_path);
        assert!(matches!(result, Err(OciError::InvalidBundle(_))));
    }

    #[test]
    fn test_bundle_save() {
        let dir = create_temp_bundle();
        let mut bundle = Bundle::load(dir.path()).unwrap();

        bundle.spec_mut().process.as_mut().unwrap().env = vec!["A=1".to_string()];
        bundle.save().unwrap();

        let reloaded = Bundle::load(dir.path()).unwrap();
        assert_eq!(reloaded.spec().process.as_ref().unwrap().env, vec!["A=1"]);
    }
}
