//! Service configuration loading.
//!
//! The expected YAML structure is:
//! ```yaml
//! poll_interval_secs: 5
//! default_item_duration_secs: 10
//! ```
//!
//! Every key is optional; missing keys keep their defaults.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

/// Device poll cadence used when the config does not set one.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Display time for playlist items stored without a usable duration.
pub const DEFAULT_ITEM_DURATION_SECS: u32 = 10;

// ── Private YAML deserialization types ────────────────────────────────────────

/// Fields as they appear in the YAML file.
///
/// Kept private – callers work with [`SignageConfig`] instead.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SignageConfigFile {
    poll_interval_secs: Option<u64>,
    default_item_duration_secs: Option<u32>,
}

// ── Public data structures ────────────────────────────────────────────────────

/// Runtime settings of the playback service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignageConfig {
    /// Seconds between two polls of the same screen.
    pub poll_interval_secs: u64,

    /// Fallback display time, in seconds, for items without a duration.
    pub default_item_duration_secs: u32,
}

impl Default for SignageConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            default_item_duration_secs: DEFAULT_ITEM_DURATION_SECS,
        }
    }
}

impl SignageConfig {
    /// Parses `path` into a config, applying defaults for absent keys.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, the YAML is
    /// structurally invalid, or a value is zero.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;

        let file: SignageConfigFile = if content.trim().is_empty() {
            SignageConfigFile::default()
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?
        };

        let defaults = Self::default();
        let config = Self {
            poll_interval_secs: file
                .poll_interval_secs
                .unwrap_or(defaults.poll_interval_secs),
            default_item_duration_secs: file
                .default_item_duration_secs
                .unwrap_or(defaults.default_item_duration_secs),
        };

        if config.poll_interval_secs == 0 {
            bail!("poll_interval_secs must be positive ({})", path.display());
        }
        if config.default_item_duration_secs == 0 {
            bail!(
                "default_item_duration_secs must be positive ({})",
                path.display()
            );
        }

        debug!(?config, "configuration parsed");
        info!(
            poll_interval_secs = config.poll_interval_secs,
            default_item_duration_secs = config.default_item_duration_secs,
            "Configuration loaded"
        );
        Ok(config)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper: write a YAML string to a temp file and return it.
    fn yaml_tempfile(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn default_config_has_expected_values() {
        let cfg = SignageConfig::default();
        assert_eq!(cfg.poll_interval_secs, 5);
        assert_eq!(cfg.default_item_duration_secs, 10);
        assert_eq!(cfg.poll_interval(), Duration::from_secs(5));
    }

    #[test]
    fn load_full_yaml() {
        let f = yaml_tempfile("poll_interval_secs: 30\ndefault_item_duration_secs: 8\n");
        let cfg = SignageConfig::load_from_file(f.path()).unwrap();
        assert_eq!(cfg.poll_interval_secs, 30);
        assert_eq!(cfg.default_item_duration_secs, 8);
    }

    #[test]
    fn optional_fields_use_defaults_when_absent() {
        let f = yaml_tempfile("poll_interval_secs: 2\n");
        let cfg = SignageConfig::load_from_file(f.path()).unwrap();
        assert_eq!(cfg.poll_interval_secs, 2);
        assert_eq!(cfg.default_item_duration_secs, DEFAULT_ITEM_DURATION_SECS);
    }

    #[test]
    fn empty_file_gives_defaults() {
        let f = yaml_tempfile("");
        assert_eq!(
            SignageConfig::load_from_file(f.path()).unwrap(),
            SignageConfig::default()
        );
    }

    #[test]
    fn missing_file_returns_error() {
        let result = SignageConfig::load_from_file(Path::new("/nonexistent/path/config.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn malformed_yaml_returns_error() {
        let f = yaml_tempfile("this is: not: valid: yaml: content:::");
        assert!(SignageConfig::load_from_file(f.path()).is_err());
    }

    #[test]
    fn unknown_key_returns_error() {
        let f = yaml_tempfile("poll_interval: 5\n");
        assert!(SignageConfig::load_from_file(f.path()).is_err());
    }

    #[test]
    fn zero_poll_interval_returns_error() {
        let f = yaml_tempfile("poll_interval_secs: 0\n");
        assert!(SignageConfig::load_from_file(f.path()).is_err());
    }
}
