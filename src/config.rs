use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

/// Heading shown above the gallery, rendered as two emphasised parts.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct HeadingConfig {
    pub text1: String,
    pub text2: String,
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            text1: "GALLERY".to_string(),
            text2: "COLLECTIONS".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct TransitionConfig {
    /// Length of the exit/enter hint attached to each cursor change.
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
}

impl TransitionConfig {
    const fn default_duration() -> Duration {
        Duration::from_millis(500)
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration: Self::default_duration(),
        }
    }
}

/// One image entry as written in the configuration file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RecordConfig {
    pub source: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Configuration {
    /// Period between automatic cursor advances.
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    /// Transition hints handed to the renderer.
    pub transition: TransitionConfig,
    pub heading: HeadingConfig,
    /// Base directory for relative record sources.
    pub asset_root: Option<PathBuf>,
    /// Ordered gallery entries.
    pub records: Vec<RecordConfig>,
}

impl Configuration {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut cfg: Self = serde_yaml::from_str(&s)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        // Relative asset roots are anchored next to the config file.
        if let (Some(root), Some(parent)) = (cfg.asset_root.as_ref(), path.parent()) {
            if root.is_relative() {
                cfg.asset_root = Some(parent.join(root));
            }
        }
        Ok(cfg)
    }

    /// Validate runtime invariants that cannot be expressed via serde defaults alone.
    pub fn validated(self) -> Result<Self> {
        ensure!(!self.interval.is_zero(), "interval must be greater than zero");
        ensure!(
            !self.records.is_empty(),
            "records must contain at least one entry"
        );
        for (idx, record) in self.records.iter().enumerate() {
            ensure!(
                !record.source.trim().is_empty(),
                "records[{}].source must not be blank",
                idx
            );
        }
        if let Some(root) = &self.asset_root {
            ensure!(
                !root.as_os_str().is_empty(),
                "asset-root must not be empty when provided"
            );
        }
        Ok(self)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            interval: Self::DEFAULT_INTERVAL,
            transition: TransitionConfig::default(),
            heading: HeadingConfig::default(),
            asset_root: None,
            records: Vec::new(),
        }
    }
}
