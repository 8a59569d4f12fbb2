//! Image records and the collaborator that supplies them.
//!
//! The gallery never fetches or decodes images. A record's `source` is an
//! opaque handle passed straight through to the renderer.

use std::fmt;
use std::ops::Deref;
use std::path::Path;

use anyhow::{Result, ensure};

use crate::config::{Configuration, RecordConfig};

/// Opaque renderable handle for an image (file path or URI).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetSource(String);

impl AssetSource {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_uri(raw: &str) -> bool {
        raw.split_once("://").is_some_and(|(scheme, _)| {
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        })
    }
}

impl fmt::Display for AssetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub source: AssetSource,
    pub title: String,
    pub description: String,
}

impl ImageRecord {
    pub fn new(
        source: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            source: AssetSource::new(source),
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Non-empty, immutable, ordered record sequence.
#[derive(Debug, Clone)]
pub struct Records(Vec<ImageRecord>);

impl Records {
    pub fn new(records: Vec<ImageRecord>) -> Result<Self> {
        ensure!(!records.is_empty(), "gallery requires at least one record");
        Ok(Self(records))
    }

    /// Number of records; never zero.
    pub fn count(&self) -> usize {
        self.0.len()
    }

    /// Record at `index`; panics when `index >= count()`.
    pub fn at(&self, index: usize) -> &ImageRecord {
        &self.0[index]
    }
}

impl Deref for Records {
    type Target = [ImageRecord];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Supplies the fixed ordered list of records at construction time.
pub trait AssetProvider {
    fn records(&self) -> Result<Records>;
}

/// Records declared up front, typically read from the configuration file.
#[derive(Debug, Clone)]
pub struct StaticAssets {
    records: Vec<ImageRecord>,
}

impl StaticAssets {
    pub fn new(records: Vec<ImageRecord>) -> Self {
        Self { records }
    }

    pub fn from_config(cfg: &Configuration) -> Self {
        let root = cfg.asset_root.as_deref();
        let records = cfg
            .records
            .iter()
            .map(|entry| Self::resolve(entry, root))
            .collect();
        Self { records }
    }

    fn resolve(entry: &RecordConfig, root: Option<&Path>) -> ImageRecord {
        let raw = entry.source.trim();
        let source = match root {
            Some(root) if !AssetSource::is_uri(raw) && Path::new(raw).is_relative() => {
                root.join(raw).display().to_string()
            }
            _ => raw.to_string(),
        };
        ImageRecord::new(source, entry.title.clone(), entry.description.clone())
    }
}

impl AssetProvider for StaticAssets {
    fn records(&self) -> Result<Records> {
        Records::new(self.records.clone())
    }
}
