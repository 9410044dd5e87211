//! Where system documents come from.

use crate::catalog::CatalogEntry;
use crate::error::LoadError;
use crate::schema::RawSystem;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Fetches the raw document for a catalog entry.
pub trait SystemSource {
    fn fetch(&self, entry: &CatalogEntry) -> Result<RawSystem, LoadError>;
}

/// Parses a document by file extension: `.json`, `.yaml` or `.yml`.
pub fn parse_document(path: &Path, content: &str) -> Result<RawSystem, LoadError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => RawSystem::from_json_str(content),
        Some("yaml") | Some("yml") => RawSystem::from_yaml_str(content),
        _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Reads documents from a directory; entry paths are taken relative to it
/// even when written with a leading `/`.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve(&self, entry: &CatalogEntry) -> PathBuf {
        self.root.join(entry.path.trim_start_matches('/'))
    }
}

impl SystemSource for DirSource {
    fn fetch(&self, entry: &CatalogEntry) -> Result<RawSystem, LoadError> {
        let path = self.resolve(entry);
        let content = fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        parse_document(&path, &content)
    }
}

/// In-memory documents keyed by system id.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    systems: HashMap<String, RawSystem>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system(mut self, id: impl Into<String>, raw: RawSystem) -> Self {
        self.insert(id, raw);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, raw: RawSystem) {
        self.systems.insert(id.into(), raw);
    }
}

impl SystemSource for StaticSource {
    fn fetch(&self, entry: &CatalogEntry) -> Result<RawSystem, LoadError> {
        self.systems
            .get(&entry.id)
            .cloned()
            .ok_or_else(|| LoadError::UnknownSystem(entry.id.clone()))
    }
}
