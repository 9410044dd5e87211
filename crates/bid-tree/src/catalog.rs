use serde::{Deserialize, Serialize};

/// One loadable bidding system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    /// Document location, relative to whatever root the source serves from.
    pub path: String,
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemCatalog {
    pub default_system: String,
    pub systems: Vec<CatalogEntry>,
}

impl Default for SystemCatalog {
    fn default() -> Self {
        Self {
            default_system: "2over1".into(),
            systems: vec![
                CatalogEntry::new("2over1", "2/1 Game Forcing", "/systems/2over1.json"),
                CatalogEntry::new("fantunes", "Fantoni-Nunes", "/systems/fantunes.json"),
            ],
        }
    }
}

impl SystemCatalog {
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.systems.iter().find(|entry| entry.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}
