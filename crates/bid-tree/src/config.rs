//! Explorer settings, read from YAML.

use crate::catalog::SystemCatalog;
use crate::error::ConfigError;
use crate::matcher::DEFAULT_SEARCH_LIMIT;
use bid_core::{CallGrammar, GrammarConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_SUMMARY_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub catalog: SystemCatalog,
    pub grammar: GrammarConfig,
    pub search_limit: usize,
    pub summary_max_chars: usize,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            catalog: SystemCatalog::default(),
            grammar: GrammarConfig::default(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            summary_max_chars: DEFAULT_SUMMARY_MAX_CHARS,
        }
    }
}

impl ExplorerConfig {
    /// Parses and validates a YAML document. Missing keys take defaults.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// The default system must be in the catalog and the grammar must compile.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.catalog.contains(&self.catalog.default_system) {
            return Err(ConfigError::MissingDefault(
                self.catalog.default_system.clone(),
            ));
        }
        self.build_grammar()?;
        Ok(())
    }

    pub fn build_grammar(&self) -> Result<CallGrammar, ConfigError> {
        Ok(CallGrammar::new(&self.grammar)?)
    }
}
