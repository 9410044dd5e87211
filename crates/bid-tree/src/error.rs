use crate::NodeId;
use bid_core::GrammarError;
use std::path::PathBuf;
use thiserror::Error;

/// A raw tree that cannot be flattened.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("empty bid label at {path}")]
    EmptyLabel { path: String },

    /// Two siblings normalize to the same token, so a sequence would not
    /// identify a single node.
    #[error("duplicate bid '{label}' under {}", describe_parent(.parent))]
    DuplicateSibling {
        parent: Option<NodeId>,
        label: String,
    },

    #[error("bid tree deeper than {limit} calls at {path}")]
    TooDeep { path: String, limit: usize },
}

fn describe_parent(parent: &Option<NodeId>) -> String {
    match parent {
        Some(id) => format!("node {}", id),
        None => "the root".to_string(),
    }
}

pub type TreeResult<T> = Result<T, TreeError>;

/// Fetching or installing a bidding system failed.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("unknown system '{0}'")]
    UnknownSystem(String),

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The host could not retrieve the document.
    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("unsupported system document format: {0}")]
    UnsupportedFormat(String),

    #[error("malformed bid tree: {0}")]
    Tree(#[from] TreeError),
}

/// Explorer configuration could not be read.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid call grammar: {0}")]
    Grammar(#[from] GrammarError),

    #[error("default system '{0}' is not in the catalog")]
    MissingDefault(String),
}
