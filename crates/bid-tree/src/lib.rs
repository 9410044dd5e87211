//! Bidding-system trees: flattening, sequence search and view state.

pub mod catalog;
pub mod config;
pub mod error;
pub mod explorer;
pub mod flatten;
pub mod loader;
pub mod matcher;
pub mod schema;
pub mod search_input;
pub mod source;
pub mod state;
pub mod system;

/// Pre-order position of a node in its [`BiddingSystem`].
pub type NodeId = usize;

pub use catalog::{CatalogEntry, SystemCatalog};
pub use config::ExplorerConfig;
pub use error::{ConfigError, LoadError, TreeError, TreeResult};
pub use explorer::{Explorer, LoadOutcome};
pub use loader::{LoadStatus, LoadTicket};
pub use matcher::{PathStep, SearchResult, SequenceMatcher};
pub use schema::{RawBid, RawSystem};
pub use search_input::{InputToken, SearchInput};
pub use source::{DirSource, StaticSource, SystemSource};
pub use state::{Activation, ViewState};
pub use system::{BidNode, BiddingSystem, SequenceEntry};
