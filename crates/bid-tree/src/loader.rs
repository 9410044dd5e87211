//! Last-write-wins bookkeeping for overlapping system loads.

use serde::{Deserialize, Serialize};

/// Issued when a load begins; only the newest ticket may install a system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadTicket {
    pub generation: u64,
    pub system_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum LoadStatus {
    Idle,
    #[serde(rename_all = "camelCase")]
    Loading { system_id: String, generation: u64 },
    #[serde(rename_all = "camelCase")]
    Failed { system_id: String, message: String },
    #[serde(rename_all = "camelCase")]
    Ready { system_id: String },
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadTracker {
    generation: u64,
}

impl LoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supersedes every ticket issued before.
    pub fn begin(&mut self, system_id: impl Into<String>) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            generation: self.generation,
            system_id: system_id.into(),
        }
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
