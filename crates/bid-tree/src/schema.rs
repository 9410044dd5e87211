use crate::error::LoadError;
use bid_core::Seat;
use serde::{Deserialize, Serialize};


/// One node of a bidding system document as authored.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RawBid {
    pub bid: String,
    pub by: Seat,
    #[serde(default)]
    pub meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub next_bids: Vec<RawBid>,
}

/// A whole bidding system document: metadata plus the opening calls.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RawSystem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub next_bids: Vec<RawBid>,
}

impl RawSystem {
    pub fn from_json_str(s: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, LoadError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn node_count(&self) -> usize {
        fn count(bids: &[RawBid]) -> usize {
            bids.iter().map(|b| 1 + count(&b.next_bids)).sum()
        }
        count(&self.next_bids)
    }
}
