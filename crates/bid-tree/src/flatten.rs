//! Pre-order flattening of a raw bid tree into an id-addressed arena.

use crate::error::{TreeError, TreeResult};
use crate::schema::RawBid;
use crate::system::BidNode;
use crate::NodeId;
use bid_core::CallGrammar;
use std::collections::HashSet;

/// Longest bidding path accepted.
pub const MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flattened {
    pub nodes: Vec<BidNode>,
    pub root_ids: Vec<NodeId>,
}

/// Assigns ids in pre-order starting at 0. Each node's `subtree_end` is one
/// past the last id used in its subtree, so `d` descends from `n` exactly
/// when `n.id < d < n.subtree_end`.
pub fn flatten(bids: &[RawBid], grammar: &CallGrammar) -> TreeResult<Flattened> {
    let mut flattener = Flattener {
        grammar,
        nodes: Vec::new(),
    };
    let root_ids = flattener.visit_siblings(bids, &[])?;
    tracing::debug!(
        nodes = flattener.nodes.len(),
        roots = root_ids.len(),
        "flattened bid tree"
    );
    Ok(Flattened {
        nodes: flattener.nodes,
        root_ids,
    })
}

struct Flattener<'g> {
    grammar: &'g CallGrammar,
    nodes: Vec<BidNode>,
}

impl Flattener<'_> {
    fn visit_siblings(&mut self, bids: &[RawBid], ancestors: &[NodeId]) -> TreeResult<Vec<NodeId>> {
        if ancestors.len() >= MAX_DEPTH {
            return Err(TreeError::TooDeep {
                path: self.describe(ancestors),
                limit: MAX_DEPTH,
            });
        }
        let mut seen = HashSet::with_capacity(bids.len());
        let mut ids = Vec::with_capacity(bids.len());
        for raw in bids {
            if raw.bid.trim().is_empty() {
                return Err(TreeError::EmptyLabel {
                    path: format!("{} - ?", self.describe(ancestors)),
                });
            }
            let token = self.grammar.normalize(&raw.bid);
            if !seen.insert(token.clone()) {
                return Err(TreeError::DuplicateSibling {
                    parent: ancestors.last().copied(),
                    label: raw.bid.clone(),
                });
            }
            ids.push(self.visit(raw, token, ancestors)?);
        }
        Ok(ids)
    }

    fn visit(&mut self, raw: &RawBid, token: String, ancestors: &[NodeId]) -> TreeResult<NodeId> {
        let id = self.nodes.len();
        self.nodes.push(BidNode {
            id,
            label: raw.bid.clone(),
            by: raw.by,
            meaning: raw.meaning.clone(),
            explanation: raw.explanation.clone().unwrap_or_default(),
            ancestors: ancestors.to_vec(),
            children: Vec::new(),
            is_root: ancestors.is_empty(),
            subtree_end: id + 1,
            call: self.grammar.parse(&raw.bid),
            token,
        });

        if !raw.next_bids.is_empty() {
            let mut path = ancestors.to_vec();
            path.push(id);
            let children = self.visit_siblings(&raw.next_bids, &path)?;
            self.nodes[id].children = children;
        }
        self.nodes[id].subtree_end = self.nodes.len();
        Ok(id)
    }

    fn describe(&self, ids: &[NodeId]) -> String {
        if ids.is_empty() {
            return "the root".to_string();
        }
        ids.iter()
            .map(|&id| self.nodes[id].label.as_str())
            .collect::<Vec<_>>()
            .join(" - ")
    }
}
