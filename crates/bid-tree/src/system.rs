use crate::error::TreeResult;
use crate::flatten::flatten;
use crate::schema::RawSystem;
use crate::NodeId;
use bid_core::label::display_label;
use bid_core::{Auction, Call, CallGrammar, Seat};
use serde::Serialize;

/// One call (or remark) of a flattened bidding system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BidNode {
    /// Pre-order position in [`BiddingSystem::nodes`].
    pub id: NodeId,
    pub label: String,
    pub by: Seat,
    pub meaning: String,
    /// Empty when there is nothing to expand.
    pub explanation: String,
    /// Root first, direct parent last.
    pub ancestors: Vec<NodeId>,
    pub children: Vec<NodeId>,
    pub is_root: bool,
    /// Exclusive end of this node's id range.
    pub subtree_end: NodeId,
    /// `None` for remarks.
    pub call: Option<Call>,
    /// Normalized label used for sequence matching.
    pub token: String,
}

impl BidNode {
    pub fn parent(&self) -> Option<NodeId> {
        self.ancestors.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn has_explanation(&self) -> bool {
        !self.explanation.is_empty()
    }

    /// True for this node and every node below it.
    pub fn contains(&self, id: NodeId) -> bool {
        (self.id..self.subtree_end).contains(&id)
    }

    pub fn display_label(&self) -> String {
        display_label(&self.label, self.by)
    }

    /// Like [`BidNode::display_label`], with calls in display spelling
    /// (`1n` shows as `1NT`, `p` as `Pass`). Remarks stay as written.
    pub fn pretty_label(&self) -> String {
        match self.call {
            Some(call) => display_label(&call.pretty(), self.by),
            None => self.display_label(),
        }
    }
}

/// One step of a node's full sequence, as shown in the sequence dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceEntry {
    pub id: NodeId,
    pub label: String,
    /// [`BidNode::pretty_label`] of the node.
    pub display: String,
    pub by: Seat,
    pub meaning: String,
}

/// A loaded bidding system. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BiddingSystem {
    pub name: String,
    pub author: String,
    pub description: String,
    pub nodes: Vec<BidNode>,
    pub root_ids: Vec<NodeId>,
}

impl BiddingSystem {
    pub fn from_raw(raw: &RawSystem, grammar: &CallGrammar) -> TreeResult<Self> {
        let flat = flatten(&raw.next_bids, grammar)?;
        Ok(Self {
            name: raw.name.clone(),
            author: raw.author.clone(),
            description: raw.description.clone(),
            nodes: flat.nodes,
            root_ids: flat.root_ids,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get_node(&self, id: NodeId) -> Option<&BidNode> {
        self.nodes.get(id)
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &BidNode> {
        self.get_node(id)
            .into_iter()
            .flat_map(move |node| node.children.iter().map(move |&c| &self.nodes[c]))
    }

    pub fn is_descendant(&self, ancestor: NodeId, id: NodeId) -> bool {
        ancestor != id && self.get_node(ancestor).is_some_and(|n| n.contains(id))
    }

    /// Ancestors followed by the node itself.
    pub fn path_ids(&self, id: NodeId) -> Option<Vec<NodeId>> {
        let node = self.get_node(id)?;
        let mut path = node.ancestors.clone();
        path.push(id);
        Some(path)
    }

    /// Normalized tokens of [`BiddingSystem::path_ids`].
    pub fn path_tokens(&self, id: NodeId) -> Option<Vec<String>> {
        Some(
            self.path_ids(id)?
                .into_iter()
                .map(|i| self.nodes[i].token.clone())
                .collect(),
        )
    }

    /// The calls leading to a node, e.g. `1C - (1S) - X`.
    pub fn previous_bids(&self, id: NodeId) -> Option<String> {
        let node = self.get_node(id)?;
        Some(
            node.ancestors
                .iter()
                .map(|&a| self.nodes[a].pretty_label())
                .collect::<Vec<_>>()
                .join(" - "),
        )
    }

    pub fn full_sequence(&self, id: NodeId) -> Option<Vec<SequenceEntry>> {
        Some(
            self.path_ids(id)?
                .into_iter()
                .map(|i| {
                    let node = &self.nodes[i];
                    SequenceEntry {
                        id: i,
                        label: node.label.clone(),
                        display: node.pretty_label(),
                        by: node.by,
                        meaning: node.meaning.clone(),
                    }
                })
                .collect(),
        )
    }

    /// The node's path as an auction table with South dealing.
    pub fn auction_table(&self, id: NodeId) -> Option<Auction> {
        let path = self.path_ids(id)?;
        Some(Auction::from_path(
            Seat::South,
            path.into_iter()
                .map(|i| (self.nodes[i].by, self.nodes[i].label.clone())),
        ))
    }

    pub fn ids_with_children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().filter(|n| n.has_children()).map(|n| n.id)
    }

    pub fn ids_with_explanation(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().filter(|n| n.has_explanation()).map(|n| n.id)
    }
}
