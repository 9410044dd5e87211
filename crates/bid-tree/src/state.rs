//! Collapse, hidden-range, explanation and focus state of the tree view.
//!
//! Visibility is always derived from this state and the immutable
//! [`BiddingSystem`]; it is never stored.

use crate::system::{BidNode, BiddingSystem};
use crate::NodeId;
use bid_core::label::join_truncated;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// What a click on a node did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Activation {
    Expanded,
    Collapsed,
    ExplanationToggled,
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    collapsed: BTreeSet<NodeId>,
    /// parent id -> first child id still shown
    hidden_ranges: BTreeMap<NodeId, NodeId>,
    explanations_open: BTreeSet<NodeId>,
    focused: Option<NodeId>,
    dialog: Option<NodeId>,
}

fn toggle(set: &mut BTreeSet<NodeId>, id: NodeId) {
    if !set.remove(&id) {
        set.insert(id);
    }
}

fn known(system: &BiddingSystem, id: NodeId) -> bool {
    let found = id < system.len();
    if !found {
        tracing::debug!(id, "ignoring command for unknown node");
    }
    found
}

impl ViewState {
    /// Everything collapsed: only the opening calls show.
    pub fn new(system: &BiddingSystem) -> Self {
        Self {
            collapsed: system.ids_with_children().collect(),
            ..Self::default()
        }
    }

    pub fn is_collapsed(&self, id: NodeId) -> bool {
        self.collapsed.contains(&id)
    }

    pub fn is_explanation_open(&self, id: NodeId) -> bool {
        self.explanations_open.contains(&id)
    }

    pub fn hidden_range(&self, parent: NodeId) -> Option<NodeId> {
        self.hidden_ranges.get(&parent).copied()
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn dialog(&self) -> Option<NodeId> {
        self.dialog
    }

    fn hidden_by_range(&self, node: &BidNode) -> bool {
        node.parent()
            .and_then(|parent| self.hidden_range(parent))
            .is_some_and(|before| node.id < before)
    }

    /// A root is always visible. Any other node is visible when no ancestor
    /// is collapsed and neither it nor an ancestor falls in its parent's
    /// hidden range.
    pub fn is_visible(&self, system: &BiddingSystem, id: NodeId) -> bool {
        let Some(node) = system.get_node(id) else {
            return false;
        };
        if node.is_root {
            return true;
        }
        if node.ancestors.iter().any(|a| self.collapsed.contains(a)) {
            return false;
        }
        !node
            .ancestors
            .iter()
            .chain(std::iter::once(&id))
            .any(|&i| self.hidden_by_range(&system.nodes[i]))
    }

    /// Visible nodes in display order with their depth.
    pub fn visible_rows(&self, system: &BiddingSystem) -> Vec<(NodeId, usize)> {
        let mut rows = Vec::new();
        let mut id = 0;
        while id < system.len() {
            let node = &system.nodes[id];
            if self.hidden_by_range(node) {
                id = node.subtree_end;
                continue;
            }
            rows.push((id, node.depth()));
            id = if self.collapsed.contains(&id) {
                node.subtree_end
            } else {
                id + 1
            };
        }
        rows
    }

    /// Labels of the children hidden under `parent`, opponents' calls in
    /// parentheses, cut at `max_chars` characters.
    pub fn hidden_sibling_summary(
        &self,
        system: &BiddingSystem,
        parent: NodeId,
        max_chars: usize,
    ) -> Option<String> {
        let before = self.hidden_range(parent)?;
        let hidden: Vec<String> = system
            .children(parent)
            .filter(|child| child.id < before)
            .map(BidNode::display_label)
            .collect();
        if hidden.is_empty() {
            return None;
        }
        Some(join_truncated(hidden, max_chars))
    }

    pub fn toggle_collapse(&mut self, system: &BiddingSystem, id: NodeId) {
        if known(system, id) {
            toggle(&mut self.collapsed, id);
        }
    }

    pub fn toggle_explanation(&mut self, system: &BiddingSystem, id: NodeId) {
        if known(system, id) {
            toggle(&mut self.explanations_open, id);
        }
    }

    /// Hides the children of `parent` that come before `before`, which must
    /// be one of its children.
    pub fn hide_range_before(&mut self, system: &BiddingSystem, parent: NodeId, before: NodeId) {
        match system.get_node(parent) {
            Some(node) if node.children.contains(&before) => {
                self.hidden_ranges.insert(parent, before);
            }
            _ => tracing::debug!(parent, before, "ignoring hidden range outside the tree"),
        }
    }

    pub fn clear_range(&mut self, parent: NodeId) {
        self.hidden_ranges.remove(&parent);
    }

    pub fn can_hide_earlier_siblings(&self, system: &BiddingSystem, id: NodeId) -> bool {
        system
            .get_node(id)
            .and_then(BidNode::parent)
            .is_some_and(|parent| system.nodes[parent].children.first() != Some(&id))
    }

    /// Hides every earlier sibling of `id`.
    pub fn hide_earlier_siblings(&mut self, system: &BiddingSystem, id: NodeId) {
        if self.can_hide_earlier_siblings(system, id) {
            if let Some(parent) = system.nodes[id].parent() {
                self.hide_range_before(system, parent, id);
            }
        }
    }

    /// Makes `id` visible and focuses it: every ancestor is expanded and any
    /// hidden range covering the path is cleared.
    pub fn expand_to_node(&mut self, system: &BiddingSystem, id: NodeId) {
        let Some(node) = system.get_node(id) else {
            tracing::debug!(id, "ignoring command for unknown node");
            return;
        };
        for ancestor in &node.ancestors {
            self.collapsed.remove(ancestor);
        }
        for &step in node.ancestors.iter().chain(std::iter::once(&id)) {
            let step = &system.nodes[step];
            if self.hidden_by_range(step) {
                if let Some(parent) = step.parent() {
                    self.hidden_ranges.remove(&parent);
                }
            }
        }
        self.focused = Some(id);
    }

    pub fn expand_all(&mut self, system: &BiddingSystem) {
        self.collapsed.clear();
        self.hidden_ranges.clear();
        self.explanations_open = system.ids_with_explanation().collect();
    }

    pub fn collapse_all(&mut self, system: &BiddingSystem) {
        self.collapsed = system.ids_with_children().collect();
        self.hidden_ranges.clear();
        self.explanations_open.clear();
    }

    pub fn set_focused(&mut self, system: &BiddingSystem, id: Option<NodeId>) {
        match id {
            Some(id) if known(system, id) => self.focused = Some(id),
            Some(_) => {}
            None => self.focused = None,
        }
    }

    pub fn open_dialog(&mut self, system: &BiddingSystem, id: NodeId) {
        if known(system, id) {
            self.dialog = Some(id);
        }
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    /// A click on a node: nodes with children fold or unfold (taking focus
    /// when they unfold), leaves open or close their explanation.
    pub fn activate(&mut self, system: &BiddingSystem, id: NodeId) -> Activation {
        let Some(node) = system.get_node(id) else {
            return Activation::Ignored;
        };
        if node.has_children() {
            let expanding = self.is_collapsed(id);
            toggle(&mut self.collapsed, id);
            if expanding {
                self.focused = Some(id);
                Activation::Expanded
            } else {
                Activation::Collapsed
            }
        } else if node.has_explanation() {
            toggle(&mut self.explanations_open, id);
            Activation::ExplanationToggled
        } else {
            Activation::Ignored
        }
    }
}
