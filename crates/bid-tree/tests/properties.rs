//! Property tests over randomly shaped bidding trees.
//!
//! 1. Flattening is deterministic.
//! 2. A node's id range holds exactly its descendants.
//! 3. Ancestor chains agree with parent links.
//! 4. A node's own path matches only itself.
//! 5. A shorter sequence finds a superset of what a longer one finds.
//! 6. collapse_all shows only roots, expand_all shows everything.
//! 7. expand_to_node is idempotent and leaves the node visible.
//! 8. A hidden range hides exactly the earlier children and clearing it
//!    restores the view.
//! 9. visible_rows agrees with is_visible.

use bid_core::{CallGrammar, Seat};
use bid_tree::{BiddingSystem, NodeId, RawBid, RawSystem, SequenceMatcher, ViewState};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

/// Distinct after normalization, in a mix of spellings.
const LABELS: [&str; 5] = ["1C", "Pass", "1NT", "Dbl", "games"];
const SEATS: [Seat; 4] = [Seat::North, Seat::East, Seat::South, Seat::West];

#[derive(Debug, Clone)]
struct Shape(Vec<Shape>);

fn forest_strategy() -> impl Strategy<Value = Vec<Shape>> {
    let leaf = Just(Shape(Vec::new()));
    let tree = leaf.prop_recursive(5, 48, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(Shape)
    });
    prop::collection::vec(tree, 1..5)
}

fn build(shapes: &[Shape], depth: usize) -> Vec<RawBid> {
    shapes
        .iter()
        .enumerate()
        .map(|(i, shape)| RawBid {
            bid: LABELS[i % LABELS.len()].to_string(),
            by: SEATS[(depth + i) % 4],
            meaning: format!("meaning {}.{}", depth, i),
            explanation: (i % 2 == 0).then(|| format!("explanation {}.{}", depth, i)),
            next_bids: build(&shape.0, depth + 1),
        })
        .collect()
}

fn system_strategy() -> impl Strategy<Value = RawSystem> {
    forest_strategy().prop_map(|forest| RawSystem {
        name: "generated".into(),
        next_bids: build(&forest, 0),
        ..RawSystem::default()
    })
}

fn flatten(raw: &RawSystem) -> BiddingSystem {
    BiddingSystem::from_raw(raw, CallGrammar::standard()).unwrap()
}

#[derive(Debug, Clone)]
enum Op {
    ToggleCollapse(usize),
    ToggleExplanation(usize),
    HideRange(usize, usize),
    ClearRange(usize),
    ExpandTo(usize),
    ExpandAll,
    CollapseAll,
    Activate(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<usize>().prop_map(Op::ToggleCollapse),
        any::<usize>().prop_map(Op::ToggleExplanation),
        (any::<usize>(), any::<usize>()).prop_map(|(p, c)| Op::HideRange(p, c)),
        any::<usize>().prop_map(Op::ClearRange),
        any::<usize>().prop_map(Op::ExpandTo),
        Just(Op::ExpandAll),
        Just(Op::CollapseAll),
        any::<usize>().prop_map(Op::Activate),
    ]
}

/// Applies `ops` with ids folded into range; a hidden range picks a child
/// of the chosen parent when it has one.
fn apply(state: &mut ViewState, sys: &BiddingSystem, ops: &[Op]) {
    let n = sys.len();
    for op in ops {
        match *op {
            Op::ToggleCollapse(id) => state.toggle_collapse(sys, id % n),
            Op::ToggleExplanation(id) => state.toggle_explanation(sys, id % n),
            Op::HideRange(parent, child) => {
                let children = &sys.nodes[parent % n].children;
                if !children.is_empty() {
                    state.hide_range_before(sys, parent % n, children[child % children.len()]);
                }
            }
            Op::ClearRange(parent) => state.clear_range(parent % n),
            Op::ExpandTo(id) => state.expand_to_node(sys, id % n),
            Op::ExpandAll => state.expand_all(sys),
            Op::CollapseAll => state.collapse_all(sys),
            Op::Activate(id) => {
                state.activate(sys, id % n);
            }
        }
    }
}

fn visible_ids(state: &ViewState, sys: &BiddingSystem) -> Vec<NodeId> {
    (0..sys.len()).filter(|&id| state.is_visible(sys, id)).collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1-3. Flattening
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn flattening_is_deterministic(raw in system_strategy()) {
        prop_assert_eq!(flatten(&raw), flatten(&raw));
        prop_assert_eq!(flatten(&raw).len(), raw.node_count());
    }

    #[test]
    fn id_range_holds_exactly_the_descendants(raw in system_strategy()) {
        let sys = flatten(&raw);
        for node in &sys.nodes {
            prop_assert!(node.subtree_end > node.id);
            prop_assert!(node.subtree_end <= sys.len());
            for other in &sys.nodes {
                let below = node.id < other.id && other.id < node.subtree_end;
                prop_assert_eq!(
                    below,
                    other.ancestors.contains(&node.id),
                    "node {} vs {}", node.id, other.id
                );
            }
        }
    }

    #[test]
    fn ancestors_follow_parent_links(raw in system_strategy()) {
        let sys = flatten(&raw);
        for (idx, node) in sys.nodes.iter().enumerate() {
            prop_assert_eq!(node.id, idx);
            prop_assert_eq!(node.is_root, node.ancestors.is_empty());
            prop_assert_eq!(node.is_root, sys.root_ids.contains(&node.id));
            for &child in &node.children {
                let mut expected = node.ancestors.clone();
                expected.push(node.id);
                prop_assert_eq!(&sys.nodes[child].ancestors, &expected);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4-5. Search
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn own_path_matches_only_itself(raw in system_strategy()) {
        let sys = flatten(&raw);
        let matcher = SequenceMatcher::new(&sys, CallGrammar::standard());
        for id in 0..sys.len() {
            let path = sys.path_tokens(id).unwrap();
            prop_assert_eq!(matcher.exact_match(&path), Some(id));
            let results = matcher.search(&path);
            prop_assert_eq!(results[0].node_id, id);
            prop_assert!(results[0].exact);
            prop_assert!(results[1..].iter().all(|r| !r.exact));
        }
    }

    #[test]
    fn shorter_sequence_finds_a_superset(raw in system_strategy()) {
        let sys = flatten(&raw);
        let matcher = SequenceMatcher::new(&sys, CallGrammar::standard()).with_limit(usize::MAX);
        for id in 0..sys.len() {
            let path = sys.path_tokens(id).unwrap();
            let longer: Vec<NodeId> = matcher.search(&path).iter().map(|r| r.node_id).collect();
            for cut in 1..path.len() {
                let shorter: Vec<NodeId> =
                    matcher.search(&path[..cut]).iter().map(|r| r.node_id).collect();
                prop_assert!(longer.iter().all(|id| shorter.contains(id)));
                prop_assert!(longer.iter().all(|&id| matcher.path_starts_with(id, &path[..cut])));
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6-9. View state
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn collapse_all_and_expand_all(
        raw in system_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..16),
    ) {
        let sys = flatten(&raw);
        let mut state = ViewState::new(&sys);
        apply(&mut state, &sys, &ops);

        state.collapse_all(&sys);
        prop_assert_eq!(visible_ids(&state, &sys), sys.root_ids.clone());

        state.expand_all(&sys);
        prop_assert_eq!(visible_ids(&state, &sys).len(), sys.len());
    }

    #[test]
    fn expand_to_node_is_idempotent(
        raw in system_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..16),
        target in any::<usize>(),
    ) {
        let sys = flatten(&raw);
        let target = target % sys.len();
        let mut state = ViewState::new(&sys);
        apply(&mut state, &sys, &ops);

        state.expand_to_node(&sys, target);
        let once = state.clone();
        state.expand_to_node(&sys, target);
        prop_assert_eq!(&state, &once);
        prop_assert!(state.is_visible(&sys, target));
        prop_assert_eq!(state.focused(), Some(target));
    }

    #[test]
    fn hidden_range_bound_and_restore(
        raw in system_strategy(),
        parent in any::<usize>(),
        child in any::<usize>(),
    ) {
        let sys = flatten(&raw);
        let parent = parent % sys.len();
        let children = sys.nodes[parent].children.clone();
        prop_assume!(!children.is_empty());
        let before = children[child % children.len()];

        let mut state = ViewState::new(&sys);
        state.expand_all(&sys);
        let shown = visible_ids(&state, &sys);

        state.hide_range_before(&sys, parent, before);
        for &c in &children {
            prop_assert_eq!(state.is_visible(&sys, c), c >= before);
        }
        prop_assert!(state.is_visible(&sys, parent));

        state.clear_range(parent);
        prop_assert_eq!(visible_ids(&state, &sys), shown);
    }

    #[test]
    fn visible_rows_agree_with_visibility(
        raw in system_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..24),
    ) {
        let sys = flatten(&raw);
        let mut state = ViewState::new(&sys);
        apply(&mut state, &sys, &ops);

        let rows = state.visible_rows(&sys);
        let ids: Vec<NodeId> = rows.iter().map(|(id, _)| *id).collect();
        prop_assert_eq!(ids, visible_ids(&state, &sys));
        for (id, depth) in rows {
            prop_assert_eq!(depth, sys.nodes[id].depth());
        }
    }
}
