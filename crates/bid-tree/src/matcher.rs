//! Locating nodes by their bidding sequence.
//!
//! Sibling tokens are unique (the flattener rejects duplicates), so a
//! sequence identifies at most one node and every continuation of it lies in
//! that node's id range.

use crate::system::BiddingSystem;
use crate::NodeId;
use bid_core::{CallGrammar, Seat};
use serde::Serialize;

pub const DEFAULT_SEARCH_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStep {
    pub token: String,
    pub by: Seat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub node_id: NodeId,
    pub full_path: Vec<PathStep>,
    pub meaning: String,
    /// The path equals the input rather than extending it.
    pub exact: bool,
}

pub struct SequenceMatcher<'a> {
    system: &'a BiddingSystem,
    grammar: &'a CallGrammar,
    limit: usize,
}

impl<'a> SequenceMatcher<'a> {
    pub fn new(system: &'a BiddingSystem, grammar: &'a CallGrammar) -> Self {
        Self {
            system,
            grammar,
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn normalize<S: AsRef<str>>(&self, input: &[S]) -> Vec<String> {
        input
            .iter()
            .map(|s| self.grammar.normalize(s.as_ref()))
            .collect()
    }

    /// Follows the input down from the roots as far as it matches and
    /// returns the ids along the way.
    fn walk(&self, tokens: &[String]) -> Vec<NodeId> {
        let mut chain = Vec::with_capacity(tokens.len());
        let mut candidates: &[NodeId] = &self.system.root_ids;
        for token in tokens {
            let found = candidates
                .iter()
                .copied()
                .find(|&id| self.system.nodes[id].token == *token);
            match found {
                Some(id) => {
                    chain.push(id);
                    candidates = &self.system.nodes[id].children;
                }
                None => break,
            }
        }
        chain
    }

    /// The node whose full path equals the input.
    pub fn exact_match<S: AsRef<str>>(&self, input: &[S]) -> Option<NodeId> {
        if input.is_empty() {
            return None;
        }
        let tokens = self.normalize(input);
        let chain = self.walk(&tokens);
        if chain.len() == tokens.len() {
            chain.last().copied()
        } else {
            None
        }
    }

    /// The node matching the longest leading part of the input.
    pub fn deepest_match<S: AsRef<str>>(&self, input: &[S]) -> Option<NodeId> {
        self.walk(&self.normalize(input)).last().copied()
    }

    /// The exact match followed by every continuation of it, in id order,
    /// capped at the matcher's limit.
    pub fn search<S: AsRef<str>>(&self, input: &[S]) -> Vec<SearchResult> {
        match self.exact_match(input) {
            Some(anchor) => self.subtree(anchor, true),
            None => Vec::new(),
        }
    }

    /// Like [`SequenceMatcher::search`], but input running past the tree
    /// lists from the deepest node it reached, which is then not exact.
    pub fn search_nearest<S: AsRef<str>>(&self, input: &[S]) -> Vec<SearchResult> {
        let tokens = self.normalize(input);
        let chain = self.walk(&tokens);
        match chain.last() {
            Some(&anchor) => self.subtree(anchor, chain.len() == tokens.len()),
            None => Vec::new(),
        }
    }

    fn subtree(&self, anchor: NodeId, anchor_exact: bool) -> Vec<SearchResult> {
        let end = self.system.nodes[anchor].subtree_end;
        (anchor..end)
            .take(self.limit)
            .map(|id| self.result(id, anchor_exact && id == anchor))
            .collect()
    }

    /// Whether the node's path starts with the normalized `tokens`.
    pub fn path_starts_with(&self, id: NodeId, tokens: &[String]) -> bool {
        match self.system.path_tokens(id) {
            Some(path) => path.len() >= tokens.len() && path[..tokens.len()] == *tokens,
            None => false,
        }
    }

    fn result(&self, id: NodeId, exact: bool) -> SearchResult {
        let node = &self.system.nodes[id];
        let full_path = node
            .ancestors
            .iter()
            .chain(std::iter::once(&id))
            .map(|&i| PathStep {
                token: self.system.nodes[i].token.clone(),
                by: self.system.nodes[i].by,
            })
            .collect();
        SearchResult {
            node_id: id,
            full_path,
            meaning: node.meaning.clone(),
            exact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RawSystem;

    fn system(json: &str) -> BiddingSystem {
        let raw = RawSystem::from_json_str(json).unwrap();
        BiddingSystem::from_raw(&raw, CallGrammar::standard()).unwrap()
    }

    fn scenario() -> BiddingSystem {
        system(
            r#"{"nextBids": [{"bid": "1C", "by": "N", "meaning": "clubs", "nextBids": [
                {"bid": "1D", "by": "S", "meaning": "diamonds", "nextBids": [
                    {"bid": "1H", "by": "N", "meaning": "hearts"}]}]}]}"#,
        )
    }

    #[test]
    fn test_scenario_search() {
        let sys = scenario();
        let m = SequenceMatcher::new(&sys, CallGrammar::standard());
        let results = m.search(&["1C", "1D"]);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].node_id, 1);
        assert!(results[0].exact);
        assert_eq!(results[1].node_id, 2);
        assert!(!results[1].exact);
        assert_eq!(results[1].meaning, "hearts");
        let tokens: Vec<&str> = results[1].full_path.iter().map(|s| s.token.as_str()).collect();
        assert_eq!(tokens, vec!["1C", "1D", "1H"]);
    }

    #[test]
    fn test_exact_match_uses_normalization() {
        let sys = system(
            r#"{"nextBids": [{"bid": "1NT", "by": "N", "meaning": "", "nextBids": [
                {"bid": "Pass", "by": "E", "meaning": "", "nextBids": [
                    {"bid": "2C", "by": "S", "meaning": "Stayman"}]}]}]}"#,
        );
        let m = SequenceMatcher::new(&sys, CallGrammar::standard());
        assert_eq!(m.exact_match(&["1n", "P", "2c"]), Some(2));
        assert_eq!(m.exact_match(&["1 NT", "pass"]), Some(1));
        assert_eq!(m.exact_match(&["1N", "2C"]), None);
        assert_eq!(m.exact_match::<&str>(&[]), None);
    }

    #[test]
    fn test_deepest_match() {
        let sys = scenario();
        let m = SequenceMatcher::new(&sys, CallGrammar::standard());
        assert_eq!(m.deepest_match(&["1C", "1D", "7N"]), Some(1));
        assert_eq!(m.deepest_match(&["2C"]), None);
    }

    #[test]
    fn test_no_match_gives_no_results() {
        let sys = scenario();
        let m = SequenceMatcher::new(&sys, CallGrammar::standard());
        assert!(m.search(&["1C", "2C"]).is_empty());
        assert!(m.search::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_search_nearest_falls_back_to_deepest() {
        let sys = scenario();
        let m = SequenceMatcher::new(&sys, CallGrammar::standard());
        let results = m.search_nearest(&["1C", "1D", "2"]);
        let ids: Vec<NodeId> = results.iter().map(|r| r.node_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(results.iter().all(|r| !r.exact));

        let results = m.search_nearest(&["1C"]);
        assert_eq!(results.len(), 3);
        assert!(results[0].exact);
        assert!(m.search_nearest(&["2C"]).is_empty());
        assert!(m.search_nearest::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_results_are_capped() {
        let children: Vec<String> = (1..=7)
            .flat_map(|level| {
                ["C", "D", "H", "S", "N"]
                    .iter()
                    .map(move |s| format!(r#"{{"bid": "{}{}", "by": "S", "meaning": ""}}"#, level, s))
            })
            .collect();
        let sys = system(&format!(
            r#"{{"nextBids": [{{"bid": "P", "by": "N", "meaning": "", "nextBids": [{}]}}]}}"#,
            children.join(",")
        ));
        assert_eq!(sys.len(), 36);
        let m = SequenceMatcher::new(&sys, CallGrammar::standard());
        assert_eq!(m.search(&["P"]).len(), DEFAULT_SEARCH_LIMIT);
        assert_eq!(m.with_limit(5).search(&["P"]).len(), 5);
    }

    #[test]
    fn test_path_starts_with() {
        let sys = scenario();
        let m = SequenceMatcher::new(&sys, CallGrammar::standard());
        let tokens = m.normalize(&["1C"]);
        assert!(m.path_starts_with(0, &tokens));
        assert!(m.path_starts_with(2, &tokens));
        let tokens = m.normalize(&["1C", "1D", "1H", "1S"]);
        assert!(!m.path_starts_with(2, &tokens));
        assert!(!m.path_starts_with(9, &tokens));
    }
}
