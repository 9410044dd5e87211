//! The query/command surface the view layer drives.
//!
//! An [`Explorer`] owns the loaded [`BiddingSystem`], its [`ViewState`] and
//! the search input. Loads are split into [`Explorer::begin_load`] and
//! [`Explorer::finish_load`] so the caller may fetch in between; only the
//! newest ticket installs anything.

use crate::catalog::SystemCatalog;
use crate::config::ExplorerConfig;
use crate::error::{ConfigError, LoadError};
use crate::loader::{LoadStatus, LoadTicket, LoadTracker};
use crate::matcher::{SearchResult, SequenceMatcher};
use crate::schema::RawSystem;
use crate::search_input::SearchInput;
use crate::source::SystemSource;
use crate::state::{Activation, ViewState};
use crate::system::{BidNode, BiddingSystem, SequenceEntry};
use crate::NodeId;
use bid_core::{Auction, CallGrammar};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoadOutcome {
    Applied,
    /// A newer load had begun; the result was dropped.
    Stale,
}

#[derive(Debug, Clone)]
pub struct Explorer {
    config: ExplorerConfig,
    grammar: CallGrammar,
    system: BiddingSystem,
    state: ViewState,
    input: SearchInput,
    tracker: LoadTracker,
    status: LoadStatus,
    current_system_id: Option<String>,
}

impl Default for Explorer {
    fn default() -> Self {
        Self::with_grammar(ExplorerConfig::default(), CallGrammar::default())
    }
}

impl Explorer {
    pub fn new(config: ExplorerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grammar = config.build_grammar()?;
        Ok(Self::with_grammar(config, grammar))
    }

    fn with_grammar(config: ExplorerConfig, grammar: CallGrammar) -> Self {
        Self {
            config,
            grammar,
            system: BiddingSystem::default(),
            state: ViewState::default(),
            input: SearchInput::new(),
            tracker: LoadTracker::new(),
            status: LoadStatus::Idle,
            current_system_id: None,
        }
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &SystemCatalog {
        &self.config.catalog
    }

    pub fn grammar(&self) -> &CallGrammar {
        &self.grammar
    }

    pub fn system(&self) -> &BiddingSystem {
        &self.system
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn current_system_id(&self) -> Option<&str> {
        self.current_system_id.as_deref()
    }

    fn matcher(&self) -> SequenceMatcher<'_> {
        SequenceMatcher::new(&self.system, &self.grammar).with_limit(self.config.search_limit)
    }

    // Queries

    pub fn get_node(&self, id: NodeId) -> Option<&BidNode> {
        self.system.get_node(id)
    }

    pub fn is_visible(&self, id: NodeId) -> bool {
        self.state.is_visible(&self.system, id)
    }

    pub fn is_collapsed(&self, id: NodeId) -> bool {
        self.state.is_collapsed(id)
    }

    pub fn is_explanation_open(&self, id: NodeId) -> bool {
        self.state.is_explanation_open(id)
    }

    pub fn hidden_range(&self, parent: NodeId) -> Option<NodeId> {
        self.state.hidden_range(parent)
    }

    pub fn hidden_sibling_summary(&self, parent: NodeId) -> Option<String> {
        self.state
            .hidden_sibling_summary(&self.system, parent, self.config.summary_max_chars)
    }

    pub fn can_hide_earlier_siblings(&self, id: NodeId) -> bool {
        self.state.can_hide_earlier_siblings(&self.system, id)
    }

    pub fn visible_rows(&self) -> Vec<(NodeId, usize)> {
        self.state.visible_rows(&self.system)
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.state.focused()
    }

    pub fn dialog(&self) -> Option<NodeId> {
        self.state.dialog()
    }

    /// The full sequence of the node shown in the dialog.
    pub fn dialog_sequence(&self) -> Option<Vec<SequenceEntry>> {
        self.system.full_sequence(self.state.dialog()?)
    }

    pub fn search<S: AsRef<str>>(&self, input: &[S]) -> Vec<SearchResult> {
        self.matcher().search(input)
    }

    pub fn exact_match<S: AsRef<str>>(&self, input: &[S]) -> Option<NodeId> {
        self.matcher().exact_match(input)
    }

    pub fn deepest_match<S: AsRef<str>>(&self, input: &[S]) -> Option<NodeId> {
        self.matcher().deepest_match(input)
    }

    pub fn previous_bids(&self, id: NodeId) -> Option<String> {
        self.system.previous_bids(id)
    }

    pub fn full_sequence(&self, id: NodeId) -> Option<Vec<SequenceEntry>> {
        self.system.full_sequence(id)
    }

    pub fn auction_table(&self, id: NodeId) -> Option<Auction> {
        self.system.auction_table(id)
    }

    // Commands

    pub fn toggle_collapse(&mut self, id: NodeId) {
        self.state.toggle_collapse(&self.system, id);
    }

    pub fn toggle_explanation(&mut self, id: NodeId) {
        self.state.toggle_explanation(&self.system, id);
    }

    pub fn hide_range_before(&mut self, parent: NodeId, before: NodeId) {
        self.state.hide_range_before(&self.system, parent, before);
    }

    pub fn clear_range(&mut self, parent: NodeId) {
        self.state.clear_range(parent);
    }

    pub fn hide_earlier_siblings(&mut self, id: NodeId) {
        self.state.hide_earlier_siblings(&self.system, id);
    }

    pub fn expand_to_node(&mut self, id: NodeId) {
        self.state.expand_to_node(&self.system, id);
        self.sync_input_to_focus();
    }

    pub fn expand_all(&mut self) {
        self.state.expand_all(&self.system);
    }

    pub fn collapse_all(&mut self) {
        self.state.collapse_all(&self.system);
    }

    /// Focusing a node also rewrites the search input to its path;
    /// clearing focus clears the input. Unknown ids change neither.
    pub fn set_focused(&mut self, id: Option<NodeId>) {
        self.state.set_focused(&self.system, id);
        match id {
            Some(id) if self.system.get_node(id).is_some() => self.sync_input_to_focus(),
            Some(_) => {}
            None => self.input.clear(),
        }
    }

    pub fn open_dialog(&mut self, id: NodeId) {
        self.state.open_dialog(&self.system, id);
    }

    pub fn close_dialog(&mut self) {
        self.state.close_dialog();
    }

    pub fn activate(&mut self, id: NodeId) -> Activation {
        let activation = self.state.activate(&self.system, id);
        if activation == Activation::Expanded {
            self.sync_input_to_focus();
        }
        activation
    }

    fn sync_input_to_focus(&mut self) {
        if let Some(tokens) = self.state.focused().and_then(|id| self.system.path_tokens(id)) {
            self.input = SearchInput::from_tokens(&tokens, &self.grammar);
        }
    }

    // Search input

    pub fn input(&self) -> &SearchInput {
        &self.input
    }

    pub fn input_key(&mut self, key: &str) {
        self.input.push_key(key, &self.grammar);
        self.follow_input();
    }

    pub fn input_back(&mut self) {
        self.input.back();
        self.follow_input();
    }

    pub fn input_clear(&mut self) {
        self.input.clear();
        self.follow_input();
    }

    /// Continuations of what has been typed so far. Input that runs past
    /// the tree keeps listing from the deepest node it reached.
    pub fn input_results(&self) -> Vec<SearchResult> {
        self.matcher().search_nearest(&self.input.sequence())
    }

    /// An exact match on the input is expanded to and focused; otherwise
    /// focus is dropped and the input kept.
    fn follow_input(&mut self) {
        match self.exact_match(&self.input.sequence()) {
            Some(id) => self.state.expand_to_node(&self.system, id),
            None => self.state.set_focused(&self.system, None),
        }
    }

    // Loading

    /// Starts loading `system_id`, superseding any load in flight.
    pub fn begin_load(&mut self, system_id: &str) -> Result<LoadTicket, LoadError> {
        let ticket = self.tracker.begin(system_id);
        if !self.config.catalog.contains(system_id) {
            let err = LoadError::UnknownSystem(system_id.to_string());
            self.fail(&ticket, &err);
            return Err(err);
        }
        tracing::info!(
            system_id,
            generation = ticket.generation,
            "loading bidding system"
        );
        self.status = LoadStatus::Loading {
            system_id: ticket.system_id.clone(),
            generation: ticket.generation,
        };
        Ok(ticket)
    }

    /// Installs a fetched document if `ticket` is still the newest one.
    ///
    /// On failure the previous system stays active and the status becomes
    /// [`LoadStatus::Failed`].
    pub fn finish_load(
        &mut self,
        ticket: &LoadTicket,
        fetched: Result<RawSystem, LoadError>,
    ) -> Result<LoadOutcome, LoadError> {
        if !self.tracker.is_current(ticket) {
            tracing::debug!(
                system_id = %ticket.system_id,
                generation = ticket.generation,
                current = self.tracker.generation(),
                "discarding stale load"
            );
            return Ok(LoadOutcome::Stale);
        }
        let built = fetched.and_then(|raw| Ok(BiddingSystem::from_raw(&raw, &self.grammar)?));
        match built {
            Ok(system) => {
                tracing::info!(
                    system_id = %ticket.system_id,
                    generation = ticket.generation,
                    nodes = system.len(),
                    "bidding system loaded"
                );
                self.install(ticket.system_id.clone(), system);
                Ok(LoadOutcome::Applied)
            }
            Err(err) => {
                self.fail(ticket, &err);
                Err(err)
            }
        }
    }

    pub fn finish_load_json(
        &mut self,
        ticket: &LoadTicket,
        json: &str,
    ) -> Result<LoadOutcome, LoadError> {
        self.finish_load(ticket, RawSystem::from_json_str(json))
    }

    /// Begins, fetches and finishes in one call.
    pub fn load_system<S: SystemSource + ?Sized>(
        &mut self,
        source: &S,
        system_id: &str,
    ) -> Result<LoadOutcome, LoadError> {
        let ticket = self.begin_load(system_id)?;
        let fetched = match self.config.catalog.get(system_id) {
            Some(entry) => source.fetch(entry),
            None => Err(LoadError::UnknownSystem(system_id.to_string())),
        };
        self.finish_load(&ticket, fetched)
    }

    pub fn load_default<S: SystemSource + ?Sized>(
        &mut self,
        source: &S,
    ) -> Result<LoadOutcome, LoadError> {
        let system_id = self.config.catalog.default_system.clone();
        self.load_system(source, &system_id)
    }

    /// Installs a document directly, bypassing the catalog.
    pub fn install_raw(
        &mut self,
        system_id: impl Into<String>,
        raw: RawSystem,
    ) -> Result<LoadOutcome, LoadError> {
        let ticket = self.tracker.begin(system_id);
        self.finish_load(&ticket, Ok(raw))
    }

    fn install(&mut self, system_id: String, system: BiddingSystem) {
        self.state = ViewState::new(&system);
        self.system = system;
        self.input.clear();
        self.status = LoadStatus::Ready {
            system_id: system_id.clone(),
        };
        self.current_system_id = Some(system_id);
    }

    fn fail(&mut self, ticket: &LoadTicket, err: &LoadError) {
        tracing::warn!(system_id = %ticket.system_id, error = %err, "failed to load bidding system");
        self.status = LoadStatus::Failed {
            system_id: ticket.system_id.clone(),
            message: err.to_string(),
        };
    }
}
