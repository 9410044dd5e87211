use bid_core::{AuctionEntry, Seat};
use bid_tree::{Explorer, ExplorerConfig, LoadError, LoadTicket, NodeId};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[derive(Serialize)]
struct SystemInfo<'a> {
    name: &'a str,
    author: &'a str,
    description: &'a str,
}

/// Rows of four calls under the seat headings, dealer first.
#[derive(Serialize)]
struct AuctionTable<'a> {
    seats: [Seat; 4],
    rows: Vec<[Option<&'a AuctionEntry>; 4]>,
}

/// The tree explorer as seen from the browser. Fetching is left to JS:
/// call `beginLoad`, fetch the returned system's path, then hand the text
/// and ticket to `finishLoad`.
#[wasm_bindgen]
pub struct WebExplorer {
    inner: Explorer,
}

impl Default for WebExplorer {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WebExplorer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebExplorer {
        WebExplorer {
            inner: Explorer::default(),
        }
    }

    /// Builds an explorer from a YAML configuration document.
    #[wasm_bindgen(js_name = fromConfigYaml)]
    pub fn from_config_yaml(yaml: &str) -> Result<WebExplorer, JsValue> {
        let config = ExplorerConfig::from_yaml_str(yaml).map_err(error)?;
        let inner = Explorer::new(config).map_err(error)?;
        Ok(WebExplorer { inner })
    }

    pub fn catalog(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.catalog())
    }

    #[wasm_bindgen(js_name = systemPath)]
    pub fn system_path(&self, system_id: &str) -> Option<String> {
        self.inner.catalog().get(system_id).map(|e| e.path.clone())
    }

    pub fn status(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.status())
    }

    #[wasm_bindgen(js_name = currentSystemId)]
    pub fn current_system_id(&self) -> Option<String> {
        self.inner.current_system_id().map(str::to_string)
    }

    #[wasm_bindgen(js_name = beginLoad)]
    pub fn begin_load(&mut self, system_id: &str) -> Result<JsValue, JsValue> {
        let ticket = self.inner.begin_load(system_id).map_err(error)?;
        to_js(&ticket)
    }

    /// Returns `"Applied"` or `"Stale"`; a failed load throws and leaves
    /// the previous system in place.
    #[wasm_bindgen(js_name = finishLoad)]
    pub fn finish_load(&mut self, ticket: JsValue, json: &str) -> Result<JsValue, JsValue> {
        let ticket: LoadTicket = serde_wasm_bindgen::from_value(ticket)?;
        let outcome = self.inner.finish_load_json(&ticket, json).map_err(error)?;
        to_js(&outcome)
    }

    /// Reports a failed fetch for `ticket`.
    #[wasm_bindgen(js_name = failLoad)]
    pub fn fail_load(&mut self, ticket: JsValue, message: &str) -> Result<(), JsValue> {
        let ticket: LoadTicket = serde_wasm_bindgen::from_value(ticket)?;
        let fetched = Err(LoadError::Fetch(message.to_string()));
        self.inner
            .finish_load(&ticket, fetched)
            .map(|_| ())
            .map_err(error)
    }

    #[wasm_bindgen(js_name = systemInfo)]
    pub fn system_info(&self) -> Result<JsValue, JsValue> {
        let system = self.inner.system();
        to_js(&SystemInfo {
            name: &system.name,
            author: &system.author,
            description: &system.description,
        })
    }

    #[wasm_bindgen(js_name = rootIds)]
    pub fn root_ids(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.system().root_ids)
    }

    #[wasm_bindgen(js_name = getNode)]
    pub fn get_node(&self, id: NodeId) -> Result<JsValue, JsValue> {
        to_js(&self.inner.get_node(id))
    }

    #[wasm_bindgen(js_name = isVisible)]
    pub fn is_visible(&self, id: NodeId) -> bool {
        self.inner.is_visible(id)
    }

    #[wasm_bindgen(js_name = isCollapsed)]
    pub fn is_collapsed(&self, id: NodeId) -> bool {
        self.inner.is_collapsed(id)
    }

    #[wasm_bindgen(js_name = isExplanationOpen)]
    pub fn is_explanation_open(&self, id: NodeId) -> bool {
        self.inner.is_explanation_open(id)
    }

    #[wasm_bindgen(js_name = hiddenRange)]
    pub fn hidden_range(&self, parent: NodeId) -> Option<NodeId> {
        self.inner.hidden_range(parent)
    }

    #[wasm_bindgen(js_name = getHiddenSiblingSummary)]
    pub fn hidden_sibling_summary(&self, parent: NodeId) -> Option<String> {
        self.inner.hidden_sibling_summary(parent)
    }

    #[wasm_bindgen(js_name = canHideEarlierSiblings)]
    pub fn can_hide_earlier_siblings(&self, id: NodeId) -> bool {
        self.inner.can_hide_earlier_siblings(id)
    }

    /// `[[id, depth], ...]` in display order.
    #[wasm_bindgen(js_name = visibleRows)]
    pub fn visible_rows(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.visible_rows())
    }

    /// Takes an array of call strings.
    pub fn search(&self, input: JsValue) -> Result<JsValue, JsValue> {
        let input: Vec<String> = serde_wasm_bindgen::from_value(input)?;
        to_js(&self.inner.search(&input))
    }

    #[wasm_bindgen(js_name = deepestMatch)]
    pub fn deepest_match(&self, input: JsValue) -> Result<Option<NodeId>, JsValue> {
        let input: Vec<String> = serde_wasm_bindgen::from_value(input)?;
        Ok(self.inner.deepest_match(&input))
    }

    #[wasm_bindgen(js_name = previousBids)]
    pub fn previous_bids(&self, id: NodeId) -> Option<String> {
        self.inner.previous_bids(id)
    }

    #[wasm_bindgen(js_name = fullSequence)]
    pub fn full_sequence(&self, id: NodeId) -> Result<JsValue, JsValue> {
        to_js(&self.inner.full_sequence(id))
    }

    #[wasm_bindgen(js_name = auctionTable)]
    pub fn auction_table(&self, id: NodeId) -> Result<JsValue, JsValue> {
        let auction = self.inner.auction_table(id);
        to_js(&auction.as_ref().map(|a| AuctionTable {
            seats: a.seats(),
            rows: a.rows(),
        }))
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.inner.focused()
    }

    pub fn dialog(&self) -> Option<NodeId> {
        self.inner.dialog()
    }

    #[wasm_bindgen(js_name = dialogSequence)]
    pub fn dialog_sequence(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.dialog_sequence())
    }

    #[wasm_bindgen(js_name = toggleCollapse)]
    pub fn toggle_collapse(&mut self, id: NodeId) {
        self.inner.toggle_collapse(id);
    }

    #[wasm_bindgen(js_name = toggleExplanation)]
    pub fn toggle_explanation(&mut self, id: NodeId) {
        self.inner.toggle_explanation(id);
    }

    #[wasm_bindgen(js_name = hideRangeBefore)]
    pub fn hide_range_before(&mut self, parent: NodeId, before: NodeId) {
        self.inner.hide_range_before(parent, before);
    }

    #[wasm_bindgen(js_name = clearRange)]
    pub fn clear_range(&mut self, parent: NodeId) {
        self.inner.clear_range(parent);
    }

    #[wasm_bindgen(js_name = hideEarlierSiblings)]
    pub fn hide_earlier_siblings(&mut self, id: NodeId) {
        self.inner.hide_earlier_siblings(id);
    }

    #[wasm_bindgen(js_name = expandToNode)]
    pub fn expand_to_node(&mut self, id: NodeId) {
        self.inner.expand_to_node(id);
    }

    #[wasm_bindgen(js_name = expandAll)]
    pub fn expand_all(&mut self) {
        self.inner.expand_all();
    }

    #[wasm_bindgen(js_name = collapseAll)]
    pub fn collapse_all(&mut self) {
        self.inner.collapse_all();
    }

    #[wasm_bindgen(js_name = setFocused)]
    pub fn set_focused(&mut self, id: Option<NodeId>) {
        self.inner.set_focused(id);
    }

    #[wasm_bindgen(js_name = openDialog)]
    pub fn open_dialog(&mut self, id: NodeId) {
        self.inner.open_dialog(id);
    }

    #[wasm_bindgen(js_name = closeDialog)]
    pub fn close_dialog(&mut self) {
        self.inner.close_dialog();
    }

    pub fn activate(&mut self, id: NodeId) -> Result<JsValue, JsValue> {
        to_js(&self.inner.activate(id))
    }

    /// The typed sequence, one string per call.
    pub fn input(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.input().sequence())
    }

    #[wasm_bindgen(js_name = inputKey)]
    pub fn input_key(&mut self, key: &str) {
        self.inner.input_key(key);
    }

    #[wasm_bindgen(js_name = inputBack)]
    pub fn input_back(&mut self) {
        self.inner.input_back();
    }

    #[wasm_bindgen(js_name = inputClear)]
    pub fn input_clear(&mut self) {
        self.inner.input_clear();
    }

    #[wasm_bindgen(js_name = inputResults)]
    pub fn input_results(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.input_results())
    }
}
