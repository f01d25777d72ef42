use crate::config::BrowserConfig;
use crate::error::{BrowserError, Result};
use crate::expansion::ExpansionState;
use crate::rows;
use chrono::{DateTime, Utc};
use context_graph::{Forest, ForestBuilder, TreeNode, ViewRoot};
use context_protocol::{GenerationRequest, RecordDetails, VisibleNode};
use context_records::{Category, IngestReport, RecordStore, Timestamp};
use context_search::{FilterResult, RecordFilter};
use context_selection::{ActivationGate, SelectionChange, SelectionEngine, SelectionObserver};
use std::time::Instant;

/// Shown by [`ContextBrowser::selected_digest`] when nothing is selected
pub const EMPTY_DIGEST: &str = "[no context selected]";

/// Modifier keys held during an activation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Toggle without moving the view (ctrl / cmd)
    pub secondary: bool,

    /// Select from the anchor to the target (shift)
    pub range: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        secondary: false,
        range: false,
    };

    pub const SECONDARY: Self = Self {
        secondary: true,
        range: false,
    };

    pub const RANGE: Self = Self {
        secondary: false,
        range: true,
    };
}

/// Owned browsing engine: records, forest, view, selection and filter
///
/// Every operation runs synchronously to completion. Loading new records
/// replaces the forest wholesale; selection, expansion state, the view root
/// and the active query are all keyed by id and carry over.
pub struct ContextBrowser {
    config: BrowserConfig,
    builder: ForestBuilder,
    store: RecordStore,
    forest: Forest,
    view_root: ViewRoot,
    selection: SelectionEngine,
    gate: ActivationGate,
    anchor: Option<String>,
    expansion: ExpansionState,
    filter: RecordFilter,
    query: String,
    filter_result: FilterResult,
    observers: Vec<Box<dyn SelectionObserver>>,
}

impl ContextBrowser {
    pub fn new(config: BrowserConfig) -> Result<Self> {
        config.validate().map_err(BrowserError::InvalidConfig)?;

        Ok(Self {
            builder: ForestBuilder::new().synthetic_root_name(config.synthetic_root_name.clone()),
            gate: ActivationGate::new(config.activation_window()),
            expansion: ExpansionState::new(config.expand_by_default),
            store: RecordStore::new(),
            forest: Forest::new(),
            view_root: ViewRoot::new(),
            selection: SelectionEngine::new(),
            anchor: None,
            filter: RecordFilter::new(),
            query: String::new(),
            filter_result: FilterResult::inactive(),
            observers: Vec::new(),
            config,
        })
    }

    /// Replace all records and rebuild the forest
    pub fn load_records(&mut self, store: RecordStore) {
        self.forest = self.builder.build(&store);
        self.store = store;
        self.filter_result = self.filter.filter(&self.store, &self.forest, &self.query);

        let inert = self.selection.len() - self.selection.live_ids(&self.forest).count();
        if inert > 0 {
            log::debug!("{inert} selected ids are not in the new forest");
        }
        log::info!(
            "Loaded {} records ({} roots, {} diagnostics)",
            self.forest.len(),
            self.forest.roots().count(),
            self.forest.diagnostics().len()
        );
    }

    /// Parse a JSON payload (flat or nested) and load it
    pub fn load_json(&mut self, payload: &str) -> Result<IngestReport> {
        let (store, report) = RecordStore::from_json_str(payload)?;
        self.load_records(store);
        Ok(report)
    }

    /// Plain activation: toggle, reroot at the top ancestor, set the anchor
    pub fn activate(&mut self, id: &str, now: Instant) -> Vec<SelectionChange> {
        self.activate_with(id, Modifiers::NONE, now)
    }

    /// Activation with modifier keys
    ///
    /// Range wins over secondary. A range activation without an anchor acts
    /// like a plain one. Duplicate activations inside the window are dropped.
    pub fn activate_with(&mut self, id: &str, modifiers: Modifiers, now: Instant) -> Vec<SelectionChange> {
        if !self.forest.contains(id) {
            log::debug!("Ignoring activation of unknown id {id}");
            return Vec::new();
        }
        if !self.gate.admit(id, now) {
            return Vec::new();
        }

        let changes = match (modifiers, self.anchor.clone()) {
            (Modifiers { range: true, .. }, Some(anchor)) => {
                let order = self.traversal_order();
                self.selection.range_select(&self.forest, &order, &anchor, id)
            }
            (Modifiers { secondary: true, range: false }, _) => {
                let changes = self.selection.toggle(&self.forest, id);
                self.anchor = Some(id.to_string());
                changes
            }
            _ => {
                let changes = self.selection.toggle(&self.forest, id);
                self.view_root.set(self.forest.find_root_id(id));
                self.anchor = Some(id.to_string());
                changes
            }
        };

        self.notify(&changes);
        changes
    }

    /// Show the subtree under `id` (the whole forest when unknown)
    pub fn set_view_root(&mut self, id: &str) {
        self.view_root.set(id);
    }

    pub fn reset_view_root(&mut self) {
        self.view_root.reset();
    }

    /// Apply a text filter; blank clears it
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.filter_result = self.filter.filter(&self.store, &self.forest, &self.query);
    }

    /// Flip expand/collapse of `id`, returning the new state
    pub fn toggle_expanded(&mut self, id: &str) -> bool {
        self.expansion.toggle(id)
    }

    pub fn set_expanded(&mut self, id: &str, expanded: bool) {
        self.expansion.set(id, expanded);
    }

    pub fn clear_selection(&mut self) -> Vec<SelectionChange> {
        let changes = self.selection.clear();
        self.anchor = None;
        self.notify(&changes);
        changes
    }

    /// Register an observer for every later selection change
    pub fn subscribe(&mut self, observer: Box<dyn SelectionObserver>) {
        self.observers.push(observer);
    }

    /// Rows of the displayed subtree, in display order
    pub fn visible_nodes(&self) -> Vec<VisibleNode> {
        self.visible_nodes_at(Utc::now())
    }

    /// [`Self::visible_nodes`] with an explicit clock for relative times
    pub fn visible_nodes_at(&self, now: DateTime<Utc>) -> Vec<VisibleNode> {
        let Some(root) = self.view_root_node() else {
            return Vec::new();
        };
        rows::collect(rows::RowContext {
            forest: &self.forest,
            selection: &self.selection,
            expansion: &self.expansion,
            filter: &self.filter_result,
            now,
        }, root)
    }

    /// Payload for the generation backend; inert ids are left out
    pub fn generation_request(&self, prompt: &str) -> GenerationRequest {
        let context_ids = self.selected_ids();
        GenerationRequest::new(prompt, context_ids).params(self.config.generation.clone())
    }

    /// Live selected ids in selection order
    pub fn selected_ids(&self) -> Vec<String> {
        self.selection
            .live_ids(&self.forest)
            .map(str::to_string)
            .collect()
    }

    /// Plain-text dump of the selected records, one block per record
    pub fn selected_digest(&self) -> String {
        let blocks: Vec<String> = self
            .selection
            .live_ids(&self.forest)
            .filter_map(|id| self.store.get(id))
            .map(|record| {
                format!(
                    "=== {}: {} ===\n{}",
                    record.display_type(),
                    record.display_name(),
                    record.content.to_plain_text()
                )
            })
            .collect();

        if blocks.is_empty() {
            EMPTY_DIGEST.to_string()
        } else {
            blocks.join("\n\n")
        }
    }

    /// Detail view of one record; `None` for unknown ids and the synthetic root
    pub fn details(&self, id: &str) -> Option<RecordDetails> {
        self.details_at(id, Utc::now())
    }

    /// [`Self::details`] with an explicit clock for relative times
    pub fn details_at(&self, id: &str, now: DateTime<Utc>) -> Option<RecordDetails> {
        let node = self.forest.node(id)?;
        let record = node.record.as_deref()?;
        let category = Category::from_type_tag(record.type_tag.as_deref());
        let preview = &self.config.preview;

        Some(RecordDetails {
            id: record.id.clone(),
            name: record.display_name().to_string(),
            type_tag: record.display_type().to_string(),
            icon: category.icon().to_string(),
            color: category.color().to_string(),
            path: self
                .forest
                .path_to(id)
                .iter()
                .map(|step| step.name().to_string())
                .collect(),
            preview: record.content.preview(preview.item_chars, preview.text_chars),
            item_count: record.content.item_count(),
            child_count: self.forest.children(node).count(),
            created_at: record.created_at.as_ref().map(absolute_time),
            updated_at: record.updated_at.as_ref().map(absolute_time),
            updated: record.last_touched().map(|ts| ts.relative(now)),
        })
    }

    /// Pre-order ids under the current view root
    pub fn traversal_order(&self) -> Vec<String> {
        self.view_root_node()
            .map(|root| self.forest.traversal_order(root))
            .unwrap_or_default()
    }

    pub fn view_root_node(&self) -> Option<&TreeNode> {
        self.view_root.resolve(&self.forest)
    }

    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filter_result(&self) -> &FilterResult {
        &self.filter_result
    }

    pub fn selection(&self) -> &SelectionEngine {
        &self.selection
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    fn notify(&mut self, changes: &[SelectionChange]) {
        for observer in &mut self.observers {
            for change in changes {
                observer.on_change(change);
            }
        }
    }
}

fn absolute_time(ts: &Timestamp) -> String {
    ts.as_datetime()
        .map_or_else(|| ts.to_string(), |dt| dt.format("%Y-%m-%d %H:%M").to_string())
}
