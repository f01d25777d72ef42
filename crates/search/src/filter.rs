use crate::result::FilterResult;
use context_graph::Forest;
use context_records::{ContextRecord, RecordStore};

/// Case-insensitive substring filter over a record store
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordFilter;

impl RecordFilter {
    pub fn new() -> Self {
        Self
    }

    /// Match `query` against every record in `store`
    ///
    /// Runs over the whole store, not just the displayed subtree. Each match
    /// contributes its ancestor chain in `forest` to the force-expand set so
    /// it stays reachable. A blank query yields an inactive result.
    pub fn filter(&self, store: &RecordStore, forest: &Forest, query: &str) -> FilterResult {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return FilterResult::inactive();
        }

        let mut result = FilterResult::active();
        for record in store.iter() {
            if !matches(&needle, record) {
                continue;
            }
            result.push_match(&record.id);
            for ancestor in forest.ancestors(&record.id) {
                result.push_force_expand(ancestor);
            }
        }

        log::debug!(
            "Filter {needle:?}: {} matches, {} forced open",
            result.matches().len(),
            result.force_expand().len()
        );
        result
    }
}

/// `needle` must already be lowercased
fn matches(needle: &str, record: &ContextRecord) -> bool {
    let fields = [
        record.name.as_deref(),
        record.title.as_deref(),
        record.type_tag.as_deref(),
    ];
    fields
        .into_iter()
        .flatten()
        .any(|field| contains_folded(field, needle))
        || contains_folded(&record.content.flatten_text(), needle)
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
