use crate::error::Result;
use crate::ingest::{parse_payload, IngestReport, SYNTHETIC_ROOT_ID};
use crate::types::ContextRecord;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Flat collection of records in ingest order
///
/// The store is replaced wholesale whenever new data arrives; there is no
/// incremental patching.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Arc<ContextRecord>>,
    index: HashMap<String, usize>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already-parsed records, dropping unusable ones
    pub fn from_records(records: impl IntoIterator<Item = ContextRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    /// Parse a JSON payload (flat or nested array)
    pub fn from_json_str(payload: &str) -> Result<(Self, IngestReport)> {
        let value: Value = serde_json::from_str(payload)?;
        Self::from_value(&value)
    }

    pub fn from_value(payload: &Value) -> Result<(Self, IngestReport)> {
        let (records, shape, parse_skipped) = parse_payload(payload)?;
        let parsed = records.len();
        let store = Self::from_records(records);

        let report = IngestReport {
            shape,
            accepted: store.len(),
            skipped: parse_skipped + (parsed - store.len()),
        };
        log::info!(
            "Loaded {} context records ({:?} payload, {} skipped)",
            report.accepted,
            report.shape,
            report.skipped
        );

        Ok((store, report))
    }

    /// Add a record; returns false when it was skipped
    pub fn insert(&mut self, record: ContextRecord) -> bool {
        if record.id.trim().is_empty() {
            log::warn!("Skipping record with empty id");
            return false;
        }
        if record.id == SYNTHETIC_ROOT_ID {
            log::warn!("Skipping record using reserved id {SYNTHETIC_ROOT_ID}");
            return false;
        }
        if self.index.contains_key(&record.id) {
            log::warn!("Skipping duplicate record id {}", record.id);
            return false;
        }

        self.index.insert(record.id.clone(), self.records.len());
        self.records.push(Arc::new(record));
        true
    }

    pub fn get(&self, id: &str) -> Option<&Arc<ContextRecord>> {
        self.index.get(id).map(|&pos| &self.records[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ContextRecord>> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
