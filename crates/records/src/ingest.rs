use crate::error::{RecordError, Result};
use crate::timestamp::Timestamp;
use crate::types::{Content, ContentItem, ContextRecord};
use serde_json::{Map, Value};

/// Reserved id of the synthetic forest root; never accepted from a payload
pub const SYNTHETIC_ROOT_ID: &str = "__synthetic_root__";

const CHILDREN_KEY: &str = "children";

/// Layout of an incoming payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadShape {
    /// One element per record, hierarchy via `parent_id`
    #[default]
    Flat,
    /// Records carry their children inline under `children`
    Nested,
}

/// Summary of one ingest pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub shape: PayloadShape,
    pub accepted: usize,
    pub skipped: usize,
}

/// Shape is decided by the first element alone
pub(crate) fn detect_shape(items: &[Value]) -> PayloadShape {
    match items.first() {
        Some(Value::Object(obj)) if obj.contains_key(CHILDREN_KEY) => PayloadShape::Nested,
        _ => PayloadShape::Flat,
    }
}

/// Parse a payload into records, counting elements that had to be dropped
pub(crate) fn parse_payload(payload: &Value) -> Result<(Vec<ContextRecord>, PayloadShape, usize)> {
    let items = match payload {
        Value::Array(items) => items,
        other => return Err(RecordError::not_an_array(json_kind(other))),
    };

    let shape = detect_shape(items);
    let mut records = Vec::with_capacity(items.len());
    let mut skipped = 0usize;

    match shape {
        PayloadShape::Flat => {
            for (position, item) in items.iter().enumerate() {
                match parse_record(item, None) {
                    Some(record) => records.push(record),
                    None => {
                        skipped += 1;
                        log::warn!("Skipping record #{position}: missing or invalid id");
                    }
                }
            }
        }
        PayloadShape::Nested => {
            // Pre-order walk; children are pushed in reverse to keep sibling order.
            let mut stack: Vec<(&Value, Option<String>)> =
                items.iter().rev().map(|item| (item, None)).collect();

            while let Some((item, container)) = stack.pop() {
                let record = parse_record(item, container.as_deref());
                let next_container = match &record {
                    Some(record) => Some(record.id.clone()),
                    None => {
                        skipped += 1;
                        log::warn!("Skipping nested record under {container:?}: missing or invalid id");
                        container.clone()
                    }
                };
                if let Some(record) = record {
                    records.push(record);
                }

                if let Some(Value::Array(children)) = item.get(CHILDREN_KEY) {
                    for child in children.iter().rev() {
                        stack.push((child, next_container.clone()));
                    }
                }
            }
        }
    }

    Ok((records, shape, skipped))
}

/// Parse one record; `container` overrides `parent_id` for nested payloads
fn parse_record(value: &Value, container: Option<&str>) -> Option<ContextRecord> {
    let obj = value.as_object()?;
    let id = obj.get("id").and_then(id_string)?;

    let declared_parent = obj.get("parent_id").and_then(id_string);
    let parent_id = match container {
        Some(container) => {
            if declared_parent.as_deref().is_some_and(|p| p != container) {
                log::debug!(
                    "Record {id} declares parent {declared_parent:?} but is nested under {container}"
                );
            }
            Some(container.to_string())
        }
        None => declared_parent,
    };
    let parent_id = parent_id.filter(|p| !is_blank_reference(p) && *p != id);

    Some(ContextRecord {
        parent_id,
        name: obj.get("name").and_then(scalar_string),
        title: obj.get("title").and_then(scalar_string),
        type_tag: obj.get("type").and_then(scalar_string),
        content: parse_content(obj.get("content")),
        created_at: obj.get("created_at").and_then(parse_timestamp),
        updated_at: obj.get("updated_at").and_then(parse_timestamp),
        id,
    })
}

fn parse_content(value: Option<&Value>) -> Content {
    match value {
        None | Some(Value::Null) => Content::default(),
        Some(Value::String(text)) => Content::Text(text.clone()),
        Some(Value::Array(items)) => Content::Items(items.iter().map(parse_content_item).collect()),
        Some(other) => Content::Text(other.to_string()),
    }
}

fn parse_content_item(value: &Value) -> ContentItem {
    match value {
        Value::Object(obj) => parse_content_object(obj),
        Value::String(text) => ContentItem::new(text.clone()),
        other => ContentItem::new(other.to_string()),
    }
}

fn parse_content_object(obj: &Map<String, Value>) -> ContentItem {
    let text = match obj.get("content") {
        Some(Value::String(text)) => text.clone(),
        None | Some(Value::Null) => String::new(),
        Some(other) => other.to_string(),
    };
    ContentItem {
        id: obj.get("id").and_then(id_string),
        text,
        created_at: obj.get("created_at").and_then(parse_timestamp),
    }
}

fn parse_timestamp(value: &Value) -> Option<Timestamp> {
    match value {
        Value::String(raw) if !raw.is_empty() => Some(Timestamp::parse(raw)),
        Value::Number(n) => Some(Timestamp::Raw(n.to_string())),
        _ => None,
    }
}

/// Ids may arrive as strings or numbers; anything else is unusable
fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn is_blank_reference(parent: &str) -> bool {
    matches!(parent, "" | "null" | "undefined")
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
