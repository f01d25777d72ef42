use crate::timestamp::Timestamp;
use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

const UNTITLED: &str = "Untitled";
const UNKNOWN_TYPE: &str = "Unknown type";
const ELLIPSIS: &str = "...";

/// One context record as supplied by the backend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextRecord {
    /// Unique record id
    pub id: String,

    /// Parent record id (`None` means root)
    pub parent_id: Option<String>,

    /// Display name
    pub name: Option<String>,

    /// Alternative display name used by older payloads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Category tag (e.g. "世界设定"), used for presentation lookup
    #[serde(rename = "type")]
    pub type_tag: Option<String>,

    /// Record body
    pub content: Content,

    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl ContextRecord {
    /// Create a record with only an id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            name: None,
            title: None,
            type_tag: None,
            content: Content::default(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Builder: set parent id
    #[must_use]
    pub fn parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Builder: set name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder: set category tag
    #[must_use]
    pub fn type_tag(mut self, type_tag: impl Into<String>) -> Self {
        self.type_tag = Some(type_tag.into());
        self
    }

    /// Builder: set content
    #[must_use]
    pub fn content(mut self, content: Content) -> Self {
        self.content = content;
        self
    }

    /// Builder: set both timestamps
    #[must_use]
    pub fn timestamps(mut self, created_at: Timestamp, updated_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self.updated_at = Some(updated_at);
        self
    }

    /// Name shown to the user: `name`, then `title`, then a placeholder
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.title.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or(UNTITLED)
    }

    /// Category tag shown to the user
    pub fn display_type(&self) -> &str {
        self.type_tag
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_TYPE)
    }

    /// Most recent known timestamp
    pub fn last_touched(&self) -> Option<&Timestamp> {
        self.updated_at.as_ref().or(self.created_at.as_ref())
    }
}

/// Record body: plain text or an ordered list of items
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Items(Vec<ContentItem>),
}

impl Default for Content {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl Content {
    /// Single searchable string; item texts are joined with a space
    pub fn flatten_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Items(items) => items
                .iter()
                .map(|item| item.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Full text with items on separate lines
    pub fn to_plain_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Items(items) => items
                .iter()
                .map(|item| item.text.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Short preview: each item cut to `item_chars`, plain text to `text_chars`
    pub fn preview(&self, item_chars: usize, text_chars: usize) -> String {
        match self {
            Self::Text(text) => truncate_graphemes(text, text_chars),
            Self::Items(items) => items
                .iter()
                .map(|item| truncate_graphemes(&item.text, item_chars))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Items(items) => items.is_empty(),
        }
    }

    pub fn item_count(&self) -> usize {
        match self {
            Self::Text(_) => 1,
            Self::Items(items) => items.len(),
        }
    }
}

/// One entry of an itemised record body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentItem {
    pub id: Option<String>,

    /// Item text (non-string payload values are stringified)
    #[serde(rename = "content")]
    pub text: String,

    pub created_at: Option<Timestamp>,
}

impl ContentItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            created_at: None,
        }
    }

    /// Builder: set item id
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

fn truncate_graphemes(text: &str, limit: usize) -> String {
    let mut graphemes = text.graphemes(true);
    let head: String = graphemes.by_ref().take(limit).collect();
    if graphemes.next().is_some() {
        format!("{head}{ELLIPSIS}")
    } else {
        head
    }
}
