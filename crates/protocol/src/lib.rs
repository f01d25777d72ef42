//! Wire types shared with the rendering and generation collaborators.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Checkbox state of a rendered row
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CheckState {
    Unselected,
    Selected,
    PartiallySelected,
}

/// One row of the visible tree, in display order
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct VisibleNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    pub icon: String,
    pub color: String,
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
    /// Own membership in the selection set
    pub selected: bool,
    pub tri_state: CheckState,
    /// Direct hit of the active filter (not just a forced-open ancestor)
    pub matched: bool,
    /// Relative time of the last update, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

/// Detail view of a single record
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct RecordDetails {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    pub icon: String,
    pub color: String,
    /// Display names from the top-level ancestor down to the record
    pub path: Vec<String>,
    /// Content cut to the configured preview limits
    pub preview: String,
    pub item_count: usize,
    pub child_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Relative time of the last update, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

/// Sampling knobs forwarded to the generation backend
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(default)]
pub struct GenerationParams {
    /// 0-100
    pub creativity: u8,
    /// Target length in characters
    pub length: u32,
    /// 0-100
    pub style: u8,
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            creativity: 70,
            length: 500,
            style: 80,
            temperature: 0.8,
        }
    }
}

impl GenerationParams {
    /// Set creativity and derive temperature from it (0.5 at 0, 1.0 at 100)
    pub fn with_creativity(mut self, creativity: u8) -> Self {
        self.creativity = creativity.min(100);
        self.temperature = 0.5 + f32::from(self.creativity) / 100.0 * 0.5;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.creativity > 100 {
            return Err(format!("creativity must be 0-100, got {}", self.creativity));
        }
        if self.style > 100 {
            return Err(format!("style must be 0-100, got {}", self.style));
        }
        if self.length == 0 {
            return Err("length must be > 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!("temperature must be 0.0-2.0, got {}", self.temperature));
        }
        Ok(())
    }
}

/// Payload for the downstream generation collaborator
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Selected record ids in selection order
    pub context_ids: Vec<String>,
    #[serde(default)]
    pub params: GenerationParams,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, context_ids: Vec<String>) -> Self {
        Self {
            prompt: prompt.into(),
            context_ids,
            params: GenerationParams::default(),
        }
    }

    pub fn params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }
}

/// JSON schema of [`GenerationRequest`]
pub fn generation_request_schema() -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(schemars::schema_for!(GenerationRequest))
}

/// JSON schema of [`VisibleNode`]
pub fn visible_node_schema() -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(schemars::schema_for!(VisibleNode))
}

/// JSON schema of [`RecordDetails`]
pub fn record_details_schema() -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(schemars::schema_for!(RecordDetails))
}
