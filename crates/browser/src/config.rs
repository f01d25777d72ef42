use crate::error::{BrowserError, Result};
use context_graph::DEFAULT_SYNTHETIC_ROOT_NAME;
use context_protocol::GenerationParams;
use context_selection::DEFAULT_ACTIVATION_WINDOW;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a [`crate::ContextBrowser`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BrowserConfig {
    /// Repeated activations of one id inside this window are coalesced
    pub activation_window_ms: u64,

    /// Label of the entry node shown above several real roots
    pub synthetic_root_name: String,

    /// Content preview limits
    pub preview: PreviewConfig,

    /// Whether nodes start expanded before the user touches them
    pub expand_by_default: bool,

    /// Parameters attached to every generation request
    pub generation: GenerationParams,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            activation_window_ms: DEFAULT_ACTIVATION_WINDOW.as_millis() as u64,
            synthetic_root_name: DEFAULT_SYNTHETIC_ROOT_NAME.to_string(),
            preview: PreviewConfig::default(),
            expand_by_default: true,
            generation: GenerationParams::default(),
        }
    }
}

impl BrowserConfig {
    /// Collapsed tree with a shorter coalescing window
    pub fn compact() -> Self {
        Self {
            activation_window_ms: 500,
            expand_by_default: false,
            preview: PreviewConfig {
                item_chars: 60,
                text_chars: 120,
            },
            ..Default::default()
        }
    }

    /// Parse from TOML; missing keys take their defaults
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate().map_err(BrowserError::InvalidConfig)?;
        Ok(config)
    }

    pub fn activation_window(&self) -> Duration {
        Duration::from_millis(self.activation_window_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.activation_window_ms == 0 {
            return Err("activation_window_ms must be > 0".to_string());
        }

        if self.activation_window_ms > 5_000 {
            return Err(format!(
                "activation_window_ms ({}) cannot exceed 5000",
                self.activation_window_ms
            ));
        }

        if self.synthetic_root_name.trim().is_empty() {
            return Err("synthetic_root_name must not be empty".to_string());
        }

        if self.preview.item_chars == 0 || self.preview.text_chars == 0 {
            return Err("preview limits must be > 0".to_string());
        }

        self.generation.validate()
    }
}

/// Grapheme limits for content previews
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PreviewConfig {
    /// Per item of an item list
    pub item_chars: usize,

    /// For plain text content
    pub text_chars: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            item_chars: 100,
            text_chars: 200,
        }
    }
}
