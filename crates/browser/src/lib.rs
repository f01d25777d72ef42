//! # Context Browser
//!
//! One owned object that holds everything a context picker needs: the
//! record store, the forest built from it, the current view root, the
//! selection set, expansion state and the active text filter.
//!
//! ## Architecture
//!
//! ```text
//! load_json / load_records
//!     │
//!     ├──> RecordStore ──> ForestBuilder ──> Forest
//!     │                                        │
//!     │    set_query ──> RecordFilter ─────────┤
//!     │                                        │
//!     │    activate ──> ActivationGate         │
//!     │                   └─> SelectionEngine ─┤──> observers
//!     │                                        │
//!     └──> visible_nodes / generation_request <┘
//! ```
//!
//! There is no global instance; hosts construct one per view.

mod browser;
mod config;
mod error;
mod expansion;
mod rows;

pub use browser::{ContextBrowser, Modifiers, EMPTY_DIGEST};
pub use config::{BrowserConfig, PreviewConfig};
pub use error::{BrowserError, Result};
pub use expansion::ExpansionState;
