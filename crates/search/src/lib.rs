//! # Context Search
//!
//! Text filter over a record store.
//!
//! Matching is a case-insensitive substring test against a record's name,
//! title, type tag and flattened content, after Unicode lowercasing of both
//! sides. Ancestors of every match are taken from the built forest, so a tree
//! view can force them open and keep the match reachable.
//!
//! ```rust
//! use context_graph::build_forest;
//! use context_records::{ContextRecord, RecordStore};
//! use context_search::RecordFilter;
//!
//! let store = RecordStore::from_records(vec![
//!     ContextRecord::new("1").name("Novel"),
//!     ContextRecord::new("2").parent("1").name("World Settings"),
//! ]);
//!
//! let forest = build_forest(&store);
//! let result = RecordFilter::new().filter(&store, &forest, "settings");
//! assert_eq!(result.matches(), ["2".to_string()]);
//! assert_eq!(result.force_expand(), ["1".to_string()]);
//! ```

mod filter;
mod result;

pub use filter::RecordFilter;
pub use result::FilterResult;
