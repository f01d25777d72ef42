//! # Context Records
//!
//! The flat collection of context records a user browses and picks from.
//!
//! ## Philosophy
//!
//! The store is tolerant of whatever the backend hands it:
//! - Records without a usable `id` are skipped, never fatal
//! - Flat (`parent_id`) and nested (`children`) payloads are both accepted
//! - Timestamps that fail to parse are kept verbatim
//! - Records are shared as `Arc`s so every consumer sees the same data
//!
//! ## Architecture
//!
//! ```text
//! JSON payload
//!     │
//!     ├──> Shape detection (first element has `children`?)
//!     │      ├─ flat   → one record per element
//!     │      └─ nested → pre-order flatten, parent taken from the container
//!     │
//!     ├──> Per-record parsing (lenient)
//!     │      ├─ id / parent_id normalisation
//!     │      ├─ content: text or ordered items
//!     │      └─ timestamps: parsed or raw passthrough
//!     │
//!     └──> RecordStore (ingest order + id index)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use context_records::RecordStore;
//!
//! let payload = r#"[
//!     {"id": "1", "name": "World Settings", "type": "世界设定", "content": "..."},
//!     {"id": "2", "parent_id": "1", "name": "Magic System", "content": []}
//! ]"#;
//!
//! let (store, report) = RecordStore::from_json_str(payload).unwrap();
//! assert_eq!(store.len(), 2);
//! assert_eq!(report.skipped, 0);
//! ```

mod category;
mod error;
mod ingest;
mod store;
mod timestamp;
mod types;

pub use category::Category;
pub use error::{RecordError, Result};
pub use ingest::{IngestReport, PayloadShape, SYNTHETIC_ROOT_ID};
pub use store::RecordStore;
pub use timestamp::Timestamp;
pub use types::{Content, ContentItem, ContextRecord};
