//! # Context Graph
//!
//! Turns a flat record collection into a consistent forest and answers
//! structural questions about it.
//!
//! ## Features
//!
//! - **Forest building** - single pass over the store plus a parent→children index
//! - **Cycle breaking** - malformed parent cycles become pseudo-roots, reported as diagnostics
//! - **Synthetic root** - one entry point when there are several real roots
//! - **View rooting** - re-root the display anywhere without touching selection state
//!
//! ## Architecture
//!
//! ```text
//! RecordStore
//!     │
//!     ├──> Forest Builder
//!     │      ├─ Index id → node (arena)
//!     │      ├─ Resolve parent links (dangling → root)
//!     │      ├─ Break parent cycles (tarjan_scc)
//!     │      └─ Assign depths from the roots
//!     │
//!     ├──> Forest
//!     │      ├─ Nodes: records shared by Arc
//!     │      └─ Entry: synthetic root or the single real root
//!     │
//!     └──> View Rooting
//!            ├─ display_root: any node of the whole forest
//!            ├─ find_root_id: top-level ancestor of a node
//!            └─ traversal_order: pre-order ids of the displayed subtree
//! ```

mod builder;
mod traverse;
mod types;
mod view;

pub use builder::{build_forest, ForestBuilder, DEFAULT_SYNTHETIC_ROOT_NAME};
pub use types::{Forest, ForestDiagnostic, NodeId, TreeNode};
pub use view::ViewRoot;

pub use context_records::SYNTHETIC_ROOT_ID;
