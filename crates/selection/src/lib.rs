//! # Context Selection
//!
//! Cascading multi-selection over a context forest.
//!
//! Selecting a node selects its whole subtree; deselecting touches only the
//! node itself, so specific descendants can stay selected on their own.
//! Tri-state indicators are never stored: they are derived from the set and
//! the forest whenever a row is drawn.
//!
//! Every transition returns the list of [`SelectionChange`]s it caused so a
//! presentation layer can update rows incrementally.

mod activation;
mod engine;
mod events;

pub use activation::{ActivationGate, DEFAULT_ACTIVATION_WINDOW};
pub use engine::{SelectionEngine, TriState};
pub use events::{SelectionChange, SelectionObserver};
