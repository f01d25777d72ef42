use crate::events::SelectionChange;
use context_graph::{Forest, TreeNode};
use indexmap::IndexSet;
use serde::Serialize;

/// Derived checkbox state of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriState {
    Unselected,
    Selected,
    PartiallySelected,
}

/// Owns the set of selected record ids
///
/// Ids are kept in insertion order, which is the order handed to the
/// generation request. Ids that vanish from the forest after a rebuild stay
/// in the set but are inert: they no longer match any row.
#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    selected: IndexSet<String>,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle `id`
    ///
    /// Deselecting removes only `id`; selecting adds `id` and every
    /// descendant. Unknown ids and the synthetic root are ignored.
    pub fn toggle(&mut self, forest: &Forest, id: &str) -> Vec<SelectionChange> {
        let Some(node) = selectable(forest, id) else {
            log::debug!("Ignoring toggle of unknown id {id}");
            return Vec::new();
        };

        if self.selected.shift_remove(id) {
            return vec![SelectionChange::Deselected(id.to_string())];
        }
        self.select_subtree(forest, node)
    }

    /// Select `id` and its whole subtree (no-op for unknown ids)
    pub fn select(&mut self, forest: &Forest, id: &str) -> Vec<SelectionChange> {
        match selectable(forest, id) {
            Some(node) => self.select_subtree(forest, node),
            None => Vec::new(),
        }
    }

    /// Select every id between `anchor` and `target` in `order`, inclusive
    ///
    /// Each id cascades like [`Self::select`]. When an endpoint is missing
    /// from `order`, only the endpoints present in the forest are selected.
    pub fn range_select(
        &mut self,
        forest: &Forest,
        order: &[String],
        anchor: &str,
        target: &str,
    ) -> Vec<SelectionChange> {
        let anchor_pos = order.iter().position(|id| id == anchor);
        let target_pos = order.iter().position(|id| id == target);

        let mut changes = Vec::new();
        match (anchor_pos, target_pos) {
            (Some(a), Some(b)) => {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                for id in &order[lo..=hi] {
                    changes.extend(self.select(forest, id));
                }
            }
            _ => {
                log::debug!("Range endpoint missing from traversal order ({anchor} → {target})");
                changes.extend(self.select(forest, anchor));
                if target != anchor {
                    changes.extend(self.select(forest, target));
                }
            }
        }
        changes
    }

    /// Empty the set, reporting each removed id in insertion order
    pub fn clear(&mut self) -> Vec<SelectionChange> {
        self.selected
            .drain(..)
            .map(SelectionChange::Deselected)
            .collect()
    }

    /// Derived indicator for `id`
    ///
    /// A node with descendants is never shown as fully selected: with no
    /// selected descendant it is unselected, otherwise partially selected,
    /// even when every descendant is on. Leaves reflect their own membership.
    pub fn tri_state(&self, forest: &Forest, id: &str) -> TriState {
        let Some(node) = forest.node(id) else {
            return TriState::Unselected;
        };

        if !node.has_children() {
            return if self.selected.contains(id) {
                TriState::Selected
            } else {
                TriState::Unselected
            };
        }

        let any_descendant = forest
            .descendants(id)
            .iter()
            .any(|descendant| self.selected.contains(descendant));
        if any_descendant {
            TriState::PartiallySelected
        } else {
            TriState::Unselected
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Selected ids in insertion order, inert ids included
    pub fn selected_ids(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    /// Selected ids that still exist in `forest`, in insertion order
    pub fn live_ids<'a>(&'a self, forest: &'a Forest) -> impl Iterator<Item = &'a str> + 'a {
        self.selected_ids().filter(move |id| forest.contains(id))
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    fn select_subtree(&mut self, forest: &Forest, node: &TreeNode) -> Vec<SelectionChange> {
        let mut changes = Vec::new();
        let selected = &mut self.selected;
        forest.walk_preorder(node, |n| {
            if !n.is_synthetic() && selected.insert(n.id.clone()) {
                changes.push(SelectionChange::Selected(n.id.clone()));
            }
        });
        changes
    }
}

fn selectable<'f>(forest: &'f Forest, id: &str) -> Option<&'f TreeNode> {
    forest.node(id).filter(|node| !node.is_synthetic())
}
