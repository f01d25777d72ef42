use crate::types::{Forest, TreeNode};

impl Forest {
    /// Node to display as the top of the view
    ///
    /// Searches the whole forest, not just the current view, and falls back
    /// to the entry node when `id` is unknown.
    pub fn display_root(&self, id: &str) -> Option<&TreeNode> {
        match self.node(id) {
            Some(node) => Some(node),
            None => {
                log::debug!("Display root {id} not found; falling back to the entry node");
                self.entry()
            }
        }
    }

    /// Id of the top-level ancestor of `id` (the id itself when unknown)
    pub fn find_root_id(&self, id: &str) -> String {
        self.ancestor_chain(id)
            .last()
            .map_or_else(|| id.to_string(), |root| root.id.clone())
    }
}

/// Remembered display root that survives forest rebuilds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewRoot {
    requested: Option<String>,
}

impl ViewRoot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: impl Into<String>) {
        self.requested = Some(id.into());
    }

    /// Show the whole forest again
    pub fn reset(&mut self) {
        self.requested = None;
    }

    pub fn requested(&self) -> Option<&str> {
        self.requested.as_deref()
    }

    /// Resolve against a (possibly rebuilt) forest
    pub fn resolve<'f>(&self, forest: &'f Forest) -> Option<&'f TreeNode> {
        match &self.requested {
            Some(id) => forest.display_root(id),
            None => forest.entry(),
        }
    }
}
