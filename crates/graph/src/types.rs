use context_records::ContextRecord;
use std::collections::HashMap;
use std::sync::Arc;

/// Arena handle of a node inside one [`Forest`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Node in the context forest
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Record id (the reserved id for the synthetic root)
    pub id: String,

    /// Shared record; `None` only for the synthetic root
    pub record: Option<Arc<ContextRecord>>,

    /// Record parent; real roots have none, even under the synthetic root
    pub parent: Option<NodeId>,

    /// Children in record order
    pub children: Vec<NodeId>,

    /// Distance from the real root (roots are 0)
    pub depth: usize,

    pub(crate) handle: NodeId,
    pub(crate) label: Option<String>,
}

impl TreeNode {
    pub const fn handle(&self) -> NodeId {
        self.handle
    }

    pub fn is_synthetic(&self) -> bool {
        self.record.is_none()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn name(&self) -> &str {
        match (&self.record, &self.label) {
            (Some(record), _) => record.display_name(),
            (None, Some(label)) => label,
            (None, None) => "",
        }
    }

    pub fn type_tag(&self) -> Option<&str> {
        self.record.as_ref().and_then(|r| r.type_tag.as_deref())
    }
}

/// Problems found in the input while building a forest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForestDiagnostic {
    /// `parent_id` names a record that does not exist; the node became a root
    DanglingParent { id: String, parent_id: String },

    /// Parent links formed a loop; `pseudo_root` had its parent link dropped
    ParentCycle {
        members: Vec<String>,
        pseudo_root: String,
    },
}

/// Forest of context records
///
/// Owns its nodes exclusively; records are shared with the store.
#[derive(Debug, Clone, Default)]
pub struct Forest {
    pub(crate) nodes: Vec<TreeNode>,
    pub(crate) index: HashMap<String, NodeId>,
    pub(crate) roots: Vec<NodeId>,
    pub(crate) synthetic_root: Option<NodeId>,
    pub(crate) diagnostics: Vec<ForestDiagnostic>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find node by record id (the synthetic root is found by its reserved id)
    pub fn node(&self, id: &str) -> Option<&TreeNode> {
        self.index.get(id).map(|&handle| &self.nodes[handle.0])
    }

    /// Get node by handle
    pub fn get(&self, handle: NodeId) -> Option<&TreeNode> {
        self.nodes.get(handle.0)
    }

    /// Whether `id` is a real (selectable) record node
    pub fn contains(&self, id: &str) -> bool {
        self.node(id).is_some_and(|node| !node.is_synthetic())
    }

    /// Real roots in record order
    pub fn roots(&self) -> impl Iterator<Item = &TreeNode> {
        self.roots.iter().map(move |&handle| &self.nodes[handle.0])
    }

    pub fn synthetic_root(&self) -> Option<&TreeNode> {
        self.synthetic_root.map(|handle| &self.nodes[handle.0])
    }

    /// Single entry point: the synthetic root, or the only real root
    pub fn entry(&self) -> Option<&TreeNode> {
        self.synthetic_root().or_else(|| self.roots().next())
    }

    pub fn children<'a>(&'a self, node: &'a TreeNode) -> impl Iterator<Item = &'a TreeNode> + 'a {
        node.children.iter().map(move |&handle| &self.nodes[handle.0])
    }

    pub fn parent(&self, node: &TreeNode) -> Option<&TreeNode> {
        node.parent.map(|handle| &self.nodes[handle.0])
    }

    /// All nodes in record order, synthetic root last
    pub fn nodes(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.iter()
    }

    /// Number of real record nodes
    pub fn len(&self) -> usize {
        self.nodes.len() - usize::from(self.synthetic_root.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn diagnostics(&self) -> &[ForestDiagnostic] {
        &self.diagnostics
    }
}
