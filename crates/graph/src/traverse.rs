use crate::types::{Forest, NodeId, TreeNode};
use std::collections::HashSet;

impl Forest {
    /// Visit `start` and its subtree in pre-order
    ///
    /// Guarded by a visited set, so a malformed forest cannot loop forever.
    pub fn walk_preorder<'a>(&'a self, start: &'a TreeNode, mut visit: impl FnMut(&'a TreeNode)) {
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut stack = vec![start.handle];

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                log::warn!("Revisited node {} during traversal", self.nodes[current.0].id);
                continue;
            }
            let node = &self.nodes[current.0];
            visit(node);
            stack.extend(node.children.iter().rev().copied());
        }
    }

    /// All descendant ids of `id` in pre-order (excluding `id`)
    pub fn descendants(&self, id: &str) -> Vec<String> {
        let Some(start) = self.node(id) else {
            return Vec::new();
        };
        let mut ids = Vec::new();
        self.walk_preorder(start, |node| {
            if node.handle != start.handle {
                ids.push(node.id.clone());
            }
        });
        ids
    }

    /// Ancestor ids of `id`, nearest first
    pub fn ancestors(&self, id: &str) -> Vec<String> {
        self.ancestor_chain(id)
            .into_iter()
            .skip(1)
            .map(|node| node.id.clone())
            .collect()
    }

    /// Nodes from the real root down to `id`; empty when `id` is unknown
    pub fn path_to(&self, id: &str) -> Vec<&TreeNode> {
        let mut path = self.ancestor_chain(id);
        path.reverse();
        path
    }

    /// Pre-order ids of the subtree displayed under `view_root`
    ///
    /// The synthetic root is an entry point, not a row, so it never appears.
    pub fn traversal_order(&self, view_root: &TreeNode) -> Vec<String> {
        let mut order = Vec::new();
        self.walk_preorder(view_root, |node| {
            if !node.is_synthetic() {
                order.push(node.id.clone());
            }
        });
        order
    }

    /// `id` followed by its ancestors, stopping at a root or a revisit
    pub(crate) fn ancestor_chain(&self, id: &str) -> Vec<&TreeNode> {
        let mut chain = Vec::new();
        let Some(start) = self.node(id) else {
            return chain;
        };

        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut current = Some(start);
        while let Some(node) = current {
            if !visited.insert(node.handle) {
                log::warn!("Parent cycle reached at {} while walking up from {id}", node.id);
                break;
            }
            chain.push(node);
            current = self.parent(node);
        }
        chain
    }
}

#[cfg(test)]
mod tests {
    use crate::build_forest;
    use context_records::{ContextRecord, RecordStore};
    use pretty_assertions::assert_eq;

    fn sample() -> crate::Forest {
        build_forest(&RecordStore::from_records(vec![
            ContextRecord::new("1"),
            ContextRecord::new("2").parent("1"),
            ContextRecord::new("3").parent("1"),
            ContextRecord::new("4").parent("2"),
            ContextRecord::new("5"),
        ]))
    }

    #[test]
    fn descendants_are_pre_order() {
        let forest = sample();
        assert_eq!(forest.descendants("1"), vec!["2", "4", "3"]);
        assert!(forest.descendants("4").is_empty());
        assert!(forest.descendants("missing").is_empty());
    }

    #[test]
    fn ancestors_and_path() {
        let forest = sample();
        assert_eq!(forest.ancestors("4"), vec!["2", "1"]);
        let path: Vec<&str> = forest.path_to("4").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(path, vec!["1", "2", "4"]);
        assert!(forest.path_to("missing").is_empty());
    }

    #[test]
    fn traversal_order_skips_synthetic_root() {
        let forest = sample();
        let entry = forest.entry().unwrap();
        assert!(entry.is_synthetic());
        assert_eq!(forest.traversal_order(entry), vec!["1", "2", "4", "3", "5"]);

        let subtree = forest.node("2").unwrap();
        assert_eq!(forest.traversal_order(subtree), vec!["2", "4"]);
    }
}
