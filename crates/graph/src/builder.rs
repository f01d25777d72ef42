use crate::types::{Forest, ForestDiagnostic, NodeId, TreeNode};
use context_records::{RecordStore, SYNTHETIC_ROOT_ID};
use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use std::collections::HashMap;

/// Label of the synthetic root unless configured otherwise
pub const DEFAULT_SYNTHETIC_ROOT_NAME: &str = "All contexts";

/// Build a forest with default settings
pub fn build_forest(store: &RecordStore) -> Forest {
    ForestBuilder::new().build(store)
}

/// Build a context forest from a record store
#[derive(Debug, Clone)]
pub struct ForestBuilder {
    synthetic_root_name: String,
}

impl Default for ForestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ForestBuilder {
    pub fn new() -> Self {
        Self {
            synthetic_root_name: DEFAULT_SYNTHETIC_ROOT_NAME.to_string(),
        }
    }

    /// Builder: label shown for the synthetic root
    #[must_use]
    pub fn synthetic_root_name(mut self, name: impl Into<String>) -> Self {
        self.synthetic_root_name = name.into();
        self
    }

    /// Build forest from the store
    ///
    /// Never fails: dangling parents and parent cycles are recorded as
    /// diagnostics and resolved by promoting nodes to roots.
    pub fn build(&self, store: &RecordStore) -> Forest {
        let mut forest = Forest::new();

        // Phase 1: one node per record
        for record in store.iter() {
            let handle = NodeId(forest.nodes.len());
            forest.index.insert(record.id.clone(), handle);
            forest.nodes.push(TreeNode {
                id: record.id.clone(),
                record: Some(record.clone()),
                parent: None,
                children: Vec::new(),
                depth: 0,
                handle,
                label: None,
            });
        }

        // Phase 2: resolve parent links through the index
        let mut parent_of: Vec<Option<NodeId>> = vec![None; forest.nodes.len()];
        for (pos, record) in store.iter().enumerate() {
            let Some(parent_id) = record.parent_id.as_deref().filter(|p| !p.is_empty()) else {
                continue;
            };
            match forest.index.get(parent_id) {
                Some(&parent) if parent.0 == pos => {
                    log::warn!("Record {} is its own parent; treating it as a root", record.id);
                    forest.diagnostics.push(ForestDiagnostic::ParentCycle {
                        members: vec![record.id.clone()],
                        pseudo_root: record.id.clone(),
                    });
                }
                Some(&parent) => parent_of[pos] = Some(parent),
                None => {
                    log::debug!(
                        "Record {} references missing parent {}; treating it as a root",
                        record.id,
                        parent_id
                    );
                    forest.diagnostics.push(ForestDiagnostic::DanglingParent {
                        id: record.id.clone(),
                        parent_id: parent_id.to_string(),
                    });
                }
            }
        }

        // Phase 3: break cycles so every node hangs off exactly one root
        self.break_cycles(&mut forest, &mut parent_of);

        // Phase 4: children lists (record order) and roots
        for (pos, parent) in parent_of.iter().enumerate() {
            match parent {
                Some(parent) => {
                    forest.nodes[parent.0].children.push(NodeId(pos));
                    forest.nodes[pos].parent = Some(*parent);
                }
                None => forest.roots.push(NodeId(pos)),
            }
        }

        // Phase 5: depths from the roots
        assign_depths(&mut forest);

        if forest.roots.len() > 1 {
            let handle = NodeId(forest.nodes.len());
            forest.index.insert(SYNTHETIC_ROOT_ID.to_string(), handle);
            forest.nodes.push(TreeNode {
                id: SYNTHETIC_ROOT_ID.to_string(),
                record: None,
                parent: None,
                children: forest.roots.clone(),
                depth: 0,
                handle,
                label: Some(self.synthetic_root_name.clone()),
            });
            forest.synthetic_root = Some(handle);
        }

        log::info!(
            "Built context forest: {} nodes, {} roots, {} diagnostics",
            forest.len(),
            forest.roots.len(),
            forest.diagnostics.len()
        );

        forest
    }

    /// Drop one parent link per cycle: the earliest member in record order
    fn break_cycles(&self, forest: &mut Forest, parent_of: &mut [Option<NodeId>]) {
        let mut links: DiGraphMap<usize, ()> = DiGraphMap::new();
        for (pos, parent) in parent_of.iter().enumerate() {
            if let Some(parent) = parent {
                links.add_edge(pos, parent.0, ());
            }
        }

        // With at most one parent per node, every multi-node component is a simple loop.
        let mut cycles: Vec<Vec<usize>> = tarjan_scc(&links)
            .into_iter()
            .filter(|component| component.len() > 1)
            .collect();
        for cycle in &mut cycles {
            cycle.sort_unstable();
        }
        cycles.sort_unstable_by_key(|cycle| cycle[0]);

        for cycle in cycles {
            let pseudo_root = cycle[0];
            parent_of[pseudo_root] = None;

            let members: Vec<String> = cycle.iter().map(|&pos| forest.nodes[pos].id.clone()).collect();
            let pseudo_root = forest.nodes[pseudo_root].id.clone();
            log::warn!("Parent cycle among {members:?}; promoting {pseudo_root} to a root");
            forest
                .diagnostics
                .push(ForestDiagnostic::ParentCycle { members, pseudo_root });
        }
    }
}

fn assign_depths(forest: &mut Forest) {
    let mut depth_of: HashMap<NodeId, usize> = HashMap::with_capacity(forest.nodes.len());
    let mut stack: Vec<NodeId> = forest.roots.iter().rev().copied().collect();
    for root in &forest.roots {
        depth_of.insert(*root, 0);
    }

    while let Some(current) = stack.pop() {
        let depth = depth_of[&current];
        forest.nodes[current.0].depth = depth;
        for &child in forest.nodes[current.0].children.iter().rev() {
            if depth_of.insert(child, depth + 1).is_some() {
                log::warn!("Node {} reached twice while assigning depths", forest.nodes[child.0].id);
                continue;
            }
            stack.push(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use context_records::ContextRecord;
    use pretty_assertions::assert_eq;

    fn store(pairs: &[(&str, Option<&str>)]) -> RecordStore {
        RecordStore::from_records(pairs.iter().map(|(id, parent)| {
            let record = ContextRecord::new(*id);
            match parent {
                Some(parent) => record.parent(*parent),
                None => record,
            }
        }))
    }

    fn child_ids(forest: &Forest, id: &str) -> Vec<String> {
        let node = forest.node(id).unwrap();
        forest.children(node).map(|c| c.id.clone()).collect()
    }

    #[test]
    fn builds_single_tree_without_synthetic_root() {
        let forest = build_forest(&store(&[
            ("1", None),
            ("2", Some("1")),
            ("3", Some("1")),
            ("4", Some("2")),
        ]));

        assert_eq!(forest.len(), 4);
        assert!(forest.synthetic_root().is_none());
        assert_eq!(forest.entry().unwrap().id, "1");
        assert_eq!(child_ids(&forest, "1"), vec!["2", "3"]);
        assert_eq!(forest.node("4").unwrap().depth, 2);
        assert!(forest.diagnostics().is_empty());
    }

    #[test]
    fn children_declared_before_parent_still_attach() {
        let forest = build_forest(&store(&[("4", Some("2")), ("2", Some("1")), ("1", None)]));
        assert_eq!(forest.node("4").unwrap().depth, 2);
        assert_eq!(forest.roots().count(), 1);
    }

    #[test]
    fn multiple_roots_get_a_synthetic_root() {
        let forest = ForestBuilder::new()
            .synthetic_root_name("Everything")
            .build(&store(&[("a", None), ("b", None), ("c", Some("a"))]));

        let synthetic = forest.synthetic_root().unwrap();
        assert_eq!(synthetic.id, SYNTHETIC_ROOT_ID);
        assert_eq!(synthetic.name(), "Everything");
        assert_eq!(child_ids(&forest, SYNTHETIC_ROOT_ID), vec!["a", "b"]);
        assert_eq!(forest.entry().unwrap().id, SYNTHETIC_ROOT_ID);
        assert_eq!(forest.len(), 3);
        assert!(!forest.contains(SYNTHETIC_ROOT_ID));
        // Real roots keep depth 0 and no record parent.
        assert_eq!(forest.node("b").unwrap().depth, 0);
        assert!(forest.node("b").unwrap().parent.is_none());
    }

    #[test]
    fn dangling_parent_becomes_root() {
        let forest = build_forest(&store(&[("1", None), ("2", Some("ghost"))]));
        assert_eq!(forest.roots().count(), 2);
        assert_eq!(
            forest.diagnostics(),
            &[ForestDiagnostic::DanglingParent {
                id: "2".to_string(),
                parent_id: "ghost".to_string()
            }]
        );
    }

    #[test]
    fn two_node_cycle_is_broken_at_first_member() {
        let forest = build_forest(&store(&[("1", Some("2")), ("2", Some("1")), ("3", Some("2"))]));

        assert_eq!(forest.len(), 3);
        assert_eq!(forest.entry().unwrap().id, "1");
        assert_eq!(child_ids(&forest, "1"), vec!["2"]);
        assert_eq!(child_ids(&forest, "2"), vec!["3"]);
        assert_eq!(forest.node("3").unwrap().depth, 2);
        assert_eq!(
            forest.diagnostics(),
            &[ForestDiagnostic::ParentCycle {
                members: vec!["1".to_string(), "2".to_string()],
                pseudo_root: "1".to_string()
            }]
        );
    }

    #[test]
    fn self_parent_is_a_root() {
        let forest = build_forest(&store(&[("1", Some("1"))]));
        assert_eq!(forest.roots().count(), 1);
        assert_eq!(forest.diagnostics().len(), 1);
    }

    #[test]
    fn empty_store_builds_empty_forest() {
        let forest = build_forest(&RecordStore::new());
        assert!(forest.is_empty());
        assert!(forest.entry().is_none());
    }
}
