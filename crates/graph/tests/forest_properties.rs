use context_graph::{build_forest, Forest};
use context_records::{ContextRecord, RecordStore};
use proptest::prelude::*;
use std::collections::HashSet;

/// Arbitrary parent assignments over ids "0".."n", including dangling
/// parents, self-parents and cycles.
fn records_strategy() -> impl Strategy<Value = Vec<ContextRecord>> {
    (1usize..40).prop_flat_map(|n| {
        prop::collection::vec(prop::option::of(0usize..(n + 5)), n).prop_map(|parents| {
            parents
                .into_iter()
                .enumerate()
                .map(|(i, parent)| {
                    let record = ContextRecord::new(i.to_string());
                    match parent {
                        Some(p) => record.parent(p.to_string()),
                        None => record,
                    }
                })
                .collect()
        })
    })
}

fn reachable_ids(forest: &Forest) -> Vec<String> {
    let mut ids = Vec::new();
    if let Some(entry) = forest.entry() {
        forest.walk_preorder(entry, |node| {
            if !node.is_synthetic() {
                ids.push(node.id.clone());
            }
        });
    }
    ids
}

proptest! {
    #[test]
    fn depth_is_parent_depth_plus_one(records in records_strategy()) {
        let forest = build_forest(&RecordStore::from_records(records));
        for node in forest.nodes().filter(|n| !n.is_synthetic()) {
            match forest.parent(node) {
                Some(parent) => prop_assert_eq!(node.depth, parent.depth + 1),
                None => prop_assert_eq!(node.depth, 0),
            }
        }
    }

    #[test]
    fn every_record_reachable_exactly_once(records in records_strategy()) {
        let count = records.len();
        let forest = build_forest(&RecordStore::from_records(records));
        let ids = reachable_ids(&forest);
        let unique: HashSet<&String> = ids.iter().collect();

        prop_assert_eq!(ids.len(), count);
        prop_assert_eq!(unique.len(), count);
    }

    #[test]
    fn find_root_id_returns_a_root(records in records_strategy()) {
        let forest = build_forest(&RecordStore::from_records(records));
        let roots: HashSet<String> = forest.roots().map(|r| r.id.clone()).collect();
        for node in forest.nodes().filter(|n| !n.is_synthetic()) {
            prop_assert!(roots.contains(&forest.find_root_id(&node.id)));
        }
    }
}

#[test]
fn parent_cycle_terminates() {
    let store = RecordStore::from_records(vec![
        ContextRecord::new("1").parent("2"),
        ContextRecord::new("2").parent("1"),
    ]);
    let forest = build_forest(&store);

    assert_eq!(forest.len(), 2);
    assert_eq!(forest.find_root_id("2"), "1");
    assert_eq!(reachable_ids(&forest), vec!["1", "2"]);
}
