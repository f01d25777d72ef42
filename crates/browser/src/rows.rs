use crate::expansion::ExpansionState;
use chrono::{DateTime, Utc};
use context_graph::{Forest, TreeNode};
use context_protocol::{CheckState, VisibleNode};
use context_records::Category;
use context_search::FilterResult;
use context_selection::{SelectionEngine, TriState};
use std::collections::HashSet;

pub(crate) struct RowContext<'a> {
    pub forest: &'a Forest,
    pub selection: &'a SelectionEngine,
    pub expansion: &'a ExpansionState,
    pub filter: &'a FilterResult,
    pub now: DateTime<Utc>,
}

/// Flatten the displayed subtree under `root` into rows
///
/// A synthetic root contributes only its children. Collapsed nodes hide
/// their subtree unless the filter forced them open; nodes the filter hides
/// take their whole subtree with them.
pub(crate) fn collect(ctx: RowContext<'_>, root: &TreeNode) -> Vec<VisibleNode> {
    let mut rows = Vec::new();
    let mut visited = HashSet::new();
    let mut stack: Vec<&TreeNode> = if root.is_synthetic() {
        ctx.forest.children(root).collect()
    } else {
        vec![root]
    };
    stack.reverse();

    while let Some(node) = stack.pop() {
        if !visited.insert(node.handle()) || !ctx.filter.is_visible(&node.id) {
            continue;
        }

        let expanded = ctx.expansion.is_expanded(&node.id);
        let open = expanded || ctx.filter.is_forced_open(&node.id);
        rows.push(row(&ctx, node, open));

        if open {
            let mut children: Vec<&TreeNode> = ctx.forest.children(node).collect();
            children.reverse();
            stack.extend(children);
        }
    }
    rows
}

fn row(ctx: &RowContext<'_>, node: &TreeNode, expanded: bool) -> VisibleNode {
    let category = Category::from_type_tag(node.type_tag());
    let record = node.record.as_deref();

    VisibleNode {
        id: node.id.clone(),
        name: node.name().to_string(),
        type_tag: record.map_or("", |r| r.display_type()).to_string(),
        icon: category.icon().to_string(),
        color: category.color().to_string(),
        depth: node.depth,
        has_children: node.has_children(),
        expanded: expanded && node.has_children(),
        selected: ctx.selection.is_selected(&node.id),
        tri_state: check_state(ctx.selection.tri_state(ctx.forest, &node.id)),
        matched: ctx.filter.is_match(&node.id),
        updated: record
            .and_then(|r| r.last_touched())
            .map(|ts| ts.relative(ctx.now)),
    }
}

fn check_state(state: TriState) -> CheckState {
    match state {
        TriState::Unselected => CheckState::Unselected,
        TriState::Selected => CheckState::Selected,
        TriState::PartiallySelected => CheckState::PartiallySelected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use context_graph::build_forest;
    use context_records::{ContextRecord, RecordStore, Timestamp};
    use context_search::RecordFilter;
    use pretty_assertions::assert_eq;

    fn store() -> RecordStore {
        RecordStore::from_records(vec![
            ContextRecord::new("1").name("Outline").type_tag("作品大纲"),
            ContextRecord::new("2").parent("1").name("Act one"),
            ContextRecord::new("3").parent("2").name("Storm").timestamps(
                Timestamp::parse("2024-03-01T10:00:00Z"),
                Timestamp::parse("2024-03-01T11:30:00Z"),
            ),
            ContextRecord::new("4").name("Loose"),
        ])
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn collapsed_nodes_hide_their_subtree() {
        let store = store();
        let forest = build_forest(&store);
        let selection = SelectionEngine::new();
        let mut expansion = ExpansionState::new(true);
        expansion.toggle("2");
        let filter = FilterResult::inactive();

        let ctx = RowContext {
            forest: &forest,
            selection: &selection,
            expansion: &expansion,
            filter: &filter,
            now: now(),
        };
        let rows = collect(ctx, forest.entry().unwrap());

        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "4"]);
        assert!(!rows[1].expanded);
        assert!(rows[1].has_children);
        assert_eq!(rows[0].icon, "list-alt");
        assert_eq!(rows[0].color, "#9C27B0");
        assert_eq!(rows[2].type_tag, "Unknown type");
    }

    #[test]
    fn filter_forces_collapsed_ancestors_open() {
        let store = store();
        let forest = build_forest(&store);
        let selection = SelectionEngine::new();
        let expansion = ExpansionState::new(false);
        let filter = RecordFilter::new().filter(&store, &forest, "storm");

        let ctx = RowContext {
            forest: &forest,
            selection: &selection,
            expansion: &expansion,
            filter: &filter,
            now: now(),
        };
        let rows = collect(ctx, forest.entry().unwrap());

        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert!(rows[2].matched);
        assert!(!rows[0].matched);
        assert_eq!(rows[2].updated.as_deref(), Some("30 minutes ago"));
        assert_eq!(rows[2].depth, 2);
    }

    #[test]
    fn rows_carry_selection_state() {
        let store = store();
        let forest = build_forest(&store);
        let mut selection = SelectionEngine::new();
        selection.toggle(&forest, "2");
        let expansion = ExpansionState::new(true);
        let filter = FilterResult::inactive();

        let ctx = RowContext {
            forest: &forest,
            selection: &selection,
            expansion: &expansion,
            filter: &filter,
            now: now(),
        };
        let rows = collect(ctx, forest.node("1").unwrap());

        let states: Vec<(&str, bool, CheckState)> = rows
            .iter()
            .map(|r| (r.id.as_str(), r.selected, r.tri_state))
            .collect();
        assert_eq!(
            states,
            vec![
                ("1", false, CheckState::PartiallySelected),
                ("2", true, CheckState::PartiallySelected),
                ("3", true, CheckState::Selected),
            ]
        );
    }
}
