use context_protocol::{CheckState, RecordDetails, VisibleNode};

/// Indented text rendering of visible rows
pub fn tree(rows: &[VisibleNode]) -> String {
    let base = rows.iter().map(|row| row.depth).min().unwrap_or(0);
    let mut out = String::new();

    for row in rows {
        let indent = "  ".repeat(row.depth - base);
        let marker = match (row.has_children, row.expanded) {
            (true, true) => 'v',
            (true, false) => '>',
            (false, _) => ' ',
        };
        let check = match row.tri_state {
            CheckState::Selected => "[x]",
            CheckState::PartiallySelected => "[-]",
            CheckState::Unselected => "[ ]",
        };
        let hit = if row.matched { " *" } else { "" };
        out.push_str(&format!(
            "{indent}{marker} {check} {} ({}){hit}\n",
            row.name, row.type_tag
        ));
    }
    out
}

/// Header lines followed by the content preview
pub fn details(details: &RecordDetails) -> String {
    let mut out = format!("{} ({})\n", details.name, details.type_tag);
    out.push_str(&format!("Path: {}\n", details.path.join(" / ")));
    out.push_str(&format!(
        "Items: {}  Children: {}\n",
        details.item_count, details.child_count
    ));
    if let Some(created) = &details.created_at {
        out.push_str(&format!("Created: {created}\n"));
    }
    if let Some(updated) = &details.updated_at {
        match &details.updated {
            Some(relative) if relative != updated => {
                out.push_str(&format!("Updated: {updated} ({relative})\n"));
            }
            _ => out.push_str(&format!("Updated: {updated}\n")),
        }
    }
    if !details.preview.is_empty() {
        out.push('\n');
        out.push_str(&details.preview);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, depth: usize, has_children: bool, tri_state: CheckState) -> VisibleNode {
        VisibleNode {
            id: id.to_string(),
            name: format!("Node {id}"),
            type_tag: "Unknown type".to_string(),
            icon: "file".to_string(),
            color: "#9E9E9E".to_string(),
            depth,
            has_children,
            expanded: has_children,
            selected: tri_state == CheckState::Selected,
            tri_state,
            matched: id == "4",
            updated: None,
        }
    }

    #[test]
    fn indents_relative_to_shallowest_row() {
        let rows = vec![
            row("2", 1, true, CheckState::PartiallySelected),
            row("4", 2, false, CheckState::Selected),
        ];
        assert_eq!(
            tree(&rows),
            "v [-] Node 2 (Unknown type)\n    [x] Node 4 (Unknown type) *\n"
        );
    }

    #[test]
    fn details_lists_header_then_preview() {
        let details = RecordDetails {
            id: "4".to_string(),
            name: "Magic".to_string(),
            type_tag: "世界设定".to_string(),
            icon: "globe".to_string(),
            color: "#FF9800".to_string(),
            path: vec!["Novel".to_string(), "Magic".to_string()],
            preview: "Runes".to_string(),
            item_count: 1,
            child_count: 0,
            created_at: Some("2024-03-01 08:15".to_string()),
            updated_at: None,
            updated: Some("2024-03-01".to_string()),
        };
        assert_eq!(
            super::details(&details),
            "Magic (世界设定)\nPath: Novel / Magic\nItems: 1  Children: 0\nCreated: 2024-03-01 08:15\n\nRunes\n"
        );
    }
}
