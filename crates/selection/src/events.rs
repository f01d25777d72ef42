use serde::Serialize;

/// One id entering or leaving the selection set
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "change", content = "id", rename_all = "snake_case")]
pub enum SelectionChange {
    Selected(String),
    Deselected(String),
}

impl SelectionChange {
    pub fn id(&self) -> &str {
        match self {
            Self::Selected(id) | Self::Deselected(id) => id,
        }
    }

    pub const fn is_selected(&self) -> bool {
        matches!(self, Self::Selected(_))
    }
}

/// Consumer of selection changes (typically the presentation layer)
pub trait SelectionObserver {
    fn on_change(&mut self, change: &SelectionChange);
}

impl<F> SelectionObserver for F
where
    F: FnMut(&SelectionChange),
{
    fn on_change(&mut self, change: &SelectionChange) {
        self(change);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_observers() {
        let mut seen = Vec::new();
        {
            let mut observer = |change: &SelectionChange| seen.push(change.id().to_string());
            observer.on_change(&SelectionChange::Selected("1".to_string()));
            observer.on_change(&SelectionChange::Deselected("2".to_string()));
        }
        assert_eq!(seen, vec!["1", "2"]);
    }

    #[test]
    fn serializes_with_change_tag() {
        let json = serde_json::to_value(SelectionChange::Deselected("7".to_string())).unwrap();
        assert_eq!(json, serde_json::json!({"change": "deselected", "id": "7"}));
    }
}
