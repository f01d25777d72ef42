use std::collections::HashMap;

/// Per-id expand/collapse state, kept across forest rebuilds
#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    expanded_by_default: bool,
    overrides: HashMap<String, bool>,
}

impl ExpansionState {
    pub fn new(expanded_by_default: bool) -> Self {
        Self {
            expanded_by_default,
            overrides: HashMap::new(),
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.overrides
            .get(id)
            .copied()
            .unwrap_or(self.expanded_by_default)
    }

    /// Flip `id`, returning its new state
    pub fn toggle(&mut self, id: &str) -> bool {
        let next = !self.is_expanded(id);
        self.set(id, next);
        next
    }

    pub fn set(&mut self, id: &str, expanded: bool) {
        if expanded == self.expanded_by_default {
            self.overrides.remove(id);
        } else {
            self.overrides.insert(id.to_string(), expanded);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_against_default() {
        let mut state = ExpansionState::new(true);
        assert!(state.is_expanded("1"));
        assert!(!state.toggle("1"));
        assert!(!state.is_expanded("1"));
        assert!(state.toggle("1"));
        assert!(state.overrides.is_empty());

        let mut collapsed = ExpansionState::new(false);
        assert!(collapsed.toggle("1"));
        assert!(!collapsed.is_expanded("2"));
    }
}
