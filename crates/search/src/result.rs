use std::collections::HashSet;

/// Outcome of one filter pass
///
/// An inactive result hides nothing. An active one shows matches and the
/// ancestors forced open for them; everything else is hidden from view but
/// stays in the model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterResult {
    active: bool,
    matches: Vec<String>,
    force_expand: Vec<String>,
    visible: HashSet<String>,
}

impl FilterResult {
    /// No filter applied
    pub fn inactive() -> Self {
        Self::default()
    }

    pub(crate) fn active() -> Self {
        Self {
            active: true,
            ..Self::default()
        }
    }

    pub(crate) fn push_match(&mut self, id: &str) {
        self.matches.push(id.to_string());
        self.visible.insert(id.to_string());
    }

    pub(crate) fn push_force_expand(&mut self, id: String) {
        if self.force_expand.contains(&id) {
            return;
        }
        self.visible.insert(id.clone());
        self.force_expand.push(id);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Matching ids in record order
    pub fn matches(&self) -> &[String] {
        &self.matches
    }

    /// Ancestors of matches, deduplicated in discovery order
    pub fn force_expand(&self) -> &[String] {
        &self.force_expand
    }

    pub fn is_match(&self, id: &str) -> bool {
        self.active && self.matches.iter().any(|m| m == id)
    }

    pub fn is_forced_open(&self, id: &str) -> bool {
        self.force_expand.iter().any(|f| f == id)
    }

    /// Whether `id` is shown under this filter
    pub fn is_visible(&self, id: &str) -> bool {
        !self.active || self.visible.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_result_hides_unlisted_ids() {
        let mut result = FilterResult::active();
        result.push_match("4");
        result.push_force_expand("2".to_string());
        result.push_force_expand("2".to_string());

        assert_eq!(result.force_expand(), ["2".to_string()]);
        assert!(result.is_match("4"));
        assert!(!result.is_match("2"));
        assert!(result.is_forced_open("2"));
        assert!(result.is_visible("2"));
        assert!(!result.is_visible("9"));
    }

    #[test]
    fn empty_active_result_hides_everything() {
        let result = FilterResult::active();
        assert!(!result.is_visible("1"));
        assert!(FilterResult::inactive().is_visible("1"));
    }
}
