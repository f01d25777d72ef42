use std::time::{Duration, Instant};

/// Repeated activations of the same id within this window are dropped
pub const DEFAULT_ACTIVATION_WINDOW: Duration = Duration::from_millis(1000);

/// Debounce for row activations
///
/// Input layers may report one click as several events. Only the first
/// activation of an id inside the window is admitted; a suppressed duplicate
/// does not extend the window.
#[derive(Debug, Clone)]
pub struct ActivationGate {
    window: Duration,
    last: Option<(String, Instant)>,
}

impl Default for ActivationGate {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVATION_WINDOW)
    }
}

impl ActivationGate {
    pub const fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Whether an activation of `id` at `now` should be processed
    pub fn admit(&mut self, id: &str, now: Instant) -> bool {
        if let Some((last_id, at)) = &self.last {
            if last_id == id && now.saturating_duration_since(*at) < self.window {
                log::debug!("Suppressed duplicate activation of {id}");
                return false;
            }
        }
        self.last = Some((id.to_string(), now));
        true
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_inside_window_is_dropped() {
        let mut gate = ActivationGate::default();
        let t0 = Instant::now();

        assert!(gate.admit("1", t0));
        assert!(!gate.admit("1", t0 + Duration::from_millis(300)));
        assert!(!gate.admit("1", t0 + Duration::from_millis(999)));
        assert!(gate.admit("1", t0 + Duration::from_millis(1000)));
    }

    #[test]
    fn different_ids_pass_through() {
        let mut gate = ActivationGate::default();
        let t0 = Instant::now();

        assert!(gate.admit("1", t0));
        assert!(gate.admit("2", t0 + Duration::from_millis(10)));
        assert!(gate.admit("1", t0 + Duration::from_millis(20)));
    }

    #[test]
    fn reset_forgets_last_activation() {
        let mut gate = ActivationGate::new(Duration::from_secs(60));
        let t0 = Instant::now();

        assert!(gate.admit("1", t0));
        gate.reset();
        assert!(gate.admit("1", t0));
        assert_eq!(gate.window(), Duration::from_secs(60));
    }
}
