use std::time::{Duration, Instant};

/// Debounces clicks by timestamp instead of sleeping in the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClickGate {
    last_click: Option<Instant>,
}

impl ClickGate {
    #[must_use]
    pub const fn new() -> Self {
        Self { last_click: None }
    }

    /// Accept a click at `now` unless one was accepted less than `min_interval` ago
    pub fn try_accept(&mut self, now: Instant, min_interval: Duration) -> bool {
        let ready = self
            .last_click
            .map_or(true, |last| now.saturating_duration_since(last) >= min_interval);
        if ready {
            self.last_click = Some(now);
        }
        ready
    }

    /// Time of the most recent accepted click
    #[must_use]
    pub const fn last_click(&self) -> Option<Instant> {
        self.last_click
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAP: Duration = Duration::from_millis(100);

    #[test]
    fn test_first_click_accepted() {
        let mut gate = ClickGate::new();
        assert!(gate.try_accept(Instant::now(), GAP));
    }

    #[test]
    fn test_suppresses_within_gap() {
        let mut gate = ClickGate::new();
        let t0 = Instant::now();
        assert!(gate.try_accept(t0, GAP));
        assert!(!gate.try_accept(t0 + Duration::from_millis(40), GAP));
        assert!(!gate.try_accept(t0 + Duration::from_millis(99), GAP));
        assert!(gate.try_accept(t0 + GAP, GAP));
        assert_eq!(gate.last_click(), Some(t0 + GAP));
    }

    #[test]
    fn test_rejected_click_does_not_extend_window() {
        let mut gate = ClickGate::new();
        let t0 = Instant::now();
        gate.try_accept(t0, GAP);
        gate.try_accept(t0 + Duration::from_millis(90), GAP);
        assert!(gate.try_accept(t0 + Duration::from_millis(110), GAP));
    }
}
