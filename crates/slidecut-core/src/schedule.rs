//! Debounced, last-write-wins scheduling of recomposition.
//!
//! The scheduler holds no clock. Callers pass the current time in
//! milliseconds, so a browser host can drive it from `setTimeout` and tests
//! can step it deterministically.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Default quiescence before a scheduled recomposition runs.
pub const DEFAULT_DEBOUNCE_MS: f64 = 500.0;

/// Scheduler tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchedulerConfig {
    pub debounce_ms: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// A recomposition whose debounce window has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub element_id: String,
    /// Monotonic across the scheduler; used to reject stale results.
    pub stamp: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pending {
    due_at: f64,
    stamp: u64,
}

/// Per-element debounce timers plus the latest stamp issued for each element.
#[derive(Debug, Clone, Default)]
pub struct RegenerationScheduler {
    config: SchedulerConfig,
    next_stamp: u64,
    pending: HashMap<String, Pending>,
    latest: HashMap<String, u64>,
}

impl RegenerationScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Request a recomposition of `element_id`.
    ///
    /// A pending request for the same element is replaced and its timer
    /// restarts. Returns the stamp the eventual dispatch will carry.
    pub fn schedule(&mut self, element_id: &str, now_ms: f64) -> u64 {
        self.next_stamp += 1;
        let stamp = self.next_stamp;
        let due_at = now_ms + self.config.debounce_ms.max(0.0);

        self.pending
            .insert(element_id.to_string(), Pending { due_at, stamp });
        self.latest.insert(element_id.to_string(), stamp);
        stamp
    }

    /// Drop the pending request for `element_id` and invalidate any result
    /// already in flight for it.
    pub fn cancel(&mut self, element_id: &str) -> bool {
        self.latest.remove(element_id);
        self.pending.remove(element_id).is_some()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.latest.clear();
    }

    /// Remove and return every request whose window has elapsed, oldest first.
    pub fn take_due(&mut self, now_ms: f64) -> Vec<Dispatch> {
        let due: Vec<String> = self
            .pending
            .iter()
            .filter(|(_, p)| p.due_at <= now_ms)
            .map(|(id, _)| id.clone())
            .collect();

        let mut dispatches: Vec<Dispatch> = due
            .into_iter()
            .filter_map(|id| {
                self.pending.remove(&id).map(|p| Dispatch {
                    element_id: id,
                    stamp: p.stamp,
                })
            })
            .collect();
        dispatches.sort_by_key(|d| d.stamp);
        dispatches
    }

    /// Earliest time at which [`take_due`](Self::take_due) returns something.
    pub fn next_deadline(&self) -> Option<f64> {
        self.pending
            .values()
            .map(|p| p.due_at)
            .min_by(|a, b| a.total_cmp(b))
    }

    pub fn is_pending(&self, element_id: &str) -> bool {
        self.pending.contains_key(element_id)
    }

    /// Whether a result produced for `stamp` is still the newest for the element.
    pub fn is_current(&self, element_id: &str, stamp: u64) -> bool {
        self.latest.get(element_id) == Some(&stamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> RegenerationScheduler {
        RegenerationScheduler::new(SchedulerConfig::default())
    }

    #[test]
    fn test_default_debounce() {
        assert_eq!(SchedulerConfig::default().debounce_ms, 500.0);
    }

    #[test]
    fn test_not_due_before_window() {
        let mut s = scheduler();
        s.schedule("a", 0.0);
        assert!(s.take_due(499.0).is_empty());
        assert!(s.is_pending("a"));

        let due = s.take_due(500.0);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].element_id, "a");
        assert!(!s.is_pending("a"));
    }

    #[test]
    fn test_reschedule_resets_timer() {
        let mut s = scheduler();
        s.schedule("a", 0.0);
        let second = s.schedule("a", 400.0);

        assert!(s.take_due(600.0).is_empty(), "timer must restart, not stack");
        let due = s.take_due(900.0);
        assert_eq!(due, vec![Dispatch { element_id: "a".to_string(), stamp: second }]);
    }

    #[test]
    fn test_elements_are_independent() {
        let mut s = scheduler();
        s.schedule("a", 0.0);
        s.schedule("b", 100.0);

        assert_eq!(s.next_deadline(), Some(500.0));
        let due = s.take_due(550.0);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].element_id, "a");
        assert_eq!(s.next_deadline(), Some(600.0));
    }

    #[test]
    fn test_due_in_stamp_order() {
        let mut s = scheduler();
        s.schedule("b", 0.0);
        s.schedule("a", 0.0);
        s.schedule("c", 0.0);
        let ids: Vec<String> = s.take_due(1000.0).into_iter().map(|d| d.element_id).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_stale_result_rejected() {
        let mut s = scheduler();
        s.schedule("a", 0.0);
        let first = s.take_due(500.0).remove(0);

        // A newer request arrives while the first is still being composited
        let second = s.schedule("a", 510.0);

        assert!(!s.is_current("a", first.stamp));
        assert!(s.is_current("a", second));
    }

    #[test]
    fn test_cancel_invalidates_in_flight() {
        let mut s = scheduler();
        let stamp = s.schedule("a", 0.0);
        assert!(s.cancel("a"));
        assert!(!s.is_current("a", stamp));
        assert!(s.take_due(10_000.0).is_empty());
        assert!(!s.cancel("a"));
    }

    #[test]
    fn test_next_deadline_empty() {
        let mut s = scheduler();
        assert_eq!(s.next_deadline(), None);
        s.schedule("a", 0.0);
        s.clear();
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn test_zero_debounce_is_immediately_due() {
        let mut s = RegenerationScheduler::new(SchedulerConfig { debounce_ms: 0.0 });
        s.schedule("a", 42.0);
        assert_eq!(s.take_due(42.0).len(), 1);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: however many times an element is rescheduled, it
        /// dispatches once, with the last stamp issued.
        #[test]
        fn prop_last_write_wins(times in prop::collection::vec(0.0f64..10_000.0, 1..20)) {
            let mut s = RegenerationScheduler::new(SchedulerConfig::default());
            let mut sorted = times.clone();
            sorted.sort_by(|a, b| a.total_cmp(b));

            let mut last = 0;
            for t in &sorted {
                last = s.schedule("el", *t);
            }

            let due = s.take_due(f64::MAX);
            prop_assert_eq!(due.len(), 1);
            prop_assert_eq!(due[0].stamp, last);
            prop_assert!(s.is_current("el", last));
        }
    }
}
