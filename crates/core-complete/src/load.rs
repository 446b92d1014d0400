//! In-flight project load deduplication.

use std::collections::HashSet;
use tracing::debug;

/// Keys whose asynchronous load has been requested.
///
/// A key is marked once, before its load starts, and stays marked: repeated
/// keystrokes on an unknown project never launch a second request. The marks
/// are dropped wholesale by [`LoadTracker::reset`] when the catalog is replaced,
/// or one at a time by [`LoadTracker::release`] when the host reports a failure.
#[derive(Debug, Default, Clone)]
pub struct LoadTracker {
    in_flight: HashSet<String>,
}

impl LoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` in flight. Returns true if the caller should start the load
    /// (the key was not already marked).
    pub fn request(&mut self, key: &str) -> bool {
        if self.in_flight.contains(key) {
            debug!(target: "complete.load", key, "load_deduplicated");
            return false;
        }
        self.in_flight.insert(key.to_owned());
        debug!(target: "complete.load", key, in_flight = self.in_flight.len(), "load_requested");
        true
    }

    /// Forget one key so a later resolution may request it again.
    pub fn release(&mut self, key: &str) -> bool {
        let removed = self.in_flight.remove(key);
        if removed {
            debug!(target: "complete.load", key, "load_released");
        }
        removed
    }

    /// Forget every key.
    pub fn reset(&mut self) {
        if !self.in_flight.is_empty() {
            debug!(target: "complete.load", cleared = self.in_flight.len(), "tracker_reset");
        }
        self.in_flight.clear();
    }

    pub fn len(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_empty(&self) -> bool {
        self.in_flight.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_request_is_deduplicated() {
        let mut t = LoadTracker::new();
        assert!(t.request("p"));
        assert!(!t.request("p"));
        assert!(t.request("q"));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn reset_and_release_allow_retry() {
        let mut t = LoadTracker::new();
        t.request("p");
        t.request("q");
        assert!(t.release("p"));
        assert!(!t.release("p"));
        assert!(t.request("p"));
        t.reset();
        assert!(t.is_empty());
        assert!(t.request("q"));
    }
}
