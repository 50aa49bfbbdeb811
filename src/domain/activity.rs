//! Activity timestamps and copy classification
//!
//! Clipboard APIs offer no way to tell a user-initiated copy from the
//! engine's own write-back. The heuristic here is the one the buffer relies
//! on: a clipboard change counts as a genuine user copy only when it lands
//! within a short window of the last detected real user input event. The
//! window is a tunable constant, not a guarantee.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Shared last-activity timestamps for classification and idle expiry.
///
/// Timestamps are stored as milliseconds since construction; zero means
/// "never observed". Safe to touch from any thread.
#[derive(Debug)]
pub struct ActivityTracker {
    epoch: Instant,
    last_user_event_ms: AtomicU64,
    last_change_ms: AtomicU64,
}

impl ActivityTracker {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            last_user_event_ms: AtomicU64::new(0),
            last_change_ms: AtomicU64::new(0),
        }
    }

    fn now_ms(&self) -> u64 {
        // +1 so a touch in the very first millisecond is distinguishable
        // from "never"
        self.epoch.elapsed().as_millis() as u64 + 1
    }

    /// Record a real user input event (hotkey press, command from the UI)
    pub fn touch_user_event(&self) {
        self.last_user_event_ms.store(self.now_ms(), Ordering::SeqCst);
    }

    /// Record an accepted clipboard change
    pub fn touch_change(&self) {
        self.last_change_ms.store(self.now_ms(), Ordering::SeqCst);
    }

    /// Classify the change that just landed: true when it arrived within
    /// `window` of the last real user input event. Changes with no prior
    /// user event on record are not attributable to the user and drop.
    pub fn is_user_originated(&self, window: Duration) -> bool {
        let last = self.last_user_event_ms.load(Ordering::SeqCst);
        if last == 0 {
            return false;
        }
        let elapsed = self.now_ms().saturating_sub(last);
        elapsed < window.as_millis() as u64
    }

    /// Idle-expiry predicate: true when a clipboard change has been seen
    /// and none has arrived for at least `timeout`.
    pub fn is_idle_for(&self, timeout: Duration) -> bool {
        let last = self.last_change_ms.load(Ordering::SeqCst);
        if last == 0 {
            return false;
        }
        let elapsed = self.now_ms().saturating_sub(last);
        elapsed >= timeout.as_millis() as u64
    }
}

impl Default for ActivityTracker {
    fn default() -> Self {
        Self::new()
    }
}
