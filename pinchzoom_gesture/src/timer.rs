// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot deadlines driven by host-supplied time.
//!
//! Nothing here sleeps or spawns. The host passes the current time into
//! [`OneShot::poll`] (typically from a frame callback or an event loop tick),
//! and the timer yields its payload exactly once when the deadline has passed.
//! A cancelled timer never fires.
//!
//! ```
//! use pinchzoom_gesture::timer::OneShot;
//!
//! let mut timer = OneShot::new();
//! timer.arm(1_000, 300, "tap");
//! assert_eq!(timer.poll(1_200), None);
//! assert_eq!(timer.poll(1_300), Some("tap"));
//! assert_eq!(timer.poll(2_000), None);
//! ```

/// A cancellable one-shot deadline carrying a payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OneShot<T> {
    armed: Option<(u64, T)>,
}

impl<T> Default for OneShot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OneShot<T> {
    /// Creates an idle timer.
    #[must_use]
    pub const fn new() -> Self {
        Self { armed: None }
    }

    /// Arms the timer to fire `delay` ms after `now`, replacing any pending deadline.
    pub fn arm(&mut self, now: u64, delay: u64, payload: T) {
        self.armed = Some((now.saturating_add(delay), payload));
    }

    /// Cancels the timer, returning the payload if one was pending.
    pub fn cancel(&mut self) -> Option<T> {
        self.armed.take().map(|(_, payload)| payload)
    }

    /// Returns the pending deadline, if armed.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.armed.as_ref().map(|(at, _)| *at)
    }

    /// Fires the timer if `now` has reached the deadline.
    pub fn poll(&mut self, now: u64) -> Option<T> {
        match self.armed {
            Some((at, _)) if now >= at => self.cancel(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::OneShot;

    #[test]
    fn fires_once_at_deadline() {
        let mut t = OneShot::new();
        t.arm(10, 5, 1_u8);
        assert_eq!(t.deadline(), Some(15));
        assert_eq!(t.poll(14), None);
        assert_eq!(t.poll(15), Some(1));
        assert_eq!(t.deadline(), None);
        assert_eq!(t.poll(100), None);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut t = OneShot::new();
        t.arm(0, 5, ());
        assert_eq!(t.cancel(), Some(()));
        assert_eq!(t.poll(1_000), None);
    }

    #[test]
    fn rearming_replaces_deadline() {
        let mut t = OneShot::new();
        t.arm(0, 5, 'a');
        t.arm(3, 5, 'b');
        assert_eq!(t.poll(6), None);
        assert_eq!(t.poll(8), Some('b'));
    }

    #[test]
    fn deadline_saturates() {
        let mut t = OneShot::new();
        t.arm(u64::MAX - 1, 10, ());
        assert_eq!(t.deadline(), Some(u64::MAX));
    }
}
