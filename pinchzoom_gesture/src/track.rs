// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contact tracking: where the current touch started and how far it has moved.
//!
//! ## Usage
//!
//! 1) Call [`ContactTrack::start`] with the surface-local position and time of the first contact.
//! 2) On each move, call [`ContactTrack::update`] to record the latest position.
//! 3) Read [`ContactTrack::start_pos`] and [`ContactTrack::last_pos`] to classify the motion.
//! 4) Call [`ContactTrack::end`] when the last contact lifts.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use pinchzoom_gesture::track::ContactTrack;
//!
//! let mut track = ContactTrack::default();
//! track.start(Point::new(10.0, 20.0), 1_000);
//! assert_eq!(track.update(Point::new(40.0, 25.0)), Some(Vec2::new(30.0, 5.0)));
//! assert_eq!(track.last_pos(), Some(Point::new(40.0, 25.0)));
//! assert_eq!(track.elapsed(1_150), Some(150));
//! ```

use kurbo::{Point, Vec2};

/// Start and latest position of the primary contact.
#[derive(Debug, Clone, Default, Copy, PartialEq)]
pub struct ContactTrack {
    start_pos: Option<Point>,
    last_pos: Option<Point>,
    start_time: u64,
}

impl ContactTrack {
    /// Starts tracking from `pos` at `time`.
    pub fn start(&mut self, pos: Point, time: u64) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.start_time = time;
    }

    /// Records a new position, returning the movement since the previous one.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        let last = self.last_pos?;
        self.start_pos?;
        self.last_pos = Some(pos);
        Some(pos - last)
    }

    /// Where tracking started.
    #[must_use]
    pub fn start_pos(&self) -> Option<Point> {
        self.start_pos
    }

    /// Latest recorded position.
    #[must_use]
    pub fn last_pos(&self) -> Option<Point> {
        self.last_pos
    }

    /// Time at which tracking started.
    #[must_use]
    pub fn start_time(&self) -> Option<u64> {
        self.start_pos.map(|_| self.start_time)
    }

    /// Milliseconds between the start and `now`.
    #[must_use]
    pub fn elapsed(&self, now: u64) -> Option<u64> {
        self.start_pos?;
        Some(now.saturating_sub(self.start_time))
    }

    /// Stops tracking.
    pub fn end(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
    }

    /// Returns `true` while a contact is tracked.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.start_pos.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_track_is_idle() {
        let track = ContactTrack::default();
        assert!(!track.is_tracking());
        assert_eq!(track.start_pos(), None);
        assert_eq!(track.elapsed(50), None);
    }

    #[test]
    fn update_without_start_is_ignored() {
        let mut track = ContactTrack::default();
        assert_eq!(track.update(Point::new(1.0, 1.0)), None);
        assert_eq!(track.last_pos(), None);
    }

    #[test]
    fn update_returns_incremental_deltas() {
        let mut track = ContactTrack::default();
        track.start(Point::ZERO, 0);
        assert_eq!(track.update(Point::new(5.0, 3.0)), Some(Vec2::new(5.0, 3.0)));
        assert_eq!(track.update(Point::new(8.0, 7.0)), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(track.start_pos(), Some(Point::ZERO));
    }

    #[test]
    fn elapsed_saturates_on_clock_skew() {
        let mut track = ContactTrack::default();
        track.start(Point::ZERO, 500);
        assert_eq!(track.elapsed(400), Some(0));
    }

    #[test]
    fn end_resets() {
        let mut track = ContactTrack::default();
        track.start(Point::new(1.0, 2.0), 0);
        track.end();
        assert!(!track.is_tracking());
        assert_eq!(track.last_pos(), None);
    }
}
