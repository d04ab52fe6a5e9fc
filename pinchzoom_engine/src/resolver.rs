// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polling task resolving the natural-size zoom limit.
//!
//! The image may not be measurable when the engine attaches, so the limit is
//! resolved by querying the [`GeometryProvider`] at a fixed interval until it
//! reports both a natural and a rendered width. The host drives the task by
//! passing the current time into [`MaxScaleTask::poll`]; nothing here sleeps.
//!
//! ```
//! use kurbo::{Rect, Size};
//! use pinchzoom_engine::{FixedGeometry, ImageMetrics, MaxScaleTask, ResolveStatus};
//!
//! let rect = Rect::new(0.0, 0.0, 400.0, 300.0);
//! let mut geometry = FixedGeometry::new(rect);
//! let mut task = MaxScaleTask::new(10, 1_000);
//!
//! task.start(0);
//! assert_eq!(task.poll(0, &geometry), None);
//!
//! geometry.image = Some(ImageMetrics::new(Size::new(800.0, 600.0), rect.size()));
//! assert_eq!(task.poll(5, &geometry), None); // before the next poll slot
//! assert_eq!(task.poll(10, &geometry), Some(2.0));
//! assert_eq!(task.status(), ResolveStatus::Resolved(2.0));
//! ```

use pinchzoom_gesture::timer::OneShot;

use crate::geometry::GeometryProvider;

/// Observable state of a [`MaxScaleTask`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResolveStatus {
    /// Never started.
    Idle,
    /// Waiting for the image to become measurable.
    Polling,
    /// Finished with this maximum scale.
    Resolved(f64),
    /// Gave up; the fallback limit stays in effect.
    TimedOut,
    /// Stopped by [`MaxScaleTask::cancel`].
    Cancelled,
}

#[derive(Clone, Copy, Debug)]
enum TaskState {
    Idle,
    Polling { started: u64, next: OneShot<()> },
    Resolved(f64),
    TimedOut,
    Cancelled,
}

/// A cancellable polling task with a timeout.
#[derive(Clone, Copy, Debug)]
pub struct MaxScaleTask {
    interval: u64,
    timeout: u64,
    state: TaskState,
}

impl MaxScaleTask {
    /// Creates an idle task polling every `interval` ms and giving up after `timeout` ms.
    #[must_use]
    pub fn new(interval: u64, timeout: u64) -> Self {
        Self {
            interval: interval.max(1),
            timeout,
            state: TaskState::Idle,
        }
    }

    /// (Re)starts polling. The first poll is due immediately.
    pub fn start(&mut self, now: u64) {
        let mut next = OneShot::new();
        next.arm(now, 0, ());
        self.state = TaskState::Polling { started: now, next };
    }

    /// Stops a running task. Finished tasks keep their outcome.
    pub fn cancel(&mut self) {
        if matches!(self.state, TaskState::Polling { .. }) {
            self.state = TaskState::Cancelled;
        }
    }

    /// Current state.
    #[must_use]
    pub fn status(&self) -> ResolveStatus {
        match self.state {
            TaskState::Idle => ResolveStatus::Idle,
            TaskState::Polling { .. } => ResolveStatus::Polling,
            TaskState::Resolved(scale) => ResolveStatus::Resolved(scale),
            TaskState::TimedOut => ResolveStatus::TimedOut,
            TaskState::Cancelled => ResolveStatus::Cancelled,
        }
    }

    /// Time of the next due poll, while polling.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        match &self.state {
            TaskState::Polling { next, .. } => next.deadline(),
            _ => None,
        }
    }

    /// Runs a poll if one is due, returning the resolved maximum scale once.
    pub fn poll(&mut self, now: u64, geometry: &(impl GeometryProvider + ?Sized)) -> Option<f64> {
        let TaskState::Polling { started, next } = &mut self.state else {
            return None;
        };
        next.poll(now)?;
        if let Some(scale) = geometry.image().and_then(|image| image.natural_scale()) {
            log::debug!("natural-size zoom limit resolved to {scale}");
            self.state = TaskState::Resolved(scale);
            return Some(scale);
        }
        if now.saturating_sub(*started) >= self.timeout {
            log::warn!(
                "image size unavailable after {} ms; keeping the fallback zoom limit",
                self.timeout
            );
            self.state = TaskState::TimedOut;
            return None;
        }
        next.arm(now, self.interval, ());
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{FixedGeometry, ImageMetrics};
    use kurbo::{Rect, Size};

    fn surface() -> FixedGeometry {
        FixedGeometry::new(Rect::new(0.0, 0.0, 400.0, 300.0))
    }

    #[test]
    fn resolves_immediately_when_measurable() {
        let geometry = FixedGeometry::filled(Rect::new(0.0, 0.0, 400.0, 300.0), Size::new(1_200.0, 900.0));
        let mut task = MaxScaleTask::new(10, 100);
        task.start(0);
        assert_eq!(task.poll(0, &geometry), Some(3.0));
        assert_eq!(task.poll(50, &geometry), None);
        assert_eq!(task.next_deadline(), None);
    }

    #[test]
    fn times_out_without_image() {
        let geometry = surface();
        let mut task = MaxScaleTask::new(10, 100);
        task.start(0);
        let mut now = 0;
        while task.status() == ResolveStatus::Polling {
            assert_eq!(task.poll(now, &geometry), None);
            now += 10;
            assert!(now <= 200, "task never timed out");
        }
        assert_eq!(task.status(), ResolveStatus::TimedOut);
    }

    #[test]
    fn cancelled_task_never_resolves() {
        let mut geometry = surface();
        let mut task = MaxScaleTask::new(10, 100);
        task.start(0);
        assert_eq!(task.poll(0, &geometry), None);
        task.cancel();
        geometry.image = Some(ImageMetrics::new(Size::new(800.0, 600.0), Size::new(400.0, 300.0)));
        assert_eq!(task.poll(20, &geometry), None);
        assert_eq!(task.status(), ResolveStatus::Cancelled);
    }

    #[test]
    fn zero_rendered_width_keeps_polling() {
        let mut geometry = surface();
        geometry.image = Some(ImageMetrics::new(Size::new(800.0, 600.0), Size::ZERO));
        let mut task = MaxScaleTask::new(10, 100);
        task.start(0);
        assert_eq!(task.poll(0, &geometry), None);
        assert_eq!(task.next_deadline(), Some(10));
    }
}
