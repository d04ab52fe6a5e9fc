// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Semantic gesture events and the handler trait they dispatch into.
//!
//! All points are surface-local (client position minus the surface origin).
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use pinchzoom_gesture::event::{GestureEvent, GestureHandler};
//!
//! #[derive(Default)]
//! struct TapCounter(u32);
//!
//! impl GestureHandler for TapCounter {
//!     fn tap(&mut self, _point: Point) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let mut counter = TapCounter::default();
//! GestureEvent::Tap { point: Point::new(4.0, 2.0) }.dispatch(&mut counter);
//! GestureEvent::Resize.dispatch(&mut counter);
//! assert_eq!(counter.0, 1);
//! ```

use kurbo::{Point, Vec2};

/// Directional gesture a recognizer can be locked into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// One contact dragging the content.
    Pan,
    /// Two contacts changing their distance.
    Pinch,
    /// One contact moving predominantly along x.
    HorizontalSwipe,
    /// One contact moving predominantly along y.
    VerticalSwipe,
}

impl GestureKind {
    /// Returns `true` for the two swipe kinds.
    #[must_use]
    pub fn is_swipe(self) -> bool {
        matches!(self, Self::HorizontalSwipe | Self::VerticalSwipe)
    }
}

/// Whether a continuous gesture event is the first of its gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// First event after classification; consumers take their baseline here.
    Begin,
    /// Subsequent event of an already classified gesture.
    Update,
}

/// Latched swipe direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    /// Movement mostly along x.
    Horizontal,
    /// Movement mostly along y.
    Vertical,
}

impl From<SwipeDirection> for GestureKind {
    fn from(value: SwipeDirection) -> Self {
        match value {
            SwipeDirection::Horizontal => Self::HorizontalSwipe,
            SwipeDirection::Vertical => Self::VerticalSwipe,
        }
    }
}

/// A classified gesture step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// First contact went down.
    Start {
        /// Contact position.
        point: Point,
    },
    /// Pan step.
    Pan {
        /// Begin or update.
        phase: Phase,
        /// Current contact position.
        point: Point,
        /// Position where the contact went down.
        start: Point,
    },
    /// Pinch step.
    Pinch {
        /// Begin or update.
        phase: Phase,
        /// Both contact positions.
        contacts: [Point; 2],
    },
    /// Latched swipe step.
    Swipe {
        /// Latched direction.
        direction: SwipeDirection,
        /// Current contact position.
        point: Point,
        /// Position where the contact went down.
        start: Point,
    },
    /// Short press with no movement gesture, confirmed once the double-tap window closed.
    Tap {
        /// Release position.
        point: Point,
    },
    /// Press held for at least the long-tap threshold.
    LongTap {
        /// Release position.
        point: Point,
    },
    /// Second short press inside the double-tap window.
    DoubleTap {
        /// Release position of the second press.
        point: Point,
    },
    /// Last contact lifted.
    Ended {
        /// Gesture that was active, if any.
        kind: Option<GestureKind>,
    },
    /// The platform cancelled the interaction.
    Cancelled {
        /// Gesture that was active, if any.
        kind: Option<GestureKind>,
    },
    /// Scroll wheel.
    Wheel {
        /// Scroll delta.
        delta: Vec2,
        /// Cursor position.
        cursor: Point,
    },
    /// Surface resized.
    Resize,
}

impl GestureEvent {
    /// Routes the event to the matching [`GestureHandler`] method.
    pub fn dispatch<H: GestureHandler + ?Sized>(&self, handler: &mut H) {
        match *self {
            Self::Start { point } => handler.start(point),
            Self::Pan {
                phase,
                point,
                start,
            } => handler.pan(phase, point, start),
            Self::Pinch { phase, contacts } => handler.pinch(phase, contacts),
            Self::Swipe {
                direction,
                point,
                start,
            } => handler.swipe(direction, point, start),
            Self::Tap { point } => handler.tap(point),
            Self::LongTap { point } => handler.long_tap(point),
            Self::DoubleTap { point } => handler.double_tap(point),
            Self::Ended { kind } => handler.ended(kind),
            Self::Cancelled { kind } => handler.cancelled(kind),
            Self::Wheel { delta, cursor } => handler.wheel(delta, cursor),
            Self::Resize => handler.resize(),
        }
    }
}

/// Receiver for classified gestures. Every method defaults to a no-op.
pub trait GestureHandler {
    /// First contact went down.
    fn start(&mut self, _point: Point) {}
    /// Pan step.
    fn pan(&mut self, _phase: Phase, _point: Point, _start: Point) {}
    /// Pinch step.
    fn pinch(&mut self, _phase: Phase, _contacts: [Point; 2]) {}
    /// Latched swipe step.
    fn swipe(&mut self, _direction: SwipeDirection, _point: Point, _start: Point) {}
    /// Confirmed single tap.
    fn tap(&mut self, _point: Point) {}
    /// Long tap.
    fn long_tap(&mut self, _point: Point) {}
    /// Double tap.
    fn double_tap(&mut self, _point: Point) {}
    /// Last contact lifted.
    fn ended(&mut self, _kind: Option<GestureKind>) {}
    /// Interaction cancelled.
    fn cancelled(&mut self, _kind: Option<GestureKind>) {}
    /// Scroll wheel.
    fn wheel(&mut self, _delta: Vec2, _cursor: Point) {}
    /// Surface resized.
    fn resize(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[derive(Default)]
    struct Log(Vec<&'static str>);

    impl GestureHandler for Log {
        fn pan(&mut self, _phase: Phase, _point: Point, _start: Point) {
            self.0.push("pan");
        }
        fn pinch(&mut self, _phase: Phase, _contacts: [Point; 2]) {
            self.0.push("pinch");
        }
        fn ended(&mut self, _kind: Option<GestureKind>) {
            self.0.push("ended");
        }
    }

    #[test]
    fn dispatch_reaches_matching_methods_only() {
        let mut log = Log::default();
        let events = [
            GestureEvent::Start { point: Point::ZERO },
            GestureEvent::Pan {
                phase: Phase::Begin,
                point: Point::ZERO,
                start: Point::ZERO,
            },
            GestureEvent::Pinch {
                phase: Phase::Update,
                contacts: [Point::ZERO, Point::new(1.0, 1.0)],
            },
            GestureEvent::Resize,
            GestureEvent::Ended { kind: None },
        ];
        for e in &events {
            e.dispatch(&mut log);
        }
        assert_eq!(log.0, ["pan", "pinch", "ended"]);
    }

    #[test]
    fn swipe_direction_maps_to_kind() {
        assert_eq!(
            GestureKind::from(SwipeDirection::Vertical),
            GestureKind::VerticalSwipe
        );
        assert!(GestureKind::HorizontalSwipe.is_swipe());
        assert!(!GestureKind::Pinch.is_swipe());
    }
}
