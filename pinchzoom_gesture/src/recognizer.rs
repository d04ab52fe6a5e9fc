// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gesture recognizer state machine.
//!
//! ## States
//!
//! The recognizer is either idle (no directional gesture) or locked into one
//! [`GestureKind`]. Classification is driven by the number of active contacts
//! and by elapsed time:
//!
//! - One contact moving while idle becomes a pan when panning is accepted
//!   (see [`GestureRecognizer::set_pan_enabled`]); otherwise it is counted
//!   towards a swipe, which latches once more than
//!   [`RecognizerConfig::swipe_latch_samples`] moves were seen.
//! - Two contacts moving while idle become a pinch.
//! - Lifting the last contact runs tap classification (only when idle), emits
//!   [`GestureEvent::Ended`] and resets to idle.
//! - Cancel resets to idle without touching tap timing.
//!
//! Mouse input takes the same path with a single contact; movement only counts
//! while the button is held.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use pinchzoom_gesture::{
//!     GestureEvent, GestureRecognizer, Listeners, PointerInput, PointerPhase, RecognizerConfig,
//! };
//!
//! let mut rec = GestureRecognizer::new(RecognizerConfig::default(), Listeners::all());
//! let origin = Point::new(100.0, 100.0);
//!
//! rec.handle(&PointerInput::mouse(PointerPhase::Down, Point::new(110.0, 110.0), 0).into(), origin);
//! let events = rec.handle(
//!     &PointerInput::mouse(PointerPhase::Move, Point::new(130.0, 110.0), 16).into(),
//!     origin,
//! );
//! assert!(matches!(events[0], GestureEvent::Pan { .. }));
//! ```

use kurbo::Point;
use smallvec::SmallVec;

use crate::event::{GestureEvent, GestureKind, Phase, SwipeDirection};
use crate::input::{InputEvent, PointerInput, PointerPhase, PointerSource};
use crate::listeners::{ListenerMode, Listeners, TouchProbe};
use crate::timer::OneShot;
use crate::track::ContactTrack;

/// Events produced by a single call into the recognizer.
pub type GestureEvents = SmallVec<[GestureEvent; 4]>;

/// Timing and threshold knobs for classification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecognizerConfig {
    /// Presses held at least this long (ms) are long taps.
    pub long_tap_ms: u64,
    /// Maximum interval (ms) between two releases forming a double tap.
    pub double_tap_ms: u64,
    /// A swipe latches once more than this many qualifying moves were seen.
    pub swipe_latch_samples: u32,
    /// A swipe is vertical when `|dy| * swipe_axis_ratio > |dx|`.
    pub swipe_axis_ratio: f64,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            long_tap_ms: 200,
            double_tap_ms: 300,
            swipe_latch_samples: 3,
            swipe_axis_ratio: 3.0,
        }
    }
}

/// Recognizer-owned classification state. Read-only outside the recognizer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureState {
    current: Option<GestureKind>,
    track: ContactTrack,
    last_tap_time: Option<u64>,
    swipe_samples: u32,
    mouse_down: bool,
}

impl GestureState {
    /// Gesture the recognizer is locked into, or `None` while idle.
    #[must_use]
    pub fn current(&self) -> Option<GestureKind> {
        self.current
    }

    /// Surface-local position of the first contact of the current touch.
    #[must_use]
    pub fn start_point(&self) -> Option<Point> {
        self.track.start_pos()
    }

    /// Time the first contact of the current touch went down.
    #[must_use]
    pub fn touch_start_time(&self) -> Option<u64> {
        self.track.start_time()
    }

    /// Release time of the last tap still eligible to pair into a double tap.
    #[must_use]
    pub fn last_tap_time(&self) -> Option<u64> {
        self.last_tap_time
    }

    /// Qualifying one-contact moves counted towards a swipe.
    #[must_use]
    pub fn swipe_samples(&self) -> u32 {
        self.swipe_samples
    }

    /// Whether the mouse button is held.
    #[must_use]
    pub fn is_mouse_down(&self) -> bool {
        self.mouse_down
    }

    fn reset(&mut self) {
        self.current = None;
        self.track.end();
        self.swipe_samples = 0;
    }
}

/// Classifies raw pointer, wheel and resize input into [`GestureEvent`]s.
#[derive(Clone, Debug)]
pub struct GestureRecognizer {
    config: RecognizerConfig,
    listeners: Listeners,
    state: GestureState,
    pan_enabled: bool,
    pending_tap: OneShot<Point>,
}

impl GestureRecognizer {
    /// Creates a recognizer attached to `listeners`.
    #[must_use]
    pub fn new(config: RecognizerConfig, listeners: Listeners) -> Self {
        Self {
            config,
            listeners,
            state: GestureState::default(),
            pan_enabled: true,
            pending_tap: OneShot::new(),
        }
    }

    /// Creates a recognizer whose listeners are picked by probing the device.
    #[must_use]
    pub fn with_probe(
        config: RecognizerConfig,
        mode: ListenerMode,
        probe: &impl TouchProbe,
        wheel: bool,
    ) -> Self {
        Self::new(config, Listeners::resolve(mode, probe, wheel))
    }

    /// Attached listener families.
    #[must_use]
    pub fn listeners(&self) -> Listeners {
        self.listeners
    }

    /// Returns `true` until [`GestureRecognizer::detach`] is called.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Current classification state.
    #[must_use]
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Classification thresholds.
    #[must_use]
    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    /// Controls whether one-contact movement may start a pan.
    ///
    /// While disabled, one-contact movement is considered for swipes instead.
    /// A pan already in progress is not interrupted.
    pub fn set_pan_enabled(&mut self, enabled: bool) {
        self.pan_enabled = enabled;
    }

    /// Whether one-contact movement may start a pan.
    #[must_use]
    pub fn pan_enabled(&self) -> bool {
        self.pan_enabled
    }

    /// Deadline of the pending single tap, if one is waiting for the double-tap window.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending_tap.deadline()
    }

    /// Removes all listeners and cancels the pending tap. Later calls produce nothing.
    pub fn detach(&mut self) {
        self.listeners = Listeners::empty();
        self.pending_tap.cancel();
        self.state = GestureState::default();
    }

    /// Classifies one raw event.
    ///
    /// `origin` is the surface's top-left corner in client coordinates.
    pub fn handle(&mut self, event: &InputEvent, origin: Point) -> GestureEvents {
        let mut out = GestureEvents::new();
        if !self.listeners.accepts(event) {
            return out;
        }
        self.expire_tap(event.time(), &mut out);
        match event {
            InputEvent::Pointer(p) => match p.phase {
                PointerPhase::Down => self.on_down(p, origin, &mut out),
                PointerPhase::Move => self.on_move(p, origin, &mut out),
                PointerPhase::Up => self.on_up(p, origin, &mut out),
                PointerPhase::Cancel => self.on_cancel(p, &mut out),
            },
            InputEvent::Wheel(w) => out.push(GestureEvent::Wheel {
                delta: w.delta,
                cursor: to_local(w.cursor, origin),
            }),
            InputEvent::Resize { .. } => out.push(GestureEvent::Resize),
        }
        out
    }

    /// Advances timers to `now`, emitting a confirmed [`GestureEvent::Tap`] when
    /// the double-tap window of a pending tap has closed.
    pub fn tick(&mut self, now: u64) -> GestureEvents {
        let mut out = GestureEvents::new();
        if self.is_attached() {
            self.expire_tap(now, &mut out);
        }
        out
    }

    fn expire_tap(&mut self, now: u64, out: &mut GestureEvents) {
        if let Some(point) = self.pending_tap.poll(now) {
            out.push(GestureEvent::Tap { point });
        }
    }

    fn on_down(&mut self, p: &PointerInput, origin: Point, out: &mut GestureEvents) {
        if p.source == PointerSource::Mouse {
            self.state.mouse_down = true;
        }
        if self.state.track.is_tracking() {
            return;
        }
        let Some(pos) = p.contacts.first().map(|c| c.position).or_else(|| p.primary_position())
        else {
            return;
        };
        let point = to_local(pos, origin);
        self.state.track.start(point, p.time);
        self.state.swipe_samples = 0;
        out.push(GestureEvent::Start { point });
    }

    fn on_move(&mut self, p: &PointerInput, origin: Point, out: &mut GestureEvents) {
        if p.source == PointerSource::Mouse && !self.state.mouse_down {
            return;
        }
        match p.contacts.as_slice() {
            [only] => {
                let point = to_local(only.position, origin);
                if self.state.track.update(point).is_none() {
                    return;
                }
                let Some(start) = self.state.track.start_pos() else {
                    return;
                };
                let current = self.state.current;
                if current == Some(GestureKind::Pan) || (current.is_none() && self.pan_enabled) {
                    let phase = self.enter(GestureKind::Pan);
                    out.push(GestureEvent::Pan {
                        phase,
                        point,
                        start,
                    });
                } else if current.is_none_or(GestureKind::is_swipe) {
                    self.swipe(point, start, out);
                }
            }
            [a, b] => {
                if self.state.current.is_none_or(|k| k == GestureKind::Pinch) {
                    let phase = self.enter(GestureKind::Pinch);
                    out.push(GestureEvent::Pinch {
                        phase,
                        contacts: [to_local(a.position, origin), to_local(b.position, origin)],
                    });
                }
            }
            _ => {}
        }
    }

    fn on_up(&mut self, p: &PointerInput, origin: Point, out: &mut GestureEvents) {
        if p.source == PointerSource::Mouse {
            if !self.state.mouse_down {
                return;
            }
            self.state.mouse_down = false;
        }
        if !p.contacts.is_empty() || !self.state.track.is_tracking() {
            return;
        }
        let point = p
            .changed
            .first()
            .map(|c| to_local(c.position, origin))
            .or_else(|| self.state.track.last_pos())
            .unwrap_or(Point::ZERO);
        let kind = self.state.current;
        if kind.is_none() {
            self.classify_tap(point, p.time, out);
        }
        out.push(GestureEvent::Ended { kind });
        self.state.reset();
    }

    fn on_cancel(&mut self, p: &PointerInput, out: &mut GestureEvents) {
        if p.source == PointerSource::Mouse {
            self.state.mouse_down = false;
        }
        if !self.state.track.is_tracking() && self.state.current.is_none() {
            return;
        }
        let kind = self.state.current;
        self.state.reset();
        log::debug!("gesture cancelled: {kind:?}");
        out.push(GestureEvent::Cancelled { kind });
    }

    /// Locks into `kind`, reporting whether this is the first event of the gesture.
    fn enter(&mut self, kind: GestureKind) -> Phase {
        if self.state.current == Some(kind) {
            Phase::Update
        } else {
            log::debug!("gesture classified as {kind:?}");
            self.state.current = Some(kind);
            Phase::Begin
        }
    }

    fn swipe(&mut self, point: Point, start: Point, out: &mut GestureEvents) {
        self.state.swipe_samples = self.state.swipe_samples.saturating_add(1);
        let direction = match self.state.current {
            Some(GestureKind::HorizontalSwipe) => SwipeDirection::Horizontal,
            Some(GestureKind::VerticalSwipe) => SwipeDirection::Vertical,
            _ => {
                if self.state.swipe_samples <= self.config.swipe_latch_samples {
                    return;
                }
                let offset = point - start;
                let direction = if offset.y.abs() * self.config.swipe_axis_ratio > offset.x.abs() {
                    SwipeDirection::Vertical
                } else {
                    SwipeDirection::Horizontal
                };
                self.enter(direction.into());
                direction
            }
        };
        out.push(GestureEvent::Swipe {
            direction,
            point,
            start,
        });
    }

    fn classify_tap(&mut self, point: Point, time: u64, out: &mut GestureEvents) {
        let held = self.state.track.elapsed(time).unwrap_or(0);
        if held >= self.config.long_tap_ms {
            out.push(GestureEvent::LongTap { point });
            return;
        }
        match self.state.last_tap_time {
            Some(last) if time > last && time - last < self.config.double_tap_ms => {
                self.pending_tap.cancel();
                self.state.last_tap_time = None;
                out.push(GestureEvent::DoubleTap { point });
            }
            _ => {
                self.state.last_tap_time = Some(time);
                self.pending_tap.arm(time, self.config.double_tap_ms, point);
            }
        }
    }
}

fn to_local(client: Point, origin: Point) -> Point {
    (client - origin).to_point()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Contact, PointerInput};
    use alloc::vec::Vec;

    fn rec() -> GestureRecognizer {
        GestureRecognizer::new(RecognizerConfig::default(), Listeners::all())
    }

    fn touch(phase: PointerPhase, points: &[Point], time: u64) -> InputEvent {
        let contacts: Vec<Contact> = points
            .iter()
            .zip(0_u32..)
            .map(|(p, i)| Contact::new(i, *p))
            .collect();
        let changed = contacts.first().copied();
        PointerInput::touch(phase, contacts, changed, time).into()
    }

    fn touch_up(at: Point, time: u64) -> InputEvent {
        PointerInput::touch(PointerPhase::Up, [], [Contact::new(0, at)], time).into()
    }

    #[test]
    fn down_records_start_relative_to_origin() {
        let mut r = rec();
        let out = r.handle(
            &touch(PointerPhase::Down, &[Point::new(30.0, 40.0)], 5),
            Point::new(10.0, 10.0),
        );
        assert_eq!(
            out.as_slice(),
            &[GestureEvent::Start {
                point: Point::new(20.0, 30.0)
            }]
        );
        assert_eq!(r.state().start_point(), Some(Point::new(20.0, 30.0)));
        assert_eq!(r.state().touch_start_time(), Some(5));
        assert_eq!(r.state().current(), None);
    }

    #[test]
    fn one_contact_move_pans_with_begin_then_update() {
        let mut r = rec();
        r.handle(&touch(PointerPhase::Down, &[Point::ZERO], 0), Point::ZERO);
        let first = r.handle(&touch(PointerPhase::Move, &[Point::new(5.0, 0.0)], 10), Point::ZERO);
        let second = r.handle(&touch(PointerPhase::Move, &[Point::new(9.0, 0.0)], 20), Point::ZERO);
        assert!(matches!(
            first[0],
            GestureEvent::Pan {
                phase: Phase::Begin,
                ..
            }
        ));
        assert!(matches!(
            second[0],
            GestureEvent::Pan {
                phase: Phase::Update,
                ..
            }
        ));
        assert_eq!(r.state().current(), Some(GestureKind::Pan));
    }

    #[test]
    fn two_contact_move_pinches() {
        let mut r = rec();
        let a = Point::new(0.0, 0.0);
        let b = Point::new(100.0, 0.0);
        r.handle(&touch(PointerPhase::Down, &[a], 0), Point::ZERO);
        r.handle(&touch(PointerPhase::Down, &[a, b], 5), Point::ZERO);
        let out = r.handle(&touch(PointerPhase::Move, &[a, b], 10), Point::ZERO);
        assert_eq!(
            out.as_slice(),
            &[GestureEvent::Pinch {
                phase: Phase::Begin,
                contacts: [a, b]
            }]
        );
    }

    #[test]
    fn active_pan_ignores_two_contact_moves() {
        let mut r = rec();
        r.handle(&touch(PointerPhase::Down, &[Point::ZERO], 0), Point::ZERO);
        r.handle(&touch(PointerPhase::Move, &[Point::new(3.0, 0.0)], 10), Point::ZERO);
        let out = r.handle(
            &touch(
                PointerPhase::Move,
                &[Point::new(3.0, 0.0), Point::new(50.0, 0.0)],
                20,
            ),
            Point::ZERO,
        );
        assert!(out.is_empty());
        assert_eq!(r.state().current(), Some(GestureKind::Pan));
    }

    #[test]
    fn swipe_latches_after_more_than_three_samples() {
        let mut r = rec();
        r.set_pan_enabled(false);
        r.handle(&touch(PointerPhase::Down, &[Point::ZERO], 0), Point::ZERO);
        let mut swipes = 0;
        for i in 1..=4 {
            let out = r.handle(
                &touch(PointerPhase::Move, &[Point::new(30.0, 5.0)], i * 10),
                Point::ZERO,
            );
            if i < 4 {
                assert!(out.is_empty(), "sample {i} should not latch yet");
            }
            swipes += out
                .iter()
                .filter(|e| {
                    matches!(
                        e,
                        GestureEvent::Swipe {
                            direction: SwipeDirection::Horizontal,
                            ..
                        }
                    )
                })
                .count();
        }
        assert_eq!(swipes, 1);
        assert_eq!(r.state().current(), Some(GestureKind::HorizontalSwipe));

        let end = r.handle(&touch_up(Point::new(30.0, 5.0), 60), Point::ZERO);
        assert_eq!(
            end.as_slice(),
            &[GestureEvent::Ended {
                kind: Some(GestureKind::HorizontalSwipe)
            }]
        );
        assert!(r.tick(1_000).is_empty());
    }

    #[test]
    fn mostly_vertical_motion_latches_vertical() {
        let mut r = rec();
        r.set_pan_enabled(false);
        r.handle(&touch(PointerPhase::Down, &[Point::ZERO], 0), Point::ZERO);
        for i in 1..=4 {
            r.handle(
                &touch(PointerPhase::Move, &[Point::new(20.0, 10.0)], i * 10),
                Point::ZERO,
            );
        }
        assert_eq!(r.state().current(), Some(GestureKind::VerticalSwipe));
    }

    #[test]
    fn quick_release_becomes_tap_after_window() {
        let mut r = rec();
        let p = Point::new(10.0, 10.0);
        r.handle(&touch(PointerPhase::Down, &[p], 0), Point::ZERO);
        let up = r.handle(&touch_up(p, 50), Point::ZERO);
        assert_eq!(up.as_slice(), &[GestureEvent::Ended { kind: None }]);
        assert_eq!(r.next_deadline(), Some(350));
        assert!(r.tick(300).is_empty());
        assert_eq!(r.tick(450).as_slice(), &[GestureEvent::Tap { point: p }]);
        assert!(r.tick(2_000).is_empty());
    }

    #[test]
    fn two_quick_releases_become_one_double_tap() {
        let mut r = rec();
        let p = Point::new(10.0, 10.0);
        let mut all = Vec::new();
        all.extend(r.handle(&touch(PointerPhase::Down, &[p], 0), Point::ZERO));
        all.extend(r.handle(&touch_up(p, 50), Point::ZERO));
        all.extend(r.handle(&touch(PointerPhase::Down, &[p], 150), Point::ZERO));
        all.extend(r.handle(&touch_up(p, 200), Point::ZERO));
        all.extend(r.tick(1_000));
        let taps = all
            .iter()
            .filter(|e| matches!(e, GestureEvent::Tap { .. }))
            .count();
        let doubles = all
            .iter()
            .filter(|e| matches!(e, GestureEvent::DoubleTap { .. }))
            .count();
        assert_eq!((taps, doubles), (0, 1));
    }

    #[test]
    fn long_press_is_long_tap() {
        let mut r = rec();
        r.handle(&touch(PointerPhase::Down, &[Point::ZERO], 0), Point::ZERO);
        let out = r.handle(&touch_up(Point::ZERO, 250), Point::ZERO);
        assert_eq!(
            out.as_slice(),
            &[
                GestureEvent::LongTap { point: Point::ZERO },
                GestureEvent::Ended { kind: None }
            ]
        );
        assert_eq!(r.next_deadline(), None);
    }

    #[test]
    fn pan_release_does_not_tap() {
        let mut r = rec();
        r.handle(&touch(PointerPhase::Down, &[Point::ZERO], 0), Point::ZERO);
        r.handle(&touch(PointerPhase::Move, &[Point::new(5.0, 5.0)], 10), Point::ZERO);
        let out = r.handle(&touch_up(Point::new(5.0, 5.0), 20), Point::ZERO);
        assert_eq!(
            out.as_slice(),
            &[GestureEvent::Ended {
                kind: Some(GestureKind::Pan)
            }]
        );
        assert_eq!(r.next_deadline(), None);
    }

    #[test]
    fn cancel_resets_without_touching_tap_timing() {
        let mut r = rec();
        let p = Point::new(1.0, 1.0);
        r.handle(&touch(PointerPhase::Down, &[p], 0), Point::ZERO);
        r.handle(&touch_up(p, 50), Point::ZERO);
        r.handle(&touch(PointerPhase::Down, &[p], 100), Point::ZERO);
        r.handle(&touch(PointerPhase::Move, &[Point::new(9.0, 1.0)], 110), Point::ZERO);
        let out = r.handle(&touch(PointerPhase::Cancel, &[], 120), Point::ZERO);
        assert_eq!(
            out.as_slice(),
            &[GestureEvent::Cancelled {
                kind: Some(GestureKind::Pan)
            }]
        );
        assert_eq!(r.state().current(), None);
        assert_eq!(r.state().last_tap_time(), Some(50));
        assert_eq!(r.next_deadline(), Some(350));
    }

    #[test]
    fn mouse_hover_never_classifies() {
        let mut r = rec();
        let out = r.handle(
            &PointerInput::mouse(PointerPhase::Move, Point::new(5.0, 5.0), 0).into(),
            Point::ZERO,
        );
        assert!(out.is_empty());
        assert!(!r.state().is_mouse_down());
    }

    #[test]
    fn mouse_drag_pans_and_release_ends() {
        let mut r = rec();
        r.handle(
            &PointerInput::mouse(PointerPhase::Down, Point::ZERO, 0).into(),
            Point::ZERO,
        );
        assert!(r.state().is_mouse_down());
        let moved = r.handle(
            &PointerInput::mouse(PointerPhase::Move, Point::new(4.0, 0.0), 10).into(),
            Point::ZERO,
        );
        assert!(matches!(moved[0], GestureEvent::Pan { .. }));
        let up = r.handle(
            &PointerInput::mouse(PointerPhase::Up, Point::new(4.0, 0.0), 20).into(),
            Point::ZERO,
        );
        assert_eq!(
            up.as_slice(),
            &[GestureEvent::Ended {
                kind: Some(GestureKind::Pan)
            }]
        );
    }

    #[test]
    fn unattached_families_are_ignored() {
        let mut r = GestureRecognizer::new(RecognizerConfig::default(), Listeners::MOUSE);
        let out = r.handle(&touch(PointerPhase::Down, &[Point::ZERO], 0), Point::ZERO);
        assert!(out.is_empty());
        assert!(r.state().start_point().is_none());
    }

    #[test]
    fn detach_silences_everything() {
        let mut r = rec();
        let p = Point::ZERO;
        r.handle(&touch(PointerPhase::Down, &[p], 0), Point::ZERO);
        r.handle(&touch_up(p, 50), Point::ZERO);
        r.detach();
        assert!(!r.is_attached());
        assert!(r.tick(1_000).is_empty());
        assert!(r
            .handle(&InputEvent::Resize { time: 1_000 }, Point::ZERO)
            .is_empty());
    }

    #[test]
    fn late_event_flushes_expired_tap_first() {
        let mut r = rec();
        let p = Point::new(2.0, 2.0);
        r.handle(&touch(PointerPhase::Down, &[p], 0), Point::ZERO);
        r.handle(&touch_up(p, 50), Point::ZERO);
        let out = r.handle(&touch(PointerPhase::Down, &[p], 900), Point::ZERO);
        assert_eq!(
            out.as_slice(),
            &[GestureEvent::Tap { point: p }, GestureEvent::Start { point: p }]
        );
    }
}
