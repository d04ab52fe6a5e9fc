// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw input events as delivered by the platform layer.
//!
//! Positions are in client coordinates; the recognizer converts them into
//! surface-local samples by subtracting the surface origin it is given with
//! each event. Timestamps are monotonic milliseconds supplied by the host.

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Contact list for a single event. Two contacts cover every gesture this crate recognizes.
pub type Contacts = SmallVec<[Contact; 2]>;

/// A single touch point, or the mouse cursor while a button is held.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// Stable identifier of the contact for the duration of the touch.
    pub index: u32,
    /// Position in client coordinates.
    pub position: Point,
}

impl Contact {
    /// Creates a contact with the given index and client position.
    #[must_use]
    pub const fn new(index: u32, position: Point) -> Self {
        Self { index, position }
    }
}

/// Device family an event originates from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerSource {
    /// Touch screen contacts.
    Touch,
    /// Mouse (or any single-button pointer device).
    Mouse,
}

/// Lifecycle phase of a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// A contact was added (touch start, mouse button press).
    Down,
    /// One or more contacts moved.
    Move,
    /// A contact was removed (touch end, mouse button release).
    Up,
    /// The platform aborted the interaction.
    Cancel,
}

/// A pointer event with its contact lists.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerInput {
    /// Device family.
    pub source: PointerSource,
    /// Phase of this event.
    pub phase: PointerPhase,
    /// Contacts still active after this event.
    pub contacts: Contacts,
    /// Contacts added, moved or removed by this event.
    pub changed: Contacts,
    /// Event time in milliseconds.
    pub time: u64,
}

impl PointerInput {
    /// Builds a touch event.
    ///
    /// `contacts` are the contacts active after the event; `changed` are the
    /// ones this event added, moved or removed.
    #[must_use]
    pub fn touch(
        phase: PointerPhase,
        contacts: impl IntoIterator<Item = Contact>,
        changed: impl IntoIterator<Item = Contact>,
        time: u64,
    ) -> Self {
        Self {
            source: PointerSource::Touch,
            phase,
            contacts: contacts.into_iter().collect(),
            changed: changed.into_iter().collect(),
            time,
        }
    }

    /// Builds a mouse event at `position`.
    ///
    /// The cursor counts as an active contact only while the button is held,
    /// so `Up` and `Cancel` events carry it in `changed` alone.
    #[must_use]
    pub fn mouse(phase: PointerPhase, position: Point, time: u64) -> Self {
        let cursor = Contact::new(0, position);
        let mut contacts = Contacts::new();
        if matches!(phase, PointerPhase::Down | PointerPhase::Move) {
            contacts.push(cursor);
        }
        let mut changed = Contacts::new();
        changed.push(cursor);
        Self {
            source: PointerSource::Mouse,
            phase,
            contacts,
            changed,
            time,
        }
    }

    /// Position of the contact this event is "about": the first changed one,
    /// falling back to the first active one.
    #[must_use]
    pub fn primary_position(&self) -> Option<Point> {
        self.changed
            .first()
            .or_else(|| self.contacts.first())
            .map(|c| c.position)
    }
}

/// A scroll wheel event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelInput {
    /// Scroll delta; a negative `y` scrolls up (zoom in).
    pub delta: Vec2,
    /// Cursor position in client coordinates.
    pub cursor: Point,
    /// Event time in milliseconds.
    pub time: u64,
}

/// Any raw input the recognizer consumes.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Touch or mouse pointer event.
    Pointer(PointerInput),
    /// Scroll wheel event.
    Wheel(WheelInput),
    /// The surface or its container changed size.
    Resize {
        /// Event time in milliseconds.
        time: u64,
    },
}

impl InputEvent {
    /// Event time in milliseconds.
    #[must_use]
    pub fn time(&self) -> u64 {
        match self {
            Self::Pointer(p) => p.time,
            Self::Wheel(w) => w.time,
            Self::Resize { time } => *time,
        }
    }
}

impl From<PointerInput> for InputEvent {
    fn from(value: PointerInput) -> Self {
        Self::Pointer(value)
    }
}

impl From<WheelInput> for InputEvent {
    fn from(value: WheelInput) -> Self {
        Self::Wheel(value)
    }
}
