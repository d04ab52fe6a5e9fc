// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener selection: which input families a recognizer attaches to.

use crate::input::{InputEvent, PointerSource};

bitflags::bitflags! {
    /// Input families a recognizer is currently subscribed to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Listeners: u8 {
        /// Touch start/move/end/cancel.
        const TOUCH  = 0b0000_0001;
        /// Mouse down/move/up.
        const MOUSE  = 0b0000_0010;
        /// Scroll wheel.
        const WHEEL  = 0b0000_0100;
        /// Surface resize notifications.
        const RESIZE = 0b0000_1000;
    }
}

impl Listeners {
    /// Picks the listener set for `mode`, consulting `probe` in [`ListenerMode::Auto`].
    #[must_use]
    pub fn resolve(mode: ListenerMode, probe: &impl TouchProbe, wheel: bool) -> Self {
        let mut set = match mode {
            ListenerMode::MouseAndTouch => Self::TOUCH | Self::MOUSE,
            ListenerMode::Auto if is_touch_screen(probe) => Self::TOUCH,
            ListenerMode::Auto => Self::MOUSE,
        };
        set |= Self::RESIZE;
        if wheel {
            set |= Self::WHEEL;
        }
        set
    }

    /// Returns `true` if `event` belongs to an attached family.
    #[must_use]
    pub fn accepts(self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Pointer(p) => match p.source {
                PointerSource::Touch => self.contains(Self::TOUCH),
                PointerSource::Mouse => self.contains(Self::MOUSE),
            },
            InputEvent::Wheel(_) => self.contains(Self::WHEEL),
            InputEvent::Resize { .. } => self.contains(Self::RESIZE),
        }
    }
}

/// How listeners are chosen at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListenerMode {
    /// Touch listeners on touch screens, mouse listeners otherwise.
    #[default]
    Auto,
    /// Attach both families regardless of the device.
    MouseAndTouch,
}

/// Touch capability queries answered by the host platform.
pub trait TouchProbe {
    /// Direct feature test (for example, whether touch start events exist).
    fn has_touch_events(&self) -> bool;

    /// Evaluates a media query such as `(touch-enabled)`.
    fn matches_media(&self, query: &str) -> bool;
}

/// Vendor-prefixed media queries checked when the feature test fails.
pub const TOUCH_MEDIA_QUERIES: &[&str] = &[
    "(touch-enabled)",
    "(-webkit-touch-enabled)",
    "(-moz-touch-enabled)",
    "(-o-touch-enabled)",
    "(-ms-touch-enabled)",
];

/// Feature test first, then the media-query fallback.
#[must_use]
pub fn is_touch_screen(probe: &impl TouchProbe) -> bool {
    probe.has_touch_events() || TOUCH_MEDIA_QUERIES.iter().any(|q| probe.matches_media(q))
}

/// A probe with fixed answers, for hosts that already know the device class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedProbe {
    /// Answer to [`TouchProbe::has_touch_events`].
    pub touch_events: bool,
    /// Answer to every [`TouchProbe::matches_media`] query.
    pub touch_media: bool,
}

impl FixedProbe {
    /// A probe describing a touch screen.
    pub const TOUCH: Self = Self {
        touch_events: true,
        touch_media: true,
    };
    /// A probe describing a mouse-only device.
    pub const MOUSE: Self = Self {
        touch_events: false,
        touch_media: false,
    };
}

impl TouchProbe for FixedProbe {
    fn has_touch_events(&self) -> bool {
        self.touch_events
    }

    fn matches_media(&self, _query: &str) -> bool {
        self.touch_media
    }
}
