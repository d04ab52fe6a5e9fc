// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=pinchzoom_gesture --heading-base-level=0

//! Pinchzoom Gesture: headless recognition of pointer gestures.
//!
//! This crate turns a raw stream of touch, mouse, wheel and resize input into
//! semantic gestures: pan, pinch, horizontal and vertical swipe, tap, long tap
//! and double tap. It does no transform math; consumers such as
//! `pinchzoom_engine` react to the classified events.
//!
//! - [`input`]: raw input events with client-space contacts and timestamps.
//! - [`recognizer`]: the classification state machine.
//! - [`event`]: the closed set of [`GestureEvent`]s and the [`GestureHandler`] trait.
//! - [`listeners`]: touch/mouse listener selection driven by a capability probe.
//! - [`timer`]: one-shot deadlines driven by host-supplied time.
//! - [`track`]: start/latest position bookkeeping for the primary contact.
//!
//! ## Time
//!
//! Nothing in this crate reads a clock. Every input carries a millisecond
//! timestamp, and hosts call [`GestureRecognizer::tick`] so that a single tap
//! can be confirmed once the double-tap window has closed.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use pinchzoom_gesture::{
//!     Contact, GestureEvent, GestureRecognizer, Listeners, PointerInput, PointerPhase,
//!     RecognizerConfig,
//! };
//!
//! let mut rec = GestureRecognizer::new(RecognizerConfig::default(), Listeners::all());
//! let origin = Point::ZERO;
//! let finger = Contact::new(0, Point::new(40.0, 40.0));
//!
//! rec.handle(&PointerInput::touch(PointerPhase::Down, [finger], [finger], 0).into(), origin);
//! rec.handle(&PointerInput::touch(PointerPhase::Up, [], [finger], 60).into(), origin);
//!
//! // A tap is only confirmed once no second tap arrived within the window.
//! assert!(rec.tick(200).is_empty());
//! let events = rec.tick(400);
//! assert_eq!(events.as_slice(), &[GestureEvent::Tap { point: Point::new(40.0, 40.0) }]);
//! ```
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod event;
pub mod input;
pub mod listeners;
pub mod recognizer;
pub mod timer;
pub mod track;

pub use event::{GestureEvent, GestureHandler, GestureKind, Phase, SwipeDirection};
pub use input::{Contact, Contacts, InputEvent, PointerInput, PointerPhase, PointerSource, WheelInput};
pub use listeners::{FixedProbe, ListenerMode, Listeners, TouchProbe};
pub use recognizer::{GestureEvents, GestureRecognizer, GestureState, RecognizerConfig};
