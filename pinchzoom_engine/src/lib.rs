// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=pinchzoom_engine --heading-base-level=0

//! Pinchzoom Engine: headless pinch-zoom, pan and double-tap zoom.
//!
//! This crate computes the scale and translation of a visual surface from the
//! gestures classified by `pinchzoom_gesture`. It enforces a maximum scale,
//! keeps the image from leaving blank space at the container edges, and
//! re-centres after a gesture ends. It does not render anything; callers
//! apply the emitted [`TransformCommand`]s to their own element.
//!
//! - [`PinchZoom`]: recognizer plus engine for one surface; the usual entry point.
//! - [`TransformEngine`]: transform math and the public zoom controls.
//! - [`GeometryProvider`]: the measurements the engine needs from the host.
//! - [`PinchZoomConfig`]: behaviour knobs with validated defaults.
//! - [`limits`]: pure zoom/pan clamping functions.
//!
//! ## Coordinates
//!
//! The transform maps a surface-local point `p` to `p * scale + translate`,
//! with the origin at the surface's top-left corner. Client positions in
//! input events are made surface-local by subtracting the origin of
//! [`GeometryProvider::bounding_rect`].
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use pinchzoom_engine::{EngineOutput, FixedGeometry, PinchZoom, PinchZoomConfig};
//! use pinchzoom_gesture::{Contact, FixedProbe, InputEvent, PointerInput, PointerPhase};
//!
//! // A 400x300 surface showing a 1200x900 image, so the zoom limit resolves to 3.
//! let geometry = FixedGeometry::filled(Rect::new(0.0, 0.0, 400.0, 300.0), Size::new(1200.0, 900.0));
//! let mut pz = PinchZoom::attach(geometry, PinchZoomConfig::default(), &FixedProbe::TOUCH, 0);
//! assert_eq!(pz.max_scale(), 3.0);
//!
//! // Double tap at (100, 100).
//! let finger = Contact::new(0, Point::new(100.0, 100.0));
//! let down = |time: u64| -> InputEvent {
//!     PointerInput::touch(PointerPhase::Down, [finger], [finger], time).into()
//! };
//! let up = |time: u64| -> InputEvent {
//!     PointerInput::touch(PointerPhase::Up, [], [finger], time).into()
//! };
//! let mut outputs = Vec::new();
//! for event in [down(0), up(50), down(150), up(200)] {
//!     outputs.extend(pz.handle_input(&event));
//! }
//!
//! assert_eq!(pz.scale(), 2.0);
//! assert!(outputs.contains(&EngineOutput::ZoomChanged(2.0)));
//! ```
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod config;
mod engine;
mod geometry;
pub mod limits;
mod pinch_zoom;
mod resolver;
mod transform;

pub use config::{ConfigError, DEFAULT_MAX_SCALE, PinchZoomConfig, ZoomLimit};
pub use engine::{EngineOutput, TransformEngine};
pub use geometry::{FixedGeometry, GeometryProvider, ImageMetrics};
pub use pinch_zoom::PinchZoom;
pub use resolver::{MaxScaleTask, ResolveStatus};
pub use transform::{TransformCommand, TransformState};
