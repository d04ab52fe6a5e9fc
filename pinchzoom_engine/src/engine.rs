// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The transform engine.
//!
//! [`TransformEngine`] owns the authoritative [`TransformState`] and turns
//! semantic gestures into clamped scale/translation updates. It implements
//! [`GestureHandler`], so recognizer output can be dispatched straight into
//! it; the same operations are also callable directly for host controls.
//!
//! Every update is reported through [`TransformEngine::take_outputs`] as an
//! [`EngineOutput`]. Continuous updates (pan, pinch) carry a 0 ms transition;
//! settle updates (release, toggle, wheel, reset) carry the configured one.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use pinchzoom_engine::{EngineOutput, FixedGeometry, PinchZoomConfig, TransformEngine, ZoomLimit};
//!
//! let geometry = FixedGeometry::filled(Rect::new(0.0, 0.0, 400.0, 300.0), Size::new(1200.0, 900.0));
//! let config = PinchZoomConfig { limit_zoom: ZoomLimit::Fixed(4.0), ..PinchZoomConfig::default() };
//! let mut engine = TransformEngine::new(geometry, config, 0);
//!
//! engine.toggle_zoom(Some(Point::new(100.0, 100.0)));
//! assert_eq!(engine.scale(), 2.0);
//! assert!(engine
//!     .take_outputs()
//!     .iter()
//!     .any(|out| matches!(out, EngineOutput::ZoomChanged(s) if *s == 2.0)));
//! ```

use alloc::vec::Vec;

use kurbo::{Affine, Point, Size, Vec2};
use pinchzoom_gesture::{GestureEvent, GestureHandler, GestureKind, Phase};

use crate::config::{DEFAULT_MAX_SCALE, PinchZoomConfig, ZoomLimit};
use crate::geometry::GeometryProvider;
use crate::limits::{limit_pan, limit_zoom, pinch_ratio, wheel_target, zoom_about};
use crate::resolver::{MaxScaleTask, ResolveStatus};
use crate::transform::{TransformCommand, TransformState};

/// Something the host should act on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EngineOutput {
    /// Write this transform to the surface.
    Transform(TransformCommand),
    /// A recognized gesture, forwarded for observation.
    Gesture(GestureEvent),
    /// The committed scale changed to this value.
    ZoomChanged(f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PinchBaseline {
    initial_distance: f64,
    /// Midpoint of the contacts at pinch start, minus the committed translation.
    focus: Vec2,
    last: [Point; 2],
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PanBaseline {
    start: Point,
    last: Point,
}

/// Computes and clamps the surface transform.
#[derive(Clone, Debug)]
pub struct TransformEngine<G> {
    geometry: G,
    config: PinchZoomConfig,
    state: TransformState,
    max_scale: f64,
    resolver: MaxScaleTask,
    pinch: Option<PinchBaseline>,
    pan: Option<PanBaseline>,
    enabled: bool,
    outputs: Vec<EngineOutput>,
}

impl<G: GeometryProvider> TransformEngine<G> {
    /// Attaches an engine to the surface described by `geometry`.
    ///
    /// Unusable configuration values are replaced by their defaults and
    /// logged. A surface with an empty size, or `config.disabled`, yields a
    /// disabled engine on which every operation is a no-op.
    pub fn new(geometry: G, config: PinchZoomConfig, now: u64) -> Self {
        let (config, problems) = config.sanitized();
        for problem in &problems {
            log::warn!("{problem}; falling back to the default");
        }
        let size = geometry.surface_size();
        let enabled = !config.disabled && size.width > 0.0 && size.height > 0.0;
        if !enabled {
            log::debug!("transform engine attached in a disabled state (surface size {size:?})");
        }
        let mut engine = Self {
            geometry,
            config,
            state: TransformState::default(),
            max_scale: DEFAULT_MAX_SCALE,
            resolver: MaxScaleTask::new(config.natural_size_poll_ms, config.natural_size_timeout_ms),
            pinch: None,
            pan: None,
            enabled,
            outputs: Vec::new(),
        };
        engine.detect_limit_zoom(now);
        engine
    }

    /// Effective (sanitized) configuration.
    #[must_use]
    pub fn config(&self) -> &PinchZoomConfig {
        &self.config
    }

    /// The geometry provider.
    #[must_use]
    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    /// Mutable access to the geometry provider, for hosts that push layout changes.
    pub fn geometry_mut(&mut self) -> &mut G {
        &mut self.geometry
    }

    /// Live and committed transform values.
    #[must_use]
    pub fn state(&self) -> &TransformState {
        &self.state
    }

    /// Live scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.state.scale()
    }

    /// Live translation.
    #[must_use]
    pub fn translate(&self) -> Vec2 {
        self.state.translate()
    }

    /// Returns `true` while the live scale is above 1.
    #[must_use]
    pub fn is_zoomed_in(&self) -> bool {
        self.state.scale() > 1.0
    }

    /// Current maximum scale.
    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// The live transform as an affine map.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.state.affine()
    }

    /// Returns `false` once detached, or when attached to an empty surface.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Progress of natural-size limit resolution.
    #[must_use]
    pub fn resolve_status(&self) -> ResolveStatus {
        self.resolver.status()
    }

    /// Time the limit resolver next wants to be polled.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.resolver.next_deadline()
    }

    /// Whether one-contact movement should currently be classified as a pan.
    #[must_use]
    pub fn accepts_pan(&self) -> bool {
        self.enabled
            && !self.config.disable_pan
            && self.state.committed_scale() >= self.config.min_pan_scale
    }

    /// Drains pending outputs in the order they were produced.
    pub fn take_outputs(&mut self) -> Vec<EngineOutput> {
        core::mem::take(&mut self.outputs)
    }

    /// Queues a recognized gesture for the host.
    pub fn forward(&mut self, event: GestureEvent) {
        if self.enabled {
            self.outputs.push(EngineOutput::Gesture(event));
        }
    }

    /// Stops all processing. Later calls are no-ops.
    pub fn detach(&mut self) {
        self.enabled = false;
        self.resolver.cancel();
        self.pinch = None;
        self.pan = None;
        self.outputs.clear();
    }

    /// Resolves `max_scale` from the configured zoom limit.
    ///
    /// A natural-size limit falls back to [`DEFAULT_MAX_SCALE`] and starts
    /// polling the geometry; any earlier poll is cancelled first.
    pub fn detect_limit_zoom(&mut self, now: u64) {
        if !self.enabled {
            return;
        }
        self.resolver.cancel();
        match self.config.limit_zoom {
            ZoomLimit::Fixed(limit) => self.max_scale = limit,
            ZoomLimit::Unbounded => self.max_scale = f64::INFINITY,
            ZoomLimit::NaturalSize => {
                self.max_scale = DEFAULT_MAX_SCALE;
                self.resolver.start(now);
                self.poll_limits(now);
            }
        }
    }

    /// Advances natural-size resolution to `now`.
    pub fn poll_limits(&mut self, now: u64) {
        if !self.enabled {
            return;
        }
        if let Some(scale) = self.resolver.poll(now, &self.geometry) {
            self.max_scale = scale;
        }
    }

    /// Starts a pan from the surface-local `start` point.
    pub fn begin_pan(&mut self, start: Point) {
        if self.image_size().is_none() {
            return;
        }
        self.state.commit();
        self.pan = Some(PanBaseline { start, last: start });
    }

    /// Moves the surface so the pan start point follows `point`.
    pub fn apply_pan(&mut self, point: Point) {
        let Some(image) = self.image_size() else {
            return;
        };
        if self.config.disable_pan || self.state.scale() < self.config.min_pan_scale {
            return;
        }
        let Some(pan) = self.pan.as_mut() else {
            return;
        };
        pan.last = point;
        let mut translate = self.state.committed_translate() + (point - pan.start);
        if self.config.limit_pan {
            translate = self.limit_pan(translate, self.state.scale(), image);
        }
        self.state.set_translate(translate);
        self.emit_transform(0);
    }

    /// Starts a pinch with the two surface-local contacts.
    pub fn begin_pinch(&mut self, contacts: [Point; 2]) {
        if self.image_size().is_none() {
            return;
        }
        self.state.commit();
        self.pinch = Some(self.pinch_baseline(contacts));
    }

    /// Scales about the pinch focus by the change in contact distance.
    pub fn apply_pinch(&mut self, contacts: [Point; 2]) {
        let Some(image) = self.image_size() else {
            return;
        };
        let Some(base) = self.pinch.as_mut() else {
            return;
        };
        base.last = contacts;
        let base = *base;
        let ratio = pinch_ratio(base.initial_distance, contacts);
        let mut scale = self.state.committed_scale() * ratio;
        let mut translate = zoom_about(self.state.committed_translate(), base.focus, ratio);
        if let Some((clamped, adjusted)) =
            limit_zoom(scale, translate, image, self.config.min_scale, self.max_scale)
        {
            scale = clamped;
            translate = adjusted;
        }
        if self.config.limit_pan {
            translate = self.limit_pan(translate, scale, image);
        }
        self.state.set_live(scale, translate);
        self.emit_transform(0);
    }

    /// Steps the zoom by one wheel notch about the surface-local `cursor`.
    ///
    /// A negative vertical delta zooms in. Horizontal-only deltas are ignored.
    pub fn apply_wheel(&mut self, delta: Vec2, cursor: Point) {
        if !self.config.wheel || delta.y == 0.0 || self.image_size().is_none() {
            return;
        }
        self.settle_gesture();
        let Some(target) = wheel_target(
            self.state.committed_scale(),
            delta.y < 0.0,
            self.config.wheel_zoom_factor,
            self.max_scale,
        ) else {
            return;
        };
        if target == self.state.scale() {
            return;
        }
        self.set_zoom(target, Some(cursor));
    }

    /// Zooms in from scale 1, or resets when already zoomed.
    ///
    /// With an `origin` (a double tap) the scale becomes
    /// `double_tap_scale` and the origin stays put; without one (a zoom
    /// control) it becomes `zoom_control_scale + 1` about the surface centre.
    pub fn toggle_zoom(&mut self, origin: Option<Point>) {
        let Some(image) = self.image_size() else {
            return;
        };
        self.settle_gesture();
        let committed = self.state.committed_translate();
        if self.state.committed_scale() == 1.0 {
            let (scale, focus) = match origin {
                Some(point) => (self.config.double_tap_scale, point.to_vec2()),
                None => (
                    self.config.zoom_control_scale + 1.0,
                    self.geometry.surface_center().to_vec2(),
                ),
            };
            self.state.set_live(scale, zoom_about(committed, focus, scale));
        } else {
            self.state.set_live(1.0, Vec2::ZERO);
        }
        self.center_image(image);
        self.commit();
        self.settle_gesture();
        self.emit_transform(self.config.transition_duration_ms);
    }

    /// Zooms to `scale` keeping the surface-local `center` fixed.
    ///
    /// `center` defaults to the surface centre.
    pub fn set_zoom(&mut self, scale: f64, center: Option<Point>) {
        let Some(image) = self.image_size() else {
            return;
        };
        if !(scale.is_finite() && scale > 0.0) {
            log::warn!("ignoring zoom to invalid scale {scale}");
            return;
        }
        self.settle_gesture();
        let committed = self.state.committed_scale();
        let committed_translate = self.state.committed_translate();
        let center = center.unwrap_or_else(|| self.geometry.surface_center());
        let focus = center.to_vec2() - committed_translate;
        let ratio = if committed == 0.0 { scale } else { scale / committed };
        self.state
            .set_live(scale, zoom_about(committed_translate, focus, ratio));
        self.center_image(image);
        self.commit();
        self.settle_gesture();
        self.emit_transform(self.config.transition_duration_ms);
    }

    /// Returns to scale 1 with no translation.
    pub fn reset_scale(&mut self) {
        if self.image_size().is_none() {
            return;
        }
        self.settle_gesture();
        self.state.set_live(1.0, Vec2::ZERO);
        self.commit();
        self.settle_gesture();
        self.emit_transform(self.config.transition_duration_ms);
    }

    /// Settles the transform after the last contact lifted.
    pub fn end_gesture(&mut self, kind: Option<GestureKind>) {
        self.pinch = None;
        self.pan = None;
        let Some(image) = self.image_size() else {
            return;
        };
        let before = (self.state.scale(), self.state.translate());
        if self.state.scale() < 1.0 {
            self.state.set_scale(1.0);
        }
        if self.config.auto_zoom_out && kind == Some(GestureKind::Pinch) {
            self.state.set_scale(1.0);
        }
        let realign = match kind {
            Some(GestureKind::Pinch) => true,
            Some(GestureKind::Pan) => self.state.scale() > self.config.min_pan_scale,
            _ => false,
        };
        if realign {
            self.center_image(image);
        }
        self.commit();
        if (self.state.scale(), self.state.translate()) != before {
            self.emit_transform(self.config.transition_duration_ms);
        }
    }

    /// Drops an interrupted gesture, returning to the committed transform.
    pub fn cancel_gesture(&mut self) {
        self.pinch = None;
        self.pan = None;
        if !self.enabled || self.state.is_committed() {
            return;
        }
        self.state.revert();
        self.emit_transform(self.config.transition_duration_ms);
    }

    /// Re-aligns the transform after the surface or its container changed size.
    pub fn handle_resize(&mut self) {
        let Some(image) = self.image_size() else {
            return;
        };
        let before = self.state.translate();
        self.center_image(image);
        if self.state.translate() != before {
            self.commit();
            self.emit_transform(self.config.transition_duration_ms);
        }
    }

    /// Rendered image size, or `None` while disabled or without an image.
    fn image_size(&self) -> Option<Size> {
        if !self.enabled {
            return None;
        }
        self.geometry.image().map(|image| image.rendered)
    }

    fn pinch_baseline(&self, contacts: [Point; 2]) -> PinchBaseline {
        let midpoint = contacts[0].midpoint(contacts[1]);
        PinchBaseline {
            initial_distance: contacts[0].distance(contacts[1]),
            focus: midpoint.to_vec2() - self.state.committed_translate(),
            last: contacts,
        }
    }

    /// Folds live gesture progress into the committed baseline and re-bases
    /// the active gesture at its latest contacts.
    ///
    /// Zoom changes made mid-gesture start from the transform on screen, and
    /// the next move continues from there.
    fn settle_gesture(&mut self) {
        if self.pan.is_none() && self.pinch.is_none() {
            return;
        }
        self.commit();
        if let Some(pan) = self.pan.as_mut() {
            pan.start = pan.last;
        }
        if let Some(last) = self.pinch.map(|base| base.last) {
            self.pinch = Some(self.pinch_baseline(last));
        }
    }

    fn limit_pan(&self, translate: Vec2, scale: f64, image: Size) -> Vec2 {
        limit_pan(
            translate,
            scale,
            image,
            self.geometry.surface_size(),
            self.geometry.viewport_size(),
        )
    }

    /// Pulls the image back so it never starts right of or below the origin,
    /// then applies the pan limits.
    fn center_image(&mut self, image: Size) {
        let t = self.state.translate();
        let t = Vec2::new(t.x.min(0.0), t.y.min(0.0));
        let t = self.limit_pan(t, self.state.scale(), image);
        self.state.set_translate(t);
    }

    fn commit(&mut self) {
        let previous = self.state.committed_scale();
        self.state.commit();
        let scale = self.state.scale();
        if scale != previous {
            log::debug!("zoom changed: {previous} -> {scale}");
            self.outputs.push(EngineOutput::ZoomChanged(scale));
        }
    }

    fn emit_transform(&mut self, transition_ms: u64) {
        let command = self.state.command(transition_ms);
        log::trace!(
            "transform scale={} translate=({}, {}) over {transition_ms} ms",
            command.scale,
            command.translate.x,
            command.translate.y
        );
        self.outputs.push(EngineOutput::Transform(command));
    }
}

impl<G: GeometryProvider> GestureHandler for TransformEngine<G> {
    fn pan(&mut self, phase: Phase, point: Point, start: Point) {
        if phase == Phase::Begin {
            self.begin_pan(start);
        }
        self.apply_pan(point);
    }

    fn pinch(&mut self, phase: Phase, contacts: [Point; 2]) {
        if phase == Phase::Begin {
            self.begin_pinch(contacts);
        }
        self.apply_pinch(contacts);
    }

    fn double_tap(&mut self, point: Point) {
        if self.config.double_tap {
            self.toggle_zoom(Some(point));
        }
    }

    fn ended(&mut self, kind: Option<GestureKind>) {
        self.end_gesture(kind);
    }

    fn cancelled(&mut self, _kind: Option<GestureKind>) {
        self.cancel_gesture();
    }

    fn wheel(&mut self, delta: Vec2, cursor: Point) {
        self.apply_wheel(delta, cursor);
    }

    fn resize(&mut self) {
        self.handle_resize();
    }
}
