// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Affine, Point, Vec2};
use pinchzoom_gesture::{
    GestureEvent, GestureRecognizer, InputEvent, Listeners, RecognizerConfig, TouchProbe,
};

use crate::config::PinchZoomConfig;
use crate::engine::{EngineOutput, TransformEngine};
use crate::geometry::GeometryProvider;

/// A recognizer and an engine attached to one surface.
///
/// Raw input goes in through [`PinchZoom::handle_input`] and
/// [`PinchZoom::tick`]; transform commands, forwarded gestures and zoom
/// notifications come out, in order.
#[derive(Clone, Debug)]
pub struct PinchZoom<G> {
    recognizer: GestureRecognizer,
    engine: TransformEngine<G>,
}

impl<G: GeometryProvider> PinchZoom<G> {
    /// Attaches to the surface described by `geometry`.
    ///
    /// `probe` decides between touch and mouse listeners unless the
    /// configuration forces both. A disabled engine attaches no listeners.
    pub fn attach(
        geometry: G,
        config: PinchZoomConfig,
        probe: &impl TouchProbe,
        now: u64,
    ) -> Self {
        Self::attach_with(geometry, config, RecognizerConfig::default(), probe, now)
    }

    /// Like [`PinchZoom::attach`], with custom classification thresholds.
    pub fn attach_with(
        geometry: G,
        config: PinchZoomConfig,
        recognizer_config: RecognizerConfig,
        probe: &impl TouchProbe,
        now: u64,
    ) -> Self {
        let engine = TransformEngine::new(geometry, config, now);
        let listeners = if engine.is_enabled() {
            let config = engine.config();
            Listeners::resolve(config.listeners, probe, config.wheel)
        } else {
            Listeners::empty()
        };
        log::debug!("pinch-zoom attached with listeners {listeners:?}");
        let mut recognizer = GestureRecognizer::new(recognizer_config, listeners);
        recognizer.set_pan_enabled(engine.accepts_pan());
        Self { recognizer, engine }
    }

    /// Feeds one raw input event.
    pub fn handle_input(&mut self, event: &InputEvent) -> Vec<EngineOutput> {
        let origin = self.engine.geometry().bounding_rect().origin();
        let events = self.recognizer.handle(event, origin);
        self.engine.poll_limits(event.time());
        self.run(&events)
    }

    /// Advances timers to `now`: pending tap confirmation and limit resolution.
    pub fn tick(&mut self, now: u64) -> Vec<EngineOutput> {
        let events = self.recognizer.tick(now);
        self.engine.poll_limits(now);
        self.run(&events)
    }

    /// Earliest time at which [`PinchZoom::tick`] has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.recognizer.next_deadline(), self.engine.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Zoom-control toggle. See [`TransformEngine::toggle_zoom`].
    pub fn toggle_zoom(&mut self, origin: Option<Point>) -> Vec<EngineOutput> {
        self.engine.toggle_zoom(origin);
        self.run(&[])
    }

    /// Programmatic zoom. See [`TransformEngine::set_zoom`].
    pub fn set_zoom(&mut self, scale: f64, center: Option<Point>) -> Vec<EngineOutput> {
        self.engine.set_zoom(scale, center);
        self.run(&[])
    }

    /// Returns to scale 1 with no translation.
    pub fn reset_scale(&mut self) -> Vec<EngineOutput> {
        self.engine.reset_scale();
        self.run(&[])
    }

    /// Re-resolves the zoom limit, restarting natural-size polling if configured.
    pub fn detect_limit_zoom(&mut self, now: u64) {
        self.engine.detect_limit_zoom(now);
    }

    /// Removes all listeners and cancels every pending timer and poll.
    pub fn detach(&mut self) {
        self.recognizer.detach();
        self.engine.detach();
    }

    /// Returns `true` until detached, and only if listeners were attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.recognizer.is_attached() && self.engine.is_enabled()
    }

    /// Live scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.engine.scale()
    }

    /// Live translation.
    #[must_use]
    pub fn translate(&self) -> Vec2 {
        self.engine.translate()
    }

    /// Returns `true` while zoomed above scale 1.
    #[must_use]
    pub fn is_zoomed_in(&self) -> bool {
        self.engine.is_zoomed_in()
    }

    /// Current maximum scale.
    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.engine.max_scale()
    }

    /// The live transform.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.engine.transform()
    }

    /// The gesture recognizer.
    #[must_use]
    pub fn recognizer(&self) -> &GestureRecognizer {
        &self.recognizer
    }

    /// The transform engine.
    #[must_use]
    pub fn engine(&self) -> &TransformEngine<G> {
        &self.engine
    }

    /// Mutable access to the geometry provider.
    pub fn geometry_mut(&mut self) -> &mut G {
        self.engine.geometry_mut()
    }

    fn run(&mut self, events: &[GestureEvent]) -> Vec<EngineOutput> {
        for event in events {
            self.engine.forward(*event);
            event.dispatch(&mut self.engine);
        }
        self.recognizer.set_pan_enabled(self.engine.accepts_pan());
        self.engine.take_outputs()
    }
}
