// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::fmt;

use pinchzoom_gesture::ListenerMode;

/// Maximum scale used until (or unless) a zoom limit is resolved.
pub const DEFAULT_MAX_SCALE: f64 = 3.0;

/// Upper bound policy for the scale.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZoomLimit {
    /// A literal maximum scale.
    Fixed(f64),
    /// Allow zooming until the image is shown at its natural resolution.
    ///
    /// Resolved asynchronously once the image reports both its natural and
    /// rendered width; [`DEFAULT_MAX_SCALE`] applies until then.
    #[default]
    NaturalSize,
    /// No upper bound.
    Unbounded,
}

/// Engine configuration. Immutable once the engine is attached.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PinchZoomConfig {
    /// Duration of settle transitions (release, reset, toggle), in ms.
    pub transition_duration_ms: u64,
    /// Whether a double tap toggles zoom.
    pub double_tap: bool,
    /// Scale factor applied by a double tap.
    pub double_tap_scale: f64,
    /// Maximum scale policy.
    pub limit_zoom: ZoomLimit,
    /// Snap back to scale 1 whenever a pinch is released.
    pub auto_zoom_out: bool,
    /// Extra scale added by the zoom control (`toggle_zoom` without an origin).
    pub zoom_control_scale: f64,
    /// Disable panning entirely.
    pub disable_pan: bool,
    /// Clamp translation during gestures so no blank space appears at the edges.
    pub limit_pan: bool,
    /// Panning is only accepted at or above this scale.
    pub min_pan_scale: f64,
    /// Scale floor; pinching at or below it is clamped.
    pub min_scale: f64,
    /// Whether the scroll wheel zooms.
    pub wheel: bool,
    /// Scale step per wheel event.
    pub wheel_zoom_factor: f64,
    /// Listener selection.
    pub listeners: ListenerMode,
    /// Attach in a disabled state.
    pub disabled: bool,
    /// Interval between natural-size polls, in ms.
    pub natural_size_poll_ms: u64,
    /// Give up natural-size resolution after this long, in ms.
    pub natural_size_timeout_ms: u64,
}

impl Default for PinchZoomConfig {
    fn default() -> Self {
        Self {
            transition_duration_ms: 200,
            double_tap: true,
            double_tap_scale: 2.0,
            limit_zoom: ZoomLimit::NaturalSize,
            auto_zoom_out: false,
            zoom_control_scale: 1.0,
            disable_pan: false,
            limit_pan: false,
            min_pan_scale: 1.0001,
            min_scale: 0.0,
            wheel: true,
            wheel_zoom_factor: 0.2,
            listeners: ListenerMode::Auto,
            disabled: false,
            natural_size_poll_ms: 10,
            natural_size_timeout_ms: 10_000,
        }
    }
}

/// A configuration field holding an unusable value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfigError {
    /// Name of the offending field.
    pub field: &'static str,
    /// The rejected value.
    pub value: f64,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value {} for `{}`", self.value, self.field)
    }
}

impl core::error::Error for ConfigError {}

impl PinchZoomConfig {
    /// Returns the first unusable field, if any.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.problems().first() {
            Some(err) => Err(*err),
            None => Ok(()),
        }
    }

    /// Replaces every unusable field with its default, returning what was replaced.
    #[must_use]
    pub fn sanitized(mut self) -> (Self, Vec<ConfigError>) {
        let problems = self.problems();
        let defaults = Self::default();
        for problem in &problems {
            match problem.field {
                "limit_zoom" => self.limit_zoom = defaults.limit_zoom,
                "double_tap_scale" => self.double_tap_scale = defaults.double_tap_scale,
                "zoom_control_scale" => self.zoom_control_scale = defaults.zoom_control_scale,
                "min_pan_scale" => self.min_pan_scale = defaults.min_pan_scale,
                "min_scale" => self.min_scale = defaults.min_scale,
                "wheel_zoom_factor" => self.wheel_zoom_factor = defaults.wheel_zoom_factor,
                "natural_size_poll_ms" => {
                    self.natural_size_poll_ms = defaults.natural_size_poll_ms;
                }
                _ => {}
            }
        }
        (self, problems)
    }

    fn problems(&self) -> Vec<ConfigError> {
        let mut out = Vec::new();
        let mut check = |field: &'static str, value: f64, ok: bool| {
            if !ok {
                out.push(ConfigError { field, value });
            }
        };
        if let ZoomLimit::Fixed(limit) = self.limit_zoom {
            check("limit_zoom", limit, limit.is_finite() && limit > 0.0);
        }
        let s = self.double_tap_scale;
        check("double_tap_scale", s, s.is_finite() && s > 0.0);
        let s = self.zoom_control_scale;
        check("zoom_control_scale", s, s.is_finite() && s >= 0.0);
        let s = self.min_pan_scale;
        check("min_pan_scale", s, s.is_finite() && s >= 0.0);
        let s = self.min_scale;
        check("min_scale", s, s.is_finite() && s >= 0.0);
        let s = self.wheel_zoom_factor;
        check("wheel_zoom_factor", s, s.is_finite() && s > 0.0);
        check(
            "natural_size_poll_ms",
            0.0,
            self.natural_size_poll_ms > 0,
        );
        out
    }
}
