// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zoom and pan clamping.
//!
//! All functions here are pure: they take the live values and the current
//! measurements and return the clamped result. Sizes are in surface pixels at
//! scale 1; translations are in container pixels.

use kurbo::{Point, Size, Vec2};

/// Clamps one axis of the translation so no blank space shows at its edges.
///
/// When the scaled image is narrower than the viewport the image is centred
/// instead. Otherwise the near edge may not move inwards past the viewport
/// edge and the far edge may not retreat past the opposite one.
#[must_use]
pub fn limit_pan_axis(translate: f64, scale: f64, image: f64, surface: f64, viewport: f64) -> f64 {
    let scaled = image * scale;
    if scaled < viewport {
        return (viewport - surface * scale) / 2.0;
    }
    let offset = (image - surface) * scale / 2.0;
    let far = -(scaled + offset.abs() - viewport);
    if translate > offset {
        offset
    } else if translate < far {
        far
    } else {
        translate
    }
}

/// Applies [`limit_pan_axis`] to both axes.
#[must_use]
pub fn limit_pan(translate: Vec2, scale: f64, image: Size, surface: Size, viewport: Size) -> Vec2 {
    Vec2::new(
        limit_pan_axis(translate.x, scale, image.width, surface.width, viewport.width),
        limit_pan_axis(translate.y, scale, image.height, surface.height, viewport.height),
    )
}

/// Clamps `scale` into `(min, max]`, rescaling the translation so the
/// relative pan position is kept.
///
/// A scale at or below `min` becomes the smallest value strictly above it,
/// and never less than [`f64::EPSILON`], so the result is always positive.
/// Returns `None` when the scale is already within bounds. The pan ratio on
/// each axis is `translate / (image * scale - image)`; an axis whose
/// denominator is zero (scale 1) keeps ratio 0.
#[must_use]
pub fn limit_zoom(
    scale: f64,
    translate: Vec2,
    image: Size,
    min: f64,
    max: f64,
) -> Option<(f64, Vec2)> {
    let clamped = if scale > max {
        max
    } else if scale <= min {
        min.next_up().max(f64::EPSILON)
    } else {
        return None;
    };
    let ratio = |t: f64, extent: f64| {
        let span = extent * scale - extent;
        if span == 0.0 { 0.0 } else { t / span }
    };
    let rx = ratio(translate.x, image.width);
    let ry = ratio(translate.y, image.height);
    let translate = Vec2::new(
        rx * (image.width * clamped - image.width),
        ry * (image.height * clamped - image.height),
    );
    Some((clamped, translate))
}

/// Scale a wheel notch moves to from `committed`, or `None` if it would leave `[1, max]`.
///
/// Results within one step of 1 or of `max` snap to exactly that bound.
#[must_use]
pub fn wheel_target(committed: f64, zoom_in: bool, step: f64, max: f64) -> Option<f64> {
    let mut scale = if zoom_in {
        committed + step
    } else {
        committed - step
    };
    if scale < 1.0 + step {
        scale = 1.0;
    } else if scale < max && scale > max - step {
        scale = max;
    }
    if scale < 1.0 || scale > max {
        return None;
    }
    Some(scale)
}

/// Translation that keeps `focus` stationary when scaling by `ratio` from `committed`.
///
/// `focus` is measured in the untransformed surface, that is the surface-local
/// point minus the committed translation.
#[must_use]
pub fn zoom_about(committed: Vec2, focus: Vec2, ratio: f64) -> Vec2 {
    committed - (focus * ratio - focus)
}

/// Ratio between the current and initial contact distance. A zero initial distance counts as 1.
#[must_use]
pub fn pinch_ratio(initial_distance: f64, contacts: [Point; 2]) -> f64 {
    let distance = contacts[0].distance(contacts[1]);
    if initial_distance == 0.0 {
        distance
    } else {
        distance / initial_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE: Size = Size::new(400.0, 300.0);

    #[test]
    fn small_image_is_centred() {
        let t = limit_pan_axis(-50.0, 0.5, 400.0, 400.0, 400.0);
        assert_eq!(t, 100.0);
    }

    #[test]
    fn overflowing_image_cannot_leave_a_gap() {
        // Scaled width 800 in a 400 viewport: translate must stay in [-400, 0].
        assert_eq!(limit_pan_axis(30.0, 2.0, 400.0, 400.0, 400.0), 0.0);
        assert_eq!(limit_pan_axis(-500.0, 2.0, 400.0, 400.0, 400.0), -400.0);
        assert_eq!(limit_pan_axis(-120.0, 2.0, 400.0, 400.0, 400.0), -120.0);
    }

    #[test]
    fn image_narrower_than_surface_uses_centred_offset() {
        // 200 wide image centred in a 400 surface, shown at 4x in a 400 viewport.
        let offset = (200.0 - 400.0) * 4.0 / 2.0;
        assert_eq!(limit_pan_axis(0.0, 4.0, 200.0, 400.0, 400.0), offset);
        let far = -(800.0 + 400.0 - 400.0);
        assert_eq!(limit_pan_axis(-2_000.0, 4.0, 200.0, 400.0, 400.0), far);
    }

    #[test]
    fn zoom_over_max_keeps_pan_ratio() {
        let (scale, t) = limit_zoom(4.0, Vec2::new(-600.0, -450.0), IMAGE, 0.0, 3.0).unwrap();
        assert_eq!(scale, 3.0);
        assert_eq!(t, Vec2::new(-400.0, -300.0));
    }

    #[test]
    fn zoom_within_bounds_is_untouched() {
        assert!(limit_zoom(2.0, Vec2::ZERO, IMAGE, 0.0, 3.0).is_none());
        assert!(limit_zoom(3.0, Vec2::ZERO, IMAGE, 0.0, 3.0).is_none());
    }

    #[test]
    fn zoom_at_floor_clamps_without_dividing_by_zero() {
        let (scale, t) = limit_zoom(1.0, Vec2::new(10.0, 10.0), IMAGE, 1.0, 3.0).unwrap();
        assert!(scale > 1.0 && scale - 1.0 < 1e-12);
        assert_eq!(t, Vec2::ZERO);
    }

    #[test]
    fn zero_floor_never_yields_zero_scale() {
        let (scale, t) = limit_zoom(0.0, Vec2::new(-50.0, -20.0), IMAGE, 0.0, 3.0).unwrap();
        assert_eq!(scale, f64::EPSILON);
        assert!(t.x.is_finite() && t.y.is_finite());
    }

    #[test]
    fn wheel_snaps_near_bounds() {
        assert_eq!(wheel_target(2.65, true, 0.2, 3.0), Some(3.0));
        assert_eq!(wheel_target(1.25, false, 0.2, 3.0), Some(1.0));
        assert_eq!(wheel_target(1.0, true, 0.2, 3.0), Some(1.2));
        assert_eq!(wheel_target(3.0, true, 0.2, 3.0), None);
        assert_eq!(wheel_target(2.0, true, 0.2, f64::INFINITY), Some(2.2));
    }

    #[test]
    fn zoom_about_keeps_focus_fixed() {
        let focus = Vec2::new(100.0, 80.0);
        let t = zoom_about(Vec2::ZERO, focus, 2.0);
        assert_eq!(focus * 2.0 + t, focus);
    }

    #[test]
    fn pinch_ratio_handles_zero_initial_distance() {
        let pair = [Point::new(0.0, 0.0), Point::new(30.0, 40.0)];
        assert_eq!(pinch_ratio(25.0, pair), 2.0);
        assert_eq!(pinch_ratio(0.0, pair), 50.0);
    }
}
