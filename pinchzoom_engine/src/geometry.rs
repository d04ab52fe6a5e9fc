// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size};

/// Natural and rendered dimensions of the displayed image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageMetrics {
    /// Intrinsic pixel size of the image source.
    pub natural: Size,
    /// Laid-out size of the image element at scale 1.
    pub rendered: Size,
}

impl ImageMetrics {
    /// Creates metrics from natural and rendered sizes.
    #[must_use]
    pub const fn new(natural: Size, rendered: Size) -> Self {
        Self { natural, rendered }
    }

    /// Scale at which the image is displayed at its natural resolution.
    ///
    /// Returns `None` until both widths are known.
    #[must_use]
    pub fn natural_scale(&self) -> Option<f64> {
        if self.natural.width > 0.0 && self.rendered.width > 0.0 {
            Some(self.natural.width / self.rendered.width)
        } else {
            None
        }
    }
}

/// Surface measurements supplied by the host.
///
/// The engine queries this on demand and never caches the answers, so
/// implementations should report the current layout.
pub trait GeometryProvider {
    /// Untransformed layout rectangle of the surface in client coordinates.
    fn bounding_rect(&self) -> Rect;

    /// Layout (offset) size of the surface.
    fn surface_size(&self) -> Size {
        self.bounding_rect().size()
    }

    /// Size of the visible container the surface is clipped to.
    fn viewport_size(&self) -> Size {
        self.surface_size()
    }

    /// Metrics of the displayed image, or `None` while no image is present.
    fn image(&self) -> Option<ImageMetrics>;

    /// Centre of the surface in surface-local coordinates.
    fn surface_center(&self) -> Point {
        let size = self.surface_size();
        Point::new(size.width / 2.0, size.height / 2.0)
    }
}

/// A [`GeometryProvider`] holding fixed measurements.
///
/// Useful for hosts that push layout changes explicitly, and for tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedGeometry {
    /// Layout rectangle of the surface.
    pub rect: Rect,
    /// Container size; the surface size when `None`.
    pub viewport: Option<Size>,
    /// Image metrics, once an image is displayed.
    pub image: Option<ImageMetrics>,
}

impl FixedGeometry {
    /// A surface at `rect` with no image yet.
    #[must_use]
    pub const fn new(rect: Rect) -> Self {
        Self {
            rect,
            viewport: None,
            image: None,
        }
    }

    /// A surface at `rect` showing an image that fills it exactly.
    #[must_use]
    pub fn filled(rect: Rect, natural: Size) -> Self {
        Self::new(rect).with_image(ImageMetrics::new(natural, rect.size()))
    }

    /// Sets the image metrics.
    #[must_use]
    pub fn with_image(mut self, image: ImageMetrics) -> Self {
        self.image = Some(image);
        self
    }

    /// Sets the container size.
    #[must_use]
    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = Some(viewport);
        self
    }
}

impl GeometryProvider for FixedGeometry {
    fn bounding_rect(&self) -> Rect {
        self.rect
    }

    fn viewport_size(&self) -> Size {
        self.viewport.unwrap_or_else(|| self.surface_size())
    }

    fn image(&self) -> Option<ImageMetrics> {
        self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_scale_needs_both_widths() {
        let pending = ImageMetrics::new(Size::ZERO, Size::new(400.0, 300.0));
        assert_eq!(pending.natural_scale(), None);
        let loaded = ImageMetrics::new(Size::new(1200.0, 900.0), Size::new(400.0, 300.0));
        assert_eq!(loaded.natural_scale(), Some(3.0));
    }

    #[test]
    fn fixed_geometry_defaults_viewport_to_surface() {
        let g = FixedGeometry::new(Rect::new(10.0, 20.0, 410.0, 320.0));
        assert_eq!(g.surface_size(), Size::new(400.0, 300.0));
        assert_eq!(g.viewport_size(), Size::new(400.0, 300.0));
        assert_eq!(g.surface_center(), Point::new(200.0, 150.0));
        let g = g.with_viewport(Size::new(200.0, 100.0));
        assert_eq!(g.viewport_size(), Size::new(200.0, 100.0));
    }
}
