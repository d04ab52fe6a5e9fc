// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Vec2};

/// Live and committed scale/translation of the surface.
///
/// The transform maps a surface-local point `p` to `p * scale + translate`,
/// with its origin at the surface's top-left corner. The committed values are
/// the baseline incremental gesture math starts from; they equal the live
/// values whenever no gesture is in progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformState {
    scale: f64,
    translate: Vec2,
    committed_scale: f64,
    committed_translate: Vec2,
}

impl Default for TransformState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TransformState {
    /// Scale 1, no translation, committed.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate: Vec2::ZERO,
        committed_scale: 1.0,
        committed_translate: Vec2::ZERO,
    };

    /// Live scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Live translation.
    #[must_use]
    pub fn translate(&self) -> Vec2 {
        self.translate
    }

    /// Scale at the start of the current gesture.
    #[must_use]
    pub fn committed_scale(&self) -> f64 {
        self.committed_scale
    }

    /// Translation at the start of the current gesture.
    #[must_use]
    pub fn committed_translate(&self) -> Vec2 {
        self.committed_translate
    }

    /// Returns `true` when live and committed values agree.
    #[must_use]
    pub fn is_committed(&self) -> bool {
        self.scale == self.committed_scale && self.translate == self.committed_translate
    }

    /// The live transform as an affine map from surface-local to container coordinates.
    #[must_use]
    pub fn affine(&self) -> Affine {
        self.command(0).to_affine()
    }

    /// Maps a surface-local point through the live transform.
    #[must_use]
    pub fn apply(&self, local: Point) -> Point {
        self.affine() * local
    }

    /// Command describing the live values with the given transition.
    #[must_use]
    pub fn command(&self, transition_ms: u64) -> TransformCommand {
        TransformCommand {
            scale: self.scale,
            translate: self.translate,
            transition_ms,
        }
    }

    pub(crate) fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    pub(crate) fn set_translate(&mut self, translate: Vec2) {
        self.translate = translate;
    }

    pub(crate) fn set_live(&mut self, scale: f64, translate: Vec2) {
        self.scale = scale;
        self.translate = translate;
    }

    /// Freezes the live values as the new baseline.
    pub(crate) fn commit(&mut self) {
        self.committed_scale = self.scale;
        self.committed_translate = self.translate;
    }

    /// Drops live changes, returning to the baseline.
    pub(crate) fn revert(&mut self) {
        self.scale = self.committed_scale;
        self.translate = self.committed_translate;
    }
}

/// Transform to write to the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformCommand {
    /// Uniform scale.
    pub scale: f64,
    /// Translation in container pixels.
    pub translate: Vec2,
    /// Transition length; 0 while a gesture is tracking the pointer.
    pub transition_ms: u64,
}

impl TransformCommand {
    /// Horizontal translation.
    #[must_use]
    pub fn translate_x(&self) -> f64 {
        self.translate.x
    }

    /// Vertical translation.
    #[must_use]
    pub fn translate_y(&self) -> f64 {
        self.translate.y
    }

    /// The command as an affine map (scale about the top-left corner, then translate).
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.translate) * Affine::scale(self.scale)
    }
}
