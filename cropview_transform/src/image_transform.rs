// Copyright 2025 the Cropview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Affine placement of an image in view space.
///
/// `ImageTransform` wraps a [`kurbo::Affine`] that is constrained, by
/// construction, to a uniform scale followed by a translation. All mutators
/// preserve that constraint, which is what makes
/// [`effective_scale`](Self::effective_scale) and
/// [`contains_point`](Self::contains_point) valid.
///
/// The transform maps image‑space coordinates (origin at the image's top‑left
/// corner, units of source pixels) to view/device coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageTransform {
    affine: Affine,
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ImageTransform {
    /// The identity placement: image pixels map 1:1 onto view pixels.
    pub const IDENTITY: Self = Self {
        affine: Affine::IDENTITY,
    };

    /// Computes the initial placement of an image inside a viewport.
    ///
    /// The uniform scale is chosen so that the image's longer dimension fills
    /// the corresponding viewport dimension: a landscape image fills the
    /// viewport width, a portrait (or square) image fills the viewport
    /// height. The branch compares the *image's* width against its height,
    /// not the viewport's. The scaled image is then translated so its center
    /// coincides with `center` (typically the crop window center).
    ///
    /// The result is deterministic: identical arguments yield bit‑identical
    /// coefficients.
    #[must_use]
    pub fn fit(image: Size, viewport: Size, center: Point) -> Self {
        let scale = if image.width > image.height {
            viewport.width / image.width
        } else {
            viewport.height / image.height
        };
        let dx = center.x - image.width * scale * 0.5;
        let dy = center.y - image.height * scale * 0.5;
        Self {
            affine: Affine::translate(Vec2::new(dx, dy)) * Affine::scale(scale),
        }
    }

    /// Returns the wrapped affine, for rendering or crop extraction.
    #[must_use]
    pub fn affine(&self) -> Affine {
        self.affine
    }

    /// Replaces the wrapped affine wholesale.
    ///
    /// The caller is responsible for keeping the uniform scale + translation
    /// constraint; this is intended for restoring a previously observed
    /// transform (for example a gesture‑start snapshot).
    pub fn set_affine(&mut self, affine: Affine) {
        self.affine = affine;
    }

    /// Post‑composes a translation by `delta` in view space.
    pub fn translate_by(&mut self, delta: Vec2) {
        self.affine = Affine::translate(delta) * self.affine;
    }

    /// Post‑composes a uniform scale by `factor` centered at `pivot`.
    ///
    /// The pivot stays fixed in view space; everything else moves toward or
    /// away from it. Used for pinch‑zoom and for button‑style zoom about the
    /// mapped image center.
    pub fn scale_about(&mut self, factor: f64, pivot: Point) {
        let pivot = pivot.to_vec2();
        self.affine = Affine::translate(pivot)
            * Affine::scale(factor)
            * Affine::translate(-pivot)
            * self.affine;
    }

    /// Resets to an absolute uniform scale about the view origin.
    ///
    /// Any accumulated translation is discarded. The minimum‑scale clamp
    /// depends on exactly these semantics.
    pub fn set_scale(&mut self, scale: f64) {
        self.affine = Affine::scale(scale);
    }

    /// The effective uniform scale factor.
    ///
    /// Reads the larger of the absolute X/Y diagonal coefficients. Under the
    /// uniform scale + translation constraint the two are equal up to
    /// floating‑point asymmetry introduced by repeated composition, and
    /// taking the maximum tolerates that drift.
    #[must_use]
    pub fn effective_scale(&self) -> f64 {
        let [a, _, _, d, _, _] = self.affine.as_coeffs();
        a.abs().max(d.abs())
    }

    /// The translation components of the transform, in view space.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.affine.translation()
    }

    /// The mapped bounds of an `image`‑sized rect anchored at the origin.
    #[must_use]
    pub fn mapped_rect(&self, image: Size) -> Rect {
        map_rect(self.affine, image.to_rect())
    }

    /// Returns `true` if the view‑space point `p` lies on the mapped image.
    ///
    /// The mapped bounds are reconstructed from the translation components
    /// and `image` scaled by [`effective_scale`](Self::effective_scale),
    /// rather than by inverse‑mapping `p`. The approximation is exact for
    /// uniform scale + translation transforms. Containment is min‑edge
    /// inclusive and max‑edge exclusive.
    #[must_use]
    pub fn contains_point(&self, image: Size, p: Point) -> bool {
        let t = self.affine.translation();
        let scale = self.effective_scale();
        let width = image.width * scale;
        let height = image.height * scale;
        p.x >= t.x && p.x < t.x + width && p.y >= t.y && p.y < t.y + height
    }

    /// Re‑centers the mapped image within `viewport`, per axis.
    ///
    /// For each enabled axis: if the mapped image is smaller than the
    /// viewport it is centered; otherwise the nearer edge is pulled flush so
    /// no gap is left between the image and the viewport boundary.
    ///
    /// This is a utility operation. No gesture path invokes it; hosts may
    /// call it after programmatic transform changes.
    pub fn center_in(&mut self, image: Size, viewport: Size, horizontal: bool, vertical: bool) {
        let rect = self.mapped_rect(image);

        let mut delta = Vec2::ZERO;

        if horizontal {
            if rect.width() < viewport.width {
                delta.x = (viewport.width - rect.width()) / 2.0 - rect.x0;
            } else if rect.x0 > 0.0 {
                delta.x = -rect.x0;
            } else if rect.x1 < viewport.width {
                delta.x = viewport.width - rect.x1;
            }
        }

        if vertical {
            if rect.height() < viewport.height {
                delta.y = (viewport.height - rect.height()) / 2.0 - rect.y0;
            } else if rect.y0 > 0.0 {
                delta.y = -rect.y0;
            } else if rect.y1 < viewport.height {
                delta.y = viewport.height - rect.y1;
            }
        }

        if delta != Vec2::ZERO {
            self.translate_by(delta);
        }
    }
}

/// Maps an axis‑aligned rectangle through `affine` and returns the
/// axis‑aligned bounding box of the four mapped corners.
///
/// Taking the corner‑wise min/max is conservative: it remains correct even
/// for transforms that would not keep the rect axis‑aligned, although the
/// transforms used by this workspace are always scale + translate.
#[must_use]
pub fn map_rect(affine: Affine, rect: Rect) -> Rect {
    let p0 = affine * Point::new(rect.x0, rect.y0);
    let p1 = affine * Point::new(rect.x1, rect.y0);
    let p2 = affine * Point::new(rect.x0, rect.y1);
    let p3 = affine * Point::new(rect.x1, rect.y1);
    let min_x = p0.x.min(p1.x).min(p2.x).min(p3.x);
    let min_y = p0.y.min(p1.y).min(p2.y).min(p3.y);
    let max_x = p0.x.max(p1.x).max(p2.x).max(p3.x);
    let max_y = p0.y.max(p1.y).max(p2.y).max(p3.y);
    Rect::new(min_x, min_y, max_x, max_y)
}
