// Copyright 2025 the Cropview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use cropview_mask::CropMask;
use cropview_transform::ImageTransform;
use kurbo::{Point, Size};

use crate::event::{Contacts, PINCH_NOISE_DISTANCE, PointerEvent};
use crate::state::GestureState;

/// Smallest allowed effective scale; zoom‑out is clamped here.
pub const MIN_SCALE: f64 = 0.2;

/// Largest allowed effective scale; zoom‑in beyond it is rejected.
pub const MAX_SCALE: f64 = 10.0;

/// Effective‑scale bounds applied while zooming.
///
/// Zoom‑out below `min` resets the transform to exactly the minimum uniform
/// scale (discarding translation); zoom‑in above `max` reverts the update to
/// the gesture‑start snapshot. See
/// [`GestureController::set_scale_limits`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLimits {
    /// Lower bound, inclusive.
    pub min: f64,
    /// Upper bound, inclusive.
    pub max: f64,
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self {
            min: MIN_SCALE,
            max: MAX_SCALE,
        }
    }
}

/// What a dispatched event changed, for redraw scheduling.
///
/// Classification‑only events (contact downs, contact up) report
/// [`Damage::None`]; the embedding surface may still choose to repaint on
/// every event the way the reference view does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Damage {
    /// Nothing visible changed.
    None,
    /// The image transform changed.
    Transform,
    /// The mask rectangle changed.
    Mask,
}

/// Gesture state machine over an image transform and a crop mask.
///
/// The controller is the only mutator of either piece of state, and it only
/// ever runs one logical gesture at a time: resize wins over drag at
/// contact‑down, and a second contact converts whatever was running into a
/// pinch (or cancels a resize outright). It executes synchronously on the
/// event thread, never blocks, and performs no rendering.
#[derive(Clone, Debug, Default)]
pub struct GestureController {
    transform: ImageTransform,
    mask: CropMask,
    state: GestureState,
    limits: ScaleLimits,
    image_size: Option<Size>,
}

impl GestureController {
    /// Creates a controller with no image and identity transform.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current image transform.
    #[must_use]
    pub fn transform(&self) -> &ImageTransform {
        &self.transform
    }

    /// Returns the current crop mask.
    #[must_use]
    pub fn mask(&self) -> &CropMask {
        &self.mask
    }

    /// Returns the current gesture state.
    #[must_use]
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Sets the effective‑scale bounds.
    ///
    /// The provided range is normalized so that `min <= max`.
    pub fn set_scale_limits(&mut self, min: f64, max: f64) {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.limits = ScaleLimits { min, max };
    }

    /// Records the intrinsic size of the loaded image, or `None` when no
    /// image is loaded.
    ///
    /// Replacing the image invalidates everything derived from the previous
    /// one, so the transform, mask, and gesture state are all reset. Call
    /// [`set_layout`](Self::set_layout) afterwards to re‑establish the mask
    /// and the fitted transform.
    pub fn set_image_size(&mut self, size: Option<Size>) {
        self.image_size = size;
        self.transform = ImageTransform::IDENTITY;
        self.mask = CropMask::default();
        self.state = GestureState::Idle;
    }

    /// Re‑establishes mask and transform for a (new) viewport size.
    ///
    /// The mask is re‑centered per the layout rule and the image, if any, is
    /// re‑fitted onto the mask center. Layout during an active gesture does
    /// not try to reconcile: the in‑flight snapshot goes stale and is
    /// replaced at the next contact‑down.
    pub fn set_layout(&mut self, viewport: Size) {
        self.mask = CropMask::centered_in(viewport);
        self.transform = match self.image_size {
            Some(image) => ImageTransform::fit(image, viewport, self.mask.rect().center()),
            None => ImageTransform::IDENTITY,
        };
    }

    /// Scales about the center of the mapped image bounds.
    ///
    /// A host‑facing affordance for button‑style zoom; no‑op when no image
    /// is loaded. Unlike pinch updates, this path applies no scale clamp.
    pub fn scale_about_center(&mut self, factor: f64) -> Damage {
        let Some(image) = self.image_size else {
            return Damage::None;
        };
        let center = self.transform.mapped_rect(image).center();
        self.transform.scale_about(factor, center);
        Damage::Transform
    }

    /// Dispatches one pointer‑contact event.
    ///
    /// Returns what the event changed. The scale clamp runs after every
    /// event processed while zooming.
    pub fn on_event(&mut self, event: &PointerEvent) -> Damage {
        let damage = match event {
            PointerEvent::Down(p) => {
                self.on_down(*p);
                Damage::None
            }
            PointerEvent::SecondaryDown(contacts) => {
                self.on_secondary_down(contacts);
                Damage::None
            }
            PointerEvent::Move(contacts) => self.on_move(contacts),
            PointerEvent::Up => {
                self.state = GestureState::Idle;
                Damage::None
            }
        };
        self.clamp_scale();
        damage
    }

    /// Classifies a first contact: resize beats drag, drag requires the
    /// contact to lie on the mapped image, anything else is idle.
    fn on_down(&mut self, p: Point) {
        let edges = self.mask.hit_test(p);
        if !edges.is_empty() {
            self.state = GestureState::Resizing { edges, last: p };
        } else if self.point_on_image(p) {
            self.state = GestureState::Dragging {
                down: p,
                saved: self.transform.affine(),
            };
        } else {
            self.state = GestureState::Idle;
        }
    }

    /// Classifies a second contact as a pinch start.
    ///
    /// The pinch is recognized only when the contacts are farther apart than
    /// the noise threshold and the primary contact lies on the mapped image.
    /// An active resize is cleared either way; an active drag survives a
    /// rejected pinch and continues from its original down point.
    fn on_secondary_down(&mut self, contacts: &Contacts) {
        let [first, second] = contacts.as_slice() else {
            return;
        };
        let start_distance = (*second - *first).hypot();
        if start_distance > PINCH_NOISE_DISTANCE && self.point_on_image(*first) {
            self.state = GestureState::Zooming {
                pivot: first.midpoint(*second),
                start_distance,
                saved: self.transform.affine(),
            };
        } else if self.state.is_resizing() {
            self.state = GestureState::Idle;
        }
    }

    fn on_move(&mut self, contacts: &Contacts) -> Damage {
        let Some(&primary) = contacts.first() else {
            return Damage::None;
        };

        match &mut self.state {
            GestureState::Resizing { edges, last } => {
                let delta = primary - *last;
                self.mask.resize(*edges, delta);
                // Advance even when the resize clamped, so the next delta is
                // measured from the actual pointer position.
                *last = primary;
                Damage::Mask
            }
            GestureState::Dragging { down, saved } => {
                self.transform.set_affine(*saved);
                self.transform.translate_by(primary - *down);
                Damage::Transform
            }
            GestureState::Zooming {
                pivot,
                start_distance,
                saved,
            } => {
                let Some(&secondary) = contacts.get(1) else {
                    return Damage::None;
                };
                let distance = (secondary - primary).hypot();
                if distance <= PINCH_NOISE_DISTANCE {
                    return Damage::None;
                }
                let factor = distance / *start_distance;
                self.transform.set_affine(*saved);
                self.transform.scale_about(factor, *pivot);
                Damage::Transform
            }
            GestureState::Idle => Damage::None,
        }
    }

    /// Applies the scale bounds while a pinch is active.
    ///
    /// Below minimum resets to exactly the minimum uniform scale; above
    /// maximum reverts to the pinch‑start snapshot. The two policies are
    /// intentionally asymmetric.
    fn clamp_scale(&mut self) {
        let GestureState::Zooming { saved, .. } = self.state else {
            return;
        };
        let scale = self.transform.effective_scale();
        if scale < self.limits.min {
            self.transform.set_scale(self.limits.min);
        }
        if scale > self.limits.max {
            self.transform.set_affine(saved);
        }
    }

    fn point_on_image(&self, p: Point) -> bool {
        self.image_size
            .is_some_and(|image| self.transform.contains_point(image, p))
    }
}

#[cfg(test)]
mod tests {
    use cropview_mask::{MIN_SIZE, ResizeEdges};
    use kurbo::{Affine, Point, Size, Vec2};

    use super::{Damage, GestureController, MAX_SCALE, MIN_SCALE};
    use crate::event::PointerEvent;
    use crate::state::GestureState;

    const IMAGE: Size = Size::new(800.0, 600.0);
    const VIEWPORT: Size = Size::new(600.0, 800.0);

    /// A controller with an 800x600 image fitted into a 600x800 viewport.
    ///
    /// Fit scale is 600/800 = 0.75, so the mapped image is 600x450 centered
    /// on the mask center (300, 400): bounds [0, 600) x [175, 625).
    fn controller() -> GestureController {
        let mut c = GestureController::new();
        c.set_image_size(Some(IMAGE));
        c.set_layout(VIEWPORT);
        c
    }

    fn assert_affine_eq(a: Affine, b: Affine) {
        let (ca, cb) = (a.as_coeffs(), b.as_coeffs());
        for i in 0..6 {
            assert!(
                (ca[i] - cb[i]).abs() < 1e-9,
                "coefficient {i} differs: {ca:?} vs {cb:?}"
            );
        }
    }

    #[test]
    fn layout_fits_image_onto_mask_center() {
        let c = controller();
        assert!((c.transform().effective_scale() - 0.75).abs() < 1e-12);
        let mapped = c.transform().mapped_rect(IMAGE);
        let mask_center = c.mask().rect().center();
        assert!((mapped.center().x - mask_center.x).abs() < 1e-9);
        assert!((mapped.center().y - mask_center.y).abs() < 1e-9);
    }

    #[test]
    fn drag_translates_saved_transform_by_total_offset() {
        let mut c = controller();
        let t0 = c.transform().affine();

        c.on_event(&PointerEvent::down(Point::new(300.0, 400.0)));
        // Two moves; the result depends only on the latest point vs. the
        // down point, not on the intermediate one.
        c.on_event(&PointerEvent::moved(&[Point::new(290.0, 380.0)]));
        let damage = c.on_event(&PointerEvent::moved(&[Point::new(305.0, 412.0)]));

        assert_eq!(damage, Damage::Transform);
        assert_affine_eq(
            c.transform().affine(),
            Affine::translate(Vec2::new(5.0, 12.0)) * t0,
        );
    }

    #[test]
    fn down_off_image_stays_idle() {
        let mut c = controller();
        let t0 = c.transform().affine();

        // (300, 50) is outside the mapped image band and outside every mask
        // hit band.
        c.on_event(&PointerEvent::down(Point::new(300.0, 50.0)));
        assert_eq!(*c.state(), GestureState::Idle);
        c.on_event(&PointerEvent::moved(&[Point::new(350.0, 90.0)]));
        assert_affine_eq(c.transform().affine(), t0);
    }

    #[test]
    fn down_without_image_never_drags() {
        let mut c = GestureController::new();
        c.set_layout(VIEWPORT);
        c.on_event(&PointerEvent::down(Point::new(300.0, 400.0)));
        assert_eq!(*c.state(), GestureState::Idle);
    }

    #[test]
    fn edge_hit_wins_over_drag() {
        let mut c = controller();
        // (105, 400) lies on the mapped image *and* within the left edge
        // band of the mask [100, 500] x [200, 600].
        let down = Point::new(105.0, 400.0);
        assert!(c.transform().contains_point(IMAGE, down));

        c.on_event(&PointerEvent::down(down));
        assert_eq!(
            *c.state(),
            GestureState::Resizing {
                edges: ResizeEdges::LEFT,
                last: down,
            }
        );
    }

    #[test]
    fn corner_resize_moves_both_edges_per_move_delta() {
        let mut c = controller();
        let mask0 = c.mask().rect();
        let down = Point::new(mask0.x0 + 5.0, mask0.y0 - 5.0);

        c.on_event(&PointerEvent::down(down));
        assert!(c.state().is_resizing());

        let damage = c.on_event(&PointerEvent::moved(&[down + Vec2::new(-12.0, 7.0)]));
        assert_eq!(damage, Damage::Mask);
        let r = c.mask().rect();
        assert!((r.x0 - (mask0.x0 - 12.0)).abs() < 1e-12);
        assert!((r.y0 - (mask0.y0 + 7.0)).abs() < 1e-12);
        assert_eq!(r.x1, mask0.x1);
        assert_eq!(r.y1, mask0.y1);
    }

    #[test]
    fn resize_deltas_are_incremental_across_clamp() {
        let mut c = controller();
        let mask0 = c.mask().rect();
        let down = Point::new(mask0.x0 + 5.0, mask0.center().y);

        c.on_event(&PointerEvent::down(down));
        // Push the left edge way past the minimum; it pins.
        c.on_event(&PointerEvent::moved(&[Point::new(mask0.x1, down.y)]));
        assert_eq!(c.mask().rect().x0, mask0.x1 - MIN_SIZE);

        // Moving back 10 px must apply exactly -10 from the *pointer*
        // position, not from the pinned edge.
        c.on_event(&PointerEvent::moved(&[Point::new(mask0.x1 - 10.0, down.y)]));
        assert_eq!(c.mask().rect().x0, mask0.x1 - MIN_SIZE - 10.0);
    }

    #[test]
    fn pinch_scales_about_midpoint_by_distance_ratio() {
        let mut c = controller();
        let saved = c.transform().affine();

        c.on_event(&PointerEvent::down(Point::new(80.0, 400.0)));
        c.on_event(&PointerEvent::secondary_down(
            Point::new(80.0, 400.0),
            Point::new(120.0, 400.0),
        ));
        assert!(c.state().is_zooming());

        // Distance grows 40 -> 80: a 2x zoom about (100, 400).
        let damage = c.on_event(&PointerEvent::moved(&[
            Point::new(60.0, 400.0),
            Point::new(140.0, 400.0),
        ]));
        assert_eq!(damage, Damage::Transform);

        let pivot = Vec2::new(100.0, 400.0);
        let expected = Affine::translate(pivot)
            * Affine::scale(2.0)
            * Affine::translate(-pivot)
            * saved;
        assert_affine_eq(c.transform().affine(), expected);
    }

    #[test]
    fn pinch_below_noise_threshold_is_not_a_zoom() {
        let mut c = controller();
        c.on_event(&PointerEvent::down(Point::new(300.0, 400.0)));
        c.on_event(&PointerEvent::secondary_down(
            Point::new(300.0, 400.0),
            Point::new(306.0, 400.0),
        ));
        // The drag from the first contact survives.
        assert!(matches!(*c.state(), GestureState::Dragging { .. }));
    }

    #[test]
    fn pinch_off_image_is_not_a_zoom() {
        let mut c = controller();
        c.on_event(&PointerEvent::down(Point::new(300.0, 50.0)));
        c.on_event(&PointerEvent::secondary_down(
            Point::new(300.0, 50.0),
            Point::new(400.0, 50.0),
        ));
        assert_eq!(*c.state(), GestureState::Idle);
    }

    #[test]
    fn second_contact_clears_active_resize() {
        let mut c = controller();
        let mask0 = c.mask().rect();
        c.on_event(&PointerEvent::down(Point::new(mask0.x0, mask0.center().y)));
        assert!(c.state().is_resizing());

        // Second contact too close to pinch: the resize is cancelled, not
        // continued.
        c.on_event(&PointerEvent::secondary_down(
            Point::new(mask0.x0, mask0.center().y),
            Point::new(mask0.x0 + 4.0, mask0.center().y),
        ));
        assert_eq!(*c.state(), GestureState::Idle);
        c.on_event(&PointerEvent::moved(&[Point::new(mask0.x0 + 50.0, mask0.center().y)]));
        assert_eq!(c.mask().rect(), mask0);
    }

    #[test]
    fn second_contact_converts_resize_into_zoom() {
        let mut c = controller();
        let mask0 = c.mask().rect();
        let first = Point::new(mask0.x0 + 5.0, mask0.center().y);
        c.on_event(&PointerEvent::down(first));
        assert!(c.state().is_resizing());

        c.on_event(&PointerEvent::secondary_down(first, first + Vec2::new(60.0, 0.0)));
        assert!(c.state().is_zooming());
    }

    #[test]
    fn sub_threshold_pinch_move_leaves_transform_unchanged() {
        let mut c = controller();
        c.on_event(&PointerEvent::down(Point::new(280.0, 400.0)));
        c.on_event(&PointerEvent::secondary_down(
            Point::new(280.0, 400.0),
            Point::new(320.0, 400.0),
        ));
        let before = c.transform().affine();

        let damage = c.on_event(&PointerEvent::moved(&[
            Point::new(300.0, 400.0),
            Point::new(308.0, 400.0),
        ]));
        assert_eq!(damage, Damage::None);
        assert_affine_eq(c.transform().affine(), before);
    }

    #[test]
    fn zoom_below_minimum_clamps_to_exact_minimum_scale() {
        let mut c = controller();
        c.on_event(&PointerEvent::down(Point::new(200.0, 400.0)));
        c.on_event(&PointerEvent::secondary_down(
            Point::new(200.0, 400.0),
            Point::new(400.0, 400.0),
        ));
        // Distance collapses 200 -> 20; 0.75 * 0.1 = 0.075 < MIN_SCALE.
        c.on_event(&PointerEvent::moved(&[
            Point::new(290.0, 400.0),
            Point::new(310.0, 400.0),
        ]));

        // The clamp resets the whole transform, translation included.
        assert_eq!(c.transform().affine(), Affine::scale(MIN_SCALE));
    }

    #[test]
    fn zoom_above_maximum_reverts_to_saved() {
        let mut c = controller();
        let saved = c.transform().affine();
        c.on_event(&PointerEvent::down(Point::new(295.0, 400.0)));
        c.on_event(&PointerEvent::secondary_down(
            Point::new(295.0, 400.0),
            Point::new(305.0, 400.0),
        ));
        // Exactly the noise threshold apart: not a pinch.
        assert!(!c.state().is_zooming());

        c.on_event(&PointerEvent::secondary_down(
            Point::new(294.0, 400.0),
            Point::new(306.0, 400.0),
        ));
        assert!(c.state().is_zooming());

        // Distance grows 12 -> 400, factor ~33: 0.75 * 33 > MAX_SCALE.
        c.on_event(&PointerEvent::moved(&[
            Point::new(100.0, 400.0),
            Point::new(500.0, 400.0),
        ]));
        assert_affine_eq(c.transform().affine(), saved);
        assert!(c.transform().effective_scale() <= MAX_SCALE);
    }

    #[test]
    fn zoom_move_with_one_contact_is_ignored() {
        let mut c = controller();
        c.on_event(&PointerEvent::down(Point::new(280.0, 400.0)));
        c.on_event(&PointerEvent::secondary_down(
            Point::new(280.0, 400.0),
            Point::new(320.0, 400.0),
        ));
        let before = c.transform().affine();
        let damage = c.on_event(&PointerEvent::moved(&[Point::new(300.0, 400.0)]));
        assert_eq!(damage, Damage::None);
        assert_affine_eq(c.transform().affine(), before);
    }

    #[test]
    fn up_resets_to_idle_from_any_state() {
        let mut c = controller();
        c.on_event(&PointerEvent::down(Point::new(300.0, 400.0)));
        assert!(matches!(*c.state(), GestureState::Dragging { .. }));
        c.on_event(&PointerEvent::up());
        assert_eq!(*c.state(), GestureState::Idle);

        let mask0 = c.mask().rect();
        c.on_event(&PointerEvent::down(Point::new(mask0.x0, mask0.center().y)));
        assert!(c.state().is_resizing());
        c.on_event(&PointerEvent::up());
        assert_eq!(*c.state(), GestureState::Idle);
    }

    #[test]
    fn new_gesture_resnapshots_after_layout_change() {
        let mut c = controller();
        c.on_event(&PointerEvent::down(Point::new(300.0, 400.0)));
        // Layout change mid-gesture: authoritative re-init.
        c.set_layout(Size::new(400.0, 400.0));
        let refit = c.transform().affine();

        // The next down snapshots the fresh transform, so a drag is relative
        // to the re-initialized state.
        let mask_center = c.mask().rect().center();
        c.on_event(&PointerEvent::down(mask_center));
        c.on_event(&PointerEvent::moved(&[mask_center + Vec2::new(9.0, -2.0)]));
        assert_affine_eq(
            c.transform().affine(),
            Affine::translate(Vec2::new(9.0, -2.0)) * refit,
        );
    }

    #[test]
    fn set_image_size_resets_everything() {
        let mut c = controller();
        c.on_event(&PointerEvent::down(Point::new(300.0, 400.0)));
        c.on_event(&PointerEvent::moved(&[Point::new(350.0, 420.0)]));

        c.set_image_size(Some(Size::new(320.0, 200.0)));
        assert_eq!(*c.state(), GestureState::Idle);
        assert_eq!(c.transform().affine(), Affine::IDENTITY);
        assert_eq!(c.mask().rect().area(), 0.0);
    }

    #[test]
    fn scale_limits_are_normalized() {
        let mut c = controller();
        c.set_scale_limits(8.0, 0.5);
        c.on_event(&PointerEvent::down(Point::new(200.0, 400.0)));
        c.on_event(&PointerEvent::secondary_down(
            Point::new(200.0, 400.0),
            Point::new(400.0, 400.0),
        ));
        c.on_event(&PointerEvent::moved(&[
            Point::new(280.0, 400.0),
            Point::new(320.0, 400.0),
        ]));
        // 0.75 / 5 = 0.15 < 0.5 minimum: clamped to the normalized minimum.
        assert_eq!(c.transform().affine(), Affine::scale(0.5));
    }

    #[test]
    fn scale_about_center_keeps_mapped_center_fixed() {
        let mut c = controller();
        let center = c.transform().mapped_rect(IMAGE).center();
        let damage = c.scale_about_center(1.5);
        assert_eq!(damage, Damage::Transform);
        let after = c.transform().mapped_rect(IMAGE).center();
        assert!((after.x - center.x).abs() < 1e-9);
        assert!((after.y - center.y).abs() < 1e-9);
        assert!((c.transform().effective_scale() - 1.125).abs() < 1e-12);
    }

    #[test]
    fn scale_about_center_without_image_is_noop() {
        let mut c = GestureController::new();
        c.set_layout(VIEWPORT);
        assert_eq!(c.scale_about_center(2.0), Damage::None);
        assert_eq!(c.transform().affine(), Affine::IDENTITY);
    }
}
