// Copyright 2025 the Cropview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cropview Surface: the adapter between a host surface and the crop engine.
//!
//! A host embeds [`CropSurface`] and wires three things into it:
//! - **Layout**: [`CropSurface::set_viewport`] whenever the surface is
//!   (re)sized. This re‑centers the crop mask and re‑fits the image.
//! - **Image lifecycle**: [`CropSurface::set_image`] with a decoded,
//!   viewport‑bounded [`ImageBuffer`]. Replacing the image resets all
//!   transform, mask, and gesture state; nothing derived from the previous
//!   image survives.
//! - **Input**: [`CropSurface::pointer_event`] for every pointer‑contact
//!   event. The returned [`Damage`] says what changed; the reference
//!   implementation simply repainted after every event, and hosts are free
//!   to do the same.
//!
//! For painting, the host reads [`CropSurface::render_state`]: the image
//! transform, the mask rectangle, the scrim color for the area outside the
//! mask, and the mask border styling. The surface itself never draws.
//!
//! Cropping ([`CropSurface::crop`]) is synchronous and allocation‑heavy; it
//! is intended for explicit user actions and must not race an in‑flight
//! gesture, so hosts should disable the action or accept the latest
//! transform snapshot.

use kurbo::{Affine, Rect, Size};
use peniko::Color;

use cropview_raster::extract_crop;

pub use cropview_gesture::{Damage, GestureController, PointerEvent};
pub use cropview_raster::ImageBuffer;

/// Stroke width of the mask border, in view pixels.
pub const MASK_STROKE_WIDTH: f64 = 8.0;

/// A crop request could not produce pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CropError {
    /// No image has been loaded into the surface.
    #[error("no image loaded")]
    NoImage,
}

/// Everything a renderer needs to paint one frame of the crop view.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderState {
    /// Transform placing the image in view space.
    pub transform: Affine,
    /// The crop window rectangle in view space.
    pub mask: Rect,
    /// Translucent scrim painted over the view *outside* the mask.
    pub scrim: Color,
    /// Color of the mask border stroke.
    pub border_color: Color,
    /// Width of the mask border stroke in view pixels.
    pub border_width: f64,
}

/// Composition of the gesture controller, the loaded image, and the
/// viewport bookkeeping a host surface needs.
///
/// All methods execute synchronously on the caller's thread; the type has
/// no interior concurrency and no rendering capability.
#[derive(Debug, Default)]
pub struct CropSurface {
    controller: GestureController,
    image: Option<ImageBuffer>,
    viewport: Option<Size>,
}

impl CropSurface {
    /// Creates an empty surface with no image and no viewport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the gesture controller, for state inspection.
    #[must_use]
    pub fn controller(&self) -> &GestureController {
        &self.controller
    }

    /// The currently loaded image, if any.
    #[must_use]
    pub fn image(&self) -> Option<&ImageBuffer> {
        self.image.as_ref()
    }

    /// Records the surface size, re‑centering the mask and re‑fitting the
    /// image.
    ///
    /// A repeated call with the unchanged size is a no‑op, so hosts can
    /// forward every layout pass without debouncing. A size change during an
    /// active gesture is authoritative: the gesture's snapshot goes stale
    /// and is replaced at the next contact‑down.
    pub fn set_viewport(&mut self, size: Size) {
        if self.viewport == Some(size) {
            return;
        }
        tracing::debug!(width = size.width, height = size.height, "viewport layout");
        self.viewport = Some(size);
        self.controller.set_layout(size);
    }

    /// Loads a decoded image, resetting all transform, mask, and gesture
    /// state.
    ///
    /// When a viewport is already known the mask and fitted transform are
    /// re‑established immediately; otherwise they are deferred to the first
    /// [`set_viewport`](Self::set_viewport) call.
    pub fn set_image(&mut self, image: ImageBuffer) {
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            "image replaced"
        );
        self.controller.set_image_size(Some(image.size()));
        self.image = Some(image);
        if let Some(viewport) = self.viewport {
            self.controller.set_layout(viewport);
        }
    }

    /// Forwards one pointer‑contact event to the gesture state machine.
    pub fn pointer_event(&mut self, event: &PointerEvent) -> Damage {
        self.controller.on_event(event)
    }

    /// Button‑style zoom about the center of the mapped image bounds.
    pub fn scale_about_center(&mut self, factor: f64) -> Damage {
        self.controller.scale_about_center(factor)
    }

    /// Sets the effective‑scale bounds applied while pinch‑zooming.
    pub fn set_scale_limits(&mut self, min: f64, max: f64) {
        self.controller.set_scale_limits(min, max);
    }

    /// The current frame's render inputs.
    #[must_use]
    pub fn render_state(&self) -> RenderState {
        RenderState {
            transform: self.controller.transform().affine(),
            mask: self.controller.mask().rect(),
            scrim: Color::from_rgba8(0, 0, 0, 0x66),
            border_color: Color::WHITE,
            border_width: MASK_STROKE_WIDTH,
        }
    }

    /// Extracts the pixels under the mask into a new buffer.
    ///
    /// The output is opaque RGB sized to the mask's rounded dimensions; see
    /// [`cropview_raster::extract_crop`] for the sampling contract. Fails
    /// only when no image is loaded.
    pub fn crop(&self) -> Result<ImageBuffer, CropError> {
        let image = self.image.as_ref().ok_or(CropError::NoImage)?;
        let mask = self.controller.mask().rect();
        let out = extract_crop(image, self.controller.transform().affine(), mask);
        tracing::debug!(width = out.width(), height = out.height(), "crop extracted");
        Ok(out)
    }
}
