// Copyright 2025 the Cropview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use cropview_mask::ResizeEdges;
use kurbo::{Affine, Point};

/// The current interaction mode, with per‑gesture scratch data.
///
/// Exactly one gesture is active at a time; the variant payload holds
/// everything that gesture needs, so stale data from a previous gesture
/// cannot leak into the next one. Snapshots (`saved`) are taken when the
/// gesture starts and are the base for relative updates while it runs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GestureState {
    /// No active gesture.
    #[default]
    Idle,
    /// One contact is panning the image.
    Dragging {
        /// Where the contact first touched down.
        down: Point,
        /// Transform snapshot taken at contact‑down.
        saved: Affine,
    },
    /// Two contacts are pinch‑zooming the image.
    Zooming {
        /// Midpoint of the two contacts at pinch start; the zoom pivot.
        pivot: Point,
        /// Inter‑contact distance at pinch start.
        start_distance: f64,
        /// Transform snapshot taken when the second contact registered.
        saved: Affine,
    },
    /// One contact is resizing the crop mask.
    Resizing {
        /// Which mask edges the gesture is moving; never empty.
        edges: ResizeEdges,
        /// Contact position at the previous event, for incremental deltas.
        last: Point,
    },
}

impl GestureState {
    /// Returns `true` while a mask resize is in progress.
    #[must_use]
    pub fn is_resizing(&self) -> bool {
        matches!(self, Self::Resizing { .. })
    }

    /// Returns `true` while a pinch‑zoom is in progress.
    #[must_use]
    pub fn is_zooming(&self) -> bool {
        matches!(self, Self::Zooming { .. })
    }
}
