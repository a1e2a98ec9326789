// Copyright 2025 the Cropview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};

/// Tolerance band, in view pixels, around an edge line or a corner.
pub const EDGE_SHORT: f64 = 60.0;

/// Tolerance band, in view pixels, along an edge from its midpoint.
pub const EDGE_LONG: f64 = 90.0;

/// Minimum mask width and height.
///
/// Derived from the hit bands so that the two grab regions on opposite edges
/// can never overlap completely.
pub const MIN_SIZE: f64 = EDGE_LONG + EDGE_SHORT;

bitflags::bitflags! {
    /// Edges of the mask currently being moved by a resize gesture.
    ///
    /// A corner grab sets two adjacent flags; an edge‑midpoint grab sets one.
    /// Empty means no resize is active.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ResizeEdges: u8 {
        /// The left edge moves with the pointer's X delta.
        const LEFT   = 0b0001;
        /// The top edge moves with the pointer's Y delta.
        const TOP    = 0b0010;
        /// The right edge moves with the pointer's X delta.
        const RIGHT  = 0b0100;
        /// The bottom edge moves with the pointer's Y delta.
        const BOTTOM = 0b1000;
    }
}

/// The crop window: an axis‑aligned rectangle in view space.
///
/// The mask is only ever mutated by the resize interaction; panning and
/// zooming the image underneath leaves it untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CropMask {
    rect: Rect,
}

impl CropMask {
    /// Creates a mask with the given rectangle.
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    /// Creates the layout‑time mask for a viewport: a square with sides
    /// two‑thirds of the smaller viewport dimension, centered in the view.
    #[must_use]
    pub fn centered_in(viewport: Size) -> Self {
        let side = viewport.width.min(viewport.height) * 2.0 / 3.0;
        Self {
            rect: Rect::from_center_size(
                Point::new(viewport.width / 2.0, viewport.height / 2.0),
                Size::new(side, side),
            ),
        }
    }

    /// Returns the mask rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Classifies a pointer‑down location against the mask's grab regions.
    ///
    /// Corners are tested first: a point within [`EDGE_SHORT`] of both a
    /// vertical and a horizontal edge grabs both. Edge midpoints are tested
    /// second, within [`EDGE_LONG`] of the edge center along the edge and
    /// [`EDGE_SHORT`] across it; their flags accumulate onto any corner hit.
    /// A point outside every band returns the empty set.
    #[must_use]
    pub fn hit_test(&self, p: Point) -> ResizeEdges {
        let r = self.rect;
        let mut edges = ResizeEdges::empty();

        if (p.x - r.x0).abs() < EDGE_SHORT {
            if (p.y - r.y0).abs() < EDGE_SHORT {
                edges = ResizeEdges::LEFT | ResizeEdges::TOP;
            } else if (p.y - r.y1).abs() < EDGE_SHORT {
                edges = ResizeEdges::LEFT | ResizeEdges::BOTTOM;
            }
        } else if (p.x - r.x1).abs() < EDGE_SHORT {
            if (p.y - r.y0).abs() < EDGE_SHORT {
                edges = ResizeEdges::RIGHT | ResizeEdges::TOP;
            } else if (p.y - r.y1).abs() < EDGE_SHORT {
                edges = ResizeEdges::RIGHT | ResizeEdges::BOTTOM;
            }
        }

        if (p.x - r.center().x).abs() < EDGE_LONG {
            if (p.y - r.y0).abs() < EDGE_SHORT {
                edges |= ResizeEdges::TOP;
            } else if (p.y - r.y1).abs() < EDGE_SHORT {
                edges |= ResizeEdges::BOTTOM;
            }
        } else if (p.y - r.center().y).abs() < EDGE_LONG {
            if (p.x - r.x0).abs() < EDGE_SHORT {
                edges |= ResizeEdges::LEFT;
            } else if (p.x - r.x1).abs() < EDGE_SHORT {
                edges |= ResizeEdges::RIGHT;
            }
        }

        edges
    }

    /// Moves the flagged edges by `delta`, clamping to the minimum size.
    ///
    /// Each active edge moves independently by the matching delta component.
    /// When a move would bring an edge within [`MIN_SIZE`] of its opposite,
    /// the moving edge is pinned at `opposite ∓ MIN_SIZE`; the gesture itself
    /// is never rejected.
    pub fn resize(&mut self, edges: ResizeEdges, delta: Vec2) {
        let r = &mut self.rect;

        if edges.contains(ResizeEdges::LEFT) {
            r.x0 += delta.x;
            if r.x0 + MIN_SIZE > r.x1 {
                r.x0 = r.x1 - MIN_SIZE;
            }
        }
        if edges.contains(ResizeEdges::TOP) {
            r.y0 += delta.y;
            if r.y0 + MIN_SIZE > r.y1 {
                r.y0 = r.y1 - MIN_SIZE;
            }
        }
        if edges.contains(ResizeEdges::RIGHT) {
            r.x1 += delta.x;
            if r.x1 - MIN_SIZE < r.x0 {
                r.x1 = r.x0 + MIN_SIZE;
            }
        }
        if edges.contains(ResizeEdges::BOTTOM) {
            r.y1 += delta.y;
            if r.y1 - MIN_SIZE < r.y0 {
                r.y1 = r.y0 + MIN_SIZE;
            }
        }
    }
}
