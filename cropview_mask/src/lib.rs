// Copyright 2025 the Cropview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cropview Mask: the crop window over a displayed image.
//!
//! The mask is an axis‑aligned rectangle in view space, independent of the
//! image transform. This crate provides:
//! - [`CropMask`]: the rectangle plus its layout‑time placement rule.
//! - [`ResizeEdges`]: a flags type naming which edges a gesture is moving
//!   (zero to four of them; a corner grab moves two).
//! - Edge/corner hit testing with short and long tolerance bands.
//! - Per‑edge resizing clamped to a minimum mask size.
//!
//! The mask never shrinks below [`MIN_SIZE`] in either dimension: a resize
//! that would violate the minimum pins the moving edge rather than rejecting
//! the gesture, so the opposite edge stays independently draggable.
//!
//! This crate is `no_std`.

#![no_std]

mod mask;

pub use mask::{CropMask, EDGE_LONG, EDGE_SHORT, MIN_SIZE, ResizeEdges};
