// Copyright 2025 the Cropview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=cropview_transform --heading-base-level=0

//! Cropview Transform: uniform scale + translate state for a displayed image.
//!
//! This crate provides a small, headless model of the affine transform that
//! places a decoded image inside a view. It focuses on:
//! - Fit‑to‑viewport initialization centered on a crop window.
//! - Relative pan and zoom‑about‑a‑point composition.
//! - Effective‑scale reads that tolerate floating‑point asymmetry.
//! - Conservative rect mapping and mapped‑image containment tests.
//!
//! It does **not** own any pixels or gesture state. Callers are expected to:
//! - Keep the decoded image and its intrinsic size elsewhere.
//! - Drive [`ImageTransform`] from pointer gestures at a higher layer.
//! - Hand the resulting [`kurbo::Affine`] to whatever renders the image.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use cropview_transform::ImageTransform;
//!
//! // A 1200x800 image shown in a 600x800 view, centered on (300, 400).
//! let mut transform = ImageTransform::fit(
//!     Size::new(1200.0, 800.0),
//!     Size::new(600.0, 800.0),
//!     Point::new(300.0, 400.0),
//! );
//!
//! // The longer image dimension fills the matching view dimension.
//! assert!((transform.effective_scale() - 0.5).abs() < 1e-12);
//!
//! // Pan by a view-space delta.
//! transform.translate_by(Vec2::new(10.0, -4.0));
//! ```
//!
//! ## Design notes
//!
//! - The transform is constrained to **uniform** scale plus translation; no
//!   independent X/Y scale, shear, or rotation is ever introduced.
//! - Scale reads use the larger‑magnitude diagonal coefficient, so repeated
//!   composition cannot make the two axes drift apart observably.
//! - Containment tests use the effective‑scale approximation of the mapped
//!   image bounds rather than a full inverse mapping; the two agree under
//!   the uniform‑scale constraint.
//!
//! This crate is `no_std`.

#![no_std]

mod image_transform;

pub use image_transform::{ImageTransform, map_rect};
