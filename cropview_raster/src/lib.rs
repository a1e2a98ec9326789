// Copyright 2025 the Cropview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cropview Raster: pixel buffers and crop extraction.
//!
//! This crate holds the one allocation‑heavy operation of the workspace:
//! rendering the region of a source image under the crop mask into a fresh,
//! mask‑sized buffer. Pixels are opaque RGB8, tightly packed and row‑major;
//! alpha is deliberately not represented, matching the output contract of
//! the crop artifact.
//!
//! Extraction is a synchronous inverse‑mapping loop with nearest‑neighbor
//! sampling; output pixels that fall outside the source image are opaque
//! black.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod buffer;
mod crop;

pub use buffer::{ImageBuffer, PixelSizeError};
pub use crop::extract_crop;
