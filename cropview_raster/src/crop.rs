// Copyright 2025 the Cropview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect};

use crate::buffer::ImageBuffer;

/// Renders the masked region of `image` into a new buffer.
///
/// The output is sized to the mask's dimensions rounded to whole pixels, and
/// the coordinate system is shifted so the mask's top‑left corner maps to
/// the output origin: output pixel `(0, 0)` shows whatever `transform`
/// places at the mask's top‑left in view space.
///
/// Sampling is nearest‑neighbor through the inverse transform, taken at
/// output pixel centers. View positions that land outside the source image
/// produce opaque black. The transform must be invertible, which the engine
/// guarantees by never driving the scale to zero.
#[must_use]
pub fn extract_crop(image: &ImageBuffer, transform: Affine, mask: Rect) -> ImageBuffer {
    let out_width = round_dimension(mask.width());
    let out_height = round_dimension(mask.height());
    let mut out = ImageBuffer::new(out_width, out_height);
    if out_width == 0 || out_height == 0 {
        return out;
    }

    let inverse = transform.inverse();
    let src_width = image.width() as usize;
    let src_pixels = image.pixels();
    let out_pixels = out.pixels_mut();

    for oy in 0..out_height {
        for ox in 0..out_width {
            let view = Point::new(
                mask.x0 + f64::from(ox) + 0.5,
                mask.y0 + f64::from(oy) + 0.5,
            );
            let Some((sx, sy)) = source_pixel(inverse * view, image.width(), image.height())
            else {
                continue;
            };
            let s = (sy * src_width + sx) * ImageBuffer::BYTES_PER_PIXEL;
            let d = (oy as usize * out_width as usize + ox as usize) * ImageBuffer::BYTES_PER_PIXEL;
            out_pixels[d..d + ImageBuffer::BYTES_PER_PIXEL]
                .copy_from_slice(&src_pixels[s..s + ImageBuffer::BYTES_PER_PIXEL]);
        }
    }

    out
}

/// Rounds a mask dimension to whole output pixels.
///
/// Round half up; truncation toward zero is exact after the +0.5 shift
/// because the value is non-negative.
#[expect(
    clippy::cast_possible_truncation,
    reason = "mask dimensions are bounded by the viewport"
)]
fn round_dimension(v: f64) -> u32 {
    if v <= 0.0 {
        return 0;
    }
    (v + 0.5) as u32
}

/// Maps an image‑space sample point to source pixel indices, or `None` when
/// it falls outside the image.
#[expect(
    clippy::cast_possible_truncation,
    reason = "coordinates are checked non-negative and bounds-checked below"
)]
fn source_pixel(p: Point, width: u32, height: u32) -> Option<(usize, usize)> {
    if p.x < 0.0 || p.y < 0.0 {
        return None;
    }
    // Truncation toward zero is floor for the non-negative case handled here.
    let (sx, sy) = (p.x as u32, p.y as u32);
    (sx < width && sy < height).then_some((sx as usize, sy as usize))
}
