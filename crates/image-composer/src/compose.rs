//! Image composition: place a foreground over a background.

use tracing::debug;

use crate::color::Opacity;
use crate::geometry::{self, Anchor, Point};
use crate::resize::{self, ResizeTarget};
use crate::{RasterImage, Result};

/// How a foreground is prepared and placed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BlendParams {
    /// Requested offset; unset axes default to 0, negative axes count from the far edge.
    pub anchor: Anchor,
    pub resize: ResizeTarget,
    pub opacity: Opacity,
}

/// Composite `foreground` over a copy of `background`.
///
/// The foreground is resized, faded, then placed according to
/// [`geometry::normalize_placement`]. Neither input is modified; the
/// result always has the background's dimensions.
pub fn compose(
    foreground: &RasterImage,
    background: &RasterImage,
    params: &BlendParams,
) -> Result<RasterImage> {
    let mut fg = resize::resize(foreground, params.resize)?;
    apply_opacity(&mut fg, params.opacity);

    let at = geometry::normalize_placement(params.anchor, fg.dimensions(), background.dimensions());

    let mut result = background.clone();
    paste_masked(&mut result, &fg, at);
    Ok(result)
}

/// Scale the alpha channel of every pixel by `opacity`.
///
/// Color channels are untouched and alpha never increases.
pub fn apply_opacity(img: &mut RasterImage, opacity: Opacity) {
    if opacity.is_opaque() {
        return;
    }
    let factor = opacity.value();
    debug!(factor, "Applying foreground opacity");
    for pixel in img.pixels_mut() {
        pixel[3] = (f32::from(pixel[3]) * factor) as u8;
    }
}

/// Paste `source` onto `target` at `at`, using the source alpha as the mask.
///
/// Straight (non-premultiplied) blending is applied to all four channels.
/// Source pixels that land outside the target are skipped.
pub fn paste_masked(target: &mut RasterImage, source: &RasterImage, at: Point) {
    let (tw, th) = (i64::from(target.width()), i64::from(target.height()));

    for (dx, dy, pixel) in source.enumerate_pixels() {
        let tx = at.x + i64::from(dx);
        let ty = at.y + i64::from(dy);
        if tx < 0 || ty < 0 || tx >= tw || ty >= th {
            continue;
        }

        let mask = pixel[3];
        if mask == 0 {
            continue;
        }
        let dst = target.get_pixel_mut(tx as u32, ty as u32);
        if mask == 255 {
            *dst = *pixel;
            continue;
        }
        for c in 0..4 {
            dst[c] = blend_channel(dst[c], pixel[c], mask);
        }
    }
}

/// `(bg * (255 - mask) + fg * mask) / 255`, rounded to nearest.
fn blend_channel(bg: u8, fg: u8, mask: u8) -> u8 {
    let mask = u32::from(mask);
    let tmp = u32::from(bg) * (255 - mask) + u32::from(fg) * mask + 128;
    ((tmp + (tmp >> 8)) >> 8) as u8
}
