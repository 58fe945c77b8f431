//! Foreground resizing.
//!
//! Uses Lanczos3 filtering for both up- and downsampling.

use image::imageops::{self, FilterType};
use tracing::debug;

use crate::{ComposerError, RasterImage, Result};

/// Requested output size. Either side may be omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResizeTarget {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ResizeTarget {
    pub const fn new(width: Option<u32>, height: Option<u32>) -> Self {
        Self { width, height }
    }
}

/// Compute the output size for `original` under `target`.
///
/// Returns `None` when no resize was requested. With both sides given the
/// box is used as-is; with one side the other follows the original aspect
/// ratio, truncated toward zero.
pub fn target_dimensions(original: (u32, u32), target: ResizeTarget) -> Option<(u32, u32)> {
    let (orig_w, orig_h) = original;
    match (target.width, target.height) {
        (None, None) => None,
        (Some(w), Some(h)) => Some((w, h)),
        (Some(w), None) => {
            let ratio = f64::from(orig_h) / f64::from(orig_w);
            Some((w, (f64::from(w) * ratio) as u32))
        }
        (None, Some(h)) => {
            let ratio = f64::from(orig_w) / f64::from(orig_h);
            Some(((f64::from(h) * ratio) as u32, h))
        }
    }
}

/// Resize `img` to `target`, or return a copy when no resize was requested.
pub fn resize(img: &RasterImage, target: ResizeTarget) -> Result<RasterImage> {
    let (orig_w, orig_h) = img.dimensions();

    let Some((new_w, new_h)) = target_dimensions((orig_w, orig_h), target) else {
        return Ok(img.clone());
    };

    if new_w == 0 || new_h == 0 {
        return Err(ComposerError::InvalidDimensions {
            width: new_w,
            height: new_h,
        });
    }

    if (new_w, new_h) == (orig_w, orig_h) {
        debug!(width = new_w, height = new_h, "Image already at target size, skipping resize");
        return Ok(img.clone());
    }

    debug!(orig_w, orig_h, new_w, new_h, "Resizing foreground");
    Ok(imageops::resize(img, new_w, new_h, FilterType::Lanczos3))
}
