//! Built-in 8x8 bitmap font used when no outline font can be loaded.
//!
//! Glyphs come from `font8x8` and are magnified with nearest-neighbor
//! scaling. Characters outside the bundled tables render as `?`.

use font8x8::{BASIC_FONTS, GREEK_FONTS, HIRAGANA_FONTS, LATIN_FONTS, UnicodeFonts};
use image::Rgba;

use crate::RasterImage;
use crate::layout::TextSize;

/// Side length of an unscaled glyph cell.
pub const CELL: u32 = 8;

/// Largest magnification whose cell side still fits in a `u32`.
pub const MAX_MAGNIFICATION: u32 = u32::MAX / CELL;

/// The bitmap font at an integer magnification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinFont {
    magnification: u32,
}

impl BuiltinFont {
    /// Pick the magnification closest to a requested pixel size, clamped to
    /// `1..=MAX_MAGNIFICATION`.
    pub fn for_size(font_size: f32) -> Self {
        let magnification = (font_size / CELL as f32).round().max(1.0) as u32;
        Self {
            magnification: magnification.min(MAX_MAGNIFICATION),
        }
    }

    pub fn magnification(&self) -> u32 {
        self.magnification
    }

    fn cell(&self) -> u32 {
        CELL.saturating_mul(self.magnification)
    }

    /// Glyph cell size of a run; every character advances one cell.
    pub fn measure(&self, text: &str) -> TextSize {
        let count = text.chars().count() as u32;
        if count == 0 {
            return TextSize::default();
        }
        TextSize {
            width: count.saturating_mul(self.cell()),
            height: self.cell(),
        }
    }

    /// Draw `text` with its top-left cell corner at `(x, y)`, clipped to the canvas.
    ///
    /// Only the part of each magnified bit that overlaps the canvas is visited.
    pub fn draw(&self, canvas: &mut RasterImage, x: i32, y: i32, text: &str, color: Rgba<u8>) {
        let (w, h) = (i64::from(canvas.width()), i64::from(canvas.height()));
        let m = i64::from(self.magnification);
        let cell = i64::from(self.cell());
        let top = i64::from(y);
        if top >= h || top + cell <= 0 {
            return;
        }
        let mut cursor = i64::from(x);

        for ch in text.chars() {
            if cursor >= w {
                break;
            }
            if cursor + cell <= 0 {
                cursor += cell;
                continue;
            }

            let bitmap = glyph(ch);
            for (row, bits) in bitmap.iter().enumerate() {
                let base_y = top + row as i64 * m;
                let (y0, y1) = (base_y.max(0), (base_y + m).min(h));
                if y0 >= y1 {
                    continue;
                }
                for col in 0..CELL as i64 {
                    if (bits >> col) & 1 == 0 {
                        continue;
                    }
                    let base_x = cursor + col * m;
                    let (x0, x1) = (base_x.max(0), (base_x + m).min(w));
                    for py in y0..y1 {
                        for px in x0..x1 {
                            canvas.put_pixel(px as u32, py as u32, color);
                        }
                    }
                }
            }
            cursor += cell;
        }
    }
}

fn glyph(ch: char) -> [u8; 8] {
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| GREEK_FONTS.get(ch))
        .or_else(|| HIRAGANA_FONTS.get(ch))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}
