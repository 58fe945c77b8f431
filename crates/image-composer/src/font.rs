//! Font loading, measurement and drawing.
//!
//! Fonts are resolved through an ordered list of [`FontStrategy`]s. Each
//! strategy either produces a [`FontHandle`] or declines, and the list
//! always ends with the built-in bitmap font, so resolution cannot fail.

use std::fmt;
use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontArc, GlyphId, PxScale, Rect, ScaleFont, point};
use image::Rgba;
use imageproc::drawing::draw_text_mut;
use tracing::{debug, info, warn};

use crate::RasterImage;
use crate::builtin_font::BuiltinFont;
use crate::layout::{TextMetrics, TextSize};
use crate::text::GlyphPainter;

#[derive(Debug, thiserror::Error)]
pub enum FontLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid font data (only TTF/OTF/TTC supported)")]
    InvalidFont,
}

/// A font ready to measure and draw at a fixed size.
#[derive(Clone)]
pub enum FontHandle {
    Outline {
        font: FontArc,
        scale: PxScale,
        path: PathBuf,
    },
    Builtin(BuiltinFont),
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outline { scale, path, .. } => f
                .debug_struct("Outline")
                .field("path", path)
                .field("scale", &scale.y)
                .finish(),
            Self::Builtin(b) => f.debug_tuple("Builtin").field(b).finish(),
        }
    }
}

impl FontHandle {
    /// The built-in bitmap font sized as close to `font_size` as it allows.
    pub fn builtin(font_size: f32) -> Self {
        Self::Builtin(BuiltinFont::for_size(font_size))
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin(_))
    }
}

/// Load a TTF/OTF file (or the first face of a TTC) at `font_size` pixels per em.
pub fn load_font_file(path: &Path, font_size: f32) -> Result<FontHandle, FontLoadError> {
    let data = std::fs::read(path)?;
    let font = FontArc::try_from_vec(data).map_err(|_| FontLoadError::InvalidFont)?;
    let scale = em_scale(&font, font_size);
    Ok(FontHandle::Outline {
        font,
        scale,
        path: path.to_path_buf(),
    })
}

/// ab_glyph scales by ascent-to-descent height; convert an em size to that.
fn em_scale(font: &FontArc, font_size: f32) -> PxScale {
    match font.units_per_em() {
        Some(upem) if upem > 0.0 => PxScale::from(font_size * font.height_unscaled() / upem),
        _ => PxScale::from(font_size),
    }
}

/// Union of the pixel bounds of every outlined glyph, laid out from the
/// top-left of the line box.
fn ink_bounds(font: &FontArc, scale: PxScale, text: &str) -> Option<Rect> {
    let scaled = font.as_scaled(scale);
    let mut caret = 0.0f32;
    let mut prev: Option<GlyphId> = None;
    let mut bounds: Option<Rect> = None;

    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = prev {
            caret += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, point(caret, scaled.ascent()));
        caret += scaled.h_advance(id);
        prev = Some(id);

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bb = outlined.px_bounds();
            bounds = Some(match bounds {
                None => bb,
                Some(acc) => Rect {
                    min: point(acc.min.x.min(bb.min.x), acc.min.y.min(bb.min.y)),
                    max: point(acc.max.x.max(bb.max.x), acc.max.y.max(bb.max.y)),
                },
            });
        }
    }

    bounds
}

impl TextMetrics for FontHandle {
    fn measure(&self, text: &str) -> TextSize {
        match self {
            Self::Outline { font, scale, .. } => match ink_bounds(font, *scale, text) {
                Some(bb) => TextSize {
                    width: bb.width().ceil() as u32,
                    height: bb.height().ceil() as u32,
                },
                None => TextSize::default(),
            },
            Self::Builtin(b) => b.measure(text),
        }
    }
}

impl GlyphPainter for FontHandle {
    fn draw_text(&self, canvas: &mut RasterImage, x: i32, y: i32, text: &str, color: Rgba<u8>) {
        if text.is_empty() {
            return;
        }
        match self {
            Self::Outline { font, scale, .. } => {
                draw_text_mut(canvas, color, x, y, *scale, font, text);
            }
            Self::Builtin(b) => b.draw(canvas, x, y, text, color),
        }
    }
}

/// One way of obtaining a font.
pub trait FontStrategy {
    fn describe(&self) -> String;

    /// Produce a font at `font_size`, or `None` to let the next strategy try.
    fn resolve(&self, font_size: f32) -> Option<FontHandle>;
}

/// A user-supplied font file, used only if it exists.
#[derive(Debug, Clone)]
pub struct ExplicitFile(pub PathBuf);

impl FontStrategy for ExplicitFile {
    fn describe(&self) -> String {
        format!("font file {}", self.0.display())
    }

    fn resolve(&self, font_size: f32) -> Option<FontHandle> {
        if !self.0.exists() {
            warn!(path = %self.0.display(), "Font file does not exist, falling back");
            return None;
        }
        match load_font_file(&self.0, font_size) {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(path = %self.0.display(), "Failed to load font: {e}");
                None
            }
        }
    }
}

/// Installed fonts probed in order; the first that loads wins.
#[derive(Debug, Clone, Default)]
pub struct SystemCandidates(pub Vec<PathBuf>);

impl FontStrategy for SystemCandidates {
    fn describe(&self) -> String {
        format!("{} system font candidates", self.0.len())
    }

    fn resolve(&self, font_size: f32) -> Option<FontHandle> {
        self.0.iter().find_map(|path| match load_font_file(path, font_size) {
            Ok(handle) => Some(handle),
            Err(e) => {
                debug!(path = %path.display(), "Skipping font candidate: {e}");
                None
            }
        })
    }
}

/// The built-in bitmap font. Always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFallback;

impl FontStrategy for BuiltinFallback {
    fn describe(&self) -> String {
        "built-in bitmap font".to_string()
    }

    fn resolve(&self, font_size: f32) -> Option<FontHandle> {
        Some(FontHandle::builtin(font_size))
    }
}

/// Ordered font strategies ending in [`BuiltinFallback`].
pub struct FontResolver {
    strategies: Vec<Box<dyn FontStrategy>>,
}

impl FontResolver {
    /// Explicit file (if given), then the candidates, then the built-in font.
    pub fn new(font_path: Option<&Path>, candidates: &[PathBuf]) -> Self {
        let mut strategies: Vec<Box<dyn FontStrategy>> = Vec::new();
        if let Some(path) = font_path {
            strategies.push(Box::new(ExplicitFile(path.to_path_buf())));
        }
        strategies.push(Box::new(SystemCandidates(candidates.to_vec())));
        Self::with_strategies(strategies)
    }

    /// Use custom strategies; the built-in fallback is appended.
    pub fn with_strategies(mut strategies: Vec<Box<dyn FontStrategy>>) -> Self {
        strategies.push(Box::new(BuiltinFallback));
        Self { strategies }
    }

    pub fn resolve(&self, font_size: f32) -> FontHandle {
        for strategy in &self.strategies {
            if let Some(handle) = strategy.resolve(font_size) {
                info!(source = %strategy.describe(), ?handle, "Using font");
                return handle;
            }
        }
        FontHandle::builtin(font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Declines;

    impl FontStrategy for Declines {
        fn describe(&self) -> String {
            "declines".into()
        }
        fn resolve(&self, _font_size: f32) -> Option<FontHandle> {
            None
        }
    }

    #[test]
    fn missing_files_fall_back_to_builtin() {
        let resolver = FontResolver::new(
            Some(Path::new("/definitely/missing/font.ttf")),
            &[PathBuf::from("/also/missing.ttc")],
        );
        let handle = resolver.resolve(50.0);
        assert!(handle.is_builtin());
    }

    #[test]
    fn unparsable_font_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("bogus.ttf");
        std::fs::write(&bogus, b"not a font").unwrap();

        assert!(matches!(
            load_font_file(&bogus, 20.0),
            Err(FontLoadError::InvalidFont)
        ));
        assert!(ExplicitFile(bogus.clone()).resolve(20.0).is_none());
        assert!(SystemCandidates(vec![bogus]).resolve(20.0).is_none());
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_font_file(Path::new("/missing/font.otf"), 20.0),
            Err(FontLoadError::Io(_))
        ));
    }

    #[test]
    fn declining_strategies_end_in_builtin() {
        let resolver = FontResolver::with_strategies(vec![Box::new(Declines), Box::new(Declines)]);
        match resolver.resolve(16.0) {
            FontHandle::Builtin(b) => assert_eq!(b.magnification(), 2),
            other => panic!("expected builtin font, got {other:?}"),
        }
    }

    #[test]
    fn builtin_handle_measures_and_draws() {
        let handle = FontHandle::builtin(8.0);
        assert_eq!(handle.measure("ab"), TextSize { width: 16, height: 8 });

        let mut canvas = RasterImage::from_pixel(16, 8, Rgba([255, 255, 255, 255]));
        handle.draw_text(&mut canvas, 0, 0, "ab", Rgba([0, 0, 0, 255]));
        assert!(canvas.pixels().any(|p| p[0] == 0));
    }
}
