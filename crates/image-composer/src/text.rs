//! Text rendering: wrapped, centered, optionally stroked lines.

use std::path::PathBuf;

use image::Rgba;
use tracing::debug;

use crate::color::Rgb;
use crate::geometry::{Anchor, center_offset};
use crate::layout::{self, DEFAULT_LINE_SPACING_RATIO, LayoutBlock, TextLine, TextMetrics};
use crate::{ComposerError, RasterImage, Result};

/// Characters per line before wrapping.
pub const DEFAULT_WRAP_CHARS: usize = 18;

/// Default font size in pixels per em.
pub const DEFAULT_FONT_SIZE: u32 = 50;

/// Widest outline drawn; larger stroke widths are clamped to this.
pub const MAX_STROKE_WIDTH: u32 = 64;

/// Outline drawn around glyphs. A width of 0 disables it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrokeSpec {
    pub width: u32,
    pub color: Rgb,
}

impl StrokeSpec {
    pub const NONE: StrokeSpec = StrokeSpec {
        width: 0,
        color: Rgb::BLACK,
    };

    pub fn is_enabled(&self) -> bool {
        self.width > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub font_size: u32,
    pub color: Rgb,
    pub stroke: StrokeSpec,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            color: Rgb::BLACK,
            stroke: StrokeSpec::NONE,
        }
    }
}

/// Tunables for the text renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct TextConfig {
    pub wrap_chars: usize,
    pub line_spacing_ratio: f32,
    /// Font files probed in order when no explicit font is given.
    pub font_candidates: Vec<PathBuf>,
    pub default_font_size: u32,
    pub default_color: Rgb,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            wrap_chars: DEFAULT_WRAP_CHARS,
            line_spacing_ratio: DEFAULT_LINE_SPACING_RATIO,
            font_candidates: Vec::new(),
            default_font_size: DEFAULT_FONT_SIZE,
            default_color: Rgb::BLACK,
        }
    }
}

impl TextConfig {
    pub fn validate(&self) -> Result<()> {
        if self.wrap_chars == 0 {
            return Err(ComposerError::InvalidConfig(
                "wrap width must be at least 1 character".into(),
            ));
        }
        if !self.line_spacing_ratio.is_finite() || self.line_spacing_ratio < 0.0 {
            return Err(ComposerError::InvalidConfig(format!(
                "line spacing ratio must be a non-negative number, got {}",
                self.line_spacing_ratio
            )));
        }
        Ok(())
    }

    /// Style using the configured defaults and no stroke.
    pub fn default_style(&self) -> TextStyle {
        TextStyle {
            font_size: self.default_font_size,
            color: self.default_color,
            stroke: StrokeSpec::NONE,
        }
    }
}

/// Draws glyph runs onto a canvas. `(x, y)` is the top-left of the line box.
pub trait GlyphPainter: TextMetrics {
    fn draw_text(&self, canvas: &mut RasterImage, x: i32, y: i32, text: &str, color: Rgba<u8>);

    /// Stamp the run in the stroke color at every offset within the stroke
    /// radius, then draw the fill on top.
    ///
    /// A radius `r` costs about `3.14 * r * r` full draws of the run, so the
    /// radius is clamped to [`MAX_STROKE_WIDTH`].
    fn draw_text_stroked(
        &self,
        canvas: &mut RasterImage,
        x: i32,
        y: i32,
        text: &str,
        fill: Rgba<u8>,
        stroke: StrokeSpec,
    ) {
        let r = stroke.width.min(MAX_STROKE_WIDTH) as i32;
        let r_sq = i64::from(r) * i64::from(r);
        let outline = stroke.color.to_rgba();
        for dy in -r..=r {
            for dx in -r..=r {
                let dist_sq = i64::from(dx) * i64::from(dx) + i64::from(dy) * i64::from(dy);
                if (dx, dy) == (0, 0) || dist_sq > r_sq {
                    continue;
                }
                self.draw_text(canvas, x.saturating_add(dx), y.saturating_add(dy), text, outline);
            }
        }
        self.draw_text(canvas, x, y, text, fill);
    }
}

/// Where a line is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine<'a> {
    pub line: &'a TextLine,
    pub x: i64,
    /// Top of the line box; fractional because line spacing is.
    pub y: f32,
}

/// Position every line of `block` on a canvas of `canvas_size`.
///
/// Unset anchor axes center the whole block. With more than one line, or
/// with no explicit x, each line is centered horizontally on its own, so an
/// explicit x only takes effect for single-line text. Lines stack top to
/// bottom separated by the block's line spacing.
pub fn place_lines(block: &LayoutBlock, canvas_size: (u32, u32), anchor: Anchor) -> Vec<PlacedLine<'_>> {
    let (canvas_w, canvas_h) = canvas_size;
    let origin_x = anchor
        .x
        .unwrap_or_else(|| center_offset(canvas_w, block.max_width));
    let origin_y = match anchor.y {
        Some(y) => y as f32,
        None => ((canvas_h as f32 - block.total_height) / 2.0).floor(),
    };
    let center_each_line = anchor.x.is_none() || block.lines.len() > 1;

    let mut y = origin_y;
    block
        .lines
        .iter()
        .map(|line| {
            let x = if center_each_line {
                center_offset(canvas_w, line.width)
            } else {
                origin_x
            };
            let placed = PlacedLine { line, x, y };
            y += line.height as f32 + block.line_spacing;
            placed
        })
        .collect()
}

/// Draw `text` onto a copy of `target`.
///
/// The text is wrapped at `config.wrap_chars`, measured with `font`, and
/// positioned by [`place_lines`]. The result has the target's dimensions.
pub fn render_text<F: GlyphPainter + ?Sized>(
    target: &RasterImage,
    text: &str,
    anchor: Anchor,
    style: &TextStyle,
    font: &F,
    config: &TextConfig,
) -> Result<RasterImage> {
    config.validate()?;

    let lines = layout::wrap(text, config.wrap_chars);
    let block = layout::layout_with_spacing(&lines, font, config.line_spacing_ratio);
    debug!(
        lines = block.lines.len(),
        max_width = block.max_width,
        total_height = block.total_height,
        line_spacing = block.line_spacing,
        "Laid out text block"
    );

    let mut canvas = target.clone();
    let fill = style.color.to_rgba();

    for placed in place_lines(&block, canvas.dimensions(), anchor) {
        let x = clamp_coord(placed.x);
        let y = clamp_coord(placed.y.floor() as i64);
        if style.stroke.is_enabled() {
            font.draw_text_stroked(&mut canvas, x, y, &placed.line.text, fill, style.stroke);
        } else {
            font.draw_text(&mut canvas, x, y, &placed.line.text, fill);
        }
    }

    Ok(canvas)
}

fn clamp_coord(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::font::FontHandle;
    use crate::layout::TextSize;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[derive(Debug, Clone, PartialEq)]
    struct DrawCall {
        x: i32,
        y: i32,
        text: String,
        color: Rgba<u8>,
    }

    /// 10px per character; line height grows with length so lines differ.
    #[derive(Default)]
    struct RecordingPainter {
        calls: RefCell<Vec<DrawCall>>,
    }

    impl TextMetrics for RecordingPainter {
        fn measure(&self, text: &str) -> TextSize {
            let n = text.chars().count() as u32;
            TextSize {
                width: n * 10,
                height: if n == 0 { 0 } else { 20 + n },
            }
        }
    }

    impl GlyphPainter for RecordingPainter {
        fn draw_text(&self, _canvas: &mut RasterImage, x: i32, y: i32, text: &str, color: Rgba<u8>) {
            self.calls.borrow_mut().push(DrawCall {
                x,
                y,
                text: text.to_string(),
                color,
            });
        }
    }

    fn block_for(text: &str) -> LayoutBlock {
        let lines = layout::wrap(text, DEFAULT_WRAP_CHARS);
        layout::layout(&lines, &RecordingPainter::default())
    }

    #[test]
    fn multi_line_text_centers_every_line_despite_explicit_x() {
        // 18 + 18 + 4 characters
        let text = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789abcd";
        let block = block_for(text);
        assert_eq!(block.lines.len(), 3);

        let placed = place_lines(&block, (400, 300), Anchor::at(5, 10));
        assert_eq!(placed[0].x, (400 - 180) / 2);
        assert_eq!(placed[1].x, (400 - 180) / 2);
        assert_eq!(placed[2].x, (400 - 40) / 2);

        // Tallest line is 38px, so every gap is 7.6px.
        let gap = 0.2 * 38.0;
        assert_eq!(placed[0].y, 10.0);
        for pair in placed.windows(2) {
            let between = pair[1].y - (pair[0].y + pair[0].line.height as f32);
            assert!((between - gap).abs() < 1e-4, "gap was {between}");
        }
    }

    #[test]
    fn single_line_honors_explicit_x() {
        let block = block_for("Hello");
        let placed = place_lines(&block, (400, 300), Anchor::at(7, 9));
        assert_eq!((placed[0].x, placed[0].y), (7, 9.0));
    }

    #[test]
    fn unset_anchor_centers_block() {
        let block = block_for("Hello");
        // 50x25 line on 400x300
        let placed = place_lines(&block, (400, 300), Anchor::CENTERED);
        assert_eq!(placed[0].x, 175);
        assert_eq!(placed[0].y, 137.0);
    }

    #[test]
    fn unset_y_centers_total_block_height() {
        let block = block_for("ABCDEFGHIJKLMNOPQRSTUVWXYZ");
        // heights 38 and 28, gap 7.6 -> total 73.6
        let placed = place_lines(&block, (400, 300), Anchor::new(Some(3), None));
        assert_eq!(placed[0].y, ((300.0f32 - 73.6) / 2.0).floor());
        assert_eq!(placed[0].x, 110);
        assert_eq!(placed[1].x, 160);
    }

    #[test]
    fn block_wider_than_canvas_goes_negative() {
        let block = block_for("ABCDEFGHIJ");
        let placed = place_lines(&block, (50, 50), Anchor::CENTERED);
        assert_eq!(placed[0].x, -25);
    }

    #[test]
    fn render_draws_each_line_in_fill_color() {
        let painter = RecordingPainter::default();
        let target = RasterImage::from_pixel(400, 300, WHITE);
        let style = TextStyle {
            color: Rgb::new(255, 0, 0),
            ..Default::default()
        };

        let out = render_text(
            &target,
            "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            Anchor::CENTERED,
            &style,
            &painter,
            &TextConfig::default(),
        )
        .unwrap();

        assert_eq!(out.dimensions(), (400, 300));
        let calls = painter.calls.borrow();
        let texts: Vec<&str> = calls.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["ABCDEFGHIJKLMNOPQR", "STUVWXYZ"]);
        assert!(calls.iter().all(|c| c.color == Rgba([255, 0, 0, 255])));
        // second line top: floor(113.2) + 38 + 7.6 = 158.6
        assert_eq!(calls[0].y, 113);
        assert_eq!(calls[1].y, 158);
    }

    #[test]
    fn stroke_outlines_before_fill() {
        let painter = RecordingPainter::default();
        let target = RasterImage::from_pixel(100, 100, WHITE);
        let style = TextStyle {
            font_size: 20,
            color: Rgb::new(255, 255, 0),
            stroke: StrokeSpec {
                width: 1,
                color: Rgb::new(0, 0, 255),
            },
        };

        render_text(&target, "A", Anchor::at(10, 20), &style, &painter, &TextConfig::default())
            .unwrap();

        let calls = painter.calls.borrow();
        // radius 1 disk without the center: 4 offsets, then the fill
        assert_eq!(calls.len(), 5);
        let (fill, outline) = calls.split_last().unwrap();
        assert_eq!((fill.x, fill.y, fill.color), (10, 20, Rgba([255, 255, 0, 255])));
        assert!(outline.iter().all(|c| c.color == Rgba([0, 0, 255, 255])));
        assert!(outline.iter().all(|c| (c.x - 10).abs() + (c.y - 20).abs() == 1));
    }

    #[test]
    fn stroke_width_is_clamped() {
        let draws_for = |width: u32| {
            let painter = RecordingPainter::default();
            let mut canvas = RasterImage::new(1, 1);
            let stroke = StrokeSpec { width, color: Rgb::BLACK };
            painter.draw_text_stroked(&mut canvas, 0, 0, "A", WHITE, stroke);
            painter.calls.into_inner().len()
        };

        assert_eq!(draws_for(u32::MAX), draws_for(MAX_STROKE_WIDTH));
        assert!(draws_for(MAX_STROKE_WIDTH) > draws_for(MAX_STROKE_WIDTH - 1));
    }

    #[test]
    fn empty_text_draws_nothing() {
        let painter = RecordingPainter::default();
        let target = RasterImage::from_pixel(10, 10, WHITE);
        let out = render_text(
            &target,
            "",
            Anchor::CENTERED,
            &TextStyle::default(),
            &painter,
            &TextConfig::default(),
        )
        .unwrap();
        assert!(painter.calls.borrow().is_empty());
        assert_eq!(out, target);
    }

    #[test]
    fn zero_wrap_width_is_rejected() {
        let config = TextConfig {
            wrap_chars: 0,
            ..Default::default()
        };
        let target = RasterImage::new(10, 10);
        let err = render_text(
            &target,
            "x",
            Anchor::CENTERED,
            &TextStyle::default(),
            &RecordingPainter::default(),
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, ComposerError::InvalidConfig(_)));
    }

    #[test]
    fn builtin_font_renders_visible_ink() {
        let target = RasterImage::from_pixel(200, 100, WHITE);
        let font = FontHandle::builtin(16.0);
        let style = TextStyle {
            font_size: 16,
            ..Default::default()
        };
        let out = render_text(&target, "Hi", Anchor::CENTERED, &style, &font, &TextConfig::default())
            .unwrap();

        assert_eq!(out.dimensions(), target.dimensions());
        // "Hi" is 32x16 centered at (84, 42); nothing lands outside that box.
        for (x, y, p) in out.enumerate_pixels() {
            if *p != WHITE {
                assert!((84..116).contains(&x) && (42..58).contains(&y));
            }
        }
        assert_ne!(out, target);
    }
}
