//! Text wrapping and block measurement.

/// Fraction of the tallest line inserted between consecutive lines.
pub const DEFAULT_LINE_SPACING_RATIO: f32 = 0.2;

/// Pixel bounding box of a rendered run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextSize {
    pub width: u32,
    pub height: u32,
}

/// Measures text as it would be drawn in a particular font and size.
pub trait TextMetrics {
    fn measure(&self, text: &str) -> TextSize;
}

/// A single wrapped line and its measured size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub text: String,
    pub width: u32,
    pub height: u32,
}

/// Measured lines plus the aggregate block geometry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutBlock {
    pub lines: Vec<TextLine>,
    /// Gap between consecutive lines.
    pub line_spacing: f32,
    /// Sum of line heights plus one gap per line boundary.
    pub total_height: f32,
    pub max_width: u32,
}

impl LayoutBlock {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Split `text` into lines of at most `max_chars` characters.
///
/// Characters are Unicode scalar values. A `'\n'` always ends the current
/// line (possibly producing an empty line) and is not part of any line.
/// Empty input yields no lines, and no trailing empty line is produced when
/// the text ends exactly on a boundary.
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for ch in text.chars() {
        if ch == '\n' {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        } else if current_len >= max_chars {
            lines.push(std::mem::replace(&mut current, ch.to_string()));
            current_len = 1;
        } else {
            current.push(ch);
            current_len += 1;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Measure `lines` and compute the block geometry with the default spacing.
pub fn layout<M: TextMetrics + ?Sized>(lines: &[String], metrics: &M) -> LayoutBlock {
    layout_with_spacing(lines, metrics, DEFAULT_LINE_SPACING_RATIO)
}

/// Measure `lines` and compute the block geometry.
///
/// `spacing_ratio` is applied to the tallest line height to obtain the gap
/// inserted between each pair of consecutive lines.
pub fn layout_with_spacing<M: TextMetrics + ?Sized>(
    lines: &[String],
    metrics: &M,
    spacing_ratio: f32,
) -> LayoutBlock {
    let measured: Vec<TextLine> = lines
        .iter()
        .map(|text| {
            let size = metrics.measure(text);
            TextLine {
                text: text.clone(),
                width: size.width,
                height: size.height,
            }
        })
        .collect();

    if measured.is_empty() {
        return LayoutBlock::default();
    }

    let max_height = measured.iter().map(|l| l.height).max().unwrap_or(0);
    let max_width = measured.iter().map(|l| l.width).max().unwrap_or(0);
    let line_spacing = max_height as f32 * spacing_ratio;
    let gaps = (measured.len() - 1) as f32;
    let total_height = measured.iter().map(|l| l.height as f32).sum::<f32>() + line_spacing * gaps;

    LayoutBlock {
        lines: measured,
        line_spacing,
        total_height,
        max_width,
    }
}
