//! Raster compositing and text stamping.
//!
//! Two pipelines share the geometry helpers in this crate: placing a
//! (resized, faded) foreground onto a background, and laying out wrapped,
//! optionally stroked text centered on a background.

use std::path::PathBuf;

pub mod builtin_font;
pub mod codec;
pub mod color;
pub mod compose;
pub mod font;
pub mod geometry;
pub mod layout;
pub mod pipeline;
pub mod resize;
pub mod text;

// Re-exports for convenience
pub use color::{Opacity, Rgb};
pub use compose::{BlendParams, compose};
pub use font::{FontHandle, FontResolver};
pub use geometry::{Anchor, Point};
pub use layout::{LayoutBlock, TextLine, TextMetrics, TextSize, layout, wrap};
pub use pipeline::{CompositeRequest, Request, TextRequest, execute};
pub use resize::ResizeTarget;
pub use text::{GlyphPainter, StrokeSpec, TextConfig, TextStyle, render_text};

/// An owned 8-bit RGBA pixel buffer.
///
/// Every image entering the core is promoted to this format first.
pub type RasterImage = image::RgbaImage;

/// Errors produced by compositing and text rendering.
#[derive(Debug, thiserror::Error)]
pub enum ComposerError {
    #[error("File not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Invalid color '{0}' (expected R,G,B with each value in 0-255)")]
    InvalidColorFormat(String),

    #[error("Opacity must be between 0.0 and 1.0, got {0}")]
    InvalidOpacity(f32),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Failed to write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for compositing operations.
pub type Result<T> = std::result::Result<T, ComposerError>;
