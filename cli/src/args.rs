//! Command-line arguments and their conversion into a [`Request`].

use std::path::PathBuf;

use clap::Parser;
use image_composer::{
    Anchor, BlendParams, CompositeRequest, Opacity, Request, ResizeTarget, Rgb, StrokeSpec,
    TextRequest,
};

use crate::config::AppConfig;

const EXAMPLES: &str = "\
Examples:
  # Composite an image
  image-composer -b background.jpg -o result.png
  image-composer -f logo.png -b bg.jpg -o out.png -x 100 -y 50
  image-composer -f logo.png -b bg.jpg -o out.png -x -20 -y -20 --resize-width 200 --opacity 0.8

  # Add text
  image-composer -t \"Hello World\" -b bg.jpg -o out.png
  image-composer -t \"Title\" -b bg.jpg -o out.png --font-size 60 --font-color 255,0,0
  image-composer -t \"Outlined\" -b bg.jpg -o out.png --stroke-width 2 --stroke-color 0,0,0";

#[derive(Parser, Debug)]
#[command(
    name = "image-composer",
    version,
    about = "Composite an image onto a background, or add text to it",
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Foreground image to composite (default: images/header.png).
    #[arg(short = 'f', long, conflicts_with = "text")]
    pub foreground: Option<PathBuf>,

    /// Text to draw onto the background.
    #[arg(short = 't', long)]
    pub text: Option<String>,

    /// Background image (default: pick from the images directory).
    #[arg(short = 'b', long)]
    pub background: Option<PathBuf>,

    /// Output PNG path.
    #[arg(short = 'o', long)]
    pub output: PathBuf,

    /// X position; negative values count from the right edge. Text is centered when omitted.
    #[arg(short = 'x', long = "x-position", allow_negative_numbers = true)]
    pub x_position: Option<i64>,

    /// Y position; negative values count from the bottom edge. Text is centered when omitted.
    #[arg(short = 'y', long = "y-position", allow_negative_numbers = true)]
    pub y_position: Option<i64>,

    /// Resize the foreground to this width.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub resize_width: Option<u32>,

    /// Resize the foreground to this height.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub resize_height: Option<u32>,

    /// Foreground opacity (0.0-1.0).
    #[arg(long, default_value_t = 1.0)]
    pub opacity: f32,

    /// Font size in pixels (default: 50).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub font_size: Option<u32>,

    /// Font color as R,G,B (default: 0,0,0).
    #[arg(long)]
    pub font_color: Option<String>,

    /// Font file (TTF/OTF/TTC).
    #[arg(long)]
    pub font_path: Option<PathBuf>,

    /// Outline width in pixels; 0 disables the outline.
    #[arg(long, default_value_t = 0)]
    pub stroke_width: u32,

    /// Outline color as R,G,B.
    #[arg(long, default_value = "0,0,0")]
    pub stroke_color: String,
}

impl Cli {
    /// Text mode is selected by a non-empty `--text`; everything else composites.
    pub fn is_text_mode(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.is_empty())
    }

    fn anchor(&self) -> Anchor {
        Anchor::new(self.x_position, self.y_position)
    }

    /// Validate mode-specific options and build the request.
    pub fn into_request(
        self,
        background: PathBuf,
        config: &AppConfig,
    ) -> image_composer::Result<Request> {
        let anchor = self.anchor();

        if self.is_text_mode() {
            let mut style = config.text.default_style();
            if let Some(color) = &self.font_color {
                style.color = color.parse::<Rgb>()?;
            }
            if let Some(size) = self.font_size {
                style.font_size = size;
            }
            style.stroke = StrokeSpec {
                width: self.stroke_width,
                color: self.stroke_color.parse::<Rgb>()?,
            };

            return Ok(Request::Text(TextRequest {
                background,
                output: self.output,
                text: self.text.unwrap_or_default(),
                anchor,
                style,
                font_path: self.font_path,
            }));
        }

        let foreground = self
            .foreground
            .unwrap_or_else(|| config.default_foreground.clone());
        if !foreground.exists() {
            return Err(image_composer::ComposerError::InputNotFound(foreground));
        }
        let opacity = Opacity::new(self.opacity)?;

        Ok(Request::Composite(CompositeRequest {
            foreground,
            background,
            output: self.output,
            params: BlendParams {
                anchor,
                resize: ResizeTarget::new(self.resize_width, self.resize_height),
                opacity,
            },
        }))
    }
}
