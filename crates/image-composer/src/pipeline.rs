//! Request dispatch: load inputs, run the compositor or text renderer, save PNG.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::compose::{self, BlendParams};
use crate::font::FontResolver;
use crate::geometry::Anchor;
use crate::text::{self, TextConfig, TextStyle};
use crate::{ComposerError, RasterImage, Result, codec};

/// Place a foreground image over a background.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeRequest {
    pub foreground: PathBuf,
    pub background: PathBuf,
    pub output: PathBuf,
    pub params: BlendParams,
}

/// Stamp text onto a background.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRequest {
    pub background: PathBuf,
    pub output: PathBuf,
    pub text: String,
    pub anchor: Anchor,
    pub style: TextStyle,
    pub font_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Composite(CompositeRequest),
    Text(TextRequest),
}

impl Request {
    pub fn output(&self) -> &Path {
        match self {
            Self::Composite(r) => &r.output,
            Self::Text(r) => &r.output,
        }
    }

    pub fn background(&self) -> &Path {
        match self {
            Self::Composite(r) => &r.background,
            Self::Text(r) => &r.background,
        }
    }
}

/// Run `request` and write the PNG result. Returns the output path.
pub fn execute(request: &Request, config: &TextConfig) -> Result<PathBuf> {
    let background = load_existing(request.background())?;
    let image = match request {
        Request::Composite(req) => run_composite(req, &background)?,
        Request::Text(req) => run_text(req, &background, config)?,
    };
    codec::save_png(request.output(), &image)?;
    Ok(request.output().to_path_buf())
}

fn run_composite(req: &CompositeRequest, background: &RasterImage) -> Result<RasterImage> {
    let foreground = load_existing(&req.foreground)?;
    info!(
        foreground = %req.foreground.display(),
        background = %req.background.display(),
        "Compositing images"
    );
    compose::compose(&foreground, background, &req.params)
}

fn run_text(req: &TextRequest, background: &RasterImage, config: &TextConfig) -> Result<RasterImage> {
    config.validate()?;

    let font = FontResolver::new(req.font_path.as_deref(), &config.font_candidates)
        .resolve(req.style.font_size as f32);
    info!(
        background = %req.background.display(),
        chars = req.text.chars().count(),
        "Rendering text"
    );
    text::render_text(background, &req.text, req.anchor, &req.style, &font, config)
}

fn load_existing(path: &Path) -> Result<RasterImage> {
    if !path.exists() {
        return Err(ComposerError::InputNotFound(path.to_path_buf()));
    }
    codec::load(path)
}
