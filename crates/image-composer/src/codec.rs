//! Image decoding and PNG encoding.

use std::io::Cursor;
use std::path::Path;

use image::ImageFormat;
use tracing::{debug, info};

use crate::{ComposerError, RasterImage, Result};

/// Decode image bytes (PNG, JPEG, BMP, GIF, ...) and promote them to RGBA8.
pub fn decode(bytes: &[u8]) -> Result<RasterImage> {
    let img = image::load_from_memory(bytes).map_err(ComposerError::Decode)?;
    debug!(
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "Decoded image"
    );
    Ok(img.into_rgba8())
}

/// Encode an RGBA image as PNG bytes.
pub fn encode_png(image: &RasterImage) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    image
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(ComposerError::Encode)?;
    Ok(cursor.into_inner())
}

/// Read and decode an image file.
pub fn load(path: &Path) -> Result<RasterImage> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ComposerError::InputNotFound(path.to_path_buf())
        } else {
            ComposerError::Decode(image::ImageError::IoError(e))
        }
    })?;
    decode(&bytes)
}

/// Encode `image` as PNG and write it to `path`, creating parent directories.
pub fn save_png(path: &Path, image: &RasterImage) -> Result<()> {
    let write_err = |source| ComposerError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let bytes = encode_png(image)?;
    std::fs::write(path, bytes).map_err(write_err)?;
    info!(path = %path.display(), width = image.width(), height = image.height(), "Wrote PNG");
    Ok(())
}
