//! Background images: turn uploaded bytes into a floor's image reference.
//!
//! DESIGN
//! ======
//! The plan never decodes pixels. Loading guesses the container format from
//! the leading bytes and reads only the image header to confirm the file is a
//! well-formed image of a supported format. The untouched payload is then
//! wrapped in a `data:` URL that a host can paint directly. Anything else is
//! rejected before it reaches the engine.

#[cfg(test)]
#[path = "background_test.rs"]
mod tests;

use std::io::Cursor;
use std::path::{Path, PathBuf};

use base64::Engine as _;
use canvas::floor::ImageRef;
use image::ImageReader;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum BackgroundError {
    #[error("background image is empty")]
    Empty,
    #[error("unrecognised image format")]
    UnknownFormat,
    #[error("malformed image: {0}")]
    Malformed(#[source] image::ImageError),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Validate image bytes and encode them as a `data:` URL.
///
/// # Errors
///
/// `Empty` for zero bytes, `UnknownFormat` when the format cannot be guessed,
/// `Malformed` when the header does not parse.
pub fn load_background(bytes: &[u8]) -> Result<ImageRef, BackgroundError> {
    if bytes.is_empty() {
        return Err(BackgroundError::Empty);
    }
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|_| BackgroundError::UnknownFormat)?;
    let Some(format) = reader.format() else {
        warn!(len = bytes.len(), "background rejected: unknown format");
        return Err(BackgroundError::UnknownFormat);
    };
    let (width, height) = reader.into_dimensions().map_err(|e| {
        warn!(?format, error = %e, "background rejected: malformed header");
        BackgroundError::Malformed(e)
    })?;

    let mime = format.to_mime_type();
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    info!(mime, width, height, len = bytes.len(), "background loaded");
    Ok(format!("data:{mime};base64,{payload}"))
}

/// Read an image file and load it as a background.
///
/// # Errors
///
/// `Io` when the file cannot be read, otherwise as [`load_background`].
pub async fn read_background(path: &Path) -> Result<ImageRef, BackgroundError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| BackgroundError::Io { path: path.to_path_buf(), source })?;
    load_background(&bytes)
}
