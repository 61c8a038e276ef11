//! Raster conversions and the portable encoding used for exports and templates.
//!
//! Composited surfaces are encoded as PNG and embedded as
//! `data:image/png;base64,...` strings so they can be stored as plain text.

use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bevy::math::UVec2;
use image::{ImageFormat, Rgba, RgbaImage};
use tiny_skia::{ColorU8, Pixmap};

use super::error::{CanvasError, CanvasResult, ValidationError};

pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// File extensions accepted as background uploads.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp", "tiff", "tif"];

pub fn new_pixmap(size: UVec2) -> CanvasResult<Pixmap> {
    Pixmap::new(size.x, size.y).ok_or(CanvasError::InvalidSurface {
        width: size.x,
        height: size.y,
    })
}

/// Copy straight-alpha RGBA pixels into a premultiplied pixmap.
pub fn image_to_pixmap(image: &RgbaImage) -> CanvasResult<Pixmap> {
    let mut pixmap = new_pixmap(UVec2::new(image.width(), image.height()))?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}

pub fn pixmap_to_image(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    image
}

pub fn encode_png(image: &RgbaImage) -> CanvasResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

pub fn encode_data_uri(png: &[u8]) -> String {
    format!("{}{}", PNG_DATA_URI_PREFIX, STANDARD.encode(png))
}

/// Extract the payload of a base64 image data URI.
///
/// Any `data:image/<type>;base64,` header is accepted; a bare base64 string
/// (no header) is decoded as-is.
pub fn decode_data_uri(uri: &str) -> CanvasResult<Vec<u8>> {
    let payload = match uri.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest
                .split_once(',')
                .ok_or_else(|| CanvasError::Decode("data URI has no payload".to_string()))?;
            if !header.starts_with("image/") || !header.ends_with(";base64") {
                return Err(CanvasError::Decode(format!(
                    "unsupported data URI header {:?}",
                    header
                )));
            }
            payload
        }
        None => uri,
    };

    STANDARD
        .decode(payload.trim())
        .map_err(|e| CanvasError::Decode(e.to_string()))
}

pub fn decode_image(bytes: &[u8]) -> CanvasResult<RgbaImage> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

/// Decode an image data URI into straight-alpha pixels.
pub fn decode_image_data_uri(uri: &str) -> CanvasResult<RgbaImage> {
    decode_image(&decode_data_uri(uri)?)
}

/// Reject paths whose extension is not a supported raster type.
pub fn check_image_path(path: &Path) -> Result<(), ValidationError> {
    let supported = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.iter().any(|s| e.eq_ignore_ascii_case(s)))
        .unwrap_or(false);

    if supported {
        Ok(())
    } else {
        Err(ValidationError::NotAnImage(path.display().to_string()))
    }
}

/// Default file name for a saved export, stamped with unix milliseconds.
pub fn export_file_name(timestamp_millis: i64) -> String {
    format!("edited-image-{}.png", timestamp_millis)
}
