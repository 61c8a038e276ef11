//! Font registry used for measuring and rasterizing text elements.
//!
//! Uses fontdue for glyph metrics and coverage bitmaps. The built-in families
//! reuse the fonts egui already bundles, so the editor needs no font files on
//! disk. Extra families can be registered from TTF/OTF files.

use std::path::{Path, PathBuf};

use bevy::math::Vec2;
use bevy_egui::egui;
use fontdue::{Font, FontSettings};
use thiserror::Error;

use crate::constants::{DEFAULT_FONT_FAMILY, MONOSPACE_FONT_FAMILY};

/// Width per character (in ems) assumed when no font face is available.
const APPROX_CHAR_WIDTH_EM: f32 = 0.5;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse font {family:?}: {reason}")]
    Parse { family: String, reason: &'static str },
}

/// A rasterized glyph positioned in surface pixels (top-left of its bitmap).
#[derive(Debug, Clone)]
pub struct GlyphBitmap {
    pub x: i32,
    pub y: i32,
    pub width: usize,
    pub height: usize,
    /// Row-major coverage, one byte per pixel
    pub coverage: Vec<u8>,
}

struct FontFace {
    family: String,
    font: Font,
}

#[derive(Default)]
pub struct FontBook {
    faces: Vec<FontFace>,
}

impl FontBook {
    /// Font book with no faces; text is measured approximately and not drawn.
    pub fn approximate() -> Self {
        Self::default()
    }

    /// Register egui's bundled proportional and monospace fonts.
    pub fn with_builtin_fonts() -> Self {
        let mut book = Self::default();
        let definitions = egui::FontDefinitions::default();

        for (family, key) in [
            (DEFAULT_FONT_FAMILY, "Ubuntu-Light"),
            (MONOSPACE_FONT_FAMILY, "Hack"),
        ] {
            let Some(data) = definitions.font_data.get(key) else {
                tracing::warn!("Bundled font {} unavailable, using approximate metrics", key);
                continue;
            };
            if let Err(e) = book.register(family, &data.font) {
                tracing::warn!("{}", e);
            }
        }

        book
    }

    pub fn register(&mut self, family: &str, bytes: &[u8]) -> Result<(), FontError> {
        let font = Font::from_bytes(bytes, FontSettings::default()).map_err(|reason| {
            FontError::Parse {
                family: family.to_string(),
                reason,
            }
        })?;

        let family = family.to_string();
        self.faces.retain(|f| !f.family.eq_ignore_ascii_case(&family));
        tracing::debug!("Registered font family {:?}", family);
        self.faces.push(FontFace { family, font });
        Ok(())
    }

    /// Register a font file under its file stem. Returns the family name.
    pub fn register_file(&mut self, path: &Path) -> Result<String, FontError> {
        let bytes = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let family = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("custom")
            .to_string();
        self.register(&family, &bytes)?;
        Ok(family)
    }

    pub fn families(&self) -> Vec<&str> {
        self.faces.iter().map(|f| f.family.as_str()).collect()
    }

    pub fn has_faces(&self) -> bool {
        !self.faces.is_empty()
    }

    /// Exact family (case-insensitive), then the default family, then any face.
    fn face(&self, family: &str) -> Option<&Font> {
        self.faces
            .iter()
            .find(|f| f.family.eq_ignore_ascii_case(family))
            .or_else(|| {
                self.faces
                    .iter()
                    .find(|f| f.family.eq_ignore_ascii_case(DEFAULT_FONT_FAMILY))
            })
            .or_else(|| self.faces.first())
            .map(|f| &f.font)
    }

    /// Advance width of a single line of text.
    pub fn text_width(&self, text: &str, font_size: f32, family: &str) -> f32 {
        let Some(font) = self.face(family) else {
            return text.chars().count() as f32 * font_size * APPROX_CHAR_WIDTH_EM;
        };

        let mut width = 0.0;
        let mut prev: Option<char> = None;
        for c in text.chars() {
            if let Some(p) = prev {
                width += font.horizontal_kern(p, c, font_size).unwrap_or(0.0);
            }
            width += font.metrics(c, font_size).advance_width;
            prev = Some(c);
        }
        width
    }

    /// Measured box of an element: text width by font-size height.
    pub fn measure(&self, text: &str, font_size: f32, family: &str) -> Vec2 {
        Vec2::new(self.text_width(text, font_size, family), font_size)
    }

    /// Rasterize `text` centered horizontally and vertically on `anchor`.
    ///
    /// Vertical centering uses the middle of the em box, so glyphs sit the
    /// same way regardless of which characters the string contains.
    pub fn rasterize_line(
        &self,
        text: &str,
        font_size: f32,
        family: &str,
        anchor: Vec2,
    ) -> Vec<GlyphBitmap> {
        let Some(font) = self.face(family) else {
            return Vec::new();
        };

        let (ascent, descent) = font
            .horizontal_line_metrics(font_size)
            .map(|m| (m.ascent, m.descent))
            .unwrap_or((font_size * 0.8, -font_size * 0.2));
        let baseline = anchor.y + (ascent + descent) / 2.0;

        let mut pen = anchor.x - self.text_width(text, font_size, family) / 2.0;
        let mut prev: Option<char> = None;
        let mut glyphs = Vec::with_capacity(text.len());

        for c in text.chars() {
            if let Some(p) = prev {
                pen += font.horizontal_kern(p, c, font_size).unwrap_or(0.0);
            }
            let (metrics, coverage) = font.rasterize(c, font_size);
            if metrics.width > 0 && metrics.height > 0 {
                glyphs.push(GlyphBitmap {
                    x: (pen + metrics.xmin as f32).round() as i32,
                    y: (baseline - metrics.height as f32 - metrics.ymin as f32).round() as i32,
                    width: metrics.width,
                    height: metrics.height,
                    coverage,
                });
            }
            pen += metrics.advance_width;
            prev = Some(c);
        }

        glyphs
    }
}
