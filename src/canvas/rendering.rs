//! Compositing of the background raster, text elements and selection outline.
//!
//! Every call produces a fresh pixmap from the current state, so no drawing
//! state (shadow, dash pattern) carries over between frames.

use bevy::math::{Rect, UVec2};
use image::RgbaImage;
use image::imageops::{self, FilterType};
use tiny_skia::{
    FilterQuality, Mask, Paint, PathBuilder, Pixmap, PixmapPaint, Rect as SkiaRect, Stroke,
    StrokeDash, Transform,
};

use super::error::{CanvasError, CanvasResult};
use super::export::{image_to_pixmap, new_pixmap};
use super::fonts::{FontBook, GlyphBitmap};
use super::geometry::fit_within;
use super::hit_testing::element_bounds;
use super::model::AnnotationModel;
use crate::constants::{
    SELECTION_COLOR, SELECTION_DASH, SELECTION_PADDING, SELECTION_STROKE_WIDTH, SHADOW_ALPHA,
    SHADOW_BLUR_RADIUS, SHADOW_OFFSET,
};

/// Background raster, already fitted to the surface bounds.
pub struct Background {
    image: RgbaImage,
    pixmap: Pixmap,
}

impl Background {
    /// Downscale `image` to fit inside `max` (never upscaling) and prepare it
    /// for compositing.
    pub fn fit(image: RgbaImage, max: UVec2) -> CanvasResult<Self> {
        let native = UVec2::new(image.width(), image.height());
        let target = fit_within(native, max);
        let image = if target == native {
            image
        } else {
            imageops::resize(&image, target.x, target.y, FilterType::Triangle)
        };
        let pixmap = image_to_pixmap(&image)?;
        Ok(Self { image, pixmap })
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.image.width(), self.image.height())
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Draw the dashed outline around the selected element
    pub show_selection: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_selection: true,
        }
    }
}

impl RenderOptions {
    /// Options for captures: no editing decoration.
    pub fn export() -> Self {
        Self {
            show_selection: false,
        }
    }
}

/// Inclusive-exclusive pixel rectangle on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PixelRegion {
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
}

impl PixelRegion {
    fn point(x: i32, y: i32) -> Self {
        Self {
            x0: x,
            y0: y,
            x1: x + 1,
            y1: y + 1,
        }
    }

    fn include(self, x: i32, y: i32) -> Self {
        Self {
            x0: self.x0.min(x),
            y0: self.y0.min(y),
            x1: self.x1.max(x + 1),
            y1: self.y1.max(y + 1),
        }
    }

    fn shifted_and_grown(self, dx: i32, dy: i32, grow: i32) -> Self {
        Self {
            x0: self.x0 + dx - grow,
            y0: self.y0 + dy - grow,
            x1: self.x1 + dx + grow,
            y1: self.y1 + dy + grow,
        }
    }

    fn clipped(self, width: i32, height: i32) -> Option<Self> {
        let clipped = Self {
            x0: self.x0.max(0),
            y0: self.y0.max(0),
            x1: self.x1.min(width),
            y1: self.y1.min(height),
        };
        (clipped.x0 < clipped.x1 && clipped.y0 < clipped.y1).then_some(clipped)
    }

    fn to_rect(self) -> Option<SkiaRect> {
        SkiaRect::from_ltrb(self.x0 as f32, self.y0 as f32, self.x1 as f32, self.y1 as f32)
    }
}

/// Composite the full surface from scratch.
pub fn render_surface(
    size: UVec2,
    background: Option<&Background>,
    model: &AnnotationModel,
    fonts: &FontBook,
    options: RenderOptions,
) -> CanvasResult<Pixmap> {
    let mut pixmap = new_pixmap(size)?;

    if let Some(background) = background {
        draw_background(&mut pixmap, background);
    }

    let invalid = || CanvasError::InvalidSurface {
        width: size.x,
        height: size.y,
    };
    let mut glyph_mask = Mask::new(size.x, size.y).ok_or_else(invalid)?;
    let mut shadow_mask = Mask::new(size.x, size.y).ok_or_else(invalid)?;

    for element in model.elements() {
        let selected = options.show_selection && model.is_selected(element.id);
        let glyphs = fonts.rasterize_line(
            &element.text,
            element.style.font_size,
            &element.style.font_family,
            element.position,
        );

        if let Some(region) = stamp_glyphs(&mut glyph_mask, &glyphs) {
            draw_shadow(&mut pixmap, &glyph_mask, &mut shadow_mask, region);

            let mut paint = Paint::default();
            paint.set_color(element.style.color.to_skia());
            if let Some(rect) = region.to_rect() {
                pixmap.fill_rect(rect, &paint, Transform::identity(), Some(&glyph_mask));
            }
        }

        if selected {
            draw_selection_outline(&mut pixmap, element_bounds(element, fonts));
        }
    }

    Ok(pixmap)
}

fn draw_background(pixmap: &mut Pixmap, background: &Background) {
    let bg = background.pixmap.as_ref();
    let transform = if bg.width() == pixmap.width() && bg.height() == pixmap.height() {
        Transform::identity()
    } else {
        Transform::from_scale(
            pixmap.width() as f32 / bg.width() as f32,
            pixmap.height() as f32 / bg.height() as f32,
        )
    };
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    pixmap.draw_pixmap(0, 0, bg, &paint, transform, None);
}

/// Write glyph coverage into `mask` (cleared first). Returns the touched region.
fn stamp_glyphs(mask: &mut Mask, glyphs: &[GlyphBitmap]) -> Option<PixelRegion> {
    let (width, height) = (mask.width() as i32, mask.height() as i32);
    let data = mask.data_mut();
    data.fill(0);

    let mut region: Option<PixelRegion> = None;
    for glyph in glyphs {
        for row in 0..glyph.height {
            let y = glyph.y + row as i32;
            if y < 0 || y >= height {
                continue;
            }
            for col in 0..glyph.width {
                let x = glyph.x + col as i32;
                let value = glyph.coverage[row * glyph.width + col];
                if x < 0 || x >= width || value == 0 {
                    continue;
                }
                let idx = (y * width + x) as usize;
                data[idx] = data[idx].max(value);
                region = Some(match region {
                    Some(r) => r.include(x, y),
                    None => PixelRegion::point(x, y),
                });
            }
        }
    }
    region
}

/// Offset, box-blurred copy of the glyph coverage, filled semi-transparent black.
fn draw_shadow(pixmap: &mut Pixmap, glyphs: &Mask, shadow: &mut Mask, region: PixelRegion) {
    let (width, height) = (glyphs.width() as i32, glyphs.height() as i32);
    let (dx, dy) = SHADOW_OFFSET;
    let radius = SHADOW_BLUR_RADIUS as i32;
    let Some(out) = region
        .shifted_and_grown(dx, dy, radius)
        .clipped(width, height)
    else {
        return;
    };

    let src = glyphs.data();
    let sample = |x: i32, y: i32| -> u32 {
        let (sx, sy) = (x - dx, y - dy);
        if sx < 0 || sy < 0 || sx >= width || sy >= height {
            0
        } else {
            src[(sy * width + sx) as usize] as u32
        }
    };

    let out_w = (out.x1 - out.x0) as usize;
    let out_h = (out.y1 - out.y0) as usize;
    let taps = (2 * radius + 1) as u32;

    // Horizontal pass
    let mut horizontal = vec![0u32; out_w * out_h];
    for y in out.y0..out.y1 {
        for x in out.x0..out.x1 {
            let sum: u32 = (-radius..=radius).map(|k| sample(x + k, y)).sum();
            horizontal[(y - out.y0) as usize * out_w + (x - out.x0) as usize] = sum / taps;
        }
    }

    // Vertical pass
    let data = shadow.data_mut();
    data.fill(0);
    for y in out.y0..out.y1 {
        for x in out.x0..out.x1 {
            let col = (x - out.x0) as usize;
            let sum: u32 = (-radius..=radius)
                .filter_map(|k| {
                    let row = y + k - out.y0;
                    (row >= 0 && row < out_h as i32).then(|| horizontal[row as usize * out_w + col])
                })
                .sum();
            data[(y * width + x) as usize] = (sum / taps).min(255) as u8;
        }
    }

    let mut paint = Paint::default();
    paint.set_color_rgba8(0, 0, 0, SHADOW_ALPHA);
    if let Some(rect) = out.to_rect() {
        pixmap.fill_rect(rect, &paint, Transform::identity(), Some(shadow));
    }
}

fn draw_selection_outline(pixmap: &mut Pixmap, bounds: Rect) {
    let Some(rect) = SkiaRect::from_ltrb(
        bounds.min.x - SELECTION_PADDING,
        bounds.min.y - SELECTION_PADDING,
        bounds.max.x + SELECTION_PADDING,
        bounds.max.y + SELECTION_PADDING,
    ) else {
        return;
    };

    let path = PathBuilder::from_rect(rect);
    let [r, g, b] = SELECTION_COLOR;
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, 255);
    paint.anti_alias = true;

    let stroke = Stroke {
        width: SELECTION_STROKE_WIDTH,
        dash: StrokeDash::new(SELECTION_DASH.to_vec(), 0.0),
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}
