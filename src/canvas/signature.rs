//! Freehand signature capture on its own surface.
//!
//! Each pointer move strokes the segment from the previous point straight
//! into the pixmap, so the surface always shows the ink drawn so far. Whether
//! anything was drawn is decided by scanning alpha, never tracked separately.

use bevy::math::{UVec2, Vec2};
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use super::color::TextColor;
use super::error::{CanvasResult, ValidationError};
use super::export::{encode_data_uri, encode_png, new_pixmap, pixmap_to_image};
use super::geometry::device_to_logical;
use crate::common::{PointerEvent, PointerKind, SurfaceGeometry};
use crate::constants::SIGNATURE_STROKE_WIDTH;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum StrokeState {
    #[default]
    Idle,
    Drawing {
        last: Vec2,
    },
}

pub struct SignatureCapture {
    pixmap: Pixmap,
    state: StrokeState,
    stroke_width: f32,
    color: TextColor,
}

impl SignatureCapture {
    pub fn new(size: UVec2) -> CanvasResult<Self> {
        Self::with_style(size, SIGNATURE_STROKE_WIDTH, TextColor::BLACK)
    }

    pub fn with_style(size: UVec2, stroke_width: f32, color: TextColor) -> CanvasResult<Self> {
        Ok(Self {
            pixmap: new_pixmap(size)?,
            state: StrokeState::Idle,
            stroke_width,
            color,
        })
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.pixmap.width(), self.pixmap.height())
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, StrokeState::Drawing { .. })
    }

    /// Feed a normalized pointer event. Returns true when ink was added.
    pub fn handle_pointer(&mut self, event: PointerEvent, geometry: SurfaceGeometry) -> bool {
        let point = device_to_logical(
            event.position,
            self.size().as_vec2(),
            geometry.displayed_size,
        );
        match event.kind {
            PointerKind::Down => {
                self.begin(point);
                false
            }
            PointerKind::Move => self.extend(point),
            PointerKind::Up | PointerKind::Leave => {
                self.end();
                false
            }
        }
    }

    pub fn begin(&mut self, point: Vec2) {
        self.state = StrokeState::Drawing { last: point };
    }

    /// Stroke from the last point to `point`. Zero-length moves draw nothing.
    pub fn extend(&mut self, point: Vec2) -> bool {
        let StrokeState::Drawing { last } = self.state else {
            return false;
        };
        if last == point {
            return false;
        }

        let mut pb = PathBuilder::new();
        pb.move_to(last.x, last.y);
        pb.line_to(point.x, point.y);
        let Some(path) = pb.finish() else {
            return false;
        };

        let mut paint = Paint::default();
        paint.set_color(self.color.to_skia());
        paint.anti_alias = true;
        let stroke = Stroke {
            width: self.stroke_width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);

        self.state = StrokeState::Drawing { last: point };
        true
    }

    pub fn end(&mut self) {
        self.state = StrokeState::Idle;
    }

    /// Wipe all ink. Rasters exported earlier are independent copies.
    pub fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
        self.state = StrokeState::Idle;
    }

    pub fn is_empty(&self) -> bool {
        self.pixmap.pixels().iter().all(|p| p.alpha() == 0)
    }

    /// PNG bytes of the captured ink; refused when nothing was drawn.
    pub fn export_raster(&self) -> CanvasResult<Vec<u8>> {
        if self.is_empty() {
            return Err(ValidationError::EmptySignature.into());
        }
        encode_png(&pixmap_to_image(&self.pixmap))
    }

    pub fn export_data_uri(&self) -> CanvasResult<String> {
        Ok(encode_data_uri(&self.export_raster()?))
    }
}
