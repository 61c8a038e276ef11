//! Central editing surface: shows the composited frame and forwards pointer
//! input to the session.

use bevy::math::Vec2;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};
use tiny_skia::Pixmap;

use crate::common::{PointerKind, SurfaceGeometry};
use crate::editor::{EditorCanvas, Notifications};
use crate::theme;

use super::DialogState;
use super::input::surface_pointer_events;

/// GPU copy of a pixmap, re-uploaded when its revision changes.
#[derive(Default)]
pub struct PixmapTexture {
    handle: Option<egui::TextureHandle>,
    revision: Option<u64>,
}

impl PixmapTexture {
    /// Upload `pixmap` if `revision` differs from the last upload.
    pub fn sync(
        &mut self,
        ctx: &egui::Context,
        name: &str,
        pixmap: &Pixmap,
        revision: u64,
    ) -> egui::TextureId {
        let stale = self.revision != Some(revision);
        let handle = match self.handle.take() {
            Some(mut handle) => {
                if stale {
                    handle.set(color_image(pixmap), egui::TextureOptions::LINEAR);
                }
                handle
            }
            None => ctx.load_texture(name, color_image(pixmap), egui::TextureOptions::LINEAR),
        };
        let id = handle.id();
        self.handle = Some(handle);
        self.revision = Some(revision);
        id
    }
}

fn color_image(pixmap: &Pixmap) -> egui::ColorImage {
    egui::ColorImage::from_rgba_premultiplied(
        [pixmap.width() as usize, pixmap.height() as usize],
        pixmap.data(),
    )
}

/// Largest size with the surface's aspect ratio that fits `available`,
/// never scaled above native size.
pub fn displayed_size(surface: Vec2, available: egui::Vec2) -> egui::Vec2 {
    if surface.x <= 0.0 || surface.y <= 0.0 {
        return egui::Vec2::ZERO;
    }
    let scale = (available.x / surface.x)
        .min(available.y / surface.y)
        .clamp(0.0, 1.0);
    egui::vec2(surface.x * scale, surface.y * scale)
}

#[derive(Resource, Default)]
pub struct SurfaceView {
    texture: PixmapTexture,
}

pub fn editor_surface_ui(
    mut contexts: EguiContexts,
    mut canvas: ResMut<EditorCanvas>,
    mut view: ResMut<SurfaceView>,
    mut notifications: ResMut<Notifications>,
    dialog_state: Res<DialogState>,
) -> Result {
    let ctx = contexts.ctx_mut()?.clone();
    egui::CentralPanel::default()
        .frame(egui::Frame::central_panel(&ctx.style()).fill(theme::SURFACE_BACKDROP))
        .show(&ctx, |ui| {
            if !canvas.session.has_background() {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        egui::RichText::new("Open an image or drop one onto the window")
                            .size(16.0)
                            .color(theme::HINT_TEXT),
                    );
                });
                return;
            }

            let surface = canvas.session.surface_size().as_vec2();
            let size = displayed_size(surface, ui.available_size());
            let rect = egui::Align2::CENTER_CENTER.align_size_within_rect(size, ui.max_rect());
            ui.allocate_rect(rect, egui::Sense::click_and_drag());
            let geometry = SurfaceGeometry {
                displayed_size: Vec2::new(rect.width(), rect.height()),
            };

            if !dialog_state.any_modal_open {
                let events = ctx.input(|i| i.events.clone());
                let covered = !ui.rect_contains_pointer(rect);
                for event in surface_pointer_events(&events, rect) {
                    if event.kind == PointerKind::Down && covered {
                        continue;
                    }
                    if let Err(e) = canvas.session.handle_pointer(event, geometry) {
                        notifications.error("Could not place text", e);
                    }
                }

                if let Some(pos) = ctx.pointer_hover_pos()
                    && ui.rect_contains_pointer(rect)
                {
                    let device = Vec2::new(pos.x - rect.min.x, pos.y - rect.min.y);
                    if let Some(icon) = canvas.session.cursor_hint(device, geometry).cursor_icon() {
                        ctx.set_cursor_icon(icon);
                    }
                }
            }

            let revision = canvas.session.revision();
            if let Some(frame) = canvas.session.frame() {
                let texture = view.texture.sync(&ctx, "editor_surface", frame, revision);
                egui::Image::new(egui::load::SizedTexture::new(texture, size)).paint_at(ui, rect);
            }
        });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_displayed_size_shrinks_to_fit() {
        let size = displayed_size(Vec2::new(800.0, 600.0), egui::vec2(400.0, 600.0));
        assert_eq!(size, egui::vec2(400.0, 300.0));
    }

    #[test]
    fn test_displayed_size_never_upscales() {
        let size = displayed_size(Vec2::new(320.0, 200.0), egui::vec2(1200.0, 900.0));
        assert_eq!(size, egui::vec2(320.0, 200.0));
    }

    #[test]
    fn test_displayed_size_degenerate_surface() {
        assert_eq!(
            displayed_size(Vec2::ZERO, egui::vec2(100.0, 100.0)),
            egui::Vec2::ZERO
        );
    }
}
