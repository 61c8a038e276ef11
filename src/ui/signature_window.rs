//! Agreement picker and the signature pad window.

use bevy::math::Vec2;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::common::{CursorHint, PointerKind, SurfaceGeometry};
use crate::editor::{AgreementStore, OpenSignatureRequest, SaveSignatureRequest, SignaturePad};
use crate::records::{AgreementSummary, SignatureSlot, list_agreements};
use crate::theme;

use super::EditorUiState;
use super::input::surface_pointer_events;
use super::surface::PixmapTexture;

/// State of the "Sign Agreement" picker
#[derive(Default)]
pub struct SignaturePicker {
    pub is_open: bool,
    pub needs_refresh: bool,
    pub agreements: Vec<AgreementSummary>,
    pub load_error: Option<String>,
    pub selected: Option<String>,
    pub slot: SignatureSlot,
}

impl SignaturePicker {
    fn refresh(&mut self, store: &AgreementStore) {
        match list_agreements(store.0.as_ref()) {
            Ok(agreements) => {
                if let Some(selected) = &self.selected
                    && !agreements.iter().any(|a| &a.id == selected)
                {
                    self.selected = None;
                }
                self.agreements = agreements;
                self.load_error = None;
            }
            Err(e) => {
                warn!("Failed to list agreements: {}", e);
                self.agreements.clear();
                self.load_error = Some(e.to_string());
            }
        }
        self.needs_refresh = false;
    }
}

fn agreement_label(agreement: &AgreementSummary) -> String {
    let name = match &agreement.number {
        Some(number) => format!("Agreement {}", number),
        None => format!("Agreement {}", agreement.id),
    };
    let signed = |yes: bool| if yes { "signed" } else { "unsigned" };
    format!(
        "{} (company {}, client {})",
        name,
        signed(agreement.company_signed),
        signed(agreement.client_signed)
    )
}

#[derive(Resource, Default)]
pub struct SignatureView {
    texture: PixmapTexture,
}

pub fn signature_picker_ui(
    mut contexts: EguiContexts,
    mut ui_state: ResMut<EditorUiState>,
    store: Res<AgreementStore>,
    pad: Option<Res<SignaturePad>>,
    mut open_events: MessageWriter<OpenSignatureRequest>,
) -> Result {
    let picker = &mut ui_state.signature_picker;
    if !picker.is_open || pad.as_ref().is_some_and(|p| p.is_open()) {
        return Ok(());
    }
    if picker.needs_refresh {
        picker.refresh(&store);
    }

    let mut open = true;
    let mut start = false;
    egui::Window::new("Sign Agreement")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            if let Some(error) = &picker.load_error {
                ui.colored_label(theme::ERROR_TEXT, error);
            } else if picker.agreements.is_empty() {
                ui.label(egui::RichText::new("No agreements found").italics().weak());
            }

            egui::ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
                for agreement in &picker.agreements {
                    let selected = picker.selected.as_deref() == Some(agreement.id.as_str());
                    if ui
                        .selectable_label(selected, agreement_label(agreement))
                        .clicked()
                    {
                        picker.selected = Some(agreement.id.clone());
                    }
                }
            });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label("Sign as:");
                for slot in SignatureSlot::ALL {
                    ui.radio_value(&mut picker.slot, slot, slot.label());
                }
            });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(picker.selected.is_some(), egui::Button::new("Sign"))
                    .clicked()
                {
                    start = true;
                }
                if ui.button("Refresh").clicked() {
                    picker.needs_refresh = true;
                }
            });
        });

    if start && let Some(agreement_id) = picker.selected.clone() {
        open_events.write(OpenSignatureRequest {
            agreement_id,
            slot: picker.slot,
        });
        picker.is_open = false;
    }
    if !open {
        picker.is_open = false;
    }
    Ok(())
}

pub fn signature_pad_ui(
    mut contexts: EguiContexts,
    pad: Option<ResMut<SignaturePad>>,
    mut view: ResMut<SignatureView>,
    mut save_events: MessageWriter<SaveSignatureRequest>,
) -> Result {
    let Some(mut pad) = pad else {
        return Ok(());
    };
    let Some(target) = pad.target.clone() else {
        return Ok(());
    };

    let ctx = contexts.ctx_mut()?.clone();
    let title = format!("{} Signature", target.slot.label());
    let mut cancel = false;
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(&ctx, |ui| {
            ui.label(
                egui::RichText::new(format!("Agreement {}", target.agreement_id))
                    .color(theme::HINT_TEXT),
            );
            ui.add_space(4.0);

            let size = pad.capture.size().as_vec2();
            let (rect, _) = ui.allocate_exact_size(egui::vec2(size.x, size.y), egui::Sense::drag());
            ui.painter().rect_filled(rect, 0.0, theme::SIGNATURE_PAPER);

            let geometry = SurfaceGeometry {
                displayed_size: Vec2::new(rect.width(), rect.height()),
            };
            let events = ctx.input(|i| i.events.clone());
            let covered = !ui.rect_contains_pointer(rect);
            let mut inked = false;
            for event in surface_pointer_events(&events, rect) {
                if event.kind == PointerKind::Down && covered {
                    continue;
                }
                inked |= pad.capture.handle_pointer(event, geometry);
            }
            if inked {
                pad.revision += 1;
            }
            if ui.rect_contains_pointer(rect)
                && let Some(icon) = CursorHint::Draw.cursor_icon()
            {
                ctx.set_cursor_icon(icon);
            }

            let texture = view
                .texture
                .sync(&ctx, "signature_pad", pad.capture.pixmap(), pad.revision);
            egui::Image::new(egui::load::SizedTexture::new(texture, rect.size())).paint_at(ui, rect);

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Clear").clicked() {
                    pad.clear();
                }
                if ui.button("Save").clicked() {
                    save_events.write(SaveSignatureRequest);
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        });

    if cancel {
        pad.close();
    }
    Ok(())
}
