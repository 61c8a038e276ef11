use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::editor::upload::{DecodeImageTask, PickImageTask, upload_in_progress};
use crate::editor::{EditorCanvas, ExportImageRequest, OpenImageRequest, PrintImageRequest};
use crate::theme;

use super::EditorUiState;

fn toolbar_button(ui: &mut egui::Ui, label: &str, enabled: bool, selected: bool) -> egui::Response {
    let button = egui::Button::new(egui::RichText::new(label).size(14.0).strong())
        .min_size(egui::vec2(0.0, 28.0))
        .selected(selected);
    ui.add_enabled(enabled, button)
}

/// Main toolbar with file, template and signature actions
#[allow(clippy::too_many_arguments)]
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    canvas: Res<EditorCanvas>,
    mut ui_state: ResMut<EditorUiState>,
    mut open_events: MessageWriter<OpenImageRequest>,
    mut export_events: MessageWriter<ExportImageRequest>,
    mut print_events: MessageWriter<PrintImageRequest>,
    picks: Query<(), With<PickImageTask>>,
    decodes: Query<(), With<DecodeImageTask>>,
) -> Result {
    let loading = upload_in_progress(&picks, &decodes);
    let has_background = canvas.session.has_background();

    egui::TopBottomPanel::top("main_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                if toolbar_button(ui, "Open Image", !loading, false)
                    .on_hover_text("Choose a background image (or drop a file on the window)")
                    .clicked()
                {
                    open_events.write(OpenImageRequest);
                }
                if toolbar_button(ui, "Save Image", has_background, false).clicked() {
                    export_events.write(ExportImageRequest);
                }
                if toolbar_button(ui, "Print", has_background, false)
                    .on_hover_text("Open the image in the system viewer for printing")
                    .clicked()
                {
                    print_events.write(PrintImageRequest);
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                if toolbar_button(ui, "Templates", true, ui_state.show_templates).clicked() {
                    ui_state.show_templates = !ui_state.show_templates;
                }
                if toolbar_button(ui, "Sign Agreement", true, ui_state.signature_picker.is_open)
                    .clicked()
                {
                    ui_state.open_signature_picker();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if loading {
                        ui.spinner();
                        ui.label(egui::RichText::new("Loading image...").color(theme::HINT_TEXT));
                    } else if has_background {
                        let size = canvas.session.surface_size();
                        ui.label(
                            egui::RichText::new(format!("{} x {}", size.x, size.y))
                                .color(theme::HINT_TEXT),
                        );
                    }
                });
            });
        });
    Ok(())
}
