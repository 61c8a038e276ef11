//! Template library window.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::canvas::{TemplateId, TemplateMeta};
use crate::editor::{
    ApplyTemplateRequest, CreateTemplateStubRequest, EditorCanvas, SaveTemplateRequest,
    TemplateStore, UpdateTemplateMetaRequest,
};
use crate::records::TemplateSummary;
use crate::theme;

use super::{Confirmation, EditorUiState};

fn meta_fields(ui: &mut egui::Ui, id_salt: &str, meta: &mut TemplateMeta) {
    egui::Grid::new(id_salt)
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label("Name:");
            ui.text_edit_singleline(&mut meta.name);
            ui.end_row();
            ui.label("Category:");
            ui.text_edit_singleline(&mut meta.category);
            ui.end_row();
            ui.label("Description:");
            ui.text_edit_singleline(&mut meta.description);
            ui.end_row();
        });
}

fn template_row(ui: &mut egui::Ui, summary: &TemplateSummary, ui_state: &mut EditorUiState) -> Option<TemplateId> {
    let mut apply = None;
    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(&summary.name).strong());
            if !summary.category.is_empty() {
                ui.label(egui::RichText::new(&summary.category).weak());
            }
        });
        if !summary.description.is_empty() {
            ui.label(egui::RichText::new(&summary.description).size(11.0));
        }
        ui.horizontal(|ui| {
            let details = if summary.has_image {
                format!("{} text elements", summary.element_count)
            } else {
                format!("{} text elements, no image", summary.element_count)
            };
            ui.label(egui::RichText::new(details).size(11.0).color(theme::HINT_TEXT));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("Delete").clicked() {
                    ui_state.confirmation = Some(Confirmation::DeleteTemplate(summary.id));
                }
                if ui.small_button("Edit").clicked() {
                    ui_state.editing_template = Some((
                        summary.id,
                        TemplateMeta {
                            name: summary.name.clone(),
                            category: summary.category.clone(),
                            description: summary.description.clone(),
                        },
                    ));
                }
                if ui.small_button("Apply").clicked() {
                    apply = Some(summary.id);
                }
            });
        });
    });
    apply
}

pub fn templates_window_ui(
    mut contexts: EguiContexts,
    mut ui_state: ResMut<EditorUiState>,
    canvas: Res<EditorCanvas>,
    store: Res<TemplateStore>,
    mut save_events: MessageWriter<SaveTemplateRequest>,
    mut apply_events: MessageWriter<ApplyTemplateRequest>,
    mut stub_events: MessageWriter<CreateTemplateStubRequest>,
    mut meta_events: MessageWriter<UpdateTemplateMetaRequest>,
) -> Result {
    if !ui_state.show_templates {
        return Ok(());
    }

    let summaries = store.0.summaries();
    let can_save = canvas.session.has_background() && !canvas.session.elements().is_empty();
    let mut open = true;

    egui::Window::new("Templates")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .default_width(360.0)
        .show(contexts.ctx_mut()?, |ui| {
            ui.label(egui::RichText::new("Save current image").strong());
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut ui_state.template_name)
                        .hint_text("Template name")
                        .desired_width(200.0),
                );
                let named = !ui_state.template_name.trim().is_empty();
                if ui
                    .add_enabled(can_save && named, egui::Button::new("Save"))
                    .on_disabled_hover_text("Needs an image, at least one text element and a name")
                    .clicked()
                {
                    save_events.write(SaveTemplateRequest {
                        name: std::mem::take(&mut ui_state.template_name),
                    });
                }
            });

            ui.add_space(8.0);
            ui.separator();

            if summaries.is_empty() {
                ui.label(egui::RichText::new("No templates yet").italics().weak());
            }
            egui::ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                for summary in &summaries {
                    if let Some(id) = template_row(ui, summary, &mut ui_state) {
                        apply_events.write(ApplyTemplateRequest { id });
                    }
                }
            });

            ui.add_space(8.0);
            ui.separator();

            egui::CollapsingHeader::new("New empty template").show(ui, |ui| {
                meta_fields(ui, "new_template_meta", &mut ui_state.new_template);
                let named = !ui_state.new_template.name.trim().is_empty();
                if ui.add_enabled(named, egui::Button::new("Create")).clicked() {
                    stub_events.write(CreateTemplateStubRequest {
                        meta: std::mem::take(&mut ui_state.new_template),
                    });
                }
            });
        });

    if !open {
        ui_state.show_templates = false;
    }

    // Metadata editor
    let mut finished = false;
    if let Some((id, meta)) = ui_state.editing_template.as_mut() {
        egui::Window::new("Edit Template")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(contexts.ctx_mut()?, |ui| {
                meta_fields(ui, "edit_template_meta", meta);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    let named = !meta.name.trim().is_empty();
                    if ui.add_enabled(named, egui::Button::new("Save")).clicked() {
                        meta_events.write(UpdateTemplateMetaRequest {
                            id: *id,
                            meta: meta.clone(),
                        });
                        finished = true;
                    }
                    if ui.button("Cancel").clicked() {
                        finished = true;
                    }
                });
            });
    }
    if finished {
        ui_state.editing_template = None;
    }

    Ok(())
}
