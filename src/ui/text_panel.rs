//! Left panel: draft text, style controls and the element list.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::canvas::{CanvasResult, ElementId, TextColor};
use crate::config::UpdateDraftStyleRequest;
use crate::constants::{MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::editor::{EditorCanvas, Notifications};
use crate::theme;

use super::{Confirmation, EditorUiState};

/// Shorten element text for list rows.
pub fn list_label(text: &str, max_chars: usize) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    let mut label: String = first_line.chars().take(max_chars).collect();
    if first_line.chars().count() > max_chars || text.lines().count() > 1 {
        label.push_str("...");
    }
    label
}

fn color_edit(ui: &mut egui::Ui, color: &mut TextColor) -> bool {
    let mut rgba = [color.r, color.g, color.b, color.a];
    let changed = ui.color_edit_button_srgba_unmultiplied(&mut rgba).changed();
    if changed {
        *color = TextColor::rgba(rgba[0], rgba[1], rgba[2], rgba[3]);
    }
    changed
}

enum RowAction {
    Select(ElementId),
    Edit(ElementId),
    Delete(ElementId),
}

fn report(result: CanvasResult<impl Sized>, context: &str, notifications: &mut Notifications) {
    if let Err(e) = result {
        notifications.error(context, e);
    }
}

pub fn text_panel_ui(
    mut contexts: EguiContexts,
    mut canvas: ResMut<EditorCanvas>,
    mut ui_state: ResMut<EditorUiState>,
    mut notifications: ResMut<Notifications>,
    mut style_events: MessageWriter<UpdateDraftStyleRequest>,
) -> Result {
    let families: Vec<String> = canvas
        .session
        .fonts()
        .families()
        .into_iter()
        .map(str::to_string)
        .collect();

    egui::SidePanel::left("text_panel")
        .default_width(280.0)
        .resizable(true)
        .show(contexts.ctx_mut()?, |ui| {
            let session = &mut canvas.session;
            let has_background = session.has_background();

            ui.heading("Text");
            ui.add_space(4.0);
            ui.add(
                egui::TextEdit::multiline(&mut session.draft.text)
                    .desired_rows(2)
                    .desired_width(f32::INFINITY)
                    .hint_text("Type text, then click the image"),
            );

            ui.add_space(6.0);
            egui::Grid::new("draft_style_grid")
                .num_columns(2)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Size:");
                    ui.add(
                        egui::DragValue::new(&mut session.draft.style.font_size)
                            .speed(0.5)
                            .range(MIN_FONT_SIZE..=MAX_FONT_SIZE)
                            .suffix(" px"),
                    );
                    ui.end_row();

                    ui.label("Color:");
                    ui.horizontal(|ui| {
                        color_edit(ui, &mut session.draft.style.color);
                        for (color, name) in theme::text_swatches() {
                            let swatch = egui::Button::new("")
                                .fill(theme::to_egui(color))
                                .min_size(egui::vec2(16.0, 16.0));
                            if ui.add(swatch).on_hover_text(name).clicked() {
                                session.draft.style.color = color;
                            }
                        }
                    });
                    ui.end_row();

                    ui.label("Font:");
                    egui::ComboBox::from_id_salt("draft_font_family")
                        .selected_text(session.draft.style.font_family.clone())
                        .show_ui(ui, |ui| {
                            for family in &families {
                                ui.selectable_value(
                                    &mut session.draft.style.font_family,
                                    family.clone(),
                                    family.as_str(),
                                );
                            }
                        });
                    ui.end_row();
                });

            ui.add_space(8.0);
            let can_place = has_background && session.draft.has_text();
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(can_place, egui::Button::new("Add at Center"))
                    .clicked()
                {
                    let result = session.add_element_at_center();
                    report(result, "Cannot add text", &mut notifications);
                }
                let can_apply = session.selected_id().is_some() && session.draft.has_text();
                if ui
                    .add_enabled(can_apply, egui::Button::new("Apply to Selected"))
                    .on_hover_text("Replace the selected element's text and style")
                    .clicked()
                {
                    let result = session.apply_draft_to_selected();
                    report(result, "Cannot update text", &mut notifications);
                }
            });
            if ui
                .small_button("Use as default style")
                .on_hover_text("New sessions start with this size, color and font")
                .clicked()
            {
                style_events.write(UpdateDraftStyleRequest {
                    style: session.draft.style.clone(),
                });
            }

            if has_background && session.draft.has_text() {
                ui.label(
                    egui::RichText::new("Click empty space on the image to place the text")
                        .size(11.0)
                        .color(theme::HINT_TEXT),
                );
            }

            ui.add_space(8.0);
            ui.separator();

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(format!("Elements ({})", session.elements().len())).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add_enabled(!session.elements().is_empty(), egui::Button::new("Clear All"))
                        .clicked()
                    {
                        ui_state.confirmation = Some(Confirmation::ClearAll);
                    }
                });
            });

            let selected = session.selected_id();
            let mut action = None;
            egui::ScrollArea::vertical().show(ui, |ui| {
                if session.elements().is_empty() {
                    ui.label(egui::RichText::new("No text placed yet").italics().weak());
                }
                for element in session.elements() {
                    ui.horizontal(|ui| {
                        let label = list_label(&element.text, 24);
                        if ui
                            .selectable_label(selected == Some(element.id), label)
                            .clicked()
                        {
                            action = Some(RowAction::Select(element.id));
                        }
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button("Delete").clicked() {
                                action = Some(RowAction::Delete(element.id));
                            }
                            if ui.small_button("Edit").clicked() {
                                action = Some(RowAction::Edit(element.id));
                            }
                        });
                    });
                }
            });

            match action {
                Some(RowAction::Select(id)) => {
                    let result = session.select(Some(id));
                    report(result, "Cannot select text", &mut notifications);
                }
                Some(RowAction::Edit(id)) => {
                    let result = session.edit_element(id);
                    report(result, "Cannot edit text", &mut notifications);
                }
                Some(RowAction::Delete(id)) => {
                    ui_state.confirmation = Some(Confirmation::DeleteElement(id));
                }
                None => {}
            }
        });
    Ok(())
}
