//! Confirmation prompts, the config reset notice and notification toasts.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::config::ConfigResetNotification;
use crate::editor::{
    DeleteTemplateRequest, EditorCanvas, NotificationKind, Notifications, TemplateStore,
};
use crate::theme;

use super::{Confirmation, EditorUiState};

/// Confirmation prompt for destructive actions
pub fn confirmation_dialog_ui(
    mut contexts: EguiContexts,
    mut ui_state: ResMut<EditorUiState>,
    mut canvas: ResMut<EditorCanvas>,
    store: Res<TemplateStore>,
    mut notifications: ResMut<Notifications>,
    mut delete_template_events: MessageWriter<DeleteTemplateRequest>,
) -> Result {
    let Some(confirmation) = ui_state.confirmation else {
        return Ok(());
    };

    let message = match confirmation {
        Confirmation::DeleteElement(_) => "Delete this text element?".to_string(),
        Confirmation::ClearAll => format!(
            "Remove all {} text elements from the image?",
            canvas.session.elements().len()
        ),
        Confirmation::DeleteTemplate(id) => match store.0.get(id) {
            Some(template) => format!("Delete template \"{}\"?", template.name),
            None => "Delete this template?".to_string(),
        },
    };

    let mut answered = None;
    egui::Window::new(confirmation.title())
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label(message);
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Delete").clicked() {
                    answered = Some(true);
                }
                if ui.button("Cancel").clicked() {
                    answered = Some(false);
                }
            });
        });

    let Some(confirmed) = answered else {
        return Ok(());
    };
    ui_state.confirmation = None;
    if !confirmed {
        return Ok(());
    }

    match confirmation {
        Confirmation::DeleteElement(id) => {
            if let Err(e) = canvas.session.remove_element(id) {
                notifications.error("Cannot delete text", e);
            }
        }
        Confirmation::ClearAll => {
            if let Err(e) = canvas.session.clear_all() {
                notifications.error("Cannot clear text", e);
            }
        }
        Confirmation::DeleteTemplate(id) => {
            delete_template_events.write(DeleteTemplateRequest { id });
        }
    }
    Ok(())
}

/// Dialog shown when config was reset to defaults due to an error
pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    egui::Window::new("Configuration Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Your settings could not be loaded and were reset to defaults.");
            if let Some(reason) = &notification.reason {
                ui.add_space(4.0);
                ui.label(egui::RichText::new(reason).size(11.0).color(theme::HINT_TEXT));
            }
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                notification.show = false;
                notification.reason = None;
            }
        });
    Ok(())
}

/// Toasts stacked in the bottom-right corner
pub fn notifications_ui(mut contexts: EguiContexts, notifications: Res<Notifications>) -> Result {
    if notifications.items.is_empty() {
        return Ok(());
    }

    egui::Area::new(egui::Id::new("notifications"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0])
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(contexts.ctx_mut()?, |ui| {
            for item in &notifications.items {
                let fill = match item.kind {
                    NotificationKind::Success => theme::NOTIFICATION_SUCCESS,
                    NotificationKind::Error => theme::NOTIFICATION_ERROR,
                };
                egui::Frame::new()
                    .fill(fill)
                    .corner_radius(4.0)
                    .inner_margin(egui::Margin::symmetric(12, 8))
                    .show(ui, |ui| {
                        ui.set_max_width(360.0);
                        ui.label(egui::RichText::new(&item.text).color(egui::Color32::WHITE));
                    });
                ui.add_space(4.0);
            }
        });
    Ok(())
}
