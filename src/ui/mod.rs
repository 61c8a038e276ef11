mod dialogs;
pub mod input;
mod signature_window;
mod surface;
mod templates_window;
mod text_panel;
mod toolbar;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::canvas::{ElementId, TemplateId, TemplateMeta};
use crate::config::ConfigResetNotification;
use crate::editor::SignaturePad;

pub use signature_window::SignaturePicker;

/// Resource that tracks whether any modal dialog is currently open.
/// The editing surface ignores pointer input while this is set.
#[derive(Resource, Default)]
pub struct DialogState {
    /// True when any modal dialog is open that should block editor input
    pub any_modal_open: bool,
}

/// Destructive actions waiting for the user to confirm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    DeleteElement(ElementId),
    ClearAll,
    DeleteTemplate(TemplateId),
}

impl Confirmation {
    pub fn title(&self) -> &'static str {
        match self {
            Confirmation::DeleteElement(_) => "Delete Text",
            Confirmation::ClearAll => "Clear All Text",
            Confirmation::DeleteTemplate(_) => "Delete Template",
        }
    }
}

/// Window visibility and form state for the editor UI
#[derive(Resource, Default)]
pub struct EditorUiState {
    pub show_templates: bool,
    /// Name typed into "Save current image"
    pub template_name: String,
    pub new_template: TemplateMeta,
    pub editing_template: Option<(TemplateId, TemplateMeta)>,
    pub confirmation: Option<Confirmation>,
    pub signature_picker: SignaturePicker,
}

impl EditorUiState {
    pub fn open_signature_picker(&mut self) {
        self.signature_picker.is_open = true;
        self.signature_picker.needs_refresh = true;
    }
}

/// System to aggregate all dialog open states into a single resource.
/// Runs in First schedule before input handlers.
fn update_dialog_state(
    ui_state: Res<EditorUiState>,
    config_reset: Res<ConfigResetNotification>,
    pad: Option<Res<SignaturePad>>,
    mut dialog_state: ResMut<DialogState>,
) {
    dialog_state.any_modal_open = ui_state.confirmation.is_some()
        || ui_state.editing_template.is_some()
        || ui_state.signature_picker.is_open
        || config_reset.show
        || pad.is_some_and(|p| p.is_open());
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogState>()
            .init_resource::<EditorUiState>()
            .init_resource::<surface::SurfaceView>()
            .init_resource::<signature_window::SignatureView>()
            .add_systems(First, update_dialog_state)
            // Panels must render before the central surface so it fills the rest
            .add_systems(
                EguiPrimaryContextPass,
                (
                    toolbar::toolbar_ui,
                    text_panel::text_panel_ui,
                    surface::editor_surface_ui,
                )
                    .chain(),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    // Last: dialogs/overlays
                    templates_window::templates_window_ui,
                    signature_window::signature_picker_ui,
                    signature_window::signature_pad_ui,
                    dialogs::confirmation_dialog_ui,
                    dialogs::config_reset_notification_ui,
                    dialogs::notifications_ui,
                )
                    .chain()
                    .after(surface::editor_surface_ui),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_signature_picker_requests_refresh() {
        let mut state = EditorUiState::default();
        state.open_signature_picker();
        assert!(state.signature_picker.is_open);
        assert!(state.signature_picker.needs_refresh);
    }

    #[test]
    fn test_confirmation_titles() {
        assert_eq!(Confirmation::ClearAll.title(), "Clear All Text");
        assert_eq!(
            Confirmation::DeleteTemplate(TemplateId::new()).title(),
            "Delete Template"
        );
    }
}
