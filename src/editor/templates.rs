//! Template library commands.

use bevy::prelude::*;

use crate::canvas::TemplateApplied;

use super::messages::{
    ApplyTemplateRequest, CreateTemplateStubRequest, DeleteTemplateRequest, OpenImageRequest,
    SaveTemplateRequest, UpdateTemplateMetaRequest,
};
use super::notifications::Notifications;
use super::{EditorCanvas, TemplateStore};

pub fn handle_save_template(
    mut events: MessageReader<SaveTemplateRequest>,
    canvas: Res<EditorCanvas>,
    mut store: ResMut<TemplateStore>,
    mut notifications: ResMut<Notifications>,
) {
    for event in events.read() {
        let template = match canvas.session.save_as_template(&event.name) {
            Ok(template) => template,
            Err(e) => {
                notifications.error("Cannot save template", e);
                continue;
            }
        };
        let name = template.name.clone();
        match store.0.insert(template) {
            Ok(id) => {
                info!("Saved template {:?} as {}", name, id);
                notifications.success(format!("Template \"{}\" saved", name));
            }
            Err(e) => notifications.error("Could not store template", e),
        }
    }
}

pub fn handle_apply_template(
    mut events: MessageReader<ApplyTemplateRequest>,
    mut canvas: ResMut<EditorCanvas>,
    store: Res<TemplateStore>,
    mut notifications: ResMut<Notifications>,
    mut open_events: MessageWriter<OpenImageRequest>,
) {
    for event in events.read() {
        let Some(template) = store.0.get(event.id) else {
            notifications.error("Cannot apply template", format!("template {} not found", event.id));
            continue;
        };

        match canvas.session.apply_template(template) {
            Ok(TemplateApplied::Ready) => {
                notifications.success(format!("Applied \"{}\"", template.name));
            }
            Ok(TemplateApplied::NeedsImage) => {
                notifications.success(format!(
                    "\"{}\" has no image yet, choose one to continue",
                    template.name
                ));
                open_events.write(OpenImageRequest);
            }
            Err(e) => notifications.error("Could not apply template", e),
        }
    }
}

pub fn handle_create_template_stub(
    mut events: MessageReader<CreateTemplateStubRequest>,
    mut store: ResMut<TemplateStore>,
    mut notifications: ResMut<Notifications>,
) {
    for event in events.read() {
        match store.0.create_stub(&event.meta) {
            Ok(_) => notifications.success(format!("Template \"{}\" created", event.meta.name.trim())),
            Err(e) => notifications.error("Cannot create template", e),
        }
    }
}

pub fn handle_update_template_meta(
    mut events: MessageReader<UpdateTemplateMetaRequest>,
    mut store: ResMut<TemplateStore>,
    mut notifications: ResMut<Notifications>,
) {
    for event in events.read() {
        match store.0.update_meta(event.id, &event.meta) {
            Ok(()) => notifications.success("Template updated"),
            Err(e) => notifications.error("Cannot update template", e),
        }
    }
}

pub fn handle_delete_template(
    mut events: MessageReader<DeleteTemplateRequest>,
    mut store: ResMut<TemplateStore>,
    mut notifications: ResMut<Notifications>,
) {
    for event in events.read() {
        match store.0.delete(event.id) {
            Ok(true) => notifications.success("Template deleted"),
            Ok(false) => debug!("Template {} already gone", event.id),
            Err(e) => notifications.error("Could not delete template", e),
        }
    }
}
