//! Bevy glue around the canvas engine.
//!
//! The engine types live in [`crate::canvas`]; this module owns them as
//! resources and turns UI messages into engine calls. Long-running work
//! (file pickers, image decoding) runs on the async compute pool and is polled
//! each frame.

mod export;
pub mod messages;
pub mod notifications;
pub mod signature;
mod templates;
pub mod upload;

pub use messages::*;
pub use notifications::{Notification, NotificationKind, Notifications};
pub use signature::{SignaturePad, SigningTarget};

use bevy::prelude::*;

use crate::canvas::{EditorSession, FontBook, SignatureCapture};
use crate::config::{AppConfig, ConfigLoaded};
use crate::records::{JsonFileStore, MemoryStore, RecordStore, TemplateLibrary};

/// The annotation session shown in the central view
#[derive(Resource)]
pub struct EditorCanvas {
    pub session: EditorSession,
}

/// Stored templates
#[derive(Resource)]
pub struct TemplateStore(pub TemplateLibrary);

/// Store holding the agreement records signatures are written to
#[derive(Resource)]
pub struct AgreementStore(pub Box<dyn RecordStore>);

fn load_fonts(config: &AppConfig) -> FontBook {
    let mut fonts = FontBook::with_builtin_fonts();
    for path in config.data.font_files.iter().filter(|p| p.exists()) {
        match fonts.register_file(path) {
            Ok(family) => info!("Registered font family {:?} from {:?}", family, path),
            Err(e) => warn!("Failed to load font {:?}: {}", path, e),
        }
    }
    fonts
}

fn open_template_library(config: &AppConfig, notifications: &mut Notifications) -> TemplateLibrary {
    let dir = config.data.records_dir();
    let opened = TemplateLibrary::open(Box::new(JsonFileStore::new(&dir)));
    match opened {
        Ok(library) => library,
        Err(e) => {
            // The unreadable file is left alone; edits this run stay in memory.
            notifications.error("Template records could not be read", e);
            TemplateLibrary::empty(Box::new(MemoryStore::new()))
        }
    }
}

/// Startup system building the editor resources from the loaded config
fn setup_editor(
    mut commands: Commands,
    config: Res<AppConfig>,
    mut notifications: ResMut<Notifications>,
) {
    if let Err(e) = crate::paths::ensure_directories() {
        warn!("Failed to create data directories: {}", e);
    }

    let mut session = EditorSession::new(load_fonts(&config), config.data.max_surface());
    session.draft.style = config.data.draft_style.clone();
    if let Err(e) = session.render() {
        notifications.error("Could not prepare canvas", e);
    }

    let signature = &config.data.signature;
    let capture = SignatureCapture::with_style(signature.size(), signature.stroke_width, signature.color)
        .or_else(|e| {
            warn!("Invalid signature pad settings, using defaults: {}", e);
            SignatureCapture::new(crate::config::SignatureConfig::default().size())
        });
    match capture {
        Ok(capture) => commands.insert_resource(SignaturePad::new(capture)),
        Err(e) => notifications.error("Signature pad unavailable", e),
    }

    let library = open_template_library(&config, &mut notifications);
    commands.insert_resource(TemplateStore(library));
    commands.insert_resource(AgreementStore(Box::new(JsonFileStore::new(
        config.data.records_dir(),
    ))));
    commands.insert_resource(EditorCanvas { session });
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Notifications>()
            .add_message::<OpenImageRequest>()
            .add_message::<LoadImageRequest>()
            .add_message::<ExportImageRequest>()
            .add_message::<PrintImageRequest>()
            .add_message::<SaveTemplateRequest>()
            .add_message::<ApplyTemplateRequest>()
            .add_message::<CreateTemplateStubRequest>()
            .add_message::<UpdateTemplateMetaRequest>()
            .add_message::<DeleteTemplateRequest>()
            .add_message::<OpenSignatureRequest>()
            .add_message::<SaveSignatureRequest>()
            .add_systems(Startup, (spawn_camera, setup_editor.after(ConfigLoaded)))
            .add_systems(
                Update,
                (
                    upload::open_image_picker.run_if(on_message::<OpenImageRequest>),
                    upload::poll_pick_tasks,
                    upload::handle_file_drop,
                    upload::start_image_decode.run_if(on_message::<LoadImageRequest>),
                    upload::poll_decode_tasks,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    export::handle_export_image.run_if(on_message::<ExportImageRequest>),
                    export::handle_print_image.run_if(on_message::<PrintImageRequest>),
                    templates::handle_save_template.run_if(on_message::<SaveTemplateRequest>),
                    templates::handle_apply_template.run_if(on_message::<ApplyTemplateRequest>),
                    templates::handle_create_template_stub
                        .run_if(on_message::<CreateTemplateStubRequest>),
                    templates::handle_update_template_meta
                        .run_if(on_message::<UpdateTemplateMetaRequest>),
                    templates::handle_delete_template.run_if(on_message::<DeleteTemplateRequest>),
                    signature::handle_open_signature.run_if(on_message::<OpenSignatureRequest>),
                    signature::handle_save_signature.run_if(on_message::<SaveSignatureRequest>),
                    notifications::expire_notifications,
                ),
            );
    }
}
