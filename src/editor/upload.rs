//! Background image upload: file picker, drag-and-drop and async decode.
//!
//! Decoding runs on the compute pool. Results are applied in the order they
//! complete, so a later-finishing decode replaces an earlier one. Until a
//! decode completes the current background stays in place.

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use bevy::window::FileDragAndDrop;
use futures_lite::future;
use image::RgbaImage;
use std::path::{Path, PathBuf};

use crate::canvas::export::{IMAGE_EXTENSIONS, check_image_path, decode_image};
use crate::canvas::CanvasError;

use super::messages::{LoadImageRequest, OpenImageRequest};
use super::notifications::Notifications;
use super::EditorCanvas;

/// Pending file picker
#[derive(Component)]
pub struct PickImageTask(pub Task<Option<PathBuf>>);

/// Outcome of reading and decoding one file
pub struct DecodeResult {
    pub path: PathBuf,
    pub image: Result<RgbaImage, CanvasError>,
}

#[derive(Component)]
pub struct DecodeImageTask(pub Task<DecodeResult>);

fn read_and_decode(path: &Path) -> Result<RgbaImage, CanvasError> {
    let bytes = std::fs::read(path).map_err(|e| CanvasError::Decode(e.to_string()))?;
    decode_image(&bytes)
}

pub fn open_image_picker(
    mut commands: Commands,
    mut events: MessageReader<OpenImageRequest>,
    pending: Query<(), With<PickImageTask>>,
) {
    for _ in events.read() {
        if !pending.is_empty() {
            continue;
        }
        let task_pool = AsyncComputeTaskPool::get();
        let task = task_pool.spawn(async {
            rfd::AsyncFileDialog::new()
                .set_title("Choose an image")
                .add_filter("Images", IMAGE_EXTENSIONS)
                .pick_file()
                .await
                .map(|h| h.path().to_path_buf())
        });
        commands.spawn(PickImageTask(task));
    }
}

pub fn poll_pick_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut PickImageTask)>,
    mut load_events: MessageWriter<LoadImageRequest>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            if let Some(path) = result {
                load_events.write(LoadImageRequest { path });
            }
            commands.entity(entity).despawn();
        }
    }
}

/// Files dropped onto the window are treated as uploads
pub fn handle_file_drop(
    mut drops: MessageReader<FileDragAndDrop>,
    mut load_events: MessageWriter<LoadImageRequest>,
) {
    for event in drops.read() {
        if let FileDragAndDrop::DroppedFile { path_buf, .. } = event {
            load_events.write(LoadImageRequest {
                path: path_buf.clone(),
            });
        }
    }
}

pub fn start_image_decode(
    mut commands: Commands,
    mut events: MessageReader<LoadImageRequest>,
    mut notifications: ResMut<Notifications>,
) {
    for event in events.read() {
        if let Err(e) = check_image_path(&event.path) {
            notifications.error("Cannot use this file", e);
            continue;
        }

        info!("Decoding {:?}", event.path);
        let path = event.path.clone();
        let task_pool = AsyncComputeTaskPool::get();
        let task = task_pool.spawn(async move {
            let image = read_and_decode(&path);
            DecodeResult { path, image }
        });
        commands.spawn(DecodeImageTask(task));
    }
}

pub fn poll_decode_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut DecodeImageTask)>,
    mut canvas: ResMut<EditorCanvas>,
    mut notifications: ResMut<Notifications>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };
        commands.entity(entity).despawn();

        let applied = result
            .image
            .and_then(|image| canvas.session.set_background(image));
        match applied {
            Ok(()) => {
                let size = canvas.session.surface_size();
                info!("Loaded {:?} at {}x{}", result.path, size.x, size.y);
            }
            Err(e) => notifications.error("Could not load image", e),
        }
    }
}

/// True while a picker or decode is still running
pub fn upload_in_progress(
    picks: &Query<(), With<PickImageTask>>,
    decodes: &Query<(), With<DecodeImageTask>>,
) -> bool {
    !picks.is_empty() || !decodes.is_empty()
}
