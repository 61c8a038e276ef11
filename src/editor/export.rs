//! Saving and printing the composited image.

use bevy::prelude::*;
use std::path::{Path, PathBuf};

use crate::canvas::export::export_file_name;
use crate::canvas::CanvasResult;
use crate::config::{AppConfig, UpdateLastExportDirRequest};
use crate::paths;

use super::messages::{ExportImageRequest, PrintImageRequest};
use super::notifications::Notifications;
use super::EditorCanvas;

/// Write encoded PNG bytes, creating the parent directory if needed.
fn write_png(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)
}

fn export_bytes(canvas: &EditorCanvas) -> CanvasResult<Vec<u8>> {
    canvas.session.export_raster()
}

/// Save the composited image through a native save dialog
pub fn handle_export_image(
    mut events: MessageReader<ExportImageRequest>,
    canvas: Res<EditorCanvas>,
    config: Res<AppConfig>,
    mut notifications: ResMut<Notifications>,
    mut dir_events: MessageWriter<UpdateLastExportDirRequest>,
) {
    for _ in events.read() {
        let bytes = match export_bytes(&canvas) {
            Ok(bytes) => bytes,
            Err(e) => {
                notifications.error("Could not export image", e);
                continue;
            }
        };

        let file_name = export_file_name(chrono::Utc::now().timestamp_millis());
        let mut dialog = rfd::FileDialog::new()
            .set_title("Save image")
            .add_filter("PNG image", &["png"])
            .set_file_name(&file_name);
        if let Some(dir) = &config.data.last_export_dir {
            dialog = dialog.set_directory(dir);
        }

        let Some(path) = dialog.save_file() else {
            continue;
        };

        match write_png(&path, &bytes) {
            Ok(()) => {
                info!("Exported image to {:?}", path);
                notifications.success(format!("Saved {}", path.display()));
                if let Some(parent) = path.parent() {
                    dir_events.write(UpdateLastExportDirRequest {
                        path: parent.to_path_buf(),
                    });
                }
            }
            Err(e) => notifications.error("Could not write image", e),
        }
    }
}

fn print_path() -> PathBuf {
    paths::exports_dir().join(export_file_name(chrono::Utc::now().timestamp_millis()))
}

/// Write the composited image to the exports folder and hand it to the
/// system viewer, which owns printing.
pub fn handle_print_image(
    mut events: MessageReader<PrintImageRequest>,
    canvas: Res<EditorCanvas>,
    mut notifications: ResMut<Notifications>,
) {
    for _ in events.read() {
        let bytes = match export_bytes(&canvas) {
            Ok(bytes) => bytes,
            Err(e) => {
                notifications.error("Could not prepare image for printing", e);
                continue;
            }
        };

        let path = print_path();
        if let Err(e) = write_png(&path, &bytes) {
            notifications.error("Could not write image", e);
            continue;
        }

        info!("Opening {:?} for printing", path);
        if let Err(e) = open::that(&path) {
            notifications.error("Could not open image viewer", e);
        }
    }
}
