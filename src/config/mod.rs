use bevy::math::UVec2;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::canvas::{TextColor, TextStyle};
use crate::constants::{
    MAX_SURFACE_HEIGHT, MAX_SURFACE_WIDTH, SIGNATURE_HEIGHT, SIGNATURE_STROKE_WIDTH,
    SIGNATURE_WIDTH,
};

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Signature pad settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureConfig {
    pub width: u32,
    pub height: u32,
    pub stroke_width: f32,
    pub color: TextColor,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            width: SIGNATURE_WIDTH,
            height: SIGNATURE_HEIGHT,
            stroke_width: SIGNATURE_STROKE_WIDTH,
            color: TextColor::BLACK,
        }
    }
}

impl SignatureConfig {
    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width.max(1), self.height.max(1))
    }
}

fn default_max_surface() -> [u32; 2] {
    [MAX_SURFACE_WIDTH, MAX_SURFACE_HEIGHT]
}

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfigData {
    /// Records directory override (defaults to the platform data dir)
    #[serde(default)]
    pub records_dir: Option<PathBuf>,

    /// Directory of the last saved export, used as the dialog start location
    #[serde(default)]
    pub last_export_dir: Option<PathBuf>,

    /// Style new text starts with
    #[serde(default)]
    pub draft_style: TextStyle,

    /// Extra TTF/OTF files registered as font families (named by file stem)
    #[serde(default)]
    pub font_files: Vec<PathBuf>,

    #[serde(default)]
    pub signature: SignatureConfig,

    /// Bounding box uploads are fitted into
    #[serde(default = "default_max_surface")]
    pub max_surface: [u32; 2],
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            records_dir: None,
            last_export_dir: None,
            draft_style: TextStyle::default(),
            font_files: Vec::new(),
            signature: SignatureConfig::default(),
            max_surface: default_max_surface(),
        }
    }
}

impl AppConfigData {
    pub fn records_dir(&self) -> PathBuf {
        self.records_dir
            .clone()
            .unwrap_or_else(crate::paths::default_records_dir)
    }

    pub fn max_surface(&self) -> UVec2 {
        UVec2::from_array(self.max_surface).max(UVec2::ONE)
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: get_config_path(),
            dirty: false,
        }
    }
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to remember where the last export was saved
#[derive(Message)]
pub struct UpdateLastExportDirRequest {
    pub path: PathBuf,
}

/// Message to store the current draft style as the default for new text
#[derive(Message)]
pub struct UpdateDraftStyleRequest {
    pub style: TextStyle,
}

/// Get the path to the config file (platform-appropriate location)
fn get_config_path() -> PathBuf {
    crate::paths::config_file()
}

/// Result of loading config from disk
struct LoadConfigResult {
    config: AppConfig,
    /// Error message if config was reset to defaults due to an error
    reset_reason: Option<String>,
}

/// Load configuration from disk
fn load_config() -> LoadConfigResult {
    let config_path = get_config_path();

    let (data, reset_reason) = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match parse_config(&json) {
                Ok(data) => {
                    info!("Loaded config from {:?}", config_path);
                    (data, None)
                }
                Err(e) => {
                    warn!("Failed to parse config file: {}", e);
                    (
                        AppConfigData::default(),
                        Some(format!("Configuration file was corrupted: {}", e)),
                    )
                }
            },
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    AppConfigData::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (AppConfigData::default(), None)
    };

    LoadConfigResult {
        config: AppConfig {
            data,
            config_path,
            dirty: false,
        },
        reset_reason,
    }
}

/// Parse config JSON, rejecting values the editor cannot work with.
fn parse_config(json: &str) -> Result<AppConfigData, String> {
    let data: AppConfigData = serde_json::from_str(json).map_err(|e| e.to_string())?;
    data.draft_style.validate().map_err(|e| e.to_string())?;
    Ok(data)
}

/// Save configuration to disk
fn save_config(config: &AppConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<AppConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    let result = load_config();
    config.data = result.config.data;
    config.config_path = result.config.config_path;
    config.dirty = result.config.dirty;

    // Set notification if config was reset due to an error
    if let Some(reason) = result.reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// Startup system to report configured font files that no longer exist
fn check_font_files_exist(config: Res<AppConfig>) {
    for path in config.data.font_files.iter().filter(|p| !p.exists()) {
        warn!("Configured font file is missing: {:?}", path);
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

/// System to update the last export directory
fn update_last_export_dir_system(
    mut events: MessageReader<UpdateLastExportDirRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if config.data.last_export_dir.as_ref() == Some(&event.path) {
            continue;
        }
        config.data.last_export_dir = Some(event.path.clone());
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

/// System to update the default draft style
fn update_draft_style_system(
    mut events: MessageReader<UpdateDraftStyleRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.data.draft_style = event.style.clone();
        config.dirty = true;
        save_events.write(SaveConfigRequest);
        info!("Default text style updated");
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<UpdateLastExportDirRequest>()
            .add_message::<UpdateDraftStyleRequest>()
            .add_systems(
                Startup,
                (load_config_system, check_font_files_exist)
                    .chain()
                    .in_set(ConfigLoaded),
            )
            .add_systems(
                Update,
                (
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                    update_last_export_dir_system.run_if(on_message::<UpdateLastExportDirRequest>),
                    update_draft_style_system.run_if(on_message::<UpdateDraftStyleRequest>),
                ),
            );
    }
}
