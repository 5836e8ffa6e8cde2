use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_DOT_RADIUS, DEFAULT_HEX_SIZE, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM,
    DEFAULT_PAN_STEP_PX, DEFAULT_ZOOM_STEP,
};

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Tunables for the hex editor canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Hexagon circumradius in world units
    pub hex_size: f32,
    /// Marker radius in screen pixels
    pub dot_radius: f32,
    /// Screen pixels moved per pan button press
    pub pan_step_px: f32,
    /// Zoom multiplier per wheel notch / button press
    pub zoom_step: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            hex_size: DEFAULT_HEX_SIZE,
            dot_radius: DEFAULT_DOT_RADIUS,
            pan_step_px: DEFAULT_PAN_STEP_PX,
            zoom_step: DEFAULT_ZOOM_STEP,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }
}

impl EditorSettings {
    /// Replace unusable values with defaults so the editor never divides by zero.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let positive = |v: f32, fallback: f32| if v.is_finite() && v > 0.0 { v } else { fallback };

        let mut min_zoom = positive(self.min_zoom, defaults.min_zoom);
        let mut max_zoom = positive(self.max_zoom, defaults.max_zoom);
        if min_zoom > max_zoom {
            std::mem::swap(&mut min_zoom, &mut max_zoom);
        }

        Self {
            hex_size: positive(self.hex_size, defaults.hex_size),
            dot_radius: positive(self.dot_radius, defaults.dot_radius),
            pan_step_px: positive(self.pan_step_px, defaults.pan_step_px),
            zoom_step: if self.zoom_step.is_finite() && self.zoom_step > 1.0 {
                self.zoom_step
            } else {
                defaults.zoom_step
            },
            min_zoom,
            max_zoom,
        }
    }
}

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfigData {
    /// Directory snapshots are written to (platform default when unset)
    #[serde(default)]
    pub saves_dir: Option<PathBuf>,

    /// Last saved or loaded snapshot (remembered, not auto-loaded)
    #[serde(default)]
    pub last_save_path: Option<PathBuf>,

    #[serde(default)]
    pub editor: EditorSettings,
}

impl AppConfigData {
    pub fn resolved_saves_dir(&self) -> PathBuf {
        self.saves_dir
            .clone()
            .unwrap_or_else(crate::paths::default_saves_dir)
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
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

/// Command-line overrides applied on top of the loaded config
#[derive(Resource, Default, Clone)]
pub struct ConfigOverrides {
    pub saves_dir: Option<PathBuf>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to update the last snapshot path in config
#[derive(Message)]
pub struct UpdateLastSavePathRequest {
    pub path: PathBuf,
}

/// Parse config JSON, falling back to defaults on error.
///
/// Returns the data and, when the file was unusable, the reason.
fn parse_config(json: &str) -> (AppConfigData, Option<String>) {
    match serde_json::from_str::<AppConfigData>(json) {
        Ok(mut data) => {
            data.editor = data.editor.sanitized();
            (data, None)
        }
        Err(e) => (
            AppConfigData::default(),
            Some(format!("Configuration file was corrupted: {}", e)),
        ),
    }
}

/// Load configuration from disk
fn load_config(config_path: PathBuf) -> AppConfig {
    let data = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(json) => {
                let (data, reset_reason) = parse_config(&json);
                match reset_reason {
                    Some(reason) => warn!("{}; using defaults", reason),
                    None => info!("Loaded config from {:?}", config_path),
                }
                data
            }
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                AppConfigData::default()
            }
        }
    } else {
        info!("No config file found, using defaults");
        AppConfigData::default()
    };

    AppConfig {
        data,
        config_path,
        dirty: false,
    }
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
fn load_config_system(mut config: ResMut<AppConfig>, overrides: Option<Res<ConfigOverrides>>) {
    let loaded = load_config(config.config_path.clone());
    config.data = loaded.data;
    config.dirty = false;

    if let Some(saves_dir) = overrides.and_then(|o| o.saves_dir.clone()) {
        info!("Using saves directory {:?} from command line", saves_dir);
        config.data.saves_dir = Some(saves_dir);
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

/// System to update last snapshot path
fn update_last_save_path_system(
    mut events: MessageReader<UpdateLastSavePathRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.data.last_save_path = Some(event.path.clone());
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .add_message::<SaveConfigRequest>()
            .add_message::<UpdateLastSavePathRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                (
                    update_last_save_path_system.run_if(on_message::<UpdateLastSavePathRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_data_default() {
        let data = AppConfigData::default();
        assert!(data.saves_dir.is_none());
        assert!(data.last_save_path.is_none());
        assert_eq!(data.editor, EditorSettings::default());
    }

    #[test]
    fn test_app_config_data_serialization() {
        let data = AppConfigData {
            saves_dir: Some(PathBuf::from("/tmp/habitat_saves")),
            last_save_path: Some(PathBuf::from("/tmp/habitat_saves/habitat_1.json")),
            editor: EditorSettings {
                hex_size: 60.0,
                ..Default::default()
            },
        };

        let json = serde_json::to_string(&data).unwrap();
        let parsed: AppConfigData = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.saves_dir, data.saves_dir);
        assert_eq!(parsed.last_save_path, data.last_save_path);
        assert_eq!(parsed.editor.hex_size, 60.0);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let (data, reason) = parse_config(r#"{"editor": {"hex_size": 30.0}}"#);
        assert!(reason.is_none());
        assert_eq!(data.editor.hex_size, 30.0);
        assert_eq!(data.editor.zoom_step, DEFAULT_ZOOM_STEP);
        assert!(data.saves_dir.is_none());
    }

    #[test]
    fn test_corrupt_config_resets() {
        let (data, reason) = parse_config("{ not json");
        assert!(reason.is_some());
        assert!(data.saves_dir.is_none());
    }

    #[test]
    fn test_sanitized_replaces_invalid_values() {
        let settings = EditorSettings {
            hex_size: -4.0,
            dot_radius: f32::NAN,
            pan_step_px: 0.0,
            zoom_step: 0.5,
            min_zoom: 5.0,
            max_zoom: 0.5,
        }
        .sanitized();

        assert_eq!(settings.hex_size, DEFAULT_HEX_SIZE);
        assert_eq!(settings.dot_radius, DEFAULT_DOT_RADIUS);
        assert_eq!(settings.pan_step_px, DEFAULT_PAN_STEP_PX);
        assert_eq!(settings.zoom_step, DEFAULT_ZOOM_STEP);
        assert_eq!(settings.min_zoom, 0.5);
        assert_eq!(settings.max_zoom, 5.0);
    }

    #[test]
    fn test_resolved_saves_dir_prefers_config() {
        let data = AppConfigData {
            saves_dir: Some(PathBuf::from("custom")),
            ..Default::default()
        };
        assert_eq!(data.resolved_saves_dir(), PathBuf::from("custom"));
        assert_eq!(
            AppConfigData::default().resolved_saves_dir(),
            crate::paths::default_saves_dir()
        );
    }
}
