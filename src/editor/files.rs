//! Save and load requests for the running editor.
//!
//! Errors never touch the session; they are logged and kept in
//! [`PersistenceStatus`] for the UI to show.

use bevy::prelude::*;
use std::path::PathBuf;

use crate::config::{AppConfig, UpdateLastSavePathRequest};
use crate::habitat::persistence::{load_snapshot, save_snapshot};

use super::session::EditorSession;

/// How long the "saved" line stays in the toolbar
pub const SAVE_TOAST_SECS: f64 = 4.0;

#[derive(Message)]
pub struct SaveHabitatRequest;

#[derive(Message)]
pub struct LoadHabitatRequest {
    pub path: PathBuf,
}

/// Snapshot to open once the editor is up (from the command line)
#[derive(Resource, Default)]
pub struct StartupLoad {
    pub path: Option<PathBuf>,
}

/// Outcome of the last save or load, for display
#[derive(Resource, Default)]
pub struct PersistenceStatus {
    /// Last successful save and the elapsed time it happened at
    pub last_saved: Option<(PathBuf, f64)>,
    /// Last failure, shown until dismissed
    pub error: Option<String>,
}

impl PersistenceStatus {
    /// File name of a save made less than [`SAVE_TOAST_SECS`] ago
    pub fn recent_save(&self, now: f64) -> Option<String> {
        let (path, at) = self.last_saved.as_ref()?;
        if now - at > SAVE_TOAST_SECS {
            return None;
        }
        path.file_name().map(|name| name.to_string_lossy().into_owned())
    }
}

pub fn save_habitat_system(
    mut events: MessageReader<SaveHabitatRequest>,
    session: Res<EditorSession>,
    config: Res<AppConfig>,
    time: Res<Time>,
    mut status: ResMut<PersistenceStatus>,
    mut config_events: MessageWriter<UpdateLastSavePathRequest>,
) {
    // Several requests in one frame still produce one file
    if events.read().count() == 0 {
        return;
    }

    let dir = config.data.resolved_saves_dir();
    match save_snapshot(&session.habitat, session.camera.pose(), &dir) {
        Ok(path) => {
            status.last_saved = Some((path.clone(), time.elapsed_secs_f64()));
            status.error = None;
            config_events.write(UpdateLastSavePathRequest { path });
        }
        Err(e) => {
            error!("Failed to save habitat: {}", e);
            status.error = Some(format!("Failed to save habitat: {}", e));
        }
    }
}

pub fn load_habitat_system(
    mut events: MessageReader<LoadHabitatRequest>,
    mut session: ResMut<EditorSession>,
    mut status: ResMut<PersistenceStatus>,
    mut config_events: MessageWriter<UpdateLastSavePathRequest>,
) {
    for event in events.read() {
        match load_snapshot(&event.path) {
            Ok(loaded) => {
                session.apply_loaded(loaded);
                status.error = None;
                config_events.write(UpdateLastSavePathRequest {
                    path: event.path.clone(),
                });
            }
            Err(e) => {
                error!("Failed to load {:?}: {}", event.path, e);
                status.error = Some(e.to_string());
            }
        }
    }
}

/// Turns the command-line `--load` path into a load request
pub fn queue_startup_load(
    mut startup: ResMut<StartupLoad>,
    mut load_events: MessageWriter<LoadHabitatRequest>,
) {
    if let Some(path) = startup.path.take() {
        info!("Opening {:?} from command line", path);
        load_events.write(LoadHabitatRequest { path });
    }
}
