//! Writing and reading snapshot files.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use chrono::{DateTime, Local};

use crate::habitat::world::Habitat;

use super::error::PersistenceError;
use super::snapshot::{parse_snapshot, CameraPose, HabitatSnapshot, LoadedHabitat};

/// Save into `dir` using the current local time for the file name and timestamp.
pub fn save_snapshot(
    habitat: &Habitat,
    camera: CameraPose,
    dir: &Path,
) -> Result<PathBuf, PersistenceError> {
    save_snapshot_at(habitat, camera, dir, Local::now())
}

/// Save into `dir` as `habitat_%Y%m%d_%H%M%S.json`, never overwriting an existing file.
pub fn save_snapshot_at(
    habitat: &Habitat,
    camera: CameraPose,
    dir: &Path,
    now: DateTime<Local>,
) -> Result<PathBuf, PersistenceError> {
    std::fs::create_dir_all(dir).map_err(|source| PersistenceError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let timestamp = now.timestamp_millis() as f64 / 1000.0;
    let snapshot = HabitatSnapshot::capture(habitat, camera, timestamp);
    let json = serde_json::to_string_pretty(&snapshot).map_err(PersistenceError::Serialize)?;

    let path = unique_save_path(dir, &now.format("habitat_%Y%m%d_%H%M%S").to_string());
    std::fs::write(&path, json).map_err(|source| PersistenceError::Io {
        path: path.clone(),
        source,
    })?;

    info!("Habitat saved to {:?} ({} modules)", path, habitat.len());
    Ok(path)
}

/// `stem.json`, or `stem_N.json` for the first free N.
fn unique_save_path(dir: &Path, stem: &str) -> PathBuf {
    let first = dir.join(format!("{}.json", stem));
    if !first.exists() {
        return first;
    }
    (1..)
        .map(|n| dir.join(format!("{}_{}.json", stem, n)))
        .find(|p| !p.exists())
        .unwrap_or(first)
}

/// Read and parse a snapshot file.
pub fn load_snapshot(path: &Path) -> Result<LoadedHabitat, PersistenceError> {
    let raw = std::fs::read_to_string(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let loaded = parse_snapshot(&raw)?;
    info!("Habitat loaded from {:?} ({} modules)", path, loaded.modules.len());
    Ok(loaded)
}
