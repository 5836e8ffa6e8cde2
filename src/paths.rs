//! Centralized path resolution for platform-appropriate user data directories.
//!
//! In development mode (cargo run), paths resolve to local directories.
//! In installed mode, paths resolve to platform-specific locations:
//! - Windows: `%APPDATA%\hexhabitat\`
//! - macOS: `~/Library/Application Support/hexhabitat/`
//! - Linux: `~/.config/hexhabitat/` (config), `~/.local/share/hexhabitat/` (data)

use std::path::PathBuf;

/// Returns true when running in development mode (cargo run).
///
/// Detection methods:
/// - `CARGO` env var is set (cargo run sets this)
/// - Debug assertions enabled (debug builds)
pub fn is_dev_mode() -> bool {
    std::env::var("CARGO").is_ok() || cfg!(debug_assertions)
}

/// Platform-appropriate config directory.
///
/// - Dev mode: current directory
/// - Linux: `~/.config/hexhabitat/`
/// - Windows/macOS: same as data_dir
pub fn config_dir() -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from("."));
    }

    #[cfg(target_os = "linux")]
    {
        dirs::config_dir().map(|p| p.join("hexhabitat"))
    }

    #[cfg(not(target_os = "linux"))]
    {
        data_dir()
    }
}

/// Platform-appropriate data directory.
pub fn data_dir() -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from("."));
    }

    dirs::data_dir().map(|p| p.join("hexhabitat"))
}

/// Path to the config file.
pub fn config_file() -> PathBuf {
    config_dir()
        .map(|p| p.join("config.json"))
        .unwrap_or_else(|| PathBuf::from("config.json"))
}

/// Default directory for habitat snapshots.
///
/// - Dev mode: `./saves/`
/// - Installed: `{data_dir}/saves/`
pub fn default_saves_dir() -> PathBuf {
    data_dir()
        .map(|p| p.join("saves"))
        .unwrap_or_else(|| PathBuf::from("saves"))
}

/// Path to the logs directory.
pub fn logs_dir() -> PathBuf {
    data_dir()
        .map(|p| p.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Directory holding the module sprites that ship with the binary.
///
/// - Dev mode: `./assets/sprites/`
/// - Installed: `{exe_dir}/assets/sprites/`
pub fn sprites_dir() -> PathBuf {
    if is_dev_mode() {
        return PathBuf::from("assets").join("sprites");
    }

    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.join("assets").join("sprites")))
        .unwrap_or_else(|| PathBuf::from("assets").join("sprites"))
}

/// Ensure config and data directories exist.
///
/// Called early in startup, before logging is configured.
pub fn ensure_directories() -> std::io::Result<()> {
    if is_dev_mode() {
        return Ok(());
    }

    if let Some(config) = config_dir() {
        std::fs::create_dir_all(&config)?;
    }
    if let Some(data) = data_dir() {
        std::fs::create_dir_all(&data)?;
        std::fs::create_dir_all(data.join("logs"))?;
    }
    Ok(())
}
