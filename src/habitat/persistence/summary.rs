//! Lightweight summaries of saved snapshots for listing recent saves.
//!
//! Reads the raw file format directly so a listing never needs to rebuild a
//! full habitat.

use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use bevy::prelude::*;
use chrono::{Local, TimeZone};
use serde_json::Value;

use crate::habitat::totals::ResourceTotals;

#[derive(Debug, Clone, PartialEq)]
pub struct SaveSummary {
    pub path: PathBuf,
    pub timestamp: f64,
    pub module_count: usize,
    pub totals: ResourceTotals,
}

impl SaveSummary {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string()
    }
}

/// Summaries of the `.json` files in `dir`, newest first, at most `limit`.
pub fn list_saves(dir: &Path, limit: usize) -> Vec<SaveSummary> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut summaries: Vec<SaveSummary> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("json"))
        })
        .filter_map(|path| match summarize(&path) {
            Ok(summary) => Some(summary),
            Err(reason) => {
                debug!("Skipping save {:?}: {}", path, reason);
                None
            }
        })
        .collect();

    summaries.sort_by(|a, b| b.timestamp.total_cmp(&a.timestamp));
    summaries.truncate(limit);
    summaries
}

fn summarize(path: &Path) -> Result<SaveSummary, String> {
    let raw = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let value: Value = serde_json::from_str(&raw).map_err(|e| e.to_string())?;

    let timestamp = match value.get("timestamp").and_then(Value::as_f64) {
        Some(ts) => ts,
        None => modified_seconds(path).unwrap_or(0.0),
    };
    let module_count = value
        .get("modules")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0);
    let totals = value
        .get("totals")
        .cloned()
        .and_then(|t| serde_json::from_value(t).ok())
        .unwrap_or_default();

    Ok(SaveSummary {
        path: path.to_path_buf(),
        timestamp,
        module_count,
        totals,
    })
}

fn modified_seconds(path: &Path) -> Option<f64> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    Some(modified.duration_since(UNIX_EPOCH).ok()?.as_secs_f64())
}

/// Relative age of a save, falling back to a local date after a week.
pub fn human_age(timestamp: f64, now: f64) -> String {
    let diff = (now - timestamp).max(0.0);
    if diff < 90.0 {
        return "just now".to_string();
    }

    let mins = diff / 60.0;
    let hours = mins / 60.0;
    let days = hours / 24.0;
    if mins < 60.0 {
        format!("{} min ago", mins as i64)
    } else if hours < 24.0 {
        format!("{} h ago", hours as i64)
    } else if days < 7.0 {
        format!("{} d ago", days as i64)
    } else {
        Local
            .timestamp_opt(timestamp as i64, 0)
            .single()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}
