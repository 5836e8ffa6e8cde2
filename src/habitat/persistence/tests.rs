//! Unit tests for the persistence module.

use std::path::PathBuf;

use bevy::prelude::*;
use chrono::{Local, TimeZone};

use crate::habitat::{Axial, CycleDirection, Habitat, ModuleStyle};

use super::error::PersistenceError;
use super::save::save_snapshot_at;
use super::snapshot::HabitatSnapshot;
use super::*;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("hexhabitat_test_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn sample_habitat() -> Habitat {
    let mut habitat = Habitat::default();
    habitat.place(Axial::new(1, 0), ModuleStyle::Manufactured);
    habitat.cycle_equipment(0, CycleDirection::Forward);
    habitat.cycle_equipment(5, CycleDirection::Backward);
    habitat.place(Axial::new(1, -1), ModuleStyle::Prefabricated);
    habitat.cycle_equipment(2, CycleDirection::Forward);
    habitat.cycle_equipment(2, CycleDirection::Forward);
    habitat.place(Axial::new(-1, 1), ModuleStyle::Manufactured);
    habitat
}

fn assert_same_layout(a: &Habitat, b: &Habitat) {
    assert_eq!(a.len(), b.len());
    for module in a.modules() {
        assert_eq!(b.get(module.axial), Some(module), "mismatch at {:?}", module.axial);
    }
}

// Round-trip tests
#[test]
fn test_roundtrip_through_json() {
    let habitat = sample_habitat();
    let pose = CameraPose {
        pos: Vec2::new(-120.5, 33.25),
        zoom: 1.7,
    };

    let snapshot = HabitatSnapshot::capture(&habitat, pose, 1_700_000_000.0);
    let json = serde_json::to_string_pretty(&snapshot).unwrap();
    let loaded = parse_snapshot(&json).unwrap();

    assert!((loaded.camera.pos - pose.pos).length() < 1e-4);
    assert!((loaded.camera.zoom - pose.zoom).abs() < 1e-5);
    assert_eq!(loaded.timestamp, Some(1_700_000_000.0));

    let rebuilt = loaded.into_habitat();
    assert_same_layout(&habitat, &rebuilt);
    assert!(rebuilt.totals().approx_eq(&habitat.totals(), 1e-9));
}

#[test]
fn test_roundtrip_root_only() {
    let habitat = Habitat::default();
    let snapshot = HabitatSnapshot::capture(&habitat, CameraPose::default(), 0.0);
    let json = serde_json::to_string(&snapshot).unwrap();
    let rebuilt = parse_snapshot(&json).unwrap().into_habitat();
    assert_same_layout(&habitat, &rebuilt);
}

#[test]
fn test_snapshot_json_shape() {
    let snapshot = HabitatSnapshot::capture(&sample_habitat(), CameraPose::default(), 5.0);
    let value = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(value["version"], 1);
    assert_eq!(value["camera"]["pos"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["modules"].as_array().map(Vec::len), Some(4));
    assert_eq!(value["modules"][0]["equip"].as_array().map(Vec::len), Some(6));
    assert!(value["totals"]["Energy"].is_number());
    assert_eq!(value["timestamp"], 5.0);
}

// Tolerant loading tests
#[test]
fn test_totals_in_file_are_ignored() {
    let raw = r#"{
        "modules": [{"q": 0, "r": 0, "style": 0, "equip": [-1, -1, -1, -1, -1, -1]}],
        "totals": {"Energy": 99999, "Volume": -1}
    }"#;
    let habitat = parse_snapshot(raw).unwrap().into_habitat();
    assert_eq!(habitat.totals().energy, 0.0);
    assert_eq!(habitat.totals().volume, 60.2);
}

#[test]
fn test_empty_module_list_synthesizes_root() {
    let loaded = parse_snapshot(r#"{"modules": []}"#).unwrap();
    assert_eq!(loaded.modules.len(), 1);
    assert_eq!(loaded.modules[0].axial, Axial::ROOT);
    assert_eq!(loaded.camera, CameraPose::default());
}

#[test]
fn test_missing_everything_is_still_valid() {
    let habitat = parse_snapshot("{}").unwrap().into_habitat();
    assert_eq!(habitat.len(), 1);
    assert!(habitat.contains(Axial::ROOT));
}

#[test]
fn test_layout_without_root_gets_root() {
    let raw = r#"{"modules": [{"q": 3, "r": -1, "style": 1}]}"#;
    let habitat = parse_snapshot(raw).unwrap().into_habitat();
    assert_eq!(habitat.len(), 2);
    assert!(habitat.contains(Axial::ROOT));
    assert_eq!(
        habitat.get(Axial::new(3, -1)).map(|m| m.style),
        Some(ModuleStyle::Manufactured)
    );
}

#[test]
fn test_duplicate_coordinates_last_wins() {
    let raw = r#"{"modules": [
        {"q": 1, "r": 0, "style": 0},
        {"q": 1, "r": 0, "style": 1, "equip": [4]}
    ]}"#;
    let habitat = parse_snapshot(raw).unwrap().into_habitat();
    let module = habitat.get(Axial::new(1, 0)).unwrap();
    assert_eq!(module.style, ModuleStyle::Manufactured);
    assert_eq!(module.equipment[0], Some(4));
}

#[test]
fn test_out_of_range_coordinates_stay_editable() {
    let raw = r#"{"modules": [{"q": 0, "r": 0}, {"q": 3000000000, "r": 0}]}"#;
    let mut habitat = parse_snapshot(raw).unwrap().into_habitat();
    let far = Axial::new(i32::MAX, 0);
    assert!(habitat.contains(far));

    assert_eq!(habitat.select_or_toggle(Some(far)), Some(far));
    let affordances = habitat.affordances(45.0);
    assert!(affordances.delete.is_some());
    assert_eq!(affordances.place.len(), 4);
    assert!(affordances.place.iter().all(|(_, anchor)| anchor.is_finite()));
    assert!(habitat.hit_affordance(Vec2::ZERO, 9.0, 45.0).is_none());

    assert!(habitat.delete(far));
    assert_eq!(habitat.len(), 1);
}

#[test]
fn test_unreadable_json_fails() {
    assert!(matches!(parse_snapshot("not json"), Err(PersistenceError::Parse(_))));
    assert!(matches!(parse_snapshot("[1, 2]"), Err(PersistenceError::Parse(_))));
    assert!(matches!(parse_snapshot(""), Err(PersistenceError::Parse(_))));
}

#[test]
fn test_persistence_error_display() {
    let err = PersistenceError::Parse("bad".to_string());
    assert_eq!(err.to_string(), "Failed to parse habitat file: bad");
}

// File tests
#[test]
fn test_save_creates_directory_and_file() {
    let dir = temp_dir("save_creates");
    let habitat = sample_habitat();
    let now = Local.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();

    let path = save_snapshot_at(&habitat, CameraPose::default(), &dir, now).unwrap();
    assert_eq!(path, dir.join("habitat_20250304_050607.json"));
    assert!(path.exists());

    let loaded = load_snapshot(&path).unwrap();
    assert_same_layout(&habitat, &loaded.into_habitat());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_save_never_overwrites() {
    let dir = temp_dir("save_unique");
    let now = Local.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();

    let first = save_snapshot_at(&Habitat::default(), CameraPose::default(), &dir, now).unwrap();
    let second = save_snapshot_at(&sample_habitat(), CameraPose::default(), &dir, now).unwrap();
    assert_ne!(first, second);
    assert_eq!(second, dir.join("habitat_20250304_050607_1.json"));
    assert_eq!(load_snapshot(&first).unwrap().modules.len(), 1);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = temp_dir("load_missing");
    let result = load_snapshot(&dir.join("nope.json"));
    assert!(matches!(result, Err(PersistenceError::Io { .. })));
}

#[test]
fn test_list_saves_newest_first_and_skips_garbage() {
    let dir = temp_dir("list_saves");
    let older = Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let newer = Local.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

    save_snapshot_at(&Habitat::default(), CameraPose::default(), &dir, older).unwrap();
    let newest = save_snapshot_at(&sample_habitat(), CameraPose::default(), &dir, newer).unwrap();
    std::fs::write(dir.join("broken.json"), "{{{{").unwrap();
    std::fs::write(dir.join("notes.txt"), "hello").unwrap();

    let summaries = list_saves(&dir, 10);
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].path, newest);
    assert_eq!(summaries[0].module_count, 4);
    assert_eq!(summaries[1].module_count, 1);
    assert_eq!(summaries[1].totals.volume, 60.2);

    assert_eq!(list_saves(&dir, 1).len(), 1);

    let _ = std::fs::remove_dir_all(&dir);
}
