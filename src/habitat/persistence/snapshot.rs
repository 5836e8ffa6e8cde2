//! On-disk snapshot format and the tolerant reader for it.
//!
//! Writing uses plain serde structs. Reading walks a `serde_json::Value`
//! field by field so a half-broken file still yields a usable layout; only a
//! file that is not a JSON object at all is rejected.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::habitat::catalog::catalog_len;
use crate::habitat::hex::Axial;
use crate::habitat::module::{EquipmentSlot, HabitatModule, ModuleStyle, SLOT_COUNT};
use crate::habitat::totals::ResourceTotals;
use crate::habitat::world::Habitat;

use super::error::PersistenceError;

pub const SNAPSHOT_VERSION: u32 = 1;

/// Empty-slot marker in the file format.
pub const EMPTY_SLOT: i64 = -1;

/// Camera position and zoom as stored alongside the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub pos: Vec2,
    pub zoom: f32,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedCamera {
    pub pos: [f32; 2],
    pub zoom: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedModule {
    pub q: i32,
    pub r: i32,
    pub style: u8,
    pub equip: [i64; SLOT_COUNT],
}

impl SavedModule {
    pub fn from_module(module: &HabitatModule) -> Self {
        Self {
            q: module.axial.q,
            r: module.axial.r,
            style: module.style.index(),
            equip: module
                .equipment
                .map(|slot| slot.map(|i| i as i64).unwrap_or(EMPTY_SLOT)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitatSnapshot {
    pub version: u32,
    pub camera: SavedCamera,
    pub modules: Vec<SavedModule>,
    pub totals: ResourceTotals,
    pub timestamp: f64,
}

impl HabitatSnapshot {
    /// Freeze the habitat and camera. Totals are written for external readers only.
    pub fn capture(habitat: &Habitat, camera: CameraPose, timestamp: f64) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            camera: SavedCamera {
                pos: camera.pos.to_array(),
                zoom: camera.zoom,
            },
            modules: habitat
                .sorted_modules()
                .into_iter()
                .map(SavedModule::from_module)
                .collect(),
            totals: habitat.totals(),
            timestamp,
        }
    }
}

/// Result of reading a snapshot: everything needed to rebuild the session.
#[derive(Debug, Clone)]
pub struct LoadedHabitat {
    pub camera: CameraPose,
    pub modules: Vec<HabitatModule>,
    pub timestamp: Option<f64>,
}

impl LoadedHabitat {
    pub fn into_habitat(self) -> Habitat {
        Habitat::from_modules(self.modules)
    }
}

/// Parse a snapshot, defaulting any field that is missing or malformed.
pub fn parse_snapshot(raw: &str) -> Result<LoadedHabitat, PersistenceError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| PersistenceError::Parse(e.to_string()))?;
    let Value::Object(root) = value else {
        return Err(PersistenceError::Parse(
            "top-level value is not an object".to_string(),
        ));
    };

    if let Some(version) = root.get("version").and_then(Value::as_u64)
        && version > SNAPSHOT_VERSION as u64
    {
        warn!(
            "Snapshot version {} is newer than supported version {}, loading anyway",
            version, SNAPSHOT_VERSION
        );
    }

    let camera = root.get("camera").map(parse_camera).unwrap_or_default();

    let mut modules: Vec<HabitatModule> = root
        .get("modules")
        .and_then(Value::as_array)
        .map(|list| list.iter().map(parse_module).collect())
        .unwrap_or_default();

    if modules.is_empty() {
        modules.push(HabitatModule::new(Axial::ROOT, ModuleStyle::Prefabricated));
    }

    Ok(LoadedHabitat {
        camera,
        modules,
        timestamp: root.get("timestamp").and_then(Value::as_f64),
    })
}

fn parse_camera(value: &Value) -> CameraPose {
    let mut pose = CameraPose::default();

    if let Some([x, y]) = value.get("pos").and_then(Value::as_array).map(Vec::as_slice)
        && let (Some(x), Some(y)) = (x.as_f64(), y.as_f64())
        && x.is_finite()
        && y.is_finite()
    {
        pose.pos = Vec2::new(x as f32, y as f32);
    }

    if let Some(zoom) = value.get("zoom").and_then(Value::as_f64)
        && zoom.is_finite()
        && zoom > 0.0
    {
        pose.zoom = zoom as f32;
    }

    pose
}

fn parse_module(value: &Value) -> HabitatModule {
    let field = |name: &str| value.get(name).map(coerce_int).unwrap_or(0);

    let axial = Axial::new(clamp_i32(field("q")), clamp_i32(field("r")));
    let style = ModuleStyle::from_index(field("style"));

    let mut equipment: [EquipmentSlot; SLOT_COUNT] = [None; SLOT_COUNT];
    if let Some(list) = value.get("equip").and_then(Value::as_array) {
        for (slot, raw) in equipment.iter_mut().zip(list.iter()) {
            *slot = usize::try_from(coerce_int(raw))
                .ok()
                .filter(|&i| i < catalog_len());
        }
    }

    HabitatModule::new(axial, style).with_equipment(equipment)
}

/// Integer view of a JSON value: floats truncate, numeric strings parse,
/// booleans map to 0/1, anything else is 0.
fn coerce_int(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                .unwrap_or(0)
        }
        Value::Bool(b) => i64::from(*b),
        _ => 0,
    }
}

fn clamp_i32(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_int_variants() {
        assert_eq!(coerce_int(&json!(3)), 3);
        assert_eq!(coerce_int(&json!(-2.9)), -2);
        assert_eq!(coerce_int(&json!(" 4 ")), 4);
        assert_eq!(coerce_int(&json!("1.5")), 1);
        assert_eq!(coerce_int(&json!(true)), 1);
        assert_eq!(coerce_int(&json!(null)), 0);
        assert_eq!(coerce_int(&json!("abc")), 0);
        assert_eq!(coerce_int(&json!([1])), 0);
    }

    #[test]
    fn test_saved_module_uses_minus_one_for_empty() {
        let module = HabitatModule::new(Axial::new(2, -1), ModuleStyle::Manufactured)
            .with_equipment([Some(0), None, Some(4), None, None, None]);
        let saved = SavedModule::from_module(&module);
        assert_eq!(saved.q, 2);
        assert_eq!(saved.r, -1);
        assert_eq!(saved.style, 1);
        assert_eq!(saved.equip, [0, -1, 4, -1, -1, -1]);
    }

    #[test]
    fn test_parse_module_defaults() {
        let module = parse_module(&json!({}));
        assert_eq!(module, HabitatModule::new(Axial::ROOT, ModuleStyle::Prefabricated));
    }

    #[test]
    fn test_parse_module_equipment_normalized() {
        let module = parse_module(&json!({
            "q": 1.0, "r": "-2", "style": 1,
            "equip": [0, -1, 99, "3", -7, 4, 2, 2]
        }));
        assert_eq!(module.axial, Axial::new(1, -2));
        assert_eq!(module.style, ModuleStyle::Manufactured);
        assert_eq!(
            module.equipment,
            [Some(0), None, None, Some(3), None, Some(4)]
        );
    }

    #[test]
    fn test_parse_module_short_equipment_padded() {
        let module = parse_module(&json!({"q": 0, "r": 1, "equip": [2]}));
        assert_eq!(module.equipment, [Some(2), None, None, None, None, None]);
    }

    #[test]
    fn test_parse_camera_fallbacks() {
        assert_eq!(parse_camera(&json!({"pos": "nope", "zoom": -1})), CameraPose::default());
        assert_eq!(parse_camera(&json!({"pos": [1, 2, 3]})), CameraPose::default());

        let pose = parse_camera(&json!({"pos": [10.5, -4], "zoom": 2}));
        assert_eq!(pose.pos, Vec2::new(10.5, -4.0));
        assert_eq!(pose.zoom, 2.0);
    }
}
