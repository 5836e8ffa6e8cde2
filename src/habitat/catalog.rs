//! Static equipment catalog and per-style base contributions.

use super::module::ModuleStyle;

/// One kind of equipment that can occupy a module slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquipmentItem {
    pub name: &'static str,
    pub energy: f64,
    pub o2: f64,
    pub waste: f64,
    pub food: f64,
    pub crew: f64,
    pub volume: f64,
}

pub const EQUIPMENT_CATALOG: [EquipmentItem; 5] = [
    EquipmentItem {
        name: "O2 Generator",
        energy: -200.0,
        o2: 5.0,
        waste: 0.0,
        food: 0.0,
        crew: 0.0,
        volume: 0.2,
    },
    EquipmentItem {
        name: "Recycler",
        energy: -150.0,
        o2: 0.0,
        waste: -3.0,
        food: 0.0,
        crew: 0.0,
        volume: 0.3,
    },
    EquipmentItem {
        name: "Heater",
        energy: -100.0,
        o2: 0.0,
        waste: 0.0,
        food: 0.0,
        crew: 0.0,
        volume: 0.1,
    },
    EquipmentItem {
        name: "Hydroponics",
        energy: -250.0,
        o2: 2.0,
        waste: -1.0,
        food: 2.0,
        crew: 0.0,
        volume: 0.8,
    },
    EquipmentItem {
        name: "Crew Bunks",
        energy: -50.0,
        o2: 0.0,
        waste: 0.0,
        food: 0.0,
        crew: 2.0,
        volume: 1.2,
    },
];

/// Label shown for an empty slot.
pub const EMPTY_LABEL: &str = "Empty";

pub fn catalog_len() -> usize {
    EQUIPMENT_CATALOG.len()
}

pub fn item(index: usize) -> Option<&'static EquipmentItem> {
    EQUIPMENT_CATALOG.get(index)
}

/// Name to display for a slot value.
pub fn slot_label(slot: Option<usize>) -> &'static str {
    slot.and_then(item).map(|i| i.name).unwrap_or(EMPTY_LABEL)
}

/// Volume and crew capacity a bare module contributes before equipment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModuleBase {
    pub volume: f64,
    pub crew: f64,
}

pub fn module_base(style: ModuleStyle) -> ModuleBase {
    match style {
        ModuleStyle::Prefabricated => ModuleBase {
            volume: 60.2,
            crew: 0.0,
        },
        ModuleStyle::Manufactured => ModuleBase {
            volume: 116.75,
            crew: 0.0,
        },
    }
}
