//! Habitat layout model: hex geometry, modules, equipment, totals and
//! persistence. Nothing in here touches the ECS world, so it can be driven
//! directly from tests.

mod catalog;
pub mod hex;
mod module;
pub mod persistence;
mod totals;
mod world;

pub use catalog::slot_label;
pub use hex::{axial_to_world, hex_vertices, Axial};
pub use module::{CycleDirection, ModuleStyle, SLOT_COUNT};
pub use world::{AffordanceHit, EquipmentPanel, EscapeOutcome, Habitat, StylePopup};

#[cfg(test)]
pub use totals::ResourceTotals;
