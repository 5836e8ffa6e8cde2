//! The habitat grid: module map, selection, popup and panel state, totals.
//!
//! ## State machines
//!
//! - Selection: `None` (deselected) or `Some(axial)` (selected).
//! - [`StylePopup`]: `Closed` or awaiting a style choice for a pending cell.
//! - [`EquipmentPanel`]: `Closed` or open on the selected cell.
//!
//! Every mutation goes through a method here so the three stay consistent:
//! removing a module clears the selection, popup and panel together, and
//! totals are refolded after each change.

use std::collections::HashMap;

use bevy::prelude::*;

use super::catalog::catalog_len;
use super::hex::{axial_to_world, edge_midpoint, hex_vertices, point_in_polygon, Axial};
use super::module::{cycle_slot, CycleDirection, HabitatModule, ModuleStyle, SLOT_COUNT};
use super::totals::{recompute_totals, ResourceTotals};

/// Style chooser shown after clicking a placement affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StylePopup {
    #[default]
    Closed,
    AwaitingStyleChoice { pending: Axial },
}

/// Equipment editor for the selected module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EquipmentPanel {
    #[default]
    Closed,
    Open { axial: Axial },
}

/// Clickable markers shown around the selected module, in world space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Affordances {
    /// Delete marker at the selected cell center (never for the root).
    pub delete: Option<Vec2>,
    /// One marker per free neighbor, on the shared edge.
    pub place: Vec<(Axial, Vec2)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AffordanceHit {
    Delete,
    Place { axial: Axial, anchor: Vec2 },
}

/// What the Escape key ended up closing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeOutcome {
    ClosedPopup,
    ClosedPanel,
    Unhandled,
}

#[derive(Debug, Clone)]
pub struct Habitat {
    modules: HashMap<Axial, HabitatModule>,
    selection: Option<Axial>,
    style_popup: StylePopup,
    equipment_panel: EquipmentPanel,
    totals: ResourceTotals,
}

impl Default for Habitat {
    fn default() -> Self {
        Self::from_modules(std::iter::empty())
    }
}

impl Habitat {
    /// Build a habitat from loaded modules, adding the root if it is missing.
    ///
    /// Later duplicates of the same coordinate replace earlier ones.
    pub fn from_modules(modules: impl IntoIterator<Item = HabitatModule>) -> Self {
        let mut map: HashMap<Axial, HabitatModule> =
            modules.into_iter().map(|m| (m.axial, m)).collect();
        map.entry(Axial::ROOT)
            .or_insert_with(|| HabitatModule::new(Axial::ROOT, ModuleStyle::Prefabricated));

        let mut habitat = Self {
            modules: map,
            selection: None,
            style_popup: StylePopup::Closed,
            equipment_panel: EquipmentPanel::Closed,
            totals: ResourceTotals::default(),
        };
        habitat.recompute_totals();
        habitat
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn contains(&self, axial: Axial) -> bool {
        self.modules.contains_key(&axial)
    }

    pub fn get(&self, axial: Axial) -> Option<&HabitatModule> {
        self.modules.get(&axial)
    }

    pub fn modules(&self) -> impl Iterator<Item = &HabitatModule> {
        self.modules.values()
    }

    /// Modules ordered by coordinate, for stable output.
    pub fn sorted_modules(&self) -> Vec<&HabitatModule> {
        let mut modules: Vec<_> = self.modules.values().collect();
        modules.sort_by_key(|m| m.axial);
        modules
    }

    pub fn selection(&self) -> Option<Axial> {
        self.selection
    }

    pub fn selected_module(&self) -> Option<&HabitatModule> {
        self.selection.and_then(|ax| self.modules.get(&ax))
    }

    pub fn style_popup(&self) -> StylePopup {
        self.style_popup
    }

    pub fn equipment_panel(&self) -> EquipmentPanel {
        self.equipment_panel
    }

    pub fn totals(&self) -> ResourceTotals {
        self.totals
    }

    pub fn recompute_totals(&mut self) {
        self.totals = recompute_totals(self.modules.values());
    }

    /// First occupied cell whose hexagon contains `world_point`.
    pub fn pick(&self, world_point: Vec2, size: f32) -> Option<Axial> {
        self.modules.keys().copied().find(|&axial| {
            let poly = hex_vertices(axial_to_world(axial, size), size);
            point_in_polygon(world_point, &poly)
        })
    }

    /// Apply a click on the canvas that hit `picked` (or nothing).
    ///
    /// Returns the new selection.
    pub fn select_or_toggle(&mut self, picked: Option<Axial>) -> Option<Axial> {
        match picked {
            Some(axial) if self.selection != Some(axial) && self.contains(axial) => {
                self.selection = Some(axial);
                self.equipment_panel = EquipmentPanel::Open { axial };
            }
            _ => self.deselect(),
        }
        self.selection
    }

    /// Hide the equipment panel, keeping the selection and its markers.
    pub fn close_equipment_panel(&mut self) {
        self.equipment_panel = EquipmentPanel::Closed;
    }

    pub fn deselect(&mut self) {
        self.selection = None;
        self.equipment_panel = EquipmentPanel::Closed;
    }

    pub fn affordances(&self, size: f32) -> Affordances {
        let Some(selected) = self.selection else {
            return Affordances::default();
        };

        let delete = (!selected.is_root()).then(|| axial_to_world(selected, size));
        let place = selected
            .neighbors()
            .filter(|nb| !self.contains(*nb))
            .map(|nb| (nb, edge_midpoint(selected, nb, size)))
            .collect();

        Affordances { delete, place }
    }

    /// Test a world-space point against the affordance markers.
    ///
    /// The delete marker wins over placement markers.
    pub fn hit_affordance(&self, world_point: Vec2, radius: f32, size: f32) -> Option<AffordanceHit> {
        let affordances = self.affordances(size);
        let r2 = radius * radius;

        if let Some(center) = affordances.delete
            && center.distance_squared(world_point) <= r2
        {
            return Some(AffordanceHit::Delete);
        }

        affordances
            .place
            .into_iter()
            .find(|(_, anchor)| anchor.distance_squared(world_point) <= r2)
            .map(|(axial, anchor)| AffordanceHit::Place { axial, anchor })
    }

    /// Start asking for a style for an empty cell. Occupied cells are ignored.
    pub fn open_style_popup(&mut self, axial: Axial) -> bool {
        if self.contains(axial) {
            return false;
        }
        self.style_popup = StylePopup::AwaitingStyleChoice { pending: axial };
        true
    }

    pub fn close_style_popup(&mut self) {
        self.style_popup = StylePopup::Closed;
    }

    /// Resolve the popup by placing the pending cell with `style`.
    pub fn choose_style(&mut self, style: ModuleStyle) -> bool {
        let StylePopup::AwaitingStyleChoice { pending } = self.style_popup else {
            return false;
        };
        self.style_popup = StylePopup::Closed;
        self.place(pending, style)
    }

    /// Insert a module if the cell is free, then select it.
    ///
    /// An occupied cell is left untouched (equipment included) but still
    /// becomes the selection. Returns whether a module was inserted.
    pub fn place(&mut self, axial: Axial, style: ModuleStyle) -> bool {
        let inserted = if self.contains(axial) {
            false
        } else {
            self.modules.insert(axial, HabitatModule::new(axial, style));
            true
        };
        self.selection = Some(axial);
        self.equipment_panel = EquipmentPanel::Open { axial };
        self.recompute_totals();
        inserted
    }

    /// Remove the selected, non-root module.
    pub fn delete(&mut self, axial: Axial) -> bool {
        if axial.is_root() || self.selection != Some(axial) {
            return false;
        }
        if self.modules.remove(&axial).is_none() {
            return false;
        }
        self.selection = None;
        self.equipment_panel = EquipmentPanel::Closed;
        self.style_popup = StylePopup::Closed;
        self.recompute_totals();
        true
    }

    /// Step one slot of the selected module through the catalog.
    pub fn cycle_equipment(&mut self, slot: usize, direction: CycleDirection) -> bool {
        if slot >= SLOT_COUNT {
            return false;
        }
        let Some(module) = self.selection.and_then(|ax| self.modules.get_mut(&ax)) else {
            return false;
        };
        module.equipment[slot] = cycle_slot(module.equipment[slot], direction, catalog_len());
        self.recompute_totals();
        true
    }

    pub fn toggle_selected_style(&mut self) -> bool {
        let Some(module) = self.selection.and_then(|ax| self.modules.get_mut(&ax)) else {
            return false;
        };
        module.style = module.style.toggled();
        self.recompute_totals();
        true
    }

    pub fn handle_escape(&mut self) -> EscapeOutcome {
        if self.style_popup != StylePopup::Closed {
            self.close_style_popup();
            EscapeOutcome::ClosedPopup
        } else if self.equipment_panel != EquipmentPanel::Closed {
            self.close_equipment_panel();
            EscapeOutcome::ClosedPanel
        } else {
            EscapeOutcome::Unhandled
        }
    }
}
