//! Aggregated resource totals for a habitat layout.
//!
//! Totals are a pure fold over the current modules; nothing is maintained
//! incrementally, so the order of edits never matters.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use super::catalog::{item, module_base};
use super::module::HabitatModule;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ResourceTotals {
    #[serde(rename = "Energy", default)]
    pub energy: f64,
    #[serde(rename = "O2", default)]
    pub o2: f64,
    #[serde(rename = "Waste", default)]
    pub waste: f64,
    #[serde(rename = "Food", default)]
    pub food: f64,
    #[serde(rename = "Crew", default)]
    pub crew: f64,
    #[serde(rename = "Volume", default)]
    pub volume: f64,
}

impl ResourceTotals {
    /// Label/value rows as displayed in the totals panel.
    pub fn display_rows(&self) -> [(&'static str, String); 6] {
        [
            ("Energy", format!("{:.0} W", self.energy)),
            ("O2", format!("{:.2} kg/day", self.o2)),
            ("Waste", format!("{:.2} kg/day", self.waste)),
            ("Food", format!("{:.2} kg/day", self.food)),
            ("Crew", format!("{}", self.crew as i64)),
            ("Volume", format!("{:.2} m³", self.volume)),
        ]
    }

    #[cfg(test)]
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        (self.energy - other.energy).abs() <= tolerance
            && (self.o2 - other.o2).abs() <= tolerance
            && (self.waste - other.waste).abs() <= tolerance
            && (self.food - other.food).abs() <= tolerance
            && (self.crew - other.crew).abs() <= tolerance
            && (self.volume - other.volume).abs() <= tolerance
    }
}

impl Add for ResourceTotals {
    type Output = ResourceTotals;

    fn add(mut self, rhs: ResourceTotals) -> ResourceTotals {
        self += rhs;
        self
    }
}

impl AddAssign for ResourceTotals {
    fn add_assign(&mut self, rhs: ResourceTotals) {
        self.energy += rhs.energy;
        self.o2 += rhs.o2;
        self.waste += rhs.waste;
        self.food += rhs.food;
        self.crew += rhs.crew;
        self.volume += rhs.volume;
    }
}

impl Sum for ResourceTotals {
    fn sum<I: Iterator<Item = ResourceTotals>>(iter: I) -> Self {
        iter.fold(ResourceTotals::default(), Add::add)
    }
}

/// What a single module adds: its style base plus every equipped item.
pub fn module_contribution(module: &HabitatModule) -> ResourceTotals {
    let base = module_base(module.style);
    let mut totals = ResourceTotals {
        crew: base.crew,
        volume: base.volume,
        ..Default::default()
    };

    for equipped in module.equipment.iter().flatten().filter_map(|&i| item(i)) {
        totals += ResourceTotals {
            energy: equipped.energy,
            o2: equipped.o2,
            waste: equipped.waste,
            food: equipped.food,
            crew: equipped.crew,
            volume: equipped.volume,
        };
    }
    totals
}

pub fn recompute_totals<'a>(modules: impl IntoIterator<Item = &'a HabitatModule>) -> ResourceTotals {
    modules.into_iter().map(module_contribution).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habitat::hex::Axial;
    use crate::habitat::module::ModuleStyle;

    #[test]
    fn test_bare_prefab_contribution() {
        let module = HabitatModule::new(Axial::ROOT, ModuleStyle::Prefabricated);
        let totals = module_contribution(&module);
        assert_eq!(totals.volume, 60.2);
        assert_eq!(totals.energy, 0.0);
        assert_eq!(totals.crew, 0.0);
    }

    #[test]
    fn test_equipment_adds_deltas() {
        let module = HabitatModule::new(Axial::ROOT, ModuleStyle::Manufactured).with_equipment([
            Some(0),
            Some(4),
            Some(4),
            None,
            None,
            None,
        ]);
        let totals = module_contribution(&module);
        assert_eq!(totals.energy, -300.0);
        assert_eq!(totals.o2, 5.0);
        assert_eq!(totals.crew, 4.0);
        assert!((totals.volume - (116.75 + 0.2 + 2.4)).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_slot_ignored() {
        let module = HabitatModule::new(Axial::ROOT, ModuleStyle::Prefabricated)
            .with_equipment([Some(17), None, None, None, None, None]);
        assert_eq!(
            module_contribution(&module),
            module_contribution(&HabitatModule::new(Axial::ROOT, ModuleStyle::Prefabricated))
        );
    }

    #[test]
    fn test_totals_are_additive() {
        let modules = vec![
            HabitatModule::new(Axial::ROOT, ModuleStyle::Prefabricated)
                .with_equipment([Some(3), Some(1), None, None, None, None]),
            HabitatModule::new(Axial::new(1, 0), ModuleStyle::Manufactured)
                .with_equipment([Some(2), Some(2), Some(0), None, None, Some(4)]),
            HabitatModule::new(Axial::new(0, 1), ModuleStyle::Prefabricated),
        ];

        let combined = recompute_totals(&modules);
        let separate = modules
            .iter()
            .map(|m| recompute_totals(std::iter::once(m)))
            .fold(ResourceTotals::default(), |acc, t| acc + t);
        assert!(combined.approx_eq(&separate, 1e-9));
    }

    #[test]
    fn test_empty_layout_totals_zero() {
        let none: Vec<HabitatModule> = Vec::new();
        assert_eq!(recompute_totals(&none), ResourceTotals::default());
    }

    #[test]
    fn test_display_rows_units() {
        let totals = ResourceTotals {
            energy: -350.4,
            o2: 7.0,
            waste: -3.0,
            food: 2.0,
            crew: 4.0,
            volume: 60.2,
        };
        let rows = totals.display_rows();
        assert_eq!(rows[0], ("Energy", "-350 W".to_string()));
        assert_eq!(rows[1], ("O2", "7.00 kg/day".to_string()));
        assert_eq!(rows[4], ("Crew", "4".to_string()));
        assert_eq!(rows[5], ("Volume", "60.20 m³".to_string()));
    }

    #[test]
    fn test_serde_uses_capitalized_keys() {
        let json = serde_json::to_value(ResourceTotals::default()).unwrap();
        assert!(json.get("Energy").is_some());
        assert!(json.get("O2").is_some());
        assert!(json.get("Volume").is_some());
    }
}
