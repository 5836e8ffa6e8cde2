use super::hex::Axial;

/// Number of equipment slots every module carries.
pub const SLOT_COUNT: usize = 6;

/// A slot is either empty or an index into the equipment catalog.
pub type EquipmentSlot = Option<usize>;

/// Construction method of a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModuleStyle {
    #[default]
    Prefabricated,
    Manufactured,
}

impl ModuleStyle {
    pub fn all() -> &'static [ModuleStyle] {
        &[ModuleStyle::Prefabricated, ModuleStyle::Manufactured]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ModuleStyle::Prefabricated => "Prefabricated",
            ModuleStyle::Manufactured => "Manufactured",
        }
    }

    /// Integer tag used in save files.
    pub fn index(&self) -> u8 {
        match self {
            ModuleStyle::Prefabricated => 0,
            ModuleStyle::Manufactured => 1,
        }
    }

    /// Unknown tags fall back to prefabricated.
    pub fn from_index(index: i64) -> Self {
        match index {
            1 => ModuleStyle::Manufactured,
            _ => ModuleStyle::Prefabricated,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ModuleStyle::Prefabricated => ModuleStyle::Manufactured,
            ModuleStyle::Manufactured => ModuleStyle::Prefabricated,
        }
    }
}

/// Which way an equipment slot steps through the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDirection {
    Forward,
    Backward,
}

/// One occupied hex cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitatModule {
    pub axial: Axial,
    pub style: ModuleStyle,
    pub equipment: [EquipmentSlot; SLOT_COUNT],
}

impl HabitatModule {
    pub fn new(axial: Axial, style: ModuleStyle) -> Self {
        Self {
            axial,
            style,
            equipment: [None; SLOT_COUNT],
        }
    }

    pub fn with_equipment(mut self, equipment: [EquipmentSlot; SLOT_COUNT]) -> Self {
        self.equipment = equipment;
        self
    }

    pub fn equipped_count(&self) -> usize {
        self.equipment.iter().filter(|s| s.is_some()).count()
    }
}

/// Step a slot through `[empty, item_0, …, item_{n-1}]`, wrapping at both ends.
///
/// Values at or beyond `catalog_len` are treated as empty before stepping.
pub fn cycle_slot(slot: EquipmentSlot, direction: CycleDirection, catalog_len: usize) -> EquipmentSlot {
    if catalog_len == 0 {
        return None;
    }
    let current = slot.filter(|&i| i < catalog_len);
    match (direction, current) {
        (CycleDirection::Forward, None) => Some(0),
        (CycleDirection::Forward, Some(i)) if i + 1 < catalog_len => Some(i + 1),
        (CycleDirection::Forward, Some(_)) => None,
        (CycleDirection::Backward, None) => Some(catalog_len - 1),
        (CycleDirection::Backward, Some(0)) => None,
        (CycleDirection::Backward, Some(i)) => Some(i - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_index_roundtrip() {
        for style in ModuleStyle::all() {
            assert_eq!(ModuleStyle::from_index(style.index() as i64), *style);
        }
    }

    #[test]
    fn test_style_unknown_index_is_prefabricated() {
        assert_eq!(ModuleStyle::from_index(7), ModuleStyle::Prefabricated);
        assert_eq!(ModuleStyle::from_index(-1), ModuleStyle::Prefabricated);
    }

    #[test]
    fn test_style_toggle() {
        assert_eq!(ModuleStyle::Prefabricated.toggled(), ModuleStyle::Manufactured);
        assert_eq!(ModuleStyle::Manufactured.toggled(), ModuleStyle::Prefabricated);
    }

    #[test]
    fn test_new_module_is_empty() {
        let module = HabitatModule::new(Axial::new(1, 2), ModuleStyle::Manufactured);
        assert_eq!(module.equipped_count(), 0);
    }

    #[test]
    fn test_cycle_forward_sequence() {
        let mut slot = None;
        let mut seen = Vec::new();
        for _ in 0..4 {
            slot = cycle_slot(slot, CycleDirection::Forward, 3);
            seen.push(slot);
        }
        assert_eq!(seen, vec![Some(0), Some(1), Some(2), None]);
    }

    #[test]
    fn test_cycle_backward_sequence() {
        let mut slot = None;
        let mut seen = Vec::new();
        for _ in 0..4 {
            slot = cycle_slot(slot, CycleDirection::Backward, 3);
            seen.push(slot);
        }
        assert_eq!(seen, vec![Some(2), Some(1), Some(0), None]);
    }

    #[test]
    fn test_cycle_wraps_after_full_loop() {
        let n = 5;
        for start in [None, Some(0), Some(3), Some(4)] {
            let mut slot = start;
            for _ in 0..=n {
                slot = cycle_slot(slot, CycleDirection::Forward, n);
            }
            assert_eq!(slot, start);
        }
    }

    #[test]
    fn test_cycle_forward_then_backward_is_noop() {
        for start in [None, Some(0), Some(2), Some(4)] {
            let there = cycle_slot(start, CycleDirection::Forward, 5);
            assert_eq!(cycle_slot(there, CycleDirection::Backward, 5), start);
        }
    }

    #[test]
    fn test_cycle_out_of_range_treated_as_empty() {
        assert_eq!(cycle_slot(Some(42), CycleDirection::Forward, 5), Some(0));
    }

    #[test]
    fn test_cycle_empty_catalog() {
        assert_eq!(cycle_slot(None, CycleDirection::Forward, 0), None);
    }
}
