use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::editor::EditorSession;
use crate::habitat::{slot_label, CycleDirection, EquipmentPanel, SLOT_COUNT};
use crate::theme;

const GRID_COLUMNS: usize = 2;

/// Slot grid for the selected module, shown while the panel is open
pub fn equipment_panel_ui(mut contexts: EguiContexts, mut session: ResMut<EditorSession>) -> Result {
    let EquipmentPanel::Open { axial } = session.habitat.equipment_panel() else {
        return Ok(());
    };
    let Some(module) = session.habitat.get(axial) else {
        return Ok(());
    };
    let equipment = module.equipment;
    let style = module.style;

    let mut clicked = None;
    egui::Window::new("Equipment")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_TOP, [-12.0, 56.0])
        .frame(
            egui::Frame::window(&contexts.ctx_mut()?.style())
                .fill(theme::ui::PANEL_BACKGROUND)
                .stroke(egui::Stroke::new(1.0, theme::ui::PANEL_BORDER)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Module ({}, {})", axial.q, axial.r));
                ui.colored_label(
                    theme::bevy_to_egui_opaque(theme::style_color(style)),
                    style.display_name(),
                );
            });
            ui.add_space(6.0);

            egui::Grid::new("equipment_grid")
                .num_columns(GRID_COLUMNS)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    for (slot, item) in equipment.iter().enumerate().take(SLOT_COUNT) {
                        ui.horizontal(|ui| {
                            if ui.small_button("◀").clicked() {
                                clicked = Some((slot, CycleDirection::Backward));
                            }
                            ui.add_sized(
                                [110.0, 20.0],
                                egui::Label::new(
                                    egui::RichText::new(slot_label(*item))
                                        .color(theme::ui::VALUE_TEXT),
                                ),
                            );
                            if ui.small_button("▶").clicked() {
                                clicked = Some((slot, CycleDirection::Forward));
                            }
                        });
                        if slot % GRID_COLUMNS == GRID_COLUMNS - 1 {
                            ui.end_row();
                        }
                    }
                });
        });

    if let Some((slot, direction)) = clicked {
        session.habitat.cycle_equipment(slot, direction);
    }
    Ok(())
}
