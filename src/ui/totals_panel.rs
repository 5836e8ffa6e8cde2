use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::editor::EditorSession;
use crate::habitat::{slot_label, ModuleStyle, SLOT_COUNT};
use crate::theme;

/// Left panel with the aggregated resource totals
pub fn totals_panel_ui(mut contexts: EguiContexts, session: Res<EditorSession>) -> Result {
    egui::SidePanel::left("totals_panel")
        .resizable(false)
        .exact_width(220.0)
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .fill(theme::ui::PANEL_BACKGROUND)
                .inner_margin(egui::Margin::same(12)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.heading("Totals");
            ui.add_space(6.0);

            egui::Grid::new("totals_grid")
                .num_columns(2)
                .spacing([16.0, 6.0])
                .show(ui, |ui| {
                    for (label, value) in session.habitat.totals().display_rows() {
                        ui.colored_label(theme::ui::LABEL_TEXT, label);
                        ui.colored_label(theme::ui::VALUE_TEXT, value);
                        ui.end_row();
                    }
                });

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(6.0);

            match session.habitat.selected_module() {
                Some(module) => {
                    ui.label(
                        egui::RichText::new(format!(
                            "Selected ({}, {})",
                            module.axial.q, module.axial.r
                        ))
                        .strong(),
                    );
                    ui.colored_label(
                        theme::bevy_to_egui_opaque(theme::style_color(module.style)),
                        module.style.display_name(),
                    );
                    ui.label(format!(
                        "Equipment {}/{}",
                        module.equipped_count(),
                        SLOT_COUNT
                    ));
                    let fitted = module
                        .equipment
                        .iter()
                        .filter(|slot| slot.is_some())
                        .map(|slot| slot_label(*slot))
                        .collect::<Vec<_>>();
                    if !fitted.is_empty() {
                        ui.colored_label(theme::ui::HINT_TEXT, fitted.join(", "));
                    }
                }
                None => {
                    ui.colored_label(theme::ui::HINT_TEXT, "Click a module to select it.");
                }
            }

            ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                ui.colored_label(
                    theme::ui::HINT_TEXT,
                    format!(
                        "R: toggle {} / {}",
                        ModuleStyle::Prefabricated.display_name(),
                        ModuleStyle::Manufactured.display_name()
                    ),
                );
                ui.colored_label(theme::ui::HINT_TEXT, "Esc: close / back");
            });
        });
    Ok(())
}
