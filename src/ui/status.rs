use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::editor::PersistenceStatus;
use crate::theme;

/// Shows the last save/load failure until dismissed
pub fn persistence_error_ui(
    mut contexts: EguiContexts,
    mut status: ResMut<PersistenceStatus>,
) -> Result {
    let Some(error) = status.error.clone() else {
        return Ok(());
    };

    let mut dismissed = false;
    egui::Window::new("Habitat File Error")
        .collapsible(false)
        .resizable(true)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                ui.colored_label(theme::ui::ERROR_TEXT, error);
            });
            ui.add_space(6.0);
            ui.colored_label(theme::ui::HINT_TEXT, "The current layout was not changed.");
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        status.error = None;
    }
    Ok(())
}
