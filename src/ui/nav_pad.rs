use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::editor::{EditorSession, NavAction, PanDirection};

/// Button layout of the pad, row by row
const PAD: [[(&str, NavAction); 3]; 2] = [
    [
        ("+", NavAction::ZoomIn),
        ("↑", NavAction::Pan(PanDirection::Up)),
        ("−", NavAction::ZoomOut),
    ],
    [
        ("←", NavAction::Pan(PanDirection::Left)),
        ("↓", NavAction::Pan(PanDirection::Down)),
        ("→", NavAction::Pan(PanDirection::Right)),
    ],
];

/// Zoom and pan buttons in the bottom-left corner of the canvas
pub fn nav_pad_ui(mut contexts: EguiContexts, mut session: ResMut<EditorSession>) -> Result {
    let mut pressed = None;
    egui::Area::new(egui::Id::new("nav_pad"))
        .anchor(egui::Align2::LEFT_BOTTOM, [232.0, -12.0])
        .show(contexts.ctx_mut()?, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                egui::Grid::new("nav_pad_grid")
                    .spacing([4.0, 4.0])
                    .show(ui, |ui| {
                        for row in PAD {
                            for (label, action) in row {
                                let button = egui::Button::new(
                                    egui::RichText::new(label).size(16.0).strong(),
                                )
                                .min_size(egui::vec2(34.0, 34.0));
                                if ui.add(button).clicked() {
                                    pressed = Some(action);
                                }
                            }
                            ui.end_row();
                        }
                    });
            });
        });

    if let Some(action) = pressed {
        session.nav(action);
    }
    Ok(())
}
