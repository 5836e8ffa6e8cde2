use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::editor::EditorSession;
use crate::habitat::{ModuleStyle, StylePopup};
use crate::theme;

/// Offset from the place marker so the popup does not cover it
const POPUP_OFFSET: egui::Vec2 = egui::vec2(14.0, -14.0);

/// Style chooser next to the place marker that opened it
pub fn style_popup_ui(mut contexts: EguiContexts, mut session: ResMut<EditorSession>) -> Result {
    let StylePopup::AwaitingStyleChoice { pending } = session.habitat.style_popup() else {
        return Ok(());
    };
    let anchor = session
        .popup_anchor
        .unwrap_or_else(|| session.camera.viewport_center());

    let mut chosen = None;
    egui::Area::new(egui::Id::new("style_popup"))
        .fixed_pos(egui::pos2(anchor.x, anchor.y) + POPUP_OFFSET)
        .order(egui::Order::Foreground)
        .show(contexts.ctx_mut()?, |ui| {
            egui::Frame::popup(ui.style())
                .fill(theme::ui::PANEL_BACKGROUND)
                .stroke(egui::Stroke::new(1.0, theme::ui::PANEL_BORDER))
                .show(ui, |ui| {
                    ui.colored_label(
                        theme::ui::LABEL_TEXT,
                        format!("New module at ({}, {})", pending.q, pending.r),
                    );
                    ui.horizontal(|ui| {
                        for style in ModuleStyle::all() {
                            let button = egui::Button::new(
                                egui::RichText::new(style.display_name())
                                    .strong()
                                    .color(egui::Color32::WHITE),
                            )
                            .fill(theme::bevy_to_egui_opaque(theme::style_color(*style)))
                            .min_size(egui::vec2(110.0, 28.0));
                            if ui.add(button).clicked() {
                                chosen = Some(*style);
                            }
                        }
                    });
                });
        });

    if let Some(style) = chosen {
        session.habitat.choose_style(style);
        session.popup_anchor = None;
    }
    Ok(())
}
