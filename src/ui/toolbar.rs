use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::AppConfig;
use crate::constants::MAX_RECENT_SAVES;
use crate::editor::{
    EditorSession, LeaveEditorRequest, LoadHabitatRequest, PersistenceStatus, SaveHabitatRequest,
};
use crate::habitat::persistence::{human_age, list_saves, SaveSummary};
use crate::theme;

/// Recent saves shown in the Open menu, refreshed when the menu is opened
#[derive(Resource, Default)]
pub struct RecentSaves {
    pub entries: Vec<SaveSummary>,
}

fn now_secs() -> f64 {
    chrono::Local::now().timestamp_millis() as f64 / 1000.0
}

/// One line per save: file, age, modules, crew and energy
fn save_entry_label(summary: &SaveSummary, now: f64) -> String {
    format!(
        "{}  ·  {}  ·  {} modules  ·  crew {}  ·  {:.0} W",
        summary.file_name(),
        human_age(summary.timestamp, now),
        summary.module_count,
        summary.totals.crew as i64,
        summary.totals.energy
    )
}

/// Top bar: module counter, Save, Open menu and Back
#[allow(clippy::too_many_arguments)]
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    session: Res<EditorSession>,
    config: Res<AppConfig>,
    status: Res<PersistenceStatus>,
    time: Res<Time>,
    mut recent: ResMut<RecentSaves>,
    mut save_events: MessageWriter<SaveHabitatRequest>,
    mut load_events: MessageWriter<LoadHabitatRequest>,
    mut leave_events: MessageWriter<LeaveEditorRequest>,
) -> Result {
    egui::TopBottomPanel::top("main_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 6.0;

                ui.label(
                    egui::RichText::new(format!("Modules: {}", session.habitat.len()))
                        .size(14.0)
                        .strong()
                        .color(theme::ui::VALUE_TEXT),
                );

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                if ui
                    .add(egui::Button::new("Save").min_size(egui::vec2(0.0, 24.0)))
                    .on_hover_text("Ctrl+S")
                    .clicked()
                {
                    save_events.write(SaveHabitatRequest);
                }

                let open = ui.menu_button("Open", |ui| {
                    ui.set_min_width(420.0);
                    if recent.entries.is_empty() {
                        ui.label(
                            egui::RichText::new("No saves yet").color(theme::ui::HINT_TEXT),
                        );
                        return;
                    }
                    let now = now_secs();
                    for summary in &recent.entries {
                        if ui
                            .button(save_entry_label(summary, now))
                            .on_hover_text(summary.path.to_string_lossy())
                            .clicked()
                        {
                            load_events.write(LoadHabitatRequest {
                                path: summary.path.clone(),
                            });
                            ui.close();
                        }
                    }
                });
                if open.response.clicked() {
                    recent.entries =
                        list_saves(&config.data.resolved_saves_dir(), MAX_RECENT_SAVES);
                }

                if let Some(name) = status.recent_save(time.elapsed_secs_f64()) {
                    ui.add_space(8.0);
                    ui.colored_label(theme::ui::SUCCESS_TEXT, format!("Saved {}", name));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add(egui::Button::new("Back").min_size(egui::vec2(0.0, 24.0)))
                        .on_hover_text("Esc")
                        .clicked()
                    {
                        leave_events.write(LeaveEditorRequest);
                    }
                });
            });
        });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habitat::ResourceTotals;
    use std::path::PathBuf;

    #[test]
    fn test_save_entry_label() {
        let summary = SaveSummary {
            path: PathBuf::from("saves/habitat_20250304_050607.json"),
            timestamp: 1000.0,
            module_count: 3,
            totals: ResourceTotals {
                crew: 4.0,
                energy: 1250.0,
                ..Default::default()
            },
        };
        let label = save_entry_label(&summary, 1030.0);
        assert!(label.starts_with("habitat_20250304_050607.json"));
        assert!(label.contains("just now"));
        assert!(label.contains("3 modules"));
        assert!(label.contains("crew 4"));
        assert!(label.contains("1250 W"));
    }
}
