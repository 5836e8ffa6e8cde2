mod equipment_panel;
mod nav_pad;
mod status;
mod style_popup;
mod toolbar;
mod totals_panel;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::editor::PersistenceStatus;

/// Resource that tracks whether any modal dialog is currently open.
/// Canvas input handlers check this so clicks meant for a dialog never
/// edit the layout.
#[derive(Resource, Default)]
pub struct DialogState {
    /// True when any modal dialog is open that should block editor input
    pub any_modal_open: bool,
}

/// Runs in the First schedule before input handlers.
fn update_dialog_state(status: Res<PersistenceStatus>, mut dialog_state: ResMut<DialogState>) {
    dialog_state.any_modal_open = status.error.is_some();
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogState>()
            .init_resource::<toolbar::RecentSaves>()
            // Top bar first so the side panel fits below it
            .add_systems(
                EguiPrimaryContextPass,
                (toolbar::toolbar_ui, totals_panel::totals_panel_ui).chain(),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    equipment_panel::equipment_panel_ui,
                    nav_pad::nav_pad_ui,
                    style_popup::style_popup_ui,
                    status::persistence_error_ui,
                )
                    .chain()
                    .after(totals_panel::totals_panel_ui),
            )
            .add_systems(First, update_dialog_state);
    }
}
