//! Window input translated into [`EditorSession`] calls.
//!
//! Canvas input is dropped while the pointer is over an egui area, keyboard
//! shortcuts while egui has text focus.

use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::habitat::EscapeOutcome;

use super::files::SaveHabitatRequest;
use super::session::{ClickOutcome, EditorSession};
use super::LeaveEditorRequest;

/// Check if the cursor is over egui UI
pub fn is_cursor_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false)
}

fn egui_wants_keyboard(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_keyboard_input())
        .unwrap_or(false)
}

/// Keep the view camera's viewport equal to the window size
pub fn sync_viewport(
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut session: ResMut<EditorSession>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };
    let size = window.size();
    if size.x > 0.0 && size.y > 0.0 && session.camera.viewport() != size {
        session.camera.set_viewport(size);
    }
}

pub fn handle_canvas_click(
    mouse_button: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut session: ResMut<EditorSession>,
    mut contexts: EguiContexts,
) {
    if !mouse_button.just_pressed(MouseButton::Left) || is_cursor_over_ui(&mut contexts) {
        return;
    }

    let Ok(window) = window_query.single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };

    match session.click(cursor_pos) {
        ClickOutcome::PopupOpened { pending, .. } => {
            debug!("Choosing style for ({}, {})", pending.q, pending.r)
        }
        ClickOutcome::Selected(axial) => debug!("Selected ({}, {})", axial.q, axial.r),
        _ => {}
    }
}

pub fn handle_wheel(
    mut scroll_events: MessageReader<MouseWheel>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut session: ResMut<EditorSession>,
    mut contexts: EguiContexts,
) {
    if is_cursor_over_ui(&mut contexts) {
        scroll_events.clear();
        return;
    }

    let cursor_pos = window_query
        .single()
        .ok()
        .and_then(|window| window.cursor_position());

    for event in scroll_events.read() {
        let anchor = cursor_pos.unwrap_or_else(|| session.camera.viewport_center());
        session.wheel(anchor, event.y);
    }
}

/// Escape closes the innermost open thing, R toggles the selected style,
/// Ctrl+S saves.
pub fn handle_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<EditorSession>,
    mut contexts: EguiContexts,
    mut save_events: MessageWriter<SaveHabitatRequest>,
    mut leave_events: MessageWriter<LeaveEditorRequest>,
) {
    if egui_wants_keyboard(&mut contexts) {
        return;
    }

    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);

    if keyboard.just_pressed(KeyCode::Escape) && session.escape() == EscapeOutcome::Unhandled {
        leave_events.write(LeaveEditorRequest);
    }

    if ctrl && keyboard.just_pressed(KeyCode::KeyS) {
        save_events.write(SaveHabitatRequest);
    } else if !ctrl
        && keyboard.just_pressed(KeyCode::KeyR)
        && session.habitat.toggle_selected_style()
    {
        debug!("Toggled style of selected module");
    }
}
