mod camera;
mod conditions;
mod files;
mod input;
mod render;
mod session;

pub use camera::PanDirection;
pub use files::{LoadHabitatRequest, PersistenceStatus, SaveHabitatRequest, StartupLoad};
pub use session::{EditorSession, NavAction};

use bevy::prelude::*;

use crate::config::{AppConfig, ConfigLoaded};

/// Emitted when the user asks to leave the editor (Back button, Escape with
/// nothing open). The editor does not decide where to go next.
#[derive(Message)]
pub struct LeaveEditorRequest;

/// What the host does when the editor is left
pub type LeaveAction = fn(&mut Commands);

/// Host-side hooks for the editor
#[derive(Resource, Clone, Copy)]
pub struct EditorHost {
    pub on_leave: LeaveAction,
}

impl Default for EditorHost {
    fn default() -> Self {
        Self { on_leave: exit_app }
    }
}

/// Default leave action for the standalone binary
pub fn exit_app(commands: &mut Commands) {
    commands.queue(|world: &mut World| {
        world.write_message(AppExit::Success);
    });
}

fn handle_leave_request(
    mut events: MessageReader<LeaveEditorRequest>,
    host: Res<EditorHost>,
    mut commands: Commands,
) {
    if events.read().count() > 0 {
        info!("Leaving habitat editor");
        (host.on_leave)(&mut commands);
    }
}

/// Apply the editor tunables from the loaded config
fn init_session_from_config(config: Res<AppConfig>, mut session: ResMut<EditorSession>) {
    session.apply_settings(config.data.editor);
}

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EditorSession>()
            .init_resource::<EditorHost>()
            .init_resource::<PersistenceStatus>()
            .init_resource::<StartupLoad>()
            .add_message::<LeaveEditorRequest>()
            .add_message::<SaveHabitatRequest>()
            .add_message::<LoadHabitatRequest>()
            .add_systems(
                Startup,
                (
                    camera::spawn_camera,
                    (init_session_from_config, files::queue_startup_load)
                        .chain()
                        .after(ConfigLoaded),
                ),
            )
            .add_systems(
                Update,
                (
                    input::sync_viewport,
                    (
                        input::handle_canvas_click,
                        input::handle_wheel,
                        input::handle_shortcuts,
                    )
                        .run_if(conditions::no_dialog_open),
                    (
                        files::save_habitat_system.run_if(on_message::<SaveHabitatRequest>),
                        files::load_habitat_system.run_if(on_message::<LoadHabitatRequest>),
                        handle_leave_request.run_if(on_message::<LeaveEditorRequest>),
                    ),
                    (render::sync_module_sprites, render::draw_habitat),
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_leave(commands: &mut Commands) {
        commands.insert_resource(LeftEditor);
    }

    #[derive(Resource)]
    struct LeftEditor;

    #[test]
    fn test_leave_request_runs_host_action() {
        let mut app = App::new();
        app.add_message::<LeaveEditorRequest>()
            .insert_resource(EditorHost {
                on_leave: record_leave,
            })
            .add_systems(Update, handle_leave_request);

        app.update();
        assert!(app.world().get_resource::<LeftEditor>().is_none());

        app.world_mut().write_message(LeaveEditorRequest);
        app.update();
        assert!(app.world().get_resource::<LeftEditor>().is_some());
    }
}
