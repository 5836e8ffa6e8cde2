//! Editor session: the single owner of all mutable editor state.
//!
//! Input systems translate Bevy events into calls on [`EditorSession`]; the
//! session in turn mutates its [`ViewCamera`] and [`Habitat`]. Keeping the
//! click dispatch here means the whole interaction can be exercised without
//! an ECS world.

use bevy::prelude::*;

use crate::config::EditorSettings;
use crate::constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use crate::habitat::persistence::LoadedHabitat;
use crate::habitat::{AffordanceHit, Axial, EscapeOutcome, Habitat, StylePopup};

use super::camera::{PanDirection, ViewCamera};

/// Buttons on the navigation pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    ZoomIn,
    ZoomOut,
    Pan(PanDirection),
}

/// Result of a left click on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    Deleted(Axial),
    PopupOpened { pending: Axial, anchor: Vec2 },
    Selected(Axial),
    Deselected,
}

#[derive(Resource, Debug, Clone)]
pub struct EditorSession {
    pub camera: ViewCamera,
    pub habitat: Habitat,
    pub settings: EditorSettings,
    /// Screen position the style popup is anchored to
    pub popup_anchor: Option<Vec2>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(
            EditorSettings::default(),
            Vec2::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT),
        )
    }
}

impl EditorSession {
    pub fn new(settings: EditorSettings, viewport: Vec2) -> Self {
        let settings = settings.sanitized();
        Self {
            camera: ViewCamera::new(viewport, &settings),
            habitat: Habitat::default(),
            settings,
            popup_anchor: None,
        }
    }

    /// Rebuild camera limits after settings changed, keeping the layout.
    pub fn apply_settings(&mut self, settings: EditorSettings) {
        self.settings = settings.sanitized();
        let pose = self.camera.pose();
        self.camera = ViewCamera::new(self.camera.viewport(), &self.settings);
        self.camera.set_pose(pose);
    }

    pub fn hex_size(&self) -> f32 {
        self.settings.hex_size
    }

    /// Occupied cell under a screen position.
    pub fn pick_screen(&self, screen: Vec2) -> Option<Axial> {
        self.habitat
            .pick(self.camera.screen_to_world(screen), self.settings.hex_size)
    }

    /// Canvas click dispatch: delete marker, then place markers, then selection.
    ///
    /// Clicks that land on the popup itself never reach here. A canvas click
    /// while it is open closes it and is then dispatched as usual.
    pub fn click(&mut self, screen: Vec2) -> ClickOutcome {
        if self.habitat.style_popup() != StylePopup::Closed {
            self.close_popup();
        }

        let world = self.camera.screen_to_world(screen);
        let radius = self.settings.dot_radius / self.camera.zoom();
        let size = self.settings.hex_size;

        match self.habitat.hit_affordance(world, radius, size) {
            Some(AffordanceHit::Delete) => {
                if let Some(selected) = self.habitat.selection()
                    && self.habitat.delete(selected)
                {
                    info!("Deleted module at ({}, {})", selected.q, selected.r);
                    return ClickOutcome::Deleted(selected);
                }
            }
            Some(AffordanceHit::Place { axial, anchor }) => {
                if self.habitat.open_style_popup(axial) {
                    let anchor = self.camera.world_to_screen(anchor);
                    self.popup_anchor = Some(anchor);
                    return ClickOutcome::PopupOpened {
                        pending: axial,
                        anchor,
                    };
                }
            }
            None => {}
        }

        let picked = self.pick_screen(screen);
        match self.habitat.select_or_toggle(picked) {
            Some(axial) => ClickOutcome::Selected(axial),
            None => ClickOutcome::Deselected,
        }
    }

    pub fn close_popup(&mut self) {
        self.habitat.close_style_popup();
        self.popup_anchor = None;
    }

    /// Escape closes the style popup first, then the equipment panel. The
    /// selection survives both.
    pub fn escape(&mut self) -> EscapeOutcome {
        let outcome = self.habitat.handle_escape();
        if outcome == EscapeOutcome::ClosedPopup {
            self.popup_anchor = None;
        }
        outcome
    }

    /// Zoom at the cursor by one step per wheel notch direction.
    pub fn wheel(&mut self, screen: Vec2, delta: f32) {
        if delta == 0.0 {
            return;
        }
        let factor = if delta > 0.0 {
            self.settings.zoom_step
        } else {
            1.0 / self.settings.zoom_step
        };
        self.camera.zoom_at(screen, factor);
    }

    pub fn nav(&mut self, action: NavAction) {
        let center = self.camera.viewport_center();
        match action {
            NavAction::ZoomIn => self.camera.zoom_at(center, self.settings.zoom_step),
            NavAction::ZoomOut => self.camera.zoom_at(center, 1.0 / self.settings.zoom_step),
            NavAction::Pan(direction) => self.camera.pan_step(direction, self.settings.pan_step_px),
        }
    }

    /// Replace the layout and camera with a successfully loaded snapshot.
    pub fn apply_loaded(&mut self, loaded: LoadedHabitat) {
        self.camera.set_pose(loaded.camera);
        self.habitat = loaded.into_habitat();
        self.popup_anchor = None;
    }
}
