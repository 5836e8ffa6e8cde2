//! View camera for the hex canvas.
//!
//! [`ViewCamera`] owns the screen/world transform. The Bevy `Camera2d` stays
//! at the origin with unit scale and only presents window pixels, so gizmos
//! and sprites are positioned through [`screen_to_bevy`].

use bevy::prelude::*;

use crate::config::EditorSettings;
use crate::habitat::persistence::CameraPose;

#[derive(Component)]
pub struct EditorCamera;

/// Discrete pan directions, in screen space (y down).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Up,
    Down,
    Left,
    Right,
}

impl PanDirection {
    fn unit(self) -> Vec2 {
        match self {
            PanDirection::Up => Vec2::new(0.0, -1.0),
            PanDirection::Down => Vec2::new(0.0, 1.0),
            PanDirection::Left => Vec2::new(-1.0, 0.0),
            PanDirection::Right => Vec2::new(1.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewCamera {
    zoom: f32,
    /// World point shown at the center of the viewport
    pan: Vec2,
    viewport: Vec2,
    min_zoom: f32,
    max_zoom: f32,
}

impl ViewCamera {
    pub fn new(viewport: Vec2, settings: &EditorSettings) -> Self {
        Self {
            zoom: 1.0_f32.clamp(settings.min_zoom, settings.max_zoom),
            pan: Vec2::ZERO,
            viewport,
            min_zoom: settings.min_zoom,
            max_zoom: settings.max_zoom,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    #[cfg(test)]
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn viewport_center(&self) -> Vec2 {
        self.viewport * 0.5
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.pan) * self.zoom + self.viewport * 0.5
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.viewport * 0.5) / self.zoom + self.pan
    }

    /// Scale zoom by `factor`, keeping the world point under `screen_point` fixed.
    pub fn zoom_at(&mut self, screen_point: Vec2, factor: f32) {
        let before = self.screen_to_world(screen_point);
        self.zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        let after = self.screen_to_world(screen_point);
        self.pan += before - after;
    }

    /// Move the view by `step_px` screen pixels.
    pub fn pan_step(&mut self, direction: PanDirection, step_px: f32) {
        self.pan += direction.unit() * (step_px / self.zoom);
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            pos: self.pan,
            zoom: self.zoom,
        }
    }

    /// Restore a saved pose. Non-finite positions and non-positive zooms are ignored.
    pub fn set_pose(&mut self, pose: CameraPose) {
        if pose.pos.is_finite() {
            self.pan = pose.pos;
        }
        if pose.zoom.is_finite() && pose.zoom > 0.0 {
            self.zoom = pose.zoom.clamp(self.min_zoom, self.max_zoom);
        }
    }
}

/// Window pixel (top-left origin, y down) to Bevy 2D world under the fixed camera.
pub fn screen_to_bevy(screen: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(screen.x - viewport.x * 0.5, viewport.y * 0.5 - screen.y)
}

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        EditorCamera,
        Transform::from_translation(Vec3::new(0.0, 0.0, 1000.0)),
    ));
}
