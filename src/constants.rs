//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1600.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// Hexagon circumradius in world units
pub const DEFAULT_HEX_SIZE: f32 = 45.0;

/// Radius of the place/delete markers in screen pixels
pub const DEFAULT_DOT_RADIUS: f32 = 9.0;

/// Screen distance covered by one pan button press
pub const DEFAULT_PAN_STEP_PX: f32 = 90.0;

/// Zoom factor applied per wheel notch or zoom button press
pub const DEFAULT_ZOOM_STEP: f32 = 1.12;

pub const DEFAULT_MIN_ZOOM: f32 = 0.3;
pub const DEFAULT_MAX_ZOOM: f32 = 3.5;

/// Maximum number of saves listed in the Open menu
pub const MAX_RECENT_SAVES: usize = 15;

/// Sprite file candidates per module style, first existing file wins
pub const PREFAB_SPRITE_CANDIDATES: [&str; 2] = ["Modulo.png", "Modulo.jpg"];
pub const MANUFACTURED_SPRITE_CANDIDATES: [&str; 2] = ["ModuloB.png", "ModuloB.jpg"];
