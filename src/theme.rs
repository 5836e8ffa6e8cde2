//! Centralized color theme for the application.
//!
//! This module provides all colors used throughout the editor UI and rendering.
//! Modify values here to change the application's color scheme.

use bevy::prelude::Color;
use bevy_egui::egui;

use crate::habitat::ModuleStyle;

// ============================================================================
// Canvas Colors
// ============================================================================

/// Near-black canvas background
pub const BACKGROUND: Color = Color::srgb(0.078, 0.078, 0.094);

/// Dark outline drawn around every hexagon
pub const HEX_STROKE: Color = Color::srgb(0.157, 0.157, 0.188);

/// Outline of the selected hexagon
pub const HEX_SELECTED_STROKE: Color = Color::srgb(0.94, 0.94, 0.94);

/// Blue fill for prefabricated modules
pub const PREFAB: Color = Color::srgb(0.235, 0.51, 0.784);

/// Orange fill for manufactured modules
pub const MANUFACTURED: Color = Color::srgb(0.902, 0.627, 0.235);

/// Green "place here" marker
pub const PLACE_MARKER: Color = Color::srgb(0.118, 0.784, 0.353);

/// Red "delete" marker
pub const DELETE_MARKER: Color = Color::srgb(0.863, 0.235, 0.235);

/// Rim around markers
pub const MARKER_RIM: Color = Color::srgb(0.94, 0.94, 0.94);

/// Fill color used when a style has no sprite, also used to tint a borrowed sprite
pub fn style_color(style: ModuleStyle) -> Color {
    match style {
        ModuleStyle::Prefabricated => PREFAB,
        ModuleStyle::Manufactured => MANUFACTURED,
    }
}

// ============================================================================
// UI Colors (egui)
// ============================================================================

pub mod ui {
    use bevy_egui::egui;

    /// Dark panel background
    pub const PANEL_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(24, 24, 28);

    /// Panel border
    pub const PANEL_BORDER: egui::Color32 = egui::Color32::from_rgb(120, 120, 135);

    /// Light grey for label text
    pub const LABEL_TEXT: egui::Color32 = egui::Color32::LIGHT_GRAY;

    /// Grey for help/hint text
    pub const HINT_TEXT: egui::Color32 = egui::Color32::GRAY;

    /// Near-white for values
    pub const VALUE_TEXT: egui::Color32 = egui::Color32::from_rgb(240, 240, 240);

    /// Red for error messages
    pub const ERROR_TEXT: egui::Color32 = egui::Color32::RED;

    /// Green for confirmations
    pub const SUCCESS_TEXT: egui::Color32 = egui::Color32::from_rgb(100, 200, 100);
}

// ============================================================================
// Color Conversion Utilities
// ============================================================================

/// Convert a Bevy Color to egui Color32 (fully opaque)
pub fn bevy_to_egui_opaque(color: Color) -> egui::Color32 {
    let srgba = color.to_srgba();
    egui::Color32::from_rgb(
        (srgba.red * 255.0).round() as u8,
        (srgba.green * 255.0).round() as u8,
        (srgba.blue * 255.0).round() as u8,
    )
}
