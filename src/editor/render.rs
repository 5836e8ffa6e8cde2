//! Drawing the habitat: gizmo hexagons and markers, plus one sprite entity
//! per module whose style has a loaded sprite.
//!
//! Everything is laid out in window pixels through the [`ViewCamera`]
//! transform and handed to Bevy with [`screen_to_bevy`].
//!
//! [`ViewCamera`]: super::camera::ViewCamera

use bevy::prelude::*;
use std::collections::HashSet;

use crate::assets::ModuleSprites;
use crate::habitat::{axial_to_world, hex_vertices, Axial, ModuleStyle};
use crate::theme;

use super::camera::screen_to_bevy;
use super::session::EditorSession;

/// Vertical distance between fill lines, in screen pixels
const FILL_LINE_SPACING: f32 = 2.0;

/// Segments used to approximate a marker circle for filling
const MARKER_SEGMENTS: usize = 20;

/// Sprite entity standing in for one module
#[derive(Component)]
pub struct ModuleSprite {
    pub axial: Axial,
    pub style: ModuleStyle,
}

/// Horizontal segments covering a convex polygon, `spacing` apart.
pub fn scanline_spans(polygon: &[Vec2], spacing: f32) -> Vec<(Vec2, Vec2)> {
    if polygon.len() < 3 || spacing <= 0.0 {
        return Vec::new();
    }

    let min_y = polygon.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
    let max_y = polygon.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);

    let mut spans = Vec::new();
    let mut y = min_y + spacing * 0.5;
    while y < max_y {
        let mut left = f32::INFINITY;
        let mut right = f32::NEG_INFINITY;
        for i in 0..polygon.len() {
            let a = polygon[i];
            let b = polygon[(i + 1) % polygon.len()];
            if (a.y <= y) != (b.y <= y) {
                let x = a.x + (y - a.y) / (b.y - a.y) * (b.x - a.x);
                left = left.min(x);
                right = right.max(x);
            }
        }
        if left <= right {
            spans.push((Vec2::new(left, y), Vec2::new(right, y)));
        }
        y += spacing;
    }
    spans
}

fn circle_polygon(center: Vec2, radius: f32) -> Vec<Vec2> {
    (0..MARKER_SEGMENTS)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / MARKER_SEGMENTS as f32;
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

fn fill_polygon(gizmos: &mut Gizmos, polygon: &[Vec2], viewport: Vec2, color: Color) {
    for (start, end) in scanline_spans(polygon, FILL_LINE_SPACING) {
        gizmos.line_2d(
            screen_to_bevy(start, viewport),
            screen_to_bevy(end, viewport),
            color,
        );
    }
}

fn outline_polygon(gizmos: &mut Gizmos, polygon: &[Vec2], viewport: Vec2, color: Color) {
    let mut points: Vec<Vec2> = polygon
        .iter()
        .map(|p| screen_to_bevy(*p, viewport))
        .collect();
    if let Some(first) = points.first().copied() {
        points.push(first);
    }
    gizmos.linestrip_2d(points, color);
}

fn draw_marker(gizmos: &mut Gizmos, center: Vec2, radius: f32, viewport: Vec2, color: Color) {
    fill_polygon(gizmos, &circle_polygon(center, radius), viewport, color);
    gizmos.circle_2d(
        Isometry2d::from_translation(screen_to_bevy(center, viewport)),
        radius,
        theme::MARKER_RIM,
    );
}

/// Hexagon corners of a module in screen space
fn screen_hexagon(session: &EditorSession, axial: Axial) -> Vec<Vec2> {
    let size = session.hex_size();
    hex_vertices(axial_to_world(axial, size), size)
        .iter()
        .map(|v| session.camera.world_to_screen(*v))
        .collect()
}

pub fn draw_habitat(
    mut gizmos: Gizmos,
    session: Res<EditorSession>,
    sprites: Res<ModuleSprites>,
) {
    let viewport = session.camera.viewport();

    for module in session.habitat.modules() {
        let hexagon = screen_hexagon(&session, module.axial);
        if sprites.get(module.style).is_none() {
            fill_polygon(&mut gizmos, &hexagon, viewport, theme::style_color(module.style));
        }
        outline_polygon(&mut gizmos, &hexagon, viewport, theme::HEX_STROKE);
    }

    let Some(selected) = session.habitat.selection() else {
        return;
    };
    let hexagon = screen_hexagon(&session, selected);
    outline_polygon(&mut gizmos, &hexagon, viewport, theme::HEX_SELECTED_STROKE);

    let radius = session.settings.dot_radius;
    let affordances = session.habitat.affordances(session.hex_size());
    for (_, anchor) in &affordances.place {
        let center = session.camera.world_to_screen(*anchor);
        draw_marker(&mut gizmos, center, radius, viewport, theme::PLACE_MARKER);
    }
    if let Some(center) = affordances.delete {
        let center = session.camera.world_to_screen(center);
        draw_marker(&mut gizmos, center, radius, viewport, theme::DELETE_MARKER);
    }
}

/// Keeps one sprite entity per module whose style has a usable sprite.
pub fn sync_module_sprites(
    mut commands: Commands,
    session: Res<EditorSession>,
    sprites: Res<ModuleSprites>,
    mut query: Query<(Entity, &mut ModuleSprite, &mut Sprite, &mut Transform)>,
) {
    let viewport = session.camera.viewport();
    let size = session.hex_size();
    let side = 2.0 * size * session.camera.zoom();
    let placement = |axial: Axial| {
        let screen = session.camera.world_to_screen(axial_to_world(axial, size));
        screen_to_bevy(screen, viewport).extend(0.0)
    };

    let mut present = HashSet::new();
    for (entity, mut marker, mut sprite, mut transform) in query.iter_mut() {
        let Some(module) = session.habitat.get(marker.axial) else {
            commands.entity(entity).despawn();
            continue;
        };
        let Some(style_sprite) = sprites.get(module.style) else {
            commands.entity(entity).despawn();
            continue;
        };

        if marker.style != module.style {
            marker.style = module.style;
            sprite.image = style_sprite.image.clone();
            sprite.color = style_sprite.color;
        }
        sprite.custom_size = Some(Vec2::splat(side));
        transform.translation = placement(marker.axial);
        present.insert(marker.axial);
    }

    for module in session.habitat.modules() {
        if present.contains(&module.axial) {
            continue;
        }
        let Some(style_sprite) = sprites.get(module.style) else {
            continue;
        };
        commands.spawn((
            ModuleSprite {
                axial: module.axial,
                style: module.style,
            },
            Sprite {
                image: style_sprite.image.clone(),
                color: style_sprite.color,
                custom_size: Some(Vec2::splat(side)),
                ..default()
            },
            Transform::from_translation(placement(module.axial)),
        ));
    }
}
