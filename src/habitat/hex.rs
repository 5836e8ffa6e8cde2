//! Axial hex coordinates and pointy-top hexagon geometry.
//!
//! World space is y-down, matching screen space, so the same formulas drive
//! both hit-testing and drawing.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

const SQRT_3: f32 = 1.732_050_8;

/// Guard added to ray-casting denominators so horizontal edges never divide by zero.
const EDGE_EPSILON: f32 = 1e-9;

/// Integer axial coordinate of a hex cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Axial {
    pub q: i32,
    pub r: i32,
}

/// Neighbor offsets in the standard axial order.
pub const AXIAL_DIRECTIONS: [Axial; 6] = [
    Axial::new(1, 0),
    Axial::new(1, -1),
    Axial::new(0, -1),
    Axial::new(-1, 0),
    Axial::new(-1, 1),
    Axial::new(0, 1),
];

impl Axial {
    /// The root cell, which can never be removed.
    pub const ROOT: Axial = Axial::new(0, 0);

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }

    /// Adjacent cell, or `None` at the edge of the coordinate range.
    pub fn neighbor(self, direction: usize) -> Option<Axial> {
        let d = AXIAL_DIRECTIONS[direction % 6];
        Some(Axial::new(self.q.checked_add(d.q)?, self.r.checked_add(d.r)?))
    }

    pub fn neighbors(self) -> impl Iterator<Item = Axial> {
        (0..AXIAL_DIRECTIONS.len()).filter_map(move |i| self.neighbor(i))
    }
}

impl From<(i32, i32)> for Axial {
    fn from((q, r): (i32, i32)) -> Self {
        Axial::new(q, r)
    }
}

/// Distance from a hex center to the middle of any of its edges.
pub fn apothem(size: f32) -> f32 {
    size * SQRT_3 / 2.0
}

/// Convert an axial coordinate to the world-space center of its hexagon.
pub fn axial_to_world(axial: Axial, size: f32) -> Vec2 {
    let q = axial.q as f32;
    let r = axial.r as f32;
    Vec2::new(size * SQRT_3 * (q + r / 2.0), size * 1.5 * r)
}

/// Corners of a pointy-top hexagon, vertex `i` at `60°·i − 30°`.
pub fn hex_vertices(center: Vec2, size: f32) -> [Vec2; 6] {
    std::array::from_fn(|i| {
        let angle = (60.0 * i as f32 - 30.0).to_radians();
        center + Vec2::new(size * angle.cos(), size * angle.sin())
    })
}

/// Ray-casting point-in-polygon test.
pub fn point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
    let n = polygon.len();
    let mut inside = false;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = (b.x - a.x) * (point.y - a.y) / (b.y - a.y + EDGE_EPSILON) + a.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}

/// Midpoint of the edge `from` shares with its neighbor `to`.
///
/// Returns the center of `from` when the two coordinates coincide.
pub fn edge_midpoint(from: Axial, to: Axial, size: f32) -> Vec2 {
    let center = axial_to_world(from, size);
    let dq = (i64::from(to.q) - i64::from(from.q)) as f32;
    let dr = (i64::from(to.r) - i64::from(from.r)) as f32;
    let offset = Vec2::new(size * SQRT_3 * (dq + dr / 2.0), size * 1.5 * dr);
    let length = offset.length();
    if length < 1e-6 {
        return center;
    }
    center + offset / length * apothem(size)
}
