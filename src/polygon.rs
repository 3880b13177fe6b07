// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use binrw::binrw;

use crate::color::Color;
use crate::geometry::Triangle;

/// Polygons of this type are pure background, nothing collides with them.
pub const NON_COLLIDING_POLYGON_TYPE: u8 = 3;

#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Reciprocal of the homogeneous w, used for perspective.
    pub rhw: f32,
    pub color: Color,
    pub u: f32,
    pub v: f32,
}

/// A single textured triangle of terrain or background.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    pub vertices: [Vertex; 3],
    /// One normal per vertex.
    pub normals: [Vec3; 3],
    /// How things collide with this polygon, see [`NON_COLLIDING_POLYGON_TYPE`].
    pub poly_type: u8,
}

impl Polygon {
    /// Whether this polygon takes part in collision, and thus belongs in sectors.
    pub fn is_colliding(&self) -> bool {
        self.poly_type != NON_COLLIDING_POLYGON_TYPE
    }

    /// The xy bounding box as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        let [a, b, c] = &self.vertices;

        (
            a.x.min(b.x).min(c.x),
            a.y.min(b.y).min(c.y),
            a.x.max(b.x).max(c.x),
            a.y.max(b.y).max(c.y),
        )
    }

    /// The xy projection of this polygon.
    pub fn triangle(&self) -> Triangle {
        self.vertices.map(|v| [v.x as f64, v.y as f64])
    }
}
