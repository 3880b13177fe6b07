// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

/// A 2D point, as `[x, y]`.
pub type Point = [f64; 2];

/// Three corners of a triangle, in either winding.
pub type Triangle = [Point; 3];

/// An axis-aligned rectangle spanning `x..=x + w` and `y..=y + h`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Corners in order: top left, top right, bottom right, bottom left.
    pub fn corners(&self) -> [Point; 4] {
        [
            [self.x, self.y],
            [self.x + self.w, self.y],
            [self.x + self.w, self.y + self.h],
            [self.x, self.y + self.h],
        ]
    }

    /// The four edges, each running from one corner to the next.
    pub fn edges(&self) -> [(Point, Point); 4] {
        let [a, b, c, d] = self.corners();
        [(a, b), (b, c), (c, d), (d, a)]
    }
}

/// Whether `p` lies inside the rectangle, borders included.
pub fn point_in_rect(rect: &Rect, p: Point) -> bool {
    rect.x <= p[0] && p[0] <= rect.x + rect.w && rect.y <= p[1] && p[1] <= rect.y + rect.h
}

/// Strict counter-clockwise orientation of `a`, `b`, `c`.
fn ccw(a: Point, b: Point, c: Point) -> bool {
    (c[1] - a[1]) * (b[0] - a[0]) > (b[1] - a[1]) * (c[0] - a[0])
}

/// Whether segment `a`-`b` crosses segment `c`-`d`.
///
/// Collinear and endpoint-touching cases are not special cased, they fall out of the strict
/// orientation test and may report either way.
pub fn segments_intersect(a: Point, b: Point, c: Point, d: Point) -> bool {
    ccw(a, c, d) != ccw(b, c, d) && ccw(a, b, c) != ccw(a, b, d)
}

/// Barycentric containment test that works for both windings. Edges count as inside.
pub fn point_in_triangle(triangle: &Triangle, p: Point) -> bool {
    let [[ax, ay], [bx, by], [cx, cy]] = *triangle;
    let [x, y] = p;

    let area = 0.5 * (-by * cx + ay * (-bx + cx) + ax * (by - cy) + bx * cy);
    let sign = if area < 0.0 { -1.0 } else { 1.0 };

    let s = (ay * cx - ax * cy + (cy - ay) * x + (ax - cx) * y) * sign;
    let t = (ax * by - ay * bx + (ay - by) * x + (bx - ax) * y) * sign;

    s >= 0.0 && t >= 0.0 && (s + t) <= 2.0 * area * sign
}

/// Whether the rectangle and the triangle overlap at all.
pub fn rect_intersects_triangle(rect: &Rect, triangle: &Triangle) -> bool {
    if triangle.iter().any(|vertex| point_in_rect(rect, *vertex)) {
        return true;
    }

    if rect
        .corners()
        .iter()
        .any(|corner| point_in_triangle(triangle, *corner))
    {
        return true;
    }

    let [a, b, c] = *triangle;
    let triangle_edges = [(a, b), (b, c), (c, a)];

    rect.edges().iter().any(|(p, q)| {
        triangle_edges
            .iter()
            .any(|(r, s)| segments_intersect(*p, *q, *r, *s))
    })
}
