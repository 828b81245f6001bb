// Copyright 2024 the svg-raster authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::Point;

/// Three vertices produced by [`crate::triangulate`].
///
/// # Guarantees
///
/// After construction via [`Triangle::new`], `a.y <= b.y <= c.y`.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Triangle {
    pub a: Point,
    pub b: Point,
    pub c: Point,
}

impl Triangle {
    /// Builds a triangle, sorting its vertices by `y` ascending.
    pub fn new(a: Point, b: Point, c: Point) -> Self {
        let mut verts = [a, b, c];
        verts.sort_by(|p, q| p.y.partial_cmp(&q.y).unwrap_or(std::cmp::Ordering::Equal));
        Triangle { a: verts[0], b: verts[1], c: verts[2] }
    }

    /// Axis-aligned bounding box as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        let min_x = self.a.x.min(self.b.x).min(self.c.x);
        let max_x = self.a.x.max(self.b.x).max(self.c.x);
        let min_y = self.a.y.min(self.b.y).min(self.c.y);
        let max_y = self.a.y.max(self.b.y).max(self.c.y);
        (min_x, min_y, max_x, max_y)
    }
}
