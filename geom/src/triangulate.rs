// Copyright 2024 the svg-raster authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::{Point, Triangle};

/// Ear-clipping epsilon: a vertex is convex only if the cross product of its
/// adjacent edges exceeds this.
const EPSILON: f32 = 1e-10;

/// Triangulates a simple polygon by ear clipping.
///
/// `points` is a flat `[x0, y0, x1, y1, ...]` sequence, at least 3 vertices
/// (6 floats). Returns an empty list for fewer than 3 vertices.
///
/// The polygon is first normalized to counter-clockwise winding (by signed
/// area); if the input turns out to be self-intersecting or otherwise
/// non-simple, an internal error-detection counter stops the algorithm
/// early and whatever triangles were already clipped are returned -- a
/// best-effort result, not a failure.
pub fn triangulate(points: &[f32]) -> Vec<Triangle> {
    let n = points.len() / 2;
    if n < 3 || points.len() % 2 != 0 {
        return Vec::new();
    }

    let contour: Vec<Point> = points
        .chunks_exact(2)
        .map(|xy| Point::from_xy(xy[0], xy[1]))
        .collect();

    // Work in counter-clockwise order so the convexity test below has a
    // consistent sign.
    let mut v: Vec<usize> = if signed_area(&contour) > 0.0 {
        (0..n).collect()
    } else {
        (0..n).rev().collect()
    };

    let mut triangles = Vec::new();
    let mut nv = n;
    let mut count = 2 * nv;
    // A single rolling index: each pass derives (u, v, w) from it and then
    // advances it to `v`, regardless of whether an ear was clipped this
    // pass. Advancing unconditionally (not just on success) is what keeps
    // the traversal moving around the remaining contour without skipping
    // vertices.
    let mut roll = nv - 1;

    while nv > 2 {
        if count == 0 {
            // Likely a non-simple polygon; return what we have so far.
            return triangles;
        }
        count -= 1;

        let u = if roll >= nv { 0 } else { roll };
        let vi = if u + 1 >= nv { 0 } else { u + 1 };
        let w = if vi + 1 >= nv { 0 } else { vi + 1 };

        if is_ear(&contour, &v, u, vi, w, nv) {
            let (a, b, c) = (v[u], v[vi], v[w]);
            triangles.push(Triangle::new(contour[a], contour[b], contour[c]));

            v.remove(vi);
            nv -= 1;
            count = 2 * nv;
        }

        roll = vi;
    }

    triangles
}

fn signed_area(contour: &[Point]) -> f32 {
    let n = contour.len();
    let mut area = 0.0;
    let mut p = n - 1;
    for q in 0..n {
        area += contour[p].x * contour[q].y - contour[q].x * contour[p].y;
        p = q;
    }
    area * 0.5
}

/// Is `(u, v, w)` (indices into `indices`, indexing `contour`) a clippable
/// ear: convex at `v`, and containing no other remaining vertex?
fn is_ear(contour: &[Point], indices: &[usize], u: usize, v: usize, w: usize, nv: usize) -> bool {
    let a = contour[indices[u]];
    let b = contour[indices[v]];
    let c = contour[indices[w]];

    if EPSILON > cross(a, b, c) {
        return false;
    }

    for p in 0..nv {
        if p == u || p == v || p == w {
            continue;
        }
        if point_in_triangle(a, b, c, contour[indices[p]]) {
            return false;
        }
    }

    true
}

fn cross(a: Point, b: Point, c: Point) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn point_in_triangle(a: Point, b: Point, c: Point, p: Point) -> bool {
    let ax = c.x - b.x;
    let ay = c.y - b.y;
    let bx = a.x - c.x;
    let by = a.y - c.y;
    let cx = b.x - a.x;
    let cy = b.y - a.y;

    let apx = p.x - a.x;
    let apy = p.y - a.y;
    let bpx = p.x - b.x;
    let bpy = p.y - b.y;
    let cpx = p.x - c.x;
    let cpy = p.y - c.y;

    let a_cross_bp = ax * bpy - ay * bpx;
    let c_cross_ap = cx * apy - cy * apx;
    let b_cross_cp = bx * cpy - by * cpx;

    a_cross_bp >= 0.0 && b_cross_cp >= 0.0 && c_cross_ap >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area_of(t: &Triangle) -> f32 {
        ((t.b.x - t.a.x) * (t.c.y - t.a.y) - (t.c.x - t.a.x) * (t.b.y - t.a.y)).abs() / 2.0
    }

    #[test]
    fn too_few_vertices_yields_empty() {
        assert!(triangulate(&[0.0, 0.0, 1.0, 0.0]).is_empty());
    }

    #[test]
    fn triangle_input_yields_one_triangle() {
        let tris = triangulate(&[0.0, 0.0, 10.0, 0.0, 0.0, 10.0]);
        assert_eq!(tris.len(), 1);
    }

    #[test]
    fn square_covers_full_area() {
        // CCW unit square (y grows downward or upward, either way CCW by
        // signed area with this vertex order).
        let tris = triangulate(&[0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0]);
        assert_eq!(tris.len(), 2);
        let total: f32 = tris.iter().map(area_of).sum();
        assert!((total - 100.0).abs() < 1e-3);
    }

    #[test]
    fn clockwise_square_is_normalized() {
        let tris = triangulate(&[0.0, 0.0, 0.0, 10.0, 10.0, 10.0, 10.0, 0.0]);
        assert_eq!(tris.len(), 2);
        let total: f32 = tris.iter().map(area_of).sum();
        assert!((total - 100.0).abs() < 1e-3);
    }

    #[test]
    fn every_triangle_is_y_sorted() {
        let tris = triangulate(&[0.0, 5.0, 10.0, 0.0, 20.0, 8.0, 10.0, 15.0]);
        for t in tris {
            assert!(t.a.y <= t.b.y && t.b.y <= t.c.y);
        }
    }

    #[test]
    fn concave_polygon_triangulates() {
        // A simple concave "arrow" shape (non-convex at one vertex).
        let pts = [0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 5.0, 5.0, 0.0, 10.0];
        let tris = triangulate(&pts);
        assert_eq!(tris.len(), 3);
    }
}
