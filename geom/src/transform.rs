// Copyright 2024 the svg-raster authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::Point;

/// A 2D affine transformation matrix.
///
/// Stored in the same convention SVG's `matrix(a, b, c, d, e, f)` uses:
///
/// ```text
/// | a  c  e |   | x |
/// | b  d  f | * | y |
/// | 0  0  1 |   | 1 |
/// ```
///
/// The bottom row is implicit and always `(0, 0, 1)` -- this type can only
/// ever represent an affine map, never a projective one.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Transform {
    #[inline]
    fn default() -> Self {
        Transform::identity()
    }
}

impl Transform {
    /// The identity transform.
    #[inline]
    pub const fn identity() -> Self {
        Transform { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 }
    }

    /// Builds a transform from the six `matrix(a, b, c, d, e, f)` components.
    #[inline]
    pub const fn from_matrix(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Transform { a, b, c, d, e, f }
    }

    /// Builds a pure translation.
    #[inline]
    pub const fn from_translate(tx: f32, ty: f32) -> Self {
        Transform { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: tx, f: ty }
    }

    /// Builds a pure scale.
    #[inline]
    pub const fn from_scale(sx: f32, sy: f32) -> Self {
        Transform { a: sx, b: 0.0, c: 0.0, d: sy, e: 0.0, f: 0.0 }
    }

    /// Returns `true` if this is the identity transform.
    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Transform::identity()
    }

    /// Composes `self` (the parent's accumulated matrix) with `local` (a
    /// child's own matrix), producing `M_parent * M_local`.
    ///
    /// Points are later mapped as `self.then(&local).apply(p)`, which must
    /// equal `self.apply(local.apply(p))` -- the child's matrix is applied
    /// to the point first, then the parent's.
    #[inline]
    pub fn then(&self, local: &Transform) -> Transform {
        Transform {
            a: self.a * local.a + self.c * local.b,
            b: self.b * local.a + self.d * local.b,
            c: self.a * local.c + self.c * local.d,
            d: self.b * local.c + self.d * local.d,
            e: self.a * local.e + self.c * local.f + self.e,
            f: self.b * local.e + self.d * local.f + self.f,
        }
    }

    /// Maps a single point.
    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        Point::from_xy(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// Maps a slice of points into a freshly allocated vector. Never mutates
    /// `points` in place.
    pub fn apply_points(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|&p| self.apply(p)).collect()
    }

    /// Parses one of the recognized transform strings:
    /// `matrix(a,b,c,d,e,f)`, `translate(tx ty)`, `scale(sx sy)`.
    ///
    /// Tolerant of surrounding whitespace and a missing trailing `)`.
    /// Any string that doesn't match one of these forms -- including an
    /// empty string -- yields the identity transform; this never fails.
    pub fn parse(s: &str) -> Transform {
        let s = s.trim();
        if let Some(rest) = s.strip_prefix("matrix(") {
            let nums = parse_numbers(rest);
            if let [a, b, c, d, e, f] = nums[..] {
                return Transform::from_matrix(a, b, c, d, e, f);
            }
        } else if let Some(rest) = s.strip_prefix("translate(") {
            let nums = parse_numbers(rest);
            match nums[..] {
                [tx, ty] => return Transform::from_translate(tx, ty),
                [tx] => return Transform::from_translate(tx, 0.0),
                _ => {}
            }
        } else if let Some(rest) = s.strip_prefix("scale(") {
            let nums = parse_numbers(rest);
            match nums[..] {
                [sx, sy] => return Transform::from_scale(sx, sy),
                [sx] => return Transform::from_scale(sx, sx),
                _ => {}
            }
        }
        Transform::identity()
    }
}

/// Splits the argument list of a `name(...)` transform function into floats,
/// tolerant of a trailing `)`, and separated by commas, spaces, or both.
fn parse_numbers(rest: &str) -> Vec<f32> {
    let rest = rest.trim_end().trim_end_matches(')');
    rest.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tok| !tok.is_empty())
        .filter_map(|tok| tok.parse::<f32>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_default() {
        assert_eq!(Transform::default(), Transform::identity());
    }

    #[test]
    fn translate_composition() {
        let outer = Transform::from_translate(1.0, 2.0);
        let inner = Transform::from_translate(3.0, 4.0);
        let composed = outer.then(&inner);
        assert_eq!(composed, Transform::from_translate(4.0, 6.0));
    }

    #[test]
    fn scale_composition() {
        let outer = Transform::from_scale(2.0, 3.0);
        let inner = Transform::from_scale(5.0, 7.0);
        let composed = outer.then(&inner);
        assert_eq!(composed, Transform::from_scale(10.0, 21.0));
    }

    #[test]
    fn apply_matches_manual_composition() {
        let outer = Transform::from_translate(10.0, 10.0);
        let inner = Transform::from_scale(2.0, 2.0);
        let composed = outer.then(&inner);
        let p = Point::from_xy(3.0, 4.0);
        assert_eq!(composed.apply(p), outer.apply(inner.apply(p)));
    }

    #[test]
    fn parse_matrix() {
        let t = Transform::parse("matrix(1,0,0,1,5,6)");
        assert_eq!(t, Transform::from_translate(5.0, 6.0));
    }

    #[test]
    fn parse_translate_whitespace() {
        let t = Transform::parse(" translate( 3   4 )");
        assert_eq!(t, Transform::from_translate(3.0, 4.0));
    }

    #[test]
    fn parse_unknown_is_identity() {
        assert_eq!(Transform::parse("rotate(45)"), Transform::identity());
        assert_eq!(Transform::parse(""), Transform::identity());
    }

    #[test]
    fn apply_points_does_not_mutate_input() {
        let points = vec![Point::from_xy(1.0, 1.0), Point::from_xy(2.0, 2.0)];
        let original = points.clone();
        let _ = Transform::from_scale(2.0, 2.0).apply_points(&points);
        assert_eq!(points, original);
    }
}
