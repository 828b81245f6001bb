// Copyright 2024 the svg-raster authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

/// A 2D point with `f32` coordinates.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Creates a new point.
    #[inline]
    pub const fn from_xy(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

impl From<(f32, f32)> for Point {
    #[inline]
    fn from(v: (f32, f32)) -> Self {
        Point::from_xy(v.0, v.1)
    }
}

impl From<Point> for (f32, f32) {
    #[inline]
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}
