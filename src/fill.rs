// Copyright 2024 the svg-raster authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::framebuffer::FrameBuffer;
use crate::Color;
use svg_raster_geom::Triangle;

/// Fills a triangle (already in supersampled device coordinates) using
/// bounding-box barycentric coverage: for every integer
/// sample point in the triangle's axis-aligned bounding box, solve for the
/// barycentric weights `s`, `t` relative to vertex `a` and cover the point
/// iff `s >= 0 && t >= 0 && s + t <= 1`.
pub fn fill_triangle(fb: &mut FrameBuffer, tri: &Triangle, color: Color) {
    let (min_x, min_y, max_x, max_y) = tri.bounds();

    let v0x = tri.c.x - tri.a.x;
    let v0y = tri.c.y - tri.a.y;
    let v1x = tri.b.x - tri.a.x;
    let v1y = tri.b.y - tri.a.y;
    let denom = v1x * v0y - v1y * v0x;
    if denom == 0.0 {
        return;
    }

    let x0 = min_x.floor() as i64;
    let x1 = max_x.ceil() as i64;
    let y0 = min_y.floor() as i64;
    let y1 = max_y.ceil() as i64;

    for y in y0..=y1 {
        for x in x0..=x1 {
            let v2x = x as f32 - tri.a.x;
            let v2y = y as f32 - tri.a.y;

            let s = (v2x * v0y - v2y * v0x) / denom;
            let t = (v1x * v2y - v1y * v2x) / denom;

            if s >= 0.0 && t >= 0.0 && s + t <= 1.0 {
                fb.draw_point(x as f32, y as f32, color);
            }
        }
    }
}

/// Fills a rectangle whose local corner is `(x, y)` and whose size is
/// `width x height`.
///
/// `map_point` places an interior sample (still in local/object space)
/// into supersampled device space for the anti-aliased `draw_point` path;
/// `map_pixel` places a border sample into final device space for the
/// deferred `draw_pixel` path. Both closures let this module stay ignorant
/// of transforms and sample rates.
///
/// If either dimension is zero the rectangle degenerates to a single
/// `draw_pixel` at `(x, y)` in the *fill* color.
pub fn fill_rect(
    fb: &mut FrameBuffer,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    fill: Color,
    stroke: Color,
    map_point: impl Fn(f32, f32) -> (f32, f32),
    map_pixel: impl Fn(f32, f32) -> (f32, f32),
) {
    if width <= 0.0 || height <= 0.0 {
        let (dx, dy) = map_pixel(x, y);
        fb.draw_pixel(dx, dy, fill);
        return;
    }

    let w = width.round().max(0.0) as i64;
    let h = height.round().max(0.0) as i64;

    for iy in 0..h {
        for ix in 0..w {
            let lx = x + ix as f32;
            let ly = y + iy as f32;
            let (dx, dy) = map_point(lx, ly);
            fb.draw_point(dx, dy, fill);
        }
    }

    for ix in 0..w {
        let (dx, dy) = map_pixel(x + ix as f32, y);
        fb.draw_pixel(dx, dy, stroke);
        let (dx, dy) = map_pixel(x + ix as f32, y + (h - 1) as f32);
        fb.draw_pixel(dx, dy, stroke);
    }
    for iy in 0..h {
        let (dx, dy) = map_pixel(x, y + iy as f32);
        fb.draw_pixel(dx, dy, stroke);
        let (dx, dy) = map_pixel(x + (w - 1) as f32, y + iy as f32);
        fb.draw_pixel(dx, dy, stroke);
    }
}

/// Fills a circle of radius `r` centered at `(cx, cy)` (local coordinates):
/// iterate the axis-aligned bounding box and cover the sample iff
/// `(x - cx)^2 + (y - cy)^2 <= r^2`.
pub fn fill_circle(
    fb: &mut FrameBuffer,
    cx: f32,
    cy: f32,
    r: f32,
    color: Color,
    map_point: impl Fn(f32, f32) -> (f32, f32),
) {
    if r <= 0.0 {
        return;
    }
    let x0 = (cx - r).floor() as i64;
    let x1 = (cx + r).ceil() as i64;
    let y0 = (cy - r).floor() as i64;
    let y1 = (cy + r).ceil() as i64;
    let r2 = r * r;

    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            if dx * dx + dy * dy <= r2 {
                let (mx, my) = map_point(x as f32, y as f32);
                fb.draw_point(mx, my, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svg_raster_geom::Point;

    #[test]
    fn axis_aligned_triangle_fills_correct_half() {
        let mut fb = FrameBuffer::new(10, 10, 1);
        let tri = Triangle::new(
            Point::from_xy(0.0, 0.0),
            Point::from_xy(10.0, 0.0),
            Point::from_xy(0.0, 10.0),
        );
        fill_triangle(&mut fb, &tri, Color::from_rgba(0.0, 1.0, 0.0, 1.0));
        let out = fb.resolve();
        for y in 0..10 {
            for x in 0..10 {
                let idx = (y * 10 + x) * 4;
                let covered = x + y < 10;
                if covered {
                    assert_eq!(&out[idx..idx + 4], &[0, 255, 0, 255], "({x},{y})");
                }
            }
        }
    }

    #[test]
    fn degenerate_rect_draws_single_pixel_in_fill_color() {
        let mut fb = FrameBuffer::new(10, 10, 1);
        fill_rect(
            &mut fb,
            5.0,
            5.0,
            0.0,
            0.0,
            Color::from_rgba(1.0, 0.0, 0.0, 1.0),
            Color::BLACK,
            |x, y| (x, y),
            |x, y| (x, y),
        );
        let out = fb.resolve();
        let idx = (5 * 10 + 5) * 4;
        assert_eq!(&out[idx..idx + 4], &[255, 0, 0, 255]);
    }

    #[test]
    fn rect_interior_and_border_colors_differ() {
        let mut fb = FrameBuffer::new(10, 10, 1);
        fill_rect(
            &mut fb,
            2.0,
            2.0,
            4.0,
            4.0,
            Color::from_rgba(0.0, 0.0, 1.0, 1.0),
            Color::BLACK,
            |x, y| (x, y),
            |x, y| (x, y),
        );
        let out = fb.resolve();
        let border = (2 * 10 + 2) * 4;
        assert_eq!(&out[border..border + 4], &[0, 0, 0, 255]);
        let interior = (3 * 10 + 3) * 4;
        assert_eq!(&out[interior..interior + 4], &[0, 0, 255, 255]);
    }

    #[test]
    fn circle_covers_center_not_corners() {
        let mut fb = FrameBuffer::new(10, 10, 1);
        fill_circle(&mut fb, 5.0, 5.0, 3.0, Color::BLACK, |x, y| (x, y));
        let out = fb.resolve();
        let center = (5 * 10 + 5) * 4;
        assert_eq!(&out[center..center + 4], &[0, 0, 0, 255]);
        let corner = (0 * 10) * 4;
        assert_eq!(&out[corner..corner + 4], &[255, 255, 255, 255]);
    }
}
