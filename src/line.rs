// Copyright 2024 the svg-raster authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::framebuffer::FrameBuffer;
use crate::Color;

/// Draws a line from `(x0, y0)` to `(x1, y1)` using a single-pass variant of
/// Xiaolin Wu's algorithm: it tracks the same fractional-intercept gradient
/// the classic algorithm does, but emits one pixel per main-axis step
/// instead of the two coverage-weighted pixels the textbook algorithm
/// blends -- the doubled-strand look is worse at the low resolutions this
/// rasterizer targets.
///
/// Writes go through [`FrameBuffer::draw_pixel`] (the deferred, un-
/// supersampled path); out-of-bounds writes are dropped there.
pub fn draw_line(fb: &mut FrameBuffer, x0: f32, y0: f32, x1: f32, y1: f32, color: Color) {
    let mut x0 = x0;
    let mut y0 = y0;
    let mut x1 = x1;
    let mut y1 = y1;

    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let dy = y1 - y0;
    let gradient = if dx == 0.0 { 1.0 } else { dy / dx };

    let plot = |fb: &mut FrameBuffer, x: f32, y: f32| {
        if steep {
            fb.draw_pixel(y, x, color);
        } else {
            fb.draw_pixel(x, y, color);
        }
    };

    plot(fb, x0, y0.floor());
    plot(fb, x1, y1.floor());

    let x_start = x0.floor() as i64 + 1;
    let x_end = x1.floor() as i64;
    let mut intery = y0 + gradient * (x_start as f32 - x0);

    let mut x = x_start;
    while x < x_end {
        plot(fb, x as f32, intery.floor());
        intery += gradient;
        x += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_line_covers_every_column() {
        let mut fb = FrameBuffer::new(10, 10, 1);
        draw_line(&mut fb, 0.0, 5.0, 9.0, 5.0, Color::BLACK);
        let out = fb.resolve();
        for x in 0..10 {
            let idx = (5 * 10 + x) * 4;
            assert_eq!(&out[idx..idx + 4], &[0, 0, 0, 255], "column {x}");
        }
    }

    #[test]
    fn vertical_line_covers_every_row() {
        let mut fb = FrameBuffer::new(10, 10, 1);
        draw_line(&mut fb, 3.0, 0.0, 3.0, 9.0, Color::BLACK);
        let out = fb.resolve();
        for y in 0..10 {
            let idx = (y * 10 + 3) * 4;
            assert_eq!(&out[idx..idx + 4], &[0, 0, 0, 255], "row {y}");
        }
    }

    #[test]
    fn endpoints_are_independent_of_direction() {
        let mut a = FrameBuffer::new(10, 10, 1);
        draw_line(&mut a, 1.0, 1.0, 8.0, 4.0, Color::BLACK);
        let mut b = FrameBuffer::new(10, 10, 1);
        draw_line(&mut b, 8.0, 4.0, 1.0, 1.0, Color::BLACK);
        assert_eq!(a.resolve(), b.resolve());
    }

    #[test]
    fn line_stays_within_bounds() {
        let mut fb = FrameBuffer::new(4, 4, 1);
        draw_line(&mut fb, -5.0, -5.0, 20.0, 20.0, Color::BLACK);
        assert_eq!(fb.resolve().len(), 4 * 4 * 4);
    }
}
