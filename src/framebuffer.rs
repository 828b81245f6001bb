// Copyright 2024 the svg-raster authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::color::blend;
use crate::Color;

/// Owns the two buffers a single render writes into, and resolves them into
/// a final RGBA8 image.
///
/// Fill primitives benefit from supersampling; thin lines, rectangle
/// borders, and images look worse through a box downsample, so they bypass
/// it via a deferred pixel list applied after the downsample instead. Both
/// paths use the same [`blend`] operator.
#[derive(Debug)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    sample_rate: u32,
    /// `(width * sample_rate) x (height * sample_rate)` RGBA8, opaque white.
    point_buf: Vec<u8>,
    /// `(linear pixel index in the final buffer, color)`, applied in order
    /// after the downsample.
    pixel_list: Vec<(usize, Color)>,
}

impl FrameBuffer {
    /// Allocates a new frame buffer for a `width x height` render at the
    /// given sample rate. `point_buf` starts opaque white.
    pub fn new(width: u32, height: u32, sample_rate: u32) -> Self {
        let sr = sample_rate.max(1);
        let super_w = width as usize * sr as usize;
        let super_h = height as usize * sr as usize;
        FrameBuffer {
            width,
            height,
            sample_rate: sr,
            point_buf: vec![0xFF; super_w * super_h * 4],
            pixel_list: Vec::new(),
        }
    }

    /// Logical (non-supersampled) width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Logical (non-supersampled) height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn super_width(&self) -> usize {
        self.width as usize * self.sample_rate as usize
    }

    fn super_height(&self) -> usize {
        self.height as usize * self.sample_rate as usize
    }

    /// Blends `color` into the supersampled buffer at `(x, y)`, already in
    /// supersampled coordinates. Out-of-bounds writes are silently dropped.
    pub fn draw_point(&mut self, x: f32, y: f32, color: Color) {
        let xi = x.floor();
        let yi = y.floor();
        if xi < 0.0 || yi < 0.0 {
            return;
        }
        let (xi, yi) = (xi as usize, yi as usize);
        let (w, h) = (self.super_width(), self.super_height());
        if xi >= w || yi >= h {
            return;
        }

        let idx = (yi * w + xi) * 4;
        let dst = [
            self.point_buf[idx],
            self.point_buf[idx + 1],
            self.point_buf[idx + 2],
            self.point_buf[idx + 3],
        ];
        let out = blend(color, dst);
        self.point_buf[idx..idx + 4].copy_from_slice(&out);
    }

    /// Appends `color` to the deferred pixel list at `(x, y)`, in final
    /// (non-supersampled) buffer coordinates. No blending happens here --
    /// it's deferred to [`FrameBuffer::resolve`]. Out-of-bounds writes are
    /// silently dropped.
    pub fn draw_pixel(&mut self, x: f32, y: f32, color: Color) {
        let xi = x.floor();
        let yi = y.floor();
        if xi < 0.0 || yi < 0.0 {
            return;
        }
        let (xi, yi) = (xi as usize, yi as usize);
        if xi >= self.width as usize || yi >= self.height as usize {
            return;
        }
        let idx = yi * self.width as usize + xi;
        self.pixel_list.push((idx, color));
    }

    /// Downsamples `point_buf` by `sample_rate`-factor box averaging, then
    /// applies the deferred pixel list in insertion order, producing the
    /// final buffer.
    pub fn resolve(self) -> Vec<u8> {
        let sr = self.sample_rate as usize;
        let w = self.width as usize;
        let h = self.height as usize;
        let super_w = self.super_width();

        let mut final_buf = vec![0u8; w * h * 4];
        for y in 0..h {
            for x in 0..w {
                let mut sum = [0u32; 4];
                for sy in 0..sr {
                    for sx in 0..sr {
                        let si = ((y * sr + sy) * super_w + (x * sr + sx)) * 4;
                        for c in 0..4 {
                            sum[c] += self.point_buf[si + c] as u32;
                        }
                    }
                }
                let n = (sr * sr) as u32;
                let di = (y * w + x) * 4;
                for c in 0..4 {
                    final_buf[di + c] = (sum[c] / n) as u8;
                }
            }
        }

        for (idx, color) in self.pixel_list {
            let di = idx * 4;
            let dst = [
                final_buf[di],
                final_buf[di + 1],
                final_buf[di + 2],
                final_buf[di + 3],
            ];
            let out = blend(color, dst);
            final_buf[di..di + 4].copy_from_slice(&out);
        }

        final_buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_opaque_white() {
        let fb = FrameBuffer::new(2, 2, 1);
        let out = fb.resolve();
        assert_eq!(out, vec![255; 2 * 2 * 4]);
    }

    #[test]
    fn draw_point_out_of_bounds_is_dropped() {
        let mut fb = FrameBuffer::new(2, 2, 1);
        fb.draw_point(-1.0, 0.0, Color::BLACK);
        fb.draw_point(5.0, 5.0, Color::BLACK);
        assert_eq!(fb.resolve(), vec![255; 2 * 2 * 4]);
    }

    #[test]
    fn draw_pixel_applies_after_downsample() {
        let mut fb = FrameBuffer::new(2, 2, 1);
        fb.draw_pixel(0.0, 0.0, Color::BLACK);
        let out = fb.resolve();
        assert_eq!(&out[0..4], &[0, 0, 0, 255]);
        assert_eq!(&out[4..8], &[255, 255, 255, 255]);
    }

    #[test]
    fn supersampled_constant_fill_matches_rate_one() {
        let mut a = FrameBuffer::new(4, 4, 1);
        let mut b = FrameBuffer::new(4, 4, 4);
        let red = Color::from_rgba(1.0, 0.0, 0.0, 1.0);
        for y in 0..4 {
            for x in 0..4 {
                a.draw_point(x as f32, y as f32, red);
            }
        }
        for y in 0..16 {
            for x in 0..16 {
                b.draw_point(x as f32, y as f32, red);
            }
        }
        assert_eq!(a.resolve(), b.resolve());
    }
}
