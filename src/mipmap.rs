// Copyright 2024 the svg-raster authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::Color;

/// One level of a [`MipPyramid`]: a decoded RGBA8 buffer and its dimensions.
#[derive(Clone, Debug)]
struct MipLevel {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl MipLevel {
    #[inline]
    fn at(&self, x: u32, y: u32) -> Color {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        Color::from_rgba8(
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }
}

/// A power-of-two mip chain built once from a decoded source bitmap and
/// cached for the owning `Image` node's lifetime.
///
/// Level 0 is a direct copy of the source. Each subsequent level is a 2x2
/// box downsample of the previous one; construction stops once either
/// dimension of the *next* level would drop below 2.
#[derive(Clone, Debug)]
pub struct MipPyramid {
    levels: Vec<MipLevel>,
}

impl MipPyramid {
    /// Builds the pyramid from a decoded `width x height` RGBA8 buffer.
    ///
    /// `data.len()` must be `width * height * 4`; mismatched buffers are
    /// truncated/zero-padded defensively rather than panicking, since a
    /// malformed embedded image is a non-fatal `BadImage` at the call site,
    /// not a core invariant violation.
    pub fn build(width: u32, height: u32, data: Vec<u8>) -> Self {
        let expected = width as usize * height as usize * 4;
        let mut data = data;
        data.resize(expected, 0);

        let mut levels = vec![MipLevel { width, height, data }];

        loop {
            let prev = levels.last().unwrap();
            let next_w = prev.width / 2;
            let next_h = prev.height / 2;
            if next_w < 2 || next_h < 2 {
                break;
            }
            let next_data = down_sample_buffer(&prev.data, prev.width, prev.height);
            levels.push(MipLevel { width: next_w, height: next_h, data: next_data });
        }

        MipPyramid { levels }
    }

    /// Number of levels in the chain.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Level 0's dimensions, the full-resolution source size.
    pub fn base_size(&self) -> (u32, u32) {
        (self.levels[0].width, self.levels[0].height)
    }

    fn level_size(&self, level: usize) -> (u32, u32) {
        let lvl = &self.levels[level];
        (lvl.width, lvl.height)
    }

    /// Nearest-neighbor sample, clamping `(x, y)` to the level's bounds
    /// before indexing.
    pub fn sample_nearest(&self, level: usize, x: f32, y: f32) -> Color {
        let (w, h) = self.level_size(level);
        let cx = x.clamp(0.0, (w - 1) as f32);
        let cy = y.clamp(0.0, (h - 1) as f32);
        self.levels[level].at(cx.floor() as u32, cy.floor() as u32)
    }

    /// Bilinear sample, clamping `(x, y)` to the level's bounds first.
    ///
    /// Uses a textbook four-tap lerp with clamped edge taps; bit-identical
    /// to a nearest sample at integer pixel centers.
    pub fn sample_bilinear(&self, level: usize, x: f32, y: f32) -> Color {
        let (w, h) = self.level_size(level);
        let max_x = (w - 1) as f32;
        let max_y = (h - 1) as f32;
        let cx = x.clamp(0.0, max_x);
        let cy = y.clamp(0.0, max_y);

        let x0 = cx.floor();
        let y0 = cy.floor();
        let x1 = (x0 + 1.0).min(max_x);
        let y1 = (y0 + 1.0).min(max_y);
        let tx = cx - x0;
        let ty = cy - y0;

        let lvl = &self.levels[level];
        let c00 = lvl.at(x0 as u32, y0 as u32);
        let c10 = lvl.at(x1 as u32, y0 as u32);
        let c01 = lvl.at(x0 as u32, y1 as u32);
        let c11 = lvl.at(x1 as u32, y1 as u32);

        let top = lerp_color(c00, c10, tx);
        let bottom = lerp_color(c01, c11, tx);
        lerp_color(top, bottom, ty)
    }
}

fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    Color::from_rgba(
        blend_channel(a.r, b.r, t),
        blend_channel(a.g, b.g, t),
        blend_channel(a.b, b.b, t),
        blend_channel(a.a, b.a, t),
    )
}

/// `blend(a, b, t) = a*(1-t) + b*t`, with `t` read as the distance from
/// `a` -- matches the `x0`/`x1` ordering above.
#[inline]
fn blend_channel(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Averages non-overlapping 2x2 blocks of `src` (summing each channel and
/// dividing by 4, an integer-lossy byte average), halving both dimensions.
fn down_sample_buffer(src: &[u8], w: u32, h: u32) -> Vec<u8> {
    let new_w = w / 2;
    let new_h = h / 2;
    let mut out = vec![0u8; new_w as usize * new_h as usize * 4];

    for y in 0..new_h {
        for x in 0..new_w {
            let mut sum = [0u32; 4];
            for dy in 0..2 {
                for dx in 0..2 {
                    let sx = x * 2 + dx;
                    let sy = y * 2 + dy;
                    let si = (sy as usize * w as usize + sx as usize) * 4;
                    for c in 0..4 {
                        sum[c] += src[si + c] as u32;
                    }
                }
            }
            let di = (y as usize * new_w as usize + x as usize) * 4;
            for c in 0..4 {
                out[di + c] = (sum[c] / 4) as u8;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..(width * height) {
            data.extend_from_slice(&rgba);
        }
        data
    }

    #[test]
    fn power_of_two_chain_has_n_levels() {
        // 8x8 = 2^3 -> 3 levels (8x8, 4x4, 2x2).
        let pyramid = MipPyramid::build(8, 8, solid(8, 8, [10, 20, 30, 255]));
        assert_eq!(pyramid.level_count(), 3);
        assert_eq!(pyramid.level_size(0), (8, 8));
        assert_eq!(pyramid.level_size(1), (4, 4));
        assert_eq!(pyramid.level_size(2), (2, 2));
    }

    #[test]
    fn sixteen_by_sixteen_has_four_levels() {
        let pyramid = MipPyramid::build(16, 16, solid(16, 16, [1, 2, 3, 255]));
        assert_eq!(pyramid.level_count(), 4);
    }

    #[test]
    fn downsample_averages_constant_color() {
        let pyramid = MipPyramid::build(4, 4, solid(4, 4, [100, 150, 200, 255]));
        let c = pyramid.sample_nearest(1, 0.0, 0.0);
        assert_eq!(c.to_rgba8(), [100, 150, 200, 255]);
    }

    #[test]
    fn bilinear_at_integer_centers_is_exact_for_constant_image() {
        let pyramid = MipPyramid::build(4, 4, solid(4, 4, [5, 6, 7, 255]));
        for y in 0..4 {
            for x in 0..4 {
                let c = pyramid.sample_bilinear(0, x as f32, y as f32);
                assert_eq!(c.to_rgba8(), [5, 6, 7, 255]);
            }
        }
    }

    #[test]
    fn sampling_clamps_out_of_range_coordinates() {
        let pyramid = MipPyramid::build(2, 2, solid(2, 2, [9, 9, 9, 255]));
        let c = pyramid.sample_nearest(0, 50.0, -50.0);
        assert_eq!(c.to_rgba8(), [9, 9, 9, 255]);
    }
}
