// Copyright 2024 the svg-raster authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::framebuffer::FrameBuffer;
use crate::mipmap::MipPyramid;
use svg_raster_geom::{Point, Transform};

/// Which mip-sampling function to use for an `Image` primitive.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Sampling {
    Nearest,
    Bilinear,
}

/// Rasterizes an `Image` primitive: maps every destination pixel in
/// `[dest_x, dest_x + dest_w) x [dest_y, dest_y + dest_h)` to a source
/// texel and writes the sampled color through the deferred pixel path.
///
/// `transform` maps the destination-pixel position (not the local/source
/// offset used for sampling) into device space; it is *not* pre-scaled by
/// the sample rate -- images bypass supersampling entirely, like lines and
/// rectangle borders.
///
/// Mip-level selection is fixed at level 0; per-pixel LOD selection isn't
/// implemented.
#[allow(clippy::too_many_arguments)]
pub fn draw_image(
    fb: &mut FrameBuffer,
    transform: &Transform,
    mip: &MipPyramid,
    dest_x: f32,
    dest_y: f32,
    dest_w: f32,
    dest_h: f32,
    sampling: Sampling,
) {
    if dest_w <= 0.0 || dest_h <= 0.0 {
        return;
    }

    let (mip_w, mip_h) = mip.base_size();
    let scale_u = mip_w as f32 / dest_w;
    let scale_v = mip_h as f32 / dest_h;

    let w = dest_w.round().max(0.0) as u32;
    let h = dest_h.round().max(0.0) as u32;

    for iy in 0..h {
        for ix in 0..w {
            let local_x = ix as f32 - 0.5;
            let local_y = iy as f32 - 0.5;
            let u = local_x * scale_u;
            let v = local_y * scale_v;

            let color = match sampling {
                Sampling::Nearest => mip.sample_nearest(0, u, v),
                Sampling::Bilinear => mip.sample_bilinear(0, u, v),
            };

            let device = transform.apply(Point::from_xy(dest_x + ix as f32, dest_y + iy as f32));
            fb.draw_pixel(device.x, device.y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_pyramid(size: u32, rgba: [u8; 4]) -> MipPyramid {
        let mut data = Vec::new();
        for _ in 0..(size * size) {
            data.extend_from_slice(&rgba);
        }
        MipPyramid::build(size, size, data)
    }

    #[test]
    fn covers_destination_rect_with_source_color() {
        let mip = solid_pyramid(4, [1, 2, 3, 255]);
        let mut fb = FrameBuffer::new(10, 10, 1);
        draw_image(&mut fb, &Transform::identity(), &mip, 2.0, 2.0, 4.0, 4.0, Sampling::Nearest);
        let out = fb.resolve();
        let idx = (3 * 10 + 3) * 4;
        assert_eq!(&out[idx..idx + 4], &[1, 2, 3, 255]);
    }

    #[test]
    fn zero_area_destination_draws_nothing() {
        let mip = solid_pyramid(2, [9, 9, 9, 255]);
        let mut fb = FrameBuffer::new(4, 4, 1);
        draw_image(&mut fb, &Transform::identity(), &mip, 0.0, 0.0, 0.0, 4.0, Sampling::Nearest);
        assert_eq!(fb.resolve(), vec![255; 4 * 4 * 4]);
    }

    #[test]
    fn respects_accumulated_transform() {
        let mip = solid_pyramid(2, [7, 7, 7, 255]);
        let mut fb = FrameBuffer::new(10, 10, 1);
        let t = Transform::from_translate(5.0, 0.0);
        draw_image(&mut fb, &t, &mip, 0.0, 0.0, 2.0, 2.0, Sampling::Nearest);
        let out = fb.resolve();
        let idx = (0 * 10 + 5) * 4;
        assert_eq!(&out[idx..idx + 4], &[7, 7, 7, 255]);
    }
}
