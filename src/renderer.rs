// Copyright 2024 the svg-raster authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::framebuffer::FrameBuffer;
use crate::scene::{walk_group, Document};
use crate::Error;
use svg_raster_geom::Transform;

/// Static configuration for a single render: how many sub-samples per
/// output pixel, and the output pixel dimensions and logical (SVG user
/// unit) dimensions the scene is mapped onto.
///
/// `width`/`height` duplicate what a [`Document`] already carries; a
/// renderer is configured once and may render several documents sharing the
/// same output size, so they're tracked here rather than re-derived from
/// the document on every call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RendererConfig {
    pub sample_rate: u32,
    pub width_px: u32,
    pub height_px: u32,
    pub width: f32,
    pub height: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        RendererConfig { sample_rate: 2, width_px: 0, height_px: 0, width: 0.0, height: 0.0 }
    }
}

impl RendererConfig {
    /// Derives a config from a document's own dimensions: pixel size comes
    /// from [`Document::suggested_pixel_size`], logical size from
    /// `width`/`height`. The sample rate defaults to 2x.
    pub fn for_document(doc: &Document) -> Self {
        let (width_px, height_px) = doc.suggested_pixel_size();
        RendererConfig { sample_rate: 2, width_px, height_px, width: doc.width, height: doc.height }
    }
}

/// A fully rasterized, resolved render: a `width x height` RGBA8 buffer in
/// row-major order, top-left origin.
#[derive(Clone, Debug)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    /// Output width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Output height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The `[r, g, b, a]` bytes at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2], self.data[idx + 3]]
    }

    /// The whole buffer, row-major RGBA8.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Encodes the frame as a PNG and writes it to `path`. A debugging
    /// convenience; this crate never decodes PNGs, only (optionally)
    /// encodes them.
    #[cfg(feature = "png-format")]
    pub fn save_png(&self, path: impl AsRef<std::path::Path>) -> Result<(), Error> {
        let file = std::fs::File::create(path)
            .map_err(|e| Error::BadImage(format!("could not create output file: {}", e)))?;
        let writer = std::io::BufWriter::new(file);
        let mut encoder = png::Encoder::new(writer, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| Error::BadImage(format!("could not write PNG header: {}", e)))?;
        writer
            .write_image_data(&self.data)
            .map_err(|e| Error::BadImage(format!("could not write PNG data: {}", e)))
    }
}

/// Renders [`Document`]s against a fixed [`RendererConfig`].
#[derive(Debug)]
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Renderer { config }
    }

    /// Rasterizes `doc` into a [`Frame`].
    ///
    /// The root transform is the composition of two pieces:
    /// 1. the `viewBox` content transform, scaling logical SVG units into
    ///    output pixels and translating by `(-minX, -minY)`;
    /// 2. a vertical flip, since the supersampled buffer is addressed with
    ///    row 0 at the top but intermediate arithmetic treats y as
    ///    increasing upward.
    ///
    /// Every primitive in the scene is walked under this root transform,
    /// composed with whatever transforms its ancestor groups and its own
    /// `transform` attribute add.
    pub fn render(&self, doc: &Document) -> Result<Frame, Error> {
        log::debug!(
            "rendering {}x{} document at {}x{}px, {}x supersampling",
            doc.width,
            doc.height,
            self.config.width_px,
            self.config.height_px,
            self.config.sample_rate
        );

        let mut fb = FrameBuffer::new(self.config.width_px, self.config.height_px, self.config.sample_rate);
        let content = content_transform(doc, &self.config);
        let flip = Transform::from_matrix(1.0, 0.0, 0.0, -1.0, 0.0, (self.config.height_px as f32 - 1.0).max(0.0));
        let root = flip.then(&content);

        walk_group(&doc.root, &root, self.config.sample_rate, &mut fb);

        Ok(Frame { width: self.config.width_px, height: self.config.height_px, data: fb.resolve() })
    }
}

/// Maps logical SVG coordinates into un-flipped output-pixel coordinates:
/// scales the `viewBox` extent to the output pixel size and translates its
/// origin to `(0, 0)`. Identity if the document has no `viewBox`.
fn content_transform(doc: &Document, config: &RendererConfig) -> Transform {
    match doc.view_box {
        Some((min_x, min_y, vb_w, vb_h)) if vb_w > 0.0 && vb_h > 0.0 => {
            let sx = config.width_px as f32 / vb_w;
            let sy = config.height_px as f32 / vb_h;
            Transform::from_scale(sx, sy).then(&Transform::from_translate(-min_x, -min_y))
        }
        _ => Transform::identity(),
    }
}
