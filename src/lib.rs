// Copyright 2024 the svg-raster authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! `svg-raster` parses a constrained SVG subset and rasterizes it to an
//! RGBA8 pixel buffer entirely in software.
//!
//! The pipeline: a [`scene::Document`] tree is walked by [`renderer::Renderer`],
//! accumulating [`svg_raster_geom::Transform`]s through nested groups; each
//! primitive is handed to the matching rasterizer ([`fill`], [`line`],
//! [`image`]), which writes into a per-render [`framebuffer::FrameBuffer`];
//! the frame buffer resolves its supersampled and deferred draw paths into
//! a final [`renderer::Frame`] ready to hand to an external display.
//!
//! Out of scope: XML parsing, network/file retrieval, PNG *decoding*, and
//! any interactive UI.

#![warn(missing_debug_implementations)]

mod color;
mod error;
mod fill;
mod framebuffer;
mod image;
mod line;
mod mipmap;
mod parse;
mod renderer;
mod scene;

pub use color::Color;
pub use error::Error;
pub use framebuffer::FrameBuffer;
pub use image::Sampling;
pub use mipmap::MipPyramid;
pub use renderer::{Frame, Renderer, RendererConfig};
pub use scene::{
    CircleNode, Document, Group, ImageNode, LineNode, Node, PolygonNode, PolylineNode, RectNode,
};

pub use svg_raster_geom::{Point, Transform, Triangle};
