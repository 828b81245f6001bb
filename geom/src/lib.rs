// Copyright 2024 the svg-raster authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Geometry primitives shared by `svg-raster`: points, the 3x3 affine
//! [`Transform`], triangles, and ear-clipping [`triangulate`].
//!
//! This crate knows nothing about pixels, color, or sample rates -- it is
//! pure 2D math, kept separate so it can be unit tested in isolation from
//! the rasterizer.

mod point;
mod transform;
mod triangle;
mod triangulate;

pub use point::Point;
pub use transform::Transform;
pub use triangle::Triangle;
pub use triangulate::triangulate;
