// Copyright 2024 the svg-raster authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::fill;
use crate::framebuffer::FrameBuffer;
use crate::image::{self, Sampling};
use crate::line;
use crate::parse::{parse_f32, parse_length_px, parse_opacity, parse_points, parse_view_box};
use crate::{Color, Error};
use svg_raster_geom::{triangulate, Point, Transform};

/// The root of a parsed document.
///
/// XML parsing is out of scope for this crate; callers (or a thin adapter
/// the embedder provides) are expected to walk their own parsed DOM and
/// hand this constructor the raw attribute strings it expects.
#[derive(Debug)]
pub struct Document {
    pub width: f32,
    pub height: f32,
    pub view_box: Option<(f32, f32, f32, f32)>,
    pub root: Group,
}

impl Document {
    /// `width`/`height` may carry a trailing `px`. `view_box`, if present,
    /// is `"minX minY width height"` and determines the suggested pixel
    /// size; pass `None` to fall back to `width`/`height`.
    pub fn new(
        width: &str,
        height: &str,
        view_box: Option<&str>,
        root: Group,
    ) -> Result<Self, Error> {
        let view_box = view_box.map(parse_view_box).transpose()?;
        Ok(Document {
            width: parse_length_px("width", width)?,
            height: parse_length_px("height", height)?,
            view_box,
            root,
        })
    }

    /// The pixel dimensions this document suggests for a render: the
    /// `viewBox`'s width/height when present, else `width`/`height`.
    pub fn suggested_pixel_size(&self) -> (u32, u32) {
        match self.view_box {
            Some((_, _, w, h)) => (w.round().max(1.0) as u32, h.round().max(1.0) as u32),
            None => (self.width.round().max(1.0) as u32, self.height.round().max(1.0) as u32),
        }
    }
}

/// A group of child nodes sharing a local transform.
#[derive(Debug)]
pub struct Group {
    pub transform: Transform,
    pub children: Vec<Node>,
}

impl Group {
    pub fn new(transform: &str, children: Vec<Node>) -> Self {
        Group { transform: Transform::parse(transform), children }
    }

    /// Appends a successfully constructed image, or logs and drops it on
    /// `BadImage` so the rest of the render proceeds.
    pub fn push_image(&mut self, image: Result<ImageNode, Error>) {
        match image {
            Ok(node) => self.children.push(Node::Image(node)),
            Err(e) => log::warn!("skipping image node: {}", e),
        }
    }
}

/// One child of a [`Group`]: a primitive or a nested group. A closed tagged
/// variant, not an open hierarchy, since the SVG subset this crate
/// understands is closed.
#[derive(Debug)]
pub enum Node {
    Rect(RectNode),
    Line(LineNode),
    Polyline(PolylineNode),
    Polygon(PolygonNode),
    Circle(CircleNode),
    Image(ImageNode),
    Group(Group),
}

#[derive(Debug)]
pub struct RectNode {
    pub transform: Transform,
    pub fill: Color,
    pub stroke: Color,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectNode {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        transform: &str,
        x: &str,
        y: &str,
        width: &str,
        height: &str,
        fill: &str,
        fill_opacity: Option<&str>,
        stroke: &str,
        stroke_opacity: Option<&str>,
    ) -> Result<Self, Error> {
        Ok(RectNode {
            transform: Transform::parse(transform),
            fill: Color::parse_hex(fill).with_alpha(parse_opacity(fill_opacity)),
            stroke: Color::parse_hex(stroke).with_alpha(parse_opacity(stroke_opacity)),
            x: parse_f32("x", x)?,
            y: parse_f32("y", y)?,
            width: parse_f32("width", width)?,
            height: parse_f32("height", height)?,
        })
    }
}

#[derive(Debug)]
pub struct LineNode {
    pub transform: Transform,
    pub stroke: Color,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl LineNode {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        transform: &str,
        x1: &str,
        y1: &str,
        x2: &str,
        y2: &str,
        stroke: &str,
    ) -> Result<Self, Error> {
        Ok(LineNode {
            transform: Transform::parse(transform),
            stroke: Color::parse_hex(stroke),
            x1: parse_f32("x1", x1)?,
            y1: parse_f32("y1", y1)?,
            x2: parse_f32("x2", x2)?,
            y2: parse_f32("y2", y2)?,
        })
    }
}

#[derive(Debug)]
pub struct PolylineNode {
    pub transform: Transform,
    pub stroke: Color,
    pub points: Vec<f32>,
}

impl PolylineNode {
    pub fn new(transform: &str, points: &str, stroke: &str) -> Result<Self, Error> {
        Ok(PolylineNode {
            transform: Transform::parse(transform),
            stroke: Color::parse_hex(stroke),
            points: parse_points(points)?,
        })
    }
}

#[derive(Debug)]
pub struct PolygonNode {
    pub transform: Transform,
    pub fill: Color,
    pub stroke: Option<Color>,
    pub points: Vec<f32>,
}

impl PolygonNode {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        transform: &str,
        points: &str,
        fill: &str,
        fill_opacity: Option<&str>,
        stroke: Option<&str>,
        stroke_opacity: Option<&str>,
    ) -> Result<Self, Error> {
        Ok(PolygonNode {
            transform: Transform::parse(transform),
            fill: Color::parse_hex(fill).with_alpha(parse_opacity(fill_opacity)),
            stroke: stroke.map(|s| Color::parse_hex(s).with_alpha(parse_opacity(stroke_opacity))),
            points: parse_points(points)?,
        })
    }
}

#[derive(Debug)]
pub struct CircleNode {
    pub transform: Transform,
    pub fill: Color,
    pub cx: f32,
    pub cy: f32,
    pub r: f32,
}

impl CircleNode {
    pub fn new(
        transform: &str,
        cx: &str,
        cy: &str,
        r: &str,
        fill: &str,
        fill_opacity: Option<&str>,
    ) -> Result<Self, Error> {
        Ok(CircleNode {
            transform: Transform::parse(transform),
            fill: Color::parse_hex(fill).with_alpha(parse_opacity(fill_opacity)),
            cx: parse_f32("cx", cx)?,
            cy: parse_f32("cy", cy)?,
            r: parse_f32("r", r)?,
        })
    }
}

#[derive(Debug)]
pub struct ImageNode {
    pub transform: Transform,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub sampling: Sampling,
    mip: crate::mipmap::MipPyramid,
}

impl ImageNode {
    /// `src_data` is an already-decoded `src_width x src_height` RGBA8
    /// buffer (decoding the source PNG is the caller's job). The mip
    /// pyramid is built here, on construction, and is immutable afterwards.
    ///
    /// Fails with [`Error::BadImage`] if the destination rectangle is
    /// zero-area or the source buffer doesn't match its stated dimensions.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        transform: &str,
        x: &str,
        y: &str,
        width: &str,
        height: &str,
        src_width: u32,
        src_height: u32,
        src_data: Vec<u8>,
        sampling: Sampling,
    ) -> Result<Self, Error> {
        let x = parse_f32("x", x)?;
        let y = parse_f32("y", y)?;
        let width = parse_f32("width", width)?;
        let height = parse_f32("height", height)?;

        if width <= 0.0 || height <= 0.0 {
            return Err(Error::BadImage(format!(
                "zero-area destination rect ({width}x{height})"
            )));
        }
        let expected_len = src_width as usize * src_height as usize * 4;
        if src_data.len() != expected_len {
            return Err(Error::BadImage(format!(
                "source buffer length {} does not match {}x{}x4",
                src_data.len(),
                src_width,
                src_height
            )));
        }

        Ok(ImageNode {
            transform: Transform::parse(transform),
            x,
            y,
            width,
            height,
            sampling,
            mip: crate::mipmap::MipPyramid::build(src_width, src_height, src_data),
        })
    }
}

/// Recursively walks `group`'s children, accumulating transforms and
/// dispatching each primitive to its rasterizer in document order: later
/// siblings occlude earlier ones through alpha composition, a painter's
/// algorithm.
pub(crate) fn walk_group(group: &Group, parent: &Transform, sample_rate: u32, fb: &mut FrameBuffer) {
    let accum = parent.then(&group.transform);
    for child in &group.children {
        walk_node(child, &accum, sample_rate, fb);
    }
}

fn walk_node(node: &Node, parent: &Transform, sample_rate: u32, fb: &mut FrameBuffer) {
    match node {
        Node::Group(g) => walk_group(g, parent, sample_rate, fb),
        Node::Rect(r) => rasterize_rect(r, parent, sample_rate, fb),
        Node::Line(l) => rasterize_line(l, parent, fb),
        Node::Polyline(p) => rasterize_polyline(p, parent, fb),
        Node::Polygon(p) => rasterize_polygon(p, parent, sample_rate, fb),
        Node::Circle(c) => rasterize_circle(c, parent, sample_rate, fb),
        Node::Image(i) => rasterize_image(i, parent, fb),
    }
}

fn rasterize_rect(r: &RectNode, parent: &Transform, sample_rate: u32, fb: &mut FrameBuffer) {
    let m = parent.then(&r.transform);
    let sr = sample_rate as f32;
    let map_point = |x: f32, y: f32| {
        let p = m.apply(Point::from_xy(x, y));
        (p.x * sr, p.y * sr)
    };
    let map_pixel = |x: f32, y: f32| {
        let p = m.apply(Point::from_xy(x, y));
        (p.x, p.y)
    };
    fill::fill_rect(fb, r.x, r.y, r.width, r.height, r.fill, r.stroke, map_point, map_pixel);
}

fn rasterize_circle(c: &CircleNode, parent: &Transform, sample_rate: u32, fb: &mut FrameBuffer) {
    let m = parent.then(&c.transform);
    let sr = sample_rate as f32;
    let map_point = |x: f32, y: f32| {
        let p = m.apply(Point::from_xy(x, y));
        (p.x * sr, p.y * sr)
    };
    fill::fill_circle(fb, c.cx, c.cy, c.r, c.fill, map_point);
}

fn rasterize_line(l: &LineNode, parent: &Transform, fb: &mut FrameBuffer) {
    let m = parent.then(&l.transform);
    let p0 = m.apply(Point::from_xy(l.x1, l.y1));
    let p1 = m.apply(Point::from_xy(l.x2, l.y2));
    line::draw_line(fb, p0.x, p0.y, p1.x, p1.y, l.stroke);
}

fn rasterize_polyline(p: &PolylineNode, parent: &Transform, fb: &mut FrameBuffer) {
    let m = parent.then(&p.transform);
    let pts = local_points(&p.points);
    let mapped = m.apply_points(&pts);
    for pair in mapped.windows(2) {
        line::draw_line(fb, pair[0].x, pair[0].y, pair[1].x, pair[1].y, p.stroke);
    }
}

fn rasterize_polygon(p: &PolygonNode, parent: &Transform, sample_rate: u32, fb: &mut FrameBuffer) {
    let m = parent.then(&p.transform);
    let sr = sample_rate as f32;
    let pts = local_points(&p.points);
    let mapped = m.apply_points(&pts);

    let super_flat: Vec<f32> = mapped.iter().flat_map(|pt| [pt.x * sr, pt.y * sr]).collect();
    let expected = mapped.len().saturating_sub(2);
    let triangles = triangulate(&super_flat);
    if triangles.len() < expected {
        log::warn!(
            "polygon triangulation produced {} of {} expected triangles; likely self-intersecting",
            triangles.len(),
            expected
        );
    }
    for tri in &triangles {
        fill::fill_triangle(fb, tri, p.fill);
    }

    if let Some(stroke) = p.stroke {
        let n = mapped.len();
        for i in 0..n {
            let a = mapped[i];
            let b = mapped[(i + 1) % n];
            line::draw_line(fb, a.x, a.y, b.x, b.y, stroke);
        }
    }
}

fn rasterize_image(node: &ImageNode, parent: &Transform, fb: &mut FrameBuffer) {
    let m = parent.then(&node.transform);
    image::draw_image(fb, &m, &node.mip, node.x, node.y, node.width, node.height, node.sampling);
}

fn local_points(flat: &[f32]) -> Vec<Point> {
    flat.chunks_exact(2).map(|xy| Point::from_xy(xy[0], xy[1])).collect()
}
