// Copyright 2024 the svg-raster authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::Error;

/// Parses a bare numeric attribute (`x`, `y`, `width`, `cx`, `r`, ...),
/// returning a recoverable [`Error::ParseError`] instead of panicking.
pub fn parse_f32(attr: &str, value: &str) -> Result<f32, Error> {
    value
        .trim()
        .parse::<f32>()
        .map_err(|_| Error::ParseError(format!("attribute `{}` is not numeric: {:?}", attr, value)))
}

/// Parses a length attribute that may carry a trailing `px` suffix.
pub fn parse_length_px(attr: &str, value: &str) -> Result<f32, Error> {
    let trimmed = value.trim();
    let numeric = trimmed.strip_suffix("px").unwrap_or(trimmed);
    parse_f32(attr, numeric)
}

/// Parses a `points="x0,y0 x1,y1 ..."` attribute into a flat `[x0, y0, ...]`
/// sequence, as consumed by [`svg_raster_geom::triangulate`] and the
/// polyline segment walker.
///
/// Accepts commas and/or whitespace as separators between and within pairs.
pub fn parse_points(value: &str) -> Result<Vec<f32>, Error> {
    let nums: Result<Vec<f32>, Error> = value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            tok.parse::<f32>()
                .map_err(|_| Error::ParseError(format!("malformed `points` value: {:?}", tok)))
        })
        .collect();
    let nums = nums?;
    if nums.len() % 2 != 0 {
        return Err(Error::ParseError(format!(
            "`points` has an odd number of coordinates: {:?}",
            value
        )));
    }
    Ok(nums)
}

/// Parses a `viewBox="minX minY width height"` attribute.
pub fn parse_view_box(value: &str) -> Result<(f32, f32, f32, f32), Error> {
    let nums: Vec<f32> = value
        .split_whitespace()
        .map(|tok| tok.parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| Error::ParseError(format!("malformed viewBox: {:?}", value)))?;
    match nums[..] {
        [min_x, min_y, w, h] => Ok((min_x, min_y, w, h)),
        _ => Err(Error::ParseError(format!(
            "viewBox must have exactly 4 components: {:?}",
            value
        ))),
    }
}

/// Resolves a `fill-opacity`/`stroke-opacity` attribute.
///
/// Present and non-zero overrides the color's alpha; absent *or exactly
/// zero* falls back to fully opaque -- an explicit `0` can't be told apart
/// from "unset" here, so it defaults the same way.
pub fn parse_opacity(value: Option<&str>) -> f32 {
    match value.and_then(|v| v.trim().parse::<f32>().ok()) {
        Some(v) if v != 0.0 => v,
        _ => 1.0,
    }
}
