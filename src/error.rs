// Copyright 2024 the svg-raster authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

/// Errors produced while building a [`crate::Document`] or rendering one.
///
/// Modeled after `usvg`'s hand-written `Error` (no `thiserror`): a small,
/// closed set of variants with a manual `Display` impl.
#[derive(Debug)]
pub enum Error {
    /// A numeric attribute, transform argument, or grammar-specific string
    /// (`viewBox`, a `points` list, a length with a `px` suffix) could not
    /// be parsed. Fatal: the whole render is aborted before any buffer is
    /// produced.
    ParseError(String),

    /// The embedded image bytes failed to decode, or the destination
    /// rectangle is zero-area. Non-fatal: the owning `Image` node is
    /// skipped and the rest of the render proceeds.
    BadImage(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ParseError(msg) => write!(f, "failed to parse SVG attribute: {}", msg),
            Error::BadImage(msg) => write!(f, "bad image: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
