// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The one error type for the crate.  Almost everything here is a
//! configuration problem caught before a render starts; the render
//! itself can only be cancelled or lose a worker to a panic.

use failure::Fail;

/// Everything that can go wrong between reading the configuration
/// and writing the finished image.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// The image has no pixels: (width, height).
    #[fail(display = "image dimensions must be positive, got {}x{}", _0, _1)]
    EmptyImage(usize, usize),

    /// The tile grid has a zero axis: (tiles_x, tiles_y).
    #[fail(display = "tile grid must be at least 1x1, got {}x{}", _0, _1)]
    NoTiles(usize, usize),

    /// More tiles than pixels along an axis: (tiles_x, tiles_y, width, height).
    #[fail(display = "tile grid {}x{} does not fit a {}x{} image", _0, _1, _2, _3)]
    TileGrid(usize, usize, usize, usize),

    /// The plane rectangle is empty, inverted or not finite:
    /// (re_min, re_max, im_min, im_max).
    #[fail(
        display = "plane rectangle is degenerate: re [{}, {}], im [{}, {}]",
        _0, _1, _2, _3
    )]
    DegeneratePlane(f64, f64, f64, f64),

    /// A render needs at least one iteration.
    #[fail(display = "max iterations must be positive")]
    NoIterations,

    /// The escape radius is zero, negative or not finite.
    #[fail(display = "escape radius must be positive and finite, got {}", _0)]
    EscapeRadius(f64),

    /// The worker thread count is zero.
    #[fail(display = "at least one worker thread is required")]
    NoThreads,

    /// Plane preset index outside the catalog: (index, catalog size).
    #[fail(display = "plane preset {} out of range (0-{})", _0, _1)]
    UnknownPlanePreset(usize, usize),

    /// A size that is neither a preset name nor `WIDTHxHEIGHT`.
    #[fail(display = "unknown image size: {}", _0)]
    UnknownSize(String),

    /// A tile grid that is not `XxY`.
    #[fail(display = "could not parse tile grid: {}", _0)]
    BadTileGrid(String),

    /// A complex number that is not `re,im`.
    #[fail(display = "could not parse complex number: {}", _0)]
    BadComplex(String),

    /// A palette name that is not in the catalog.
    #[fail(display = "unknown palette: {}", _0)]
    UnknownPalette(String),

    /// The cancel token fired: (tiles finished, tiles dispatched).
    #[fail(display = "render cancelled after {} of {} tiles", _0, _1)]
    Cancelled(usize, usize),

    /// Worker threads went away with tiles still outstanding.
    #[fail(display = "render workers exited with {} tiles outstanding", _0)]
    WorkersLost(usize),

    /// The encoder could not persist the framebuffer.
    #[fail(display = "could not write image: {}", _0)]
    Image(#[fail(cause)] image::ImageError),
}

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> Self {
        RenderError::Image(err)
    }
}
