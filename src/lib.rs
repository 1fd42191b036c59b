#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tiled escape-time renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which iterating `z = z² + c` from `z = c` never runs off to
//! infinity.  Colouring every other point by how many iterations it
//! took to leave a circle of radius 2 gives the familiar picture; a
//! Julia set is the same iteration with a fixed constant in place of
//! `c`.
//!
//! Every pixel is independent, so the image is cut into a grid of
//! tiles, and a pool of worker threads computes them.  Workers never
//! touch the image: they stream `(x, y, iterations)` results and a
//! completion signal per tile over channels to a single aggregator,
//! which paints the framebuffer and knows the render is over when it
//! has heard from every tile.  Nothing is locked and no pixel is
//! written twice.

pub mod aggregate;
pub mod cancel;
pub mod errors;
pub mod escape;
pub mod framebuffer;
pub mod palette;
pub mod planes;
pub mod presets;
pub mod render;
pub mod sink;
pub mod tiles;

pub use cancel::{CancelToken, Deadline, NeverCancel};
pub use errors::RenderError;
pub use escape::escape_iterations;
pub use framebuffer::Framebuffer;
pub use palette::{BitShift, Greyscale, Palette, PaletteKind};
pub use planes::{split_range, PixelRect, PlaneMapper, PlaneRect, Span};
pub use render::{render, render_with, RenderConfig};
pub use sink::{FrameSink, PngFile};
