//! Tiles: the units of work handed to the worker threads, the
//! messages workers send back, and the worker loop itself.

use crossbeam::channel::Sender;
use itertools::iproduct;
use log::trace;
use num::Complex;

use crate::cancel::CancelToken;
use crate::escape::escape_iterations;
use crate::planes::{split_range, PixelRect, PlaneMapper, PlaneRect};

/// One computed pixel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PixelResult {
    /// Image column.
    pub x: usize,
    /// Image row.
    pub y: usize,
    /// Escape count, at most the render's max iterations.
    pub iterations: u32,
}

/// Sent exactly once by a worker when it is through with a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TileDone {
    /// Index of the tile in the grid, row-major.
    pub tile: usize,
    /// False if the worker was cancelled before every pixel was sent.
    pub finished: bool,
}

/// A rectangle of the image, paired with the window on the complex
/// plane it covers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tile {
    /// Index of the tile in the grid, row-major.
    pub index: usize,
    /// The pixels this tile owns.
    pub pixels: PixelRect,
    /// The part of the complex plane under those pixels.
    pub plane: PlaneRect,
}

/// Slices the image into `tiles_x * tiles_y` tiles, splitting the x
/// axis with the real range and the y axis with the imaginary range.
/// The tiles cover the image exactly once; when an axis has fewer
/// pixels than parts some tiles are empty.
pub fn tile_grid(mapper: &PlaneMapper, tiles_x: usize, tiles_y: usize) -> Vec<Tile> {
    let plane = mapper.plane;
    iproduct!(0..tiles_y, 0..tiles_x)
        .enumerate()
        .map(|(index, (ty, tx))| {
            let rows = split_range(mapper.height, ty, tiles_y, plane.im_min, plane.im_max);
            let cols = split_range(mapper.width, tx, tiles_x, plane.re_min, plane.re_max);
            Tile {
                index,
                pixels: PixelRect {
                    x0: cols.pixel_start,
                    y0: rows.pixel_start,
                    width: cols.pixel_len,
                    height: rows.pixel_len,
                },
                plane: PlaneRect {
                    re_min: cols.value_start,
                    re_max: cols.value_end,
                    im_min: rows.value_start,
                    im_max: rows.value_end,
                },
            }
        })
        .collect()
}

/// What every worker needs besides its tile.
pub struct TileWorker<'a> {
    /// Maps absolute pixel positions to the complex plane.
    pub mapper: PlaneMapper,
    /// Iteration cap.
    pub max_iterations: u32,
    /// Square of the escape radius.
    pub radius_sq: f64,
    /// Fixed addend for Julia sets; `None` renders the Mandelbrot set.
    pub julia: Option<Complex<f64>>,
    /// Polled between pixels.
    pub cancel: &'a dyn CancelToken,
}

impl<'a> TileWorker<'a> {
    /// Computes every pixel of `tile`, sending each as it is finished,
    /// then sends one `TileDone`.  Returns false if the receiving side
    /// hung up.
    pub fn work(&self, tile: &Tile, pixels: &Sender<PixelResult>, done: &Sender<TileDone>) -> bool {
        let mut finished = true;
        for (x, y) in tile.pixels.pixels() {
            if self.cancel.is_cancelled() {
                finished = false;
                break;
            }
            let iterations = self.pixel(x, y);
            if pixels.send(PixelResult { x, y, iterations }).is_err() {
                return false;
            }
        }
        trace!("tile {} done (finished: {})", tile.index, finished);
        done.send(TileDone {
            tile: tile.index,
            finished,
        })
        .is_ok()
    }

    /// The escape count of one pixel.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        let c = self.mapper.pixel_to_point(x, y);
        let addend = self.julia.unwrap_or(c);
        escape_iterations(c, addend, self.radius_sq, self.max_iterations)
    }
}
