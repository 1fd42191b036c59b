//! The single consumer of worker output.  Only the aggregator ever
//! touches the framebuffer, so the workers need no locks.

use crossbeam::channel::Receiver;
use crossbeam::select;
use log::{debug, trace};

use crate::errors::RenderError;
use crate::framebuffer::Framebuffer;
use crate::palette::Palette;
use crate::tiles::{PixelResult, TileDone};

/// Paints pixel results into a framebuffer until every dispatched
/// tile has reported done.
pub struct Aggregator<'a> {
    framebuffer: Framebuffer,
    palette: &'a dyn Palette,
    max_iterations: u32,
    tiles: usize,
    outstanding: usize,
    unfinished: usize,
    received: usize,
}

/// What the aggregator saw before it stopped.
#[derive(Debug)]
pub struct Aggregate {
    /// The painted image.
    pub framebuffer: Framebuffer,
    /// Number of pixel results written.
    pub pixels: usize,
    /// Number of tiles that reported done.
    pub tiles: usize,
    /// Number of those that were cancelled part way.
    pub unfinished: usize,
}

impl<'a> Aggregator<'a> {
    /// An aggregator waiting on `tiles` completion signals.
    pub fn new(
        framebuffer: Framebuffer,
        palette: &'a dyn Palette,
        max_iterations: u32,
        tiles: usize,
    ) -> Self {
        Aggregator {
            framebuffer,
            palette,
            max_iterations,
            tiles,
            outstanding: tiles,
            unfinished: 0,
            received: 0,
        }
    }

    fn paint(&mut self, pixel: PixelResult) {
        let rgba = self.palette.colour(pixel.iterations, self.max_iterations);
        self.framebuffer.set(pixel.x, pixel.y, rgba);
        self.received += 1;
    }

    fn complete(&mut self, done: TileDone) {
        trace!("tile {} reported, {} outstanding", done.tile, self.outstanding - 1);
        self.outstanding -= 1;
        if !done.finished {
            self.unfinished += 1;
        }
    }

    /// Consumes both channels until the outstanding tile count reaches
    /// zero, then writes whatever pixel results are still queued.  A
    /// worker sends all of its pixels before its `TileDone`, so once
    /// every tile has reported nothing more can arrive.
    ///
    /// Fails with `WorkersLost` if every sender disconnects while
    /// tiles are still outstanding.
    pub fn run(
        mut self,
        pixels: &Receiver<PixelResult>,
        done: &Receiver<TileDone>,
    ) -> Result<Aggregate, RenderError> {
        let mut pixels_open = true;
        while self.outstanding > 0 {
            if pixels_open {
                select! {
                    recv(pixels) -> msg => match msg {
                        Ok(pixel) => self.paint(pixel),
                        Err(_) => pixels_open = false,
                    },
                    recv(done) -> msg => match msg {
                        Ok(signal) => self.complete(signal),
                        Err(_) => return Err(RenderError::WorkersLost(self.outstanding)),
                    },
                }
            } else {
                match done.recv() {
                    Ok(signal) => self.complete(signal),
                    Err(_) => return Err(RenderError::WorkersLost(self.outstanding)),
                }
            }
        }

        for pixel in pixels.try_iter() {
            self.paint(pixel);
        }
        debug!(
            "aggregated {} pixels from {} tiles ({} unfinished)",
            self.received, self.tiles, self.unfinished
        );

        Ok(Aggregate {
            framebuffer: self.framebuffer,
            pixels: self.received,
            tiles: self.tiles,
            unfinished: self.unfinished,
        })
    }
}
