//! The orchestrator: builds the tile grid, runs a pool of workers
//! over it, and drives the aggregator until every tile is in.

use crossbeam::channel::{bounded, unbounded};
use log::{debug, info};
use num::Complex;

use crate::aggregate::Aggregator;
use crate::cancel::{CancelToken, NeverCancel};
use crate::errors::RenderError;
use crate::framebuffer::Framebuffer;
use crate::palette::{BitShift, Palette};
use crate::planes::{PlaneMapper, PlaneRect};
use crate::presets::{plane_preset, PLANE_PRESETS, STD_SIZE};
use crate::tiles::{tile_grid, Tile, TileWorker};

/// Capacity of the pixel result channel.  Workers block once this
/// many results are waiting on the aggregator.
pub const PIXEL_QUEUE: usize = 4096;

/// Everything a render needs to know.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Tiles across.
    pub tiles_x: usize,
    /// Tiles down.
    pub tiles_y: usize,
    /// The window on the complex plane.
    pub plane: PlaneRect,
    /// Iteration cap; points that reach it are taken to be inside.
    pub max_iterations: u32,
    /// Escape radius.  Squared before use.
    pub escape_radius: f64,
    /// Worker threads pulling tiles.
    pub threads: usize,
    /// Fixed addend for a Julia set; `None` renders the Mandelbrot set.
    pub julia: Option<Complex<f64>>,
}

impl Default for RenderConfig {
    /// The standard view at the standard size, with a CPU-by-CPU tile
    /// grid and one thread per CPU.
    fn default() -> Self {
        let cpus = num_cpus::get();
        let (re_min, re_max, im_min, im_max) = PLANE_PRESETS[0];
        RenderConfig {
            width: STD_SIZE.0,
            height: STD_SIZE.1,
            tiles_x: cpus,
            tiles_y: cpus,
            plane: PlaneRect {
                re_min,
                re_max,
                im_min,
                im_max,
            },
            max_iterations: 1000,
            escape_radius: 2.0,
            threads: cpus,
            julia: None,
        }
    }
}

impl RenderConfig {
    /// A config for a `width` by `height` render of plane preset
    /// `preset`, otherwise default.
    pub fn with_preset(width: usize, height: usize, preset: usize) -> Result<Self, RenderError> {
        Ok(RenderConfig {
            width,
            height,
            plane: plane_preset(preset)?,
            ..RenderConfig::default()
        })
    }

    /// Rejects configs that cannot produce an image.  Callers are
    /// expected to validate before calling [`render`].
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::EmptyImage(self.width, self.height));
        }
        if self.tiles_x == 0 || self.tiles_y == 0 {
            return Err(RenderError::NoTiles(self.tiles_x, self.tiles_y));
        }
        if self.tiles_x > self.width || self.tiles_y > self.height {
            return Err(RenderError::TileGrid(
                self.tiles_x,
                self.tiles_y,
                self.width,
                self.height,
            ));
        }
        self.plane.validate()?;
        if self.max_iterations == 0 {
            return Err(RenderError::NoIterations);
        }
        if !(self.escape_radius.is_finite() && self.escape_radius > 0.0) {
            return Err(RenderError::EscapeRadius(self.escape_radius));
        }
        if self.threads == 0 {
            return Err(RenderError::NoThreads);
        }
        Ok(())
    }

    /// Total number of tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles_x * self.tiles_y
    }

    /// The pixel-to-plane mapping for the whole image.
    pub fn mapper(&self) -> PlaneMapper {
        PlaneMapper::new(self.width, self.height, self.plane)
    }
}

/// Renders with the bit-shift palette and no cancellation.
pub fn render(config: &RenderConfig) -> Result<Framebuffer, RenderError> {
    render_with(config, &BitShift, &NeverCancel)
}

/// Renders `config`, colouring with `palette` and checking `cancel`
/// between pixels.
///
/// The grid is queued up front and `config.threads` workers (never
/// more than there are tiles) pull tiles until the queue is empty.
/// Each tile streams its pixels and then one completion signal; the
/// calling thread aggregates until every tile has signalled.  If the
/// token fired before every tile finished, the partial image is
/// thrown away and `Cancelled` is returned.
pub fn render_with<P, C>(
    config: &RenderConfig,
    palette: &P,
    cancel: &C,
) -> Result<Framebuffer, RenderError>
where
    P: Palette,
    C: CancelToken,
{
    let mapper = config.mapper();
    let tiles = tile_grid(&mapper, config.tiles_x, config.tiles_y);
    let tile_count = tiles.len();
    let workers = config.threads.max(1).min(tile_count.max(1));

    let (queue_tx, queue_rx) = unbounded::<Tile>();
    for tile in tiles {
        // The receiver is held right here.
        let _ = queue_tx.send(tile);
    }
    drop(queue_tx);

    let (pixel_tx, pixel_rx) = bounded(PIXEL_QUEUE);
    let (done_tx, done_rx) = unbounded();

    let worker = TileWorker {
        mapper,
        max_iterations: config.max_iterations,
        radius_sq: config.escape_radius * config.escape_radius,
        julia: config.julia,
        cancel,
    };

    info!(
        "rendering {}x{} as {}x{} tiles on {} threads",
        config.width, config.height, config.tiles_x, config.tiles_y, workers
    );

    let outcome = crossbeam::scope(|spawner| {
        for _ in 0..workers {
            let queue = queue_rx.clone();
            let pixels = pixel_tx.clone();
            let done = done_tx.clone();
            let worker = &worker;
            spawner.spawn(move |_| {
                for tile in queue.iter() {
                    if !worker.work(&tile, &pixels, &done) {
                        break;
                    }
                }
            });
        }
        // Only the workers hold senders now, so a dead pool shows up as
        // a disconnect instead of a hang.
        drop(pixel_tx);
        drop(done_tx);
        debug!("{} workers started for {} tiles", workers, tile_count);

        let aggregator = Aggregator::new(
            Framebuffer::new(config.width, config.height),
            palette,
            config.max_iterations,
            tile_count,
        );
        aggregator.run(&pixel_rx, &done_rx)
    });

    let aggregate = match outcome {
        Ok(result) => result?,
        Err(_) => return Err(RenderError::WorkersLost(tile_count)),
    };

    if aggregate.unfinished > 0 {
        return Err(RenderError::Cancelled(
            aggregate.tiles - aggregate.unfinished,
            aggregate.tiles,
        ));
    }
    debug_assert_eq!(aggregate.pixels, config.width * config.height);
    Ok(aggregate.framebuffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Greyscale;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn small(tiles_x: usize, tiles_y: usize) -> RenderConfig {
        RenderConfig {
            width: 48,
            height: 32,
            tiles_x,
            tiles_y,
            max_iterations: 200,
            threads: 3,
            ..RenderConfig::default()
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert!(RenderConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_configs() {
        let good = small(2, 2);
        assert!(good.validate().is_ok());

        let cases = vec![
            RenderConfig { width: 0, ..good },
            RenderConfig { tiles_y: 0, ..good },
            RenderConfig { tiles_x: 49, ..good },
            RenderConfig { max_iterations: 0, ..good },
            RenderConfig { escape_radius: -1.0, ..good },
            RenderConfig { threads: 0, ..good },
            RenderConfig {
                plane: PlaneRect {
                    re_min: 1.0,
                    re_max: 0.0,
                    im_min: 0.0,
                    im_max: 1.0,
                },
                ..good
            },
        ];
        for bad in cases {
            assert!(bad.validate().is_err(), "{:?}", bad);
        }
    }

    #[test]
    fn with_preset_picks_catalog_window() {
        let c = RenderConfig::with_preset(10, 10, 3).unwrap();
        assert_eq!(c.plane.re_min, -1.816);
        assert!(RenderConfig::with_preset(10, 10, 42).is_err());
    }

    #[test]
    fn every_pixel_is_opaque() {
        let fb = render(&small(3, 2)).unwrap();
        assert_eq!((fb.width(), fb.height()), (48, 32));
        assert!(fb.as_raw().chunks(4).all(|px| px[3] == 255));
    }

    #[test]
    fn one_tile_matches_many() {
        let one = render(&small(1, 1)).unwrap();
        let many = render(&small(5, 7)).unwrap();
        assert_eq!(one, many);
    }

    #[test]
    fn single_thread_matches_pool() {
        let pool = render(&small(4, 4)).unwrap();
        let single = render(&RenderConfig { threads: 1, ..small(4, 4) }).unwrap();
        assert_eq!(pool, single);
    }

    #[test]
    fn more_tiles_than_pixels_still_renders() {
        let narrow = RenderConfig {
            width: 4,
            height: 3,
            tiles_x: 8,
            tiles_y: 5,
            ..small(1, 1)
        };
        let reference = RenderConfig { tiles_x: 1, tiles_y: 1, ..narrow };
        assert_eq!(render(&narrow).unwrap(), render(&reference).unwrap());
    }

    #[test]
    fn palette_is_applied() {
        let fb = render_with(&small(2, 2), &Greyscale, &NeverCancel).unwrap();
        assert!(fb.as_raw().chunks(4).all(|px| px[0] == px[1] && px[1] == px[2]));
    }

    #[test]
    fn cancelled_render_reports_cancelled() {
        let cancel = || true;
        match render_with(&small(2, 2), &BitShift, &cancel) {
            Err(RenderError::Cancelled(0, 4)) => {}
            other => panic!("expected cancellation, got {:?}", other),
        }
    }

    #[test]
    fn unfired_token_changes_nothing() {
        let flag = AtomicBool::new(false);
        let cancel = || flag.load(Ordering::Relaxed);
        let fb = render_with(&small(2, 2), &BitShift, &cancel).unwrap();
        assert_eq!(fb, render(&small(2, 2)).unwrap());
    }
}
