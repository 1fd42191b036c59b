use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, Instant};

use clap::{Arg, ArgAction, ArgMatches, Command};
use log::info;
use num::Complex;

use tilebrot::presets::{grid_for_concurrency, parse_pair, plane_preset, ImageSize, STD_SIZE};
use tilebrot::sink::stamped_name;
use tilebrot::{
    render_with, Deadline, FrameSink, NeverCancel, PaletteKind, PlaneRect, PngFile, RenderConfig,
    RenderError,
};

fn parse_complex(s: &str) -> Result<Complex<f64>, String> {
    match parse_pair(s, ',') {
        Some((re, im)) => Ok(Complex { re, im }),
        None => Err(RenderError::BadComplex(s.to_string()).to_string()),
    }
}

fn parse_grid(s: &str) -> Result<(usize, usize), String> {
    parse_pair(s, 'x').ok_or_else(|| RenderError::BadTileGrid(s.to_string()).to_string())
}

fn parse_range<T: FromStr + PartialOrd + Display>(
    s: &str,
    low: T,
    high: T,
    what: &str,
) -> Result<T, String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(i)
            } else {
                Err(format!("{} must be between {} and {}", what, low, high))
            }
        }
        Err(_) => Err(format!("Could not parse {}", what)),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const CONCURRENCY: &str = "concurrency";
const TILES: &str = "tiles";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";
const RANGE: &str = "range";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const RADIUS: &str = "radius";
const JULIA: &str = "julia";
const PALETTE: &str = "palette";
const STAMP: &str = "stamp";
const TIMEOUT: &str = "timeout";

fn args(cpus: usize) -> ArgMatches {
    Command::new("tilebrot")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tiled, multi-threaded Mandelbrot renderer")
        .arg(
            Arg::new(OUTPUT)
                .long(OUTPUT)
                .short('o')
                .default_value("image.png")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Output file"),
        )
        .arg(
            Arg::new(SIZE)
                .long(SIZE)
                .short('s')
                .default_value("std")
                .value_parser(|s: &str| s.parse::<ImageSize>().map_err(|e| e.to_string()))
                .help("Image size: std, s/small, xs, vga, hdmi, tiny or WIDTHxHEIGHT"),
        )
        .arg(
            Arg::new(CONCURRENCY)
                .long(CONCURRENCY)
                .short('c')
                .value_parser(|s: &str| parse_range(s, 1usize, 100_000, "concurrency"))
                .help("Number of tiles; the grid shape is derived from it"),
        )
        .arg(
            Arg::new(TILES)
                .long(TILES)
                .short('t')
                .value_parser(parse_grid)
                .conflicts_with(CONCURRENCY)
                .help("Explicit tile grid, XxY"),
        )
        .arg(
            Arg::new(THREADS)
                .long(THREADS)
                .short('p')
                .value_parser(|s: &str| parse_range(s, 1usize, 1024, "thread count"))
                .help(format!("Number of worker threads [default: {}]", cpus)),
        )
        .arg(
            Arg::new(ITERATIONS)
                .long(ITERATIONS)
                .short('i')
                .default_value("1000")
                .value_parser(|s: &str| parse_range(s, 1u32, 10_000_000, "iteration count"))
                .help("Maximum iterations per pixel"),
        )
        .arg(
            Arg::new(RANGE)
                .long(RANGE)
                .short('r')
                .value_parser(|s: &str| {
                    let i = parse_range(s, 0usize, usize::MAX, "plane preset")?;
                    plane_preset(i).map(|_| i).map_err(|e| e.to_string())
                })
                .conflicts_with(LEFTLOWER)
                .help("Plane preset, 0 is the whole set"),
        )
        .arg(
            Arg::new(LEFTLOWER)
                .long(LEFTLOWER)
                .short('l')
                .allow_hyphen_values(true)
                .value_parser(parse_complex)
                .requires(RIGHTUPPER)
                .help("Lowest real and imaginary corner of the plane, re,im"),
        )
        .arg(
            Arg::new(RIGHTUPPER)
                .long(RIGHTUPPER)
                .short('u')
                .allow_hyphen_values(true)
                .value_parser(parse_complex)
                .requires(LEFTLOWER)
                .help("Highest real and imaginary corner of the plane, re,im"),
        )
        .arg(
            Arg::new(RADIUS)
                .long(RADIUS)
                .default_value("2.0")
                .value_parser(clap::value_parser!(f64))
                .help("Escape radius"),
        )
        .arg(
            Arg::new(JULIA)
                .long(JULIA)
                .short('j')
                .allow_hyphen_values(true)
                .value_parser(parse_complex)
                .help("Render the Julia set for this constant, re,im"),
        )
        .arg(
            Arg::new(PALETTE)
                .long(PALETTE)
                .default_value("bitshift")
                .value_parser(|s: &str| s.parse::<PaletteKind>().map_err(|e| e.to_string()))
                .help("Colouring: bitshift or grey"),
        )
        .arg(
            Arg::new(STAMP)
                .long(STAMP)
                .action(ArgAction::SetTrue)
                .help("Also save a copy named after size, grid and duration"),
        )
        .arg(
            Arg::new(TIMEOUT)
                .long(TIMEOUT)
                .value_parser(|s: &str| parse_range(s, 0.001f64, 86_400.0, "timeout"))
                .help("Give up after this many seconds"),
        )
        .get_matches()
}

fn value<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, id: &str) -> Option<T> {
    matches.get_one::<T>(id).cloned()
}

fn config(matches: &ArgMatches, cpus: usize) -> Result<RenderConfig, RenderError> {
    let ImageSize(width, height) =
        value(matches, SIZE).unwrap_or(ImageSize(STD_SIZE.0, STD_SIZE.1));

    let (tiles_x, tiles_y) = match (
        value::<(usize, usize)>(matches, TILES),
        value::<usize>(matches, CONCURRENCY),
    ) {
        (Some(grid), _) => grid,
        (None, Some(n)) => {
            let grid = grid_for_concurrency(n);
            info!("c({}) => x*y={}*{}", n, grid.0, grid.1);
            grid
        }
        (None, None) => (cpus.min(width.max(1)), cpus.min(height.max(1))),
    };

    let plane = match (
        value::<Complex<f64>>(matches, LEFTLOWER),
        value::<Complex<f64>>(matches, RIGHTUPPER),
    ) {
        (Some(leftlower), Some(rightupper)) => PlaneRect::from_corners(leftlower, rightupper)?,
        _ => plane_preset(value(matches, RANGE).unwrap_or(0))?,
    };

    Ok(RenderConfig {
        width,
        height,
        tiles_x,
        tiles_y,
        plane,
        max_iterations: value(matches, ITERATIONS).unwrap_or(1000),
        escape_radius: value(matches, RADIUS).unwrap_or(2.0),
        threads: value(matches, THREADS).unwrap_or(cpus),
        julia: value(matches, JULIA),
    })
}

fn run() -> Result<(), failure::Error> {
    let cpus = num_cpus::get();
    info!(
        "OS: {} Architecture: {} CPUs: {}",
        std::env::consts::OS,
        std::env::consts::ARCH,
        cpus
    );

    let matches = args(cpus);
    let config = config(&matches, cpus)?;
    config.validate()?;
    info!(
        "{} tiles ({}x{}) over {} threads",
        config.tile_count(),
        config.tiles_x,
        config.tiles_y,
        config.threads
    );

    let palette = value::<PaletteKind>(&matches, PALETTE)
        .unwrap_or_default()
        .palette();
    let output: PathBuf = value(&matches, OUTPUT).unwrap_or_else(|| PathBuf::from("image.png"));

    let start = Instant::now();
    let frame = match value::<f64>(&matches, TIMEOUT) {
        Some(secs) => render_with(&config, &palette, &Deadline::after(Duration::from_secs_f64(secs))),
        None => render_with(&config, &palette, &NeverCancel),
    }?;
    let took = start.elapsed();
    info!("took: {:?}", took);

    PngFile::new(&output).accept(&frame)?;
    if matches.get_flag(STAMP) {
        let stamped = stamped_name(
            &output,
            (config.width, config.height),
            (config.tiles_x, config.tiles_y),
            took.as_secs_f64(),
        );
        PngFile::new(stamped).accept(&frame)?;
    }

    info!("done.");
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
