//! Named windows on the complex plane, named image sizes, and the
//! table that turns a single concurrency number into a tile grid.

use std::str::FromStr;

use crate::errors::RenderError;
use crate::planes::PlaneRect;

/// The catalog of plane windows, as `(re_min, re_max, im_min, im_max)`.
/// Entry 0 is the whole set.
pub const PLANE_PRESETS: [(f64, f64, f64, f64); 10] = [
    (-2.2, 0.8, -1.3, 1.3),
    (0.435396403, 0.451687191, 0.367981352, 0.380210061),
    (-0.37465401, -0.37332411, 0.659227668, 0.66020767),
    (-1.816, -1.66, -0.078, 0.078),
    (-0.098289376564, -0.098289374197, -0.889045279124, -0.88904527676),
    (
        -0.098289375468734,
        -0.098289375467142,
        -0.889045277967886,
        -0.889045277966296,
    ),
    (-0.867, -0.7, -0.234, 0.0),
    (-0.8085, -0.78159, -0.19071, -0.1638),
    (-0.80715, -0.7941, -0.18546, -0.17255),
    (-0.8024335, -0.802384, -0.1776984, -0.1776492),
];

/// Looks up a window in the catalog.
pub fn plane_preset(index: usize) -> Result<PlaneRect, RenderError> {
    match PLANE_PRESETS.get(index) {
        Some(&(re_min, re_max, im_min, im_max)) => PlaneRect::new(re_min, re_max, im_min, im_max),
        None => Err(RenderError::UnknownPlanePreset(
            index,
            PLANE_PRESETS.len() - 1,
        )),
    }
}

/// The standard image size.
pub const STD_SIZE: (usize, usize) = (6000, 5200);

/// An image size, either named or explicit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ImageSize(pub usize, pub usize);

impl FromStr for ImageSize {
    type Err = RenderError;

    /// Accepts `std`, `s`/`small` (half), `xs` (quarter), `vga`,
    /// `hdmi`, `tiny`, or `WIDTHxHEIGHT`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = STD_SIZE;
        match s {
            "std" => Ok(ImageSize(w, h)),
            "s" | "small" => Ok(ImageSize(w / 2, h / 2)),
            "xs" => Ok(ImageSize(w / 4, h / 4)),
            "vga" => Ok(ImageSize(640, 480)),
            "hdmi" => Ok(ImageSize(1920, 1080)),
            "tiny" => Ok(ImageSize(320, 200)),
            _ => parse_pair(s, 'x')
                .map(|(w, h)| ImageSize(w, h))
                .ok_or_else(|| RenderError::UnknownSize(s.to_string())),
        }
    }
}

/// Given a string and a separator, returns the two values separated
/// by the separator.
pub fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

/// Turns a concurrency number into a `(tiles_x, tiles_y)` grid whose
/// product is close to it, favouring tall narrow tiles for small
/// counts.
pub fn grid_for_concurrency(n: usize) -> (usize, usize) {
    match n {
        1 | 2 | 3 | 5 => (1, n),
        4 | 6 | 8 | 10 | 14 => (2, n / 2),
        9 | 15 => (3, n / 3),
        12 | 16 | 32 => (4, n / 4),
        64 | 128 => (8, n / 8),
        256 => (16, 16),
        100 => (10, 10),
        1000 => (50, 20),
        _ => (n, 1),
    }
}
