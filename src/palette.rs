//! Colour policies: how an iteration count becomes an RGBA pixel.

use std::fmt;
use std::str::FromStr;

use crate::errors::RenderError;

/// Opaque black, used for points that never escaped.
pub const INSIDE: [u8; 4] = [0, 0, 0, 255];

/// Maps an escape count to a colour.
pub trait Palette: Send + Sync {
    /// The RGBA colour for a pixel that took `iterations` of at most
    /// `max_iterations` to escape.
    fn colour(&self, iterations: u32, max_iterations: u32) -> [u8; 4];
}

/// Spreads the low bits of the count over the three channels:
/// red gets the count, green the count shifted left once, blue the
/// count shifted left twice, each masked to a byte.  Points that
/// never escape are black.  Output from earlier renders depends on
/// this exact mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitShift;

impl Palette for BitShift {
    #[inline]
    fn colour(&self, iterations: u32, max_iterations: u32) -> [u8; 4] {
        if iterations == max_iterations {
            return INSIDE;
        }
        [
            (iterations & 0xFF) as u8,
            ((iterations << 1) & 0xFF) as u8,
            ((iterations << 2) & 0xFF) as u8,
            255,
        ]
    }
}

/// A linear grey ramp from black (escaped at once) to white (escaped
/// on the last iteration).  Points that never escape are black.
#[derive(Debug, Clone, Copy, Default)]
pub struct Greyscale;

impl Palette for Greyscale {
    fn colour(&self, iterations: u32, max_iterations: u32) -> [u8; 4] {
        if iterations >= max_iterations {
            return INSIDE;
        }
        let v = (u64::from(iterations) * 255 / u64::from(max_iterations)) as u8;
        [v, v, v, 255]
    }
}

/// The palettes selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteKind {
    /// See [`BitShift`].
    BitShift,
    /// See [`Greyscale`].
    Greyscale,
}

impl PaletteKind {
    /// Every selectable palette.
    pub const ALL: &'static [Self] = &[Self::BitShift, Self::Greyscale];

    /// The name used on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::BitShift => "bitshift",
            Self::Greyscale => "grey",
        }
    }

    /// A boxed palette of this kind.
    pub fn palette(self) -> Box<dyn Palette> {
        match self {
            Self::BitShift => Box::new(BitShift),
            Self::Greyscale => Box::new(Greyscale),
        }
    }
}

impl Default for PaletteKind {
    fn default() -> Self {
        Self::BitShift
    }
}

impl fmt::Display for PaletteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaletteKind {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bitshift" => Ok(Self::BitShift),
            "grey" | "gray" => Ok(Self::Greyscale),
            _ => Err(RenderError::UnknownPalette(s.to_string())),
        }
    }
}

impl<P: Palette + ?Sized> Palette for Box<P> {
    fn colour(&self, iterations: u32, max_iterations: u32) -> [u8; 4] {
        (**self).colour(iterations, max_iterations)
    }
}
