//! The RGBA image the aggregator paints into.

/// A row-major RGBA8 buffer, `width * height * 4` bytes, zeroed on
/// creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Framebuffer {
    /// A fully transparent black buffer of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Framebuffer {
            width,
            height,
            pixels: vec![0; width * height * 4],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) outside {}x{} framebuffer",
            x,
            y,
            self.width,
            self.height
        );
        (y * self.width + x) * 4
    }

    /// Overwrites pixel `(x, y)`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let o = self.offset(x, y);
        self.pixels[o..o + 4].copy_from_slice(&rgba);
    }

    /// Reads pixel `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> [u8; 4] {
        let o = self.offset(x, y);
        [
            self.pixels[o],
            self.pixels[o + 1],
            self.pixels[o + 2],
            self.pixels[o + 3],
        ]
    }

    /// The raw bytes, row-major RGBA.
    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    /// Gives up the raw bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }
}
