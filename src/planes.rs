//! Contains the rectangles describing an image on the integral
//! (pixel) plane and the matching window on the complex plane, the
//! splitter that slices one axis of both into congruent sub-ranges,
//! and the PlaneMapper that maps pixels to points.
use itertools::iproduct;
use num::Complex;

use crate::errors::RenderError;

/// A rectangle on the complex plane.  The real part runs left to
/// right along the x axis of the image, the imaginary part runs top
/// to bottom along the y axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlaneRect {
    /// Real value at the left edge.
    pub re_min: f64,
    /// Real value at the right edge.
    pub re_max: f64,
    /// Imaginary value at the top edge.
    pub im_min: f64,
    /// Imaginary value at the bottom edge.
    pub im_max: f64,
}

impl PlaneRect {
    /// Constructor.  Both spans must be finite and strictly positive.
    pub fn new(re_min: f64, re_max: f64, im_min: f64, im_max: f64) -> Result<Self, RenderError> {
        let rect = PlaneRect {
            re_min,
            re_max,
            im_min,
            im_max,
        };
        rect.validate()?;
        Ok(rect)
    }

    /// Builds the rectangle from its left-lower and right-upper
    /// corners, treating the real part of each as x and the imaginary
    /// part as y.
    pub fn from_corners(
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
    ) -> Result<Self, RenderError> {
        PlaneRect::new(leftlower.re, rightupper.re, leftlower.im, rightupper.im)
    }

    /// Checks the `re_min < re_max`, `im_min < im_max` invariant.
    pub fn validate(&self) -> Result<(), RenderError> {
        let finite = [self.re_min, self.re_max, self.im_min, self.im_max]
            .iter()
            .all(|v| v.is_finite());
        if finite && self.re_min < self.re_max && self.im_min < self.im_max {
            Ok(())
        } else {
            Err(RenderError::DegeneratePlane(
                self.re_min,
                self.re_max,
                self.im_min,
                self.im_max,
            ))
        }
    }

    /// The width of the rectangle along the real axis.
    pub fn re_span(&self) -> f64 {
        self.re_max - self.re_min
    }

    /// The height of the rectangle along the imaginary axis.
    pub fn im_span(&self) -> f64 {
        self.im_max - self.im_min
    }
}

/// A rectangle of pixels, anchored at `(x0, y0)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PixelRect {
    /// Left column.
    pub x0: usize,
    /// Top row.
    pub y0: usize,
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl PixelRect {
    /// The total number of pixels in the rectangle.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// True when the rectangle covers no pixels at all.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Every `(x, y)` in the rectangle, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize)> {
        let (x0, y0) = (self.x0, self.y0);
        let (x1, y1) = (self.x0 + self.width, self.y0 + self.height);
        iproduct!(y0..y1, x0..x1).map(|(y, x)| (x, y))
    }
}

/// One slice of an axis: a run of pixels and the values at its two
/// pixel boundaries.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Span {
    /// First pixel of the slice.
    pub pixel_start: usize,
    /// Number of pixels in the slice.
    pub pixel_len: usize,
    /// Value at `pixel_start`.
    pub value_start: f64,
    /// Value at `pixel_start + pixel_len`.
    pub value_end: f64,
}

/// Linear interpolation of `min..max` at pixel boundary `pos` of
/// `total`.  The two end boundaries return `min` and `max` exactly so
/// that a single slice reproduces its input unchanged.
#[inline]
fn interpolate(min: f64, max: f64, pos: usize, total: usize) -> f64 {
    if pos == 0 {
        min
    } else if pos == total {
        max
    } else {
        min + (max - min) * (pos as f64) / (total as f64)
    }
}

/// Cuts an axis of `total_size` pixels spanning `min..max` into
/// `total_parts` slices and returns slice `index`.  Every slice but
/// the last is `total_size / total_parts` pixels wide; the last takes
/// whatever remains, so the slices always cover the axis exactly.
/// When there are more parts than pixels all but the last slice are
/// empty.
pub fn split_range(total_size: usize, index: usize, total_parts: usize, min: f64, max: f64) -> Span {
    assert!(
        index < total_parts,
        "slice {} of a {}-way split",
        index,
        total_parts
    );
    let base = total_size / total_parts;
    let pixel_start = base * index;
    let pixel_len = if index == total_parts - 1 {
        total_size - pixel_start
    } else {
        base
    };
    Span {
        pixel_start,
        pixel_len,
        value_start: interpolate(min, max, pixel_start, total_size),
        value_end: interpolate(min, max, pixel_start + pixel_len, total_size),
    }
}

/// Relates the whole image to the whole window on the complex plane.
/// Points are always computed from the absolute pixel position, never
/// from a tile-local offset, so a pixel maps to the same point however
/// the image is tiled.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlaneMapper {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// The window on the complex plane.
    pub plane: PlaneRect,
}

impl PlaneMapper {
    /// Constructor.  Takes the size of the image and the window on the
    /// complex plane it shows.
    pub fn new(width: usize, height: usize, plane: PlaneRect) -> Self {
        PlaneMapper {
            width,
            height,
            plane,
        }
    }

    /// The real value of pixel column `x`.
    #[inline]
    pub fn re_at(&self, x: usize) -> f64 {
        interpolate(self.plane.re_min, self.plane.re_max, x, self.width)
    }

    /// The imaginary value of pixel row `y`.
    #[inline]
    pub fn im_at(&self, y: usize) -> f64 {
        interpolate(self.plane.im_min, self.plane.im_max, y, self.height)
    }

    /// Given a pixel on the integral plane, return the point on the
    /// complex plane at its upper-left corner.
    pub fn pixel_to_point(&self, x: usize, y: usize) -> Complex<f64> {
        Complex::new(self.re_at(x), self.im_at(y))
    }
}
