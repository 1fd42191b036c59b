//! The escape-time iterator shared by every tile.

use num::Complex;

/// Iterates `z = z² + addend` starting from `z = start` and returns
/// how many iterations ran before `|z|²` exceeded `radius_sq`, or
/// `max_iterations` if it never did.  For the Mandelbrot set pass the
/// same point as `start` and `addend`; for a Julia set pass the
/// Julia constant as `addend`.
///
/// The squares and the cross product are carried between iterations
/// so each step costs three multiplications.
#[inline]
pub fn escape_iterations(
    start: Complex<f64>,
    addend: Complex<f64>,
    radius_sq: f64,
    max_iterations: u32,
) -> u32 {
    let (mut x, mut y) = (start.re, start.im);
    let mut xx = x * x;
    let mut yy = y * y;
    let mut xy = x * y;
    let mut remain = max_iterations;

    while xx + yy <= radius_sq && remain > 0 {
        x = xx - yy + addend.re;
        y = xy + xy + addend.im;
        xx = x * x;
        yy = y * y;
        xy = x * y;
        remain -= 1;
    }

    max_iterations - remain
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mandel(re: f64, im: f64, max: u32) -> u32 {
        let c = Complex::new(re, im);
        escape_iterations(c, c, 4.0, max)
    }

    #[test]
    fn origin_never_escapes() {
        assert_eq!(mandel(0.0, 0.0, 1000), 1000);
    }

    #[test]
    fn far_point_escapes_immediately() {
        assert_eq!(mandel(5.0, 5.0, 1000), 0);
    }

    #[test]
    fn point_on_the_circle_counts_as_inside() {
        // |2|² == 4, then 2² + 2 = 6 escapes.
        assert_eq!(mandel(2.0, 0.0, 1000), 1);
    }

    #[test]
    fn known_orbits() {
        // 1 -> 2 -> 5
        assert_eq!(mandel(1.0, 0.0, 1000), 2);
        // -1 -> 0 -> -1 -> 0 ... period two, never escapes
        assert_eq!(mandel(-1.0, 0.0, 500), 500);
        // i -> -1+i -> -i -> -1+i ... bounded
        assert_eq!(mandel(0.0, 1.0, 200), 200);
    }

    #[test]
    fn stays_within_bounds() {
        for i in 0..40 {
            for j in 0..40 {
                let re = -2.5 + (i as f64) * 0.1;
                let im = -2.0 + (j as f64) * 0.1;
                let n = mandel(re, im, 64);
                assert!(n <= 64);
            }
        }
    }

    #[test]
    fn zero_iterations_returns_zero() {
        assert_eq!(mandel(0.0, 0.0, 0), 0);
    }

    #[test]
    fn julia_addend_is_used() {
        // z0 = 0 with addend 1: 0 -> 1 -> 2 -> 5
        let n = escape_iterations(Complex::new(0.0, 0.0), Complex::new(1.0, 0.0), 4.0, 100);
        assert_eq!(n, 3);
    }

    #[test]
    fn larger_radius_takes_longer() {
        let small = mandel(0.5, 0.5, 1000);
        let c = Complex::new(0.5, 0.5);
        let large = escape_iterations(c, c, 10_000.0, 1000);
        assert!(large >= small);
    }
}
