use num::Complex;
use rand::Rng;

use tilebrot::presets::plane_preset;
use tilebrot::{
    escape_iterations, render, render_with, split_range, BitShift, Deadline, RenderConfig,
    RenderError,
};

fn standard(tiles_x: usize, tiles_y: usize) -> RenderConfig {
    RenderConfig {
        width: 100,
        height: 100,
        tiles_x,
        tiles_y,
        plane: plane_preset(0).unwrap(),
        max_iterations: 1000,
        escape_radius: 2.0,
        threads: 4,
        julia: None,
    }
}

#[test]
fn splitter_covers_every_axis_exactly() {
    let mut rng = rand::thread_rng();
    for _ in 0..500 {
        let total = rng.gen_range(0..2000);
        let parts = rng.gen_range(1..64);
        let mut next = 0;
        for i in 0..parts {
            let span = split_range(total, i, parts, -1.0, 1.0);
            assert_eq!(span.pixel_start, next, "{} pixels in {} parts", total, parts);
            next += span.pixel_len;
        }
        assert_eq!(next, total);
    }
}

#[test]
fn known_points() {
    let origin = Complex::new(0.0, 0.0);
    assert_eq!(escape_iterations(origin, origin, 4.0, 1000), 1000);
    let far = Complex::new(5.0, 5.0);
    assert_eq!(escape_iterations(far, far, 4.0, 1000), 0);
}

#[test]
fn standard_view_is_pinned() {
    let fb = render(&standard(3, 3)).unwrap();
    // (-2.2, -1.3) is outside the radius before the first iteration.
    assert_eq!(fb.get(0, 0), [0, 0, 0, 255]);
    // Inside the main cardioid.
    assert_eq!(fb.get(73, 50), [0, 0, 0, 255]);
    assert_eq!(fb.get(50, 50), [0, 0, 0, 255]);
    // 0.77 on the real axis escapes after two iterations.
    assert_eq!(fb.get(99, 50), [2, 4, 8, 255]);
    // Near the boundary, 36 iterations.
    assert_eq!(fb.get(45, 42), [36, 72, 144, 255]);
}

#[test]
fn tiling_never_changes_the_image() {
    let one = render(&standard(1, 1)).unwrap();
    assert_eq!(one, render(&standard(4, 4)).unwrap());
    assert_eq!(one, render(&standard(3, 7)).unwrap());
    assert_eq!(one, render(&standard(100, 1)).unwrap());
}

#[test]
fn rendering_is_deterministic() {
    let a = render(&standard(4, 4)).unwrap();
    let b = render(&standard(4, 4)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn julia_differs_from_mandelbrot() {
    let mandel = render(&standard(2, 2)).unwrap();
    let julia = render(&RenderConfig {
        julia: Some(Complex::new(-0.8, 0.156)),
        ..standard(2, 2)
    })
    .unwrap();
    assert_ne!(mandel, julia);
}

#[test]
fn expired_deadline_cancels() {
    let config = RenderConfig {
        width: 400,
        height: 400,
        ..standard(4, 4)
    };
    let deadline = Deadline::after(std::time::Duration::from_secs(0));
    match render_with(&config, &BitShift, &deadline) {
        Err(RenderError::Cancelled(finished, 16)) => assert_eq!(finished, 0),
        other => panic!("expected cancellation, got {:?}", other.map(|_| ())),
    }
}
