//! Shared fixtures for the cross-crate tests.

use std::f64::consts::TAU;

use nalgebra::{Point2, Vector2};
use subspace_core::{AffineTransform, PointCloud};

/// A lopsided star with `n_points` vertices, so no three anchors chosen by
/// index are collinear.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn star(n_points: usize) -> PointCloud {
    PointCloud::new(
        (0..n_points)
            .map(|i| {
                let angle = TAU * i as f64 / n_points as f64;
                let radius = if i % 2 == 0 { 3.0 } else { 1.5 } + 0.1 * i as f64;
                Point2::new(radius * angle.cos() + 0.5, radius * angle.sin() - 0.25)
            })
            .collect(),
    )
}

/// A family of shapes: `base` under a sweep of similarity transforms plus a
/// deterministic, non-rigid wobble.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn shape_family(base: &PointCloud, n_shapes: usize) -> Vec<PointCloud> {
    (0..n_shapes)
        .map(|s| {
            let t = s as f64;
            let transform = AffineTransform::similarity(
                1.0 + 0.05 * (0.9 * t).sin(),
                0.1 * (0.7 * t).cos(),
                Vector2::new(0.3 * (1.3 * t).sin(), -0.2 * (0.5 * t).cos()),
            );
            let moved = transform.apply(base);
            let mut k = 0.0;
            moved.map_points(|p| {
                k += 1.0;
                Point2::new(
                    p.x + 0.05 * (t * 0.37 + k).sin(),
                    p.y + 0.05 * (t * 0.53 - k).cos(),
                )
            })
        })
        .collect()
}
