//! Chaikin corner cutting and the smoothed rendering rule.

use tracefinity_core::constants::{
    MIN_SMOOTHING_EPSILON_MM, SMOOTH_CLEANUP_EPSILON_MM, SMOOTH_ITERATIONS,
};
use tracefinity_core::model::{Bounds, Outline, Point, Ring};

use super::path::build_path;
use super::simplify::simplify;

/// Closed Chaikin smoothing followed by a light simplification pass.
pub fn smooth(ring: &[Point], iterations: usize) -> Vec<Point> {
    if ring.len() < 3 {
        return ring.to_vec();
    }
    let mut current = ring.to_vec();
    for _ in 0..iterations {
        current = chaikin_pass(&current);
    }
    simplify(&current, SMOOTH_CLEANUP_EPSILON_MM)
}

/// [`smooth`] with the default number of passes.
pub fn smooth_default(ring: &[Point]) -> Vec<Point> {
    smooth(ring, SMOOTH_ITERATIONS)
}

fn chaikin_pass(ring: &[Point]) -> Vec<Point> {
    let n = ring.len();
    let mut out = Vec::with_capacity(n * 2);
    for i in 0..n {
        let p0 = ring[i];
        let p1 = ring[(i + 1) % n];
        out.push(p0.lerp(&p1, 0.25));
        out.push(p0.lerp(&p1, 0.75));
    }
    out
}

/// Simplification tolerance for a ring at a smoothing level in `[0, 1]`.
///
/// Proportional to the ring's bounding-box diagonal, never below 0.3 mm.
pub fn smoothing_epsilon(ring: &[Point], level: f64) -> f64 {
    let diag = Bounds::of_points(ring).map(|b| b.diagonal()).unwrap_or(0.0);
    MIN_SMOOTHING_EPSILON_MM.max(diag * (0.002 + level * 0.006))
}

/// Simplify with a level-derived tolerance, then smooth.
pub fn smooth_ring(ring: &[Point], level: f64) -> Ring {
    smooth_default(&simplify(ring, smoothing_epsilon(ring, level)))
}

/// Path data for an outline, smoothed when `smoothing` carries a level.
pub fn outline_path(outline: &Outline, smoothing: Option<f64>, scale: f64) -> String {
    match smoothing {
        Some(level) => {
            let outer = smooth_ring(&outline.points, level);
            let interiors: Vec<Ring> = outline
                .interior_rings
                .iter()
                .map(|ring| smooth_ring(ring, level))
                .collect();
            build_path(&outer, &interiors, scale)
        }
        None => build_path(&outline.points, &outline.interior_rings, scale),
    }
}
