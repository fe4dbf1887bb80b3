//! Ramer-Douglas-Peucker simplification of closed rings.

use tracefinity_core::model::Point;

/// Simplify a closed ring.
///
/// The ring is closed by repeating its first point, simplified as an open
/// polyline, and the duplicated closing point is dropped again. Rings of
/// three or fewer points and non-positive tolerances are returned as is, and
/// a result with fewer than three points falls back to the input.
pub fn simplify(ring: &[Point], epsilon: f64) -> Vec<Point> {
    if ring.len() <= 3 || epsilon <= 0.0 {
        return ring.to_vec();
    }

    let mut closed = Vec::with_capacity(ring.len() + 1);
    closed.extend_from_slice(ring);
    closed.push(ring[0]);

    let mut out = simplify_polyline(&closed, epsilon);
    out.pop();

    if out.len() < 3 {
        return ring.to_vec();
    }
    out
}

/// RDP on an open polyline. Endpoints are always kept.
pub fn simplify_polyline(points: &[Point], epsilon: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let first = points[0];
    let last = points[points.len() - 1];

    let mut max_dist = 0.0;
    let mut index = 0;
    for (i, p) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let d = perpendicular_distance(p, &first, &last);
        if d > max_dist {
            max_dist = d;
            index = i;
        }
    }

    if max_dist > epsilon {
        let mut left = simplify_polyline(&points[..=index], epsilon);
        let right = simplify_polyline(&points[index..], epsilon);
        left.pop();
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

/// Distance from `p` to the line through `a` and `b`, or to `a` when they coincide.
fn perpendicular_distance(p: &Point, a: &Point, b: &Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = dx.hypot(dy);
    if len == 0.0 {
        return p.distance_to(a);
    }
    ((p.x - a.x) * dy - (p.y - a.y) * dx).abs() / len
}
