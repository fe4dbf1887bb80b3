//! Point containment tests.

use tracefinity_core::model::{Outline, Point};

/// Crossing-number ray cast. Winding direction does not matter.
pub fn point_in_ring(p: &Point, ring: &[Point]) -> bool {
    let n = ring.len();
    if n == 0 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = ring[i];
        let b = ring[j];
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Inside the filled area of a single outline: the outer ring minus its islands.
pub fn in_filled_area(p: &Point, outline: &Outline) -> bool {
    point_in_ring(p, &outline.points)
        && !outline
            .interior_rings
            .iter()
            .any(|ring| point_in_ring(p, ring))
}

/// Inside the filled area of any of the given outlines.
pub fn inside_cutout_area<'a>(p: &Point, outlines: impl IntoIterator<Item = &'a Outline>) -> bool {
    outlines.into_iter().any(|o| in_filled_area(p, o))
}
