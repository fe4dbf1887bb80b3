//! Re-synchronising placed tools with edited library tools.

use std::collections::HashMap;

use tracing::debug;

use tracefinity_core::model::{Cutout, Outline, PlacedTool, Point, Tool};

const SAME_EPSILON: f64 = 1e-9;

/// Regenerate each placed tool's geometry from its library tool.
///
/// The library outline is rotated about its own centroid by the placement's
/// rotation and moved onto the placement's centroid. Placements whose library
/// tool is missing or empty are left alone. Returns whether anything changed.
pub fn sync_placed_tools(placed: &mut [PlacedTool], library: &[Tool]) -> bool {
    let by_id: HashMap<&str, &Tool> = library.iter().map(|t| (t.id.as_str(), t)).collect();
    let mut changed = false;

    for pt in placed.iter_mut() {
        let Some(tool) = by_id.get(pt.tool_id.as_str()) else {
            continue;
        };
        let (Some(lib_center), Some(placed_center)) =
            (tool.outline.centroid(), pt.outline.centroid())
        else {
            continue;
        };

        let synced = tool
            .outline
            .rotated_about(&lib_center, pt.rotation, false)
            .translated(placed_center - lib_center);

        if !same_outline(&synced, &pt.outline) || pt.name != tool.name {
            debug!("Synced placement {} with library tool {}", pt.id, tool.id);
            pt.outline = synced;
            pt.name = tool.name.clone();
            changed = true;
        }
    }
    changed
}

fn same_point(a: &Point, b: &Point) -> bool {
    (a.x - b.x).abs() < SAME_EPSILON && (a.y - b.y).abs() < SAME_EPSILON
}

fn same_ring(a: &[Point], b: &[Point]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(p, q)| same_point(p, q))
}

fn same_cutout(a: &Cutout, b: &Cutout) -> bool {
    a.id == b.id
        && same_point(&a.center(), &b.center())
        && a.radius == b.radius
        && a.rotation == b.rotation
        && a.shape == b.shape
        && a.width == b.width
        && a.height == b.height
}

fn same_outline(a: &Outline, b: &Outline) -> bool {
    same_ring(&a.points, &b.points)
        && a.interior_rings.len() == b.interior_rings.len()
        && a
            .interior_rings
            .iter()
            .zip(&b.interior_rings)
            .all(|(r, s)| same_ring(r, s))
        && a.cutouts.len() == b.cutouts.len()
        && a.cutouts.iter().zip(&b.cutouts).all(|(c, d)| same_cutout(c, d))
}
