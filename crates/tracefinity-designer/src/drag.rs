//! In-progress pointer drags.
//!
//! A [`DragOperation`] captures everything needed to compute the live result
//! from the current pointer position alone: live geometry is always derived
//! from the originals captured at pointer-down, never accumulated.

use tracefinity_core::constants::{MIN_CUTOUT_RADIUS_MM, MIN_CUTOUT_SIDE_MM};
use tracefinity_core::model::{normalize_rotation, Cutout, CutoutShape, Outline, Point};

use crate::snap::Snapper;

/// One drag at a time, created on pointer-down and resolved on pointer-up.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOperation {
    /// Translate a placed tool; its centroid snaps.
    MoveTool {
        tool_id: String,
        start: Point,
        original: Outline,
    },
    /// Rotate a placed tool about its centroid.
    RotateTool {
        tool_id: String,
        pivot: Point,
        start_angle: f64,
        original: Outline,
        original_rotation: f64,
    },
    /// Translate a text label; its anchor snaps.
    MoveLabel {
        label_id: String,
        start: Point,
        original: Point,
    },
    /// Rotate a text label about its anchor.
    RotateLabel {
        label_id: String,
        pivot: Point,
        start_angle: f64,
        original_rotation: f64,
    },
    /// Drag a single outline vertex; the vertex itself snaps.
    MoveVertex { index: usize },
    /// Translate a cutout; its centre snaps.
    MoveCutout {
        cutout_id: String,
        start: Point,
        original: Point,
    },
    /// Resize a cutout by dragging away from its centre.
    ResizeCutout {
        cutout_id: String,
        center: Point,
        original_radius: f64,
        original_width: Option<f64>,
        original_height: Option<f64>,
    },
    /// Rotate a cutout about its centre.
    RotateCutout {
        cutout_id: String,
        pivot: Point,
        start_angle: f64,
        original_rotation: f64,
    },
    /// Rotate the whole outline, cutouts included, about its centroid.
    RotateOutline {
        pivot: Point,
        start_angle: f64,
        original: Outline,
    },
    /// Pan the view. Works in device coordinates with a scale fixed at drag start.
    Pan {
        start_client: Point,
        original_pan: Point,
        units_per_pixel: f64,
    },
}

impl DragOperation {
    pub fn is_pan(&self) -> bool {
        matches!(self, DragOperation::Pan { .. })
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DragOperation::MoveTool { .. } => "move-tool",
            DragOperation::RotateTool { .. } => "rotate-tool",
            DragOperation::MoveLabel { .. } => "move-label",
            DragOperation::RotateLabel { .. } => "rotate-label",
            DragOperation::MoveVertex { .. } => "move-vertex",
            DragOperation::MoveCutout { .. } => "move-cutout",
            DragOperation::ResizeCutout { .. } => "resize-cutout",
            DragOperation::RotateCutout { .. } => "rotate-cutout",
            DragOperation::RotateOutline { .. } => "rotate-outline",
            DragOperation::Pan { .. } => "pan",
        }
    }

    /// Start a rotation drag about `pivot` from the pointer position `at`.
    pub fn start_angle(pivot: &Point, at: &Point) -> f64 {
        at.angle_around(pivot)
    }
}

/// Degrees swept around `pivot` since the drag started.
pub fn rotation_delta(pivot: &Point, start_angle: f64, pointer: &Point) -> f64 {
    pointer.angle_around(pivot) - start_angle
}

/// Snap the moved centroid and shift the whole outline by the snapped delta.
pub fn moved_outline(original: &Outline, start: Point, pointer: Point, snapper: &Snapper) -> Outline {
    let Some(center) = original.centroid() else {
        return original.clone();
    };
    let target = snapper.snap_point(center + (pointer - start));
    original.translated(target - center)
}

/// Rotate the original outline by the swept angle.
///
/// Returns the rotated outline and the swept angle in degrees.
pub fn rotated_outline(
    original: &Outline,
    pivot: &Point,
    start_angle: f64,
    pointer: &Point,
    spin_cutouts: bool,
) -> (Outline, f64) {
    let delta = rotation_delta(pivot, start_angle, pointer);
    (original.rotated_about(pivot, delta, spin_cutouts), delta)
}

/// Snap an anchor moved by the raw pointer delta.
pub fn moved_anchor(original: Point, start: Point, pointer: Point, snapper: &Snapper) -> Point {
    snapper.snap_point(original + (pointer - start))
}

/// Rotation after sweeping from `start_angle` to the pointer, folded into `(-360, 360)`.
pub fn rotated_value(original_rotation: f64, pivot: &Point, start_angle: f64, pointer: &Point) -> f64 {
    normalize_rotation(original_rotation + rotation_delta(pivot, start_angle, pointer))
}

/// Apply a resize drag to `cutout`.
///
/// The radius follows the pointer distance from the centre, floored at 5 mm.
/// Rectangles with explicit sides scale them by the radius ratio, each
/// floored at 10 mm.
pub fn resize_cutout(
    cutout: &mut Cutout,
    center: &Point,
    original_radius: f64,
    original_width: Option<f64>,
    original_height: Option<f64>,
    pointer: &Point,
) {
    let radius = MIN_CUTOUT_RADIUS_MM.max(pointer.distance_to(center));
    let ratio = if original_radius > 0.0 {
        radius / original_radius
    } else {
        1.0
    };
    cutout.radius = radius;
    if let (CutoutShape::Rectangle, Some(w), Some(h)) =
        (cutout.shape, original_width, original_height)
    {
        cutout.width = Some(MIN_CUTOUT_SIDE_MM.max(w * ratio));
        cutout.height = Some(MIN_CUTOUT_SIDE_MM.max(h * ratio));
    }
}

/// New pan offset after moving the pointer from `start_client` to `client`.
pub fn panned(original_pan: Point, start_client: Point, units_per_pixel: f64, client: Point) -> Point {
    original_pan - (client - start_client) * units_per_pixel
}
