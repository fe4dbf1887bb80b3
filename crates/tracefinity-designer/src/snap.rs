//! Grid snapping for positions produced by the editors.

use tracefinity_core::constants::DEFAULT_SNAP_STEP_MM;
use tracefinity_core::model::Point;

/// Round `value` to the nearest multiple of `step`, halves rounding up.
pub fn snap_to_grid(value: f64, step: f64) -> f64 {
    if step <= 0.0 {
        return value;
    }
    (value / step + 0.5).floor() * step
}

/// Toggleable grid snapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapper {
    pub enabled: bool,
    pub step: f64,
}

impl Snapper {
    pub fn new(enabled: bool, step: f64) -> Self {
        Self { enabled, step }
    }

    pub fn snap(&self, value: f64) -> f64 {
        if self.enabled {
            snap_to_grid(value, self.step)
        } else {
            value
        }
    }

    pub fn snap_point(&self, p: Point) -> Point {
        Point::new(self.snap(p.x), self.snap(p.y))
    }
}

impl Default for Snapper {
    fn default() -> Self {
        Self::new(true, DEFAULT_SNAP_STEP_MM)
    }
}
