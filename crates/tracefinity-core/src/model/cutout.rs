//! Finger-hole cutouts carried by tools and placed tools.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::point::{Bounds, Point};

/// Cutout outline shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutoutShape {
    #[default]
    Circle,
    Square,
    Rectangle,
}

impl fmt::Display for CutoutShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CutoutShape::Circle => write!(f, "circle"),
            CutoutShape::Square => write!(f, "square"),
            CutoutShape::Rectangle => write!(f, "rectangle"),
        }
    }
}

/// A cutout (finger hole) positioned in the owner's coordinate space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cutout {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub shape: CutoutShape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Cutout {
    /// Generate a fresh cutout id.
    pub fn new_id() -> String {
        format!("fh-{}", Uuid::new_v4())
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_center(&mut self, p: Point) {
        self.x = p.x;
        self.y = p.y;
    }

    /// Effective width: explicit for rectangles, otherwise the diameter.
    pub fn effective_width(&self) -> f64 {
        match (self.shape, self.width) {
            (CutoutShape::Rectangle, Some(w)) => w,
            _ => self.radius * 2.0,
        }
    }

    /// Effective height: explicit for rectangles, otherwise the diameter.
    pub fn effective_height(&self) -> f64 {
        match (self.shape, self.height) {
            (CutoutShape::Rectangle, Some(h)) => h,
            _ => self.radius * 2.0,
        }
    }

    /// Unrotated axis-aligned extent around the centre.
    pub fn bounds(&self) -> Bounds {
        let hw = self.effective_width() / 2.0;
        let hh = self.effective_height() / 2.0;
        Bounds {
            min_x: self.x - hw,
            min_y: self.y - hh,
            max_x: self.x + hw,
            max_y: self.y + hh,
        }
    }
}

/// A cutout template used by the tool editor placement modes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutoutPreset {
    pub shape: CutoutShape,
    pub radius: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl CutoutPreset {
    pub const FINGER_HOLE: CutoutPreset = CutoutPreset {
        shape: CutoutShape::Circle,
        radius: 15.0,
        width: None,
        height: None,
    };
    pub const CIRCLE: CutoutPreset = CutoutPreset {
        shape: CutoutShape::Circle,
        radius: 10.0,
        width: None,
        height: None,
    };
    pub const SQUARE: CutoutPreset = CutoutPreset {
        shape: CutoutShape::Square,
        radius: 10.0,
        width: None,
        height: None,
    };
    pub const RECTANGLE: CutoutPreset = CutoutPreset {
        shape: CutoutShape::Rectangle,
        radius: 15.0,
        width: Some(30.0),
        height: Some(20.0),
    };

    /// Instantiate at `at` with a fresh id and no rotation.
    pub fn instantiate(&self, at: Point) -> Cutout {
        Cutout {
            id: Cutout::new_id(),
            x: at.x,
            y: at.y,
            radius: self.radius,
            rotation: 0.0,
            shape: self.shape,
            width: self.width,
            height: self.height,
        }
    }
}
