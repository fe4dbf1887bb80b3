//! Library tools and their placements inside bins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cutout::Cutout;
use super::outline::Outline;
use super::point::{Point, Ring};
use crate::constants::DEFAULT_SMOOTH_LEVEL;

fn default_smooth_level() -> f64 {
    DEFAULT_SMOOTH_LEVEL
}

/// A traced silhouette stored in the tool library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub outline: Outline,
    #[serde(default)]
    pub smoothed: bool,
    /// Smoothing strength in `[0, 1]`.
    #[serde(default = "default_smooth_level")]
    pub smooth_level: f64,
    #[serde(default)]
    pub source_session_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Tool {
    pub fn new(id: impl Into<String>, name: impl Into<String>, points: Ring) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            outline: Outline::new(points),
            smoothed: false,
            smooth_level: DEFAULT_SMOOTH_LEVEL,
            source_session_id: None,
            created_at: Some(Utc::now()),
        }
    }

    /// Apply a partial update in place.
    pub fn apply_patch(&mut self, patch: &ToolPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(points) = &patch.points {
            self.outline.points = points.clone();
        }
        if let Some(rings) = &patch.interior_rings {
            self.outline.interior_rings = rings.clone();
        }
        if let Some(cutouts) = &patch.cutouts {
            self.outline.cutouts = cutouts.clone();
        }
        if let Some(smoothed) = patch.smoothed {
            self.smoothed = smoothed;
        }
        if let Some(level) = patch.smooth_level {
            self.smooth_level = level.clamp(0.0, 1.0);
        }
    }
}

/// Partial tool update. Absent fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ToolPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Ring>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interior_rings: Option<Vec<Ring>>,
    #[serde(
        default,
        rename = "finger_holes",
        skip_serializing_if = "Option::is_none"
    )]
    pub cutouts: Option<Vec<Cutout>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoothed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smooth_level: Option<f64>,
}

impl ToolPatch {
    pub fn is_empty(&self) -> bool {
        *self == ToolPatch::default()
    }
}

/// An independent copy of a library tool's geometry in bin space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedTool {
    pub id: String,
    pub tool_id: String,
    pub name: String,
    #[serde(flatten)]
    pub outline: Outline,
    #[serde(default)]
    pub rotation: f64,
}

impl PlacedTool {
    /// Copy a library tool's geometry into a new placement.
    pub fn from_tool(tool: &Tool, instance_id: impl Into<String>) -> Self {
        Self {
            id: instance_id.into(),
            tool_id: tool.id.clone(),
            name: tool.name.clone(),
            outline: tool.outline.clone(),
            rotation: 0.0,
        }
    }

    pub fn centroid(&self) -> Option<Point> {
        self.outline.centroid()
    }
}
