//! Bins, their configuration and text labels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::point::Point;
use super::tool::PlacedTool;
use crate::constants::{
    DEFAULT_BED_SIZE_MM, DEFAULT_LABEL_DEPTH_MM, DEFAULT_LABEL_FONT_SIZE_MM, GRID_UNIT_MM,
};

/// Parametric bin configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinConfig {
    pub grid_x: u32,
    pub grid_y: u32,
    pub height_units: u32,
    pub magnets: bool,
    pub stacking_lip: bool,
    pub wall_thickness: f64,
    pub cutout_depth: f64,
    pub cutout_clearance: f64,
    pub bed_size: f64,
}

impl Default for BinConfig {
    fn default() -> Self {
        Self {
            grid_x: 2,
            grid_y: 2,
            height_units: 4,
            magnets: true,
            stacking_lip: true,
            wall_thickness: 1.6,
            cutout_depth: 20.0,
            cutout_clearance: 1.0,
            bed_size: DEFAULT_BED_SIZE_MM,
        }
    }
}

impl BinConfig {
    /// Defaults with the user's print bed size.
    pub fn with_bed_size(bed_size: f64) -> Self {
        Self {
            bed_size,
            ..Self::default()
        }
    }

    pub fn width_mm(&self) -> f64 {
        self.grid_x as f64 * GRID_UNIT_MM
    }

    pub fn height_mm(&self) -> f64 {
        self.grid_y as f64 * GRID_UNIT_MM
    }

    pub fn center(&self) -> Point {
        Point::new(self.width_mm() / 2.0, self.height_mm() / 2.0)
    }

    /// Whether a model point lies on the bin floor rectangle, edges included.
    pub fn contains(&self, p: &Point) -> bool {
        p.x >= 0.0 && p.x <= self.width_mm() && p.y >= 0.0 && p.y <= self.height_mm()
    }
}

/// A rotatable, embossed or debossed text label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    pub id: String,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_emboss")]
    pub emboss: bool,
    pub depth: f64,
}

fn default_emboss() -> bool {
    true
}

impl TextLabel {
    pub fn new_id() -> String {
        format!("tl-{}", Uuid::new_v4())
    }

    /// A new label with default styling anchored at `at`.
    pub fn new(text: impl Into<String>, at: Point) -> Self {
        Self {
            id: Self::new_id(),
            text: text.into(),
            x: at.x,
            y: at.y,
            font_size: DEFAULT_LABEL_FONT_SIZE_MM,
            rotation: 0.0,
            emboss: true,
            depth: DEFAULT_LABEL_DEPTH_MM,
        }
    }

    pub fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn apply_patch(&mut self, patch: &LabelPatch) {
        if let Some(text) = &patch.text {
            self.text = text.clone();
        }
        if let Some(size) = patch.font_size {
            self.font_size = size;
        }
        if let Some(rotation) = patch.rotation {
            self.rotation = super::outline::normalize_rotation(rotation);
        }
        if let Some(emboss) = patch.emboss {
            self.emboss = emboss;
        }
        if let Some(depth) = patch.depth {
            self.depth = depth;
        }
    }
}

/// Partial label update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LabelPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emboss: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
}

/// A stored bin layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinData {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bin_config: BinConfig,
    #[serde(default)]
    pub placed_tools: Vec<PlacedTool>,
    #[serde(default)]
    pub text_labels: Vec<TextLabel>,
    #[serde(default)]
    pub stl_path: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl BinData {
    pub fn new(id: impl Into<String>, name: Option<String>, bin_config: BinConfig) -> Self {
        Self {
            id: id.into(),
            name,
            bin_config,
            placed_tools: Vec::new(),
            text_labels: Vec::new(),
            stl_path: None,
            created_at: Some(Utc::now()),
        }
    }

    pub fn apply_patch(&mut self, patch: &BinPatch) {
        if let Some(name) = &patch.name {
            self.name = Some(name.clone());
        }
        if let Some(config) = &patch.bin_config {
            self.bin_config = config.clone();
        }
        if let Some(tools) = &patch.placed_tools {
            self.placed_tools = tools.clone();
        }
        if let Some(labels) = &patch.text_labels {
            self.text_labels = labels.clone();
        }
    }
}

/// Partial bin update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BinPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bin_config: Option<BinConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placed_tools: Option<Vec<PlacedTool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_labels: Option<Vec<TextLabel>>,
}

/// Request to create a bin, optionally pre-populated from library tools.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewBin {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bin_config: Option<BinConfig>,
}
