//! Per-library-tool smoothing state used when rendering placed tools.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use tracefinity_core::constants::DEFAULT_SMOOTH_LEVEL;
use tracefinity_core::model::Tool;

/// Which library tools render smoothed, and at what level.
///
/// Ordered collections keep serialisation deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SmoothingTable {
    smoothed: BTreeSet<String>,
    levels: BTreeMap<String, f64>,
}

impl SmoothingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tools<'a>(tools: impl IntoIterator<Item = &'a Tool>) -> Self {
        let mut table = Self::new();
        for tool in tools {
            table.levels.insert(tool.id.clone(), tool.smooth_level);
            if tool.smoothed {
                table.smoothed.insert(tool.id.clone());
            }
        }
        table
    }

    pub fn is_smoothed(&self, tool_id: &str) -> bool {
        self.smoothed.contains(tool_id)
    }

    pub fn set_smoothed(&mut self, tool_id: &str, smoothed: bool) {
        if smoothed {
            self.smoothed.insert(tool_id.to_string());
        } else {
            self.smoothed.remove(tool_id);
        }
    }

    pub fn level(&self, tool_id: &str) -> f64 {
        self.levels
            .get(tool_id)
            .copied()
            .unwrap_or(DEFAULT_SMOOTH_LEVEL)
    }

    pub fn set_level(&mut self, tool_id: &str, level: f64) {
        self.levels
            .insert(tool_id.to_string(), level.clamp(0.0, 1.0));
    }

    /// Level to render with, or `None` when the tool is drawn unsmoothed.
    pub fn render_level(&self, tool_id: &str) -> Option<f64> {
        self.is_smoothed(tool_id).then(|| self.level(tool_id))
    }
}
