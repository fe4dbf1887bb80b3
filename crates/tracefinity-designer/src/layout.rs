//! Placement rules: growing the bin grid on insert and recentering tools.

use tracing::debug;

use tracefinity_core::constants::{GRID_UNIT_MM, PLACEMENT_SLACK_MM};
use tracefinity_core::model::{BinConfig, Bounds, PlacedTool};

/// Space lost to walls, clearance and the grid inset when fitting a tool.
pub fn placement_margin(config: &BinConfig) -> f64 {
    2.0 * config.wall_thickness + 2.0 * config.cutout_clearance + PLACEMENT_SLACK_MM
}

/// Smallest grid, never below the current one, that fits an extent of `bounds`.
pub fn required_grid(config: &BinConfig, bounds: &Bounds) -> (u32, u32) {
    let margin = placement_margin(config);
    let need = |extent: f64, current: u32| -> u32 {
        let cells = ((extent + margin) / GRID_UNIT_MM).ceil();
        current.max(cells.max(0.0) as u32)
    };
    (
        need(bounds.width(), config.grid_x),
        need(bounds.height(), config.grid_y),
    )
}

/// Outcome of fitting a tool into a bin.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub tool: PlacedTool,
    pub grid_x: u32,
    pub grid_y: u32,
}

impl Placement {
    pub fn grew(&self, config: &BinConfig) -> bool {
        self.grid_x != config.grid_x || self.grid_y != config.grid_y
    }
}

/// Fit `tool` into the bin described by `config`.
///
/// When the tool does not fit, the grid grows and the tool is centred in the
/// new bin. Otherwise the tool keeps its coordinates.
pub fn place_tool(config: &BinConfig, mut tool: PlacedTool) -> Placement {
    let Some(bounds) = tool.outline.bounds() else {
        return Placement {
            tool,
            grid_x: config.grid_x,
            grid_y: config.grid_y,
        };
    };
    let (grid_x, grid_y) = required_grid(config, &bounds);
    if grid_x != config.grid_x || grid_y != config.grid_y {
        let grown = BinConfig {
            grid_x,
            grid_y,
            ..config.clone()
        };
        tool.outline.translate(grown.center() - bounds.center());
        debug!(
            "Bin grid grew from {}x{} to {}x{} for {}",
            config.grid_x, config.grid_y, grid_x, grid_y, tool.name
        );
    }
    Placement {
        tool,
        grid_x,
        grid_y,
    }
}

/// Bounds of every placed tool's outer ring.
pub fn combined_bounds(tools: &[PlacedTool]) -> Option<Bounds> {
    tools
        .iter()
        .filter_map(|t| t.outline.bounds())
        .reduce(|a, b| a.union(&b))
}

/// Translate every tool so the combined bounds are centred in the bin.
///
/// Returns `false` when there is nothing to move.
pub fn recenter(config: &BinConfig, tools: &mut [PlacedTool]) -> bool {
    let Some(bounds) = combined_bounds(tools) else {
        return false;
    };
    let delta = config.center() - bounds.center();
    if delta.x == 0.0 && delta.y == 0.0 {
        return false;
    }
    for tool in tools.iter_mut() {
        tool.outline.translate(delta);
    }
    true
}
