//! Shared numeric constants for the bin grid, editors and pipelines.

/// Edge length of one grid cell in millimetres.
pub const GRID_UNIT_MM: f64 = 42.0;

/// Display units per millimetre in the bin layout editor.
pub const BIN_DISPLAY_SCALE: f64 = 4.0;

/// Display units per millimetre in the tool outline editor.
pub const TOOL_DISPLAY_SCALE: f64 = 8.0;

/// Handle margin around the bin rectangle, in display units.
pub const BIN_VIEW_PADDING: f64 = 10.0;

/// Extra width reserved right of the bin for handles, in display units.
pub const BIN_VIEW_EXTRA_WIDTH: f64 = 70.0;

/// Extra height reserved below the bin for handles, in display units.
pub const BIN_VIEW_EXTRA_HEIGHT: f64 = 30.0;

/// Padding around the tool outline in the tool editor, in millimetres.
pub const TOOL_VIEW_PADDING_MM: f64 = 20.0;

/// Default snap step in millimetres.
pub const DEFAULT_SNAP_STEP_MM: f64 = 5.0;

/// Default number of history snapshots retained.
pub const DEFAULT_HISTORY_DEPTH: usize = 50;

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 20.0;
/// Multiplicative zoom change per wheel tick.
pub const ZOOM_STEP: f64 = 1.15;

/// Smallest radius a cutout can be resized to, in millimetres.
pub const MIN_CUTOUT_RADIUS_MM: f64 = 5.0;

/// Smallest rectangle side a cutout can be resized to, in millimetres.
pub const MIN_CUTOUT_SIDE_MM: f64 = 10.0;

/// Chaikin passes applied when smoothing an outline.
pub const SMOOTH_ITERATIONS: usize = 3;

/// Simplification tolerance applied after Chaikin smoothing.
pub const SMOOTH_CLEANUP_EPSILON_MM: f64 = 0.05;

/// Lower bound of the per-ring smoothing tolerance.
pub const MIN_SMOOTHING_EPSILON_MM: f64 = 0.3;

/// Slack added to the wall/clearance margin when fitting a tool into the grid.
pub const PLACEMENT_SLACK_MM: f64 = 0.5;

/// Inset of the printable area from the outer bin edge, beyond the wall.
pub const WALL_INSET_SLACK_MM: f64 = 0.25;

/// Default print bed edge length in millimetres.
pub const DEFAULT_BED_SIZE_MM: f64 = 256.0;

/// Smoothing level assumed when a tool is smoothed without an explicit level.
pub const DEFAULT_SMOOTH_LEVEL: f64 = 0.5;

pub const DEFAULT_LABEL_FONT_SIZE_MM: f64 = 5.0;
pub const DEFAULT_LABEL_DEPTH_MM: f64 = 0.5;

/// Persistence debounce in milliseconds.
pub const SAVE_DEBOUNCE_MS: u64 = 150;

/// Regeneration debounce in milliseconds.
pub const REGENERATE_DEBOUNCE_MS: u64 = 1000;

/// Debounce for writing smoothing level changes back to the tool library.
pub const SMOOTH_LEVEL_DEBOUNCE_MS: u64 = 300;
