//! # Tracefinity Designer
//!
//! The interactive 2D editing engine shared by the bin layout editor and the
//! tool outline editor.
//!
//! ## Core Components
//!
//! - **Geometry**: hole-aware path construction, point-in-ring, RDP
//!   simplification and Chaikin smoothing
//! - **Viewport**: device pixels to model millimetres with zoom and pan
//! - **Snap**: grid quantisation of new positions
//! - **Drag**: one tagged enum for every move/rotate/resize/pan gesture
//! - **History**: bounded snapshot undo/redo
//! - **Layout**: bin growth on insert and recentering
//! - **Editors**: the bin and tool state machines
//! - **SVG**: a static rendering of a bin layout
//!
//! ## Architecture
//!
//! ```text
//! pointer event
//!   └── Viewport (client -> model)
//!         └── Editor (mode, selection, drag)
//!               ├── Geometry / Layout
//!               └── commit -> History + revision
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tracefinity_designer::{BinEditor, BinSnapshot, BinTarget};
//!
//! let mut editor = BinEditor::new(config, BinSnapshot::default());
//! editor.pointer_down(&BinTarget::Tool(id), client, PointerButton::Primary);
//! editor.pointer_move(next);
//! editor.pointer_up();
//! ```

pub mod drag;
pub mod editor;
pub mod geometry;
pub mod history;
pub mod input;
pub mod layout;
pub mod library_sync;
pub mod selection;
pub mod smoothing;
pub mod snap;
pub mod svg_renderer;
pub mod viewport;

pub use drag::DragOperation;
pub use editor::{
    editor_bounds, BinEditor, BinMode, BinSnapshot, BinTarget, CanvasState, LabelEdit,
    PendingLabel, ToolEditor, ToolMode, ToolTarget,
};
pub use geometry::{
    build_lyon_path, build_path, in_filled_area, inside_cutout_area, outline_path, point_in_ring,
    simplify, smooth, smooth_ring, smoothing_epsilon, svg_path_data,
};
pub use history::{History, HistoryCommand};
pub use input::{Key, Modifiers, PointerButton};
pub use layout::{combined_bounds, place_tool, recenter, required_grid, Placement};
pub use library_sync::sync_placed_tools;
pub use selection::Selection;
pub use smoothing::SmoothingTable;
pub use snap::{snap_to_grid, Snapper};
pub use svg_renderer::render_bin_svg;
pub use viewport::{ClientRect, ViewBox, Viewport};
