//! Interactive editors for the bin layout and for a single tool outline.

pub mod bin;
pub mod canvas;
pub mod tool;

pub use bin::{BinEditor, BinMode, BinSnapshot, BinTarget, LabelEdit, PendingLabel};
pub use canvas::CanvasState;
pub use tool::{editor_bounds, ToolEditor, ToolMode, ToolTarget};
