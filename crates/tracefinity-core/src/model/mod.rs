//! Serialisable data model. Field names are the wire contract.

pub mod bin;
pub mod cutout;
pub mod generate;
pub mod outline;
pub mod point;
pub mod tool;

pub use bin::{BinConfig, BinData, BinPatch, LabelPatch, NewBin, TextLabel};
pub use cutout::{Cutout, CutoutPreset, CutoutShape};
pub use generate::GenerateResponse;
pub use outline::{normalize_rotation, Outline};
pub use point::{Bounds, Point, Ring};
pub use tool::{PlacedTool, Tool, ToolPatch};
