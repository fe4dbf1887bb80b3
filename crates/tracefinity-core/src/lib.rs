//! # Tracefinity Core
//!
//! Core types and traits for Tracefinity.
//! Provides the serialisable data model (tools, placed tools, cutouts, labels,
//! bins), the error types, the store and regeneration service interfaces, and
//! the cancellation token shared by the asynchronous pipelines.

pub mod cancel;
pub mod constants;
pub mod error;
pub mod model;
pub mod store;

pub use cancel::CancellationToken;
pub use error::{Error, ModelError, RegenerationError, Result, StoreError};
pub use model::{
    normalize_rotation, BinConfig, BinData, BinPatch, Bounds, Cutout, CutoutPreset, CutoutShape,
    GenerateResponse, LabelPatch, NewBin, Outline, PlacedTool, Point, Ring, TextLabel, Tool,
    ToolPatch,
};
pub use store::{BinStore, MemoryStore, RegenerationService, ToolStore};
