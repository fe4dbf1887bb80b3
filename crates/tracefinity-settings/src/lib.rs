//! Tracefinity Settings Crate
//!
//! User preferences that live outside the core model: print bed size, snap
//! grid, history depth and the debounce delays of the editing pipelines.

pub mod config;
pub mod error;
pub mod manager;

pub use config::{SettingsFormat, UserSettings};
pub use error::{SettingsError, SettingsResult};
pub use manager::SettingsManager;
